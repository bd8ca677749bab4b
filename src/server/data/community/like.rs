use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

/// Per-user likes of community posts, keyed by `(post_id, user_id)`.
pub struct CommunityLikeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommunityLikeRepository<'a, C> {
    /// Creates a new instance of [`CommunityLikeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a like, returning `false` if the user already liked the post
    pub async fn insert(&self, post_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let like = entity::community_post_like::ActiveModel {
            post_id: ActiveValue::Set(post_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        let inserted = entity::prelude::CommunityPostLike::insert(like)
            .on_conflict(
                OnConflict::columns([
                    entity::community_post_like::Column::PostId,
                    entity::community_post_like::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(inserted == 1)
    }

    /// Removes a like, returning `false` if there was none
    pub async fn delete(&self, post_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CommunityPostLike::delete_by_id((post_id, user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn delete_for_posts(&self, post_ids: Vec<i32>) -> Result<u64, DbErr> {
        if post_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::CommunityPostLike::delete_many()
            .filter(entity::community_post_like::Column::PostId.is_in(post_ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    mod insert {
        use civitas_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::server::data::community::like::CommunityLikeRepository;

        /// Expect a second like by the same user to be ignored
        #[tokio::test]
        async fn is_idempotent_per_user() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let community = test.community().insert_community(&ada, false).await?;
            let post = test
                .post()
                .insert_community_post(community.id, &ada, "Hello")
                .await?;

            let like_repo = CommunityLikeRepository::new(&test.state.db);
            let first = like_repo.insert(post.id, ada.id).await.unwrap();
            let second = like_repo.insert(post.id, ada.id).await.unwrap();
            let likes = entity::prelude::CommunityPostLike::find()
                .all(&test.state.db)
                .await?;

            assert!(first);
            assert!(!second);
            assert_eq!(likes.len(), 1);

            Ok(())
        }
    }

    mod delete {
        use civitas_test_utils::prelude::*;

        use crate::server::data::community::like::CommunityLikeRepository;

        /// Expect false when removing a like that does not exist
        #[tokio::test]
        async fn reports_missing_like() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let community = test.community().insert_community(&ada, false).await?;
            let post = test
                .post()
                .insert_community_post(community.id, &ada, "Hello")
                .await?;

            let like_repo = CommunityLikeRepository::new(&test.state.db);
            like_repo.insert(post.id, ada.id).await.unwrap();
            let removed = like_repo.delete(post.id, ada.id).await.unwrap();
            let again = like_repo.delete(post.id, ada.id).await.unwrap();

            assert!(removed);
            assert!(!again);

            Ok(())
        }
    }
}
