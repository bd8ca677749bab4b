use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct CommunityCommentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommunityCommentRepository<'a, C> {
    /// Creates a new instance of [`CommunityCommentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        post: &entity::community_post::Model,
        author: &entity::civitas_user::Model,
        content: String,
    ) -> Result<entity::community_post_comment::Model, DbErr> {
        let comment = entity::community_post_comment::ActiveModel {
            post_id: ActiveValue::Set(post.id),
            community_id: ActiveValue::Set(post.community_id),
            author_id: ActiveValue::Set(author.id),
            author_display_name: ActiveValue::Set(author.display_name.clone()),
            content: ActiveValue::Set(content),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        comment.insert(self.db).await
    }

    /// Lists a post's comments, oldest first
    pub async fn list(
        &self,
        post_id: i32,
    ) -> Result<Vec<entity::community_post_comment::Model>, DbErr> {
        entity::prelude::CommunityPostComment::find()
            .filter(entity::community_post_comment::Column::PostId.eq(post_id))
            .order_by_asc(entity::community_post_comment::Column::CreatedAt)
            .order_by_asc(entity::community_post_comment::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn delete_all_for_community(&self, community_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::CommunityPostComment::delete_many()
            .filter(entity::community_post_comment::Column::CommunityId.eq(community_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    mod list {
        use civitas_test_utils::prelude::*;

        use crate::server::data::community::comment::CommunityCommentRepository;

        /// Expect comments in the order they were written
        #[tokio::test]
        async fn lists_oldest_first() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let community = test.community().insert_community(&ada, false).await?;
            let post = test
                .post()
                .insert_community_post(community.id, &ada, "Hello")
                .await?;
            let first = test
                .post()
                .insert_community_comment(&post, &ada, "One")
                .await?;
            let second = test
                .post()
                .insert_community_comment(&post, &ada, "Two")
                .await?;

            let comment_repo = CommunityCommentRepository::new(&test.state.db);
            let comments = comment_repo.list(post.id).await.unwrap();

            assert_eq!(
                comments.iter().map(|c| c.id).collect::<Vec<_>>(),
                vec![first.id, second.id]
            );

            Ok(())
        }
    }

    mod create {
        use civitas_test_utils::prelude::*;

        use crate::server::data::community::comment::CommunityCommentRepository;

        /// Expect the comment to carry the post's community and the author's name
        #[tokio::test]
        async fn copies_post_and_author_metadata() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let grace = test.user().insert_user("Grace").await?;
            let community = test.community().insert_community(&ada, false).await?;
            let post = test
                .post()
                .insert_community_post(community.id, &ada, "Hello")
                .await?;

            let comment_repo = CommunityCommentRepository::new(&test.state.db);
            let comment = comment_repo
                .create(&post, &grace, "Hi there".to_string())
                .await
                .unwrap();

            assert_eq!(comment.community_id, community.id);
            assert_eq!(comment.author_display_name, "Grace");

            Ok(())
        }
    }
}
