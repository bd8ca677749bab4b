use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

/// Per-user likes of alliance posts, keyed by `(post_id, user_id)`.
pub struct AllianceLikeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AllianceLikeRepository<'a, C> {
    /// Creates a new instance of [`AllianceLikeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a like, returning `false` if the user already liked the post
    pub async fn insert(&self, post_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let like = entity::alliance_post_like::ActiveModel {
            post_id: ActiveValue::Set(post_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        let inserted = entity::prelude::AlliancePostLike::insert(like)
            .on_conflict(
                OnConflict::columns([
                    entity::alliance_post_like::Column::PostId,
                    entity::alliance_post_like::Column::UserId,
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
        let result = entity::prelude::AlliancePostLike::delete_by_id((post_id, user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn delete_for_posts(&self, post_ids: Vec<i32>) -> Result<u64, DbErr> {
        if post_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::AlliancePostLike::delete_many()
            .filter(entity::alliance_post_like::Column::PostId.is_in(post_ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
