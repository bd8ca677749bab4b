use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct AllianceCommentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AllianceCommentRepository<'a, C> {
    /// Creates a new instance of [`AllianceCommentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        post: &entity::alliance_post::Model,
        author: &entity::civitas_user::Model,
        community: &entity::community::Model,
        content: String,
    ) -> Result<entity::alliance_post_comment::Model, DbErr> {
        let comment = entity::alliance_post_comment::ActiveModel {
            post_id: ActiveValue::Set(post.id),
            alliance_id: ActiveValue::Set(post.alliance_id),
            author_id: ActiveValue::Set(author.id),
            author_display_name: ActiveValue::Set(author.display_name.clone()),
            author_community_id: ActiveValue::Set(community.id),
            author_community_name: ActiveValue::Set(community.name.clone()),
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
    ) -> Result<Vec<entity::alliance_post_comment::Model>, DbErr> {
        entity::prelude::AlliancePostComment::find()
            .filter(entity::alliance_post_comment::Column::PostId.eq(post_id))
            .order_by_asc(entity::alliance_post_comment::Column::CreatedAt)
            .order_by_asc(entity::alliance_post_comment::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn delete_all_for_alliance(&self, alliance_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::AlliancePostComment::delete_many()
            .filter(entity::alliance_post_comment::Column::AllianceId.eq(alliance_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
