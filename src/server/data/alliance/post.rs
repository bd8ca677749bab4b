use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

const COMMENTS: &str = "(SELECT COUNT(*) FROM alliance_post_comment \
     WHERE alliance_post_comment.post_id = alliance_post.id)";
const LIKES: &str = "(SELECT COUNT(*) FROM alliance_post_like \
     WHERE alliance_post_like.post_id = alliance_post.id)";

pub struct AlliancePostRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AlliancePostRepository<'a, C> {
    /// Creates a new instance of [`AlliancePostRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a post written by `author` on behalf of `community`
    pub async fn create(
        &self,
        alliance_id: i32,
        author: &entity::civitas_user::Model,
        community: &entity::community::Model,
        content: String,
    ) -> Result<entity::alliance_post::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let post = entity::alliance_post::ActiveModel {
            alliance_id: ActiveValue::Set(alliance_id),
            author_id: ActiveValue::Set(author.id),
            author_display_name: ActiveValue::Set(author.display_name.clone()),
            author_community_id: ActiveValue::Set(community.id),
            author_community_name: ActiveValue::Set(community.name.clone()),
            content: ActiveValue::Set(content),
            likes_count: ActiveValue::Set(0),
            comments_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        post.insert(self.db).await
    }

    /// Gets a post only if it belongs to `alliance_id`
    pub async fn get(
        &self,
        alliance_id: i32,
        post_id: i32,
    ) -> Result<Option<entity::alliance_post::Model>, DbErr> {
        entity::prelude::AlliancePost::find_by_id(post_id)
            .filter(entity::alliance_post::Column::AllianceId.eq(alliance_id))
            .one(self.db)
            .await
    }

    /// Lists an alliance's posts, newest first
    pub async fn list(&self, alliance_id: i32) -> Result<Vec<entity::alliance_post::Model>, DbErr> {
        entity::prelude::AlliancePost::find()
            .filter(entity::alliance_post::Column::AllianceId.eq(alliance_id))
            .order_by_desc(entity::alliance_post::Column::CreatedAt)
            .order_by_desc(entity::alliance_post::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn ids_for_alliance(&self, alliance_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::AlliancePost::find()
            .select_only()
            .column(entity::alliance_post::Column::Id)
            .filter(entity::alliance_post::Column::AllianceId.eq(alliance_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Adds `delta` to `comments_count`, never taking it below zero
    pub async fn adjust_comments_count(&self, post_id: i32, delta: i32) -> Result<u64, DbErr> {
        self.adjust_counter(post_id, entity::alliance_post::Column::CommentsCount, delta)
            .await
    }

    /// Adds `delta` to `likes_count`, never taking it below zero
    pub async fn adjust_likes_count(&self, post_id: i32, delta: i32) -> Result<u64, DbErr> {
        self.adjust_counter(post_id, entity::alliance_post::Column::LikesCount, delta)
            .await
    }

    async fn adjust_counter(
        &self,
        post_id: i32,
        column: entity::alliance_post::Column,
        delta: i32,
    ) -> Result<u64, DbErr> {
        let mut update = entity::prelude::AlliancePost::update_many()
            .col_expr(column, Expr::col(column).add(delta))
            .filter(entity::alliance_post::Column::Id.eq(post_id));
        if delta < 0 {
            update = update.filter(column.gte(-delta));
        }

        Ok(update.exec(self.db).await?.rows_affected)
    }

    /// Recomputes comment and like counters in place, touching only rows that drifted
    pub async fn recount(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::AlliancePost::update_many()
            .col_expr(
                entity::alliance_post::Column::CommentsCount,
                Expr::cust(COMMENTS),
            )
            .col_expr(entity::alliance_post::Column::LikesCount, Expr::cust(LIKES))
            .filter(
                Condition::any()
                    .add(Expr::cust(format!("comments_count <> {}", COMMENTS)))
                    .add(Expr::cust(format!("likes_count <> {}", LIKES))),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_all_for_alliance(&self, alliance_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::AlliancePost::delete_many()
            .filter(entity::alliance_post::Column::AllianceId.eq(alliance_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
