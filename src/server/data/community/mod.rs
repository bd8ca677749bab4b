//! Community records and the repositories scoped to a community.

pub mod comment;
pub mod like;
pub mod member;
pub mod post;

use chrono::Utc;
use entity::sea_orm_active_enums::{CommunityKind, MembershipStatus};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

const APPROVED_MEMBERS: &str = "(SELECT COUNT(*) FROM community_member \
     WHERE community_member.community_id = community.id \
     AND community_member.status = 'approved')";
const POSTS: &str =
    "(SELECT COUNT(*) FROM community_post WHERE community_post.community_id = community.id)";

/// Fields of a new community.
#[derive(Clone, Debug)]
pub struct NewCommunity {
    pub name: String,
    pub description: String,
    pub kind: CommunityKind,
    pub basis_detail: String,
    pub requires_approval: bool,
}

/// Detail changes to apply; `None` leaves a field untouched.
#[derive(Clone, Debug, Default)]
pub struct CommunityChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<CommunityKind>,
    pub basis_detail: Option<String>,
    pub requires_approval: Option<bool>,
}

pub struct CommunityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommunityRepository<'a, C> {
    /// Creates a new instance of [`CommunityRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a community counting its leader as the only member
    pub async fn create(
        &self,
        community: NewCommunity,
        leader: &entity::civitas_user::Model,
    ) -> Result<entity::community::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let community = entity::community::ActiveModel {
            name: ActiveValue::Set(community.name),
            description: ActiveValue::Set(community.description),
            kind: ActiveValue::Set(community.kind),
            basis_detail: ActiveValue::Set(community.basis_detail),
            leader_id: ActiveValue::Set(leader.id),
            leader_name: ActiveValue::Set(leader.display_name.clone()),
            member_count: ActiveValue::Set(1),
            posts_count: ActiveValue::Set(0),
            requires_approval: ActiveValue::Set(community.requires_approval),
            alliance_id: ActiveValue::Set(None),
            alliance_name: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        community.insert(self.db).await
    }

    pub async fn get(&self, community_id: i32) -> Result<Option<entity::community::Model>, DbErr> {
        entity::prelude::Community::find_by_id(community_id)
            .one(self.db)
            .await
    }

    /// Lists communities newest first, optionally filtered by kind and leader
    pub async fn list(
        &self,
        kind: Option<CommunityKind>,
        leader_id: Option<i32>,
    ) -> Result<Vec<entity::community::Model>, DbErr> {
        let mut query = entity::prelude::Community::find();
        if let Some(kind) = kind {
            query = query.filter(entity::community::Column::Kind.eq(kind));
        }
        if let Some(leader_id) = leader_id {
            query = query.filter(entity::community::Column::LeaderId.eq(leader_id));
        }

        query
            .order_by_desc(entity::community::Column::CreatedAt)
            .order_by_desc(entity::community::Column::Id)
            .all(self.db)
            .await
    }

    /// Ids of the communities led by `user_id`
    pub async fn ids_led_by(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Community::find()
            .select_only()
            .column(entity::community::Column::Id)
            .filter(entity::community::Column::LeaderId.eq(user_id))
            .order_by_asc(entity::community::Column::Id)
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Communities where `user_id` holds an approved membership
    pub async fn joined_by(&self, user_id: i32) -> Result<Vec<entity::community::Model>, DbErr> {
        entity::prelude::Community::find()
            .join(
                JoinType::InnerJoin,
                entity::community::Relation::CommunityMember.def(),
            )
            .filter(entity::community_member::Column::UserId.eq(user_id))
            .filter(entity::community_member::Column::Status.eq(MembershipStatus::Approved))
            .order_by_asc(entity::community::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        community: entity::community::Model,
        changes: CommunityChanges,
    ) -> Result<entity::community::Model, DbErr> {
        let mut community_am = community.into_active_model();
        if let Some(name) = changes.name {
            community_am.name = ActiveValue::Set(name);
        }
        if let Some(description) = changes.description {
            community_am.description = ActiveValue::Set(description);
        }
        if let Some(kind) = changes.kind {
            community_am.kind = ActiveValue::Set(kind);
        }
        if let Some(basis_detail) = changes.basis_detail {
            community_am.basis_detail = ActiveValue::Set(basis_detail);
        }
        if let Some(requires_approval) = changes.requires_approval {
            community_am.requires_approval = ActiveValue::Set(requires_approval);
        }
        community_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        community_am.update(self.db).await
    }

    /// Adds `delta` to `member_count`, never taking it below zero
    ///
    /// Returns the number of rows changed; 0 means the community is missing or the
    /// decrement would have gone negative.
    pub async fn adjust_member_count(&self, community_id: i32, delta: i32) -> Result<u64, DbErr> {
        self.adjust_counter(community_id, entity::community::Column::MemberCount, delta)
            .await
    }

    /// Adds `delta` to `posts_count`, never taking it below zero
    pub async fn adjust_posts_count(&self, community_id: i32, delta: i32) -> Result<u64, DbErr> {
        self.adjust_counter(community_id, entity::community::Column::PostsCount, delta)
            .await
    }

    async fn adjust_counter(
        &self,
        community_id: i32,
        column: entity::community::Column,
        delta: i32,
    ) -> Result<u64, DbErr> {
        let mut update = entity::prelude::Community::update_many()
            .col_expr(column, Expr::col(column).add(delta))
            .filter(entity::community::Column::Id.eq(community_id));
        if delta < 0 {
            update = update.filter(column.gte(-delta));
        }

        Ok(update.exec(self.db).await?.rows_affected)
    }

    /// Recomputes both counters in place, touching only rows that drifted
    pub async fn recount(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::Community::update_many()
            .col_expr(entity::community::Column::MemberCount, Expr::cust(APPROVED_MEMBERS))
            .col_expr(entity::community::Column::PostsCount, Expr::cust(POSTS))
            .filter(
                Condition::any()
                    .add(Expr::cust(format!("member_count <> {}", APPROVED_MEMBERS)))
                    .add(Expr::cust(format!("posts_count <> {}", POSTS))),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Stamps the community with the alliance it belongs to, or clears the stamp with `None`
    pub async fn set_alliance(
        &self,
        community_id: i32,
        alliance: Option<(i32, String)>,
    ) -> Result<u64, DbErr> {
        let (alliance_id, alliance_name) = alliance.unzip();

        let result = entity::prelude::Community::update_many()
            .col_expr(entity::community::Column::AllianceId, Expr::value(alliance_id))
            .col_expr(
                entity::community::Column::AllianceName,
                Expr::value(alliance_name),
            )
            .filter(entity::community::Column::Id.eq(community_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Renames the alliance stamp on every member community
    pub async fn rename_alliance(&self, alliance_id: i32, name: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Community::update_many()
            .col_expr(
                entity::community::Column::AllianceName,
                Expr::value(name.to_string()),
            )
            .filter(entity::community::Column::AllianceId.eq(alliance_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Clears the alliance stamp from every community of the alliance
    pub async fn clear_alliance(&self, alliance_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Community::update_many()
            .col_expr(
                entity::community::Column::AllianceId,
                Expr::value(Option::<i32>::None),
            )
            .col_expr(
                entity::community::Column::AllianceName,
                Expr::value(Option::<String>::None),
            )
            .filter(entity::community::Column::AllianceId.eq(alliance_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a community
    ///
    /// Returns OK regardless of the community existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, community_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Community::delete_by_id(community_id)
            .exec(self.db)
            .await
    }
}
