use chrono::Utc;
use entity::sea_orm_active_enums::MembershipStatus;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct AllianceMemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AllianceMemberRepository<'a, C> {
    /// Creates a new instance of [`AllianceMemberRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(
        &self,
        alliance_id: i32,
        community_id: i32,
    ) -> Result<Option<entity::alliance_member::Model>, DbErr> {
        entity::prelude::AllianceMember::find_by_id((alliance_id, community_id))
            .one(self.db)
            .await
    }

    /// Inserts a membership row for `community`; `joined_at` is set when approved
    pub async fn create(
        &self,
        alliance_id: i32,
        community: &entity::community::Model,
        status: MembershipStatus,
    ) -> Result<entity::alliance_member::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let member = entity::alliance_member::ActiveModel {
            alliance_id: ActiveValue::Set(alliance_id),
            community_id: ActiveValue::Set(community.id),
            community_name: ActiveValue::Set(community.name.clone()),
            community_leader_id: ActiveValue::Set(community.leader_id),
            status: ActiveValue::Set(status),
            requested_at: ActiveValue::Set(now),
            joined_at: ActiveValue::Set((status == MembershipStatus::Approved).then_some(now)),
        };

        entity::prelude::AllianceMember::insert(member)
            .exec_with_returning(self.db)
            .await
    }

    /// Moves a membership from `from` to `to`, only if it still has status `from`
    ///
    /// Returns the number of rows changed; 0 means another request changed it first.
    pub async fn update_status(
        &self,
        alliance_id: i32,
        community_id: i32,
        from: MembershipStatus,
        to: MembershipStatus,
    ) -> Result<u64, DbErr> {
        let now = Utc::now().naive_utc();
        let mut changes = entity::alliance_member::ActiveModel {
            status: ActiveValue::Set(to),
            joined_at: ActiveValue::Set((to == MembershipStatus::Approved).then_some(now)),
            ..Default::default()
        };
        if to == MembershipStatus::Pending {
            changes.requested_at = ActiveValue::Set(now);
        }

        let result = entity::prelude::AllianceMember::update_many()
            .set(changes)
            .filter(entity::alliance_member::Column::AllianceId.eq(alliance_id))
            .filter(entity::alliance_member::Column::CommunityId.eq(community_id))
            .filter(entity::alliance_member::Column::Status.eq(from))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a membership only if it still has status `from`
    pub async fn delete_with_status(
        &self,
        alliance_id: i32,
        community_id: i32,
        from: MembershipStatus,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::AllianceMember::delete_many()
            .filter(entity::alliance_member::Column::AllianceId.eq(alliance_id))
            .filter(entity::alliance_member::Column::CommunityId.eq(community_id))
            .filter(entity::alliance_member::Column::Status.eq(from))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Lists memberships, optionally filtered by status, oldest request first
    pub async fn list(
        &self,
        alliance_id: i32,
        status: Option<MembershipStatus>,
    ) -> Result<Vec<entity::alliance_member::Model>, DbErr> {
        let mut query = entity::prelude::AllianceMember::find()
            .filter(entity::alliance_member::Column::AllianceId.eq(alliance_id));
        if let Some(status) = status {
            query = query.filter(entity::alliance_member::Column::Status.eq(status));
        }

        query
            .order_by_asc(entity::alliance_member::Column::RequestedAt)
            .order_by_asc(entity::alliance_member::Column::CommunityId)
            .all(self.db)
            .await
    }

    /// Every alliance membership row of a community, across alliances
    pub async fn for_community(
        &self,
        community_id: i32,
    ) -> Result<Vec<entity::alliance_member::Model>, DbErr> {
        entity::prelude::AllianceMember::find()
            .filter(entity::alliance_member::Column::CommunityId.eq(community_id))
            .all(self.db)
            .await
    }

    /// The pending request of a community, if it has one anywhere
    pub async fn pending_for_community(
        &self,
        community_id: i32,
    ) -> Result<Option<entity::alliance_member::Model>, DbErr> {
        entity::prelude::AllianceMember::find()
            .filter(entity::alliance_member::Column::CommunityId.eq(community_id))
            .filter(entity::alliance_member::Column::Status.eq(MembershipStatus::Pending))
            .one(self.db)
            .await
    }

    /// Propagates a community rename to its alliance membership rows
    pub async fn rename_community(&self, community_id: i32, name: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::AllianceMember::update_many()
            .col_expr(
                entity::alliance_member::Column::CommunityName,
                Expr::value(name.to_string()),
            )
            .filter(entity::alliance_member::Column::CommunityId.eq(community_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_all_for_alliance(&self, alliance_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::AllianceMember::delete_many()
            .filter(entity::alliance_member::Column::AllianceId.eq(alliance_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_all_for_community(&self, community_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::AllianceMember::delete_many()
            .filter(entity::alliance_member::Column::CommunityId.eq(community_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
