use chrono::Utc;
use entity::sea_orm_active_enums::{MemberRole, MembershipStatus};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

pub struct CommunityMemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommunityMemberRepository<'a, C> {
    /// Creates a new instance of [`CommunityMemberRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(
        &self,
        community_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::community_member::Model>, DbErr> {
        entity::prelude::CommunityMember::find_by_id((community_id, user_id))
            .one(self.db)
            .await
    }

    /// Inserts a membership row; `joined_at` is set when the status is approved
    pub async fn create(
        &self,
        community_id: i32,
        user: &entity::civitas_user::Model,
        role: MemberRole,
        status: MembershipStatus,
    ) -> Result<entity::community_member::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let member = entity::community_member::ActiveModel {
            community_id: ActiveValue::Set(community_id),
            user_id: ActiveValue::Set(user.id),
            user_display_name: ActiveValue::Set(user.display_name.clone()),
            role: ActiveValue::Set(role),
            status: ActiveValue::Set(status),
            requested_at: ActiveValue::Set(now),
            joined_at: ActiveValue::Set((status == MembershipStatus::Approved).then_some(now)),
        };

        entity::prelude::CommunityMember::insert(member)
            .exec_with_returning(self.db)
            .await
    }

    /// Moves a membership from `from` to `to`, only if it still has status `from`
    ///
    /// Returns the number of rows changed; 0 means another request changed the membership
    /// first. Moving to pending restarts `requested_at`; moving to approved sets `joined_at`,
    /// any other status clears it.
    pub async fn update_status(
        &self,
        community_id: i32,
        user_id: i32,
        from: MembershipStatus,
        to: MembershipStatus,
    ) -> Result<u64, DbErr> {
        let now = Utc::now().naive_utc();
        let mut changes = entity::community_member::ActiveModel {
            status: ActiveValue::Set(to),
            joined_at: ActiveValue::Set((to == MembershipStatus::Approved).then_some(now)),
            ..Default::default()
        };
        if to == MembershipStatus::Pending {
            changes.requested_at = ActiveValue::Set(now);
        }

        let result = entity::prelude::CommunityMember::update_many()
            .set(changes)
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .filter(entity::community_member::Column::UserId.eq(user_id))
            .filter(entity::community_member::Column::Status.eq(from))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a membership only if it still has status `from`
    pub async fn delete_with_status(
        &self,
        community_id: i32,
        user_id: i32,
        from: MembershipStatus,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::CommunityMember::delete_many()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .filter(entity::community_member::Column::UserId.eq(user_id))
            .filter(entity::community_member::Column::Status.eq(from))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Lists memberships with `status`, oldest request first
    pub async fn list(
        &self,
        community_id: i32,
        status: MembershipStatus,
    ) -> Result<Vec<entity::community_member::Model>, DbErr> {
        entity::prelude::CommunityMember::find()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .filter(entity::community_member::Column::Status.eq(status))
            .order_by_asc(entity::community_member::Column::RequestedAt)
            .order_by_asc(entity::community_member::Column::UserId)
            .all(self.db)
            .await
    }

    pub async fn delete_all_for_community(&self, community_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::CommunityMember::delete_many()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
