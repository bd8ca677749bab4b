use chrono::Utc;
use entity::sea_orm_active_enums::{CommunityKind, MemberRole, MembershipStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn community<'a>(&'a self) -> CommunityFixtures<'a> {
        CommunityFixtures { setup: self }
    }
}

pub struct CommunityFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> CommunityFixtures<'a> {
    /// Inserts a location community led by `leader`, with the leader's approved membership.
    pub async fn insert_community(
        &self,
        leader: &entity::civitas_user::Model,
        requires_approval: bool,
    ) -> Result<entity::community::Model, TestError> {
        let db = &self.setup.state.db;
        let now = Utc::now().naive_utc();

        let community = entity::prelude::Community::insert(entity::community::ActiveModel {
            name: ActiveValue::Set(format!("{}'s Neighbourhood", leader.display_name)),
            description: ActiveValue::Set("A community for testing".to_string()),
            kind: ActiveValue::Set(CommunityKind::Location),
            basis_detail: ActiveValue::Set("Springfield".to_string()),
            leader_id: ActiveValue::Set(leader.id),
            leader_name: ActiveValue::Set(leader.display_name.clone()),
            member_count: ActiveValue::Set(1),
            posts_count: ActiveValue::Set(0),
            requires_approval: ActiveValue::Set(requires_approval),
            alliance_id: ActiveValue::Set(None),
            alliance_name: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(db)
        .await?;

        entity::prelude::CommunityMember::insert(entity::community_member::ActiveModel {
            community_id: ActiveValue::Set(community.id),
            user_id: ActiveValue::Set(leader.id),
            user_display_name: ActiveValue::Set(leader.display_name.clone()),
            role: ActiveValue::Set(MemberRole::Leader),
            status: ActiveValue::Set(MembershipStatus::Approved),
            requested_at: ActiveValue::Set(now),
            joined_at: ActiveValue::Set(Some(now)),
        })
        .exec_without_returning(db)
        .await?;

        Ok(community)
    }

    /// Inserts a membership with `status`; approved memberships bump `member_count`.
    pub async fn insert_member(
        &self,
        community_id: i32,
        user: &entity::civitas_user::Model,
        status: MembershipStatus,
    ) -> Result<entity::community_member::Model, TestError> {
        let db = &self.setup.state.db;
        let now = Utc::now().naive_utc();
        let approved = status == MembershipStatus::Approved;

        let member =
            entity::prelude::CommunityMember::insert(entity::community_member::ActiveModel {
                community_id: ActiveValue::Set(community_id),
                user_id: ActiveValue::Set(user.id),
                user_display_name: ActiveValue::Set(user.display_name.clone()),
                role: ActiveValue::Set(MemberRole::Member),
                status: ActiveValue::Set(status),
                requested_at: ActiveValue::Set(now),
                joined_at: ActiveValue::Set(approved.then_some(now)),
            })
            .exec_with_returning(db)
            .await?;

        if approved {
            if let Some(community) = entity::prelude::Community::find_by_id(community_id)
                .one(db)
                .await?
            {
                let member_count = community.member_count;
                let mut community = community.into_active_model();
                community.member_count = ActiveValue::Set(member_count + 1);
                community.update(db).await?;
            }
        }

        Ok(member)
    }

    pub async fn get_community(
        &self,
        community_id: i32,
    ) -> Result<Option<entity::community::Model>, TestError> {
        Ok(entity::prelude::Community::find_by_id(community_id)
            .one(&self.setup.state.db)
            .await?)
    }

    pub async fn get_member(
        &self,
        community_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::community_member::Model>, TestError> {
        Ok(
            entity::prelude::CommunityMember::find_by_id((community_id, user_id))
                .one(&self.setup.state.db)
                .await?,
        )
    }
}
