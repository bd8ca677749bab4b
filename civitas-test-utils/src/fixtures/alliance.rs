use chrono::Utc;
use entity::sea_orm_active_enums::{AllianceVisibility, MembershipStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn alliance<'a>(&'a self) -> AllianceFixtures<'a> {
        AllianceFixtures { setup: self }
    }
}

pub struct AllianceFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> AllianceFixtures<'a> {
    /// Inserts an alliance created by the leader of `community`, which becomes its first member.
    pub async fn insert_alliance(
        &self,
        community: &entity::community::Model,
        visibility: AllianceVisibility,
    ) -> Result<entity::alliance::Model, TestError> {
        let db = &self.setup.state.db;
        let now = Utc::now().naive_utc();
        let name = format!("{} Alliance", community.name);

        let alliance = entity::prelude::Alliance::insert(entity::alliance::ActiveModel {
            name: ActiveValue::Set(name.clone()),
            description: ActiveValue::Set("An alliance for testing".to_string()),
            creator_id: ActiveValue::Set(community.leader_id),
            creator_name: ActiveValue::Set(community.leader_name.clone()),
            founding_community_id: ActiveValue::Set(community.id),
            member_community_count: ActiveValue::Set(1),
            rules: ActiveValue::Set(None),
            visibility: ActiveValue::Set(visibility),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(db)
        .await?;

        entity::prelude::AllianceMember::insert(entity::alliance_member::ActiveModel {
            alliance_id: ActiveValue::Set(alliance.id),
            community_id: ActiveValue::Set(community.id),
            community_name: ActiveValue::Set(community.name.clone()),
            community_leader_id: ActiveValue::Set(community.leader_id),
            status: ActiveValue::Set(MembershipStatus::Approved),
            requested_at: ActiveValue::Set(now),
            joined_at: ActiveValue::Set(Some(now)),
        })
        .exec_without_returning(db)
        .await?;

        self.stamp_community(community.id, &alliance).await?;

        Ok(alliance)
    }

    /// Inserts an alliance membership; approved memberships stamp the community and bump
    /// `member_community_count`.
    pub async fn insert_alliance_member(
        &self,
        alliance: &entity::alliance::Model,
        community: &entity::community::Model,
        status: MembershipStatus,
    ) -> Result<entity::alliance_member::Model, TestError> {
        let db = &self.setup.state.db;
        let now = Utc::now().naive_utc();
        let approved = status == MembershipStatus::Approved;

        let member = entity::prelude::AllianceMember::insert(entity::alliance_member::ActiveModel {
            alliance_id: ActiveValue::Set(alliance.id),
            community_id: ActiveValue::Set(community.id),
            community_name: ActiveValue::Set(community.name.clone()),
            community_leader_id: ActiveValue::Set(community.leader_id),
            status: ActiveValue::Set(status),
            requested_at: ActiveValue::Set(now),
            joined_at: ActiveValue::Set(approved.then_some(now)),
        })
        .exec_with_returning(db)
        .await?;

        if approved {
            self.stamp_community(community.id, alliance).await?;

            if let Some(alliance) = entity::prelude::Alliance::find_by_id(alliance.id)
                .one(db)
                .await?
            {
                let count = alliance.member_community_count;
                let mut alliance = alliance.into_active_model();
                alliance.member_community_count = ActiveValue::Set(count + 1);
                alliance.update(db).await?;
            }
        }

        Ok(member)
    }

    pub async fn get_alliance(
        &self,
        alliance_id: i32,
    ) -> Result<Option<entity::alliance::Model>, TestError> {
        Ok(entity::prelude::Alliance::find_by_id(alliance_id)
            .one(&self.setup.state.db)
            .await?)
    }

    pub async fn get_alliance_member(
        &self,
        alliance_id: i32,
        community_id: i32,
    ) -> Result<Option<entity::alliance_member::Model>, TestError> {
        Ok(
            entity::prelude::AllianceMember::find_by_id((alliance_id, community_id))
                .one(&self.setup.state.db)
                .await?,
        )
    }

    async fn stamp_community(
        &self,
        community_id: i32,
        alliance: &entity::alliance::Model,
    ) -> Result<(), TestError> {
        let db = &self.setup.state.db;

        if let Some(community) = entity::prelude::Community::find_by_id(community_id)
            .one(db)
            .await?
        {
            let mut community = community.into_active_model();
            community.alliance_id = ActiveValue::Set(Some(alliance.id));
            community.alliance_name = ActiveValue::Set(Some(alliance.name.clone()));
            community.update(db).await?;
        }

        Ok(())
    }
}
