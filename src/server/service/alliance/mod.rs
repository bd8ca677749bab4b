//! Alliance service layer.
//!
//! An alliance is founded by the leader of a community that does not yet belong to one. The
//! founding community joins as an approved member and is stamped with the alliance's id and
//! name in the same transaction.

pub mod membership;
pub mod post;

use entity::sea_orm_active_enums::MembershipStatus;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::alliance::{AllianceDto, CreateAllianceDto, UpdateAllianceDto},
    server::{
        data::{
            alliance::{
                comment::AllianceCommentRepository, like::AllianceLikeRepository,
                member::AllianceMemberRepository, post::AlliancePostRepository, AllianceChanges,
                AllianceRepository, NewAlliance,
            },
            community::CommunityRepository,
        },
        error::{alliance::AllianceError, Error},
        model::db::{AllianceModel, CommunityModel, UserModel},
        service::{community::find_community, retry::RetryContext},
        util::validate::{optional_text, required_text, MAX_DESCRIPTION_LEN, MAX_NAME_LEN},
    },
};

pub struct AllianceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AllianceService<'a> {
    /// Creates a new instance of [`AllianceService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Founds an alliance with `create.community_id` as its first member
    ///
    /// # Returns
    /// - `Ok(AllianceDto)` - Alliance created with `member_community_count` 1
    /// - `Err(Error::AllianceError(AllianceError::NotCommunityLeader))` - Creator does not lead
    ///   the founding community
    /// - `Err(Error::AllianceError(AllianceError::CommunityAlreadyInAlliance))` - Founding
    ///   community already belongs to an alliance
    /// - `Err(Error::AllianceError(AllianceError::PendingRequestExists))` - Founding community
    ///   is waiting on another alliance
    pub async fn create_alliance(
        &self,
        creator: &UserModel,
        create: CreateAllianceDto,
    ) -> Result<AllianceDto, Error> {
        let alliance = NewAlliance {
            name: required_text("name", &create.name, MAX_NAME_LEN)?,
            description: required_text("description", &create.description, MAX_DESCRIPTION_LEN)?,
            rules: create
                .rules
                .as_deref()
                .map(|rules| optional_text("rules", rules, MAX_DESCRIPTION_LEN))
                .transpose()?
                .flatten(),
            visibility: create.visibility.into(),
        };
        let community_id = create.community_id;

        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(
                &format!("create alliance for community ID {}", community_id),
                || {
                    let db = db.clone();
                    let creator = creator.clone();
                    let alliance = alliance.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let community = find_led_community(&txn, community_id, creator.id).await?;
                        ensure_free_community(&txn, &community).await?;

                        let alliance = AllianceRepository::new(&txn)
                            .create(alliance, &creator, community_id)
                            .await?;
                        AllianceMemberRepository::new(&txn)
                            .create(alliance.id, &community, MembershipStatus::Approved)
                            .await?;
                        CommunityRepository::new(&txn)
                            .set_alliance(community_id, Some((alliance.id, alliance.name.clone())))
                            .await?;

                        txn.commit().await?;

                        tracing::info!(
                            alliance_id = alliance.id,
                            community_id,
                            creator_id = creator.id,
                            "Created alliance"
                        );

                        Ok(AllianceDto::from(alliance))
                    })
                },
            )
            .await
    }

    pub async fn get_alliance(&self, alliance_id: i32) -> Result<AllianceDto, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("get alliance ID {}", alliance_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let alliance = find_alliance(&db, alliance_id).await?;

                    Ok(AllianceDto::from(alliance))
                })
            })
            .await
    }

    /// Lists alliances newest first
    pub async fn list_alliances(&self) -> Result<Vec<AllianceDto>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry("list alliances", || {
                let db = db.clone();

                Box::pin(async move {
                    let alliances = AllianceRepository::new(&db).list().await?;

                    Ok(alliances.into_iter().map(AllianceDto::from).collect())
                })
            })
            .await
    }

    /// Updates alliance details; only the creator may do this
    ///
    /// A name change is copied onto every member community in the same transaction.
    pub async fn update_alliance(
        &self,
        user: &UserModel,
        alliance_id: i32,
        update: UpdateAllianceDto,
    ) -> Result<AllianceDto, Error> {
        let changes = AllianceChanges {
            name: update
                .name
                .map(|name| required_text("name", &name, MAX_NAME_LEN))
                .transpose()?,
            description: update
                .description
                .map(|description| {
                    required_text("description", &description, MAX_DESCRIPTION_LEN)
                })
                .transpose()?,
            rules: update
                .rules
                .map(|rules| optional_text("rules", &rules, MAX_DESCRIPTION_LEN))
                .transpose()?,
            visibility: update.visibility.map(Into::into),
        };

        let db = self.db.clone();
        let user_id = user.id;

        RetryContext::new()
            .execute_with_retry(&format!("update alliance ID {}", alliance_id), || {
                let db = db.clone();
                let changes = changes.clone();

                Box::pin(async move {
                    let txn = db.begin().await?;

                    let alliance = find_alliance(&txn, alliance_id).await?;
                    ensure_creator(&alliance, user_id)?;

                    let renamed = changes
                        .name
                        .as_ref()
                        .is_some_and(|name| *name != alliance.name);
                    let alliance = AllianceRepository::new(&txn)
                        .update(alliance, changes)
                        .await?;
                    if renamed {
                        CommunityRepository::new(&txn)
                            .rename_alliance(alliance.id, &alliance.name)
                            .await?;
                    }

                    txn.commit().await?;

                    Ok(AllianceDto::from(alliance))
                })
            })
            .await
    }

    /// Deletes an alliance with its posts and memberships; only the creator may do this
    ///
    /// Every member community loses its alliance stamp.
    pub async fn disband_alliance(&self, user: &UserModel, alliance_id: i32) -> Result<(), Error> {
        let db = self.db.clone();
        let user_id = user.id;

        RetryContext::new()
            .execute_with_retry(&format!("disband alliance ID {}", alliance_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let txn = db.begin().await?;

                    let alliance = find_alliance(&txn, alliance_id).await?;
                    ensure_creator(&alliance, user_id)?;

                    let post_repo = AlliancePostRepository::new(&txn);
                    let post_ids = post_repo.ids_for_alliance(alliance_id).await?;
                    AllianceLikeRepository::new(&txn)
                        .delete_for_posts(post_ids)
                        .await?;
                    AllianceCommentRepository::new(&txn)
                        .delete_all_for_alliance(alliance_id)
                        .await?;
                    post_repo.delete_all_for_alliance(alliance_id).await?;

                    let released = CommunityRepository::new(&txn)
                        .clear_alliance(alliance_id)
                        .await?;
                    AllianceMemberRepository::new(&txn)
                        .delete_all_for_alliance(alliance_id)
                        .await?;
                    AllianceRepository::new(&txn).delete(alliance_id).await?;

                    txn.commit().await?;

                    tracing::info!(alliance_id, released, "Disbanded alliance");

                    Ok(())
                })
            })
            .await
    }
}

/// Fetches an alliance or fails with [`AllianceError::NotFound`]
pub(crate) async fn find_alliance<C: ConnectionTrait>(
    db: &C,
    alliance_id: i32,
) -> Result<AllianceModel, Error> {
    AllianceRepository::new(db)
        .get(alliance_id)
        .await?
        .ok_or_else(|| AllianceError::NotFound(alliance_id).into())
}

pub(crate) fn ensure_creator(alliance: &AllianceModel, user_id: i32) -> Result<(), Error> {
    if alliance.creator_id != user_id {
        return Err(AllianceError::NotCreator(alliance.id).into());
    }

    Ok(())
}

/// Fetches a community that `user_id` leads, acting on its behalf in an alliance
pub(crate) async fn find_led_community<C: ConnectionTrait>(
    db: &C,
    community_id: i32,
    user_id: i32,
) -> Result<CommunityModel, Error> {
    let community = find_community(db, community_id).await?;
    if community.leader_id != user_id {
        return Err(AllianceError::NotCommunityLeader(community_id).into());
    }

    Ok(community)
}

/// Fails if the community belongs to an alliance or is waiting on one
pub(crate) async fn ensure_free_community<C: ConnectionTrait>(
    db: &C,
    community: &CommunityModel,
) -> Result<(), Error> {
    if community.alliance_id.is_some() {
        return Err(AllianceError::CommunityAlreadyInAlliance(community.id).into());
    }
    if AllianceMemberRepository::new(db)
        .pending_for_community(community.id)
        .await?
        .is_some()
    {
        return Err(AllianceError::PendingRequestExists(community.id).into());
    }

    Ok(())
}
