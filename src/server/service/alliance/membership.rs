//! Alliance membership workflow, with communities as members.
//!
//! Follows the same transitions as community membership. An approved community carries the
//! alliance's id and name; the stamp is written or cleared in the transaction that changes
//! the membership.

use entity::sea_orm_active_enums::{AllianceVisibility, MembershipStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::alliance::AllianceMemberDto,
    server::{
        data::{
            alliance::{member::AllianceMemberRepository, AllianceRepository},
            community::CommunityRepository,
        },
        error::{alliance::AllianceError, auth::AuthError, membership::MembershipError, Error},
        membership::{transition, MembershipAction, Transition},
        model::db::{AllianceMemberModel, AllianceModel},
        service::{
            alliance::{ensure_creator, ensure_free_community, find_alliance, find_led_community},
            community::find_community,
            retry::RetryContext,
        },
    },
};

pub struct AllianceMembershipService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AllianceMembershipService<'a> {
    /// Creates a new instance of [`AllianceMembershipService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Requests membership for a community led by `user_id`
    ///
    /// Public alliances approve the request immediately.
    ///
    /// # Returns
    /// - `Ok(MembershipStatus)` - Status of the community's membership
    /// - `Err(Error::AllianceError(AllianceError::NotCommunityLeader))` - User does not lead the
    ///   community
    /// - `Err(Error::AllianceError(AllianceError::CommunityAlreadyInAlliance))` - Community
    ///   belongs to another alliance
    /// - `Err(Error::AllianceError(AllianceError::PendingRequestExists))` - Community is waiting
    ///   on another alliance
    pub async fn join(
        &self,
        user_id: i32,
        alliance_id: i32,
        community_id: i32,
    ) -> Result<MembershipStatus, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(
                &format!("join alliance ID {} by community ID {}", alliance_id, community_id),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let alliance = find_alliance(&txn, alliance_id).await?;
                        let community = find_led_community(&txn, community_id, user_id).await?;
                        let action = MembershipAction::Request {
                            requires_approval: alliance.visibility == AllianceVisibility::Private,
                        };

                        let member_repo = AllianceMemberRepository::new(&txn);
                        let member = member_repo.get(alliance_id, community_id).await?;
                        let outcome = transition(member.as_ref().map(|m| m.status), action)?;
                        if matches!(outcome, Transition::Set { .. }) {
                            ensure_free_community(&txn, &community).await?;
                        }

                        let status = match member {
                            Some(member) => apply_transition(&txn, &alliance, &member, action)
                                .await?
                                .ok_or_else(|| {
                                    Error::InternalError(
                                        "join request removed a membership".to_string(),
                                    )
                                })?,
                            None => {
                                let Transition::Set {
                                    status,
                                    count_delta,
                                } = outcome
                                else {
                                    return Err(Error::InternalError(
                                        "join request on a new membership must create it"
                                            .to_string(),
                                    ));
                                };

                                member_repo.create(alliance_id, &community, status).await?;
                                apply_side_effects(&txn, &alliance, community_id, status, count_delta)
                                    .await?;

                                status
                            }
                        };

                        txn.commit().await?;

                        Ok(status)
                    })
                },
            )
            .await
    }

    /// Approves a pending community; only the alliance creator may do this
    pub async fn approve(
        &self,
        user_id: i32,
        alliance_id: i32,
        community_id: i32,
    ) -> Result<AllianceMemberDto, Error> {
        self.moderate(user_id, alliance_id, community_id, MembershipAction::Approve)
            .await?
            .ok_or_else(|| Error::InternalError("approval removed a membership".to_string()))
    }

    /// Rejects a pending community; only the alliance creator may do this
    pub async fn reject(
        &self,
        user_id: i32,
        alliance_id: i32,
        community_id: i32,
    ) -> Result<AllianceMemberDto, Error> {
        self.moderate(user_id, alliance_id, community_id, MembershipAction::Reject)
            .await?
            .ok_or_else(|| Error::InternalError("rejection removed a membership".to_string()))
    }

    /// Removes an approved community; only the alliance creator may do this
    pub async fn remove(
        &self,
        user_id: i32,
        alliance_id: i32,
        community_id: i32,
    ) -> Result<(), Error> {
        self.moderate(user_id, alliance_id, community_id, MembershipAction::Remove)
            .await?;

        Ok(())
    }

    /// Withdraws a pending request or leaves the alliance on behalf of a led community
    ///
    /// The founding community cannot leave; the creator disbands instead.
    pub async fn leave(
        &self,
        user_id: i32,
        alliance_id: i32,
        community_id: i32,
    ) -> Result<(), Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(
                &format!("leave alliance ID {} by community ID {}", alliance_id, community_id),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let alliance = find_alliance(&txn, alliance_id).await?;
                        find_led_community(&txn, community_id, user_id).await?;
                        if alliance.founding_community_id == community_id {
                            return Err(AllianceError::FoundingCommunity(community_id).into());
                        }

                        let member = AllianceMemberRepository::new(&txn)
                            .get(alliance_id, community_id)
                            .await?
                            .ok_or(MembershipError::NotFound)?;
                        apply_transition(&txn, &alliance, &member, MembershipAction::Leave).await?;

                        txn.commit().await?;

                        tracing::debug!(alliance_id, community_id, "Community left alliance");

                        Ok(())
                    })
                },
            )
            .await
    }

    /// Lists member communities with `status`, approved when not given
    ///
    /// Approved members are public; any other status is only visible to the creator.
    pub async fn list_members(
        &self,
        viewer_id: Option<i32>,
        alliance_id: i32,
        status: Option<MembershipStatus>,
    ) -> Result<Vec<AllianceMemberDto>, Error> {
        let db = self.db.clone();
        let status = status.unwrap_or(MembershipStatus::Approved);

        RetryContext::new()
            .execute_with_retry(&format!("list members of alliance ID {}", alliance_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let alliance = find_alliance(&db, alliance_id).await?;
                    if status != MembershipStatus::Approved {
                        let viewer_id = viewer_id.ok_or(AuthError::UserNotInSession)?;
                        ensure_creator(&alliance, viewer_id)?;
                    }

                    let members = AllianceMemberRepository::new(&db)
                        .list(alliance_id, Some(status))
                        .await?;

                    Ok(members.into_iter().map(AllianceMemberDto::from).collect())
                })
            })
            .await
    }

    async fn moderate(
        &self,
        user_id: i32,
        alliance_id: i32,
        community_id: i32,
        action: MembershipAction,
    ) -> Result<Option<AllianceMemberDto>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(
                &format!(
                    "{} community ID {} in alliance ID {}",
                    action.name(),
                    community_id,
                    alliance_id
                ),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let alliance = find_alliance(&txn, alliance_id).await?;
                        ensure_creator(&alliance, user_id)?;

                        let community = find_community(&txn, community_id).await?;
                        if alliance.founding_community_id == community_id {
                            return Err(AllianceError::FoundingCommunity(community_id).into());
                        }
                        if action == MembershipAction::Approve
                            && community
                                .alliance_id
                                .is_some_and(|other| other != alliance_id)
                        {
                            return Err(
                                AllianceError::CommunityAlreadyInAlliance(community_id).into()
                            );
                        }

                        let member_repo = AllianceMemberRepository::new(&txn);
                        let member = member_repo
                            .get(alliance_id, community_id)
                            .await?
                            .ok_or(MembershipError::NotFound)?;
                        apply_transition(&txn, &alliance, &member, action).await?;
                        let member = member_repo.get(alliance_id, community_id).await?;

                        txn.commit().await?;

                        tracing::debug!(
                            alliance_id,
                            community_id,
                            "Applied alliance membership action {}",
                            action.name()
                        );

                        Ok(member.map(AllianceMemberDto::from))
                    })
                },
            )
            .await
    }
}

/// Applies `action` to an existing membership, returning its new status or `None` if deleted
async fn apply_transition<C: ConnectionTrait>(
    db: &C,
    alliance: &AllianceModel,
    member: &AllianceMemberModel,
    action: MembershipAction,
) -> Result<Option<MembershipStatus>, Error> {
    let member_repo = AllianceMemberRepository::new(db);

    match transition(Some(member.status), action)? {
        Transition::Unchanged(status) => Ok(Some(status)),
        Transition::Set {
            status,
            count_delta,
        } => {
            let changed = member_repo
                .update_status(member.alliance_id, member.community_id, member.status, status)
                .await?;
            if changed == 0 {
                return Err(MembershipError::Conflict.into());
            }
            apply_side_effects(db, alliance, member.community_id, status, count_delta).await?;

            Ok(Some(status))
        }
        Transition::Delete { count_delta } => {
            let deleted = member_repo
                .delete_with_status(member.alliance_id, member.community_id, member.status)
                .await?;
            if deleted == 0 {
                return Err(MembershipError::Conflict.into());
            }
            apply_side_effects(
                db,
                alliance,
                member.community_id,
                MembershipStatus::Rejected,
                count_delta,
            )
            .await?;

            Ok(None)
        }
    }
}

/// Adjusts the alliance count and the community stamp after a membership change
///
/// Gaining a counted membership stamps the community; losing one clears the stamp.
async fn apply_side_effects<C: ConnectionTrait>(
    db: &C,
    alliance: &AllianceModel,
    community_id: i32,
    status: MembershipStatus,
    count_delta: i32,
) -> Result<(), Error> {
    if count_delta == 0 {
        return Ok(());
    }

    let adjusted = AllianceRepository::new(db)
        .adjust_member_count(alliance.id, count_delta)
        .await?;
    if adjusted == 0 {
        tracing::warn!(
            alliance_id = alliance.id,
            count_delta,
            "Member community count left unchanged at its floor"
        );
    }

    let stamp = (count_delta > 0 && status == MembershipStatus::Approved)
        .then(|| (alliance.id, alliance.name.clone()));
    CommunityRepository::new(db)
        .set_alliance(community_id, stamp)
        .await?;

    Ok(())
}
