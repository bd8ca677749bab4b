//! Community membership workflow.
//!
//! Each operation reads the membership, asks [`transition`] for the outcome, and applies it
//! in the same transaction: a status update conditioned on the status that was read, plus
//! an in-database adjustment of `member_count`.

use entity::sea_orm_active_enums::{MemberRole, MembershipStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::community::CommunityMemberDto,
    server::{
        data::community::{member::CommunityMemberRepository, CommunityRepository},
        error::{auth::AuthError, membership::MembershipError, Error},
        membership::{transition, MembershipAction, Transition},
        model::db::{CommunityMemberModel, UserModel},
        service::{
            community::{ensure_leader, find_community},
            retry::RetryContext,
        },
    },
};

pub struct CommunityMembershipService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommunityMembershipService<'a> {
    /// Creates a new instance of [`CommunityMembershipService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Requests to join a community
    ///
    /// # Returns
    /// - `Ok(MembershipStatus::Pending)` - Request waits for the leader
    /// - `Ok(MembershipStatus::Approved)` - Community does not require approval, or the user
    ///   is already a member
    /// - `Err(Error::MembershipError(MembershipError::Banned))` - User is banned
    pub async fn join(&self, user: &UserModel, community_id: i32) -> Result<MembershipStatus, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(
                &format!("join community ID {} by user ID {}", community_id, user.id),
                || {
                    let db = db.clone();
                    let user = user.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let community = find_community(&txn, community_id).await?;
                        let action = MembershipAction::Request {
                            requires_approval: community.requires_approval,
                        };

                        let member_repo = CommunityMemberRepository::new(&txn);
                        let status = match member_repo.get(community_id, user.id).await? {
                            Some(member) => apply_transition(&txn, &member, action).await?,
                            None => {
                                let Transition::Set {
                                    status,
                                    count_delta,
                                } = transition(None, action)?
                                else {
                                    return Err(Error::InternalError(
                                        "join request on a new membership must create it"
                                            .to_string(),
                                    ));
                                };

                                member_repo
                                    .create(community_id, &user, MemberRole::Member, status)
                                    .await?;
                                adjust_member_count(&txn, community_id, count_delta).await?;

                                Some(status)
                            }
                        };

                        txn.commit().await?;

                        status.ok_or_else(|| {
                            Error::InternalError("join request removed a membership".to_string())
                        })
                    })
                },
            )
            .await
    }

    /// Approves a pending request; only the leader may do this
    pub async fn approve(
        &self,
        leader: &UserModel,
        community_id: i32,
        user_id: i32,
    ) -> Result<CommunityMemberDto, Error> {
        self.moderate(leader, community_id, user_id, MembershipAction::Approve)
            .await?
            .ok_or_else(|| Error::InternalError("approval removed a membership".to_string()))
    }

    /// Rejects a pending request; only the leader may do this
    pub async fn reject(
        &self,
        leader: &UserModel,
        community_id: i32,
        user_id: i32,
    ) -> Result<CommunityMemberDto, Error> {
        self.moderate(leader, community_id, user_id, MembershipAction::Reject)
            .await?
            .ok_or_else(|| Error::InternalError("rejection removed a membership".to_string()))
    }

    /// Bans a member or applicant; only the leader may do this
    pub async fn ban(
        &self,
        leader: &UserModel,
        community_id: i32,
        user_id: i32,
    ) -> Result<CommunityMemberDto, Error> {
        self.moderate(leader, community_id, user_id, MembershipAction::Ban)
            .await?
            .ok_or_else(|| Error::InternalError("ban removed a membership".to_string()))
    }

    /// Removes an approved member; only the leader may do this
    pub async fn remove(
        &self,
        leader: &UserModel,
        community_id: i32,
        user_id: i32,
    ) -> Result<(), Error> {
        self.moderate(leader, community_id, user_id, MembershipAction::Remove)
            .await?;

        Ok(())
    }

    /// Withdraws a pending request or leaves the community
    ///
    /// The leader cannot leave their own community.
    pub async fn leave(&self, user: &UserModel, community_id: i32) -> Result<(), Error> {
        let db = self.db.clone();
        let user_id = user.id;

        RetryContext::new()
            .execute_with_retry(
                &format!("leave community ID {} by user ID {}", community_id, user_id),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let community = find_community(&txn, community_id).await?;
                        if community.leader_id == user_id {
                            return Err(MembershipError::LeaderProtected.into());
                        }

                        let member = CommunityMemberRepository::new(&txn)
                            .get(community_id, user_id)
                            .await?
                            .ok_or(MembershipError::NotFound)?;
                        apply_transition(&txn, &member, MembershipAction::Leave).await?;

                        txn.commit().await?;

                        Ok(())
                    })
                },
            )
            .await
    }

    /// Lists memberships with `status`, approved when not given
    ///
    /// Approved members are public; any other status is only visible to the leader.
    pub async fn list_members(
        &self,
        viewer_id: Option<i32>,
        community_id: i32,
        status: Option<MembershipStatus>,
    ) -> Result<Vec<CommunityMemberDto>, Error> {
        let db = self.db.clone();
        let status = status.unwrap_or(MembershipStatus::Approved);

        RetryContext::new()
            .execute_with_retry(&format!("list members of community ID {}", community_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let community = find_community(&db, community_id).await?;
                    if status != MembershipStatus::Approved {
                        let viewer_id = viewer_id.ok_or(AuthError::UserNotInSession)?;
                        ensure_leader(&community, viewer_id)?;
                    }

                    let members = CommunityMemberRepository::new(&db)
                        .list(community_id, status)
                        .await?;

                    Ok(members.into_iter().map(CommunityMemberDto::from).collect())
                })
            })
            .await
    }

    /// Applies a leader action to another user's membership and returns the result
    async fn moderate(
        &self,
        leader: &UserModel,
        community_id: i32,
        user_id: i32,
        action: MembershipAction,
    ) -> Result<Option<CommunityMemberDto>, Error> {
        let db = self.db.clone();
        let leader_id = leader.id;

        RetryContext::new()
            .execute_with_retry(
                &format!(
                    "{} user ID {} in community ID {}",
                    action.name(),
                    user_id,
                    community_id
                ),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let community = find_community(&txn, community_id).await?;
                        ensure_leader(&community, leader_id)?;
                        if user_id == community.leader_id {
                            return Err(MembershipError::LeaderProtected.into());
                        }

                        let member_repo = CommunityMemberRepository::new(&txn);
                        let member = member_repo
                            .get(community_id, user_id)
                            .await?
                            .ok_or(MembershipError::NotFound)?;
                        apply_transition(&txn, &member, action).await?;
                        let member = member_repo.get(community_id, user_id).await?;

                        txn.commit().await?;

                        tracing::debug!(
                            community_id,
                            user_id,
                            "Applied membership action {}",
                            action.name()
                        );

                        Ok(member.map(CommunityMemberDto::from))
                    })
                },
            )
            .await
    }
}

/// Applies `action` to an existing membership, returning its new status or `None` if deleted
async fn apply_transition<C: ConnectionTrait>(
    db: &C,
    member: &CommunityMemberModel,
    action: MembershipAction,
) -> Result<Option<MembershipStatus>, Error> {
    let member_repo = CommunityMemberRepository::new(db);

    match transition(Some(member.status), action)? {
        Transition::Unchanged(status) => Ok(Some(status)),
        Transition::Set {
            status,
            count_delta,
        } => {
            let changed = member_repo
                .update_status(member.community_id, member.user_id, member.status, status)
                .await?;
            if changed == 0 {
                return Err(MembershipError::Conflict.into());
            }
            adjust_member_count(db, member.community_id, count_delta).await?;

            Ok(Some(status))
        }
        Transition::Delete { count_delta } => {
            let deleted = member_repo
                .delete_with_status(member.community_id, member.user_id, member.status)
                .await?;
            if deleted == 0 {
                return Err(MembershipError::Conflict.into());
            }
            adjust_member_count(db, member.community_id, count_delta).await?;

            Ok(None)
        }
    }
}

async fn adjust_member_count<C: ConnectionTrait>(
    db: &C,
    community_id: i32,
    count_delta: i32,
) -> Result<(), Error> {
    if count_delta != 0 {
        let adjusted = CommunityRepository::new(db)
            .adjust_member_count(community_id, count_delta)
            .await?;
        if adjusted == 0 {
            tracing::warn!(
                community_id,
                count_delta,
                "Member count left unchanged at its floor"
            );
        }
    }

    Ok(())
}
