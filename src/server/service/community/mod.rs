//! Community service layer.
//!
//! Every write runs in one transaction: creating a community also creates the leader's
//! membership, a rename is copied onto the community's alliance membership rows, and a
//! delete removes everything that references the community.

pub mod membership;
pub mod post;

use entity::sea_orm_active_enums::{MemberRole, MembershipStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::community::{
        CommunityDto, CommunityListParams, CreateCommunityDto, UpdateCommunityDto,
    },
    server::{
        data::{
            alliance::{member::AllianceMemberRepository, AllianceRepository},
            community::{
                comment::CommunityCommentRepository, like::CommunityLikeRepository,
                member::CommunityMemberRepository, post::CommunityPostRepository,
                CommunityChanges, CommunityRepository, NewCommunity,
            },
        },
        error::{community::CommunityError, Error},
        model::db::{CommunityModel, UserModel},
        service::retry::RetryContext,
        util::validate::{required_text, MAX_DESCRIPTION_LEN, MAX_NAME_LEN},
    },
};

pub struct CommunityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommunityService<'a> {
    /// Creates a new instance of [`CommunityService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a community led by `leader` together with the leader's membership
    ///
    /// # Returns
    /// - `Ok(CommunityDto)` - Community created with `member_count` 1
    /// - `Err(Error::ValidationError)` - A field was empty or too long
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn create_community(
        &self,
        leader: &UserModel,
        create: CreateCommunityDto,
    ) -> Result<CommunityDto, Error> {
        let community = NewCommunity {
            name: required_text("name", &create.name, MAX_NAME_LEN)?,
            description: required_text("description", &create.description, MAX_DESCRIPTION_LEN)?,
            kind: create.kind.into(),
            basis_detail: required_text("basis_detail", &create.basis_detail, MAX_NAME_LEN)?,
            requires_approval: create.requires_approval,
        };

        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("create community for user ID {}", leader.id), || {
                let db = db.clone();
                let leader = leader.clone();
                let community = community.clone();

                Box::pin(async move {
                    let txn = db.begin().await?;

                    let community = CommunityRepository::new(&txn)
                        .create(community, &leader)
                        .await?;
                    CommunityMemberRepository::new(&txn)
                        .create(
                            community.id,
                            &leader,
                            MemberRole::Leader,
                            MembershipStatus::Approved,
                        )
                        .await?;

                    txn.commit().await?;

                    tracing::info!(
                        community_id = community.id,
                        leader_id = leader.id,
                        "Created community"
                    );

                    Ok(CommunityDto::from(community))
                })
            })
            .await
    }

    pub async fn get_community(&self, community_id: i32) -> Result<CommunityDto, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("get community ID {}", community_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let community = find_community(&db, community_id).await?;

                    Ok(CommunityDto::from(community))
                })
            })
            .await
    }

    /// Lists communities newest first, filtered by kind and leader when given
    pub async fn list_communities(
        &self,
        params: CommunityListParams,
    ) -> Result<Vec<CommunityDto>, Error> {
        let db = self.db.clone();
        let kind = params.kind.map(Into::into);
        let leader_id = params.leader_id;

        RetryContext::new()
            .execute_with_retry("list communities", || {
                let db = db.clone();

                Box::pin(async move {
                    let communities = CommunityRepository::new(&db)
                        .list(kind, leader_id)
                        .await?;

                    Ok(communities.into_iter().map(CommunityDto::from).collect())
                })
            })
            .await
    }

    /// Updates community details; only the leader may do this
    ///
    /// A name change is copied onto the community's alliance membership rows in the same
    /// transaction.
    pub async fn update_community(
        &self,
        user: &UserModel,
        community_id: i32,
        update: UpdateCommunityDto,
    ) -> Result<CommunityDto, Error> {
        let changes = CommunityChanges {
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
            kind: update.kind.map(Into::into),
            basis_detail: update
                .basis_detail
                .map(|detail| required_text("basis_detail", &detail, MAX_NAME_LEN))
                .transpose()?,
            requires_approval: update.requires_approval,
        };

        let db = self.db.clone();
        let user_id = user.id;

        RetryContext::new()
            .execute_with_retry(&format!("update community ID {}", community_id), || {
                let db = db.clone();
                let changes = changes.clone();

                Box::pin(async move {
                    let txn = db.begin().await?;

                    let community = find_community(&txn, community_id).await?;
                    ensure_leader(&community, user_id)?;

                    let renamed = changes
                        .name
                        .as_ref()
                        .is_some_and(|name| *name != community.name);
                    let community = CommunityRepository::new(&txn)
                        .update(community, changes)
                        .await?;
                    if renamed {
                        AllianceMemberRepository::new(&txn)
                            .rename_community(community.id, &community.name)
                            .await?;
                    }

                    txn.commit().await?;

                    Ok(CommunityDto::from(community))
                })
            })
            .await
    }

    /// Deletes a community and everything that references it; only the leader may do this
    ///
    /// A community whose leader created its alliance cannot be deleted while that alliance
    /// exists. Approved alliance memberships decrement their alliance's member count.
    pub async fn delete_community(&self, user: &UserModel, community_id: i32) -> Result<(), Error> {
        let db = self.db.clone();
        let user_id = user.id;

        RetryContext::new()
            .execute_with_retry(&format!("delete community ID {}", community_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let txn = db.begin().await?;

                    let community = find_community(&txn, community_id).await?;
                    ensure_leader(&community, user_id)?;

                    let alliance_repo = AllianceRepository::new(&txn);
                    if let Some(alliance_id) = community.alliance_id {
                        if let Some(alliance) = alliance_repo.get(alliance_id).await? {
                            if alliance.founding_community_id == community.id {
                                return Err(CommunityError::FoundedAlliance(community_id).into());
                            }
                        }
                    }

                    let alliance_member_repo = AllianceMemberRepository::new(&txn);
                    for membership in alliance_member_repo.for_community(community_id).await? {
                        if membership.status == MembershipStatus::Approved {
                            let adjusted = alliance_repo
                                .adjust_member_count(membership.alliance_id, -1)
                                .await?;
                            if adjusted == 0 {
                                tracing::warn!(
                                    alliance_id = membership.alliance_id,
                                    community_id,
                                    "Member community count left unchanged at its floor"
                                );
                            }
                        }
                    }
                    alliance_member_repo
                        .delete_all_for_community(community_id)
                        .await?;

                    let post_repo = CommunityPostRepository::new(&txn);
                    let post_ids = post_repo.ids_for_community(community_id).await?;
                    CommunityLikeRepository::new(&txn)
                        .delete_for_posts(post_ids)
                        .await?;
                    CommunityCommentRepository::new(&txn)
                        .delete_all_for_community(community_id)
                        .await?;
                    post_repo.delete_all_for_community(community_id).await?;
                    CommunityMemberRepository::new(&txn)
                        .delete_all_for_community(community_id)
                        .await?;
                    CommunityRepository::new(&txn).delete(community_id).await?;

                    txn.commit().await?;

                    tracing::info!(community_id, "Deleted community");

                    Ok(())
                })
            })
            .await
    }
}

/// Fetches a community or fails with [`CommunityError::NotFound`]
pub(crate) async fn find_community<C: ConnectionTrait>(
    db: &C,
    community_id: i32,
) -> Result<CommunityModel, Error> {
    CommunityRepository::new(db)
        .get(community_id)
        .await?
        .ok_or_else(|| CommunityError::NotFound(community_id).into())
}

pub(crate) fn ensure_leader(community: &CommunityModel, user_id: i32) -> Result<(), Error> {
    if community.leader_id != user_id {
        return Err(CommunityError::NotLeader(community.id).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    mod create_community {
        use civitas_test_utils::prelude::*;
        use entity::sea_orm_active_enums::{MemberRole, MembershipStatus};

        use crate::{
            model::community::{CommunityKindDto, CreateCommunityDto},
            server::service::{community::CommunityService, user::UserService},
        };

        /// Expect the community, the leader membership and the leader's led ids together
        #[tokio::test]
        async fn creates_community_with_leader_membership() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;

            let community_service = CommunityService::new(&test.state.db);
            let result = community_service
                .create_community(
                    &ada,
                    CreateCommunityDto {
                        name: "Riverside".to_string(),
                        description: "Neighbours by the river".to_string(),
                        kind: CommunityKindDto::Location,
                        basis_detail: "Riverside".to_string(),
                        requires_approval: true,
                    },
                )
                .await;

            assert!(result.is_ok());
            let community = result.unwrap();
            assert_eq!(community.member_count, 1);

            let member = test
                .community()
                .get_member(community.id, ada.id)
                .await?
                .unwrap();
            assert_eq!(member.role, MemberRole::Leader);
            assert_eq!(member.status, MembershipStatus::Approved);
            assert!(member.joined_at.is_some());

            let profile = UserService::new(&test.state.db)
                .get_user(ada.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(profile.led_community_ids, vec![community.id]);

            Ok(())
        }

        /// Expect a blank name to be rejected without creating anything
        #[tokio::test]
        async fn rejects_blank_name() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;

            let community_service = CommunityService::new(&test.state.db);
            let result = community_service
                .create_community(
                    &ada,
                    CreateCommunityDto {
                        name: " ".to_string(),
                        description: "Neighbours by the river".to_string(),
                        kind: CommunityKindDto::Location,
                        basis_detail: "Riverside".to_string(),
                        requires_approval: false,
                    },
                )
                .await;

            assert!(result.is_err());
            let communities = community_service
                .list_communities(Default::default())
                .await
                .unwrap();
            assert!(communities.is_empty());

            Ok(())
        }
    }

    mod update_community {
        use civitas_test_utils::prelude::*;
        use entity::sea_orm_active_enums::AllianceVisibility;

        use crate::{
            model::community::UpdateCommunityDto,
            server::{
                error::{community::CommunityError, Error},
                service::community::CommunityService,
            },
        };

        /// Expect a rename to reach the alliance membership row
        #[tokio::test]
        async fn propagates_rename_to_alliance_membership() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let community = test.community().insert_community(&ada, false).await?;
            let alliance = test
                .alliance()
                .insert_alliance(&community, AllianceVisibility::Public)
                .await?;

            let community_service = CommunityService::new(&test.state.db);
            let result = community_service
                .update_community(
                    &ada,
                    community.id,
                    UpdateCommunityDto {
                        name: Some("Upper Riverside".to_string()),
                        ..Default::default()
                    },
                )
                .await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap().name, "Upper Riverside");
            let membership = test
                .alliance()
                .get_alliance_member(alliance.id, community.id)
                .await?
                .unwrap();
            assert_eq!(membership.community_name, "Upper Riverside");

            Ok(())
        }

        /// Expect NotLeader when another user edits the community
        #[tokio::test]
        async fn fails_for_non_leader() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let grace = test.user().insert_user("Grace").await?;
            let community = test.community().insert_community(&ada, false).await?;

            let community_service = CommunityService::new(&test.state.db);
            let result = community_service
                .update_community(
                    &grace,
                    community.id,
                    UpdateCommunityDto {
                        requires_approval: Some(true),
                        ..Default::default()
                    },
                )
                .await;

            assert!(matches!(
                result,
                Err(Error::CommunityError(CommunityError::NotLeader(_)))
            ));

            Ok(())
        }
    }

    mod delete_community {
        use civitas_test_utils::prelude::*;
        use entity::sea_orm_active_enums::{AllianceVisibility, MembershipStatus};

        use crate::server::{
            error::{community::CommunityError, Error},
            service::community::CommunityService,
        };

        /// Expect the community and its posts, comments and memberships to be removed
        #[tokio::test]
        async fn deletes_community_with_content() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let grace = test.user().insert_user("Grace").await?;
            let community = test.community().insert_community(&ada, false).await?;
            test.community()
                .insert_member(community.id, &grace, MembershipStatus::Approved)
                .await?;
            let post = test
                .post()
                .insert_community_post(community.id, &grace, "Hello")
                .await?;
            test.post()
                .insert_community_comment(&post, &ada, "Welcome")
                .await?;

            let community_service = CommunityService::new(&test.state.db);
            let result = community_service.delete_community(&ada, community.id).await;

            assert!(result.is_ok());
            assert!(test.community().get_community(community.id).await?.is_none());
            assert!(test
                .community()
                .get_member(community.id, grace.id)
                .await?
                .is_none());

            Ok(())
        }

        /// Expect an approved alliance membership to leave and decrement the alliance
        #[tokio::test]
        async fn leaves_alliance_on_delete() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let grace = test.user().insert_user("Grace").await?;
            let founder = test.community().insert_community(&ada, false).await?;
            let member = test.community().insert_community(&grace, false).await?;
            let alliance = test
                .alliance()
                .insert_alliance(&founder, AllianceVisibility::Public)
                .await?;
            test.alliance()
                .insert_alliance_member(&alliance, &member, MembershipStatus::Approved)
                .await?;

            let community_service = CommunityService::new(&test.state.db);
            let result = community_service.delete_community(&grace, member.id).await;

            assert!(result.is_ok());
            let alliance = test.alliance().get_alliance(alliance.id).await?.unwrap();
            assert_eq!(alliance.member_community_count, 1);
            assert!(test
                .alliance()
                .get_alliance_member(alliance.id, member.id)
                .await?
                .is_none());

            Ok(())
        }

        /// Expect the founding community to be protected while the alliance exists
        #[tokio::test]
        async fn fails_for_founding_community() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let community = test.community().insert_community(&ada, false).await?;
            test.alliance()
                .insert_alliance(&community, AllianceVisibility::Public)
                .await?;

            let community_service = CommunityService::new(&test.state.db);
            let result = community_service.delete_community(&ada, community.id).await;

            assert!(matches!(
                result,
                Err(Error::CommunityError(CommunityError::FoundedAlliance(_)))
            ));
            assert!(test.community().get_community(community.id).await?.is_some());

            Ok(())
        }

        /// Expect another community led by the alliance creator to be deletable
        #[tokio::test]
        async fn deletes_second_community_of_creator() -> Result<(), TestError> {
            let test = test_setup_with_civitas_tables!()?;
            let ada = test.user().insert_user("Ada").await?;
            let founding = test.community().insert_community(&ada, false).await?;
            let second = test.community().insert_community(&ada, false).await?;
            let alliance = test
                .alliance()
                .insert_alliance(&founding, AllianceVisibility::Public)
                .await?;
            test.alliance()
                .insert_alliance_member(&alliance, &second, MembershipStatus::Approved)
                .await?;

            let community_service = CommunityService::new(&test.state.db);
            let result = community_service.delete_community(&ada, second.id).await;

            assert!(result.is_ok());
            assert!(test.community().get_community(second.id).await?.is_none());
            let alliance = test.alliance().get_alliance(alliance.id).await?.unwrap();
            assert_eq!(alliance.member_community_count, 1);

            Ok(())
        }
    }
}
