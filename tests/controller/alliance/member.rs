use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use civitas::{
    model::alliance::AllianceCommunityDto,
    server::{
        controller::alliance::member::{approve_member, join_alliance, leave_alliance},
        model::session::user::SessionUserId,
    },
};
use entity::sea_orm_active_enums::{AllianceVisibility, MembershipStatus};

use super::*;

#[tokio::test]
/// Expect a community to join a public alliance immediately
async fn joins_public_alliance() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let market = test.community().insert_community(&ada, false).await?;
    let harbour = test.community().insert_community(&grace, false).await?;
    let alliance = test
        .alliance()
        .insert_alliance(&market, AllianceVisibility::Public)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = join_alliance(
        State(test.app_state()),
        test.session.clone(),
        Path(alliance.id),
        Json(AllianceCommunityDto {
            community_id: harbour.id,
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let alliance = test.alliance().get_alliance(alliance.id).await?.unwrap();
    assert_eq!(alliance.member_community_count, 2);
    let harbour = test.community().get_community(harbour.id).await?.unwrap();
    assert_eq!(harbour.alliance_id, Some(alliance.id));

    Ok(())
}

#[tokio::test]
/// Expect a private alliance request to wait for the creator's approval
async fn private_alliance_requires_approval() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let market = test.community().insert_community(&ada, false).await?;
    let harbour = test.community().insert_community(&grace, false).await?;
    let alliance = test
        .alliance()
        .insert_alliance(&market, AllianceVisibility::Private)
        .await?;

    SessionUserId::insert(&test.session, grace.id).await.unwrap();
    let result = join_alliance(
        State(test.app_state()),
        test.session.clone(),
        Path(alliance.id),
        Json(AllianceCommunityDto {
            community_id: harbour.id,
        }),
    )
    .await;

    assert!(result.is_ok());
    let member = test
        .alliance()
        .get_alliance_member(alliance.id, harbour.id)
        .await?
        .unwrap();
    assert_eq!(member.status, MembershipStatus::Pending);
    let pending = test.community().get_community(harbour.id).await?.unwrap();
    assert_eq!(pending.alliance_id, None);

    SessionUserId::insert(&test.session, ada.id).await.unwrap();
    let result = approve_member(
        State(test.app_state()),
        test.session.clone(),
        Path((alliance.id, harbour.id)),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let alliance = test.alliance().get_alliance(alliance.id).await?.unwrap();
    assert_eq!(alliance.member_community_count, 2);

    Ok(())
}

#[tokio::test]
/// Expect 403 forbidden when joining on behalf of a community the user does not lead
async fn join_requires_community_leader() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let alan = test.user().insert_user("Alan").await?;
    let market = test.community().insert_community(&ada, false).await?;
    let harbour = test.community().insert_community(&grace, false).await?;
    test.community()
        .insert_member(harbour.id, &alan, MembershipStatus::Approved)
        .await?;
    let alliance = test
        .alliance()
        .insert_alliance(&market, AllianceVisibility::Public)
        .await?;
    SessionUserId::insert(&test.session, alan.id).await.unwrap();

    let result = join_alliance(
        State(test.app_state()),
        test.session.clone(),
        Path(alliance.id),
        Json(AllianceCommunityDto {
            community_id: harbour.id,
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(test
        .alliance()
        .get_alliance_member(alliance.id, harbour.id)
        .await?
        .is_none());

    Ok(())
}

#[tokio::test]
/// Expect 409 conflict when the founding community tries to leave
async fn creator_community_cannot_leave() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let market = test.community().insert_community(&ada, false).await?;
    let alliance = test
        .alliance()
        .insert_alliance(&market, AllianceVisibility::Public)
        .await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = leave_alliance(
        State(test.app_state()),
        test.session.clone(),
        Path(alliance.id),
        Json(AllianceCommunityDto {
            community_id: market.id,
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}
