use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use civitas::{
    model::community::{MemberListParams, MembershipStatusDto},
    server::{
        controller::community::member::{
            approve_member, ban_member, join_community, leave_community, list_members,
        },
        model::session::user::SessionUserId,
    },
};
use entity::sea_orm_active_enums::MembershipStatus;

use super::*;

#[tokio::test]
/// Expect a pending request for an approval-gated community, then approval by the leader
async fn join_then_approve_counts_member_once() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, true).await?;

    SessionUserId::insert(&test.session, grace.id).await.unwrap();
    let result = join_community(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let member = test.community().get_member(community.id, grace.id).await?.unwrap();
    assert_eq!(member.status, MembershipStatus::Pending);

    SessionUserId::insert(&test.session, ada.id).await.unwrap();
    let result = approve_member(
        State(test.app_state()),
        test.session.clone(),
        Path((community.id, grace.id)),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let community = test.community().get_community(community.id).await?.unwrap();
    assert_eq!(community.member_count, 2);

    Ok(())
}

#[tokio::test]
/// Expect 403 forbidden when a banned user tries to join again
async fn banned_user_cannot_rejoin() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Banned)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = join_community(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect 403 forbidden when a member who is not the leader tries to ban
async fn ban_requires_leader() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let alan = test.user().insert_user("Alan").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Approved)
        .await?;
    test.community()
        .insert_member(community.id, &alan, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = ban_member(
        State(test.app_state()),
        test.session.clone(),
        Path((community.id, alan.id)),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let member = test.community().get_member(community.id, alan.id).await?.unwrap();
    assert_eq!(member.status, MembershipStatus::Approved);

    Ok(())
}

#[tokio::test]
/// Expect 204 no content and a decremented count when a member leaves
async fn member_leaves_community() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = leave_community(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let community = test.community().get_community(community.id).await?.unwrap();
    assert_eq!(community.member_count, 1);

    Ok(())
}

#[tokio::test]
/// Expect 403 forbidden when the leader tries to leave their own community
async fn leader_cannot_leave() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let community = test.community().insert_community(&ada, false).await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = leave_community(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect approved members to be visible without logging in
async fn lists_approved_members_anonymously() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let community = test.community().insert_community(&ada, false).await?;

    let result = list_members(
        State(test.app_state()),
        test.session,
        Path(community.id),
        Query(MemberListParams::default()),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect pending requests to be hidden from members who are not the leader
async fn pending_list_requires_leader() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, true).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = list_members(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
        Query(MemberListParams {
            status: Some(MembershipStatusDto::Pending),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
