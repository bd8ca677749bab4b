use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use civitas::server::{controller::community::delete_community, model::session::user::SessionUserId};
use entity::sea_orm_active_enums::{AllianceVisibility, MembershipStatus};

use super::*;

#[tokio::test]
/// Expect 204 no content and the community gone when the leader deletes it
async fn deletes_community_for_leader() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = delete_community(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test.community().get_community(community.id).await?.is_none());
    assert!(test.community().get_member(community.id, grace.id).await?.is_none());

    Ok(())
}

#[tokio::test]
/// Expect 403 forbidden when a member who is not the leader tries to delete
async fn fails_for_non_leader() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = delete_community(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(test.community().get_community(community.id).await?.is_some());

    Ok(())
}

#[tokio::test]
/// Expect 409 conflict while the community's leader still runs its alliance
async fn fails_while_community_founded_alliance() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.alliance()
        .insert_alliance(&community, AllianceVisibility::Public)
        .await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = delete_community(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
/// Expect 404 not found for a community that does not exist
async fn fails_for_missing_community() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = delete_community(State(test.app_state()), test.session.clone(), Path(7)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
