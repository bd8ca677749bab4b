//! Tests for user profile controller endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use civitas::{
    model::user::UpdateProfileDto,
    server::{
        controller::user::{get_joined_communities, get_user_profile, update_profile},
        model::session::user::SessionUserId,
    },
};
use entity::sea_orm_active_enums::MembershipStatus;
use sea_orm::EntityTrait;

use super::*;

#[tokio::test]
/// Expect 200 success with the public profile of an existing user
async fn returns_profile_for_existing_user() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;

    let result = get_user_profile(State(test.app_state()), Path(ada.id)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 404 not found for a user that does not exist
async fn returns_not_found_for_missing_user() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;

    let result = get_user_profile(State(test.app_state()), Path(1)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect 500 internal server error when required database tables dont exist
async fn error_when_required_tables_dont_exist() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = get_user_profile(State(test.app_state()), Path(1)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}

#[tokio::test]
/// Expect 200 success and the stored bio after a profile update
async fn updates_own_profile() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = update_profile(
        State(test.app_state()),
        test.session.clone(),
        Json(UpdateProfileDto {
            bio: Some("Gardener and bookkeeper".to_string()),
            ..Default::default()
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = entity::prelude::CivitasUser::find_by_id(ada.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(stored.bio.as_deref(), Some("Gardener and bookkeeper"));

    Ok(())
}

#[tokio::test]
/// Expect 200 success listing communities the user belongs to
async fn lists_joined_communities() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = get_joined_communities(State(test.app_state()), test.session).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}
