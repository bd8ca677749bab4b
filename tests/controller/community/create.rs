use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use civitas::{
    model::community::{CommunityKindDto, CreateCommunityDto},
    server::{controller::community::create_community, model::session::user::SessionUserId},
};
use entity::sea_orm_active_enums::{MemberRole, MembershipStatus};
use sea_orm::EntityTrait;

use super::*;

fn create_dto(name: &str) -> CreateCommunityDto {
    CreateCommunityDto {
        name: name.to_string(),
        description: "Neighbours around the old market square".to_string(),
        kind: CommunityKindDto::Location,
        basis_detail: "Market Square".to_string(),
        requires_approval: false,
    }
}

#[tokio::test]
/// Expect 201 created with the creator recorded as approved leader
async fn creates_community_led_by_user() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = create_community(
        State(test.app_state()),
        test.session.clone(),
        Json(create_dto("Market Square")),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let communities = entity::prelude::Community::find().all(&test.state.db).await?;
    assert_eq!(communities.len(), 1);
    assert_eq!(communities[0].member_count, 1);

    let leader = test
        .community()
        .get_member(communities[0].id, ada.id)
        .await?
        .unwrap();
    assert_eq!(leader.role, MemberRole::Leader);
    assert_eq!(leader.status, MembershipStatus::Approved);

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for a blank community name
async fn fails_for_blank_name() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = create_community(
        State(test.app_state()),
        test.session.clone(),
        Json(create_dto("   ")),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let communities = entity::prelude::Community::find().all(&test.state.db).await?;
    assert!(communities.is_empty());

    Ok(())
}

#[tokio::test]
/// Expect 401 unauthorized when nobody is logged in
async fn fails_without_session_user() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;

    let result = create_community(
        State(test.app_state()),
        test.session,
        Json(create_dto("Market Square")),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
