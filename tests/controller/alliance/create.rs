use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use civitas::{
    model::alliance::{AllianceVisibilityDto, CreateAllianceDto},
    server::{
        controller::alliance::{create_alliance, disband_alliance},
        model::session::user::SessionUserId,
    },
};
use entity::sea_orm_active_enums::{AllianceVisibility, MembershipStatus};
use sea_orm::EntityTrait;

use super::*;

fn create_dto(community_id: i32) -> CreateAllianceDto {
    CreateAllianceDto {
        name: "Riverside Alliance".to_string(),
        description: "Neighbourhoods along the river".to_string(),
        rules: Some("Be kind".to_string()),
        visibility: AllianceVisibilityDto::Public,
        community_id,
    }
}

#[tokio::test]
/// Expect 201 created and the founding community stamped with the alliance
async fn leader_creates_alliance() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let community = test.community().insert_community(&ada, false).await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = create_alliance(
        State(test.app_state()),
        test.session.clone(),
        Json(create_dto(community.id)),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let alliances = entity::prelude::Alliance::find().all(&test.state.db).await?;
    assert_eq!(alliances.len(), 1);
    assert_eq!(alliances[0].member_community_count, 1);

    let community = test.community().get_community(community.id).await?.unwrap();
    assert_eq!(community.alliance_id, Some(alliances[0].id));

    Ok(())
}

#[tokio::test]
/// Expect 403 forbidden when founding with a community the user does not lead
async fn fails_for_community_not_led() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = create_alliance(
        State(test.app_state()),
        test.session.clone(),
        Json(create_dto(community.id)),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect 409 conflict when the community already belongs to an alliance
async fn fails_for_community_in_alliance() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.alliance()
        .insert_alliance(&community, AllianceVisibility::Public)
        .await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = create_alliance(
        State(test.app_state()),
        test.session.clone(),
        Json(create_dto(community.id)),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
/// Expect 204 no content and every member community released on disband
async fn creator_disbands_alliance() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let market = test.community().insert_community(&ada, false).await?;
    let harbour = test.community().insert_community(&grace, false).await?;
    let alliance = test
        .alliance()
        .insert_alliance(&market, AllianceVisibility::Public)
        .await?;
    test.alliance()
        .insert_alliance_member(&alliance, &harbour, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = disband_alliance(
        State(test.app_state()),
        test.session.clone(),
        Path(alliance.id),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test.alliance().get_alliance(alliance.id).await?.is_none());

    let harbour = test.community().get_community(harbour.id).await?.unwrap();
    assert_eq!(harbour.alliance_id, None);

    Ok(())
}

#[tokio::test]
/// Expect 403 forbidden when a member community's leader tries to disband
async fn disband_requires_creator() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let market = test.community().insert_community(&ada, false).await?;
    let harbour = test.community().insert_community(&grace, false).await?;
    let alliance = test
        .alliance()
        .insert_alliance(&market, AllianceVisibility::Public)
        .await?;
    test.alliance()
        .insert_alliance_member(&alliance, &harbour, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = disband_alliance(
        State(test.app_state()),
        test.session.clone(),
        Path(alliance.id),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(test.alliance().get_alliance(alliance.id).await?.is_some());

    Ok(())
}
