use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use civitas::{
    model::post::CreatePostDto,
    server::{
        controller::community::post::{create_comment, create_post, like_post, unlike_post},
        model::session::user::SessionUserId,
    },
};
use entity::sea_orm_active_enums::MembershipStatus;
use sea_orm::EntityTrait;

use super::*;

fn content(text: &str) -> Json<CreatePostDto> {
    Json(CreatePostDto {
        content: text.to_string(),
    })
}

#[tokio::test]
/// Expect 201 created and an incremented post count for an approved member
async fn member_creates_post() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, false).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Approved)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = create_post(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
        content("Street party on Saturday"),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let community = test.community().get_community(community.id).await?.unwrap();
    assert_eq!(community.posts_count, 1);

    Ok(())
}

#[tokio::test]
/// Expect 403 forbidden for a user whose join request is still pending
async fn pending_member_cannot_post() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let community = test.community().insert_community(&ada, true).await?;
    test.community()
        .insert_member(community.id, &grace, MembershipStatus::Pending)
        .await?;
    SessionUserId::insert(&test.session, grace.id).await.unwrap();

    let result = create_post(
        State(test.app_state()),
        test.session.clone(),
        Path(community.id),
        content("Hello"),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let community = test.community().get_community(community.id).await?.unwrap();
    assert_eq!(community.posts_count, 0);

    Ok(())
}

#[tokio::test]
/// Expect 201 created and an incremented comment count on the post
async fn member_comments_on_post() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let community = test.community().insert_community(&ada, false).await?;
    let post = test
        .post()
        .insert_community_post(community.id, &ada, "Agenda for Monday")
        .await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = create_comment(
        State(test.app_state()),
        test.session.clone(),
        Path((community.id, post.id)),
        content("Added the budget item"),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post = entity::prelude::CommunityPost::find_by_id(post.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(post.comments_count, 1);

    Ok(())
}

#[tokio::test]
/// Expect repeated likes to count once and an unlike to remove it
async fn likes_are_idempotent() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let community = test.community().insert_community(&ada, false).await?;
    let post = test
        .post()
        .insert_community_post(community.id, &ada, "Agenda for Monday")
        .await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    for _ in 0..2 {
        let result = like_post(
            State(test.app_state()),
            test.session.clone(),
            Path((community.id, post.id)),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let liked = entity::prelude::CommunityPost::find_by_id(post.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(liked.likes_count, 1);

    let result = unlike_post(
        State(test.app_state()),
        test.session.clone(),
        Path((community.id, post.id)),
    )
    .await;

    assert!(result.is_ok());
    let unliked = entity::prelude::CommunityPost::find_by_id(post.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(unliked.likes_count, 0);

    Ok(())
}

#[tokio::test]
/// Expect 404 not found when liking a post of another community
async fn fails_for_post_of_other_community() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    let grace = test.user().insert_user("Grace").await?;
    let market = test.community().insert_community(&ada, false).await?;
    let harbour = test.community().insert_community(&grace, false).await?;
    test.community()
        .insert_member(harbour.id, &ada, MembershipStatus::Approved)
        .await?;
    let post = test
        .post()
        .insert_community_post(market.id, &ada, "Market news")
        .await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = like_post(
        State(test.app_state()),
        test.session.clone(),
        Path((harbour.id, post.id)),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
