//! Community endpoints: details, membership moderation and posts.

pub mod member;
pub mod post;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        community::{CommunityDto, CommunityListParams, CreateCommunityDto, UpdateCommunityDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::community::CommunityService,
    },
};

pub static COMMUNITY_TAG: &str = "community";

/// List communities, newest first
#[utoipa::path(
    get,
    path = "/api/communities",
    tag = COMMUNITY_TAG,
    params(CommunityListParams),
    responses(
        (status = 200, description = "Communities matching the filters", body = Vec<CommunityDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_communities(
    State(state): State<AppState>,
    Query(params): Query<CommunityListParams>,
) -> Result<impl IntoResponse, Error> {
    let communities = CommunityService::new(&state.db)
        .list_communities(params)
        .await?;

    Ok((StatusCode::OK, Json(communities)))
}

/// Create a community led by the logged in user
#[utoipa::path(
    post,
    path = "/api/communities",
    tag = COMMUNITY_TAG,
    request_body = CreateCommunityDto,
    responses(
        (status = 201, description = "Community created", body = CommunityDto),
        (status = 400, description = "Invalid community field", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_community(
    State(state): State<AppState>,
    session: Session,
    Json(create): Json<CreateCommunityDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let community = CommunityService::new(&state.db)
        .create_community(&user, create)
        .await?;

    Ok((StatusCode::CREATED, Json(community)))
}

/// Get a community
#[utoipa::path(
    get,
    path = "/api/communities/{community_id}",
    tag = COMMUNITY_TAG,
    params(("community_id" = i32, Path, description = "ID of the community")),
    responses(
        (status = 200, description = "Community", body = CommunityDto),
        (status = 404, description = "Community not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_community(
    State(state): State<AppState>,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let community = CommunityService::new(&state.db)
        .get_community(community_id)
        .await?;

    Ok((StatusCode::OK, Json(community)))
}

/// Update community details; leader only
#[utoipa::path(
    patch,
    path = "/api/communities/{community_id}",
    tag = COMMUNITY_TAG,
    params(("community_id" = i32, Path, description = "ID of the community")),
    request_body = UpdateCommunityDto,
    responses(
        (status = 200, description = "Updated community", body = CommunityDto),
        (status = 400, description = "Invalid community field", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader", body = ErrorDto),
        (status = 404, description = "Community not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_community(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
    Json(update): Json<UpdateCommunityDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let community = CommunityService::new(&state.db)
        .update_community(&user, community_id, update)
        .await?;

    Ok((StatusCode::OK, Json(community)))
}

/// Delete a community with its posts and memberships; leader only
#[utoipa::path(
    delete,
    path = "/api/communities/{community_id}",
    tag = COMMUNITY_TAG,
    params(("community_id" = i32, Path, description = "ID of the community")),
    responses(
        (status = 204, description = "Community deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader", body = ErrorDto),
        (status = 404, description = "Community not found", body = ErrorDto),
        (status = 409, description = "Community founded an existing alliance", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_community(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    CommunityService::new(&state.db)
        .delete_community(&user, community_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
