//! Alliance endpoints: details, member communities and posts.

pub mod member;
pub mod post;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        alliance::{AllianceDto, CreateAllianceDto, UpdateAllianceDto},
        api::ErrorDto,
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::alliance::AllianceService,
    },
};

pub static ALLIANCE_TAG: &str = "alliance";

/// List alliances, newest first
#[utoipa::path(
    get,
    path = "/api/alliances",
    tag = ALLIANCE_TAG,
    responses(
        (status = 200, description = "All alliances", body = Vec<AllianceDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_alliances(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let alliances = AllianceService::new(&state.db).list_alliances().await?;

    Ok((StatusCode::OK, Json(alliances)))
}

/// Found an alliance with a community the logged in user leads
#[utoipa::path(
    post,
    path = "/api/alliances",
    tag = ALLIANCE_TAG,
    request_body = CreateAllianceDto,
    responses(
        (status = 201, description = "Alliance created", body = AllianceDto),
        (status = 400, description = "Invalid alliance field", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the leader of the founding community", body = ErrorDto),
        (status = 404, description = "Community not found", body = ErrorDto),
        (status = 409, description = "Community already in or waiting on an alliance", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_alliance(
    State(state): State<AppState>,
    session: Session,
    Json(create): Json<CreateAllianceDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let alliance = AllianceService::new(&state.db)
        .create_alliance(&user, create)
        .await?;

    Ok((StatusCode::CREATED, Json(alliance)))
}

/// Get an alliance
#[utoipa::path(
    get,
    path = "/api/alliances/{alliance_id}",
    tag = ALLIANCE_TAG,
    params(("alliance_id" = i32, Path, description = "ID of the alliance")),
    responses(
        (status = 200, description = "Alliance", body = AllianceDto),
        (status = 404, description = "Alliance not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_alliance(
    State(state): State<AppState>,
    Path(alliance_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let alliance = AllianceService::new(&state.db)
        .get_alliance(alliance_id)
        .await?;

    Ok((StatusCode::OK, Json(alliance)))
}

/// Update alliance details; creator only
#[utoipa::path(
    patch,
    path = "/api/alliances/{alliance_id}",
    tag = ALLIANCE_TAG,
    params(("alliance_id" = i32, Path, description = "ID of the alliance")),
    request_body = UpdateAllianceDto,
    responses(
        (status = 200, description = "Updated alliance", body = AllianceDto),
        (status = 400, description = "Invalid alliance field", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Alliance not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_alliance(
    State(state): State<AppState>,
    session: Session,
    Path(alliance_id): Path<i32>,
    Json(update): Json<UpdateAllianceDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let alliance = AllianceService::new(&state.db)
        .update_alliance(&user, alliance_id, update)
        .await?;

    Ok((StatusCode::OK, Json(alliance)))
}

/// Disband an alliance; creator only
#[utoipa::path(
    delete,
    path = "/api/alliances/{alliance_id}",
    tag = ALLIANCE_TAG,
    params(("alliance_id" = i32, Path, description = "ID of the alliance")),
    responses(
        (status = 204, description = "Alliance disbanded"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Alliance not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn disband_alliance(
    State(state): State<AppState>,
    session: Session,
    Path(alliance_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    AllianceService::new(&state.db)
        .disband_alliance(&user, alliance_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
