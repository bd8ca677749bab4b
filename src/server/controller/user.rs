use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        community::CommunityDto,
        user::{UpdateProfileDto, UserDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

/// Get the public profile of a user
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "ID of the user")),
    responses(
        (status = 200, description = "User profile", body = UserDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let Some(user) = UserService::new(&state.db).get_user(user_id).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: "User not found".to_string(),
            }),
        )
            .into_response());
    };

    Ok((StatusCode::OK, Json(user)).into_response())
}

/// Update the logged in user's profile
#[utoipa::path(
    patch,
    path = "/api/user/profile",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = UserDto),
        (status = 400, description = "Invalid profile field", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(update): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let profile = UserService::new(&state.db)
        .update_profile(user.id, update)
        .await?
        .ok_or(AuthError::UserNotInDatabase(user.id))?;

    Ok((StatusCode::OK, Json(profile)))
}

/// Communities the logged in user is an approved member of
#[utoipa::path(
    get,
    path = "/api/user/communities",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Joined communities", body = Vec<CommunityDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_joined_communities(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let communities = UserService::new(&state.db)
        .joined_communities(user.id)
        .await?;

    Ok((StatusCode::OK, Json(communities)))
}
