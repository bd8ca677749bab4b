use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        controller::util::{csrf::validate_csrf, get_user::get_user_from_session},
        error::{auth::AuthError, Error},
        model::{
            app::AppState,
            session::{auth::SessionAuthCsrf, user::SessionUserId},
        },
        service::{
            auth::{callback::CallbackService, login::login_service},
            user::UserService,
        },
    },
};

pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize, IntoParams)]
pub struct CallbackParams {
    pub state: String,
    pub code: String,
}

/// Login route to initiate login with the identity provider
///
/// Creates a URL to login with the identity provider and redirects the user to that URL to
/// begin the login process.
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to the identity provider's login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let login = login_service(&state.provider);

    SessionAuthCsrf::insert(&session, &login.state).await?;

    Ok(Redirect::temporary(&login.login_url))
}

/// Callback route user is redirected to after logging in at the identity provider
///
/// Validates the CSRF state, exchanges the authorization code and stores the mirrored user
/// in the session.
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 307, description = "Successful login, redirect to the user's profile"),
        (status = 400, description = "CSRF state mismatch", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    let callback_service = CallbackService::new(&state.db, &state.provider);

    validate_csrf(&session, &params.0.state).await?;

    let user = callback_service.handle_callback(&params.0.code).await?;

    SessionUserId::insert(&session, user.id).await?;

    Ok(Redirect::temporary(&format!("/profile/{}", user.id)))
}

/// Logs the user out by clearing their session
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Logged out, redirect to the home page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    let maybe_user_id = SessionUserId::get(&session).await?;

    // Clearing a session that was never stored fails in the store
    if maybe_user_id.is_some() {
        session.clear().await;
    }

    Ok(Redirect::temporary("/"))
}

/// Returns the profile of the logged in user
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Profile of the session user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let user = UserService::new(&state.db)
        .get_user(user.id)
        .await?
        .ok_or(AuthError::UserNotInDatabase(user.id))?;

    Ok((StatusCode::OK, Json(user)))
}
