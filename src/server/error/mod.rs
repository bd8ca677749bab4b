//! Error types for the Civitas server application.
//!
//! Domain errors (authentication, communities, alliances, memberships, validation) carry
//! their own HTTP mappings. Library errors are logged and surfaced as 500 responses.

pub mod alliance;
pub mod auth;
pub mod community;
pub mod config;
pub mod membership;
pub mod retry;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        alliance::AllianceError, auth::AuthError, community::CommunityError, config::ConfigError,
        membership::MembershipError, validation::ValidationError,
    },
};

/// Main error type for the Civitas server application.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// type so handlers and services can use `?` throughout. The `IntoResponse` implementation
/// maps errors to HTTP responses for API consumers.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, CSRF, user validation).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Request body failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Membership state transition was refused.
    #[error(transparent)]
    MembershipError(#[from] MembershipError),
    /// Community lookup or permission error.
    #[error(transparent)]
    CommunityError(#[from] CommunityError),
    /// Alliance lookup or permission error.
    #[error(transparent)]
    AllianceError(#[from] AllianceError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Civitas's code.
    #[error("Internal error with Civitas's code, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Authorization code exchange with the identity provider failed.
    #[error(transparent)]
    TokenError(
        #[from]
        oauth2::basic::BasicRequestTokenError<oauth2::HttpClientError<reqwest::Error>>,
    ),
    /// HTTP request to the identity provider failed.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// Listener bind or serve failure.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// Domain errors map to 400, 401, 403, 404 or 409 with an [`ErrorDto`] body. Everything else
/// is logged and returned as a 500 Internal Server Error with a generic message.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::MembershipError(err) => err.into_response(),
            Self::CommunityError(err) => err.into_response(),
            Self::AllianceError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response with the given status and message.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the client
/// to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
