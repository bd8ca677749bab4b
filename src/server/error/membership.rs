use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::MembershipStatus;
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MembershipError {
    #[error("Membership not found")]
    NotFound,
    #[error("Banned members may not request to join")]
    Banned,
    #[error("Cannot {action} a membership with status {from:?}")]
    InvalidTransition {
        from: MembershipStatus,
        action: &'static str,
    },
    #[error("The leader's own membership cannot be changed this way")]
    LeaderProtected,
    #[error("Membership changed while the request was processed")]
    Conflict,
    #[error("Only approved members may do this")]
    NotApprovedMember,
}

impl IntoResponse for MembershipError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Banned | Self::LeaderProtected | Self::NotApprovedMember => StatusCode::FORBIDDEN,
            Self::InvalidTransition { .. } | Self::Conflict => StatusCode::CONFLICT,
        };

        error_response(status, self.to_string())
    }
}
