use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommunityError {
    #[error("Community {0} not found")]
    NotFound(i32),
    #[error("Only the leader of community {0} may do this")]
    NotLeader(i32),
    #[error("Post {0} not found")]
    PostNotFound(i32),
    #[error("Community {0} founded its alliance; disband the alliance first")]
    FoundedAlliance(i32),
}

impl IntoResponse for CommunityError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::NotFound(_) | Self::PostNotFound(_) => StatusCode::NOT_FOUND,
            Self::NotLeader(_) => StatusCode::FORBIDDEN,
            Self::FoundedAlliance(_) => StatusCode::CONFLICT,
        };

        error_response(status, self.to_string())
    }
}
