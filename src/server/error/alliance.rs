use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AllianceError {
    #[error("Alliance {0} not found")]
    NotFound(i32),
    #[error("Only the creator of alliance {0} may do this")]
    NotCreator(i32),
    #[error("Only the leader of community {0} may act for it")]
    NotCommunityLeader(i32),
    #[error("Community {0} already belongs to an alliance")]
    CommunityAlreadyInAlliance(i32),
    #[error("Community {0} already has a pending alliance request")]
    PendingRequestExists(i32),
    #[error("Community {0} founded this alliance; disband the alliance instead")]
    FoundingCommunity(i32),
    #[error("Community {0} is not a member of this alliance")]
    NotAllianceMember(i32),
    #[error("Post {0} not found")]
    PostNotFound(i32),
}

impl IntoResponse for AllianceError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::NotFound(_) | Self::PostNotFound(_) => StatusCode::NOT_FOUND,
            Self::NotCreator(_) | Self::NotCommunityLeader(_) | Self::NotAllianceMember(_) => {
                StatusCode::FORBIDDEN
            }
            Self::CommunityAlreadyInAlliance(_)
            | Self::PendingRequestExists(_)
            | Self::FoundingCommunity(_) => StatusCode::CONFLICT,
        };

        error_response(status, self.to_string())
    }
}
