use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient infrastructure errors)
    Retry,
    /// Failed permanently (bad request, domain rule, bug)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => match db_err {
                // Connection acquisition errors - transient, should retry
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                // Connection errors - transient, should retry
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Query errors, type conversion, constraint violations and missing records
                // won't resolve with a retry
                _ => ErrorRetryStrategy::Fail,
            },

            // Session errors - transient, could be Redis connection issues
            Self::SessionError(_) => ErrorRetryStrategy::Retry,
            Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            // Identity provider requests - retry server errors and network failures
            Self::ReqwestError(reqwest_error) => match reqwest_error.status() {
                Some(status) if status.is_server_error() => ErrorRetryStrategy::Retry,
                Some(_) => ErrorRetryStrategy::Fail,
                None => ErrorRetryStrategy::Retry,
            },

            // Authorization codes are single use
            Self::TokenError(_) => ErrorRetryStrategy::Fail,

            Self::ConfigError(_)
            | Self::AuthError(_)
            | Self::ValidationError(_)
            | Self::MembershipError(_)
            | Self::CommunityError(_)
            | Self::AllianceError(_)
            | Self::ParseError(_)
            | Self::InternalError(_)
            | Self::SchedulerError(_)
            | Self::IoError(_) => ErrorRetryStrategy::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use crate::server::error::{
        community::CommunityError, membership::MembershipError, retry::ErrorRetryStrategy, Error,
    };

    /// Expect connection failures to be retried
    #[test]
    fn retries_connection_errors() {
        let err = Error::DbErr(DbErr::Conn(RuntimeErr::Internal("refused".to_string())));

        assert!(matches!(err.to_retry_strategy(), ErrorRetryStrategy::Retry));
    }

    /// Expect query errors to fail without retry
    #[test]
    fn fails_query_errors() {
        let err = Error::DbErr(DbErr::Custom("constraint".to_string()));

        assert!(matches!(err.to_retry_strategy(), ErrorRetryStrategy::Fail));
    }

    /// Expect domain errors to fail without retry
    #[test]
    fn fails_domain_errors() {
        let membership = Error::MembershipError(MembershipError::Conflict);
        let community = Error::CommunityError(CommunityError::NotLeader(1));

        assert!(matches!(
            membership.to_retry_strategy(),
            ErrorRetryStrategy::Fail
        ));
        assert!(matches!(
            community.to_retry_strategy(),
            ErrorRetryStrategy::Fail
        ));
    }
}
