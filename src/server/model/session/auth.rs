//! CSRF state storage for the provider login flow.
//!
//! The state token is generated when login starts, kept in the session, and removed again
//! when the provider redirects back so each token is accepted only once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::{auth::AuthError, Error};

/// Session key for the CSRF state token, namespaced under "civitas:auth:".
pub const SESSION_AUTH_CSRF_KEY: &str = "civitas:auth:csrf";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionAuthCsrf(pub String);

impl SessionAuthCsrf {
    /// Stores the CSRF state token, replacing any previous one.
    pub async fn insert(session: &Session, state: &str) -> Result<(), Error> {
        session
            .insert(SESSION_AUTH_CSRF_KEY, SessionAuthCsrf(state.to_string()))
            .await?;

        Ok(())
    }

    /// Removes and returns the CSRF state token.
    ///
    /// # Returns
    /// - `Ok(String)` - The stored token, which is no longer in the session
    /// - `Err(Error::AuthError(AuthError::CsrfMissingValue))` - No token in session
    /// - `Err(Error)` - Session store failure
    pub async fn remove(session: &Session) -> Result<String, Error> {
        match session
            .remove::<SessionAuthCsrf>(SESSION_AUTH_CSRF_KEY)
            .await?
        {
            Some(SessionAuthCsrf(state)) => Ok(state),
            None => Err(AuthError::CsrfMissingValue.into()),
        }
    }
}
