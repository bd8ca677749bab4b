use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, db::UserModel, session::user::SessionUserId},
    service::user::UserService,
};

/// Retrieves the session user from the database
///
/// # Arguments
/// - `state`: Application state with database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(UserModel)`: User found
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: User ID not present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User ID exists in session but was
///   not found in database (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<UserModel, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserService::new(&state.db).get_user_model(user_id).await? else {
        session.clear().await;

        tracing::warn!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user)
}

#[cfg(test)]
mod tests {
    use civitas_test_utils::prelude::*;
    use sea_orm::DatabaseConnection;

    use crate::server::{
        config::ProviderConfig,
        controller::util::get_user::get_user_from_session,
        error::{auth::AuthError, Error},
        identity::IdentityProvider,
        model::{app::AppState, session::user::SessionUserId},
    };

    fn app_state(test: &TestSetup, db: DatabaseConnection) -> AppState {
        AppState {
            db,
            provider: IdentityProvider::new(&ProviderConfig {
                client_id: constant::TEST_CLIENT_ID.to_string(),
                client_secret: constant::TEST_CLIENT_SECRET.to_string(),
                auth_url: test.provider_url(constant::TEST_AUTH_PATH),
                token_url: test.provider_url(constant::TEST_TOKEN_PATH),
                userinfo_url: test.provider_url(constant::TEST_USERINFO_PATH),
                callback_url: constant::TEST_CALLBACK_URL.to_string(),
            })
            .unwrap(),
        }
    }

    /// Expect the session user to be returned
    #[tokio::test]
    async fn returns_session_user() -> Result<(), TestError> {
        let test = test_setup_with_civitas_tables!()?;
        let ada = test.user().insert_user("Ada").await?;
        SessionUserId::insert(&test.session, ada.id).await.unwrap();

        let state = app_state(&test, test.state.db.clone());
        let result = get_user_from_session(&state, &test.session).await;

        assert_eq!(result.unwrap().id, ada.id);

        Ok(())
    }

    /// Expect UserNotInSession for anonymous requests
    #[tokio::test]
    async fn fails_without_session_user() -> Result<(), TestError> {
        let test = test_setup_with_civitas_tables!()?;

        let state = app_state(&test, test.state.db.clone());
        let result = get_user_from_session(&state, &test.session).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::UserNotInSession))
        ));

        Ok(())
    }

    /// Expect a stale session to be cleared
    #[tokio::test]
    async fn clears_session_for_missing_user() -> Result<(), TestError> {
        let test = test_setup_with_civitas_tables!()?;
        SessionUserId::insert(&test.session, 42).await.unwrap();

        let state = app_state(&test, test.state.db.clone());
        let result = get_user_from_session(&state, &test.session).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::UserNotInDatabase(42)))
        ));
        assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

        Ok(())
    }
}
