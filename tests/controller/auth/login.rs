use axum::{extract::State, http::StatusCode, response::IntoResponse};
use civitas::server::{controller::auth::login, model::session::auth::SessionAuthCsrf};

use super::*;

#[tokio::test]
/// Expect 307 temporary redirect to the provider's authorize endpoint
async fn redirects_to_provider_login() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = login(State(test.app_state()), test.session.clone()).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = resp.headers().get("location").unwrap().to_str().unwrap();
    assert!(location.starts_with(&test.provider_url(constant::TEST_AUTH_PATH)));

    Ok(())
}

#[tokio::test]
/// Expect the CSRF state embedded in the login URL to be stored in the session
async fn stores_csrf_state_in_session() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = login(State(test.app_state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    let location = resp.headers().get("location").unwrap().to_str().unwrap();
    let state = SessionAuthCsrf::remove(&test.session).await.unwrap();
    assert!(location.contains(&format!("state={}", state)));

    Ok(())
}
