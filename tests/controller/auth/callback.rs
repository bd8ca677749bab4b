use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use civitas::server::{
    controller::auth::{callback, CallbackParams},
    model::session::{auth::SessionAuthCsrf, user::SessionUserId},
};

use super::*;

async fn setup() -> Result<(TestSetup, CallbackParams), TestError> {
    let test = test_setup_with_civitas_tables!()?;

    let params = CallbackParams {
        state: "state".to_string(),
        code: "code".to_string(),
    };

    // Insert CSRF state into session for CSRF validation in callback
    SessionAuthCsrf::insert(&test.session, &params.state)
        .await
        .unwrap();

    Ok((test, params))
}

#[tokio::test]
/// Expect 307 redirect to the new user's profile and the user ID stored in session
async fn redirects_to_profile_after_login() -> Result<(), TestError> {
    let (mut test, params) = setup().await?;
    let mocks = test
        .auth()
        .create_provider_endpoints("provider|ada", "ada@example.com", "Ada");
    test.mocks.extend(mocks);

    let result = callback(
        State(test.app_state()),
        test.session.clone(),
        Query(params),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    let user_id = SessionUserId::get(&test.session).await.unwrap().unwrap();
    let location = resp.headers().get("location").unwrap().to_str().unwrap();
    assert_eq!(location, format!("/profile/{}", user_id));
    test.assert_mocks();

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request when the returned state does not match the session
async fn fails_for_csrf_mismatch() -> Result<(), TestError> {
    let (test, mut params) = setup().await?;
    params.state = "forged".to_string();

    let result = callback(
        State(test.app_state()),
        test.session.clone(),
        Query(params),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let user_id = SessionUserId::get(&test.session).await.unwrap();
    assert!(user_id.is_none());

    Ok(())
}

#[tokio::test]
/// Expect 500 internal server error when no CSRF state is left in the session
async fn fails_without_csrf_in_session() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let params = CallbackParams {
        state: "state".to_string(),
        code: "code".to_string(),
    };

    let result = callback(State(test.app_state()), test.session, Query(params)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}

#[tokio::test]
/// Expect 500 internal server error when the provider rejects the authorization code
async fn fails_when_provider_rejects_code() -> Result<(), TestError> {
    let (mut test, params) = setup().await?;
    let mock = test.auth().create_rejecting_token_endpoint();
    test.mocks.push(mock);

    let result = callback(
        State(test.app_state()),
        test.session.clone(),
        Query(params),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    test.assert_mocks();

    Ok(())
}
