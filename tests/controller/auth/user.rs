use axum::{extract::State, http::StatusCode, response::IntoResponse};
use civitas::server::{controller::auth::get_user, model::session::user::SessionUserId};

use super::*;

#[tokio::test]
/// Expect 200 success for the logged in user
async fn returns_logged_in_user() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    let ada = test.user().insert_user("Ada").await?;
    SessionUserId::insert(&test.session, ada.id).await.unwrap();

    let result = get_user(State(test.app_state()), test.session).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 401 unauthorized when nobody is logged in
async fn fails_without_session_user() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;

    let result = get_user(State(test.app_state()), test.session).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect 404 not found when the session refers to a deleted user
async fn fails_for_user_missing_from_database() -> Result<(), TestError> {
    let test = test_setup_with_civitas_tables!()?;
    SessionUserId::insert(&test.session, 42).await.unwrap();

    let result = get_user(State(test.app_state()), test.session).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
