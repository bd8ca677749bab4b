//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered here with its utoipa path annotation. Handlers that share a
//! path are registered together. Swagger UI serves the collected document at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # OpenAPI Documentation
/// The OpenAPI document is available at `/api/docs/openapi.json` and interactive
/// documentation at `/api/docs`.
///
/// # Returns
/// An Axum `Router<AppState>` configured with all routes, ready for
/// [`Router::with_state`].
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Civitas", description = "Civitas community & alliance API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::user::USER_TAG, description = "User profile API routes"),
        (name = controller::community::COMMUNITY_TAG, description = "Community API routes"),
        (name = controller::alliance::ALLIANCE_TAG, description = "Alliance API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::callback))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::user::get_user_profile))
        .routes(routes!(controller::user::update_profile))
        .routes(routes!(controller::user::get_joined_communities))
        .routes(routes!(
            controller::community::list_communities,
            controller::community::create_community
        ))
        .routes(routes!(
            controller::community::get_community,
            controller::community::update_community,
            controller::community::delete_community
        ))
        .routes(routes!(controller::community::member::join_community))
        .routes(routes!(controller::community::member::leave_community))
        .routes(routes!(controller::community::member::list_members))
        .routes(routes!(controller::community::member::approve_member))
        .routes(routes!(controller::community::member::reject_member))
        .routes(routes!(controller::community::member::ban_member))
        .routes(routes!(controller::community::member::remove_member))
        .routes(routes!(
            controller::community::post::list_posts,
            controller::community::post::create_post
        ))
        .routes(routes!(
            controller::community::post::list_comments,
            controller::community::post::create_comment
        ))
        .routes(routes!(
            controller::community::post::like_post,
            controller::community::post::unlike_post
        ))
        .routes(routes!(
            controller::alliance::list_alliances,
            controller::alliance::create_alliance
        ))
        .routes(routes!(
            controller::alliance::get_alliance,
            controller::alliance::update_alliance,
            controller::alliance::disband_alliance
        ))
        .routes(routes!(controller::alliance::member::list_members))
        .routes(routes!(controller::alliance::member::join_alliance))
        .routes(routes!(controller::alliance::member::leave_alliance))
        .routes(routes!(controller::alliance::member::approve_member))
        .routes(routes!(controller::alliance::member::reject_member))
        .routes(routes!(controller::alliance::member::remove_member))
        .routes(routes!(
            controller::alliance::post::list_posts,
            controller::alliance::post::create_post
        ))
        .routes(routes!(
            controller::alliance::post::list_comments,
            controller::alliance::post::create_comment
        ))
        .routes(routes!(
            controller::alliance::post::like_post,
            controller::alliance::post::unlike_post
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
