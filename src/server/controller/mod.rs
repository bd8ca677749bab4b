//! HTTP controller endpoints for the Civitas web API.
//!
//! Axum handlers for authentication, profiles, communities and alliances. Handlers resolve
//! the session user, call a service and return JSON. Every handler carries a utoipa
//! annotation so it appears in the OpenAPI document.

pub mod alliance;
pub mod auth;
pub mod community;
pub mod user;
pub mod util;
