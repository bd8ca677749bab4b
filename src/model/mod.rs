//! Request and response bodies of the HTTP API.

pub mod alliance;
pub mod api;
pub mod community;
pub mod post;
pub mod user;
