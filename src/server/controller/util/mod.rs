//! Helpers shared by the controllers.
//!
//! CSRF validation for the login callback and session user lookup for protected endpoints.

pub mod csrf;
pub mod get_user;
