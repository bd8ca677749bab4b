//! Tests for authentication controller endpoints.
//!
//! Covers the provider login redirect, callback handling with CSRF validation, logout and
//! retrieval of the logged in user.

mod callback;
mod login;
mod logout;
mod user;

use super::*;
