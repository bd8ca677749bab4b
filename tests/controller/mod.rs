//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extracted arguments and the resulting responses are
//! checked for status codes and persisted side effects.

mod alliance;
mod auth;
mod community;
mod user;

use civitas_test_utils::prelude::*;

use crate::util::TestSetupExt;
