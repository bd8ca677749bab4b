//! Tests for community controller endpoints.

mod create;
mod delete;
mod member;
mod post;

use super::*;
