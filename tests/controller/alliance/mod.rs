//! Tests for alliance controller endpoints.

mod create;
mod member;

use super::*;
