//! Service layer for business logic.
//!
//! Services validate input, enforce who may act, and run each operation in one database
//! transaction under [`retry::RetryContext`]. Repositories in [`crate::server::data`] do the
//! queries; services decide what they mean.

pub mod alliance;
pub mod auth;
pub mod community;
pub mod reconcile;
pub mod retry;
pub mod user;
