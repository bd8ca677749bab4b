//! Data access layer repositories.
//!
//! Repositories are thin wrappers over sea-orm entities, generic over [`ConnectionTrait`] so
//! the same methods run against the pool or inside a transaction. They never decide
//! permissions or membership rules; services do.
//!
//! Counter columns are only ever changed with in-database `col = col + n` updates.
//!
//! [`ConnectionTrait`]: sea_orm::ConnectionTrait

pub mod alliance;
pub mod community;
pub mod user;
