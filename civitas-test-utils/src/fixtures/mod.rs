//! Test fixture modules for database and HTTP mock creation.
//!
//! - `auth` - mocked identity provider token and userinfo endpoints
//! - `user` - mirrored user records
//! - `community` - communities and memberships
//! - `alliance` - alliances and alliance memberships
//! - `post` - community and alliance posts and comments

pub mod alliance;
pub mod auth;
pub mod community;
pub mod post;
pub mod user;
