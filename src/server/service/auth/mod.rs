//! Authentication service layer.
//!
//! Runs the authorization-code flow against the external identity provider and mirrors
//! the authenticated account into the `civitas_user` table.

pub mod callback;
pub mod login;
