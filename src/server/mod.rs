//! Server application core modules.
//!
//! This module contains all server-side functionality for Civitas, including HTTP routing,
//! login through the external identity provider, database operations, the membership state
//! machine shared by communities and alliances, and the scheduled counter reconciliation.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod identity;
pub mod membership;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
