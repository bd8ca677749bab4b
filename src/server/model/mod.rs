//! Server application models and type definitions.
//!
//! This module contains the application state shared by handlers, database model type
//! aliases with their conversions into API bodies, and typed session data.

pub mod app;
pub mod db;
pub mod session;
