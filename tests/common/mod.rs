//! Common test utilities and helpers
//!
//! - In-memory application fixture seeded with users, a team, a board and
//!   two cards
//! - Authentication helpers (tokens, headers)
//! - PostgreSQL fixture for the ignored database tests

#![allow(dead_code)]

pub mod auth_helpers;
pub mod database;
pub mod fixtures;

pub use auth_helpers::*;
pub use fixtures::*;
