//! PONTA SOLTA - Main Library
//!
//! PONTA SOLTA is a kanban-style demand and project management backend built
//! with Rust. Users authenticate against a credential table, work on boards,
//! columns and cards, attach checklists and threaded comments, and an
//! operator-triggered routine mirrors the primary store into a hosted
//! Supabase (PostgREST) database.
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types shared by every layer
//!   - Users, teams, boards, columns, cards, checklist items, comments
//!   - Validation errors
//!
//! - **`backend`** - The Axum HTTP server
//!   - Authentication (bcrypt + JWT session cookie)
//!   - Checklist, comment and card handlers
//!   - Repository traits with PostgreSQL and in-memory implementations
//!   - Cross-store synchronizer targeting Supabase
//!
//! # Usage
//!
//! ```rust,no_run
//! use ponta_solta::backend::server::{build_state, connect_store, create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let store = connect_store(&config).await?;
//! let app = create_app(build_state(&config, store)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` with `thiserror` enums per layer
//! - `backend::error::ApiError` is the single HTTP boundary type; store and
//!   mirror failures are logged and surfaced as a generic 500

/// Shared domain types
pub mod shared;

/// Backend server-side code
pub mod backend;
