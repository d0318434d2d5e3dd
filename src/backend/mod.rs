//! Backend Module
//!
//! This module contains all server-side code for PONTA SOLTA: an Axum HTTP
//! server for authentication and board resources, plus the routine that
//! mirrors the primary store into Supabase.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Login, session tokens, session cookie
//! - **`middleware`** - Request extractors for authenticated callers
//! - **`board`** - Checklist, comment and card handlers
//! - **`store`** - Repository traits and their PostgreSQL / in-memory implementations
//! - **`sync`** - Cross-store synchronizer and the Supabase mirror client
//! - **`error`** - The HTTP boundary error type
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request extractors
//! ├── board/          - Resource handlers
//! ├── store/          - Primary store access
//! ├── sync/           - Mirror synchronization
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds explicit handles created at startup: repository trait
//! objects, the mirror client, the token issuer and the cookie policy.
//! Handlers pull the piece they need through `FromRef`; there is no global
//! client.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and session management
pub mod auth;

/// Request extractors for authenticated callers
pub mod middleware;

/// Board resource handlers
pub mod board;

/// Primary store repositories
pub mod store;

/// Cross-store synchronization
pub mod sync;

/// Re-export commonly used types
pub use server::{create_app, AppState};
pub use error::ApiError;
