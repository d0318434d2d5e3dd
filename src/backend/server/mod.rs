//! Server Module
//!
//! Configuration, application state and startup wiring for the Axum server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - Environment configuration (ServerConfig)
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - Store connection, state assembly, app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `ServerConfig::from_env()`; missing secrets abort startup
//! 2. **Store**: connect the pool and run migrations
//! 3. **State**: token issuer, cookie policy, Supabase client, repositories
//! 4. **Router**: every route plus request tracing

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{build_state, connect_store, create_app, InitError};
pub use state::AppState;
