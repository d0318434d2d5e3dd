//! Authentication Handlers
//!
//! - **`login`** - POST /api/auth/login
//! - **`logout`** - POST /api/auth/logout
//! - **`get_me`** - GET /api/auth/me

/// Request and response types
pub mod types;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

pub use types::{LoginRequest, LoginResponse, MeResponse, MessageResponse};

pub use login::login;
pub use logout::logout;
pub use me::get_me;
