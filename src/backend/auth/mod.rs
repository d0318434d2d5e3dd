//! Authentication Module
//!
//! Session tokens, the session cookie, and the login/logout/me handlers.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports
//! ├── sessions.rs     - TokenIssuer and Claims
//! ├── cookie.rs       - auth-token cookie rendering and parsing
//! └── handlers/
//!     ├── types.rs    - Request/response bodies
//!     ├── login.rs    - POST /api/auth/login
//!     ├── logout.rs   - POST /api/auth/logout
//!     └── me.rs       - GET /api/auth/me
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Login**: email and password → bcrypt check → token in `auth-token` cookie
//! 2. **Requests**: the cookie (or a Bearer header) is verified by the
//!    [`AuthUser`](crate::backend::middleware::AuthUser) extractor
//! 3. **Logout**: the cookie is overwritten with `Max-Age=0`
//!
//! # Security
//!
//! - Unknown email and wrong password produce the same 401 body
//! - Password hashes never leave the store layer
//! - No attempt counters or lockout

/// JWT issuance and validation
pub mod sessions;

/// Session cookie
pub mod cookie;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use cookie::{CookiePolicy, AUTH_COOKIE};
pub use handlers::{get_me, login, logout};
pub use sessions::{Claims, TokenError, TokenIssuer};
