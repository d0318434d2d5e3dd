//! Middleware Module
//!
//! Request extractors that authenticate the caller before a handler runs.
//!
//! - **`AuthUser`** - session cookie or Bearer token
//! - **`BearerClaims`** - Bearer token only, used by `/api/sync`
//!
//! Both verify the token signature and expiry through the `TokenIssuer` in
//! application state and reject with a 401 in the API error format.

pub mod auth;

pub use auth::{bearer_token, AuthUser, BearerClaims};
