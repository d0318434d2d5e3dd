//! Backend Error Module
//!
//! The single error type returned by HTTP handlers.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError definition and status mapping
//! ├── conversion.rs - IntoResponse and From conversions
//! └── rejection.rs  - JSON body extractor with API-shaped rejections
//! ```
//!
//! # Error Taxonomy
//!
//! | Variant | Status | Client message |
//! |---|---|---|
//! | `Validation` | 400 | the validation message |
//! | `Authentication` | 401 | the (generic) message |
//! | `NotFound` | 404 | the message |
//! | `Upstream` / `Token` / `Internal` | 500 | `"Internal server error"` |
//!
//! Upstream causes are logged server-side and never copied into the body.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

/// JSON extractor rejection handling
pub mod rejection;

// Re-export commonly used types
pub use types::ApiError;
pub use rejection::ApiJson;
