/**
 * Backend Error Types
 *
 * `ApiError` is what every handler returns on failure. Client-caused
 * failures carry their message to the response; server-side failures carry
 * their cause for the log only.
 */

use thiserror::Error;
use axum::http::StatusCode;

use crate::backend::auth::sessions::TokenError;
use crate::backend::store::StoreError;

/// Message returned for every credential failure, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Message returned for every server-side failure.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Handler error
///
/// # Usage
///
/// ```rust
/// use ponta_solta::backend::error::ApiError;
/// use axum::http::StatusCode;
///
/// let err = ApiError::validation("Title is required");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or empty
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },

    /// Missing, invalid or expired credentials
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
    },

    /// The addressed resource does not exist
    #[error("Not found: {message}")]
    NotFound {
        message: String,
    },

    /// The primary store failed
    #[error("Upstream error: {0}")]
    Upstream(#[from] StoreError),

    /// Token issuance failed
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Any other server-side failure
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// The generic login failure, identical for unknown email and wrong password
    pub fn invalid_credentials() -> Self {
        Self::authentication(INVALID_CREDENTIALS)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Authentication { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Token(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message that may be shown to the client
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Authentication { message }
            | Self::NotFound { message } => message.clone(),
            Self::Upstream(_) | Self::Token(_) | Self::Internal { .. } => INTERNAL_ERROR.to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}
