//! Shared Error Types
//!
//! Validation failures raised while checking request payloads. The backend
//! converts them into `400 Bad Request` responses.
//!
//! # Usage
//!
//! ```rust
//! use ponta_solta::shared::error::SharedError;
//!
//! let title = SharedError::require_text("title", "  Write tests ", "Title is required").unwrap();
//! assert_eq!(title, "Write tests");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Trim `value` and reject it when nothing is left.
    pub fn require_text(field: &str, value: &str, message: &str) -> Result<String, Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Self::validation(field, message));
        }
        Ok(trimmed.to_string())
    }

    /// The client-facing part of the error.
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_carries_field_and_message() {
        let SharedError::ValidationError { field, message } =
            SharedError::validation("parentId", "Cannot reply to a reply");
        assert_eq!(field, "parentId");
        assert_eq!(message, "Cannot reply to a reply");
    }

    #[test]
    fn test_require_text_trims() {
        let value = SharedError::require_text("content", "  hello \n", "Content is required");
        assert_eq!(value.unwrap(), "hello");
    }

    #[test]
    fn test_require_text_rejects_whitespace() {
        let error = SharedError::require_text("content", " \t ", "Content is required").unwrap_err();
        assert_eq!(error.message(), "Content is required");
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("title", "Title is required");
        let display = format!("{}", error);
        assert!(display.contains("title"));
        assert!(display.contains("Title is required"));
    }
}
