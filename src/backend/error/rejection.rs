//! JSON body extractor whose rejections use the API error format.
//!
//! `axum::Json` answers malformed bodies with a plain-text 400/415/422. Handlers
//! take `ApiJson<T>` instead so every failure is a `{message}` 400.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use super::types::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();

        // "missing field `title` at line 1 column 2" -> "Missing required field: title"
        if let Some(start) = detail.find("missing field `") {
            let rest = &detail[start + "missing field `".len()..];
            if let Some(end) = rest.find('`') {
                return ApiError::validation(format!("Missing required field: {}", &rest[..end]));
            }
        }

        ApiError::validation(format!("Invalid request body: {}", detail))
    }
}
