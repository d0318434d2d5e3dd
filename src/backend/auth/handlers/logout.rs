//! POST /api/auth/logout
//!
//! Tokens are stateless, so logging out only overwrites the cookie.

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Json},
};

use crate::backend::auth::cookie::CookiePolicy;
use crate::backend::auth::handlers::types::MessageResponse;

pub async fn logout(State(cookies): State<CookiePolicy>) -> impl IntoResponse {
    (
        [(SET_COOKIE, cookies.clearing_cookie())],
        Json(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    )
}
