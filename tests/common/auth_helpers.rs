//! Authentication test helpers

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderName, HeaderValue,
};
use ponta_solta::backend::auth::TokenIssuer;
use ponta_solta::shared::kanban::Role;

/// Token for `user_id` signed with the fixture secret
pub fn token_for(tokens: &TokenIssuer, user_id: &str, email: &str) -> String {
    tokens.issue(user_id, email, Role::User).unwrap()
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}

pub fn session_cookie(token: &str) -> (HeaderName, HeaderValue) {
    (
        COOKIE,
        HeaderValue::from_str(&format!("auth-token={}", token)).unwrap(),
    )
}

/// Token value carried by a `Set-Cookie: auth-token=...` header
pub fn token_from_set_cookie(set_cookie: &str) -> Option<String> {
    set_cookie
        .split(';')
        .next()?
        .trim()
        .strip_prefix("auth-token=")
        .map(str::to_string)
}
