//! Session cookie
//!
//! The login handler places the token in an `auth-token` cookie; the auth
//! extractor reads it back. Attributes: `HttpOnly`, `SameSite=Lax`, `Path=/`,
//! seven-day `Max-Age`, and `Secure` in production.

use axum::http::{header::COOKIE, HeaderMap};

use super::sessions::TOKEN_TTL_DAYS;

pub const AUTH_COOKIE: &str = "auth-token";

/// How session cookies are rendered for this deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub max_age_secs: i64,
}

impl CookiePolicy {
    pub fn new(secure: bool) -> Self {
        Self {
            secure,
            max_age_secs: TOKEN_TTL_DAYS * 24 * 60 * 60,
        }
    }

    /// `Set-Cookie` value carrying a fresh token
    pub fn session_cookie(&self, token: &str) -> String {
        self.render(token, self.max_age_secs)
    }

    /// `Set-Cookie` value that removes the session
    pub fn clearing_cookie(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            AUTH_COOKIE, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Find the session token among the request's `Cookie` headers
pub fn token_from_cookie_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == AUTH_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
