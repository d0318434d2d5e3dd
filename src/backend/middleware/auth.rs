/**
 * Authentication Extractors
 *
 * Handlers that need an identity take `AuthUser` (or `BearerClaims`) as an
 * argument. The extractor pulls the token from the request, verifies it with
 * the `TokenIssuer` found in state, and hands the claims to the handler.
 */

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::auth::cookie::token_from_cookie_header;
use crate::backend::auth::sessions::{Claims, TokenIssuer};
use crate::backend::error::ApiError;

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn verify(issuer: &TokenIssuer, token: &str) -> Result<Claims, ApiError> {
    issuer.verify(token).map_err(|e| {
        tracing::warn!("Rejected token: {}", e);
        ApiError::authentication("Invalid or expired token")
    })
}

/// Caller identified by a Bearer header or the `auth-token` cookie
///
/// The header wins when both are present.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    TokenIssuer: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .map(str::to_string)
            .or_else(|| token_from_cookie_header(&parts.headers))
            .ok_or_else(|| ApiError::authentication("Not authenticated"))?;

        let issuer = TokenIssuer::from_ref(state);
        verify(&issuer, &token).map(AuthUser)
    }
}

/// Caller identified by a Bearer header; cookies are ignored
#[derive(Clone, Debug)]
pub struct BearerClaims(pub Claims);

impl<S> FromRequestParts<S> for BearerClaims
where
    TokenIssuer: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::authentication("Missing authorization token"))?;

        let issuer = TokenIssuer::from_ref(state);
        verify(&issuer, token).map(BearerClaims)
    }
}
