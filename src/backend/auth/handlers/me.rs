/**
 * Get Current User Handler
 *
 * GET /api/auth/me returns the caller identified by the session cookie or a
 * Bearer token. A token whose user has since disappeared is treated like an
 * invalid token.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::MeResponse;
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::DynUserRepository;

pub async fn get_me(
    AuthUser(claims): AuthUser,
    State(users): State<DynUserRepository>,
) -> Result<Json<MeResponse>, ApiError> {
    let user = users.find_by_id(&claims.user_id).await?.ok_or_else(|| {
        tracing::warn!("Token refers to missing user {}", claims.user_id);
        ApiError::authentication("Not authenticated")
    })?;

    Ok(Json(MeResponse {
        user: user.into_public(),
    }))
}
