/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Authentication Process
 *
 * 1. Require non-empty email and password
 * 2. Look up the user by exact email
 * 3. Verify the password with bcrypt
 * 4. Issue a token and place it in the `auth-token` cookie
 * 5. Return the user without its password hash
 *
 * Unknown email and wrong password both answer 401 "Invalid credentials".
 */
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Json},
};

use crate::backend::auth::cookie::CookiePolicy;
use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::error::{ApiError, ApiJson};
use crate::backend::store::DynUserRepository;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - email or password missing
/// * `401 Unauthorized` - unknown email or wrong password (same body)
/// * `500 Internal Server Error` - store, hash or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "ana@example.com",
///   "password": "secret"
/// }
/// ```
pub async fn login(
    State(users): State<DynUserRepository>,
    State(tokens): State<TokenIssuer>,
    State(cookies): State<CookiePolicy>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let user = match users.find_by_email(&request.email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login failed: unknown email");
            return Err(ApiError::invalid_credentials());
        }
    };

    let valid = bcrypt::verify(&request.password, &user.password_hash).map_err(|e| {
        ApiError::internal(format!("password verification failed for {}: {}", user.id, e))
    })?;

    if !valid {
        tracing::warn!("Login failed: wrong password for user {}", user.id);
        return Err(ApiError::invalid_credentials());
    }

    let token = tokens.issue_for(&user)?;
    let cookie = cookies.session_cookie(&token);

    tracing::info!("User logged in: {}", user.id);

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user: user.into_public(),
        }),
    ))
}
