/**
 * Authentication Handler Types
 *
 * Request and response bodies for the auth endpoints. Users only appear on
 * the wire as `PublicUser`.
 */

use serde::{Deserialize, Serialize};

use crate::shared::kanban::PublicUser;

/// Login request
///
/// Both fields default to empty so a missing field is reported as a
/// validation error rather than a body parse failure.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MeResponse {
    pub user: PublicUser,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}
