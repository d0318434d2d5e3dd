/**
 * Server Initialization
 *
 * Startup is three steps, each failing fast:
 *
 * 1. `connect_store` - open the PostgreSQL pool and apply migrations
 * 2. `build_state` - token issuer, cookie policy, Supabase client, repositories
 * 3. `create_app` - the router over that state
 *
 * The store is returned separately so the binary can close the pool on
 * shutdown.
 */

use axum::Router;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use thiserror::Error;

use crate::backend::auth::{CookiePolicy, TokenError, TokenIssuer};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{PostgresStore, Repositories, StoreError};
use crate::backend::sync::{MirrorError, SupabaseMirror};

#[derive(Debug, Error)]
pub enum InitError {
    #[error("primary store unavailable: {0}")]
    Store(#[from] StoreError),

    #[error("session tokens: {0}")]
    Token(#[from] TokenError),

    #[error("mirror client: {0}")]
    Mirror(#[from] MirrorError),
}

/// Connect to PostgreSQL and bring the schema up to date
pub async fn connect_store(config: &ServerConfig) -> Result<PostgresStore, InitError> {
    tracing::info!("Connecting to database...");
    let store = PostgresStore::connect(
        config.database_url.expose_secret(),
        config.database_max_connections,
    )
    .await?;

    store.migrate().await?;
    tracing::info!("Database migrations applied");

    Ok(store)
}

/// Assemble application state on top of a connected store
pub fn build_state(config: &ServerConfig, store: PostgresStore) -> Result<AppState, InitError> {
    let tokens = TokenIssuer::new(&config.jwt_secret)?;
    let cookies = CookiePolicy::new(config.app_env.is_production());

    let mirror = SupabaseMirror::new(
        &config.supabase.url,
        SecretString::from(config.supabase.service_role_key.expose_secret()),
        config.supabase.timeout,
    )?;

    if config.bpm.is_some() {
        tracing::debug!("BPM integration configured");
    }

    Ok(AppState::new(
        Repositories::from_store(Arc::new(store)),
        Arc::new(mirror),
        tokens,
        cookies,
    ))
}

/// Create the Axum application for `state`
pub fn create_app(state: AppState) -> Router {
    create_router(state)
}
