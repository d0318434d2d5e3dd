//! POST /api/sync
//!
//! Requires a valid Bearer token (signature and expiry). Any authenticated
//! caller may trigger a sync; there is no role check.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use super::synchronizer::{SyncStats, Synchronizer, TableSyncResult};
use crate::backend::error::ApiError;
use crate::backend::middleware::BearerClaims;

#[derive(Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    pub message: String,
    pub stats: SyncStats,
    /// `false` when at least one table failed
    pub complete: bool,
    pub results: Vec<TableSyncResult>,
}

pub async fn run_sync(
    BearerClaims(claims): BearerClaims,
    State(synchronizer): State<Synchronizer>,
) -> Result<Json<SyncResponse>, ApiError> {
    tracing::info!("Sync requested by {}", claims.user_id);

    let report = synchronizer.run().await?;
    let complete = report.is_complete();
    let message = if complete {
        "Sync completed"
    } else {
        "Sync completed with errors"
    };

    Ok(Json(SyncResponse {
        message: message.to_string(),
        stats: report.stats,
        complete,
        results: report.results,
    }))
}
