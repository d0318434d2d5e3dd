/**
 * Mirror Store
 *
 * The secondary store only needs one operation: upsert a batch of rows into
 * a table, replacing rows whose key already exists.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Tables written by the synchronizer, in dependency order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorTable {
    Users,
    Teams,
    TeamMembers,
    Boards,
    BoardColumns,
    Cards,
    ChecklistItems,
}

impl MirrorTable {
    pub fn name(&self) -> &'static str {
        match self {
            MirrorTable::Users => "users",
            MirrorTable::Teams => "teams",
            MirrorTable::TeamMembers => "team_members",
            MirrorTable::Boards => "boards",
            MirrorTable::BoardColumns => "board_columns",
            MirrorTable::Cards => "cards",
            MirrorTable::ChecklistItems => "checklist_items",
        }
    }

    /// Columns identifying a row for conflict resolution
    pub fn conflict_columns(&self) -> &'static [&'static str] {
        match self {
            MirrorTable::TeamMembers => &["team_id", "user_id"],
            _ => &["id"],
        }
    }
}

impl fmt::Display for MirrorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("mirror request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mirror rejected request (status {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("row for {table} lacks key column {column}")]
    InvalidRow {
        table: MirrorTable,
        column: &'static str,
    },

    #[error("could not encode rows: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MirrorError {
    /// Short description safe to hand back to the sync caller
    pub fn summary(&self) -> String {
        match self {
            MirrorError::Http(e) if e.is_timeout() => "mirror request timed out".to_string(),
            MirrorError::Http(_) => "mirror unreachable".to_string(),
            MirrorError::Rejected { status, .. } => {
                format!("mirror rejected request (status {})", status)
            }
            MirrorError::InvalidRow { table, column } => {
                format!("row for {} lacks key column {}", table, column)
            }
            MirrorError::Serialization(_) => "could not encode rows".to_string(),
        }
    }
}

/// Secondary store accepting keyed upserts
#[async_trait]
pub trait MirrorStore: Send + Sync {
    /// Insert or replace `rows` in `table`; returns how many rows were sent
    async fn upsert(&self, table: MirrorTable, rows: &[Value]) -> Result<usize, MirrorError>;
}

pub type DynMirrorStore = Arc<dyn MirrorStore>;
