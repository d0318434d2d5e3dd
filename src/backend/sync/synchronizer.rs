/**
 * Synchronizer
 *
 * Reads users, teams and boards from the primary store, flattens them into
 * mirror rows and upserts the tables in dependency order. Each table gets a
 * result entry; a failed table does not stop the ones after it.
 */

use serde::{Deserialize, Serialize};

use super::mirror::{DynMirrorStore, MirrorTable};
use super::projection::{order_parents_first, to_values, Projection};
use crate::backend::store::{DynSnapshotRepository, StoreError};

/// Rows read from the primary store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    pub users: usize,
    pub teams: usize,
    pub boards: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SyncOutcome {
    Synced,
    Failed { error: String },
}

/// Result of upserting one mirror table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSyncResult {
    pub table: MirrorTable,
    pub rows: usize,
    #[serde(flatten)]
    pub outcome: SyncOutcome,
}

impl TableSyncResult {
    pub fn is_synced(&self) -> bool {
        self.outcome == SyncOutcome::Synced
    }
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub stats: SyncStats,
    pub results: Vec<TableSyncResult>,
}

impl SyncReport {
    /// Whether every table was written
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(TableSyncResult::is_synced)
    }
}

#[derive(Clone)]
pub struct Synchronizer {
    source: DynSnapshotRepository,
    mirror: DynMirrorStore,
}

impl Synchronizer {
    pub fn new(source: DynSnapshotRepository, mirror: DynMirrorStore) -> Self {
        Self { source, mirror }
    }

    /// Copy the primary store into the mirror
    ///
    /// Fails only when the primary store cannot be read; mirror failures are
    /// reported per table in the returned report.
    pub async fn run(&self) -> Result<SyncReport, StoreError> {
        let (users, teams, boards) = tokio::try_join!(
            self.source.load_users(),
            self.source.load_teams(),
            self.source.load_boards(),
        )?;

        let stats = SyncStats {
            users: users.len(),
            teams: teams.len(),
            boards: boards.len(),
        };
        tracing::info!(
            "Sync snapshot: {} users, {} teams, {} boards",
            stats.users,
            stats.teams,
            stats.boards
        );

        let (teams, unresolved) = order_parents_first(teams);
        if !unresolved.is_empty() {
            tracing::warn!("Team parent cycle involving: {}", unresolved.join(", "));
        }

        let projection = Projection::build(&users, &teams, &boards);

        let results = vec![
            self.push(MirrorTable::Users, &projection.users).await,
            self.push(MirrorTable::Teams, &projection.teams).await,
            self.push(MirrorTable::TeamMembers, &projection.team_members).await,
            self.push(MirrorTable::Boards, &projection.boards).await,
            self.push(MirrorTable::BoardColumns, &projection.columns).await,
            self.push(MirrorTable::Cards, &projection.cards).await,
            self.push(MirrorTable::ChecklistItems, &projection.checklist_items).await,
        ];

        Ok(SyncReport { stats, results })
    }

    async fn push<T: Serialize>(&self, table: MirrorTable, rows: &[T]) -> TableSyncResult {
        let written = match to_values(rows) {
            Ok(values) => self.mirror.upsert(table, &values).await,
            Err(e) => Err(e),
        };

        match written {
            Ok(count) => TableSyncResult {
                table,
                rows: count,
                outcome: SyncOutcome::Synced,
            },
            Err(e) => {
                tracing::error!("Sync of {} failed: {}", table, e);
                TableSyncResult {
                    table,
                    rows: rows.len(),
                    outcome: SyncOutcome::Failed { error: e.summary() },
                }
            }
        }
    }
}
