//! In-process mirror
//!
//! Keeps rows per table keyed by the table's conflict columns, replacing on
//! conflict like the real mirror. Tables can be set to fail so partial sync
//! behaviour can be exercised.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;

use super::mirror::{MirrorError, MirrorStore, MirrorTable};

#[derive(Debug, Default)]
pub struct MemoryMirror {
    tables: RwLock<HashMap<MirrorTable, BTreeMap<String, Value>>>,
    failing: HashSet<MirrorTable>,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upsert into `table` fail with a 503
    pub fn failing_on(mut self, table: MirrorTable) -> Self {
        self.failing.insert(table);
        self
    }

    /// Stored rows of a table, ordered by key
    pub async fn rows(&self, table: MirrorTable) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(&table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn row_count(&self, table: MirrorTable) -> usize {
        self.tables
            .read()
            .await
            .get(&table)
            .map_or(0, BTreeMap::len)
    }
}

fn row_key(table: MirrorTable, row: &Value) -> Result<String, MirrorError> {
    table
        .conflict_columns()
        .iter()
        .map(|column| match row.get(*column) {
            Some(Value::String(value)) => Ok(value.clone()),
            Some(value) if !value.is_null() => Ok(value.to_string()),
            _ => Err(MirrorError::InvalidRow {
                table,
                column: *column,
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|parts| parts.join("|"))
}

#[async_trait]
impl MirrorStore for MemoryMirror {
    async fn upsert(&self, table: MirrorTable, rows: &[Value]) -> Result<usize, MirrorError> {
        if self.failing.contains(&table) {
            return Err(MirrorError::Rejected {
                status: 503,
                body: format!("{} is unavailable", table),
            });
        }

        let keyed = rows
            .iter()
            .map(|row| Ok((row_key(table, row)?, row.clone())))
            .collect::<Result<Vec<_>, MirrorError>>()?;

        let mut tables = self.tables.write().await;
        let stored = tables.entry(table).or_default();
        for (key, row) in keyed {
            stored.insert(key, row);
        }
        Ok(rows.len())
    }
}
