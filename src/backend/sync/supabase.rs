/**
 * Supabase Mirror Client
 *
 * Upserts through PostgREST:
 *
 * ```http
 * POST {SUPABASE_URL}/rest/v1/{table}?on_conflict={key columns}
 * apikey: {service role key}
 * Authorization: Bearer {service role key}
 * Prefer: resolution=merge-duplicates,return=minimal
 *
 * [ {row}, {row}, ... ]
 * ```
 *
 * The service-role key bypasses row-level security and must stay on the
 * server.
 */

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

use super::mirror::{MirrorError, MirrorStore, MirrorTable};

const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";

#[derive(Debug)]
pub struct SupabaseMirror {
    client: Client,
    base_url: String,
    service_key: SecretString,
}

impl SupabaseMirror {
    pub fn new(
        base_url: &str,
        service_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, MirrorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        })
    }

    fn endpoint(&self, table: MirrorTable) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }
}

#[async_trait]
impl MirrorStore for SupabaseMirror {
    async fn upsert(&self, table: MirrorTable, rows: &[Value]) -> Result<usize, MirrorError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let key = self.service_key.expose_secret();
        let response = self
            .client
            .post(self.endpoint(table))
            .query(&[("on_conflict", table.conflict_columns().join(","))])
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", UPSERT_PREFERENCE)
            .json(rows)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(MirrorError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Upserted {} rows into {}", rows.len(), table);
        Ok(rows.len())
    }
}
