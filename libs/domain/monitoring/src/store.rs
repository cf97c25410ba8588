// [libs/domain/monitoring/src/store.rs]
/*!
 * Store contract (spec.md §2/§3). Typed operations, never raw SQL —
 * the concrete implementation (`solara-infra-db`) is the only thing
 * that knows it is backed by libsql. Errors are collapsed into this
 * crate's own `StoreError` so the pipeline in `executor.rs` never has
 * to depend on an infra crate.
 */

use async_trait::async_trait;
use chrono::NaiveDate;
use solara_domain_models::{
    Alert, AlertDedupKey, Credential, IntegrationStatus, MetricSnapshot, Plant, PollLog, Status,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("[STORE_CONN_FAULT]: {0}")]
    Connection(String),
    #[error("[STORE_QUERY_FAULT]: {0}")]
    Query(String),
    #[error("[STORE_NOT_FOUND]: {0}")]
    NotFound(String),
    #[error("[STORE_CONFLICT]: {0}")]
    Conflict(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn load_plant_with_credential(
        &self,
        plant_id: &str,
    ) -> Result<Option<(Plant, Credential)>, StoreError>;

    async fn active_plants(&self) -> Result<Vec<Plant>, StoreError>;

    async fn set_integration_status(
        &self,
        plant_id: &str,
        integration_status: IntegrationStatus,
    ) -> Result<(), StoreError>;

    async fn set_status(&self, plant_id: &str, status: Status) -> Result<(), StoreError>;

    /// Upsert on `(plant_id, date)` — insert sets every field, update
    /// overwrites the measured fields in place (spec.md §4.4 step 9).
    async fn upsert_snapshot(&self, snapshot: &MetricSnapshot) -> Result<(), StoreError>;

    /// Inserts only if no row exists for `(plant_id, date)` yet. Used
    /// exclusively by the backfill sweep, which must never overwrite an
    /// existing snapshot (spec.md §4.4 step 11, §9).
    async fn insert_snapshot_if_absent(&self, snapshot: &MetricSnapshot) -> Result<bool, StoreError>;

    async fn get_snapshot(
        &self,
        plant_id: &str,
        date: NaiveDate,
    ) -> Result<Option<MetricSnapshot>, StoreError>;

    /// Up to `limit` snapshots strictly before `before_date`, most
    /// recent first — the raw material for the low-generation median
    /// (spec.md §4.4 step 12).
    async fn recent_snapshots_before(
        &self,
        plant_id: &str,
        before_date: NaiveDate,
        limit: usize,
    ) -> Result<Vec<MetricSnapshot>, StoreError>;

    async fn active_alerts_for_plant(&self, plant_id: &str) -> Result<Vec<Alert>, StoreError>;

    async fn find_open_alert(&self, key: &AlertDedupKey) -> Result<Option<Alert>, StoreError>;

    async fn insert_alert(&self, alert: &Alert) -> Result<(), StoreError>;

    async fn update_alert(&self, alert: &Alert) -> Result<(), StoreError>;

    async fn insert_poll_log(&self, log: &PollLog) -> Result<(), StoreError>;
}
