// [libs/domain/models/src/poll_log.rs]
use crate::{job_ticket::JobType, AdapterErrorKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PollLogStatus {
    Success,
    Error,
}

/// Append-only audit record: one row per executor run, success or
/// failure (invariant I5, property P5). Never mutated after insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollLog {
    pub id: String,
    pub plant_id: String,
    pub job_type: JobType,
    pub status: PollLogStatus,
    pub duration_ms: i64,
    pub adapter_error_type: Option<AdapterErrorKind>,
    pub http_status: Option<u16>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
