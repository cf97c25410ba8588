// [libs/domain/models/src/job_ticket.rs]
use crate::Brand;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    Poll,
    DailyBackfill,
}

/// Owned by the BrandQueue for its brand; the Scheduler holds only the
/// deterministic id. `id` is content-addressed so a duplicate submission
/// is a guaranteed no-op (property P7) rather than relying on the
/// Scheduler to remember what it already sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTicket {
    pub id: String,
    pub plant_id: String,
    pub brand: Brand,
    pub attempt: u32,
    pub enqueued_at: DateTime<Utc>,
}

impl JobTicket {
    /// `poll:plant:{plantId}:latest` — the sole dedup mechanism for
    /// regular polls (spec.md §4.2).
    pub fn poll_id(plant_id: &str) -> String {
        format!("poll:plant:{plant_id}:latest")
    }

    /// `daily:plant:{plantId}:{yyyy-mm-dd}` — dedup for backfill jobs.
    pub fn daily_backfill_id(plant_id: &str, date: NaiveDate) -> String {
        format!("daily:plant:{plant_id}:{}", date.format("%Y-%m-%d"))
    }

    pub fn new_poll(plant_id: impl Into<String>, brand: Brand, enqueued_at: DateTime<Utc>) -> Self {
        let plant_id = plant_id.into();
        Self {
            id: Self::poll_id(&plant_id),
            plant_id,
            brand,
            attempt: 1,
            enqueued_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_id_is_deterministic_and_collapses_duplicates() {
        assert_eq!(JobTicket::poll_id("p1"), JobTicket::poll_id("p1"));
        assert_ne!(JobTicket::poll_id("p1"), JobTicket::poll_id("p2"));
    }
}
