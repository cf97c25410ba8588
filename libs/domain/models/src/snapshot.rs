// [libs/domain/models/src/snapshot.rs]
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One row per plant per local calendar day (invariant I1). The unique
/// key is `(plant_id, date)`; `date` is always the local date derived
/// from `plant.timezone`, never a UTC date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub plant_id: String,
    pub date: NaiveDate,
    pub timezone: String,
    /// Never null (invariant I2) — a poll that cannot produce this
    /// number must fail the pipeline rather than write a partial row.
    pub today_energy_kwh: f64,
    pub current_power_w: Option<f64>,
    pub grid_injection_power_w: Option<f64>,
    pub total_energy_kwh: Option<f64>,
    pub last_seen_at: DateTime<Utc>,
    pub source_sampled_at: DateTime<Utc>,
}
