// [libs/domain/models/src/plant.rs]
use crate::{Brand, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of the plant's link to its vendor. Owned by Store;
/// mutated by PollExecutor (AUTH_FAILED path, §7) and by admin ops
/// (out of scope). `Active` is the only value the Scheduler enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrationStatus {
    Active,
    PausedAuthError,
    PausedManual,
    Decommissioned,
}

impl IntegrationStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, IntegrationStatus::Active)
    }
}

/// One monitored installation (spec.md §3). `status` is write-only from
/// the perspective of PollExecutor: every other field is either set at
/// plant creation (out of scope) or mutated by admin operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub brand: Brand,
    /// IANA zone, e.g. "America/Sao_Paulo". Required — never a fixed
    /// offset, never empty (enforced by the executor at step 8).
    pub timezone: String,
    pub integration_status: IntegrationStatus,
    pub status: Status,
    pub alerts_silenced_until: Option<DateTime<Utc>>,
    pub owner_customer_id: Option<String>,
    pub vendor_plant_id: String,
    pub installed_capacity_w: Option<f64>,
}

impl Plant {
    /// Invariant I4: non-ACTIVE plants are always GREY. Callers apply
    /// this immediately after StatusEvaluator runs, never before.
    pub fn status_obeys_integration_invariant(&self) -> bool {
        self.integration_status.is_active() || matches!(self.status, Status::Grey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grey_is_required_off_active() {
        let mut plant = Plant {
            id: "p1".into(),
            brand: Brand::Solis,
            timezone: "America/Sao_Paulo".into(),
            integration_status: IntegrationStatus::PausedAuthError,
            status: Status::Green,
            alerts_silenced_until: None,
            owner_customer_id: None,
            vendor_plant_id: "v1".into(),
            installed_capacity_w: None,
        };
        assert!(!plant.status_obeys_integration_invariant());
        plant.status = Status::Grey;
        assert!(plant.status_obeys_integration_invariant());
    }
}
