// [libs/domain/models/src/status.rs]
use serde::{Deserialize, Serialize};

/// Health tag derived by `StatusEvaluator`. First-match-wins algorithm
/// lives in `solara_domain_monitoring::status`; this is only the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Green,
    Yellow,
    Red,
    /// Forced whenever `integration_status != ACTIVE` (invariant I4).
    Grey,
}
