// [libs/domain/monitoring/src/low_gen.rs]
/*!
 * Low-generation derivation (spec.md §4.4 step 12, scenario S6). `M` is
 * the median of the last up-to-7 historical daily energies strictly
 * before today's local date; fewer than 3 historical points means "do
 * nothing" rather than guessing from too little data.
 */

use solara_domain_models::AlertSeverity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowGenLevel {
    None,
    Yellow,
    Red,
}

impl LowGenLevel {
    /// Severity to raise/upgrade the `LOW_GEN` alert with. `None`
    /// carries no severity because it means "resolve, don't raise".
    pub fn alert_severity(&self) -> Option<AlertSeverity> {
        match self {
            LowGenLevel::None => None,
            LowGenLevel::Yellow => Some(AlertSeverity::High),
            LowGenLevel::Red => Some(AlertSeverity::Critical),
        }
    }
}

/// Median of up to 7 values. Historical must already be the last
/// up-to-7 daily energies (callers fetch exactly that window from the
/// Store); this function does not truncate.
fn median(values: &[f64]) -> f64 {
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("NaN energy value"));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Returns `None` (do nothing) when fewer than 3 historical points are
/// available, otherwise one of `{None, Yellow, Red}` per spec.md §4.4.
pub fn low_gen_level(today_energy_kwh: f64, historical: &[f64]) -> Option<LowGenLevel> {
    if historical.len() < 3 {
        return None;
    }
    let reference = median(historical);
    if reference <= 0.0 {
        // A zero/negative median means the plant has been producing
        // nothing for its whole lookback window; today's value cannot
        // be meaningfully compared as a fraction of it.
        return Some(LowGenLevel::None);
    }
    let ratio = today_energy_kwh / reference;
    Some(if ratio < 0.10 {
        LowGenLevel::Red
    } else if ratio < 0.30 {
        LowGenLevel::Yellow
    } else {
        LowGenLevel::None
    })
}
