// [libs/domain/models/src/adapter.rs]
/*!
 * APARATO: VENDOR ADAPTER CONTRACT (ESTRATO L2)
 * RESPONSABILIDAD: DTOs normalizados y taxonomia de error compartida
 * entre `solara-infra-vendor-adapter` (quien los produce) y
 * `solara-domain-monitoring` (quien los consume). Nada de I/O aqui.
 */

use crate::{Brand, AlertSeverity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed error taxonomy from spec.md §7. `LockSkipped` is never
/// returned by a `VendorAdapter` implementation — it is synthesized by
/// the executor itself when step 3 finds the plant already locked —
/// but it shares the vocabulary because it is also a legal value of
/// `PollLog.adapter_error_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdapterErrorKind {
    #[error("AUTH_FAILED")]
    AuthFailed,
    #[error("RATE_LIMITED(retry_after={retry_after_secs:?})")]
    RateLimited { retry_after_secs: Option<u64> },
    #[error("NETWORK_TIMEOUT")]
    NetworkTimeout,
    #[error("INVALID_DATA")]
    InvalidData,
    #[error("PLANT_NOT_FOUND")]
    PlantNotFound,
    #[error("LOCK_SKIPPED")]
    LockSkipped,
    #[error("UNKNOWN")]
    Unknown,
}

impl AdapterErrorKind {
    /// Retry policy per spec.md §4.3/§7. `LockSkipped` is not a failure
    /// at all (it produces a SUCCESS PollLog) so it is excluded here;
    /// callers must branch on it before consulting retryability.
    pub fn is_retryable(&self) -> bool {
        match self {
            AdapterErrorKind::AuthFailed
            | AdapterErrorKind::InvalidData
            | AdapterErrorKind::PlantNotFound
            | AdapterErrorKind::LockSkipped => false,
            AdapterErrorKind::RateLimited { .. }
            | AdapterErrorKind::NetworkTimeout
            | AdapterErrorKind::Unknown => true,
        }
    }
}

/// Outcome of `VendorAdapter::test_connection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Ok,
    AuthFailed,
    Transient,
}

/// Per-brand capability descriptor backing BrandQueue sizing (spec.md
/// §4.1/§4.3).
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub brand: Brand,
    pub max_concurrent: usize,
    pub max_per_minute: u32,
    pub min_interval_sec: u64,
    pub supports_daily_series: bool,
    pub supports_alarms: bool,
    pub supports_device_list: bool,
}

/// Normalized plant summary: the only shape the executor ever sees from
/// `GetPlantSummary`. Units are fixed by contract (watts, kWh, absolute
/// instants, IANA zone) — the adapter, not the executor, is responsible
/// for getting them there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedSummary {
    pub current_power_w: Option<f64>,
    pub today_energy_kwh: f64,
    pub total_energy_kwh: Option<f64>,
    /// May be negative only when the vendor distinguishes import
    /// direction; positive otherwise.
    pub grid_injection_power_w: Option<f64>,
    pub last_seen_at: DateTime<Utc>,
    pub source_sampled_at: DateTime<Utc>,
    pub timezone: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyEnergyPoint {
    pub date: NaiveDate,
    pub energy_kwh: f64,
}

impl NormalizedSummary {
    /// Executor step 8 validation (spec.md §4.4/§4.1/P6): energy present,
    /// finite, non-negative; power fields finite and non-negative except
    /// `grid_injection_power_w`, which is allowed to go negative (import
    /// direction); timezone is a plausible IANA zone string (a real fixed
    /// offset like `+03:00` or an empty string is rejected here — full
    /// zone validation happens when the local date is derived, see
    /// `solara_domain_monitoring::localday`).
    pub fn validate(&self) -> Result<(), AdapterErrorKind> {
        if !self.today_energy_kwh.is_finite() || self.today_energy_kwh < 0.0 {
            return Err(AdapterErrorKind::InvalidData);
        }
        if let Some(power) = self.current_power_w {
            if !power.is_finite() || power < 0.0 {
                return Err(AdapterErrorKind::InvalidData);
            }
        }
        if let Some(total) = self.total_energy_kwh {
            if !total.is_finite() || total < 0.0 {
                return Err(AdapterErrorKind::InvalidData);
            }
        }
        if let Some(grid) = self.grid_injection_power_w {
            if !grid.is_finite() {
                return Err(AdapterErrorKind::InvalidData);
            }
        }
        if self.timezone.is_empty() || !self.timezone.contains('/') {
            return Err(AdapterErrorKind::InvalidData);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedAlarm {
    pub vendor_alarm_code: String,
    pub device_sn: Option<String>,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
    pub is_active: bool,
    pub severity: AlertSeverity,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_summary() -> NormalizedSummary {
        NormalizedSummary {
            current_power_w: Some(4500.0),
            today_energy_kwh: 28.5,
            total_energy_kwh: Some(1200.0),
            grid_injection_power_w: None,
            last_seen_at: Utc::now(),
            source_sampled_at: Utc::now(),
            timezone: "America/Sao_Paulo".into(),
        }
    }

    #[test]
    fn rejects_negative_energy() {
        let mut summary = base_summary();
        summary.today_energy_kwh = -1.0;
        assert_eq!(summary.validate(), Err(AdapterErrorKind::InvalidData));
    }

    #[test]
    fn rejects_non_finite_energy() {
        let mut summary = base_summary();
        summary.today_energy_kwh = f64::NAN;
        assert_eq!(summary.validate(), Err(AdapterErrorKind::InvalidData));
    }

    #[test]
    fn allows_negative_grid_injection() {
        let mut summary = base_summary();
        summary.grid_injection_power_w = Some(-300.0);
        assert!(summary.validate().is_ok());
    }

    #[test]
    fn rejects_empty_or_fixed_offset_timezone() {
        let mut summary = base_summary();
        summary.timezone = "".into();
        assert_eq!(summary.validate(), Err(AdapterErrorKind::InvalidData));
        summary.timezone = "+03:00".into();
        assert_eq!(summary.validate(), Err(AdapterErrorKind::InvalidData));
    }
}
