// [libs/infra/vendor-adapter/src/fixture.rs]
//! Wire shape of the per-brand fixture documents (spec.md §6.2). These
//! DTOs exist only to be deserialized from `fixtures/*.json` and mapped
//! onto the domain's normalized types — nothing outside `MockAdapter`
//! ever sees a `FixtureDocument`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use solara_domain_models::{AlertSeverity, DailyEnergyPoint, NormalizedAlarm, NormalizedSummary};

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureDocument {
    pub plant_summary: FixtureSummary,
    #[serde(default)]
    pub daily_series: Vec<FixtureDailyPoint>,
    #[serde(default)]
    pub alarms: Vec<FixtureAlarm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSummary {
    #[serde(rename = "currentPowerW")]
    pub current_power_w: Option<f64>,
    #[serde(rename = "todayEnergyKWh")]
    pub today_energy_kwh: f64,
    #[serde(rename = "totalEnergyKWh")]
    pub total_energy_kwh: Option<f64>,
    #[serde(rename = "gridInjectionPowerW")]
    pub grid_injection_power_w: Option<f64>,
    #[serde(rename = "lastSeenAt")]
    pub last_seen_at: DateTime<Utc>,
    #[serde(rename = "sourceSampledAt")]
    pub source_sampled_at: DateTime<Utc>,
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureDailyPoint {
    pub date: NaiveDate,
    #[serde(rename = "energyKWh")]
    pub energy_kwh: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureAlarm {
    #[serde(rename = "vendorAlarmCode")]
    pub vendor_alarm_code: String,
    #[serde(rename = "deviceSn")]
    pub device_sn: Option<String>,
    pub message: String,
    #[serde(rename = "occurredAt")]
    pub occurred_at: DateTime<Utc>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub severity: AlertSeverity,
}

impl From<FixtureSummary> for NormalizedSummary {
    fn from(value: FixtureSummary) -> Self {
        NormalizedSummary {
            current_power_w: value.current_power_w,
            today_energy_kwh: value.today_energy_kwh,
            total_energy_kwh: value.total_energy_kwh,
            grid_injection_power_w: value.grid_injection_power_w,
            last_seen_at: value.last_seen_at,
            source_sampled_at: value.source_sampled_at,
            timezone: value.timezone,
        }
    }
}

impl From<FixtureDailyPoint> for DailyEnergyPoint {
    fn from(value: FixtureDailyPoint) -> Self {
        DailyEnergyPoint {
            date: value.date,
            energy_kwh: value.energy_kwh,
        }
    }
}

impl From<FixtureAlarm> for NormalizedAlarm {
    fn from(value: FixtureAlarm) -> Self {
        NormalizedAlarm {
            vendor_alarm_code: value.vendor_alarm_code,
            device_sn: value.device_sn,
            message: value.message,
            occurred_at: value.occurred_at,
            is_active: value.is_active,
            severity: value.severity,
        }
    }
}
