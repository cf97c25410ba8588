// [libs/infra/vendor-adapter/src/mock.rs]
//! `MockAdapter`: backs `VendorAdapter` with a brand-specific fixture
//! document instead of a live vendor API. Holds no `reqwest::Client` at
//! all — there is no field through which network I/O could even be
//! attempted, which is how "mock mode forbids network I/O" is enforced
//! at the type level rather than by a runtime flag inside the adapter.

use crate::fixture::FixtureDocument;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use solara_domain_models::{
    AdapterErrorKind, Brand, Capabilities, DailyEnergyPoint, NormalizedAlarm, NormalizedSummary,
    TestResult,
};
use solara_domain_monitoring::VendorAdapter;
use tracing::instrument;

use crate::capabilities::capabilities_for;

pub struct MockAdapter {
    brand: Brand,
    fixture: FixtureDocument,
}

impl MockAdapter {
    pub fn new(brand: Brand, fixture: FixtureDocument) -> Self {
        Self { brand, fixture }
    }

    /// Parses a fixture straight from its JSON text, as loaded from
    /// `fixtures/<brand>.json`. Kept separate from `new` so tests can
    /// build a `MockAdapter` from an inline string.
    pub fn from_json(brand: Brand, json: &str) -> Result<Self, serde_json::Error> {
        let fixture: FixtureDocument = serde_json::from_str(json)?;
        Ok(Self::new(brand, fixture))
    }
}

#[async_trait]
impl VendorAdapter for MockAdapter {
    #[instrument(skip(self, _credentials))]
    async fn test_connection(&self, _credentials: &[u8]) -> Result<TestResult, AdapterErrorKind> {
        Ok(TestResult::Ok)
    }

    #[instrument(skip(self, _credentials))]
    async fn get_plant_summary(
        &self,
        _vendor_plant_id: &str,
        _credentials: &[u8],
    ) -> Result<NormalizedSummary, AdapterErrorKind> {
        Ok(self.fixture.plant_summary.clone().into())
    }

    #[instrument(skip(self, _credentials))]
    async fn get_daily_energy_series(
        &self,
        _vendor_plant_id: &str,
        _credentials: &[u8],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyEnergyPoint>, AdapterErrorKind> {
        Ok(self
            .fixture
            .daily_series
            .iter()
            .cloned()
            .map(DailyEnergyPoint::from)
            .filter(|point| point.date >= start_date && point.date <= end_date)
            .collect())
    }

    #[instrument(skip(self, _credentials))]
    async fn get_alarms_since(
        &self,
        _vendor_plant_id: &str,
        _credentials: &[u8],
        since: DateTime<Utc>,
    ) -> Result<Vec<NormalizedAlarm>, AdapterErrorKind> {
        Ok(self
            .fixture
            .alarms
            .iter()
            .cloned()
            .map(NormalizedAlarm::from)
            .filter(|alarm| alarm.occurred_at >= since)
            .collect())
    }

    fn capabilities(&self) -> Capabilities {
        capabilities_for(self.brand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLIS_FIXTURE: &str = r#"{
        "plant_summary": {
            "currentPowerW": 4200.0,
            "todayEnergyKWh": 18.4,
            "totalEnergyKWh": 990.5,
            "gridInjectionPowerW": -120.0,
            "lastSeenAt": "2026-03-01T12:00:00Z",
            "sourceSampledAt": "2026-03-01T12:00:00Z",
            "timezone": "America/Sao_Paulo"
        },
        "daily_series": [
            {"date": "2026-02-27", "energyKWh": 12.1},
            {"date": "2026-02-28", "energyKWh": 14.0}
        ],
        "alarms": [
            {
                "vendorAlarmCode": "E001",
                "deviceSn": "SN-1",
                "message": "Grid fault",
                "occurredAt": "2026-03-01T08:00:00Z",
                "isActive": true,
                "severity": "HIGH"
            }
        ]
    }"#;

    #[tokio::test]
    async fn summary_round_trips_through_fixture_fields() {
        let adapter = MockAdapter::from_json(Brand::Solis, SOLIS_FIXTURE).unwrap();
        let summary = adapter.get_plant_summary("vendor-1", &[]).await.unwrap();
        assert_eq!(summary.today_energy_kwh, 18.4);
        assert_eq!(summary.grid_injection_power_w, Some(-120.0));
        assert_eq!(summary.timezone, "America/Sao_Paulo");
    }

    #[tokio::test]
    async fn daily_series_is_filtered_to_the_requested_window() {
        let adapter = MockAdapter::from_json(Brand::Solis, SOLIS_FIXTURE).unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        let series = adapter
            .get_daily_energy_series("vendor-1", &[], start, end)
            .await
            .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].energy_kwh, 14.0);
    }

    #[tokio::test]
    async fn alarms_are_filtered_by_since() {
        let adapter = MockAdapter::from_json(Brand::Solis, SOLIS_FIXTURE).unwrap();
        let since = DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let alarms = adapter.get_alarms_since("vendor-1", &[], since).await.unwrap();
        assert!(alarms.is_empty());
    }
}
