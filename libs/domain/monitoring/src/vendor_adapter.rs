// [libs/domain/monitoring/src/vendor_adapter.rs]
/*!
 * VendorAdapter contract (spec.md §4.1) and the registry that maps
 * `Brand -> Box<dyn VendorAdapter>` (§2 AdapterRegistry). Mock and live
 * implementations coexist behind this same trait; engaging mock mode
 * is a registry swap in `apps/monitor-daemon`, never a branch inside
 * the executor.
 */

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use solara_domain_models::{
    AdapterErrorKind, Brand, Capabilities, DailyEnergyPoint, NormalizedAlarm, NormalizedSummary,
    TestResult,
};
use std::collections::HashMap;

#[async_trait]
pub trait VendorAdapter: Send + Sync {
    async fn test_connection(&self, credentials: &[u8]) -> Result<TestResult, AdapterErrorKind>;

    async fn get_plant_summary(
        &self,
        vendor_plant_id: &str,
        credentials: &[u8],
    ) -> Result<NormalizedSummary, AdapterErrorKind>;

    async fn get_daily_energy_series(
        &self,
        vendor_plant_id: &str,
        credentials: &[u8],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyEnergyPoint>, AdapterErrorKind>;

    async fn get_alarms_since(
        &self,
        vendor_plant_id: &str,
        credentials: &[u8],
        since: DateTime<Utc>,
    ) -> Result<Vec<NormalizedAlarm>, AdapterErrorKind>;

    fn capabilities(&self) -> Capabilities;
}

/// Maps `brand -> VendorAdapter`. In mock mode every entry is backed by
/// a `MockAdapter`; in live mode every entry is an HTTP-backed adapter.
/// The executor and scheduler only ever see this map, never a brand
/// literal baked into a match arm.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<Brand, Box<dyn VendorAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    pub fn register(&mut self, brand: Brand, adapter: Box<dyn VendorAdapter>) {
        self.adapters.insert(brand, adapter);
    }

    pub fn get(&self, brand: Brand) -> Option<&dyn VendorAdapter> {
        self.adapters.get(&brand).map(|boxed| boxed.as_ref())
    }
}
