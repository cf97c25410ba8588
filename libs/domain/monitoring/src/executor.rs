// [libs/domain/monitoring/src/executor.rs]
/*!
 * PollExecutor (spec.md §4.4) — one plant, one run, lock-to-log. This
 * is the only function in the workspace that touches Store,
 * LockService, VendorAdapter and CredentialVault in the same place;
 * every dependency arrives as a trait object so the whole pipeline
 * runs against fakes in `tests/`.
 *
 * Invariant I5/property P5: exactly one `PollLog` row is written per
 * call, on every exit path, success or failure. The lock is always
 * released on the way out (there is no early `return` that skips it).
 */

use crate::alerts::reconcile_alerts;
use crate::clock::Clock;
use crate::local_day::local_date;
use crate::lock::LockService;
use crate::low_gen::low_gen_level;
use crate::offline::is_offline;
use crate::status::{evaluate_status, StatusInputs};
use crate::store::{Store, StoreError};
use crate::vendor_adapter::{AdapterRegistry, VendorAdapter};
use chrono::Duration;
use solara_domain_models::{
    AdapterErrorKind, AlertSeverity, Brand, IntegrationStatus, JobTicket, JobType, MetricSnapshot,
    PollLog, PollLogStatus,
};
use solara_shared_vault::CredentialVault;
use uuid::Uuid;

/// How far back the backfill sweep reaches: today (D-0) plus the three
/// local dates before it, i.e. `D-3..D-0` (spec.md §4.4 step 11).
const BACKFILL_LOOKBACK_DAYS: i64 = 3;

/// How many historical snapshots feed the low-generation median
/// (spec.md §4.4 step 12).
const LOW_GEN_LOOKBACK_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The full pipeline ran and the plant's status was recomputed.
    Success,
    /// Another live executor already held the lock; this run did
    /// nothing and wrote a SUCCESS log carrying `LOCK_SKIPPED`.
    LockSkipped,
    /// The plant is not `ACTIVE`; this run did nothing.
    IntegrationInactive,
    /// The vendor adapter (or validation of its output) failed. The
    /// PollLog written for this run carries the same `AdapterErrorKind`.
    Failed(AdapterErrorKind),
}

struct RunContext<'a> {
    store: &'a dyn Store,
    lock: &'a dyn LockService,
    adapter: &'a dyn VendorAdapter,
    clock: &'a dyn Clock,
    vault: &'a dyn CredentialVault,
}

/// Runs one poll (or daily-backfill) cycle for `plant_id`. `poll_interval`
/// is the scheduler's cadence `P`; the lease TTL is always `2 * P`
/// (spec.md §4.2/§5) so a hung run never permanently wedges the plant.
#[allow(clippy::too_many_arguments)]
pub async fn run_poll_pipeline(
    store: &dyn Store,
    lock: &dyn LockService,
    adapters: &AdapterRegistry,
    brand: Brand,
    clock: &dyn Clock,
    vault: &dyn CredentialVault,
    plant_id: &str,
    job_type: JobType,
    poll_interval: Duration,
) -> Result<PollOutcome, StoreError> {
    let started_at = clock.now();

    // Step 2: resolve the adapter before the lock is ever touched. A
    // missing registration is not a panic — it is a normal ERROR
    // outcome that still produces exactly one PollLog row.
    let adapter = match adapters.get(brand) {
        Some(adapter) => adapter,
        None => {
            write_log(
                store,
                clock,
                plant_id,
                job_type,
                started_at,
                PollLogStatus::Error,
                Some(AdapterErrorKind::Unknown),
            )
            .await?;
            return Ok(PollOutcome::Failed(AdapterErrorKind::Unknown));
        }
    };

    let ctx = RunContext {
        store,
        lock,
        adapter,
        clock,
        vault,
    };

    let lock_key = JobTicket::poll_id(plant_id);
    let lock_token = Uuid::new_v4().to_string();
    let ttl = poll_interval * 2;

    let acquired = lock
        .acquire(&lock_key, ttl, &lock_token)
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    if !acquired {
        write_log(
            store,
            clock,
            plant_id,
            job_type,
            started_at,
            PollLogStatus::Success,
            Some(AdapterErrorKind::LockSkipped),
        )
        .await?;
        return Ok(PollOutcome::LockSkipped);
    }

    let outcome = run_locked(&ctx, plant_id).await;

    lock.release(&lock_key, &lock_token)
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    let (log_status, adapter_error) = match &outcome {
        Ok(Ok(PollOutcome::Success)) | Ok(Ok(PollOutcome::IntegrationInactive)) => {
            (PollLogStatus::Success, None)
        }
        Ok(Ok(PollOutcome::Failed(kind))) => (PollLogStatus::Error, Some(*kind)),
        Ok(Ok(PollOutcome::LockSkipped)) => unreachable!("handled above"),
        Ok(Err(store_err)) => return Err(clone_store_error(store_err)),
        Err(kind) => (PollLogStatus::Error, Some(*kind)),
    };

    write_log(store, clock, plant_id, job_type, started_at, log_status, adapter_error).await?;

    match outcome {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(store_err)) => Err(store_err),
        Err(kind) => Ok(PollOutcome::Failed(kind)),
    }
}

/// The body of the pipeline once the lock is held. The outer
/// `Result<Result<..>, AdapterErrorKind>` separates two very different
/// failure modes: the inner `Result` is an infra failure (propagated
/// as a hard error), the outer `Err` is a vendor/data failure (folded
/// into a normal `PollLog` row instead of propagated).
async fn run_locked(
    ctx: &RunContext<'_>,
    plant_id: &str,
) -> Result<Result<PollOutcome, StoreError>, AdapterErrorKind> {
    let loaded = match ctx.store.load_plant_with_credential(plant_id).await {
        Ok(Some(pair)) => pair,
        Ok(None) => return Err(AdapterErrorKind::PlantNotFound),
        Err(e) => return Ok(Err(e)),
    };
    let (plant, credential) = loaded;

    if !plant.integration_status.is_active() {
        // I4: non-ACTIVE plants are always GREY. `evaluate_status` short
        // circuits on `integration_status` before looking at anything
        // else, so the other inputs here are irrelevant placeholders.
        let status = evaluate_status(&StatusInputs {
            integration_status: plant.integration_status,
            now: ctx.clock.now(),
            last_seen_at: None,
            active_critical_alert_count: 0,
            low_gen_level: crate::low_gen::LowGenLevel::None,
        });
        if let Err(e) = ctx.store.set_status(plant_id, status).await {
            return Ok(Err(e));
        }
        return Ok(Ok(PollOutcome::IntegrationInactive));
    }

    // Wrapped so the plaintext is overwritten the moment this scope
    // ends, on every return path below, success or failure alike
    // (spec.md credential-handling invariant).
    let decrypted = match ctx.vault.decrypt(&credential.encrypted_blob) {
        Ok(bytes) => zeroize::Zeroizing::new(bytes),
        Err(_) => {
            if let Err(e) = ctx
                .store
                .set_integration_status(plant_id, IntegrationStatus::PausedAuthError)
                .await
            {
                return Ok(Err(e));
            }
            return Err(AdapterErrorKind::AuthFailed);
        }
    };

    let summary = match ctx
        .adapter
        .get_plant_summary(&plant.vendor_plant_id, &decrypted)
        .await
    {
        Ok(summary) => summary,
        Err(AdapterErrorKind::AuthFailed) => {
            if let Err(e) = ctx
                .store
                .set_integration_status(plant_id, IntegrationStatus::PausedAuthError)
                .await
            {
                return Ok(Err(e));
            }
            return Err(AdapterErrorKind::AuthFailed);
        }
        Err(kind) => return Err(kind),
    };

    if let Err(kind) = summary.validate() {
        return Err(kind);
    }

    let today = match local_date(summary.last_seen_at, &plant.timezone) {
        Some(date) => date,
        None => return Err(AdapterErrorKind::InvalidData),
    };

    let snapshot = MetricSnapshot {
        plant_id: plant_id.to_string(),
        date: today,
        timezone: plant.timezone.clone(),
        today_energy_kwh: summary.today_energy_kwh,
        current_power_w: summary.current_power_w,
        grid_injection_power_w: summary.grid_injection_power_w,
        total_energy_kwh: summary.total_energy_kwh,
        last_seen_at: summary.last_seen_at,
        source_sampled_at: summary.source_sampled_at,
    };
    if let Err(e) = ctx.store.upsert_snapshot(&snapshot).await {
        return Ok(Err(e));
    }

    let capabilities = ctx.adapter.capabilities();

    if capabilities.supports_daily_series {
        let candidate_dates: Vec<_> = (0..=BACKFILL_LOOKBACK_DAYS)
            .map(|offset| today - chrono::Duration::days(offset))
            .collect();

        let mut missing_dates = Vec::new();
        for date in &candidate_dates {
            match ctx.store.get_snapshot(plant_id, *date).await {
                Ok(None) => missing_dates.push(*date),
                Ok(Some(_)) => {}
                Err(e) => return Ok(Err(e)),
            }
        }

        if let (Some(&first_missing), Some(&last_missing)) =
            (missing_dates.iter().min(), missing_dates.iter().max())
        {
            match ctx
                .adapter
                .get_daily_energy_series(&plant.vendor_plant_id, &decrypted, first_missing, last_missing)
                .await
            {
                Ok(points) => {
                    let now = ctx.clock.now();
                    for point in points {
                        if !missing_dates.contains(&point.date) {
                            continue;
                        }
                        let backfill = MetricSnapshot {
                            plant_id: plant_id.to_string(),
                            date: point.date,
                            timezone: plant.timezone.clone(),
                            today_energy_kwh: point.energy_kwh,
                            current_power_w: None,
                            grid_injection_power_w: None,
                            total_energy_kwh: None,
                            last_seen_at: now,
                            source_sampled_at: now,
                        };
                        if let Err(e) = ctx.store.insert_snapshot_if_absent(&backfill).await {
                            return Ok(Err(e));
                        }
                    }
                }
                Err(kind) if kind.is_retryable() => return Err(kind),
                Err(_) => {
                    // Non-retryable failure of an optional sweep must not
                    // sink an otherwise healthy poll (spec.md §9).
                }
            }
        }
    }

    let mut alarms = Vec::new();
    if capabilities.supports_alarms {
        let since = ctx.clock.now() - chrono::Duration::days(1);
        match ctx
            .adapter
            .get_alarms_since(&plant.vendor_plant_id, &decrypted, since)
            .await
        {
            Ok(found) => alarms = found,
            Err(kind) if kind.is_retryable() => return Err(kind),
            Err(_) => {}
        }
    }

    let offline = is_offline(ctx.clock.now(), summary.last_seen_at);

    let historical = match ctx
        .store
        .recent_snapshots_before(plant_id, today, LOW_GEN_LOOKBACK_DAYS as usize)
        .await
    {
        Ok(rows) => rows,
        Err(e) => return Ok(Err(e)),
    };
    let energies: Vec<f64> = historical.iter().map(|s| s.today_energy_kwh).collect();
    let low_gen = low_gen_level(summary.today_energy_kwh, &energies);

    let now = ctx.clock.now();
    if let Err(e) = reconcile_alerts(ctx.store, plant_id, now, &alarms, offline, low_gen).await {
        return Ok(Err(e));
    }

    let open_alerts = match ctx.store.active_alerts_for_plant(plant_id).await {
        Ok(list) => list,
        Err(e) => return Ok(Err(e)),
    };
    let critical_count = open_alerts
        .iter()
        .filter(|a| a.severity == AlertSeverity::Critical)
        .count();

    let status = evaluate_status(&StatusInputs {
        integration_status: plant.integration_status,
        now,
        last_seen_at: Some(summary.last_seen_at),
        active_critical_alert_count: critical_count,
        low_gen_level: low_gen.unwrap_or(crate::low_gen::LowGenLevel::None),
    });

    if let Err(e) = ctx.store.set_status(plant_id, status).await {
        return Ok(Err(e));
    }

    Ok(Ok(PollOutcome::Success))
}

async fn write_log(
    store: &dyn Store,
    clock: &dyn Clock,
    plant_id: &str,
    job_type: JobType,
    started_at: chrono::DateTime<chrono::Utc>,
    status: PollLogStatus,
    adapter_error_type: Option<AdapterErrorKind>,
) -> Result<(), StoreError> {
    let finished_at = clock.now();
    let log = PollLog {
        id: Uuid::new_v4().to_string(),
        plant_id: plant_id.to_string(),
        job_type,
        status,
        duration_ms: (finished_at - started_at).num_milliseconds().max(0),
        adapter_error_type,
        http_status: None,
        started_at,
        finished_at,
    };
    store.insert_poll_log(&log).await
}

fn clone_store_error(e: &StoreError) -> StoreError {
    match e {
        StoreError::Connection(s) => StoreError::Connection(s.clone()),
        StoreError::Query(s) => StoreError::Query(s.clone()),
        StoreError::NotFound(s) => StoreError::NotFound(s.clone()),
        StoreError::Conflict(s) => StoreError::Conflict(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use solara_domain_models::{
        Alert, AlertDedupKey, Brand, Capabilities, Credential, DailyEnergyPoint, IntegrationStatus,
        NormalizedAlarm, NormalizedSummary, Plant, Status, TestResult,
    };
    use std::sync::Mutex;

    struct FixedClock(DateTime<Utc>);
    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    struct NullVault;
    impl CredentialVault for NullVault {
        fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, solara_shared_vault::VaultError> {
            Ok(blob.to_vec())
        }
        fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, solara_shared_vault::VaultError> {
            Ok(plaintext.to_vec())
        }
    }

    struct AlwaysAcquireLock;
    #[async_trait]
    impl LockService for AlwaysAcquireLock {
        async fn acquire(
            &self,
            _key: &str,
            _ttl: Duration,
            _token: &str,
        ) -> Result<bool, crate::lock::LockError> {
            Ok(true)
        }
        async fn release(&self, _key: &str, _token: &str) -> Result<(), crate::lock::LockError> {
            Ok(())
        }
    }

    struct NeverAcquireLock;
    #[async_trait]
    impl LockService for NeverAcquireLock {
        async fn acquire(
            &self,
            _key: &str,
            _ttl: Duration,
            _token: &str,
        ) -> Result<bool, crate::lock::LockError> {
            Ok(false)
        }
        async fn release(&self, _key: &str, _token: &str) -> Result<(), crate::lock::LockError> {
            Ok(())
        }
    }

    struct HappyAdapter {
        last_seen_at: DateTime<Utc>,
    }
    #[async_trait]
    impl VendorAdapter for HappyAdapter {
        async fn test_connection(&self, _c: &[u8]) -> Result<TestResult, AdapterErrorKind> {
            Ok(TestResult::Ok)
        }
        async fn get_plant_summary(
            &self,
            _vendor_plant_id: &str,
            _c: &[u8],
        ) -> Result<NormalizedSummary, AdapterErrorKind> {
            Ok(NormalizedSummary {
                current_power_w: Some(3000.0),
                today_energy_kwh: 18.0,
                total_energy_kwh: Some(900.0),
                grid_injection_power_w: None,
                last_seen_at: self.last_seen_at,
                source_sampled_at: self.last_seen_at,
                timezone: "America/Sao_Paulo".into(),
            })
        }
        async fn get_daily_energy_series(
            &self,
            _vendor_plant_id: &str,
            _c: &[u8],
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<DailyEnergyPoint>, AdapterErrorKind> {
            Ok(vec![])
        }
        async fn get_alarms_since(
            &self,
            _vendor_plant_id: &str,
            _c: &[u8],
            _since: DateTime<Utc>,
        ) -> Result<Vec<NormalizedAlarm>, AdapterErrorKind> {
            Ok(vec![])
        }
        fn capabilities(&self) -> Capabilities {
            Capabilities {
                brand: Brand::Solis,
                max_concurrent: 4,
                max_per_minute: 60,
                min_interval_sec: 60,
                supports_daily_series: true,
                supports_alarms: true,
                supports_device_list: false,
            }
        }
    }

    struct AuthFailingAdapter;
    #[async_trait]
    impl VendorAdapter for AuthFailingAdapter {
        async fn test_connection(&self, _c: &[u8]) -> Result<TestResult, AdapterErrorKind> {
            Err(AdapterErrorKind::AuthFailed)
        }
        async fn get_plant_summary(
            &self,
            _vendor_plant_id: &str,
            _c: &[u8],
        ) -> Result<NormalizedSummary, AdapterErrorKind> {
            Err(AdapterErrorKind::AuthFailed)
        }
        async fn get_daily_energy_series(
            &self,
            _vendor_plant_id: &str,
            _c: &[u8],
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<DailyEnergyPoint>, AdapterErrorKind> {
            Ok(vec![])
        }
        async fn get_alarms_since(
            &self,
            _vendor_plant_id: &str,
            _c: &[u8],
            _since: DateTime<Utc>,
        ) -> Result<Vec<NormalizedAlarm>, AdapterErrorKind> {
            Ok(vec![])
        }
        fn capabilities(&self) -> Capabilities {
            Capabilities {
                brand: Brand::Solis,
                max_concurrent: 1,
                max_per_minute: 10,
                min_interval_sec: 60,
                supports_daily_series: false,
                supports_alarms: false,
                supports_device_list: false,
            }
        }
    }

    #[derive(Default)]
    struct FakeStore {
        plant: Mutex<Option<(Plant, Credential)>>,
        snapshots: Mutex<Vec<MetricSnapshot>>,
        alerts: Mutex<Vec<Alert>>,
        logs: Mutex<Vec<PollLog>>,
        integration_status: Mutex<Option<IntegrationStatus>>,
        status: Mutex<Option<Status>>,
    }

    #[async_trait]
    impl Store for FakeStore {
        async fn load_plant_with_credential(
            &self,
            _plant_id: &str,
        ) -> Result<Option<(Plant, Credential)>, StoreError> {
            Ok(self.plant.lock().unwrap().clone())
        }
        async fn active_plants(&self) -> Result<Vec<Plant>, StoreError> {
            unimplemented!()
        }
        async fn set_integration_status(
            &self,
            _plant_id: &str,
            status: IntegrationStatus,
        ) -> Result<(), StoreError> {
            *self.integration_status.lock().unwrap() = Some(status);
            Ok(())
        }
        async fn set_status(&self, _plant_id: &str, status: Status) -> Result<(), StoreError> {
            *self.status.lock().unwrap() = Some(status);
            Ok(())
        }
        async fn upsert_snapshot(&self, snapshot: &MetricSnapshot) -> Result<(), StoreError> {
            self.snapshots.lock().unwrap().push(snapshot.clone());
            Ok(())
        }
        async fn insert_snapshot_if_absent(
            &self,
            snapshot: &MetricSnapshot,
        ) -> Result<bool, StoreError> {
            let mut guard = self.snapshots.lock().unwrap();
            if guard.iter().any(|s| s.date == snapshot.date) {
                return Ok(false);
            }
            guard.push(snapshot.clone());
            Ok(true)
        }
        async fn get_snapshot(
            &self,
            _plant_id: &str,
            date: NaiveDate,
        ) -> Result<Option<MetricSnapshot>, StoreError> {
            Ok(self
                .snapshots
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.date == date)
                .cloned())
        }
        async fn recent_snapshots_before(
            &self,
            _plant_id: &str,
            before_date: NaiveDate,
            limit: usize,
        ) -> Result<Vec<MetricSnapshot>, StoreError> {
            let mut rows: Vec<_> = self
                .snapshots
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.date < before_date)
                .cloned()
                .collect();
            rows.truncate(limit);
            Ok(rows)
        }
        async fn active_alerts_for_plant(&self, plant_id: &str) -> Result<Vec<Alert>, StoreError> {
            Ok(self
                .alerts
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.plant_id == plant_id && a.is_open())
                .cloned()
                .collect())
        }
        async fn find_open_alert(&self, key: &AlertDedupKey) -> Result<Option<Alert>, StoreError> {
            Ok(self
                .alerts
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.is_open() && a.dedup_key() == *key)
                .cloned())
        }
        async fn insert_alert(&self, alert: &Alert) -> Result<(), StoreError> {
            self.alerts.lock().unwrap().push(alert.clone());
            Ok(())
        }
        async fn update_alert(&self, alert: &Alert) -> Result<(), StoreError> {
            let mut guard = self.alerts.lock().unwrap();
            if let Some(existing) = guard.iter_mut().find(|a| a.id == alert.id) {
                *existing = alert.clone();
            }
            Ok(())
        }
        async fn insert_poll_log(&self, log: &PollLog) -> Result<(), StoreError> {
            self.logs.lock().unwrap().push(log.clone());
            Ok(())
        }
    }

    fn registry_with(brand: Brand, adapter: impl VendorAdapter + 'static) -> AdapterRegistry {
        let mut registry = AdapterRegistry::new();
        registry.register(brand, Box::new(adapter));
        registry
    }

    fn plant_and_credential(last_seen_at: DateTime<Utc>) -> (Plant, Credential) {
        let _ = last_seen_at;
        (
            Plant {
                id: "p1".into(),
                brand: Brand::Solis,
                timezone: "America/Sao_Paulo".into(),
                integration_status: IntegrationStatus::Active,
                status: Status::Green,
                alerts_silenced_until: None,
                owner_customer_id: None,
                vendor_plant_id: "vendor-p1".into(),
                installed_capacity_w: Some(5000.0),
            },
            Credential {
                plant_id: "p1".into(),
                brand: Brand::Solis,
                encrypted_blob: b"plaintext-stand-in".to_vec(),
                key_version: 1,
            },
        )
    }

    #[tokio::test]
    async fn scenario_s1_cold_start_green() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 15, 0, 0).unwrap();
        let store = FakeStore::default();
        *store.plant.lock().unwrap() = Some(plant_and_credential(now));

        let registry = registry_with(Brand::Solis, HappyAdapter { last_seen_at: now });
        let outcome = run_poll_pipeline(
            &store,
            &AlwaysAcquireLock,
            &registry,
            Brand::Solis,
            &FixedClock(now),
            &NullVault,
            "p1",
            JobType::Poll,
            Duration::seconds(300),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Success);
        assert_eq!(store.status.lock().unwrap().unwrap(), Status::Green);
        assert_eq!(store.logs.lock().unwrap().len(), 1);
        assert_eq!(store.logs.lock().unwrap()[0].status, PollLogStatus::Success);
    }

    #[tokio::test]
    async fn lock_already_held_writes_success_log_with_lock_skipped() {
        let now = Utc::now();
        let store = FakeStore::default();

        let registry = registry_with(Brand::Solis, HappyAdapter { last_seen_at: now });
        let outcome = run_poll_pipeline(
            &store,
            &NeverAcquireLock,
            &registry,
            Brand::Solis,
            &FixedClock(now),
            &NullVault,
            "p1",
            JobType::Poll,
            Duration::seconds(300),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::LockSkipped);
        let logs = store.logs.lock().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, PollLogStatus::Success);
        assert_eq!(logs[0].adapter_error_type, Some(AdapterErrorKind::LockSkipped));
    }

    #[tokio::test]
    async fn auth_failure_pauses_plant_and_logs_error() {
        let now = Utc::now();
        let store = FakeStore::default();
        *store.plant.lock().unwrap() = Some(plant_and_credential(now));

        let registry = registry_with(Brand::Solis, AuthFailingAdapter);
        let outcome = run_poll_pipeline(
            &store,
            &AlwaysAcquireLock,
            &registry,
            Brand::Solis,
            &FixedClock(now),
            &NullVault,
            "p1",
            JobType::Poll,
            Duration::seconds(300),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Failed(AdapterErrorKind::AuthFailed));
        assert_eq!(
            store.integration_status.lock().unwrap().unwrap(),
            IntegrationStatus::PausedAuthError
        );
        let logs = store.logs.lock().unwrap();
        assert_eq!(logs[0].status, PollLogStatus::Error);
        assert_eq!(logs[0].adapter_error_type, Some(AdapterErrorKind::AuthFailed));
    }

    #[tokio::test]
    async fn paused_plant_is_skipped_without_touching_the_adapter() {
        let now = Utc::now();
        let store = FakeStore::default();
        let (mut plant, credential) = plant_and_credential(now);
        plant.integration_status = IntegrationStatus::PausedManual;
        *store.plant.lock().unwrap() = Some((plant, credential));

        let registry = registry_with(Brand::Solis, AuthFailingAdapter);
        let outcome = run_poll_pipeline(
            &store,
            &AlwaysAcquireLock,
            &registry,
            Brand::Solis,
            &FixedClock(now),
            &NullVault,
            "p1",
            JobType::Poll,
            Duration::seconds(300),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::IntegrationInactive);
        assert_eq!(store.status.lock().unwrap().unwrap(), Status::Grey);
    }

    #[tokio::test]
    async fn missing_adapter_for_brand_still_writes_a_poll_log() {
        let now = Utc::now();
        let store = FakeStore::default();
        *store.plant.lock().unwrap() = Some(plant_and_credential(now));
        let registry = AdapterRegistry::new();

        let outcome = run_poll_pipeline(
            &store,
            &AlwaysAcquireLock,
            &registry,
            Brand::Solis,
            &FixedClock(now),
            &NullVault,
            "p1",
            JobType::Poll,
            Duration::seconds(300),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Failed(AdapterErrorKind::Unknown));
        let logs = store.logs.lock().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, PollLogStatus::Error);
        assert_eq!(logs[0].adapter_error_type, Some(AdapterErrorKind::Unknown));
    }
}
