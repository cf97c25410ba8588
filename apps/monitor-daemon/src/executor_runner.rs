// [apps/monitor-daemon/src/executor_runner.rs]
//! Supplies the concrete Store/Lock/Adapter/Vault/Clock the pure
//! `run_poll_pipeline` needs, and is the only place in the daemon that
//! knows all five of those types at once.

use chrono::Duration as ChronoDuration;
use solara_domain_models::{Brand, JobType};
use solara_domain_monitoring::{
    run_poll_pipeline, AdapterRegistry, PollOutcome, Store, StoreError, SystemClock,
};
use solara_infra_db::{LeaseLockService, MonitoringRepository};
use solara_shared_vault::AesGcmVault;
use std::sync::Arc;

pub struct ExecutorRunner {
    pub store: Arc<MonitoringRepository>,
    pub lock: Arc<LeaseLockService>,
    pub adapters: Arc<AdapterRegistry>,
    pub vault: Arc<AesGcmVault>,
    pub clock: SystemClock,
    pub poll_interval_secs: i64,
}

impl ExecutorRunner {
    pub async fn run(
        &self,
        plant_id: &str,
        brand: Brand,
        job_type: JobType,
    ) -> Result<PollOutcome, StoreError> {
        run_poll_pipeline(
            self.store.as_ref() as &dyn Store,
            self.lock.as_ref(),
            self.adapters.as_ref(),
            brand,
            &self.clock,
            self.vault.as_ref(),
            plant_id,
            job_type,
            ChronoDuration::seconds(self.poll_interval_secs),
        )
        .await
    }
}
