// [apps/monitor-daemon/src/kernel.rs]
/*!
 * Composition root (spec.md §6.1 startup sequence): validate config →
 * probe Store → probe LockService → construct AdapterRegistry →
 * construct BrandQueues → start Scheduler. Nothing outside this module
 * knows every concrete type at once.
 */

use crate::brand_queue::BrandQueue;
use crate::config::DaemonConfig;
use crate::executor_runner::ExecutorRunner;
use anyhow::{Context, Result};
use solara_domain_models::Brand;
use solara_domain_monitoring::{AdapterRegistry, Store, SystemClock};
use solara_infra_db::{LeaseLockService, MonitoringRepository, TursoClient};
use solara_infra_vendor_adapter::{capabilities_for, MockAdapter};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

const SOLIS_FIXTURE: &str = include_str!("../../../libs/infra/vendor-adapter/fixtures/solis.json");
const HUAWEI_FIXTURE: &str = include_str!("../../../libs/infra/vendor-adapter/fixtures/huawei.json");
const GOODWE_FIXTURE: &str = include_str!("../../../libs/infra/vendor-adapter/fixtures/goodwe.json");
const DELE_FIXTURE: &str = include_str!("../../../libs/infra/vendor-adapter/fixtures/dele.json");

pub struct MonitorKernel {
    pub store: Arc<dyn Store>,
    pub queues: HashMap<Brand, BrandQueue>,
    pub shutdown: Arc<std::sync::atomic::AtomicBool>,
}

impl MonitorKernel {
    pub async fn ignite(config: &DaemonConfig) -> Result<Self> {
        info!("💠 [KERNEL]: validating configuration");
        let vault = config
            .validate_and_build_vault()
            .context("startup configuration validation failed")?;

        info!("🔌 [KERNEL]: probing Store");
        let client = TursoClient::connect(&config.database_url, config.database_auth_token.clone())
            .await
            .context("FATAL: Store probe failed, aborting ignition")?;
        let repository = Arc::new(MonitoringRepository::new(client.clone()));
        repository
            .active_plants()
            .await
            .context("FATAL: Store probe query failed")?;

        info!("🔒 [KERNEL]: probing LockService");
        let lock = Arc::new(LeaseLockService::new(client));
        lock.acquire("kernel:startup-probe", chrono::Duration::seconds(1), "probe")
            .await
            .context("FATAL: LockService probe failed")?;
        lock.release("kernel:startup-probe", "probe").await.ok();

        info!("🧩 [KERNEL]: constructing AdapterRegistry (mock mode)");
        let mut registry = AdapterRegistry::new();
        registry.register(Brand::Solis, Box::new(MockAdapter::from_json(Brand::Solis, SOLIS_FIXTURE)?));
        registry.register(Brand::Huawei, Box::new(MockAdapter::from_json(Brand::Huawei, HUAWEI_FIXTURE)?));
        registry.register(Brand::Goodwe, Box::new(MockAdapter::from_json(Brand::Goodwe, GOODWE_FIXTURE)?));
        registry.register(Brand::Dele, Box::new(MockAdapter::from_json(Brand::Dele, DELE_FIXTURE)?));
        let adapters = Arc::new(registry);

        info!("🏗️ [KERNEL]: constructing BrandQueues");
        let runner = Arc::new(ExecutorRunner {
            store: Arc::clone(&repository),
            lock: Arc::clone(&lock),
            adapters: Arc::clone(&adapters),
            vault: Arc::new(vault),
            clock: SystemClock,
            poll_interval_secs: config.poll_interval_seconds as i64,
        });

        let mut queues = HashMap::new();
        for brand in Brand::ALL {
            let queue = BrandQueue::new(capabilities_for(brand), Arc::clone(&runner), config.job_timeout());
            queues.insert(brand, queue);
        }

        info!("✅ [KERNEL]: ignition complete, ready for Scheduler");
        Ok(Self {
            store: repository,
            queues,
            shutdown: Arc::new(std::sync::atomic::AtomicBool::new(false)),
        })
    }
}
