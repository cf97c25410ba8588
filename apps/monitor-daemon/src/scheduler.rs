// [apps/monitor-daemon/src/scheduler.rs]
/*!
 * Scheduler (spec.md §4.2): fires a first tick within 2s of start,
 * then follows wall-clock at `P`-second intervals. Every tick
 * enumerates `ACTIVE` plants and submits one deterministic JobTicket
 * per plant to that plant's BrandQueue; duplicate submission is
 * absorbed by the ticket id, not by anything the Scheduler tracks.
 */

use crate::brand_queue::BrandQueue;
use solara_domain_models::{Brand, JobTicket, JobType};
use solara_domain_monitoring::{Store, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

const FIRST_TICK_DELAY: Duration = Duration::from_secs(2);

pub struct Scheduler {
    store: Arc<dyn Store>,
    queues: HashMap<Brand, BrandQueue>,
    poll_interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(
        store: Arc<dyn Store>,
        queues: HashMap<Brand, BrandQueue>,
        poll_interval: Duration,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            store,
            queues,
            poll_interval,
            shutdown,
        }
    }

    #[instrument(skip(self))]
    pub async fn run(mut self) -> HashMap<Brand, BrandQueue> {
        tokio::time::sleep(FIRST_TICK_DELAY).await;

        let mut next_tick = Instant::now();
        while !self.shutdown.load(Ordering::SeqCst) {
            if let Err(error) = self.tick().await {
                warn!(error = %error, "⚠️ [SCHEDULER_TICK_FAULT]: plant enumeration failed, will retry next tick");
            }

            next_tick += self.poll_interval;
            let now = Instant::now();
            if next_tick > now {
                tokio::time::sleep(next_tick - now).await;
            } else {
                next_tick = now;
            }
        }

        info!("🛑 [SCHEDULER]: stopped emitting new tickets");
        self.queues
    }

    async fn tick(&mut self) -> Result<(), StoreError> {
        let plants = self.store.active_plants().await?;
        info!(count = plants.len(), "📋 [SCHEDULER_TICK]: enumerated active plants");

        for plant in plants {
            let ticket = JobTicket::new_poll(plant.id.clone(), plant.brand, chrono::Utc::now());
            if let Some(queue) = self.queues.get_mut(&plant.brand) {
                queue.submit(ticket, JobType::Poll);
            } else {
                warn!(brand = %plant.brand, "⚠️ [NO_QUEUE]: no BrandQueue registered for brand");
            }
        }
        Ok(())
    }
}
