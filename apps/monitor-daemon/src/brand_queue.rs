// [apps/monitor-daemon/src/brand_queue.rs]
/*!
 * BrandQueue (spec.md §4.3): one per brand, bounded by `Capabilities`.
 * Owns the worker pool, the token-bucket limiter, the retry/backoff
 * policy, and terminal-ticket retention for observability.
 */

use crate::backoff::next_delay;
use crate::executor_runner::ExecutorRunner;
use crate::rate_limiter::SlidingWindowLimiter;
use solara_domain_models::{AdapterErrorKind, Brand, Capabilities, JobTicket, JobType};
use solara_domain_monitoring::PollOutcome;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, instrument, warn};

const SUCCESS_RETENTION: usize = 100;
const FAILED_RETENTION: usize = 50;

#[derive(Debug, Clone)]
pub struct TicketRecord {
    pub ticket_id: String,
    pub plant_id: String,
    pub outcome: TerminalOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TerminalOutcome {
    Success,
    Failed(AdapterErrorKind),
}

struct Retention {
    successful: VecDeque<TicketRecord>,
    failed: VecDeque<TicketRecord>,
}

impl Retention {
    fn new() -> Self {
        Self {
            successful: VecDeque::new(),
            failed: VecDeque::new(),
        }
    }

    fn record(&mut self, record: TicketRecord) {
        let (buffer, cap) = match record.outcome {
            TerminalOutcome::Success => (&mut self.successful, SUCCESS_RETENTION),
            TerminalOutcome::Failed(_) => (&mut self.failed, FAILED_RETENTION),
        };
        buffer.push_back(record);
        while buffer.len() > cap {
            buffer.pop_front();
        }
    }
}

pub struct BrandQueue {
    brand: Brand,
    capabilities: Capabilities,
    concurrency: Arc<Semaphore>,
    limiter: Arc<SlidingWindowLimiter>,
    in_flight: Arc<Mutex<HashSet<String>>>,
    retention: Arc<Mutex<Retention>>,
    runner: Arc<ExecutorRunner>,
    job_timeout: std::time::Duration,
    tasks: JoinSet<()>,
}

impl BrandQueue {
    pub fn new(capabilities: Capabilities, runner: Arc<ExecutorRunner>, job_timeout: std::time::Duration) -> Self {
        Self {
            brand: capabilities.brand,
            concurrency: Arc::new(Semaphore::new(capabilities.max_concurrent)),
            limiter: Arc::new(SlidingWindowLimiter::new(capabilities.max_per_minute)),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            retention: Arc::new(Mutex::new(Retention::new())),
            capabilities,
            runner,
            job_timeout,
            tasks: JoinSet::new(),
        }
    }

    /// Submits a ticket. Dedup-by-id: if the ticket is already pending
    /// or running, the submission is silently dropped (spec.md §4.2/§4.3
    /// — this is the primary deduplication mechanism, not an error).
    #[instrument(skip(self), fields(brand = %self.brand, ticket_id = %ticket.id))]
    pub fn submit(&mut self, ticket: JobTicket, job_type: JobType) {
        {
            let mut in_flight = self.in_flight.lock().unwrap();
            if !in_flight.insert(ticket.id.clone()) {
                info!("🔁 [DEDUP]: ticket {} already in flight, dropping", ticket.id);
                return;
            }
        }

        let concurrency = Arc::clone(&self.concurrency);
        let limiter = Arc::clone(&self.limiter);
        let in_flight = Arc::clone(&self.in_flight);
        let retention = Arc::clone(&self.retention);
        let runner = Arc::clone(&self.runner);
        let job_timeout = self.job_timeout;
        let brand = self.brand;

        self.tasks.spawn(async move {
            limiter.acquire_start_slot().await;
            let _permit = concurrency.acquire().await.expect("semaphore never closes");

            let outcome = run_with_retries(&runner, &ticket, job_type, brand, job_timeout).await;

            retention.lock().unwrap().record(TicketRecord {
                ticket_id: ticket.id.clone(),
                plant_id: ticket.plant_id.clone(),
                outcome,
            });
            in_flight.lock().unwrap().remove(&ticket.id);
        });
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Waits for every in-flight job up to `deadline`; any task still
    /// running past that point is abandoned (spec.md §5 shutdown —
    /// locks still release because `run_poll_pipeline` always releases
    /// on its own exit paths before this deadline would ever fire in
    /// practice).
    pub async fn drain(&mut self, deadline: std::time::Duration) {
        let drained = tokio::time::timeout(deadline, async {
            while self.tasks.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            warn!(brand = %self.brand, "⏱️ [DRAIN_TIMEOUT]: BrandQueue did not drain before shutdown deadline");
        }
    }
}

async fn run_with_retries(
    runner: &ExecutorRunner,
    ticket: &JobTicket,
    job_type: JobType,
    brand: Brand,
    job_timeout: std::time::Duration,
) -> TerminalOutcome {
    let max_attempts = 2u32;
    let mut attempt = 1u32;

    loop {
        let attempt_result = tokio::time::timeout(
            job_timeout,
            runner.run(&ticket.plant_id, brand, job_type),
        )
        .await;

        let outcome = match attempt_result {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(store_error)) => {
                error!(plant_id = %ticket.plant_id, error = %store_error, "💥 [STORE_FAULT]: infra failure during poll");
                return TerminalOutcome::Failed(AdapterErrorKind::Unknown);
            }
            Err(_elapsed) => {
                warn!(plant_id = %ticket.plant_id, "⏱️ [JOB_TIMEOUT]: exceeded job budget, treating as NETWORK_TIMEOUT");
                PollOutcome::Failed(AdapterErrorKind::NetworkTimeout)
            }
        };

        match outcome {
            PollOutcome::Success | PollOutcome::LockSkipped | PollOutcome::IntegrationInactive => {
                return TerminalOutcome::Success;
            }
            PollOutcome::Failed(kind) => {
                if !kind.is_retryable() || attempt >= max_attempts {
                    return TerminalOutcome::Failed(kind);
                }
                let delay = next_delay(attempt, &kind);
                attempt += 1;
                tokio::time::sleep(delay).await;
            }
        }
    }
}
