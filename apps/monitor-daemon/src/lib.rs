// [apps/monitor-daemon/src/lib.rs]
/*!
 * =================================================================
 * APARATO: MONITOR DAEMON LIBRARY ROOT (V1.0 - GROUND ZERO)
 * CLASIFICACION: APPLICATION LAYER (ESTRATO L1-APP)
 * RESPONSABILIDAD: COMPOSICION DEL SCHEDULER, BRANDQUEUES Y EJECUCION
 * =================================================================
 */

pub mod backoff;
pub mod brand_queue;
pub mod config;
pub mod executor_runner;
pub mod kernel;
pub mod rate_limiter;
pub mod scheduler;

pub use brand_queue::{BrandQueue, TerminalOutcome, TicketRecord};
pub use config::DaemonConfig;
pub use executor_runner::ExecutorRunner;
pub use kernel::MonitorKernel;
pub use scheduler::Scheduler;
