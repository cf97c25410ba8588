// [libs/domain/monitoring/src/lib.rs]
/*!
 * =================================================================
 * APARATO: MONITORING CORE (V1.0 - GROUND ZERO)
 * CLASIFICACION: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PIPELINE DE POLL, EVALUACION DE SALUD Y ALERTAS
 *
 * Todo lo "dificil" de la especificacion vive aqui detras de traits:
 * el pipeline de PollExecutor (§4.4) es una funcion generica sobre
 * Store/LockService/VendorAdapter/Clock, de forma que puede probarse
 * sin base de datos ni red real. La infraestructura concreta
 * (libs/infra/db, libs/infra/vendor-adapter) solo implementa estos
 * contratos.
 * =================================================================
 */

pub mod alerts;
pub mod clock;
pub mod executor;
pub mod local_day;
pub mod lock;
pub mod low_gen;
pub mod offline;
pub mod status;
pub mod store;
pub mod vendor_adapter;

pub use alerts::reconcile_alerts;
pub use clock::{Clock, SystemClock};
pub use executor::{run_poll_pipeline, PollOutcome};
pub use local_day::local_date;
pub use lock::{LockError, LockService};
pub use low_gen::{low_gen_level, LowGenLevel};
pub use offline::is_offline;
pub use status::evaluate_status;
pub use store::{Store, StoreError};
pub use vendor_adapter::{AdapterRegistry, VendorAdapter};
