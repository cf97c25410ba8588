// [libs/infra/db/src/lib.rs]
/*!
 * =================================================================
 * APARATO: MONITORING PERSISTENCE (ESTRATO L3)
 * CLASIFICACION: INFRASTRUCTURE LAYER
 * RESPONSABILIDAD: IMPLEMENTACION CONCRETA DE Store Y LockService
 * SOBRE libSQL
 *
 * El resto del workspace solo ve los traits de
 * `solara_domain_monitoring`; este crate es la unica parte que sabe
 * que hay SQL detras.
 * =================================================================
 */

pub mod client;
pub mod codec;
pub mod errors;
pub mod lock;
pub mod repositories;
pub mod schema;

pub use client::TursoClient;
pub use errors::DbError;
pub use lock::LeaseLockService;
pub use repositories::MonitoringRepository;
