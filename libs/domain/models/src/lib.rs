// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: FLEET DOMAIN MODELS (V1.0 - GROUND ZERO)
 * CLASIFICACION: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICION DE CONTRATOS SOBERANOS DE LA FLOTA SOLAR
 *
 * Unico punto de verdad para las entidades de la tabla 3 de la
 * especificacion: Plant, Credential, MetricSnapshot, Alert, PollLog,
 * JobTicket, y el vocabulario compartido de brand/status/adapter-error.
 * No hay I/O ni async en este estrato: solo tipos y reglas puras.
 * =================================================================
 */

pub mod adapter;
pub mod alert;
pub mod brand;
pub mod credential;
pub mod job_ticket;
pub mod plant;
pub mod poll_log;
pub mod snapshot;
pub mod status;

pub use adapter::{
    AdapterErrorKind, Capabilities, DailyEnergyPoint, NormalizedAlarm, NormalizedSummary,
    TestResult,
};
pub use alert::{Alert, AlertSeverity, AlertState, AlertType};
pub use brand::Brand;
pub use credential::Credential;
pub use job_ticket::{JobTicket, JobType};
pub use plant::{IntegrationStatus, Plant};
pub use poll_log::{PollLog, PollLogStatus};
pub use snapshot::MetricSnapshot;
pub use status::Status;
