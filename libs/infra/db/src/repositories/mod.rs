// [libs/infra/db/src/repositories/mod.rs]
pub mod monitoring_repository;

pub use monitoring_repository::MonitoringRepository;
