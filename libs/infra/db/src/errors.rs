// [libs/infra/db/src/errors.rs]
use solara_domain_monitoring::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("[L3_DB_NET_FAULT]: database uplink severed -> {0}")]
    ConnectionError(String),

    #[error("[L3_DB_CONFIG_FAULT]: {0}")]
    ConfigurationError(String),

    #[error("[L3_DB_QUERY_FAULT]: {0}")]
    QueryError(#[from] libsql::Error),

    #[error("[L3_DB_MAPPING_FAULT]: {0}")]
    MappingError(String),
}

/// Collapses this crate's richer taxonomy into the domain's narrow
/// `StoreError`, which is all `solara-domain-monitoring` is allowed to
/// know about.
impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::ConnectionError(s) => StoreError::Connection(s),
            DbError::ConfigurationError(s) => StoreError::Connection(s),
            DbError::QueryError(e) => StoreError::Query(e.to_string()),
            DbError::MappingError(s) => StoreError::Query(s),
        }
    }
}
