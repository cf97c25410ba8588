// [libs/infra/db/src/client.rs]
/*!
 * Connection bootstrap, following the same shape regardless of
 * target: a local file, a `:memory:` database (tests), or a remote
 * libsql/Turso cluster. Memory-mode databases need one connection kept
 * open for the lifetime of the client or SQLite reclaims the schema
 * the instant the bootstrap connection drops.
 */

use crate::errors::DbError;
use crate::schema::apply_schema;
use libsql::{Builder, Connection, Database};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct TursoClient {
    driver: Arc<Database>,
    _memory_anchor: Option<Arc<Connection>>,
}

impl TursoClient {
    #[instrument(skip(access_token))]
    pub async fn connect(url: &str, access_token: Option<String>) -> Result<Self, DbError> {
        if url.is_empty() {
            return Err(DbError::ConfigurationError("DATABASE_URL is empty".into()));
        }

        info!("\u{1f50c} [DATABASE]: connecting to [{}]", url);

        let is_remote = url.starts_with("libsql://") || url.starts_with("https://");
        let is_memory = url.contains(":memory:") || url.contains("mode=memory");

        let driver = if is_remote {
            let token = access_token.ok_or_else(|| {
                DbError::ConfigurationError("remote DATABASE_URL requires an access token".into())
            })?;
            Builder::new_remote(url.to_string(), token).build().await
        } else {
            Builder::new_local(url).build().await
        }
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        let driver = Arc::new(driver);
        let anchor = if is_memory {
            let conn = driver
                .connect()
                .map_err(|e| DbError::ConnectionError(e.to_string()))?;
            apply_schema(&conn)
                .await
                .map_err(|e| DbError::ConnectionError(e.to_string()))?;
            Some(Arc::new(conn))
        } else {
            let conn = driver
                .connect()
                .map_err(|e| DbError::ConnectionError(e.to_string()))?;
            apply_schema(&conn)
                .await
                .map_err(|e| DbError::ConnectionError(e.to_string()))?;
            None
        };

        Ok(Self {
            driver,
            _memory_anchor: anchor,
        })
    }

    pub fn connection(&self) -> Result<Connection, DbError> {
        self.driver
            .connect()
            .map_err(|e| DbError::ConnectionError(e.to_string()))
    }
}
