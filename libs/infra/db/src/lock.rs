// [libs/infra/db/src/lock.rs]
/*!
 * `LockService` backed by a plain lease table instead of Redis — no
 * Redis client exists anywhere in this workspace's dependency stack,
 * so the same zombie-reclaim shape the job repository uses
 * (UPDATE-then-INSERT, expired leases are fair game for a new owner)
 * is reused here instead of introducing a dependency nothing else
 * needs.
 */

use crate::client::TursoClient;
use async_trait::async_trait;
use libsql::params;
use solara_domain_monitoring::{LockError, LockService};

pub struct LeaseLockService {
    client: TursoClient,
}

impl LeaseLockService {
    pub fn new(client: TursoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LockService for LeaseLockService {
    async fn acquire(
        &self,
        key: &str,
        ttl: chrono::Duration,
        token: &str,
    ) -> Result<bool, LockError> {
        let conn = self
            .client
            .connection()
            .map_err(|e| LockError::Backend(e.to_string()))?;
        let ttl_secs = ttl.num_seconds().max(1);

        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO locks (key, token, expires_at)
                 VALUES (?1, ?2, datetime('now', '+' || ?3 || ' seconds'))",
                params![key, token, ttl_secs],
            )
            .await
            .map_err(|e| LockError::Backend(e.to_string()))?;
        if inserted > 0 {
            return Ok(true);
        }

        let reclaimed = conn
            .execute(
                "UPDATE locks SET token = ?2, expires_at = datetime('now', '+' || ?3 || ' seconds')
                 WHERE key = ?1 AND expires_at < CURRENT_TIMESTAMP",
                params![key, token, ttl_secs],
            )
            .await
            .map_err(|e| LockError::Backend(e.to_string()))?;
        if reclaimed > 0 {
            return Ok(true);
        }

        let renewed = conn
            .execute(
                "UPDATE locks SET expires_at = datetime('now', '+' || ?3 || ' seconds')
                 WHERE key = ?1 AND token = ?2 AND expires_at >= CURRENT_TIMESTAMP",
                params![key, token, ttl_secs],
            )
            .await
            .map_err(|e| LockError::Backend(e.to_string()))?;

        Ok(renewed > 0)
    }

    async fn release(&self, key: &str, token: &str) -> Result<(), LockError> {
        let conn = self
            .client
            .connection()
            .map_err(|e| LockError::Backend(e.to_string()))?;
        conn.execute(
            "DELETE FROM locks WHERE key = ?1 AND token = ?2",
            params![key, token],
        )
        .await
        .map_err(|e| LockError::Backend(e.to_string()))?;
        Ok(())
    }
}
