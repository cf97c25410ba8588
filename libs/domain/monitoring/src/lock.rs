// [libs/domain/monitoring/src/lock.rs]
/*!
 * Distributed mutual exclusion contract (spec.md §2 LockService, I6).
 * Acquire-if-absent with a TTL; release-if-owner so a job can never
 * release a lease it does not hold (e.g. after its own lease already
 * expired and was reclaimed by another executor).
 */

use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("[LOCK_BACKEND_FAULT]: {0}")]
    Backend(String),
}

#[async_trait]
pub trait LockService: Send + Sync {
    /// Attempts to acquire `key` with the given TTL and caller token.
    /// Returns `true` if this call acquired (or already owned) the
    /// lease, `false` if another live token holds it.
    async fn acquire(&self, key: &str, ttl: Duration, token: &str) -> Result<bool, LockError>;

    /// Releases `key` only if `token` is the current holder; a no-op
    /// (not an error) if the lease already expired or is held by
    /// someone else.
    async fn release(&self, key: &str, token: &str) -> Result<(), LockError>;
}
