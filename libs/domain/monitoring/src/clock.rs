// [libs/domain/monitoring/src/clock.rs]
use chrono::{DateTime, Utc};

/// Injectable time source (spec.md §2 Clock). Production code uses
/// `SystemClock`; tests use a fixed or steppable implementation so that
/// `hoursSince(last_seen_at)` boundaries (StatusEvaluator §4.5) are
/// deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
