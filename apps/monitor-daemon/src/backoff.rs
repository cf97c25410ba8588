// [apps/monitor-daemon/src/backoff.rs]
//! Retry backoff policy for a failed job attempt (spec.md §4.3): base
//! 5s, doubling, 0-20% jitter, overridden by `RATE_LIMITED`'s
//! `retryAfter` when present.

use rand::Rng;
use solara_domain_models::AdapterErrorKind;
use std::time::Duration;

const BASE_SECS: u64 = 5;

/// `attempt` is the attempt number that just failed (1 or 2, spec.md
/// caps a ticket at 2 attempts total).
pub fn next_delay(attempt: u32, kind: &AdapterErrorKind) -> Duration {
    let default_secs = BASE_SECS * 2u64.pow(attempt.saturating_sub(1));
    let jittered_default = with_jitter(default_secs);

    if let AdapterErrorKind::RateLimited { retry_after_secs: Some(retry_after) } = kind {
        Duration::from_secs((*retry_after).max(default_secs))
    } else {
        jittered_default
    }
}

fn with_jitter(base_secs: u64) -> Duration {
    let jitter_fraction = rand::thread_rng().gen_range(0.0..0.2);
    let jittered_millis = (base_secs as f64) * (1.0 + jitter_fraction) * 1000.0;
    Duration::from_millis(jittered_millis.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backoff_doubles_and_never_shrinks_below_base() {
        let first = next_delay(1, &AdapterErrorKind::NetworkTimeout);
        let second = next_delay(2, &AdapterErrorKind::NetworkTimeout);
        assert!(first >= Duration::from_secs(5));
        assert!(second >= Duration::from_secs(10));
    }

    #[test]
    fn rate_limited_retry_after_overrides_when_larger_than_default() {
        let delay = next_delay(
            1,
            &AdapterErrorKind::RateLimited { retry_after_secs: Some(30) },
        );
        assert_eq!(delay, Duration::from_secs(30));
    }

    #[test]
    fn rate_limited_retry_after_falls_back_to_default_when_smaller() {
        let delay = next_delay(
            1,
            &AdapterErrorKind::RateLimited { retry_after_secs: Some(1) },
        );
        assert!(delay >= Duration::from_secs(5));
    }
}
