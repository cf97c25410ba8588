// [libs/domain/monitoring/src/offline.rs]
use chrono::{DateTime, Utc};

/// `hoursSince(last_seen_at) > 24` (spec.md §4.4 step 12, strict — 24.0h
/// itself is still "online" and belongs to StatusEvaluator's YELLOW
/// band, not RED).
pub fn is_offline(now: DateTime<Utc>, last_seen_at: DateTime<Utc>) -> bool {
    hours_since(now, last_seen_at) > 24.0
}

pub fn hours_since(now: DateTime<Utc>, instant: DateTime<Utc>) -> f64 {
    (now - instant).num_milliseconds() as f64 / 3_600_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn exactly_24_hours_is_not_offline() {
        let now = Utc::now();
        let last_seen = now - Duration::hours(24);
        assert!(!is_offline(now, last_seen));
    }

    #[test]
    fn just_over_24_hours_is_offline() {
        let now = Utc::now();
        let last_seen = now - Duration::hours(24) - Duration::seconds(1);
        assert!(is_offline(now, last_seen));
    }
}
