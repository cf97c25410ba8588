// [libs/domain/monitoring/src/status.rs]
/*!
 * StatusEvaluator (spec.md §4.5) — a pure function, first-match-wins.
 * Boundary values: 2.0h belongs to YELLOW (inclusive lower bound of the
 * YELLOW band), 24.0h still belongs to YELLOW, not RED (inclusive upper
 * bound); only strictly more than 24h tips into RED.
 */

use crate::low_gen::LowGenLevel;
use crate::offline::hours_since;
use chrono::{DateTime, Utc};
use solara_domain_models::{IntegrationStatus, Status};

pub struct StatusInputs {
    pub integration_status: IntegrationStatus,
    pub now: DateTime<Utc>,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub active_critical_alert_count: usize,
    pub low_gen_level: LowGenLevel,
}

pub fn evaluate_status(inputs: &StatusInputs) -> Status {
    if !inputs.integration_status.is_active() {
        return Status::Grey;
    }

    let hours_since_seen = inputs.last_seen_at.map(|seen| hours_since(inputs.now, seen));

    let is_hard_offline = hours_since_seen.map(|h| h > 24.0).unwrap_or(false);
    if inputs.active_critical_alert_count > 0
        || is_hard_offline
        || inputs.low_gen_level == LowGenLevel::Red
    {
        return Status::Red;
    }

    let is_stale = hours_since_seen.map(|h| (2.0..=24.0).contains(&h)).unwrap_or(false);
    if is_stale || inputs.low_gen_level == LowGenLevel::Yellow {
        return Status::Yellow;
    }

    Status::Green
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn base(now: DateTime<Utc>, last_seen_at: Option<DateTime<Utc>>) -> StatusInputs {
        StatusInputs {
            integration_status: IntegrationStatus::Active,
            now,
            last_seen_at,
            active_critical_alert_count: 0,
            low_gen_level: LowGenLevel::None,
        }
    }

    #[test]
    fn non_active_integration_is_always_grey() {
        let now = Utc::now();
        let mut inputs = base(now, Some(now));
        inputs.integration_status = IntegrationStatus::PausedAuthError;
        assert_eq!(evaluate_status(&inputs), Status::Grey);
    }

    #[test]
    fn critical_alert_forces_red() {
        let now = Utc::now();
        let mut inputs = base(now, Some(now));
        inputs.active_critical_alert_count = 1;
        assert_eq!(evaluate_status(&inputs), Status::Red);
    }

    #[test]
    fn exactly_24_hours_stale_is_yellow_not_red() {
        let now = Utc::now();
        let inputs = base(now, Some(now - Duration::hours(24)));
        assert_eq!(evaluate_status(&inputs), Status::Yellow);
    }

    #[test]
    fn just_over_24_hours_is_red() {
        let now = Utc::now();
        let inputs = base(now, Some(now - Duration::hours(24) - Duration::seconds(1)));
        assert_eq!(evaluate_status(&inputs), Status::Red);
    }

    #[test]
    fn exactly_2_hours_is_yellow() {
        let now = Utc::now();
        let inputs = base(now, Some(now - Duration::hours(2)));
        assert_eq!(evaluate_status(&inputs), Status::Yellow);
    }

    #[test]
    fn just_under_2_hours_is_green() {
        let now = Utc::now();
        let inputs = base(now, Some(now - Duration::hours(2) + Duration::seconds(1)));
        assert_eq!(evaluate_status(&inputs), Status::Green);
    }

    #[test]
    fn low_gen_red_forces_red_even_when_fresh() {
        let now = Utc::now();
        let mut inputs = base(now, Some(now));
        inputs.low_gen_level = LowGenLevel::Red;
        assert_eq!(evaluate_status(&inputs), Status::Red);
    }

    #[test]
    fn cold_start_scenario_s1_with_no_alerts_is_green() {
        let now = Utc::now();
        let inputs = base(now, Some(now - Duration::minutes(1)));
        assert_eq!(evaluate_status(&inputs), Status::Green);
    }
}
