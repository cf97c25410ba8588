// [libs/domain/monitoring/src/local_day.rs]
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Derives the local calendar date of `instant` in `timezone` (invariant
/// I1: a snapshot's `date` is always the plant's local day, never UTC).
/// Returns `None` when `timezone` is not a recognized IANA zone — the
/// caller (the executor) must treat that as `INVALID_DATA`.
pub fn local_date(instant: DateTime<Utc>, timezone: &str) -> Option<NaiveDate> {
    let zone: Tz = timezone.parse().ok()?;
    Some(instant.with_timezone(&zone).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn derives_local_date_not_utc_date() {
        // 2026-02-18T14:30:00Z is still 2026-02-18 in Sao Paulo (UTC-3)
        // but crosses midnight for a zone far enough east.
        let instant = Utc.with_ymd_and_hms(2026, 2, 18, 23, 30, 0).unwrap();
        let sao_paulo = local_date(instant, "America/Sao_Paulo").unwrap();
        let tokyo = local_date(instant, "Asia/Tokyo").unwrap();
        assert_eq!(sao_paulo, NaiveDate::from_ymd_opt(2026, 2, 18).unwrap());
        assert_eq!(tokyo, NaiveDate::from_ymd_opt(2026, 2, 19).unwrap());
    }

    #[test]
    fn rejects_unknown_zone() {
        let instant = Utc::now();
        assert!(local_date(instant, "").is_none());
        assert!(local_date(instant, "+03:00").is_none());
    }
}
