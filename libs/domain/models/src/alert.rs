// [libs/domain/models/src/alert.rs]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    Fault,
    Offline,
    LowGen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertState {
    New,
    Acked,
    Resolved,
}

/// Raised by AlertReconciler, mutated by AlertReconciler and by operator
/// ack (out of scope), never hard-deleted (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub plant_id: String,
    pub r#type: AlertType,
    pub severity: AlertSeverity,
    pub state: AlertState,
    pub vendor_alarm_code: Option<String>,
    pub device_sn: Option<String>,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
    pub cleared_at: Option<DateTime<Utc>>,
    pub last_notified_at: Option<DateTime<Utc>>,
    pub last_seen_at: DateTime<Utc>,
}

/// Composite dedup identity from spec.md §4.6/§8 (P4): `vendor_alarm_code`
/// and `device_sn` are normalized to empty string, never null, so that a
/// missing code on one poll and an empty string on the next never create
/// two distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertDedupKey {
    pub plant_id: String,
    pub r#type: AlertType,
    pub vendor_alarm_code: String,
    pub device_sn: String,
}

impl AlertDedupKey {
    pub fn new(
        plant_id: impl Into<String>,
        r#type: AlertType,
        vendor_alarm_code: Option<&str>,
        device_sn: Option<&str>,
    ) -> Self {
        Self {
            plant_id: plant_id.into(),
            r#type,
            vendor_alarm_code: vendor_alarm_code.unwrap_or("").to_string(),
            device_sn: device_sn.unwrap_or("").to_string(),
        }
    }
}

impl Alert {
    pub fn dedup_key(&self) -> AlertDedupKey {
        AlertDedupKey::new(
            self.plant_id.clone(),
            self.r#type,
            self.vendor_alarm_code.as_deref(),
            self.device_sn.as_deref(),
        )
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, AlertState::New | AlertState::Acked)
    }

    /// Throttle from spec.md §4.6: an open alert is notifiable only if
    /// it has never been notified, or it has been at least `window`
    /// since the last notification.
    pub fn is_notifiable(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        self.is_open()
            && match self.last_notified_at {
                None => true,
                Some(last) => now - last >= window,
            }
    }
}
