// [libs/domain/monitoring/src/alerts.rs]
/*!
 * AlertReconciler (spec.md §4.6). Adapter-reported alarms and the two
 * derived conditions (OFFLINE, LOW_GEN) are folded into one uniform
 * `AlertSignal` shape and run through the same four-case dedup logic,
 * exactly as §4.6 prescribes ("treat them as alarms with
 * vendor_alarm_code = '', device_sn = ''").
 *
 * Open question resolution (spec.md §9): severity only ever upgrades
 * while an alert stays active; it never downgrades except by the
 * alert resolving outright. If product wants vendor-driven downgrade
 * this function is the single place to change.
 */

use crate::low_gen::LowGenLevel;
use crate::store::{Store, StoreError};
use chrono::{DateTime, Duration, Utc};
use solara_domain_models::{
    Alert, AlertDedupKey, AlertSeverity, AlertState, AlertType, NormalizedAlarm,
};
use uuid::Uuid;

/// Re-notification throttle window (spec.md §4.6).
pub const RENOTIFY_WINDOW: Duration = Duration::hours(6);

pub struct AlertSignal {
    pub r#type: AlertType,
    pub vendor_alarm_code: Option<String>,
    pub device_sn: Option<String>,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
    pub is_active: bool,
    pub severity: AlertSeverity,
}

impl From<&NormalizedAlarm> for AlertSignal {
    fn from(alarm: &NormalizedAlarm) -> Self {
        Self {
            r#type: AlertType::Fault,
            vendor_alarm_code: Some(alarm.vendor_alarm_code.clone()),
            device_sn: alarm.device_sn.clone(),
            message: alarm.message.clone(),
            occurred_at: alarm.occurred_at,
            is_active: alarm.is_active,
            severity: alarm.severity,
        }
    }
}

fn offline_signal(now: DateTime<Utc>, is_offline: bool) -> AlertSignal {
    AlertSignal {
        r#type: AlertType::Offline,
        vendor_alarm_code: None,
        device_sn: None,
        message: "Plant has not reported telemetry in over 24 hours.".to_string(),
        occurred_at: now,
        is_active: is_offline,
        severity: AlertSeverity::Critical,
    }
}

fn low_gen_signal(now: DateTime<Utc>, level: Option<LowGenLevel>) -> Option<AlertSignal> {
    let level = level?;
    let severity = level.alert_severity();
    Some(AlertSignal {
        r#type: AlertType::LowGen,
        vendor_alarm_code: None,
        device_sn: None,
        message: "Today's energy yield is far below the plant's recent median.".to_string(),
        occurred_at: now,
        is_active: severity.is_some(),
        severity: severity.unwrap_or(AlertSeverity::Low),
    })
}

/// Applies the four-case dedup logic of spec.md §4.6 for a single
/// signal against whatever open alert (if any) shares its dedup key.
pub async fn reconcile_signal(
    store: &dyn Store,
    plant_id: &str,
    now: DateTime<Utc>,
    signal: &AlertSignal,
) -> Result<(), StoreError> {
    let key = AlertDedupKey::new(
        plant_id,
        signal.r#type,
        signal.vendor_alarm_code.as_deref(),
        signal.device_sn.as_deref(),
    );

    match (store.find_open_alert(&key).await?, signal.is_active) {
        (Some(mut existing), true) => {
            existing.last_seen_at = now;
            existing.message = signal.message.clone();
            if signal.severity > existing.severity {
                existing.severity = signal.severity;
            }
            store.update_alert(&existing).await
        }
        (Some(mut existing), false) => {
            existing.state = AlertState::Resolved;
            existing.cleared_at = Some(now);
            existing.last_seen_at = now;
            store.update_alert(&existing).await
        }
        (None, true) => {
            let alert = Alert {
                id: Uuid::new_v4().to_string(),
                plant_id: plant_id.to_string(),
                r#type: signal.r#type,
                severity: signal.severity,
                state: AlertState::New,
                vendor_alarm_code: signal.vendor_alarm_code.clone(),
                device_sn: signal.device_sn.clone(),
                message: signal.message.clone(),
                occurred_at: signal.occurred_at,
                cleared_at: None,
                last_notified_at: None,
                last_seen_at: now,
            };
            store.insert_alert(&alert).await
        }
        (None, false) => Ok(()),
    }
}

/// Folds adapter alarms plus derived OFFLINE/LOW_GEN signals and
/// reconciles each against the Store.
pub async fn reconcile_alerts(
    store: &dyn Store,
    plant_id: &str,
    now: DateTime<Utc>,
    adapter_alarms: &[NormalizedAlarm],
    is_offline: bool,
    low_gen_level: Option<LowGenLevel>,
) -> Result<(), StoreError> {
    for alarm in adapter_alarms {
        reconcile_signal(store, plant_id, now, &AlertSignal::from(alarm)).await?;
    }

    reconcile_signal(store, plant_id, now, &offline_signal(now, is_offline)).await?;

    if let Some(signal) = low_gen_signal(now, low_gen_level) {
        reconcile_signal(store, plant_id, now, &signal).await?;
    }

    Ok(())
}
