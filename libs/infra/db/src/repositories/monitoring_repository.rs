// [libs/infra/db/src/repositories/monitoring_repository.rs]
/*!
 * The one and only `Store` implementation: every table the monitoring
 * engine touches, behind the typed contract `solara-domain-monitoring`
 * defines. No caller outside this file ever writes SQL against these
 * tables.
 */

use crate::client::TursoClient;
use crate::codec::{from_text, to_text};
use crate::errors::DbError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use libsql::{params, Row};
use solara_domain_models::{
    Alert, AlertDedupKey, AlertSeverity, AlertState, AlertType, Brand, Credential,
    IntegrationStatus, MetricSnapshot, Plant, PollLog, PollLogStatus, Status,
};
use solara_domain_monitoring::{JobType, Store, StoreError};

pub struct MonitoringRepository {
    client: TursoClient,
}

impl MonitoringRepository {
    pub fn new(client: TursoClient) -> Self {
        Self { client }
    }
}

fn parse_dt(text: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::MappingError(e.to_string()))
}

fn parse_opt_dt(text: Option<String>) -> Result<Option<DateTime<Utc>>, DbError> {
    text.map(|t| parse_dt(&t)).transpose()
}

fn row_to_plant(row: &Row) -> Result<Plant, DbError> {
    let brand: String = row.get(1).map_err(|e| DbError::MappingError(e.to_string()))?;
    let integration_status: String =
        row.get(3).map_err(|e| DbError::MappingError(e.to_string()))?;
    let status: String = row.get(4).map_err(|e| DbError::MappingError(e.to_string()))?;
    let silenced_until: Option<String> =
        row.get(5).map_err(|e| DbError::MappingError(e.to_string()))?;

    Ok(Plant {
        id: row.get(0).map_err(|e| DbError::MappingError(e.to_string()))?,
        brand: from_text::<Brand>(&brand)?,
        timezone: row.get(2).map_err(|e| DbError::MappingError(e.to_string()))?,
        integration_status: from_text::<IntegrationStatus>(&integration_status)?,
        status: from_text::<Status>(&status)?,
        alerts_silenced_until: parse_opt_dt(silenced_until)?,
        owner_customer_id: row.get(6).map_err(|e| DbError::MappingError(e.to_string()))?,
        vendor_plant_id: row.get(7).map_err(|e| DbError::MappingError(e.to_string()))?,
        installed_capacity_w: row.get(8).map_err(|e| DbError::MappingError(e.to_string()))?,
    })
}

fn row_to_credential(row: &Row) -> Result<Credential, DbError> {
    let brand: String = row.get(1).map_err(|e| DbError::MappingError(e.to_string()))?;
    Ok(Credential {
        plant_id: row.get(0).map_err(|e| DbError::MappingError(e.to_string()))?,
        brand: from_text::<Brand>(&brand)?,
        encrypted_blob: row.get(2).map_err(|e| DbError::MappingError(e.to_string()))?,
        key_version: row.get(3).map_err(|e| DbError::MappingError(e.to_string()))?,
    })
}

fn row_to_snapshot(row: &Row) -> Result<MetricSnapshot, DbError> {
    let date: String = row.get(1).map_err(|e| DbError::MappingError(e.to_string()))?;
    let last_seen_at: String = row.get(7).map_err(|e| DbError::MappingError(e.to_string()))?;
    let source_sampled_at: String = row.get(8).map_err(|e| DbError::MappingError(e.to_string()))?;
    Ok(MetricSnapshot {
        plant_id: row.get(0).map_err(|e| DbError::MappingError(e.to_string()))?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| DbError::MappingError(e.to_string()))?,
        timezone: row.get(2).map_err(|e| DbError::MappingError(e.to_string()))?,
        today_energy_kwh: row.get(3).map_err(|e| DbError::MappingError(e.to_string()))?,
        current_power_w: row.get(4).map_err(|e| DbError::MappingError(e.to_string()))?,
        grid_injection_power_w: row.get(5).map_err(|e| DbError::MappingError(e.to_string()))?,
        total_energy_kwh: row.get(6).map_err(|e| DbError::MappingError(e.to_string()))?,
        last_seen_at: parse_dt(&last_seen_at)?,
        source_sampled_at: parse_dt(&source_sampled_at)?,
    })
}

fn row_to_alert(row: &Row) -> Result<Alert, DbError> {
    let r#type: String = row.get(2).map_err(|e| DbError::MappingError(e.to_string()))?;
    let severity: String = row.get(3).map_err(|e| DbError::MappingError(e.to_string()))?;
    let state: String = row.get(4).map_err(|e| DbError::MappingError(e.to_string()))?;
    let occurred_at: String = row.get(8).map_err(|e| DbError::MappingError(e.to_string()))?;
    let cleared_at: Option<String> = row.get(9).map_err(|e| DbError::MappingError(e.to_string()))?;
    let last_notified_at: Option<String> =
        row.get(10).map_err(|e| DbError::MappingError(e.to_string()))?;
    let last_seen_at: String = row.get(11).map_err(|e| DbError::MappingError(e.to_string()))?;

    Ok(Alert {
        id: row.get(0).map_err(|e| DbError::MappingError(e.to_string()))?,
        plant_id: row.get(1).map_err(|e| DbError::MappingError(e.to_string()))?,
        r#type: from_text::<AlertType>(&r#type)?,
        severity: from_text::<AlertSeverity>(&severity)?,
        state: from_text::<AlertState>(&state)?,
        vendor_alarm_code: row.get(5).map_err(|e| DbError::MappingError(e.to_string()))?,
        device_sn: row.get(6).map_err(|e| DbError::MappingError(e.to_string()))?,
        message: row.get(7).map_err(|e| DbError::MappingError(e.to_string()))?,
        occurred_at: parse_dt(&occurred_at)?,
        cleared_at: parse_opt_dt(cleared_at)?,
        last_notified_at: parse_opt_dt(last_notified_at)?,
        last_seen_at: parse_dt(&last_seen_at)?,
    })
}

#[async_trait]
impl Store for MonitoringRepository {
    async fn load_plant_with_credential(
        &self,
        plant_id: &str,
    ) -> Result<Option<(Plant, Credential)>, StoreError> {
        let conn = self.client.connection().map_err(map)?;
        let mut rows = conn
            .query(
                "SELECT id, brand, timezone, integration_status, status,
                        alerts_silenced_until, owner_customer_id, vendor_plant_id,
                        installed_capacity_w
                 FROM plants WHERE id = ?1",
                params![plant_id],
            )
            .await
            .map_err(DbError::from)
            .map_err(map)?;
        let Some(plant_row) = rows.next().await.map_err(DbError::from).map_err(map)? else {
            return Ok(None);
        };
        let plant = row_to_plant(&plant_row).map_err(map)?;

        let mut cred_rows = conn
            .query(
                "SELECT plant_id, brand, encrypted_blob, key_version FROM credentials WHERE plant_id = ?1",
                params![plant_id],
            )
            .await
            .map_err(DbError::from)
            .map_err(map)?;
        let Some(cred_row) = cred_rows.next().await.map_err(DbError::from).map_err(map)? else {
            return Ok(None);
        };
        let credential = row_to_credential(&cred_row).map_err(map)?;

        Ok(Some((plant, credential)))
    }

    async fn active_plants(&self) -> Result<Vec<Plant>, StoreError> {
        let conn = self.client.connection().map_err(map)?;
        let mut rows = conn
            .query(
                "SELECT id, brand, timezone, integration_status, status,
                        alerts_silenced_until, owner_customer_id, vendor_plant_id,
                        installed_capacity_w
                 FROM plants WHERE integration_status = ?1",
                params![to_text(&IntegrationStatus::Active).map_err(map)?],
            )
            .await
            .map_err(DbError::from)
            .map_err(map)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await.map_err(DbError::from).map_err(map)? {
            out.push(row_to_plant(&row).map_err(map)?);
        }
        Ok(out)
    }

    async fn set_integration_status(
        &self,
        plant_id: &str,
        integration_status: IntegrationStatus,
    ) -> Result<(), StoreError> {
        let conn = self.client.connection().map_err(map)?;
        conn.execute(
            "UPDATE plants SET integration_status = ?2 WHERE id = ?1",
            params![plant_id, to_text(&integration_status).map_err(map)?],
        )
        .await
        .map_err(DbError::from)
        .map_err(map)?;
        Ok(())
    }

    async fn set_status(&self, plant_id: &str, status: Status) -> Result<(), StoreError> {
        let conn = self.client.connection().map_err(map)?;
        conn.execute(
            "UPDATE plants SET status = ?2 WHERE id = ?1",
            params![plant_id, to_text(&status).map_err(map)?],
        )
        .await
        .map_err(DbError::from)
        .map_err(map)?;
        Ok(())
    }

    async fn upsert_snapshot(&self, snapshot: &MetricSnapshot) -> Result<(), StoreError> {
        let conn = self.client.connection().map_err(map)?;
        conn.execute(
            "INSERT INTO metric_snapshots
                (plant_id, date, timezone, today_energy_kwh, current_power_w,
                 grid_injection_power_w, total_energy_kwh, last_seen_at, source_sampled_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(plant_id, date) DO UPDATE SET
                timezone = excluded.timezone,
                today_energy_kwh = excluded.today_energy_kwh,
                current_power_w = excluded.current_power_w,
                grid_injection_power_w = excluded.grid_injection_power_w,
                total_energy_kwh = excluded.total_energy_kwh,
                last_seen_at = excluded.last_seen_at,
                source_sampled_at = excluded.source_sampled_at",
            params![
                snapshot.plant_id.clone(),
                snapshot.date.format("%Y-%m-%d").to_string(),
                snapshot.timezone.clone(),
                snapshot.today_energy_kwh,
                snapshot.current_power_w,
                snapshot.grid_injection_power_w,
                snapshot.total_energy_kwh,
                snapshot.last_seen_at.to_rfc3339(),
                snapshot.source_sampled_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(DbError::from)
        .map_err(map)?;
        Ok(())
    }

    async fn insert_snapshot_if_absent(&self, snapshot: &MetricSnapshot) -> Result<bool, StoreError> {
        let conn = self.client.connection().map_err(map)?;
        let affected = conn
            .execute(
                "INSERT OR IGNORE INTO metric_snapshots
                    (plant_id, date, timezone, today_energy_kwh, current_power_w,
                     grid_injection_power_w, total_energy_kwh, last_seen_at, source_sampled_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    snapshot.plant_id.clone(),
                    snapshot.date.format("%Y-%m-%d").to_string(),
                    snapshot.timezone.clone(),
                    snapshot.today_energy_kwh,
                    snapshot.current_power_w,
                    snapshot.grid_injection_power_w,
                    snapshot.total_energy_kwh,
                    snapshot.last_seen_at.to_rfc3339(),
                    snapshot.source_sampled_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(DbError::from)
            .map_err(map)?;
        Ok(affected > 0)
    }

    async fn get_snapshot(
        &self,
        plant_id: &str,
        date: NaiveDate,
    ) -> Result<Option<MetricSnapshot>, StoreError> {
        let conn = self.client.connection().map_err(map)?;
        let mut rows = conn
            .query(
                "SELECT plant_id, date, timezone, today_energy_kwh, current_power_w,
                        grid_injection_power_w, total_energy_kwh, last_seen_at, source_sampled_at
                 FROM metric_snapshots WHERE plant_id = ?1 AND date = ?2",
                params![plant_id, date.format("%Y-%m-%d").to_string()],
            )
            .await
            .map_err(DbError::from)
            .map_err(map)?;
        match rows.next().await.map_err(DbError::from).map_err(map)? {
            Some(row) => Ok(Some(row_to_snapshot(&row).map_err(map)?)),
            None => Ok(None),
        }
    }

    async fn recent_snapshots_before(
        &self,
        plant_id: &str,
        before_date: NaiveDate,
        limit: usize,
    ) -> Result<Vec<MetricSnapshot>, StoreError> {
        let conn = self.client.connection().map_err(map)?;
        let mut rows = conn
            .query(
                "SELECT plant_id, date, timezone, today_energy_kwh, current_power_w,
                        grid_injection_power_w, total_energy_kwh, last_seen_at, source_sampled_at
                 FROM metric_snapshots
                 WHERE plant_id = ?1 AND date < ?2
                 ORDER BY date DESC
                 LIMIT ?3",
                params![plant_id, before_date.format("%Y-%m-%d").to_string(), limit as i64],
            )
            .await
            .map_err(DbError::from)
            .map_err(map)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await.map_err(DbError::from).map_err(map)? {
            out.push(row_to_snapshot(&row).map_err(map)?);
        }
        Ok(out)
    }

    async fn active_alerts_for_plant(&self, plant_id: &str) -> Result<Vec<Alert>, StoreError> {
        let conn = self.client.connection().map_err(map)?;
        let mut rows = conn
            .query(
                "SELECT id, plant_id, type, severity, state, vendor_alarm_code, device_sn,
                        message, occurred_at, cleared_at, last_notified_at, last_seen_at
                 FROM alerts
                 WHERE plant_id = ?1 AND state IN ('NEW', 'ACKED')",
                params![plant_id],
            )
            .await
            .map_err(DbError::from)
            .map_err(map)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await.map_err(DbError::from).map_err(map)? {
            out.push(row_to_alert(&row).map_err(map)?);
        }
        Ok(out)
    }

    async fn find_open_alert(&self, key: &AlertDedupKey) -> Result<Option<Alert>, StoreError> {
        let conn = self.client.connection().map_err(map)?;
        let mut rows = conn
            .query(
                "SELECT id, plant_id, type, severity, state, vendor_alarm_code, device_sn,
                        message, occurred_at, cleared_at, last_notified_at, last_seen_at
                 FROM alerts
                 WHERE plant_id = ?1 AND type = ?2
                   AND coalesce(vendor_alarm_code, '') = ?3
                   AND coalesce(device_sn, '') = ?4
                   AND state IN ('NEW', 'ACKED')
                 LIMIT 1",
                params![
                    key.plant_id.clone(),
                    to_text(&key.r#type).map_err(map)?,
                    key.vendor_alarm_code.clone(),
                    key.device_sn.clone(),
                ],
            )
            .await
            .map_err(DbError::from)
            .map_err(map)?;
        match rows.next().await.map_err(DbError::from).map_err(map)? {
            Some(row) => Ok(Some(row_to_alert(&row).map_err(map)?)),
            None => Ok(None),
        }
    }

    async fn insert_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        let conn = self.client.connection().map_err(map)?;
        conn.execute(
            "INSERT INTO alerts
                (id, plant_id, type, severity, state, vendor_alarm_code, device_sn, message,
                 occurred_at, cleared_at, last_notified_at, last_seen_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                alert.id.clone(),
                alert.plant_id.clone(),
                to_text(&alert.r#type).map_err(map)?,
                to_text(&alert.severity).map_err(map)?,
                to_text(&alert.state).map_err(map)?,
                alert.vendor_alarm_code.clone(),
                alert.device_sn.clone(),
                alert.message.clone(),
                alert.occurred_at.to_rfc3339(),
                alert.cleared_at.map(|d| d.to_rfc3339()),
                alert.last_notified_at.map(|d| d.to_rfc3339()),
                alert.last_seen_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(DbError::from)
        .map_err(map)?;
        Ok(())
    }

    async fn update_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        let conn = self.client.connection().map_err(map)?;
        conn.execute(
            "UPDATE alerts SET
                severity = ?2, state = ?3, message = ?4, cleared_at = ?5,
                last_notified_at = ?6, last_seen_at = ?7
             WHERE id = ?1",
            params![
                alert.id.clone(),
                to_text(&alert.severity).map_err(map)?,
                to_text(&alert.state).map_err(map)?,
                alert.message.clone(),
                alert.cleared_at.map(|d| d.to_rfc3339()),
                alert.last_notified_at.map(|d| d.to_rfc3339()),
                alert.last_seen_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(DbError::from)
        .map_err(map)?;
        Ok(())
    }

    async fn insert_poll_log(&self, log: &PollLog) -> Result<(), StoreError> {
        let conn = self.client.connection().map_err(map)?;
        let job_type_text = match log.job_type {
            JobType::Poll => "POLL",
            JobType::DailyBackfill => "DAILY_BACKFILL",
        };
        let status_text = match log.status {
            PollLogStatus::Success => "SUCCESS",
            PollLogStatus::Error => "ERROR",
        };
        let adapter_error_json = log
            .adapter_error_type
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::MappingError(e.to_string()))
            .map_err(map)?;

        conn.execute(
            "INSERT INTO poll_logs
                (id, plant_id, job_type, status, duration_ms, adapter_error_type,
                 http_status, started_at, finished_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                log.id.clone(),
                log.plant_id.clone(),
                job_type_text,
                status_text,
                log.duration_ms,
                adapter_error_json,
                log.http_status,
                log.started_at.to_rfc3339(),
                log.finished_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(DbError::from)
        .map_err(map)?;
        Ok(())
    }
}

fn map(e: DbError) -> StoreError {
    e.into()
}
