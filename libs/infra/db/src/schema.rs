// [libs/infra/db/src/schema.rs]
/*!
 * Schema bootstrap. Idempotent `CREATE TABLE IF NOT EXISTS` plus a
 * small set of indexes for the access patterns the PollExecutor and
 * Scheduler actually run (dedup lookups, backfill windows, lease
 * reclaim sweeps).
 */

use libsql::Connection;
use tracing::{debug, info, instrument};

const TABLES: &[(&str, &str)] = &[
    ("TABLE_PLANTS", r#"
        CREATE TABLE IF NOT EXISTS plants (
            id TEXT PRIMARY KEY,
            brand TEXT NOT NULL,
            timezone TEXT NOT NULL,
            integration_status TEXT NOT NULL,
            status TEXT NOT NULL,
            alerts_silenced_until TEXT,
            owner_customer_id TEXT,
            vendor_plant_id TEXT NOT NULL,
            installed_capacity_w REAL
        );
    "#),
    ("TABLE_CREDENTIALS", r#"
        CREATE TABLE IF NOT EXISTS credentials (
            plant_id TEXT PRIMARY KEY REFERENCES plants(id),
            brand TEXT NOT NULL,
            encrypted_blob BLOB NOT NULL,
            key_version INTEGER NOT NULL
        );
    "#),
    ("TABLE_METRIC_SNAPSHOTS", r#"
        CREATE TABLE IF NOT EXISTS metric_snapshots (
            plant_id TEXT NOT NULL REFERENCES plants(id),
            date TEXT NOT NULL,
            timezone TEXT NOT NULL,
            today_energy_kwh REAL NOT NULL,
            current_power_w REAL,
            grid_injection_power_w REAL,
            total_energy_kwh REAL,
            last_seen_at TEXT NOT NULL,
            source_sampled_at TEXT NOT NULL,
            PRIMARY KEY (plant_id, date)
        );
    "#),
    ("TABLE_ALERTS", r#"
        CREATE TABLE IF NOT EXISTS alerts (
            id TEXT PRIMARY KEY,
            plant_id TEXT NOT NULL REFERENCES plants(id),
            type TEXT NOT NULL,
            severity TEXT NOT NULL,
            state TEXT NOT NULL,
            vendor_alarm_code TEXT,
            device_sn TEXT,
            message TEXT NOT NULL,
            occurred_at TEXT NOT NULL,
            cleared_at TEXT,
            last_notified_at TEXT,
            last_seen_at TEXT NOT NULL
        );
    "#),
    ("TABLE_POLL_LOGS", r#"
        CREATE TABLE IF NOT EXISTS poll_logs (
            id TEXT PRIMARY KEY,
            plant_id TEXT NOT NULL REFERENCES plants(id),
            job_type TEXT NOT NULL,
            status TEXT NOT NULL,
            duration_ms INTEGER NOT NULL,
            adapter_error_type TEXT,
            http_status INTEGER,
            started_at TEXT NOT NULL,
            finished_at TEXT NOT NULL
        );
    "#),
    ("TABLE_LOCKS", r#"
        CREATE TABLE IF NOT EXISTS locks (
            key TEXT PRIMARY KEY,
            token TEXT NOT NULL,
            expires_at TEXT NOT NULL
        );
    "#),
];

const INDEXES: &[(&str, &str)] = &[
    (
        "IDX_ALERTS_DEDUP",
        "CREATE INDEX IF NOT EXISTS idx_alerts_dedup ON alerts(plant_id, type, vendor_alarm_code, device_sn, state);",
    ),
    (
        "IDX_SNAPSHOTS_BACKFILL",
        "CREATE INDEX IF NOT EXISTS idx_snapshots_backfill ON metric_snapshots(plant_id, date);",
    ),
    (
        "IDX_POLL_LOGS_PLANT",
        "CREATE INDEX IF NOT EXISTS idx_poll_logs_plant ON poll_logs(plant_id, started_at);",
    ),
    (
        "IDX_PLANTS_ACTIVE",
        "CREATE INDEX IF NOT EXISTS idx_plants_active ON plants(integration_status);",
    ),
];

#[instrument(skip(connection))]
pub async fn apply_schema(connection: &Connection) -> Result<(), libsql::Error> {
    info!("\u{1f3d7}\u{fe0f} [SCHEMA]: synchronizing monitoring ledger...");
    for (name, sql) in TABLES {
        debug!("  -> solidifying {}", name);
        connection.execute(sql, ()).await?;
    }
    for (name, sql) in INDEXES {
        debug!("  -> hardening {}", name);
        connection.execute(sql, ()).await?;
    }
    info!("\u{2705} [SCHEMA]: monitoring ledger ready.");
    Ok(())
}
