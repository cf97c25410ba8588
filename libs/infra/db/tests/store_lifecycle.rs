// [libs/infra/db/tests/store_lifecycle.rs]
use chrono::{Duration, Utc};
use libsql::params;
use solara_domain_models::{
    Alert, AlertDedupKey, AlertSeverity, AlertState, AlertType, Brand, IntegrationStatus,
    MetricSnapshot, Status,
};
use solara_domain_monitoring::{LockService, Store};
use solara_infra_db::{LeaseLockService, MonitoringRepository, TursoClient};

async fn seed_plant(client: &TursoClient, id: &str) {
    let conn = client.connection().unwrap();
    conn.execute(
        "INSERT INTO plants (id, brand, timezone, integration_status, status, vendor_plant_id)
         VALUES (?1, 'SOLIS', 'America/Sao_Paulo', 'ACTIVE', 'GREEN', 'vendor-1')",
        params![id],
    )
    .await
    .unwrap();
    conn.execute(
        "INSERT INTO credentials (plant_id, brand, encrypted_blob, key_version)
         VALUES (?1, 'SOLIS', X'00010203', 1)",
        params![id],
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn loads_plant_with_its_credential() {
    let client = TursoClient::connect("file::memory:?cache=shared", None)
        .await
        .unwrap();
    seed_plant(&client, "p1").await;

    let repo = MonitoringRepository::new(client);
    let (plant, credential) = repo.load_plant_with_credential("p1").await.unwrap().unwrap();

    assert_eq!(plant.id, "p1");
    assert_eq!(plant.brand, Brand::Solis);
    assert_eq!(plant.integration_status, IntegrationStatus::Active);
    assert_eq!(credential.plant_id, "p1");
    assert_eq!(credential.encrypted_blob, vec![0x00, 0x01, 0x02, 0x03]);
}

#[tokio::test]
async fn active_plants_excludes_paused_plants() {
    let client = TursoClient::connect("file::memory:?cache=shared", None)
        .await
        .unwrap();
    seed_plant(&client, "p1").await;
    seed_plant(&client, "p2").await;
    let repo = MonitoringRepository::new(client.clone());
    repo.set_integration_status("p2", IntegrationStatus::PausedAuthError)
        .await
        .unwrap();

    let active = repo.active_plants().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "p1");
}

#[tokio::test]
async fn snapshot_upsert_overwrites_same_local_day() {
    let client = TursoClient::connect("file::memory:?cache=shared", None)
        .await
        .unwrap();
    seed_plant(&client, "p1").await;
    let repo = MonitoringRepository::new(client);

    let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let mut snapshot = MetricSnapshot {
        plant_id: "p1".into(),
        date,
        timezone: "America/Sao_Paulo".into(),
        today_energy_kwh: 10.0,
        current_power_w: Some(1000.0),
        grid_injection_power_w: None,
        total_energy_kwh: Some(500.0),
        last_seen_at: Utc::now(),
        source_sampled_at: Utc::now(),
    };
    repo.upsert_snapshot(&snapshot).await.unwrap();
    snapshot.today_energy_kwh = 14.0;
    repo.upsert_snapshot(&snapshot).await.unwrap();

    let stored = repo.get_snapshot("p1", date).await.unwrap().unwrap();
    assert_eq!(stored.today_energy_kwh, 14.0);
}

#[tokio::test]
async fn backfill_insert_never_overwrites_existing_snapshot() {
    let client = TursoClient::connect("file::memory:?cache=shared", None)
        .await
        .unwrap();
    seed_plant(&client, "p1").await;
    let repo = MonitoringRepository::new(client);
    let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

    let live = MetricSnapshot {
        plant_id: "p1".into(),
        date,
        timezone: "America/Sao_Paulo".into(),
        today_energy_kwh: 30.0,
        current_power_w: Some(1000.0),
        grid_injection_power_w: None,
        total_energy_kwh: Some(500.0),
        last_seen_at: Utc::now(),
        source_sampled_at: Utc::now(),
    };
    repo.upsert_snapshot(&live).await.unwrap();

    let mut stale_backfill = live.clone();
    stale_backfill.today_energy_kwh = 0.0;
    let inserted = repo.insert_snapshot_if_absent(&stale_backfill).await.unwrap();
    assert!(!inserted);

    let stored = repo.get_snapshot("p1", date).await.unwrap().unwrap();
    assert_eq!(stored.today_energy_kwh, 30.0);
}

#[tokio::test]
async fn alert_dedup_lookup_matches_normalized_key() {
    let client = TursoClient::connect("file::memory:?cache=shared", None)
        .await
        .unwrap();
    seed_plant(&client, "p1").await;
    let repo = MonitoringRepository::new(client);

    let alert = Alert {
        id: "a1".into(),
        plant_id: "p1".into(),
        r#type: AlertType::Offline,
        severity: AlertSeverity::Critical,
        state: AlertState::New,
        vendor_alarm_code: None,
        device_sn: None,
        message: "offline".into(),
        occurred_at: Utc::now(),
        cleared_at: None,
        last_notified_at: None,
        last_seen_at: Utc::now(),
    };
    repo.insert_alert(&alert).await.unwrap();

    let key = AlertDedupKey::new("p1", AlertType::Offline, Some(""), Some(""));
    let found = repo.find_open_alert(&key).await.unwrap();
    assert_eq!(found.unwrap().id, "a1");
}

#[tokio::test]
async fn lease_lock_blocks_until_released() {
    let client = TursoClient::connect("file::memory:?cache=shared", None)
        .await
        .unwrap();
    let lock = LeaseLockService::new(client);

    assert!(lock.acquire("poll:plant:p1:latest", Duration::seconds(60), "token-a").await.unwrap());
    assert!(!lock.acquire("poll:plant:p1:latest", Duration::seconds(60), "token-b").await.unwrap());

    lock.release("poll:plant:p1:latest", "token-a").await.unwrap();
    assert!(lock.acquire("poll:plant:p1:latest", Duration::seconds(60), "token-b").await.unwrap());
}

#[tokio::test]
async fn lease_lock_self_renews_for_the_same_token() {
    let client = TursoClient::connect("file::memory:?cache=shared", None)
        .await
        .unwrap();
    let lock = LeaseLockService::new(client);

    assert!(lock.acquire("poll:plant:p1:latest", Duration::seconds(60), "token-a").await.unwrap());
    assert!(lock.acquire("poll:plant:p1:latest", Duration::seconds(60), "token-a").await.unwrap());
}

#[tokio::test]
async fn set_status_round_trips() {
    let client = TursoClient::connect("file::memory:?cache=shared", None)
        .await
        .unwrap();
    seed_plant(&client, "p1").await;
    let repo = MonitoringRepository::new(client);

    repo.set_status("p1", Status::Red).await.unwrap();
    let (plant, _) = repo.load_plant_with_credential("p1").await.unwrap().unwrap();
    assert_eq!(plant.status, Status::Red);
}
