// [apps/monitor-daemon/src/main.rs]
/*!
 * =================================================================
 * APARATO: MONITOR DAEMON SHELL (V1.0 - GROUND ZERO)
 * CLASIFICACION: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: IGNICION DEL KERNEL Y CICLO DE VIDA DEL PROCESO
 * =================================================================
 */

use anyhow::Result;
use clap::Parser;
use solara_monitor_daemon::{DaemonConfig, MonitorKernel, Scheduler};
use std::sync::atomic::Ordering;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    solara_shared_telemetry::init_tracing("solara_monitor_daemon");

    info!("💠 [SHELL]: fleet monitoring engine starting");
    let config = DaemonConfig::parse();

    let kernel = MonitorKernel::ignite(&config).await?;
    let shutdown = kernel.shutdown.clone();

    let signal_flag = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⚠️ [SIGNAL]: shutdown requested, draining BrandQueues");
            signal_flag.store(true, Ordering::SeqCst);
        }
    });

    let scheduler = Scheduler::new(kernel.store, kernel.queues, config.poll_interval(), shutdown);

    info!("🚀 [SHELL]: handing control to Scheduler");
    let mut queues = scheduler.run().await;

    for (brand, queue) in queues.iter_mut() {
        info!(brand = %brand, "⏳ [SHELL]: draining BrandQueue");
        queue.drain(config.shutdown_deadline()).await;
    }

    info!("🏁 [SHELL]: shutdown sequence concluded");
    Ok(())
}
