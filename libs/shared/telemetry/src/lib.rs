// [libs/shared/telemetry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TELEMETRY BOOTSTRAP (V1.0 - GROUND ZERO)
 * CLASIFICACION: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: TRAZADO ESTRUCTURADO Y BLINDAJE DE PANICOS
 *
 * Desarrollo: logs compactos y legibles. Produccion: JSON plano para
 * ingestion. Un panic en cualquier hilo (scheduler, brand queue
 * worker, executor) se reporta via tracing::error! antes de que el
 * proceso continue su desenlace, de forma que nunca se pierde sin
 * rastro en el log estructurado.
 * =================================================================
 */

use std::panic;
use tracing::{error, info, instrument};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};

#[instrument(skip_all)]
pub fn init_tracing(service_name: &str) {
    let environmental_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},reqwest=warn,libsql=error",
            service_name,
            level = if cfg!(debug_assertions) { "debug" } else { "info" }
        )
        .into()
    });

    if cfg!(debug_assertions) {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    }

    let service = service_name.to_string();
    panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("<non-string panic payload>");

        error!(
            target: "panic_monitor",
            service = %service,
            location = %location,
            "panic captured: {}",
            payload
        );
    }));

    info!("🛰️  [TELEMETRY_ONLINE]: structured tracing initialized for [{}]", service_name);
}
