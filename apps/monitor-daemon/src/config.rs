// [apps/monitor-daemon/src/config.rs]
/*!
 * Process configuration (spec.md §6.1). Every value is readable from
 * the environment; `clap`'s `env` attribute means the same struct also
 * doubles as a CLI surface for local runs, matching the directive
 * pattern this workspace uses for its other long-running binaries.
 */

use anyhow::{bail, Context, Result};
use clap::Parser;
use solara_shared_vault::AesGcmVault;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Fleet-wide solar plant monitoring engine"
)]
pub struct DaemonConfig {
    /// Store connection (SQL-compatible; libsql local file, `:memory:`, or `libsql://`).
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Optional remote auth token for a `libsql://` DATABASE_URL.
    #[arg(long, env = "DATABASE_AUTH_TOKEN")]
    pub database_auth_token: Option<String>,

    /// Accepted for interface parity with spec.md §6.1; LockService is
    /// resolved against the Store's own lease table, not Redis (see
    /// DESIGN.md). Unused beyond startup logging.
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// Must be `true` in the current phase; a startup check aborts otherwise.
    #[arg(long, env = "INTEGRATION_MOCK_MODE", default_value_t = true)]
    pub integration_mock_mode: bool,

    /// 64 hex chars = 32 bytes.
    #[arg(long, env = "MASTER_KEY_CURRENT")]
    pub master_key_current: String,

    /// Fallback decryption key for rotation; tried only if current fails.
    #[arg(long, env = "MASTER_KEY_PREVIOUS")]
    pub master_key_previous: Option<String>,

    /// Scheduler period `P`, in seconds.
    #[arg(long, env = "POLL_INTERVAL_SECONDS", default_value_t = 600)]
    pub poll_interval_seconds: u64,

    /// Per-job total budget, in seconds.
    #[arg(long, env = "JOB_TIMEOUT_SECONDS", default_value_t = 60)]
    pub job_timeout_seconds: u64,

    /// Per adapter call, in seconds.
    #[arg(long, env = "ADAPTER_REQUEST_TIMEOUT_SECONDS", default_value_t = 8)]
    pub adapter_request_timeout_seconds: u64,

    /// Shutdown drain deadline, in seconds (spec.md §5).
    #[arg(long, env = "SHUTDOWN_DEADLINE_SECONDS", default_value_t = 30)]
    pub shutdown_deadline_seconds: u64,
}

impl DaemonConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn job_timeout(&self) -> Duration {
        Duration::from_secs(self.job_timeout_seconds)
    }

    pub fn adapter_request_timeout(&self) -> Duration {
        Duration::from_secs(self.adapter_request_timeout_seconds)
    }

    pub fn shutdown_deadline(&self) -> Duration {
        Duration::from_secs(self.shutdown_deadline_seconds)
    }

    /// Startup validation (spec.md §6.1): mock-mode phase gate, master
    /// key shape, and a vault round-trip self-test. Returns the vault
    /// constructed along the way so the caller never builds it twice.
    pub fn validate_and_build_vault(&self) -> Result<AesGcmVault> {
        if !self.integration_mock_mode {
            bail!("[CONFIG_FAULT]: INTEGRATION_MOCK_MODE must be true in the current phase");
        }

        let vault = AesGcmVault::new(&self.master_key_current, self.master_key_previous.as_deref())
            .context("[CONFIG_FAULT]: MASTER_KEY_CURRENT/MASTER_KEY_PREVIOUS malformed")?;
        vault
            .self_test()
            .context("[CONFIG_FAULT]: vault self-test failed to round-trip")?;
        Ok(vault)
    }
}
