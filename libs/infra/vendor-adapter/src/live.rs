// [libs/infra/vendor-adapter/src/live.rs]
//! `HttpVendorAdapter`: the live, network-backed `VendorAdapter`. One
//! instance per brand, pointed at that brand's API base URL; the
//! decrypted credential blob is used verbatim as the bearer token for
//! every request, matching the header-injection pattern every vendor
//! in this fleet expects.

use crate::capabilities::capabilities_for;
use crate::errors::{classify_http_error, classify_status, retry_after_header};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use solara_domain_models::{
    AdapterErrorKind, Brand, Capabilities, DailyEnergyPoint, NormalizedAlarm, NormalizedSummary,
    TestResult,
};
use solara_domain_monitoring::VendorAdapter;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub struct HttpVendorAdapter {
    brand: Brand,
    http: Client,
    base_url: String,
}

impl HttpVendorAdapter {
    /// `request_timeout` corresponds to `ADAPTER_REQUEST_TIMEOUT_SECONDS`
    /// (default 8, spec.md §6.1).
    pub fn new(brand: Brand, base_url: String, request_timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(request_timeout)
            .user_agent("solara-monitor-daemon/1.0")
            .build()
            .expect("FATAL: reqwest client construction failed");
        Self {
            brand,
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn bearer_token(credentials: &[u8]) -> String {
        String::from_utf8_lossy(credentials).into_owned()
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, AdapterErrorKind> {
        let status = response.status();
        if status == StatusCode::OK {
            response.json::<T>().await.map_err(|_| AdapterErrorKind::InvalidData)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = retry_after_header(&response);
            Err(classify_status(status, retry_after))
        } else {
            Err(classify_status(status, None))
        }
    }
}

#[async_trait]
impl VendorAdapter for HttpVendorAdapter {
    #[instrument(skip(self, credentials))]
    async fn test_connection(&self, credentials: &[u8]) -> Result<TestResult, AdapterErrorKind> {
        let url = format!("{}/v1/{}/ping", self.base_url, self.brand.as_str().to_lowercase());
        let response = self
            .http
            .get(&url)
            .bearer_auth(Self::bearer_token(credentials))
            .send()
            .await
            .map_err(|e| classify_http_error(&e))?;

        match response.status() {
            StatusCode::OK => Ok(TestResult::Ok),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(TestResult::AuthFailed),
            s if s.is_server_error() => Ok(TestResult::Transient),
            _ => Ok(TestResult::Transient),
        }
    }

    #[instrument(skip(self, credentials))]
    async fn get_plant_summary(
        &self,
        vendor_plant_id: &str,
        credentials: &[u8],
    ) -> Result<NormalizedSummary, AdapterErrorKind> {
        let url = format!(
            "{}/v1/{}/plants/{}/summary",
            self.base_url,
            self.brand.as_str().to_lowercase(),
            vendor_plant_id
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(Self::bearer_token(credentials))
            .send()
            .await
            .map_err(|e| classify_http_error(&e))?;

        let summary: NormalizedSummary = Self::handle_response(response).await?;
        summary.validate()?;
        info!("📡 [PLANT_SUMMARY]: fetched for {}", vendor_plant_id);
        Ok(summary)
    }

    #[instrument(skip(self, credentials))]
    async fn get_daily_energy_series(
        &self,
        vendor_plant_id: &str,
        credentials: &[u8],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyEnergyPoint>, AdapterErrorKind> {
        let url = format!(
            "{}/v1/{}/plants/{}/daily-series?start={}&end={}",
            self.base_url,
            self.brand.as_str().to_lowercase(),
            vendor_plant_id,
            start_date,
            end_date
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(Self::bearer_token(credentials))
            .send()
            .await
            .map_err(|e| classify_http_error(&e))?;

        Self::handle_response(response).await
    }

    #[instrument(skip(self, credentials))]
    async fn get_alarms_since(
        &self,
        vendor_plant_id: &str,
        credentials: &[u8],
        since: DateTime<Utc>,
    ) -> Result<Vec<NormalizedAlarm>, AdapterErrorKind> {
        let url = format!(
            "{}/v1/{}/plants/{}/alarms?since={}",
            self.base_url,
            self.brand.as_str().to_lowercase(),
            vendor_plant_id,
            since.to_rfc3339()
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(Self::bearer_token(credentials))
            .send()
            .await
            .map_err(|e| classify_http_error(&e))?;

        if !self.capabilities().supports_alarms {
            warn!("⚠️ [ALARMS_UNSUPPORTED]: brand {} does not support alarms", self.brand);
        }
        Self::handle_response(response).await
    }

    fn capabilities(&self) -> Capabilities {
        capabilities_for(self.brand)
    }
}
