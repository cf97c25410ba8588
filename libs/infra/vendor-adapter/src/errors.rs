// [libs/infra/vendor-adapter/src/errors.rs]
//! Maps transport-level failures onto the closed `AdapterErrorKind`
//! taxonomy every adapter speaks. Nothing downstream of a
//! `VendorAdapter` ever sees a `reqwest::Error` or a `serde_json::Error`
//! directly.

use reqwest::StatusCode;
use solara_domain_models::AdapterErrorKind;

pub fn classify_http_error(err: &reqwest::Error) -> AdapterErrorKind {
    if err.is_timeout() {
        return AdapterErrorKind::NetworkTimeout;
    }
    if let Some(status) = err.status() {
        return classify_status(status, None);
    }
    AdapterErrorKind::Unknown
}

pub fn classify_status(status: StatusCode, retry_after_secs: Option<u64>) -> AdapterErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdapterErrorKind::AuthFailed,
        StatusCode::TOO_MANY_REQUESTS => AdapterErrorKind::RateLimited { retry_after_secs },
        StatusCode::NOT_FOUND => AdapterErrorKind::PlantNotFound,
        s if s.is_server_error() => AdapterErrorKind::Unknown,
        _ => AdapterErrorKind::InvalidData,
    }
}

pub fn retry_after_header(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
}
