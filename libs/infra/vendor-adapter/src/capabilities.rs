// [libs/infra/vendor-adapter/src/capabilities.rs]
//! Per-brand `Capabilities` (spec.md §4.1/§4.3). The spec leaves the
//! concrete numbers to the implementation; these are conservative
//! defaults sized for a single-tenant fleet poller and shared by both
//! the mock and live adapters for a given brand, so BrandQueue sizing
//! is identical regardless of which registry mode is active.

use solara_domain_models::{Brand, Capabilities};

pub fn capabilities_for(brand: Brand) -> Capabilities {
    match brand {
        Brand::Solis => Capabilities {
            brand,
            max_concurrent: 4,
            max_per_minute: 60,
            min_interval_sec: 1,
            supports_daily_series: true,
            supports_alarms: true,
            supports_device_list: false,
        },
        Brand::Huawei => Capabilities {
            brand,
            max_concurrent: 2,
            max_per_minute: 20,
            min_interval_sec: 3,
            supports_daily_series: true,
            supports_alarms: true,
            supports_device_list: true,
        },
        Brand::Goodwe => Capabilities {
            brand,
            max_concurrent: 3,
            max_per_minute: 30,
            min_interval_sec: 2,
            supports_daily_series: true,
            supports_alarms: false,
            supports_device_list: false,
        },
        Brand::Dele => Capabilities {
            brand,
            max_concurrent: 1,
            max_per_minute: 10,
            min_interval_sec: 6,
            supports_daily_series: false,
            supports_alarms: false,
            supports_device_list: false,
        },
    }
}
