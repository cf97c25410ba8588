// [libs/domain/models/src/brand.rs]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vendor the plant's inverter fleet reports through. The monitoring
/// core never branches on this value directly — it only uses it to
/// look up the right `VendorAdapter` and `BrandQueue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Brand {
    Solis,
    Huawei,
    Goodwe,
    Dele,
}

impl Brand {
    pub const ALL: [Brand; 4] = [Brand::Solis, Brand::Huawei, Brand::Goodwe, Brand::Dele];

    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Solis => "SOLIS",
            Brand::Huawei => "HUAWEI",
            Brand::Goodwe => "GOODWE",
            Brand::Dele => "DELE",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
