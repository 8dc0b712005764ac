//! Values the metering backend validates byte for byte.
//! 后端逐字节校验的固定常量。

pub const API_BASE_URL: &str = "https://v3-api.china-qzxy.cn";

/// Serial code of the controlled water valve.
pub const SN_CODE: &str = "C47F0E0BD0C0";

pub const CLIENT_VERSION: &str = "6.5.19";
pub const PHONE_SYSTEM: &str = "ios";

pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Pause between a valve command and the follow-up balance refresh.
pub const SETTLE_DELAY_MS: u64 = 1500;

pub const DATABASE_FILE: &str = "campus-water.db";
