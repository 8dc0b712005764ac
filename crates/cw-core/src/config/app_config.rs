use std::path::PathBuf;
use std::time::Duration;

use super::defaults;

/// Application configuration DTO
/// 应用配置 DTO
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL, no trailing slash
    pub base_url: String,

    /// Per-request timeout enforced by the HTTP transport
    pub request_timeout: Duration,

    /// `version` form/query field
    pub client_version: String,

    /// `phoneSystem` form/query field
    pub phone_system: String,

    /// `snCode` of the valve
    pub sn_code: String,

    /// Delay after a valve command before the balance refresh
    pub settle_delay: Duration,

    /// Database path (path info only, no existence check)
    /// 数据库路径（仅路径信息，不检查文件是否存在）
    pub database_path: PathBuf,
}

impl AppConfig {
    /// Create AppConfig with the backend constants and paths under `data_dir`
    /// 使用后端固定常量，数据文件位于 `data_dir`
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            base_url: defaults::API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            client_version: defaults::CLIENT_VERSION.to_string(),
            phone_system: defaults::PHONE_SYSTEM.to_string(),
            sn_code: defaults::SN_CODE.to_string(),
            settle_delay: Duration::from_millis(defaults::SETTLE_DELAY_MS),
            database_path: data_dir.join(defaults::DATABASE_FILE),
        }
    }

    /// Overlay the keys present in a TOML document onto `base`
    /// 将 TOML 中出现的键覆盖到 `base` 上
    ///
    /// Keys that are missing keep the value from `base`. Keys with the wrong
    /// type are an error rather than being silently ignored.
    pub fn from_toml(toml_value: &toml::Value, base: AppConfig) -> anyhow::Result<Self> {
        let mut config = base;

        if let Some(v) = lookup_str(toml_value, "backend", "base_url")? {
            config.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup_u64(toml_value, "backend", "timeout_secs")? {
            config.request_timeout = Duration::from_secs(v);
        }
        if let Some(v) = lookup_str(toml_value, "client", "version")? {
            config.client_version = v.to_string();
        }
        if let Some(v) = lookup_str(toml_value, "client", "phone_system")? {
            config.phone_system = v.to_string();
        }
        if let Some(v) = lookup_str(toml_value, "device", "sn_code")? {
            config.sn_code = v.to_string();
        }
        if let Some(v) = lookup_u64(toml_value, "session", "settle_delay_ms")? {
            config.settle_delay = Duration::from_millis(v);
        }
        if let Some(v) = lookup_str(toml_value, "storage", "database_path")? {
            config.database_path = PathBuf::from(v);
        }

        Ok(config)
    }
}

fn lookup<'a>(root: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    root.get(section).and_then(|s| s.get(key))
}

fn lookup_str<'a>(
    root: &'a toml::Value,
    section: &str,
    key: &str,
) -> anyhow::Result<Option<&'a str>> {
    match lookup(root, section, key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| anyhow::anyhow!("[{}].{} must be a string", section, key)),
    }
}

fn lookup_u64(root: &toml::Value, section: &str, key: &str) -> anyhow::Result<Option<u64>> {
    match lookup(root, section, key) {
        None => Ok(None),
        Some(v) => {
            let n = v
                .as_integer()
                .ok_or_else(|| anyhow::anyhow!("[{}].{} must be an integer", section, key))?;
            u64::try_from(n)
                .map(Some)
                .map_err(|_| anyhow::anyhow!("[{}].{} must not be negative", section, key))
        }
    }
}
