//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read the TOML configuration file / 读取 TOML 配置文件
//! - Overlay it onto the built-in defaults / 覆盖到内置默认值上
//! - Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! Business rules stay out of here. An empty `base_url` is accepted as
//! written; the first request will report it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cw_core::app_dirs::AppDirs;
use cw_core::config::AppConfig;

/// Load configuration from a TOML file on top of `base`
/// 从 TOML 文件加载配置并覆盖 `base`
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error)
/// - Content is not valid TOML
/// - A known key has the wrong type
pub fn load_config(config_path: &Path, base: AppConfig) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value, base)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// Pick the configuration source for this run
/// 选择本次运行的配置来源
///
/// An explicit `--config` path must exist. Otherwise `<data>/config.toml` is
/// read when present, and the defaults are used when it is not.
pub fn resolve_config(explicit: Option<PathBuf>, app_dirs: &AppDirs) -> anyhow::Result<AppConfig> {
    let base = AppConfig::with_system_defaults(app_dirs.app_data_root.clone());

    match explicit {
        Some(path) => load_config(&path, base),
        None => {
            let default_path = app_dirs.config_path();
            if default_path.is_file() {
                load_config(&default_path, base)
            } else {
                Ok(base)
            }
        }
    }
}
