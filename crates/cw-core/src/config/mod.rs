//! # Configuration DTOs / 配置数据
//!
//! Pure data: TOML → `AppConfig` mapping plus the backend's fixed constants.

mod app_config;
pub mod defaults;

pub use app_config::AppConfig;
