//! # Application Dependencies / 应用依赖
//!
//! Parameter grouping for [`SessionController`](crate::SessionController)
//! construction. Not a builder: no defaults, no hidden logic.

use std::sync::Arc;
use std::time::Duration;

use cw_core::ports::*;

/// Controller dependency grouping
/// 控制器依赖分组
///
/// All dependencies are required - no defaults, no optional fields.
/// 所有依赖都是必需的 - 无默认值，无可选字段。
pub struct AppDeps {
    // Storage / 存储
    pub credential_store: Arc<dyn CredentialStorePort>,

    // Network / 网络
    pub backend: Arc<dyn BackendPort>,

    // UI / 界面通知
    pub notifier: Arc<dyn NotifierPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
    pub delay: Arc<dyn DelayPort>,

    /// Pause after a valve command before refreshing the balance
    pub settle_delay: Duration,
}
