//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - Create infra implementations (db, http, clock) / 创建 infra 层具体实现
//! - Inject them into [`AppDeps`] / 注入到 `AppDeps`
//!
//! No business logic and no config validation here. This is the only module
//! that depends on cw-infra and cw-app at the same time.

use std::path::Path;
use std::sync::Arc;

use cw_app::AppDeps;
use cw_core::config::AppConfig;
use cw_core::ports::*;
use cw_infra::db::executor::DieselSqliteExecutor;
use cw_infra::db::mappers::CredentialRowMapper;
use cw_infra::db::pool::{init_db_pool, DbPool};
use cw_infra::db::repositories::DieselCredentialRepository;
use cw_infra::{HttpBackendClient, SystemClock, TokioDelay};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("Backend client initialization failed: {0}")]
    BackendInit(String),
}

/// Create SQLite database connection pool
/// 创建 SQLite 数据库连接池
///
/// # Errors / 错误
///
/// Returns `WiringError::DatabaseInit` if:
/// - Parent directory creation fails / 父目录创建失败
/// - Database pool creation or migration fails / 数据库池创建或迁移失败
fn create_db_pool(db_path: &Path) -> WiringResult<DbPool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            WiringError::DatabaseInit(format!("Failed to create DB directory: {}", e))
        })?;
    }

    let db_url = db_path
        .to_str()
        .ok_or_else(|| WiringError::DatabaseInit("Invalid database path".to_string()))?;

    init_db_pool(db_url)
        .map_err(|e| WiringError::DatabaseInit(format!("Failed to initialize DB: {}", e)))
}

/// Wire every port the session controller needs
/// 组装会话控制器所需的全部端口
///
/// The notifier is supplied by the caller since it belongs to the front-end.
pub fn wire_dependencies(
    config: &AppConfig,
    notifier: Arc<dyn NotifierPort>,
) -> WiringResult<AppDeps> {
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    let db_pool = create_db_pool(&config.database_path)?;
    let credential_store: Arc<dyn CredentialStorePort> = Arc::new(DieselCredentialRepository::new(
        DieselSqliteExecutor::new(db_pool),
        CredentialRowMapper,
        clock.clone(),
    ));

    let backend: Arc<dyn BackendPort> = Arc::new(
        HttpBackendClient::new(config).map_err(|e| WiringError::BackendInit(e.to_string()))?,
    );

    Ok(AppDeps {
        credential_store,
        backend,
        notifier,
        clock,
        delay: Arc::new(TokioDelay),
        settle_delay: config.settle_delay,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_core::Notification;
    use std::time::Duration;
    use tempfile::TempDir;

    struct NullNotifier;

    impl NotifierPort for NullNotifier {
        fn notify(&self, _notification: Notification) {}
    }

    #[test]
    fn test_wiring_error_display() {
        let err = WiringError::DatabaseInit("connection failed".to_string());
        assert!(err.to_string().contains("Database initialization"));
        assert!(err.to_string().contains("connection failed"));

        let err = WiringError::BackendInit("tls".to_string());
        assert!(err.to_string().contains("Backend client initialization"));
    }

    #[test]
    fn test_create_db_pool_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("nested").join("campus-water.db");

        create_db_pool(&db_path).unwrap();

        assert!(db_path.parent().unwrap().is_dir());
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_wire_dependencies_creates_app_deps() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::with_system_defaults(dir.path().to_path_buf());
        config.settle_delay = Duration::from_millis(5);

        let deps = wire_dependencies(&config, Arc::new(NullNotifier)).unwrap();

        assert_eq!(deps.settle_delay, Duration::from_millis(5));
        assert!(deps.credential_store.most_recent().await.unwrap().is_none());
        assert!(config.database_path.exists());
    }
}
