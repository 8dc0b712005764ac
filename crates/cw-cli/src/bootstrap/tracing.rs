//! Tracing configuration for campus-water
//!
//! ## Architecture / 架构
//!
//! - Console layer on stderr at warn, so the shell prompt is not buried
//! - Daily-rolling file layer under `<data>/logs/` with info/debug detail
//! - Optional Sentry layer when `SENTRY_DSN` is set
//! - `log` records from diesel and r2d2 are bridged into tracing

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "campus-water.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Console directives. Progress already reaches the terminal as
/// notifications; only problems are echoed as log lines.
fn build_console_directives() -> Vec<String> {
    vec!["warn".to_string()]
}

/// Build the default filter directives for the file and Sentry layers
///
/// ## Behavior / 行为
/// - **Development**: debug for workspace crates
/// - **Production**: info for workspace crates, warn for everything else
/// - HTTP internals are kept at warn in both
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        "warn".to_string(),
        if is_dev { "cw_app=debug" } else { "cw_app=info" }.to_string(),
        if is_dev { "cw_infra=debug" } else { "cw_infra=info" }.to_string(),
        if is_dev { "cw_cli=debug" } else { "cw_cli=info" }.to_string(),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
    ]
}

/// Initialize the tracing subscriber
///
/// ## Behavior / 行为
///
/// - `RUST_LOG` overrides the default directives of every layer
/// - File logging failure falls back to console only
///
/// ## Call this / 调用位置
///
/// Once, at startup, before the first log line:
///
/// ```ignore
/// cw_cli::bootstrap::tracing::init_tracing_subscriber(&app_dirs.logs_dir())?;
/// ```
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(logs_dir: &Path) -> anyhow::Result<()> {
    let is_dev = is_development();

    // Step 1: Build per-layer filters
    let file_directives = build_filter_directives(is_dev);
    let console_directives = build_console_directives();

    // Step 2: Initialize Sentry
    // - Only if SENTRY_DSN is set
    // - Guard must be kept alive
    let sentry_layer = match std::env::var("SENTRY_DSN") {
        Ok(dsn) if !dsn.is_empty() => {
            let guard = sentry::init((
                dsn,
                sentry::ClientOptions {
                    release: sentry::release_name!(),
                    traces_sample_rate: 1.0,
                    ..Default::default()
                },
            ));

            if SENTRY_GUARD.set(guard).is_err() {
                eprintln!("Sentry guard already initialized");
            }

            Some(sentry_tracing::layer().with_filter(env_filter_or(&file_directives)))
        }
        _ => None,
    };

    // Step 3: Create writers
    let console_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = match build_file_writer(logs_dir) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to console: {err}");
            None
        }
    };

    // Step 4: Create fmt layers
    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let console_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(console_writer)
        .with_filter(env_filter_or(&console_directives));

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(env_filter_or(&file_directives))
    });

    // Step 5: Bridge `log` records, then register the global subscriber
    tracing_log::LogTracer::init()?;

    let subscriber = registry()
        .with(sentry_layer)
        .with(console_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn env_filter_or(directives: &[String]) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives.join(",")))
}

fn build_file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"cw_app=debug".to_string()));
        assert!(dev_directives.contains(&"cw_infra=debug".to_string()));
        assert!(dev_directives.contains(&"reqwest=warn".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"cw_app=info".to_string()));
        assert!(prod_directives.contains(&"cw_cli=info".to_string()));
        assert_eq!(prod_directives[0], "warn");
    }

    #[test]
    fn test_directives_parse_as_env_filter() {
        for is_dev in [true, false] {
            let joined = build_filter_directives(is_dev).join(",");
            assert!(EnvFilter::try_new(joined).is_ok());
        }
    }

    #[test]
    fn test_console_stays_quieter_than_file() {
        use tracing_subscriber::filter::LevelFilter;

        let console = EnvFilter::new(build_console_directives().join(","));
        assert_eq!(console.max_level_hint(), Some(LevelFilter::WARN));

        let file = EnvFilter::new(build_filter_directives(false).join(","));
        assert_eq!(file.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_file_writer_creates_logs_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let logs_dir = dir.path().join("logs");

        // The guard slot is process-wide; only the directory side effect is checked.
        let _ = build_file_writer(&logs_dir);

        assert!(logs_dir.is_dir());
    }
}
