//! Process entry: parse arguments, load config, start tracing, wire, run.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use cw_app::SessionController;
use cw_core::config::AppConfig;
use cw_core::ports::AppDirsPort;
use cw_infra::fs::DirsAppDirsAdapter;

use super::config::resolve_config;
use super::tracing::init_tracing_subscriber;
use super::wiring::wire_dependencies;
use crate::adapters::TerminalNotifier;
use crate::cli::{Cli, Command};
use crate::commands::output::{needs_report, render_json, render_snapshot};
use crate::commands::{execute, run_shell};

/// Run the binary. Exit code 1 on any failure.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    match start(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn start(cli: Cli) -> anyhow::Result<ExitCode> {
    let app_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("Failed to resolve application data directory")?;
    let config = resolve_config(cli.config.clone(), &app_dirs)?;

    init_tracing_subscriber(&app_dirs.logs_dir()).context("Failed to initialize tracing")?;
    info!(
        base_url = %config.base_url,
        database = %config.database_path.display(),
        "campus-water starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run_command(cli, config))
}

async fn run_command(cli: Cli, config: AppConfig) -> anyhow::Result<ExitCode> {
    let notifier = Arc::new(TerminalNotifier::new(cli.json));
    let deps = wire_dependencies(&config, notifier)?;
    let controller = SessionController::new(deps);

    let command = cli.resolved_command();
    if command == Command::Shell {
        run_shell(&controller).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = execute(&controller, command).await?;
    let snapshot = controller.snapshot();
    if cli.json {
        println!("{}", render_json(&snapshot));
    } else if outcome.is_ok() {
        println!("{}", render_snapshot(&snapshot));
    }

    match outcome {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            if needs_report(&e) {
                eprintln!("error: {e}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
