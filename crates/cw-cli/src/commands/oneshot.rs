//! Single-command mode: one operation per process.

use anyhow::Context;
use tracing::{info_span, Instrument};

use cw_app::{ResumeOutcome, SessionController, SessionError};
use cw_core::{Password, SessionSnapshot};

use super::prompt::ask_password;
use crate::cli::Command;

/// Run one command and return the final snapshot.
///
/// The outer error covers terminal I/O; the inner one is the controller's
/// answer. Everything except `login` and `logout` first resumes the stored
/// credential, and `status` is the only one that succeeds without it.
pub async fn execute(
    controller: &SessionController,
    command: Command,
) -> anyhow::Result<Result<SessionSnapshot, SessionError>> {
    let span = info_span!("cli.execute", command = command_name(&command));

    async {
        let result = match command {
            Command::Login { phone, password } => {
                let password = match password {
                    Some(pw) => Password::new(pw),
                    None => read_password().await?,
                };
                controller.login(&phone, &password).await
            }
            Command::Shell => anyhow::bail!("shell is not a one-shot command"),
            other => dispatch(controller, other).await,
        };
        Ok(result)
    }
    .instrument(span)
    .await
}

async fn dispatch(
    controller: &SessionController,
    command: Command,
) -> Result<SessionSnapshot, SessionError> {
    match command {
        Command::Logout => {
            controller.logout().await?;
        }
        Command::Status => {
            controller.resume().await?;
        }
        Command::Balance => {
            resume_required(controller).await?;
        }
        Command::Start => {
            resume_required(controller).await?;
            controller.start_valve().await?;
        }
        Command::Stop => {
            resume_required(controller).await?;
            controller.stop_valve().await?;
        }
        Command::Login { .. } | Command::Shell => {}
    }
    Ok(controller.snapshot())
}

/// Resume, treating an empty store as not logged in. The resume check
/// already fetches the balance.
async fn resume_required(controller: &SessionController) -> Result<SessionSnapshot, SessionError> {
    match controller.resume().await? {
        ResumeOutcome::Resumed(snapshot) => Ok(snapshot),
        ResumeOutcome::NoCredential => Err(SessionError::NotLoggedIn),
    }
}

async fn read_password() -> anyhow::Result<Password> {
    let line = ask_password()
        .await
        .context("Failed to read password from the terminal")?;
    Ok(Password::new(line))
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Shell => "shell",
        Command::Login { .. } => "login",
        Command::Logout => "logout",
        Command::Balance => "balance",
        Command::Start => "start",
        Command::Stop => "stop",
        Command::Status => "status",
    }
}
