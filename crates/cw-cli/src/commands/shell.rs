//! Interactive mode, the terminal counterpart of the single-screen app:
//! resume on launch, then read commands until `quit` or end of input.

use tracing::{debug, info};

use cw_app::{ResumeOutcome, SessionController, SessionError};
use cw_core::Password;

use super::output::{needs_report, render_snapshot};
use super::prompt::{ask_password, Prompt};

const HELP: &str = "\
commands:
  login <phone> [password]   log in (password is prompted when omitted)
  balance | refresh          refresh the balance
  start | open               open the valve
  stop | close               close the valve
  status                     show the session
  logout                     forget the stored login
  help                       this text
  quit | exit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login {
        phone: String,
        password: Option<String>,
    },
    Logout,
    Balance,
    Start,
    Stop,
    Status,
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ShellCommand::Empty);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "login" => {
            let phone = words
                .next()
                .ok_or_else(|| "usage: login <phone> [password]".to_string())?;
            ShellCommand::Login {
                phone: phone.to_string(),
                password: words.next().map(str::to_string),
            }
        }
        "logout" => ShellCommand::Logout,
        "balance" | "refresh" => ShellCommand::Balance,
        "start" | "open" => ShellCommand::Start,
        "stop" | "close" => ShellCommand::Stop,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };

    if words.next().is_some() {
        return Err(format!("too many arguments for `{head}`"));
    }
    Ok(command)
}

pub async fn run_shell(controller: &SessionController) -> anyhow::Result<()> {
    let mut prompt = Prompt::stdin();
    info!("interactive session started");

    match controller.resume().await {
        Ok(ResumeOutcome::Resumed(snapshot)) => println!("{}", render_snapshot(&snapshot)),
        Ok(ResumeOutcome::NoCredential) => println!("not logged in, use `login <phone>`"),
        Err(e) => debug!(error = %e, "startup check failed"),
    }

    while let Some(line) = prompt.ask("cw> ").await? {
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        let result = match command {
            ShellCommand::Empty => continue,
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Quit => break,
            ShellCommand::Status => {
                println!("{}", render_snapshot(&controller.snapshot()));
                continue;
            }
            ShellCommand::Login { phone, password } => {
                let password = match password {
                    Some(pw) => pw,
                    None => ask_password().await?,
                };
                let password = Password::new(password);
                controller.login(&phone, &password).await.map(|_| ())
            }
            ShellCommand::Logout => controller.logout().await,
            ShellCommand::Balance => controller.refresh_balance().await.map(|_| ()),
            ShellCommand::Start => controller.start_valve().await.map(|_| ()),
            ShellCommand::Stop => controller.stop_valve().await.map(|_| ()),
        };

        report(result);
        println!("{}", render_snapshot(&controller.snapshot()));
    }

    info!("interactive session ended");
    Ok(())
}

fn report(result: Result<(), SessionError>) {
    if let Err(e) = result {
        if needs_report(&e) {
            eprintln!("error: {e}");
        }
    }
}
