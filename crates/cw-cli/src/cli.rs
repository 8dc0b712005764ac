//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "campus-water", version, about = "Campus water valve client")]
pub struct Cli {
    /// Config file (default: <data dir>/config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the final session snapshot as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive session (default)
    Shell,
    /// Log in and remember the credential
    Login {
        #[arg(long)]
        phone: String,
        /// Prompted on the terminal, without echo, when neither the flag nor CW_PASSWORD is set
        #[arg(long, env = "CW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored credential
    Logout,
    /// Show the account balance
    Balance,
    /// Open the valve
    Start,
    /// Close the valve
    Stop,
    /// Show the current session
    Status,
}

impl Cli {
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Shell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["campus-water"]).unwrap();
        assert_eq!(cli.resolved_command(), Command::Shell);
        assert!(!cli.json);
    }

    #[test]
    fn login_takes_phone_and_optional_password() {
        let cli = Cli::try_parse_from([
            "campus-water",
            "login",
            "--phone",
            "13800000000",
            "--password",
            "abc123",
        ])
        .unwrap();
        assert_eq!(
            cli.resolved_command(),
            Command::Login {
                phone: "13800000000".to_string(),
                password: Some("abc123".to_string()),
            }
        );

        assert!(Cli::try_parse_from(["campus-water", "login"]).is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli =
            Cli::try_parse_from(["campus-water", "stop", "--json", "--config", "/tmp/cw.toml"])
                .unwrap();
        assert_eq!(cli.resolved_command(), Command::Stop);
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/cw.toml")));
    }
}
