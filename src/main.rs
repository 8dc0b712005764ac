use std::process::ExitCode;

fn main() -> ExitCode {
    cw_cli::run()
}
