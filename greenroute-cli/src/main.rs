//! Entry point for the `greenroute` command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use greenroute_cli::CliError;

fn main() -> ExitCode {
    env_logger::init();
    match greenroute_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            log::debug!("command failed: {err:?}");
            eprintln!("greenroute: {err}");
            ExitCode::FAILURE
        }
    }
}
