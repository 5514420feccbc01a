//! Command-line interface for greenroute's route optimiser.
//!
//! `greenroute optimize` orders the stops of a coordinate request and prints
//! `{"route": [...], "cost": n}`. `greenroute plan` takes a file of job
//! records, keeps those scheduled for one day (and optionally one crew), and
//! prints them in visiting order.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod optimize;
mod plan;
mod search;

pub use error::CliError;

use optimize::OptimizeArgs;
use plan::PlanArgs;

const ARG_OPTIMIZE_REQUEST: &str = "request";
const ENV_OPTIMIZE_REQUEST: &str = "GREENROUTE_CMDS_OPTIMIZE_REQUEST_PATH";
const ARG_PLAN_JOBS: &str = "jobs";
const ENV_PLAN_JOBS: &str = "GREENROUTE_CMDS_PLAN_JOBS_PATH";
const ARG_TIME_LIMIT_MS: &str = "time-limit-ms";
const ARG_METRIC: &str = "metric";
const ARG_OR_OPT: &str = "or-opt";
const ARG_DATE: &str = "date";
const ARG_CREW: &str = "crew";

/// Run the greenroute CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or inputs are invalid,
/// or when the result cannot be written to standard output.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Optimize(args) => optimize::run_optimize(args, &mut stdout),
        Command::Plan(args) => plan::run_plan(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "greenroute",
    about = "Order a crew's stops for the day",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order the stops of a coordinate request.
    Optimize(OptimizeArgs),
    /// Order one day's scheduled jobs.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
