//! `plan` command: order one day's scheduled jobs for a crew.
//!
//! The first eligible job in file order acts as the depot. Jobs without a
//! recorded position cannot be routed; they are reported separately instead
//! of failing the plan.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use greenroute_core::{Cost, SolveError, Stop, TourError};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::fs::{load_json, require_existing, write_json};
use crate::search::{self, MetricArg, SearchSettings};
use crate::{
    ARG_CREW, ARG_DATE, ARG_METRIC, ARG_OR_OPT, ARG_PLAN_JOBS, ARG_TIME_LIMIT_MS, CliError,
    ENV_PLAN_JOBS,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, DATE_FORMAT)
}

/// A scheduled job as exported by the operations database.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct Job {
    pub(crate) id: u64,
    pub(crate) client_id: u64,
    #[serde(default)]
    pub(crate) crew_id: Option<u64>,
    pub(crate) service: String,
    pub(crate) scheduled: Date,
    pub(crate) price: f64,
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
}

impl Job {
    fn stop(&self) -> Option<Stop> {
        Some(Stop::new(self.latitude?, self.longitude?))
    }
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a JSON array of job records, keep those scheduled for \
                 one day (and optionally one crew) and print them in visiting \
                 order. Jobs without coordinates are listed as skipped.",
    about = "Order one day's scheduled jobs"
)]
#[ortho_config(prefix = "GREENROUTE")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing job records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) jobs_path: Option<Utf8PathBuf>,
    /// Day to plan (YYYY-MM-DD); defaults to today in UTC.
    #[arg(long = ARG_DATE, value_name = "date", value_parser = parse_date)]
    #[serde(default)]
    pub(crate) date: Option<Date>,
    /// Only plan jobs assigned to this crew.
    #[arg(long = ARG_CREW, value_name = "id")]
    #[serde(default)]
    pub(crate) crew: Option<u64>,
    /// Search budget in milliseconds.
    #[arg(long = ARG_TIME_LIMIT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
    /// Distance metric used to cost legs.
    #[arg(long = ARG_METRIC, value_enum)]
    #[serde(default)]
    pub(crate) metric: Option<MetricArg>,
    /// Whether to relocate short segments once 2-opt stalls.
    #[arg(long = ARG_OR_OPT, value_name = "bool")]
    #[serde(default)]
    pub(crate) or_opt: Option<bool>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) jobs_path: Utf8PathBuf,
    pub(crate) date: Date,
    pub(crate) crew: Option<u64>,
    pub(crate) settings: SearchSettings,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let jobs_path = args.jobs_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_JOBS,
            env: ENV_PLAN_JOBS,
        })?;
        Ok(Self {
            jobs_path,
            date: args
                .date
                .unwrap_or_else(|| OffsetDateTime::now_utc().date()),
            crew: args.crew,
            settings: SearchSettings::from_options(args.time_limit_ms, args.metric, args.or_opt),
        })
    }
}

/// Jobs for one day in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Plan {
    pub(crate) date: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) crew: Option<u64>,
    pub(crate) cost: Cost,
    pub(crate) jobs: Vec<Job>,
    /// Ids of eligible jobs left out for lack of coordinates.
    pub(crate) skipped: Vec<u64>,
}

pub(crate) fn run_plan(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let plan = execute_plan(&config)?;
    write_json(writer, &plan)
}

pub(crate) fn execute_plan(config: &PlanConfig) -> Result<Plan, CliError> {
    require_existing(&config.jobs_path, ARG_PLAN_JOBS)?;
    let jobs: Vec<Job> = load_json(&config.jobs_path)?;
    plan_jobs(jobs, config)
}

/// Select and order the jobs `config` asks for.
pub(crate) fn plan_jobs(jobs: Vec<Job>, config: &PlanConfig) -> Result<Plan, CliError> {
    let mut routable = Vec::new();
    let mut stops = Vec::new();
    let mut skipped = Vec::new();
    for job in jobs {
        if job.scheduled != config.date || config.crew.is_some_and(|crew| job.crew_id != Some(crew))
        {
            continue;
        }
        match job.stop() {
            Some(stop) => {
                stops.push(stop);
                routable.push(job);
            }
            None => {
                log::warn!("job {} has no coordinates; leaving it out of the route", job.id);
                skipped.push(job.id);
            }
        }
    }

    let request = config.settings.request(stops);
    let response = search::solve(&config.settings, &request, &config.jobs_path)?;
    let ordered = response
        .route
        .reorder(&routable)
        .ok_or_else(|| CliError::Solve {
            source: SolveError::from(TourError::LengthMismatch {
                expected: routable.len(),
                actual: response.route.len(),
            }),
        })?;

    Ok(Plan {
        date: config.date,
        crew: config.crew,
        cost: response.cost,
        jobs: ordered,
        skipped,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
