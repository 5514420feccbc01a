//! `optimize` command: order the stops of a coordinate request file.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use greenroute_core::{SolveRequest, SolveResponse};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{load_json, require_existing, write_json};
use crate::search::{self, MetricArg, SearchSettings};
use crate::{
    ARG_METRIC, ARG_OPTIMIZE_REQUEST, ARG_OR_OPT, ARG_TIME_LIMIT_MS, CliError,
    ENV_OPTIMIZE_REQUEST,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the stops of a JSON request of the form \
                 {\"coords\": [{\"latitude\": .., \"longitude\": ..}, ..]}. \
                 The first stop is the depot. Prints the visiting order and \
                 its cost.",
    about = "Order the stops of a coordinate request"
)]
#[ortho_config(prefix = "GREENROUTE")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing the request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Search budget in milliseconds; overrides the request's own limit.
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

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimizeConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) settings: SearchSettings,
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_OPTIMIZE_REQUEST,
            env: ENV_OPTIMIZE_REQUEST,
        })?;
        Ok(Self {
            request_path,
            settings: SearchSettings::from_options(args.time_limit_ms, args.metric, args.or_opt),
        })
    }
}

pub(crate) fn run_optimize(args: OptimizeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let response = execute_optimize(&config)?;
    write_json(writer, &response)
}

pub(crate) fn execute_optimize(config: &OptimizeConfig) -> Result<SolveResponse, CliError> {
    require_existing(&config.request_path, ARG_OPTIMIZE_REQUEST)?;
    let mut request: SolveRequest = load_json(&config.request_path)?;
    if let Some(limit) = config.settings.time_limit {
        request.time_limit = limit;
    }
    search::solve(&config.settings, &request, &config.request_path)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
