//! Search options shared by the `optimize` and `plan` commands.

use std::time::Duration;

use camino::Utf8Path;
use clap::ValueEnum;
use greenroute_core::{
    DEFAULT_TIME_LIMIT, DistanceMetric, SolveError, SolveRequest, SolveResponse, Solver, Stop,
};
use greenroute_solver::{LocalSearchConfig, LocalSearchSolver};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Distance metric names accepted on the command line and in config files.
///
/// Mirrors [`DistanceMetric`] so that `clap` stays out of the core crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MetricArg {
    /// Straight lines on raw degrees.
    #[default]
    Euclidean,
    /// Great-circle distance.
    Haversine,
}

impl From<MetricArg> for DistanceMetric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Euclidean => Self::Euclidean,
            MetricArg::Haversine => Self::Haversine,
        }
    }
}

/// Resolved solver options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchSettings {
    /// Overrides the request's own limit when set.
    pub(crate) time_limit: Option<Duration>,
    pub(crate) metric: DistanceMetric,
    pub(crate) or_opt: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            time_limit: None,
            metric: DistanceMetric::Euclidean,
            or_opt: true,
        }
    }
}

impl SearchSettings {
    pub(crate) fn from_options(
        time_limit_ms: Option<u64>,
        metric: Option<MetricArg>,
        or_opt: Option<bool>,
    ) -> Self {
        Self {
            time_limit: time_limit_ms.map(Duration::from_millis),
            metric: metric.unwrap_or_default().into(),
            or_opt: or_opt.unwrap_or(true),
        }
    }

    /// Request for `stops`, honouring the configured limit.
    pub(crate) fn request(&self, stops: Vec<Stop>) -> SolveRequest {
        SolveRequest::new(stops).with_time_limit(self.time_limit.unwrap_or(DEFAULT_TIME_LIMIT))
    }

    pub(crate) fn solver(&self) -> impl Solver {
        LocalSearchSolver::with_model(self.metric).with_config(LocalSearchConfig {
            or_opt: self.or_opt,
            ..LocalSearchConfig::default()
        })
    }
}

/// Run the configured solver, logging a one-line summary.
///
/// Validation failures are reported against `source`, the file the request
/// was read from.
pub(crate) fn solve(
    settings: &SearchSettings,
    request: &SolveRequest,
    source: &Utf8Path,
) -> Result<SolveResponse, CliError> {
    let response = settings.solver().solve(request).map_err(|err| match err {
        SolveError::InvalidInput(rule) => CliError::InvalidRequest {
            path: source.to_path_buf(),
            source: rule,
        },
        other => CliError::Solve { source: other },
    })?;
    log::info!(
        "ordered {} stops in {:?}: {:.3} {} ({:?}, cost {})",
        request.stops.len(),
        response.diagnostics.solve_time,
        settings.metric.unscale(response.cost),
        unit_name(settings.metric),
        settings.metric,
        response.cost,
    );
    Ok(response)
}

const fn unit_name(metric: DistanceMetric) -> &'static str {
    match metric {
        DistanceMetric::Euclidean => "degrees",
        DistanceMetric::Haversine => "metres",
    }
}
