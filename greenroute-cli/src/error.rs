//! Error types emitted by the greenroute CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use greenroute_core::{SolveError, SolveRequestValidationError};
use thiserror::Error;

/// Errors emitted by the greenroute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name of the offending option.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name of the offending option.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name of the offending option.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening an input file failed.
    #[error("failed to open {path:?}: {source}")]
    OpenInput {
        /// Path as given.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// An input file did not hold the expected JSON.
    #[error("failed to parse JSON at {path:?}: {source}")]
    ParseInput {
        /// Path as given.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The assembled request failed validation.
    #[error("request from {path:?} failed validation: {source}")]
    InvalidRequest {
        /// File the request was built from.
        path: Utf8PathBuf,
        /// Rule that failed.
        #[source]
        source: SolveRequestValidationError,
    },
    /// The solver could not produce a route.
    #[error("solver failed: {source}")]
    Solve {
        /// Solver failure.
        #[source]
        source: SolveError,
    },
    /// Serialising the output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
