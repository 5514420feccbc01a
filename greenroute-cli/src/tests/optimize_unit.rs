//! Focused unit tests covering optimize CLI configuration and execution.

use super::helpers::{Workspace, square_request, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use crate::optimize::{OptimizeConfig, config_from_layers_for_test, execute_optimize};
use crate::search::SearchSettings;
use greenroute_core::{DistanceMetric, SolveRequestValidationError};
use ortho_config::MergeComposer;
use rstest::{fixture, rstest};
use serde_json::json;
use std::time::Duration;

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn config_for(request_path: Utf8PathBuf) -> OptimizeConfig {
    OptimizeConfig {
        request_path,
        settings: SearchSettings::default(),
    }
}

#[rstest]
fn converting_without_request_errors() {
    let err = OptimizeConfig::try_from(OptimizeArgs::default())
        .expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_OPTIMIZE_REQUEST);
            assert_eq!(env, ENV_OPTIMIZE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn unset_options_fall_back_to_defaults() {
    let args = OptimizeArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        ..OptimizeArgs::default()
    };
    let config = OptimizeConfig::try_from(args).expect("config should build");
    assert_eq!(config.settings, SearchSettings::default());
}

#[rstest]
fn square_request_is_routed_around_the_perimeter(workspace: Workspace) {
    let path = workspace.write_json("request.json", &square_request(500));
    let response = execute_optimize(&config_for(path)).expect("optimize should succeed");
    assert_eq!(response.route.as_slice(), &[0, 1, 2, 3]);
    assert_eq!(response.cost, 3_000_000);
}

#[rstest]
fn zero_limit_in_request_is_rejected(workspace: Workspace) {
    let path = workspace.write_json("request.json", &square_request(0));
    let err = execute_optimize(&config_for(path)).expect_err("expected invalid request");
    match err {
        CliError::InvalidRequest { source, .. } => {
            assert_eq!(source, SolveRequestValidationError::NonPositiveTimeLimit);
        }
        other => panic!("expected InvalidRequest, found {other:?}"),
    }
}

#[rstest]
fn stop_off_the_globe_names_the_request_file(workspace: Workspace) {
    let path = workspace.write_json(
        "request.json",
        &json!({
            "coords": [
                { "latitude": 0.0, "longitude": 0.0 },
                { "latitude": 1.0e300, "longitude": 0.0 },
            ],
        }),
    );
    let err = execute_optimize(&config_for(path.clone())).expect_err("expected invalid request");
    match err {
        CliError::InvalidRequest { path: reported, source } => {
            assert_eq!(reported, path);
            assert_eq!(
                source,
                SolveRequestValidationError::CoordinateOutOfRange { index: 1 }
            );
        }
        other => panic!("expected InvalidRequest, found {other:?}"),
    }
}

#[rstest]
fn configured_limit_overrides_the_request(workspace: Workspace) {
    let path = workspace.write_json("request.json", &square_request(0));
    let config = OptimizeConfig {
        request_path: path,
        settings: SearchSettings {
            time_limit: Some(Duration::from_millis(500)),
            ..SearchSettings::default()
        },
    };
    let response = execute_optimize(&config).expect("override should make the request valid");
    assert_eq!(response.cost, 3_000_000);
}

#[rstest]
fn single_stop_needs_no_valid_limit(workspace: Workspace) {
    let path = workspace.write_json(
        "request.json",
        &json!({ "coords": [{ "latitude": 1.0, "longitude": 2.0 }], "time_limit_ms": 0 }),
    );
    let response = execute_optimize(&config_for(path)).expect("trivial request succeeds");
    assert_eq!(response.route.as_slice(), &[0]);
}

#[rstest]
fn missing_request_file_is_reported(workspace: Workspace) {
    let err = execute_optimize(&config_for(workspace.path("absent.json")))
        .expect_err("expected missing file");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_OPTIMIZE_REQUEST),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn directory_request_path_is_rejected(workspace: Workspace) {
    let path = workspace.path("request.json");
    std::fs::create_dir(&path).expect("request directory");
    let err = execute_optimize(&config_for(path.clone())).expect_err("expected not-a-file");
    match err {
        CliError::SourcePathNotFile { field, path: reported } => {
            assert_eq!(field, ARG_OPTIMIZE_REQUEST);
            assert_eq!(reported, path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn malformed_request_is_reported(workspace: Workspace) {
    let path = workspace.path("request.json");
    write_utf8(&path, b"{ \"coords\": [");
    let err = execute_optimize(&config_for(path)).expect_err("expected parse failure");
    match err {
        CliError::ParseInput { .. } => {}
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": "from-file.json",
            "metric": "haversine",
            "time_limit_ms": 100,
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": "from-env.json",
        "or_opt": false,
    }));
    composer.push_cli(json!({ "time_limit_ms": 250 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, Utf8PathBuf::from("from-env.json"));
    assert_eq!(
        config.settings,
        SearchSettings {
            time_limit: Some(Duration::from_millis(250)),
            metric: DistanceMetric::Haversine,
            or_opt: false,
        }
    );
}

#[rstest]
fn invalid_layer_maps_to_configuration_error() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "metric": "manhattan" }));
    let err = config_from_layers_for_test(composer.layers())
        .expect_err("unknown metric should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn metric_flag_is_parsed() {
    let cli = Cli::try_parse_from(["greenroute", "optimize", "req.json", "--metric", "haversine"])
        .expect("arguments should parse");
    match cli.command {
        Command::Optimize(args) => {
            assert_eq!(args.metric, Some(crate::search::MetricArg::Haversine));
            assert_eq!(args.request_path, Some(Utf8PathBuf::from("req.json")));
        }
        Command::Plan(_) => panic!("expected optimize command"),
    }
}
