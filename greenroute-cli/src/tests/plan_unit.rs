//! Focused unit tests covering job selection and ordering for `plan`.

use super::helpers::Workspace;
use super::*;
use crate::plan::{Job, PlanConfig, config_from_layers_for_test, execute_plan, plan_jobs};
use crate::search::SearchSettings;
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use rstest::{fixture, rstest};
use serde_json::json;
use time::macros::date;

const PLAN_DAY: time::Date = date!(2024 - 05 - 06);

fn job(id: u64, crew_id: Option<u64>, scheduled: time::Date, position: Option<(f64, f64)>) -> Job {
    Job {
        id,
        client_id: 100 + id,
        crew_id,
        service: "mowing".to_owned(),
        scheduled,
        price: 45.0,
        latitude: position.map(|(latitude, _)| latitude),
        longitude: position.map(|(_, longitude)| longitude),
    }
}

#[fixture]
fn jobs() -> Vec<Job> {
    vec![
        job(10, Some(1), PLAN_DAY, Some((0.0, 0.0))),
        job(11, Some(1), PLAN_DAY, Some((0.0, 3.0))),
        job(12, Some(1), PLAN_DAY, Some((0.0, 1.0))),
        job(13, Some(1), PLAN_DAY, None),
        job(14, Some(2), PLAN_DAY, Some((0.0, 2.0))),
        job(15, Some(1), date!(2024 - 05 - 07), Some((0.0, 2.0))),
        job(16, Some(1), PLAN_DAY, Some((0.0, 2.0))),
    ]
}

fn config(crew: Option<u64>) -> PlanConfig {
    PlanConfig {
        jobs_path: Utf8PathBuf::from("jobs.json"),
        date: PLAN_DAY,
        crew,
        settings: SearchSettings::default(),
    }
}

fn ids(jobs: &[Job]) -> Vec<u64> {
    jobs.iter().map(|job| job.id).collect()
}

#[rstest]
fn plan_keeps_one_crew_and_day(jobs: Vec<Job>) {
    let plan = plan_jobs(jobs, &config(Some(1))).expect("plan should succeed");
    assert_eq!(ids(&plan.jobs), vec![10, 12, 16, 11]);
    assert_eq!(plan.cost, 300_000);
    assert_eq!(plan.skipped, vec![13]);
}

#[rstest]
fn plan_without_crew_covers_every_crew(jobs: Vec<Job>) {
    let plan = plan_jobs(jobs, &config(None)).expect("plan should succeed");
    assert_eq!(ids(&plan.jobs), vec![10, 12, 14, 16, 11]);
    assert_eq!(plan.skipped, vec![13]);
}

#[rstest]
#[case::no_jobs(Vec::new(), Vec::new())]
#[case::single_job(vec![job(20, Some(1), PLAN_DAY, Some((5.0, 5.0)))], vec![20])]
#[case::other_day_only(vec![job(21, Some(1), date!(2024 - 01 - 01), Some((5.0, 5.0)))], Vec::new())]
fn small_days_need_no_search(#[case] input: Vec<Job>, #[case] expected: Vec<u64>) {
    let plan = plan_jobs(input, &config(Some(1))).expect("plan should succeed");
    assert_eq!(ids(&plan.jobs), expected);
    assert_eq!(plan.cost, 0);
}

#[rstest]
fn job_off_the_globe_is_reported_against_the_jobs_file(mut jobs: Vec<Job>) {
    jobs.push(job(17, Some(1), PLAN_DAY, Some((120.0, 0.0))));
    let err = plan_jobs(jobs, &config(Some(1))).expect_err("expected invalid request");
    match err {
        CliError::InvalidRequest { path, source } => {
            assert_eq!(path, Utf8PathBuf::from("jobs.json"));
            assert_eq!(
                source,
                greenroute_core::SolveRequestValidationError::CoordinateOutOfRange { index: 4 }
            );
        }
        other => panic!("expected InvalidRequest, found {other:?}"),
    }
}

#[rstest]
fn jobs_file_is_loaded_and_ordered() {
    let workspace = Workspace::new();
    let path = workspace.write_json(
        "jobs.json",
        &json!([
            { "id": 1, "client_id": 7, "crew_id": 3, "service": "mulch", "scheduled": "2024-05-06",
              "price": 120.0, "latitude": 0.0, "longitude": 0.0 },
            { "id": 2, "client_id": 8, "crew_id": null, "service": "mowing", "scheduled": "2024-05-06",
              "price": 45.0, "latitude": 0.0, "longitude": 2.0 },
            { "id": 3, "client_id": 9, "service": "hedges", "scheduled": "2024-05-06",
              "price": 60.0, "latitude": 0.0, "longitude": 1.0 },
            { "id": 4, "client_id": 9, "service": "hedges", "scheduled": "2024-05-06",
              "price": 60.0, "latitude": null, "longitude": null },
        ]),
    );
    let config = PlanConfig {
        jobs_path: path,
        ..config(None)
    };
    let plan = execute_plan(&config).expect("plan should succeed");
    assert_eq!(ids(&plan.jobs), vec![1, 3, 2]);
    assert_eq!(plan.skipped, vec![4]);

    let rendered = serde_json::to_value(&plan).expect("plan should serialise");
    assert_eq!(rendered["date"], json!("2024-05-06"));
    assert!(rendered.get("crew").is_none());
}

#[rstest]
fn converting_without_jobs_path_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing jobs should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_JOBS);
            assert_eq!(env, ENV_PLAN_JOBS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn date_and_crew_flags_are_parsed() {
    let cli = Cli::try_parse_from([
        "greenroute",
        "plan",
        "jobs.json",
        "--date",
        "2024-05-06",
        "--crew",
        "2",
    ])
    .expect("arguments should parse");
    match cli.command {
        Command::Plan(args) => {
            assert_eq!(args.date, Some(PLAN_DAY));
            assert_eq!(args.crew, Some(2));
        }
        Command::Optimize(_) => panic!("expected plan command"),
    }
}

#[rstest]
fn malformed_date_flag_is_rejected() {
    let err = Cli::try_parse_from(["greenroute", "plan", "jobs.json", "--date", "06/05/2024"])
        .expect_err("expected date parse failure");
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[rstest]
fn date_can_come_from_the_environment_layer() {
    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "jobs_path": "jobs.json", "crew": 4 }), None);
    composer.push_environment(json!({ "date": "2024-05-06" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.date, PLAN_DAY);
    assert_eq!(config.crew, Some(4));
    assert_eq!(config.jobs_path, Utf8PathBuf::from("jobs.json"));
}
