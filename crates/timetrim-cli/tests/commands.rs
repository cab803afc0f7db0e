//! Command tests against snapshot files on disk.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use timetrim_cli::commands::{
    PolicyArgs, check::CheckArgs, plan::PlanArgs, prune::PruneArgs, show_stop::ShowStopArgs,
};
use timetrim_cli::commands::{check, plan, prune, show_stop};
use timetrim_cli::OutputFormat;
use timetrim_core::{MemorySchedule, ScheduleGraph, ScheduleSnapshot, StopId};
use timetrim_prune::PrunePolicy;
use timetrim_test_utils::{ScheduleBuilder, ScheduleFactory, date, ids};

fn write_schedule(dir: &TempDir, name: &str, schedule: &MemorySchedule) -> PathBuf {
    let path = dir.path().join(name);
    ScheduleSnapshot::from_schedule(schedule)
        .write_to_path(&path)
        .unwrap();
    path
}

fn read_schedule(path: &Path) -> MemorySchedule {
    ScheduleSnapshot::from_path(path).unwrap().into_schedule()
}

fn prune_args(cutoff: u32, input: PathBuf, output: PathBuf) -> PruneArgs {
    PruneArgs {
        date_cutoff: date(cutoff),
        input,
        output,
        list_removed: false,
        policy: PolicyArgs::default(),
    }
}

#[test]
fn prune_writes_pruned_snapshot() {
    let dir = TempDir::new().unwrap();
    let input = write_schedule(&dir, "in.json", &ScheduleFactory::canonical());
    let output = dir.path().join("out.json");

    let mut out = Vec::new();
    let report = prune::run(
        &prune_args(20_170_101, input.clone(), output.clone()),
        PrunePolicy::default(),
        OutputFormat::Text,
        &mut out,
    )
    .unwrap();

    assert_eq!(report.total_removed(), 5);
    let pruned = read_schedule(&output);
    assert_eq!(ids(pruned.routes().map(|r| &r.id)), ["R2"]);
    assert_eq!(ids(pruned.stops().map(|s| &s.id)), ["P2"]);
    // Stop-times of removed trips go with them.
    assert_eq!(pruned.stop_times().len(), 1);

    // The input is left alone.
    assert_eq!(read_schedule(&input), ScheduleFactory::canonical());
    assert!(String::from_utf8(out).unwrap().contains("Pruned at cutoff 20170101"));
}

#[test]
fn prune_json_output_carries_report_and_events() {
    let dir = TempDir::new().unwrap();
    let input = write_schedule(&dir, "in.json", &ScheduleFactory::canonical());
    let mut args = prune_args(20_170_101, input, dir.path().join("out.json"));
    args.list_removed = true;

    let mut out = Vec::new();
    prune::run(&args, PrunePolicy::default(), OutputFormat::Json, &mut out).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["report"]["cutoff"], "20170101");
    assert_eq!(
        json["report"]["routes"]["removedIds"],
        serde_json::json!(["R1", "R3"])
    );
    // One expire, three cascade and four apply events.
    assert_eq!(json["events"].as_array().unwrap().len(), 8);
    assert_eq!(json["events"][0]["stage"], "expire");
}

#[test]
fn rejected_cutoff_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_schedule(&dir, "in.json", &ScheduleFactory::canonical());
    let output = dir.path().join("out.json");

    let err = prune::run(
        &prune_args(20_300_101, input, output.clone()),
        PrunePolicy::default(),
        OutputFormat::Text,
        &mut Vec::new(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("cutoff"), "{err}");
    assert!(!output.exists());
}

#[test]
fn policy_flags_widen_bounds_and_keep_orphans() {
    let dir = TempDir::new().unwrap();
    let input = write_schedule(&dir, "in.json", &ScheduleFactory::canonical());
    let output = dir.path().join("out.json");
    let mut args = prune_args(20_170_101, input, output.clone());
    args.policy.keep_orphans = true;

    prune::run(
        &args,
        PrunePolicy::default(),
        OutputFormat::Table,
        &mut Vec::new(),
    )
    .unwrap();

    let pruned = read_schedule(&output);
    assert_eq!(ids(pruned.routes().map(|r| &r.id)), ["R2", "R3"]);

    let mut args = prune_args(20_300_101, output.clone(), output.clone());
    args.policy.cutoff_max = Some(date(20_301_231));
    let report = prune::run(
        &args,
        PrunePolicy::default(),
        OutputFormat::Text,
        &mut Vec::new(),
    )
    .unwrap();
    assert_eq!(report.service_periods.removed_ids, ["S2"]);
}

#[test]
fn plan_does_not_touch_input() {
    let dir = TempDir::new().unwrap();
    let input = write_schedule(&dir, "in.json", &ScheduleFactory::canonical());
    let before = std::fs::read(&input).unwrap();

    let args = PlanArgs {
        date_cutoff: date(20_170_101),
        input: input.clone(),
        policy: PolicyArgs::default(),
    };
    let mut out = Vec::new();
    let plan = plan::run(&args, PrunePolicy::default(), OutputFormat::Json, &mut out)
        .unwrap();

    assert_eq!(plan.len(), 5);
    assert_eq!(std::fs::read(&input).unwrap(), before);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["plan"]["trips"], serde_json::json!(["T1"]));
    assert_eq!(
        json["events"][2]["removedEntities"][0]["label"],
        serde_json::json!("1")
    );
}

#[test]
fn show_stop_filters_by_date() {
    let dir = TempDir::new().unwrap();
    let input = write_schedule(&dir, "in.json", &ScheduleFactory::canonical());

    let mut args = ShowStopArgs {
        stop_id: StopId::new("P2").unwrap(),
        date: None,
        input,
    };
    let info = show_stop::run(&args, OutputFormat::Text, &mut Vec::new()).unwrap();
    assert_eq!(info.trips.len(), 2);

    args.date = Some(date(20_170_601));
    let mut out = Vec::new();
    let info = show_stop::run(&args, OutputFormat::Table, &mut out).unwrap();
    assert_eq!(info.trips.len(), 1);
    assert_eq!(info.trips[0].trip.id.as_str(), "T2");
    assert_eq!(info.inactive_trips, 1);
    assert!(String::from_utf8(out).unwrap().contains("T2"));
}

#[test]
fn show_stop_unknown_stop_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_schedule(&dir, "in.json", &ScheduleFactory::canonical());
    let args = ShowStopArgs {
        stop_id: StopId::new("NOPE").unwrap(),
        date: None,
        input,
    };

    let err = show_stop::run(&args, OutputFormat::Text, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("NOPE"), "{err}");
}

#[test]
fn check_reports_dangling_references() {
    let dir = TempDir::new().unwrap();
    let clean = write_schedule(&dir, "clean.json", &ScheduleFactory::canonical());
    let broken = write_schedule(
        &dir,
        "broken.json",
        &ScheduleBuilder::new()
            .route("R1")
            .trip("T1", "GONE", "R1")
            .build(),
    );

    let violations = check::run(
        &CheckArgs { input: clean },
        OutputFormat::Text,
        &mut Vec::new(),
    )
    .unwrap();
    assert!(violations.is_empty());

    let mut out = Vec::new();
    let violations = check::run(
        &CheckArgs { input: broken },
        OutputFormat::Json,
        &mut out,
    )
    .unwrap();
    assert_eq!(violations.len(), 1);
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json[0]["kind"], "trip_missing_service");
}
