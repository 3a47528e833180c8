//! Focused unit tests covering the flag ledger commands.

use super::helpers::{Workspace, output_string};
use super::*;
use crate::ledger::{
    FlagArgs, FlagConfig, ResolveConfig, apply_flag, apply_resolve, load_ledger, lock_ledger,
    write_report,
};
use camino::Utf8PathBuf;
use chrono::{DateTime, TimeZone};
use parkbench_core::{FlagError, FlagReason};
use rstest::{fixture, rstest};

#[fixture]
fn raised_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 19, 14, 0, 0)
        .single()
        .expect("valid timestamp")
}

const fn flag_config(ledger: Utf8PathBuf) -> FlagConfig {
    FlagConfig {
        ledger,
        bench: 3,
        user: 7,
        reason: FlagReason::Dirty,
        note: None,
    }
}

fn run_to_string(action: impl FnOnce(&mut Vec<u8>) -> Result<(), CliError>) -> String {
    let mut buffer = Vec::new();
    action(&mut buffer).expect("command should succeed");
    output_string(buffer)
}

#[rstest]
fn converting_flag_rejects_unknown_reasons() {
    let args = FlagArgs {
        ledger: Some(Utf8PathBuf::from("flags.json")),
        bench: Some(3),
        user: Some(7),
        reason: Some("wobbly".to_owned()),
        note: None,
    };
    match FlagConfig::try_from(args).expect_err("unknown reason") {
        CliError::Flag(FlagError::UnknownReason { reason }) => assert_eq!(reason, "wobbly"),
        other => panic!("expected UnknownReason, found {other:?}"),
    }
}

#[rstest]
fn converting_flag_without_ledger_errors() {
    let args = FlagArgs {
        bench: Some(3),
        user: Some(7),
        reason: Some("dirty".to_owned()),
        ..FlagArgs::default()
    };
    match FlagConfig::try_from(args).expect_err("missing ledger") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_LEDGER);
            assert_eq!(env, ENV_FLAG_LEDGER);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn missing_ledger_files_load_empty() {
    let workspace = Workspace::new();
    let ledger = load_ledger(&workspace.path("flags.json")).expect("load ledger");
    assert!(ledger.flags().is_empty());
}

#[rstest]
fn corrupt_ledger_files_report_path() {
    let workspace = Workspace::new();
    let path = workspace.write("flags.json", "not json");
    match load_ledger(&path).expect_err("corrupt ledger") {
        CliError::ParseLedger { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseLedger, found {other:?}"),
    }
}

#[rstest]
fn flagging_creates_and_persists_the_ledger(raised_at: DateTime<Utc>) {
    let workspace = Workspace::new();
    let path = workspace.path("data/flags.json");
    let config = flag_config(path.clone());

    let message = run_to_string(|out| apply_flag(&config, raised_at, out));
    assert_eq!(message, "Bench 3 flagged for dirty by user 7\n");

    let ledger = load_ledger(&path).expect("reload ledger");
    assert_eq!(ledger.active_count_for(3), 1);
}

#[rstest]
fn report_lists_active_flags(raised_at: DateTime<Utc>) {
    let workspace = Workspace::new();
    let path = workspace.path("flags.json");
    run_to_string(|out| apply_flag(&flag_config(path.clone()), raised_at, out));

    let report = run_to_string(|out| write_report(&path, out));
    assert_eq!(
        report,
        "Currently flagged benches:\n\
         Bench ID: 3, Reason: dirty, Flagged By: User 7, Date: 2025-10-19T14:00:00.000Z\n"
    );
}

#[rstest]
fn resolving_clears_the_report(raised_at: DateTime<Utc>) {
    let workspace = Workspace::new();
    let path = workspace.path("flags.json");
    run_to_string(|out| apply_flag(&flag_config(path.clone()), raised_at, out));

    let resolve = ResolveConfig {
        ledger: path.clone(),
        bench: 3,
        user: 9,
    };
    let message = run_to_string(|out| apply_resolve(&resolve, out));
    assert_eq!(message, "Flag for bench 3 resolved by user 9.\n");

    let report = run_to_string(|out| write_report(&path, out));
    assert_eq!(report, "No benches are currently flagged.\n");
}

#[rstest]
fn resolving_without_flags_fails() {
    let workspace = Workspace::new();
    let resolve = ResolveConfig {
        ledger: workspace.path("flags.json"),
        bench: 4,
        user: 9,
    };
    match apply_resolve(&resolve, &mut Vec::new()).expect_err("nothing to resolve") {
        CliError::Flag(FlagError::NoActiveFlag { bench_id }) => assert_eq!(bench_id, 4),
        other => panic!("expected NoActiveFlag, found {other:?}"),
    }
}

#[rstest]
fn concurrent_updates_are_refused_while_locked(raised_at: DateTime<Utc>) {
    let workspace = Workspace::new();
    let path = workspace.path("flags.json");
    let held = lock_ledger(&path).expect("hold ledger lock");

    match apply_flag(&flag_config(path.clone()), raised_at, &mut Vec::new())
        .expect_err("ledger is locked")
    {
        CliError::LedgerLocked {
            path: reported,
            marker,
        } => {
            assert_eq!(reported, path);
            assert_eq!(marker, workspace.path(".flags.json.lock"));
        }
        other => panic!("expected LedgerLocked, found {other:?}"),
    }
    assert!(load_ledger(&path).expect("reload ledger").flags().is_empty());

    drop(held);
    run_to_string(|out| apply_flag(&flag_config(path.clone()), raised_at, out));
    assert_eq!(load_ledger(&path).expect("reload ledger").active_count_for(3), 1);
}
