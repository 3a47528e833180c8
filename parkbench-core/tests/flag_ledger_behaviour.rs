#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural coverage for recording and resolving bench flags.

use std::cell::RefCell;

use chrono::{DateTime, TimeZone, Utc};
use parkbench_core::{FlagError, FlagLedger, FlagReason};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const BENCH_ID: u64 = 3;
const REPORTER_ID: u64 = 7;
const MODERATOR_ID: u64 = 9;

/// Shared state for each flag ledger scenario.
pub struct LedgerContext {
    ledger: RefCell<FlagLedger>,
    error: RefCell<Option<FlagError>>,
}

#[fixture]
/// Build a fresh `LedgerContext` for each scenario run.
pub fn context() -> LedgerContext {
    LedgerContext {
        ledger: RefCell::new(FlagLedger::new()),
        error: RefCell::new(None),
    }
}

fn raised_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 19, 14, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn flag_with_reason(context: &LedgerContext, raw_reason: &str) {
    match raw_reason.parse::<FlagReason>() {
        Ok(reason) => {
            context
                .ledger
                .borrow_mut()
                .flag_bench(BENCH_ID, REPORTER_ID, reason, None, raised_at());
        }
        Err(err) => {
            *context.error.borrow_mut() = Some(err);
        }
    }
}

#[given("an empty flag ledger")]
fn empty_ledger(context: &LedgerContext) {
    assert!(context.ledger.borrow().flags().is_empty());
}

#[given("a ledger where bench 3 was flagged as broken")]
fn ledger_with_broken_bench(context: &LedgerContext) {
    flag_with_reason(context, "broken");
}

#[when("user 7 flags bench 3 as dirty")]
fn flag_dirty(context: &LedgerContext) {
    flag_with_reason(context, "dirty");
}

#[when("user 7 flags bench 3 as wobbly")]
fn flag_wobbly(context: &LedgerContext) {
    flag_with_reason(context, "wobbly");
}

#[when("a moderator resolves the flag on bench 3")]
fn resolve_flag(context: &LedgerContext) {
    let outcome = context
        .ledger
        .borrow_mut()
        .resolve_flag(BENCH_ID, MODERATOR_ID);
    if let Err(err) = outcome {
        *context.error.borrow_mut() = Some(err);
    }
}

#[then("bench 3 has one active flag")]
fn one_active_flag(context: &LedgerContext) {
    assert_eq!(context.ledger.borrow().active_count_for(BENCH_ID), 1);
}

#[then("bench 3 has no active flags")]
fn no_active_flags(context: &LedgerContext) {
    assert_eq!(context.ledger.borrow().active_count_for(BENCH_ID), 0);
}

#[then("the report lists bench 3 as dirty")]
fn report_lists_bench(context: &LedgerContext) {
    let report = context.ledger.borrow().report();
    assert!(
        report.contains("Bench ID: 3, Reason: dirty, Flagged By: User 7"),
        "unexpected report: {report}"
    );
}

#[then("the report says no benches are flagged")]
fn report_is_empty(context: &LedgerContext) {
    assert_eq!(
        context.ledger.borrow().report(),
        "No benches are currently flagged."
    );
}

#[then("resolving fails because bench 3 has no active flag")]
fn resolving_fails(context: &LedgerContext) {
    assert_eq!(
        context.error.borrow().as_ref(),
        Some(&FlagError::NoActiveFlag { bench_id: BENCH_ID })
    );
}

#[then("flagging fails because the reason is unknown")]
fn flagging_fails(context: &LedgerContext) {
    let error = context.error.borrow();
    assert!(
        matches!(error.as_ref(), Some(FlagError::UnknownReason { reason }) if reason == "wobbly"),
        "expected an unknown reason error, got {error:?}"
    );
}

#[scenario(path = "tests/features/flag_ledger.feature", index = 0)]
fn flagging_lists_bench(context: LedgerContext) {
    let _ = context;
}

#[scenario(path = "tests/features/flag_ledger.feature", index = 1)]
fn resolving_clears_report(context: LedgerContext) {
    let _ = context;
}

#[scenario(path = "tests/features/flag_ledger.feature", index = 2)]
fn resolving_without_flags_fails(context: LedgerContext) {
    let _ = context;
}

#[scenario(path = "tests/features/flag_ledger.feature", index = 3)]
fn unknown_reason_is_rejected(context: LedgerContext) {
    let _ = context;
}
