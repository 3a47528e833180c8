//! Community reports of damaged or dirty benches.
//!
//! A [`FlagLedger`] is an explicit store owned by the caller. Nothing here
//! keeps process-wide state; callers decide where a ledger lives and how it is
//! persisted (the CLI keeps one in a JSON file).

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a bench was flagged.
///
/// # Examples
/// ```
/// use parkbench_core::FlagReason;
///
/// let reason: FlagReason = "dirty".parse().expect("known reason");
/// assert_eq!(reason, FlagReason::Dirty);
/// assert!("wobbly".parse::<FlagReason>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FlagReason {
    /// Physically damaged.
    Damaged,
    /// Needs cleaning.
    Dirty,
    /// Unusable.
    Broken,
    /// Anything else; usually paired with a note.
    Other,
}

impl FlagReason {
    /// Return the reason as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Damaged => "damaged",
            Self::Dirty => "dirty",
            Self::Broken => "broken",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FlagReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FlagReason {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "damaged" => Ok(Self::Damaged),
            "dirty" => Ok(Self::Dirty),
            "broken" => Ok(Self::Broken),
            "other" => Ok(Self::Other),
            _ => Err(FlagError::UnknownReason {
                reason: s.to_owned(),
            }),
        }
    }
}

/// Errors raised while recording or resolving flags.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    /// The supplied reason is not one of the supported reasons.
    #[error("invalid flag reason '{reason}' (expected damaged, dirty, broken or other)")]
    UnknownReason {
        /// Reason as supplied by the caller.
        reason: String,
    },
    /// The bench has no unresolved flag.
    #[error("no active flag found for bench {bench_id}")]
    NoActiveFlag {
        /// Bench that was looked up.
        bench_id: u64,
    },
}

/// A single report against a bench.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BenchFlag {
    /// Flagged bench.
    pub bench_id: u64,
    /// Reason given by the reporter.
    pub reason: FlagReason,
    /// User who raised the flag.
    pub flagged_by: u64,
    /// When the flag was raised.
    pub flagged_at: DateTime<Utc>,
    /// Whether the flag has been dealt with.
    pub resolved: bool,
    /// User who resolved the flag, once resolved.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resolved_by: Option<u64>,
    /// Free-form note supplied with the flag.
    #[cfg_attr(feature = "serde", serde(default))]
    pub note: Option<String>,
}

/// Ordered collection of bench flags.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use parkbench_core::{FlagLedger, FlagReason};
///
/// let mut ledger = FlagLedger::new();
/// let message = ledger.flag_bench(3, 7, FlagReason::Dirty, None, Utc::now());
/// assert_eq!(message, "Bench 3 flagged for dirty by user 7");
/// assert_eq!(ledger.active_count_for(3), 1);
///
/// ledger.resolve_flag(3, 9).expect("flag is active");
/// assert_eq!(ledger.active_count_for(3), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagLedger {
    flags: Vec<BenchFlag>,
}

impl FlagLedger {
    /// Construct an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new unresolved flag and return a confirmation message.
    ///
    /// Blank notes are discarded.
    pub fn flag_bench(
        &mut self,
        bench_id: u64,
        user_id: u64,
        reason: FlagReason,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> String {
        let kept_note = note.filter(|text| !text.trim().is_empty());
        if let Some(text) = kept_note.as_deref() {
            info!("bench {bench_id} flagged with note: {text}");
        }
        self.flags.push(BenchFlag {
            bench_id,
            reason,
            flagged_by: user_id,
            flagged_at: at,
            resolved: false,
            resolved_by: None,
            note: kept_note,
        });
        format!("Bench {bench_id} flagged for {reason} by user {user_id}")
    }

    /// Resolve the oldest active flag for `bench_id`.
    ///
    /// # Errors
    /// Returns [`FlagError::NoActiveFlag`] when the bench has no unresolved
    /// flag.
    pub fn resolve_flag(&mut self, bench_id: u64, user_id: u64) -> Result<String, FlagError> {
        let flag = self
            .flags
            .iter_mut()
            .find(|flag| flag.bench_id == bench_id && !flag.resolved)
            .ok_or(FlagError::NoActiveFlag { bench_id })?;
        flag.resolved = true;
        flag.resolved_by = Some(user_id);
        Ok(format!(
            "Flag for bench {bench_id} resolved by user {user_id}."
        ))
    }

    /// Iterate over unresolved flags in the order they were raised.
    pub fn active_flags(&self) -> impl Iterator<Item = &BenchFlag> {
        self.flags.iter().filter(|flag| !flag.resolved)
    }

    /// Count unresolved flags for a single bench.
    #[must_use]
    pub fn active_count_for(&self, bench_id: u64) -> usize {
        self.active_flags()
            .filter(|flag| flag.bench_id == bench_id)
            .count()
    }

    /// Every flag ever recorded, resolved or not.
    #[must_use]
    pub fn flags(&self) -> &[BenchFlag] {
        &self.flags
    }

    /// Render a human-readable summary of unresolved flags.
    #[must_use]
    pub fn report(&self) -> String {
        let lines: Vec<String> = self
            .active_flags()
            .map(|flag| {
                format!(
                    "Bench ID: {}, Reason: {}, Flagged By: User {}, Date: {}",
                    flag.bench_id,
                    flag.reason,
                    flag.flagged_by,
                    flag.flagged_at.to_rfc3339_opts(SecondsFormat::Millis, true)
                )
            })
            .collect();
        if lines.is_empty() {
            return "No benches are currently flagged.".to_owned();
        }
        format!("Currently flagged benches:\n{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use std::str::FromStr;

    #[fixture]
    fn raised_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 19, 14, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case("damaged", FlagReason::Damaged)]
    #[case("Dirty", FlagReason::Dirty)]
    #[case(" broken ", FlagReason::Broken)]
    #[case("other", FlagReason::Other)]
    fn parses_known_reasons(#[case] raw: &str, #[case] expected: FlagReason) {
        assert_eq!(FlagReason::from_str(raw), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_reason() {
        let err = FlagReason::from_str("wobbly").expect_err("unknown reason");
        assert_eq!(
            err,
            FlagError::UnknownReason {
                reason: "wobbly".to_owned()
            }
        );
    }

    #[rstest]
    fn flagging_returns_confirmation(raised_at: DateTime<Utc>) {
        let mut ledger = FlagLedger::new();
        let message = ledger.flag_bench(12, 4, FlagReason::Broken, None, raised_at);
        assert_eq!(message, "Bench 12 flagged for broken by user 4");
        assert_eq!(ledger.flags().len(), 1);
    }

    #[rstest]
    fn blank_notes_are_dropped(raised_at: DateTime<Utc>) {
        let mut ledger = FlagLedger::new();
        ledger.flag_bench(1, 2, FlagReason::Other, Some("   ".to_owned()), raised_at);
        ledger.flag_bench(1, 2, FlagReason::Other, Some("loose slat".to_owned()), raised_at);
        let notes: Vec<Option<&str>> = ledger
            .flags()
            .iter()
            .map(|flag| flag.note.as_deref())
            .collect();
        assert_eq!(notes, vec![None, Some("loose slat")]);
    }

    #[rstest]
    fn resolving_marks_only_the_oldest_active_flag(raised_at: DateTime<Utc>) {
        let mut ledger = FlagLedger::new();
        ledger.flag_bench(5, 1, FlagReason::Dirty, None, raised_at);
        ledger.flag_bench(5, 2, FlagReason::Damaged, None, raised_at);

        let message = ledger.resolve_flag(5, 9).expect("active flag");

        assert_eq!(message, "Flag for bench 5 resolved by user 9.");
        assert_eq!(ledger.active_count_for(5), 1);
        let first = ledger.flags().first().expect("first flag");
        assert!(first.resolved);
        assert_eq!(first.resolved_by, Some(9));
    }

    #[rstest]
    fn resolving_without_active_flag_fails(raised_at: DateTime<Utc>) {
        let mut ledger = FlagLedger::new();
        ledger.flag_bench(5, 1, FlagReason::Dirty, None, raised_at);
        ledger.resolve_flag(5, 1).expect("first resolve succeeds");

        let err = ledger.resolve_flag(5, 1).expect_err("nothing left to resolve");
        assert_eq!(err, FlagError::NoActiveFlag { bench_id: 5 });
    }

    #[rstest]
    fn empty_report_says_so() {
        assert_eq!(FlagLedger::new().report(), "No benches are currently flagged.");
    }

    #[rstest]
    fn report_lists_active_flags_only(raised_at: DateTime<Utc>) {
        let mut ledger = FlagLedger::new();
        ledger.flag_bench(1, 10, FlagReason::Dirty, None, raised_at);
        ledger.flag_bench(2, 11, FlagReason::Broken, None, raised_at);
        ledger.resolve_flag(1, 10).expect("resolve bench 1");

        assert_eq!(
            ledger.report(),
            "Currently flagged benches:\n\
             Bench ID: 2, Reason: broken, Flagged By: User 11, Date: 2025-10-19T14:00:00.000Z"
        );
    }
}
