//! Score and order a batch of benches.

use parkbench_core::{BenchComfortFactors, QualityLabel, QualityScorer};
use serde::{Deserialize, Serialize};

/// A bench's identifier paired with its comfort measurements.
///
/// Serialised as `{"id": 7, "factors": {"seat_count": 4, ...}}`. Unknown keys
/// at either level are rejected so a misspelt optional measurement cannot
/// silently fall back to its worst-case default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchRecord {
    /// Caller-assigned bench identifier.
    pub id: u64,
    /// Measurements to score.
    pub factors: BenchComfortFactors,
}

/// One row of a ranked report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedBench {
    /// One-based position in the report.
    pub rank: usize,
    /// Bench identifier.
    pub id: u64,
    /// Composite quality score.
    pub score: u32,
    /// Label for `score`.
    pub label: QualityLabel,
}

/// Score every record and order the results best first.
///
/// Ties on score are broken by ascending id so reports are stable across
/// runs. Ranks are positional: tied benches receive consecutive ranks.
///
/// # Examples
/// ```
/// use parkbench_core::test_support::{best_case_factors, worst_case_factors};
/// use parkbench_scorer::{BenchRecord, WeightedQualityScorer, rank_benches};
///
/// let records = [
///     BenchRecord { id: 1, factors: worst_case_factors() },
///     BenchRecord { id: 2, factors: best_case_factors() },
/// ];
/// let ranked = rank_benches(&WeightedQualityScorer::default(), &records);
/// assert_eq!(ranked.first().map(|row| row.id), Some(2));
/// ```
#[must_use]
pub fn rank_benches<S>(scorer: &S, records: &[BenchRecord]) -> Vec<RankedBench>
where
    S: QualityScorer + ?Sized,
{
    let mut assessed: Vec<(u64, u32, QualityLabel)> = records
        .iter()
        .map(|record| {
            let assessment = scorer.assess(&record.factors);
            (record.id, assessment.score, assessment.label)
        })
        .collect();
    assessed.sort_by(|left, right| right.1.cmp(&left.1).then(left.0.cmp(&right.0)));
    assessed
        .into_iter()
        .zip(1..)
        .map(|((id, score, label), rank)| RankedBench {
            rank,
            id,
            score,
            label,
        })
        .collect()
}
