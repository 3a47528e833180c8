//! Weighted quality scoring for park benches.
//!
//! Each comfort factor of a [`BenchComfortFactors`] record is normalised into
//! `0.0..=1.0` (see [`normalise`]), combined into a weighted sum, and scaled to
//! an integer score. Core weights are relative and always fill a budget of
//! exactly 100 points; graffiti resistance adds up to six bonus points on top,
//! so scores range over `0..=106` with the default table.
//!
//! Scores map onto ordinal [`QualityLabel`](parkbench_core::QualityLabel)s
//! through [`LabelThresholds`]. [`WeightedQualityScorer`] bundles both steps
//! behind the [`QualityScorer`](parkbench_core::QualityScorer) seam, and
//! [`rank_benches`] orders a batch of records by score.
//!
//! # Examples
//!
//! ```
//! use parkbench_core::{BenchComfortFactors, QualityLabel, Shade};
//! use parkbench_scorer::{calc_bench_quality, map_quality_to_label};
//!
//! let bench = BenchComfortFactors {
//!     shade_percent: Shade::Inferred(0.5),
//!     seat_count: 4,
//!     has_backrest: true,
//!     has_armrests: false,
//!     distance_to_trash_can_meters: None,
//!     distance_to_footpath_meters: 10.0,
//!     average_noise_level: 3.0,
//!     cleanliness_rating: 4.0,
//!     graffiti_resistance_score: None,
//! };
//! let score = calc_bench_quality(&bench);
//! assert_eq!(score, 53);
//! assert_eq!(map_quality_to_label(f64::from(score)), QualityLabel::Average);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use log::trace;
use parkbench_core::BenchComfortFactors;

mod classifier;
mod error;
pub mod normalise;
mod ranking;
mod weighted;
mod weights;

pub use classifier::{LABEL_SCORE_CEILING, LabelThresholds, map_quality_to_label};
pub use error::{ThresholdsError, WeightsError};
pub use ranking::{BenchRecord, RankedBench, rank_benches};
pub use weighted::WeightedQualityScorer;
pub use weights::{Factor, QualityWeights, WeightTable};

use normalise::{SubScores, graffiti_fraction};

/// Points awarded for a weighted fraction of `1.0`.
const SCORE_SCALE: f64 = 100.0;

/// Score a bench with the default weight table.
///
/// The record is only read. Identical inputs always produce identical
/// scores.
#[must_use]
pub fn calc_bench_quality(factors: &BenchComfortFactors) -> u32 {
    calc_bench_quality_with(factors, &QualityWeights::default())
}

/// Score a bench with a caller-supplied weight table.
///
/// Sub-scores are multiplied by their raw weights, summed, and divided by the
/// core total once, so a bench that is perfect on every core factor reaches
/// exactly `1.0` before the graffiti bonus is added.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "weighted aggregation is floating-point by nature"
)]
pub fn calc_bench_quality_with(factors: &BenchComfortFactors, weights: &QualityWeights) -> u32 {
    let sub_scores = SubScores::from_factors(factors);
    let weighted_sum = Factor::ALL
        .into_iter()
        .map(|factor| sub_scores.get(factor) * weights.weight(factor))
        .fold(0.0, |total, contribution| total + contribution);
    let core = weighted_sum / weights.core_total();
    let bonus = graffiti_fraction(factors.graffiti_resistance_score) * weights.graffiti_bonus();
    let total = core + bonus;
    trace!("bench quality core={core:.4} bonus={bonus:.4}");
    to_score(total)
}

/// Scale a weighted fraction to points, rounding half away from zero.
#[expect(
    clippy::float_arithmetic,
    reason = "fractions are scaled to points before rounding"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is finite, non-negative, and rounded before the cast"
)]
fn to_score(fraction: f64) -> u32 {
    let points = (fraction * SCORE_SCALE).round();
    if !points.is_finite() || points <= 0.0 {
        return 0;
    }
    if points >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    points as u32
}

#[cfg(test)]
mod tests;
