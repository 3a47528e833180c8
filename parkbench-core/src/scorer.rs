//! Score benches from their comfort measurements.
//!
//! The `QualityScorer` trait turns a
//! [`BenchComfortFactors`](crate::BenchComfortFactors) record into a composite
//! integer score and maps scores onto [`QualityLabel`](crate::QualityLabel)s.

use crate::{BenchComfortFactors, QualityAssessment, QualityLabel};

/// Calculate a composite quality score for a bench.
///
/// Higher scores indicate a more comfortable bench. Implementations must be
/// thread-safe (`Send` + `Sync`) so a single scorer can serve concurrent
/// callers. Both methods are infallible: out-of-range or missing measurements
/// are absorbed rather than rejected.
///
/// Implementations must:
/// - Leave the input record untouched.
/// - Return the same score for the same input.
/// - Map higher scores to labels that are never worse than those of lower
///   scores.
///
/// # Examples
///
/// ```rust
/// use parkbench_core::{BenchComfortFactors, QualityLabel, QualityScorer};
///
/// struct SeatCounter;
///
/// impl QualityScorer for SeatCounter {
///     fn score(&self, factors: &BenchComfortFactors) -> u32 {
///         factors.seat_count
///     }
///
///     fn label(&self, score: f64) -> QualityLabel {
///         if score >= 4.0 {
///             QualityLabel::Good
///         } else {
///             QualityLabel::NeedsImprovement
///         }
///     }
/// }
///
/// let factors = BenchComfortFactors {
///     shade_percent: 0.0.into(),
///     seat_count: 6,
///     has_backrest: false,
///     has_armrests: false,
///     distance_to_trash_can_meters: None,
///     distance_to_footpath_meters: 0.0,
///     average_noise_level: 0.0,
///     cleanliness_rating: 1.0,
///     graffiti_resistance_score: None,
/// };
/// let assessment = SeatCounter.assess(&factors);
/// assert_eq!(assessment.score, 6);
/// assert_eq!(assessment.label, QualityLabel::Good);
/// ```
pub trait QualityScorer: Send + Sync {
    /// Return the composite score for `factors`.
    fn score(&self, factors: &BenchComfortFactors) -> u32;

    /// Return the label for a composite score.
    ///
    /// Accepts any `f64` so callers can classify scores from other sources.
    fn label(&self, score: f64) -> QualityLabel;

    /// Score `factors` and attach the matching label.
    #[must_use]
    fn assess(&self, factors: &BenchComfortFactors) -> QualityAssessment {
        let score = self.score(factors);
        QualityAssessment {
            score,
            label: self.label(f64::from(score)),
        }
    }
}
