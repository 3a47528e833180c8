//! Map composite scores onto ordinal quality labels.
//!
//! Classification is total over `f64`: scores are clamped into
//! `0.0..=LABEL_SCORE_CEILING` first, which absorbs the graffiti bonus
//! overflow, and `NaN` lands in the lowest band.

use parkbench_core::QualityLabel;

use crate::{ThresholdsError, normalise::clamp};

/// Upper bound applied to scores before classification.
pub const LABEL_SCORE_CEILING: f64 = 120.0;

/// Inclusive lower bounds for each positive label.
///
/// # Examples
/// ```
/// use parkbench_core::QualityLabel;
/// use parkbench_scorer::LabelThresholds;
///
/// let thresholds = LabelThresholds::default();
/// assert_eq!(thresholds.classify(85.0), QualityLabel::Excellent);
/// assert_eq!(thresholds.classify(84.9), QualityLabel::Good);
///
/// let strict = LabelThresholds::new(95.0, 75.0, 50.0).expect("descending thresholds");
/// assert_eq!(strict.classify(85.0), QualityLabel::Good);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelThresholds {
    excellent: f64,
    good: f64,
    average: f64,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            excellent: 85.0,
            good: 60.0,
            average: 45.0,
        }
    }
}

impl LabelThresholds {
    /// Validate and construct a set of thresholds.
    ///
    /// # Errors
    /// Returns [`ThresholdsError`] when a threshold is non-finite, outside
    /// `0.0..=LABEL_SCORE_CEILING`, or the bounds are not strictly
    /// descending.
    pub fn new(excellent: f64, good: f64, average: f64) -> Result<Self, ThresholdsError> {
        let bounds = [excellent, good, average];
        if bounds.iter().any(|bound| !bound.is_finite()) {
            return Err(ThresholdsError::NonFinite);
        }
        if let Some(&value) = bounds
            .iter()
            .find(|&&bound| !(0.0..=LABEL_SCORE_CEILING).contains(&bound))
        {
            return Err(ThresholdsError::OutOfRange {
                value,
                ceiling: LABEL_SCORE_CEILING,
            });
        }
        if excellent <= good || good <= average {
            return Err(ThresholdsError::NotDescending {
                excellent,
                good,
                average,
            });
        }
        Ok(Self {
            excellent,
            good,
            average,
        })
    }

    /// Replace individual bounds, keeping the rest.
    ///
    /// # Errors
    /// Propagates [`LabelThresholds::new`] failures for the combined bounds.
    pub fn with_overrides(
        self,
        excellent: Option<f64>,
        good: Option<f64>,
        average: Option<f64>,
    ) -> Result<Self, ThresholdsError> {
        Self::new(
            excellent.unwrap_or(self.excellent),
            good.unwrap_or(self.good),
            average.unwrap_or(self.average),
        )
    }

    /// Lower bound for [`QualityLabel::Excellent`].
    #[must_use]
    pub const fn excellent(&self) -> f64 {
        self.excellent
    }

    /// Lower bound for [`QualityLabel::Good`].
    #[must_use]
    pub const fn good(&self) -> f64 {
        self.good
    }

    /// Lower bound for [`QualityLabel::Average`].
    #[must_use]
    pub const fn average(&self) -> f64 {
        self.average
    }

    /// Classify a score; the first matching bound from the top wins.
    #[must_use]
    pub fn classify(&self, score: f64) -> QualityLabel {
        if score.is_nan() {
            return QualityLabel::NeedsImprovement;
        }
        let clamped = clamp(score, 0.0, LABEL_SCORE_CEILING);
        if clamped >= self.excellent {
            QualityLabel::Excellent
        } else if clamped >= self.good {
            QualityLabel::Good
        } else if clamped >= self.average {
            QualityLabel::Average
        } else {
            QualityLabel::NeedsImprovement
        }
    }
}

/// Classify a score with the default thresholds.
///
/// # Examples
/// ```
/// use parkbench_core::QualityLabel;
/// use parkbench_scorer::map_quality_to_label;
///
/// assert_eq!(map_quality_to_label(60.0), QualityLabel::Good);
/// assert_eq!(map_quality_to_label(-5.0), QualityLabel::NeedsImprovement);
/// assert_eq!(map_quality_to_label(f64::INFINITY), QualityLabel::Excellent);
/// ```
#[must_use]
pub fn map_quality_to_label(score: f64) -> QualityLabel {
    LabelThresholds::default().classify(score)
}
