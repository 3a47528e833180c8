//! [`QualityScorer`] implementation backed by a weight table and thresholds.

use camino::Utf8Path;
use log::info;
use parkbench_core::{BenchComfortFactors, QualityLabel, QualityScorer};

use crate::{LabelThresholds, QualityWeights, WeightsError, calc_bench_quality_with};

/// Scores benches with configurable weights and label thresholds.
///
/// # Examples
/// ```
/// use parkbench_core::{QualityLabel, QualityScorer};
/// use parkbench_scorer::WeightedQualityScorer;
///
/// let scorer = WeightedQualityScorer::default();
/// assert_eq!(scorer.label(90.0), QualityLabel::Excellent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightedQualityScorer {
    weights: QualityWeights,
    thresholds: LabelThresholds,
}

impl WeightedQualityScorer {
    /// Build a scorer from validated weights and thresholds.
    #[must_use]
    pub const fn new(weights: QualityWeights, thresholds: LabelThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    /// Build a scorer using the default weights and thresholds.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Load weights from a JSON file and pair them with `thresholds`.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when the file cannot be read or holds an
    /// invalid table.
    pub fn from_weights_file(
        path: &Utf8Path,
        thresholds: LabelThresholds,
    ) -> Result<Self, WeightsError> {
        let weights = QualityWeights::from_json_file(path)?;
        info!("loaded quality weights from {path}");
        Ok(Self::new(weights, thresholds))
    }

    /// Weights used for aggregation.
    #[must_use]
    pub const fn weights(&self) -> &QualityWeights {
        &self.weights
    }

    /// Thresholds used for classification.
    #[must_use]
    pub const fn thresholds(&self) -> &LabelThresholds {
        &self.thresholds
    }
}

impl QualityScorer for WeightedQualityScorer {
    fn score(&self, factors: &BenchComfortFactors) -> u32 {
        calc_bench_quality_with(factors, &self.weights)
    }

    fn label(&self, score: f64) -> QualityLabel {
        self.thresholds.classify(score)
    }
}
