//! Injectable weight tables for the quality aggregator.
//!
//! The defaults come from the community app's original tuning. They are
//! provisional, which is why the table is configuration rather than a
//! constant: a revised table can be loaded from JSON without touching the
//! aggregation algorithm.

use std::io::BufReader;

use camino::Utf8Path;
use parkbench_fs::open_utf8_file;
use serde::{Deserialize, Serialize};

use crate::WeightsError;

/// A core factor in the weighted sum.
///
/// # Examples
/// ```
/// use parkbench_scorer::Factor;
///
/// assert_eq!(Factor::TrashDistance.as_str(), "trash_distance");
/// assert_eq!("noise".parse::<Factor>(), Ok(Factor::Noise));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Shade coverage.
    Shade,
    /// Seating capacity.
    Seating,
    /// Backrest presence.
    Backrest,
    /// Armrest presence.
    Armrests,
    /// Distance to the nearest bin.
    TrashDistance,
    /// Distance to the nearest footpath.
    Footpath,
    /// Ambient noise.
    Noise,
    /// Cleanliness rating.
    Cleanliness,
}

impl Factor {
    /// Every core factor in aggregation order.
    pub const ALL: [Self; 8] = [
        Self::Shade,
        Self::Seating,
        Self::Backrest,
        Self::Armrests,
        Self::TrashDistance,
        Self::Footpath,
        Self::Noise,
        Self::Cleanliness,
    ];

    /// Return the factor name as used in weight files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shade => "shade",
            Self::Seating => "seating",
            Self::Backrest => "backrest",
            Self::Armrests => "armrests",
            Self::TrashDistance => "trash_distance",
            Self::Footpath => "footpath",
            Self::Noise => "noise",
            Self::Cleanliness => "cleanliness",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Factor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|factor| factor.as_str() == s)
            .ok_or_else(|| format!("unknown factor '{s}'"))
    }
}

/// Raw weights as written in configuration, before validation.
///
/// Missing fields fall back to the defaults, so a weights file only needs to
/// list the factors it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightTable {
    /// Weight of shade coverage.
    pub shade: f64,
    /// Weight of seating capacity.
    pub seating: f64,
    /// Weight granted when a backrest is present.
    pub backrest: f64,
    /// Weight granted when armrests are present.
    pub armrests: f64,
    /// Weight of bin proximity.
    pub trash_distance: f64,
    /// Weight of footpath proximity.
    pub footpath: f64,
    /// Weight of quietness.
    pub noise: f64,
    /// Weight of cleanliness.
    pub cleanliness: f64,
    /// Additive bonus for full graffiti resistance, outside the core budget.
    pub graffiti_bonus: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            shade: 0.19,
            seating: 0.16,
            backrest: 0.09,
            armrests: 0.07,
            trash_distance: 0.15,
            footpath: 0.12,
            noise: 0.11,
            cleanliness: 0.09,
            graffiti_bonus: 0.06,
        }
    }
}

impl WeightTable {
    /// Return the raw weight for a core factor.
    #[must_use]
    pub const fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Shade => self.shade,
            Factor::Seating => self.seating,
            Factor::Backrest => self.backrest,
            Factor::Armrests => self.armrests,
            Factor::TrashDistance => self.trash_distance,
            Factor::Footpath => self.footpath,
            Factor::Noise => self.noise,
            Factor::Cleanliness => self.cleanliness,
        }
    }

    fn slot(&mut self, factor: Factor) -> &mut f64 {
        match factor {
            Factor::Shade => &mut self.shade,
            Factor::Seating => &mut self.seating,
            Factor::Backrest => &mut self.backrest,
            Factor::Armrests => &mut self.armrests,
            Factor::TrashDistance => &mut self.trash_distance,
            Factor::Footpath => &mut self.footpath,
            Factor::Noise => &mut self.noise,
            Factor::Cleanliness => &mut self.cleanliness,
        }
    }

    /// Validate the table.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when any weight is non-finite or negative, or
    /// when the core weights sum to zero.
    pub fn validate(self) -> Result<QualityWeights, WeightsError> {
        QualityWeights::new(self)
    }
}

/// A validated weight table.
///
/// Core weights are relative: the aggregator divides each one by the core
/// total, so the effective core budget is always exactly `1.0`. The graffiti
/// bonus is applied as-is on top of that budget.
///
/// # Examples
/// ```
/// use parkbench_scorer::{Factor, QualityWeights};
///
/// let weights = QualityWeights::default()
///     .with_weight(Factor::Noise, 0.3)
///     .expect("valid weight");
/// assert_eq!(weights.weight(Factor::Noise), 0.3);
/// assert!(QualityWeights::default().with_weight(Factor::Shade, -1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightTable", into = "WeightTable")]
pub struct QualityWeights {
    table: WeightTable,
    core_total: f64,
}

impl QualityWeights {
    /// Validate `table` and compute its core total.
    ///
    /// # Errors
    /// Returns [`WeightsError::NonFinite`] or [`WeightsError::Negative`] for
    /// the first unusable weight, and [`WeightsError::ZeroTotal`] when every
    /// core weight is zero.
    #[expect(
        clippy::float_arithmetic,
        reason = "the core total is a plain sum of weights"
    )]
    pub fn new(table: WeightTable) -> Result<Self, WeightsError> {
        let named = Factor::ALL
            .into_iter()
            .map(|factor| (factor.as_str(), table.get(factor)))
            .chain(std::iter::once(("graffiti_bonus", table.graffiti_bonus)));
        for (name, weight) in named {
            if !weight.is_finite() {
                return Err(WeightsError::NonFinite { factor: name });
            }
            if weight < 0.0 {
                return Err(WeightsError::Negative {
                    factor: name,
                    weight,
                });
            }
        }
        let core_total = Factor::ALL
            .into_iter()
            .map(|factor| table.get(factor))
            .fold(0.0, |total, weight| total + weight);
        if core_total <= 0.0 || !core_total.is_finite() {
            return Err(WeightsError::ZeroTotal);
        }
        Ok(Self { table, core_total })
    }

    /// Load and validate a JSON weights file.
    ///
    /// # Errors
    /// Returns [`WeightsError::Read`] when the file cannot be opened and
    /// [`WeightsError::Parse`] when it is not a valid weight table.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, WeightsError> {
        let file = open_utf8_file(path).map_err(|source| WeightsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| WeightsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace one core weight, revalidating the table.
    ///
    /// # Errors
    /// Propagates [`QualityWeights::new`] failures for the updated table.
    pub fn with_weight(self, factor: Factor, weight: f64) -> Result<Self, WeightsError> {
        let mut table = self.table;
        *table.slot(factor) = weight;
        Self::new(table)
    }

    /// Replace the graffiti bonus, revalidating the table.
    ///
    /// # Errors
    /// Propagates [`QualityWeights::new`] failures for the updated table.
    pub fn with_graffiti_bonus(self, bonus: f64) -> Result<Self, WeightsError> {
        Self::new(WeightTable {
            graffiti_bonus: bonus,
            ..self.table
        })
    }

    /// Return the configured (relative) weight of a core factor.
    #[must_use]
    pub const fn weight(&self, factor: Factor) -> f64 {
        self.table.get(factor)
    }

    /// Return the share of the core budget carried by `factor`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "effective weights are relative weights over their total"
    )]
    pub fn effective_weight(&self, factor: Factor) -> f64 {
        self.table.get(factor) / self.core_total
    }

    /// Sum of the configured core weights.
    #[must_use]
    pub const fn core_total(&self) -> f64 {
        self.core_total
    }

    /// Additive bonus for full graffiti resistance.
    #[must_use]
    pub const fn graffiti_bonus(&self) -> f64 {
        self.table.graffiti_bonus
    }

    /// Return the underlying table.
    #[must_use]
    pub const fn table(&self) -> WeightTable {
        self.table
    }
}

impl Default for QualityWeights {
    #[expect(
        clippy::float_arithmetic,
        reason = "the default core total is a plain sum of weights"
    )]
    fn default() -> Self {
        let table = WeightTable::default();
        let core_total = Factor::ALL
            .into_iter()
            .map(|factor| table.get(factor))
            .fold(0.0, |total, weight| total + weight);
        Self { table, core_total }
    }
}

impl TryFrom<WeightTable> for QualityWeights {
    type Error = WeightsError;

    fn try_from(table: WeightTable) -> Result<Self, Self::Error> {
        Self::new(table)
    }
}

impl From<QualityWeights> for WeightTable {
    fn from(weights: QualityWeights) -> Self {
        weights.table
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point weights"
)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    fn default_core_weights_total_ninety_eight_hundredths() {
        let weights = QualityWeights::default();
        assert!((weights.core_total() - 0.98).abs() < 1e-12);
    }

    #[rstest]
    fn effective_weights_fill_the_core_budget() {
        let weights = QualityWeights::default();
        let budget: f64 = Factor::ALL
            .into_iter()
            .map(|factor| weights.effective_weight(factor))
            .sum();
        assert!((budget - 1.0).abs() < 1e-12, "budget was {budget}");
    }

    #[rstest]
    fn default_matches_validated_table() {
        let validated = WeightTable::default().validate().expect("defaults are valid");
        assert_eq!(validated, QualityWeights::default());
    }

    #[rstest]
    #[case(Factor::Shade, f64::NAN)]
    #[case(Factor::Footpath, f64::INFINITY)]
    fn rejects_non_finite_weights(#[case] factor: Factor, #[case] weight: f64) {
        let err = QualityWeights::default()
            .with_weight(factor, weight)
            .expect_err("non-finite weight");
        assert!(matches!(err, WeightsError::NonFinite { factor: name } if name == factor.as_str()));
    }

    #[rstest]
    fn rejects_negative_graffiti_bonus() {
        let err = QualityWeights::default()
            .with_graffiti_bonus(-0.1)
            .expect_err("negative bonus");
        assert!(matches!(
            err,
            WeightsError::Negative {
                factor: "graffiti_bonus",
                ..
            }
        ));
    }

    #[rstest]
    fn rejects_all_zero_core_weights() {
        let table = WeightTable {
            shade: 0.0,
            seating: 0.0,
            backrest: 0.0,
            armrests: 0.0,
            trash_distance: 0.0,
            footpath: 0.0,
            noise: 0.0,
            cleanliness: 0.0,
            graffiti_bonus: 0.5,
        };
        assert!(matches!(table.validate(), Err(WeightsError::ZeroTotal)));
    }

    #[rstest]
    fn partial_tables_inherit_defaults() {
        let weights: QualityWeights =
            serde_json::from_str(r#"{"noise": 0.5}"#).expect("parse partial table");
        assert_eq!(weights.weight(Factor::Noise), 0.5);
        assert_eq!(weights.weight(Factor::Shade), 0.19);
    }

    #[rstest]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<QualityWeights>(r#"{"comfort": 0.5}"#);
        assert!(parsed.is_err());
    }

    #[rstest]
    fn invalid_tables_fail_to_deserialise() {
        let parsed = serde_json::from_str::<QualityWeights>(r#"{"seating": -2.0}"#);
        let err = parsed.expect_err("negative weight");
        assert!(err.to_string().contains("seating"), "unexpected error: {err}");
    }

    #[rstest]
    fn factor_names_round_trip() {
        for factor in Factor::ALL {
            assert_eq!(Factor::from_str(factor.as_str()), Ok(factor));
        }
        assert!(Factor::from_str("comfort").is_err());
    }
}
