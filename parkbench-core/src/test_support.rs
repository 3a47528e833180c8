//! Test-only bench fixtures shared by unit, behaviour, and benchmark code.

use crate::{BenchComfortFactors, QualityLabel, QualityScorer, Shade};

/// A bench that fails on every factor and has no optional measurements.
#[must_use]
pub const fn worst_case_factors() -> BenchComfortFactors {
    BenchComfortFactors {
        shade_percent: Shade::Inferred(0.0),
        seat_count: 0,
        has_backrest: false,
        has_armrests: false,
        distance_to_trash_can_meters: None,
        distance_to_footpath_meters: 150.0,
        average_noise_level: 10.0,
        cleanliness_rating: 1.0,
        graffiti_resistance_score: None,
    }
}

/// A bench that excels on every factor, including graffiti resistance.
#[must_use]
pub const fn best_case_factors() -> BenchComfortFactors {
    BenchComfortFactors {
        shade_percent: Shade::Inferred(1.0),
        seat_count: 8,
        has_backrest: true,
        has_armrests: true,
        distance_to_trash_can_meters: Some(0.0),
        distance_to_footpath_meters: 0.0,
        average_noise_level: 0.0,
        cleanliness_rating: 5.0,
        graffiti_resistance_score: Some(1.0),
    }
}

/// A typical half-shaded bench with a backrest and no bin nearby.
#[must_use]
pub const fn typical_factors() -> BenchComfortFactors {
    BenchComfortFactors {
        shade_percent: Shade::Inferred(0.5),
        seat_count: 4,
        has_backrest: true,
        has_armrests: false,
        distance_to_trash_can_meters: None,
        distance_to_footpath_meters: 10.0,
        average_noise_level: 3.0,
        cleanliness_rating: 4.0,
        graffiti_resistance_score: None,
    }
}

/// Deterministic `QualityScorer` returning a fixed score and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedScorer {
    /// Score returned for every bench.
    pub score: u32,
    /// Label returned for every score.
    pub label: QualityLabel,
}

impl QualityScorer for FixedScorer {
    fn score(&self, _factors: &BenchComfortFactors) -> u32 {
        self.score
    }

    fn label(&self, _score: f64) -> QualityLabel {
        self.label
    }
}
