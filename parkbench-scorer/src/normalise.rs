//! Convert raw bench measurements into `0.0..=1.0` sub-scores.
//!
//! Every helper is total: out-of-range values are clamped and non-finite
//! values (`NaN`, infinities) fall back to the worst case for their factor, so
//! a malformed record can lower a score but never poison it.

use log::{debug, warn};
use parkbench_core::{BenchComfortFactors, Shade};

use crate::Factor;

/// Distance at and beyond which a bin or footpath counts as unreachable.
pub const MAX_DISTANCE_METERS: f64 = 150.0;
/// Seat count at which the seating sub-score saturates.
pub const MAX_SEATS: u32 = 8;
/// Loudest value on the noise scale.
pub const MAX_NOISE_LEVEL: f64 = 10.0;
/// Lowest value on the cleanliness scale.
pub const MIN_CLEANLINESS: f64 = 1.0;
/// Highest value on the cleanliness scale.
pub const MAX_CLEANLINESS: f64 = 5.0;

/// Constrain `value` to the inclusive range `lower..=upper`.
///
/// Computed as `min(max(value, lower), upper)`; a `NaN` input yields `lower`.
#[must_use]
pub fn clamp(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}

/// Normalise a bare shade reading whose unit is inferred from its magnitude.
///
/// Values above `1` are percentages; everything else is already a fraction.
/// `1` therefore means full shade rather than one percent.
///
/// # Examples
/// ```
/// use parkbench_scorer::normalise::normalise_shade;
///
/// assert_eq!(normalise_shade(1.0), 1.0);
/// assert_eq!(normalise_shade(50.0), 0.5);
/// assert_eq!(normalise_shade(f64::NAN), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "percentages are converted to fractions by division"
)]
pub fn normalise_shade(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    if raw > 1.0 {
        clamp(raw / 100.0, 0.0, 1.0)
    } else {
        clamp(raw, 0.0, 1.0)
    }
}

/// Normalise a shade reading, honouring an explicit unit when present.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "percentages are converted to fractions by division"
)]
pub fn shade_fraction(shade: Shade) -> f64 {
    match shade {
        Shade::Inferred(raw) => normalise_shade(raw),
        Shade::Fraction(value) if value.is_finite() => clamp(value, 0.0, 1.0),
        Shade::Percent(value) if value.is_finite() => clamp(value / 100.0, 0.0, 1.0),
        Shade::Fraction(_) | Shade::Percent(_) => 0.0,
    }
}

/// Resolve a possibly missing distance to metres within `0..=150`.
///
/// `None` and non-finite readings become [`MAX_DISTANCE_METERS`], the worst
/// case for a closer-is-better metric. `Some(0.0)` is a real measurement.
#[must_use]
pub fn normalise_distance(distance_meters: Option<f64>) -> f64 {
    match distance_meters {
        Some(meters) if meters.is_finite() => clamp(meters, 0.0, MAX_DISTANCE_METERS),
        _ => MAX_DISTANCE_METERS,
    }
}

/// Score a distance: `1.0` at zero metres falling linearly to `0.0` at 150.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "distance scores scale linearly with the clamped distance"
)]
pub fn score_distance(distance_meters: Option<f64>) -> f64 {
    1.0 - normalise_distance(distance_meters) / MAX_DISTANCE_METERS
}

/// Score a noise level on the `0..=10` scale; quieter is better.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "noise scores scale linearly with the clamped level"
)]
pub fn score_noise_level(level: f64) -> f64 {
    if !level.is_finite() {
        return 0.0;
    }
    1.0 - clamp(level, 0.0, MAX_NOISE_LEVEL) / MAX_NOISE_LEVEL
}

/// Map a `1..=5` cleanliness rating linearly onto `0.0..=1.0`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "cleanliness ratings are rescaled linearly"
)]
pub fn score_cleanliness(rating: f64) -> f64 {
    if !rating.is_finite() {
        return 0.0;
    }
    (clamp(rating, MIN_CLEANLINESS, MAX_CLEANLINESS) - MIN_CLEANLINESS)
        / (MAX_CLEANLINESS - MIN_CLEANLINESS)
}

/// Score seating capacity, saturating at [`MAX_SEATS`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "seat counts are scaled against the saturation point"
)]
pub fn score_seating(seat_count: u32) -> f64 {
    f64::from(seat_count.min(MAX_SEATS)) / f64::from(MAX_SEATS)
}

/// Resolve the graffiti bonus fraction; absent or non-finite gives `0.0`.
#[must_use]
pub fn graffiti_fraction(score: Option<f64>) -> f64 {
    match score {
        Some(value) if value.is_finite() => clamp(value, 0.0, 1.0),
        _ => 0.0,
    }
}

const fn presence(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

/// Per-factor sub-scores for a single bench, each in `0.0..=1.0`.
///
/// Boolean factors score `1.0` when present and `0.0` otherwise, so they
/// contribute their full weight or nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    /// Shade coverage.
    pub shade: f64,
    /// Seating capacity.
    pub seating: f64,
    /// Backrest presence.
    pub backrest: f64,
    /// Armrest presence.
    pub armrests: f64,
    /// Proximity of the nearest bin.
    pub trash_distance: f64,
    /// Proximity of the nearest footpath.
    pub footpath: f64,
    /// Quietness.
    pub noise: f64,
    /// Cleanliness.
    pub cleanliness: f64,
}

impl SubScores {
    /// Normalise every core factor of `factors`.
    ///
    /// The record is only read; defaults for missing measurements live in
    /// locals.
    #[must_use]
    pub fn from_factors(factors: &BenchComfortFactors) -> Self {
        report_unusable_measurements(factors);
        Self {
            shade: shade_fraction(factors.shade_percent),
            seating: score_seating(factors.seat_count),
            backrest: presence(factors.has_backrest),
            armrests: presence(factors.has_armrests),
            trash_distance: score_distance(factors.distance_to_trash_can_meters),
            footpath: score_distance(Some(factors.distance_to_footpath_meters)),
            noise: score_noise_level(factors.average_noise_level),
            cleanliness: score_cleanliness(factors.cleanliness_rating),
        }
    }

    /// Return the sub-score for a single factor.
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
}

fn report_unusable_measurements(factors: &BenchComfortFactors) {
    let shade_raw = match factors.shade_percent {
        Shade::Inferred(value) | Shade::Fraction(value) | Shade::Percent(value) => value,
    };
    let readings = [
        ("shade_percent", Some(shade_raw)),
        ("distance_to_trash_can_meters", factors.distance_to_trash_can_meters),
        (
            "distance_to_footpath_meters",
            Some(factors.distance_to_footpath_meters),
        ),
        ("average_noise_level", Some(factors.average_noise_level)),
        ("cleanliness_rating", Some(factors.cleanliness_rating)),
        ("graffiti_resistance_score", factors.graffiti_resistance_score),
    ];
    for (field, value) in readings {
        if let Some(raw) = value.filter(|reading| !reading.is_finite()) {
            warn!("{field} is not finite ({raw}); scoring it as the worst case");
        }
    }
    if factors.distance_to_trash_can_meters.is_none() {
        debug!("distance_to_trash_can_meters missing; assuming {MAX_DISTANCE_METERS} m");
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point sub-scores"
)]
mod tests {
    use super::*;
    use parkbench_core::test_support::{best_case_factors, worst_case_factors};
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-12;

    fn assert_near(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.25, 0.25)]
    // One is a full fraction, not one percent.
    #[case(1.0, 1.0)]
    #[case(1.5, 0.015)]
    #[case(50.0, 0.5)]
    #[case(100.0, 1.0)]
    #[case(250.0, 1.0)]
    #[case(-0.3, 0.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    fn normalises_inferred_shade(#[case] raw: f64, #[case] expected: f64) {
        assert_near(normalise_shade(raw), expected);
    }

    #[rstest]
    #[case(Shade::Percent(1.0), 0.01)]
    #[case(Shade::Fraction(1.0), 1.0)]
    #[case(Shade::Fraction(0.4), 0.4)]
    #[case(Shade::Percent(40.0), 0.4)]
    #[case(Shade::Fraction(3.0), 1.0)]
    #[case(Shade::Percent(f64::NAN), 0.0)]
    fn explicit_shade_units_are_respected(#[case] shade: Shade, #[case] expected: f64) {
        assert_near(shade_fraction(shade), expected);
    }

    #[rstest]
    #[case(None, MAX_DISTANCE_METERS)]
    #[case(Some(0.0), 0.0)]
    #[case(Some(75.0), 75.0)]
    #[case(Some(-5.0), 0.0)]
    #[case(Some(900.0), MAX_DISTANCE_METERS)]
    #[case(Some(f64::NAN), MAX_DISTANCE_METERS)]
    fn normalises_distances(#[case] input: Option<f64>, #[case] expected: f64) {
        assert_near(normalise_distance(input), expected);
    }

    #[rstest]
    #[case(Some(0.0), 1.0)]
    #[case(Some(75.0), 0.5)]
    #[case(Some(150.0), 0.0)]
    #[case(None, 0.0)]
    fn closer_distances_score_higher(#[case] input: Option<f64>, #[case] expected: f64) {
        assert_near(score_distance(input), expected);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(3.0, 0.7)]
    #[case(10.0, 0.0)]
    #[case(14.0, 0.0)]
    #[case(-2.0, 1.0)]
    #[case(f64::NAN, 0.0)]
    fn quieter_benches_score_higher(#[case] level: f64, #[case] expected: f64) {
        assert_near(score_noise_level(level), expected);
    }

    #[rstest]
    #[case(1.0, 0.0)]
    #[case(3.0, 0.5)]
    #[case(4.0, 0.75)]
    #[case(5.0, 1.0)]
    #[case(0.0, 0.0)]
    #[case(9.0, 1.0)]
    #[case(f64::NEG_INFINITY, 0.0)]
    fn cleanliness_maps_onto_unit_range(#[case] rating: f64, #[case] expected: f64) {
        assert_near(score_cleanliness(rating), expected);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(4, 0.5)]
    #[case(8, 1.0)]
    #[case(20, 1.0)]
    fn seating_saturates_at_eight(#[case] seats: u32, #[case] expected: f64) {
        assert_near(score_seating(seats), expected);
    }

    #[rstest]
    #[case(None, 0.0)]
    #[case(Some(0.5), 0.5)]
    #[case(Some(1.7), 1.0)]
    #[case(Some(-1.0), 0.0)]
    #[case(Some(f64::NAN), 0.0)]
    fn graffiti_fraction_is_clamped(#[case] input: Option<f64>, #[case] expected: f64) {
        assert_near(graffiti_fraction(input), expected);
    }

    #[rstest]
    fn best_case_sub_scores_are_all_one() {
        let scores = SubScores::from_factors(&best_case_factors());
        for factor in Factor::ALL {
            assert_near(scores.get(factor), 1.0);
        }
    }

    #[rstest]
    fn worst_case_sub_scores_are_all_zero() {
        let scores = SubScores::from_factors(&worst_case_factors());
        for factor in Factor::ALL {
            assert_near(scores.get(factor), 0.0);
        }
    }
}
