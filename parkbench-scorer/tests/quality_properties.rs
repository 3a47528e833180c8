//! Property-based tests for bench quality scoring.
//!
//! # Invariants tested
//!
//! - **Bounded scores:** any record, however malformed, scores in `0..=106`
//!   under the default table.
//! - **Monotonic labels:** a higher score never maps to a worse label.
//! - **Purity:** scoring is repeatable and leaves the record untouched.
//! - **Amenities help:** adding a backrest or armrests never lowers a score.

use parkbench_core::{BenchComfortFactors, Shade};
use parkbench_scorer::{calc_bench_quality, map_quality_to_label};
use proptest::prelude::*;

/// Highest score reachable with the default table.
const MAX_SCORE: u32 = 106;

/// Any `f64`, biased towards the special values scoring must absorb.
fn measurement() -> impl Strategy<Value = f64> {
    prop_oneof![
        6 => -50.0_f64..250.0_f64,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn shade() -> impl Strategy<Value = Shade> {
    prop_oneof![
        measurement().prop_map(Shade::Inferred),
        measurement().prop_map(Shade::Fraction),
        measurement().prop_map(Shade::Percent),
    ]
}

fn factors() -> impl Strategy<Value = BenchComfortFactors> {
    (
        shade(),
        0_u32..20,
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(measurement()),
        measurement(),
        measurement(),
        measurement(),
        proptest::option::of(measurement()),
    )
        .prop_map(
            |(
                shade_percent,
                seat_count,
                has_backrest,
                has_armrests,
                distance_to_trash_can_meters,
                distance_to_footpath_meters,
                average_noise_level,
                cleanliness_rating,
                graffiti_resistance_score,
            )| BenchComfortFactors {
                shade_percent,
                seat_count,
                has_backrest,
                has_armrests,
                distance_to_trash_can_meters,
                distance_to_footpath_meters,
                average_noise_level,
                cleanliness_rating,
                graffiti_resistance_score,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: scores stay within the default table's range.
    #[test]
    fn scores_are_bounded(bench in factors()) {
        let score = calc_bench_quality(&bench);
        prop_assert!(score <= MAX_SCORE, "score {score} exceeds {MAX_SCORE}");
    }

    /// Property: scoring the same record twice agrees and never mutates it.
    #[test]
    fn scoring_is_pure(bench in factors()) {
        let snapshot = format!("{bench:?}");
        let first = calc_bench_quality(&bench);
        let second = calc_bench_quality(&bench);
        prop_assert_eq!(first, second);
        prop_assert_eq!(format!("{bench:?}"), snapshot);
    }

    /// Property: classification is monotonic in the score.
    #[test]
    fn labels_never_regress_as_scores_rise(
        lower in -200.0_f64..300.0_f64,
        gap in 0.0_f64..200.0_f64,
    ) {
        #[expect(
            clippy::float_arithmetic,
            reason = "the upper score is derived from the lower one"
        )]
        let upper = lower + gap;
        prop_assert!(map_quality_to_label(lower) <= map_quality_to_label(upper));
    }

    /// Property: adding amenities never lowers the score.
    #[test]
    fn amenities_never_hurt(bench in factors()) {
        let bare = BenchComfortFactors {
            has_backrest: false,
            has_armrests: false,
            ..bench.clone()
        };
        let furnished = BenchComfortFactors {
            has_backrest: true,
            has_armrests: true,
            ..bench
        };
        prop_assert!(calc_bench_quality(&furnished) >= calc_bench_quality(&bare));
    }
}
