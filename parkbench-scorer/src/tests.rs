//! Unit coverage for weighted bench quality aggregation.
#![forbid(unsafe_code)]

use parkbench_core::test_support::{best_case_factors, typical_factors, worst_case_factors};
use parkbench_core::{BenchComfortFactors, QualityLabel, QualityScorer, Shade};
use rstest::rstest;
use std::sync::Arc;
use std::thread;

use crate::{
    Factor, QualityWeights, WeightedQualityScorer, calc_bench_quality, calc_bench_quality_with,
    map_quality_to_label, to_score,
};

#[rstest]
fn typical_bench_scores_fifty_three() {
    let score = calc_bench_quality(&typical_factors());
    assert_eq!(score, 53);
    assert_eq!(map_quality_to_label(f64::from(score)), QualityLabel::Average);
}

#[rstest]
fn worst_case_bench_scores_zero() {
    let score = calc_bench_quality(&worst_case_factors());
    assert_eq!(score, 0);
    assert_eq!(
        map_quality_to_label(f64::from(score)),
        QualityLabel::NeedsImprovement
    );
}

#[rstest]
fn best_case_bench_reaches_the_bonus_ceiling() {
    let score = calc_bench_quality(&best_case_factors());
    assert_eq!(score, 106);
    assert_eq!(map_quality_to_label(f64::from(score)), QualityLabel::Excellent);
}

#[rstest]
fn best_core_without_graffiti_scores_one_hundred() {
    let factors = BenchComfortFactors {
        graffiti_resistance_score: None,
        ..best_case_factors()
    };
    assert_eq!(calc_bench_quality(&factors), 100);
}

#[rstest]
fn shade_of_one_and_fifty_percent_differ() {
    let full = BenchComfortFactors {
        shade_percent: Shade::Inferred(1.0),
        ..typical_factors()
    };
    let half = BenchComfortFactors {
        shade_percent: Shade::Inferred(50.0),
        ..typical_factors()
    };
    assert!(calc_bench_quality(&full) > calc_bench_quality(&half));
    assert_eq!(calc_bench_quality(&half), calc_bench_quality(&typical_factors()));
}

#[rstest]
fn explicit_percent_unit_disambiguates_one() {
    let one_percent = BenchComfortFactors {
        shade_percent: Shade::Percent(1.0),
        ..typical_factors()
    };
    let no_shade = BenchComfortFactors {
        shade_percent: Shade::Fraction(0.0),
        ..typical_factors()
    };
    assert_eq!(calc_bench_quality(&one_percent), calc_bench_quality(&no_shade));
}

#[rstest]
fn zero_metre_trash_distance_is_best_case() {
    let beside_bin = typical_factors().with_trash_can_distance(0.0);
    let missing = typical_factors();
    // 0.15 / 0.98 of the budget separates the two.
    assert_eq!(calc_bench_quality(&beside_bin), 69);
    assert_eq!(calc_bench_quality(&missing), 53);
}

#[rstest]
fn scoring_leaves_input_untouched_and_is_repeatable() {
    let factors = typical_factors();
    let snapshot = factors.clone();
    let first = calc_bench_quality(&factors);
    let second = calc_bench_quality(&factors);
    assert_eq!(first, second);
    assert_eq!(factors, snapshot);
}

#[rstest]
fn non_finite_measurements_score_as_worst_case() {
    let poisoned = BenchComfortFactors {
        shade_percent: Shade::Inferred(f64::NAN),
        seat_count: 0,
        has_backrest: false,
        has_armrests: false,
        distance_to_trash_can_meters: Some(f64::INFINITY),
        distance_to_footpath_meters: f64::NAN,
        average_noise_level: f64::NAN,
        cleanliness_rating: f64::NEG_INFINITY,
        graffiti_resistance_score: Some(f64::NAN),
    };
    assert_eq!(calc_bench_quality(&poisoned), 0);
}

#[rstest]
fn custom_weights_shift_the_score() {
    let seating_only = [
        Factor::Shade,
        Factor::Backrest,
        Factor::Armrests,
        Factor::TrashDistance,
        Factor::Footpath,
        Factor::Noise,
        Factor::Cleanliness,
    ]
    .into_iter()
    .try_fold(QualityWeights::default(), |weights, factor| {
        weights.with_weight(factor, 0.0)
    })
    .and_then(|weights| weights.with_graffiti_bonus(0.0))
    .expect("valid weights");
    // Four of eight seats.
    assert_eq!(calc_bench_quality_with(&typical_factors(), &seating_only), 50);
}

#[rstest]
fn shared_scorer_agrees_across_threads() {
    let scorer = Arc::new(WeightedQualityScorer::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&scorer);
            thread::spawn(move || shared.assess(&typical_factors()))
        })
        .collect();
    for handle in handles {
        let assessment = handle.join().expect("scoring thread panicked");
        assert_eq!(assessment.score, 53);
        assert_eq!(assessment.label, QualityLabel::Average);
    }
}

#[rstest]
fn weighted_scorer_matches_free_functions() {
    let scorer = WeightedQualityScorer::default();
    let assessment = scorer.assess(&typical_factors());
    assert_eq!(assessment.score, calc_bench_quality(&typical_factors()));
    assert_eq!(assessment.label, QualityLabel::Average);
}

#[rstest]
#[case(0.0, 0)]
#[case(0.004_9, 0)]
#[case(0.005, 1)]
#[case(0.532_1, 53)]
#[case(1.06, 106)]
#[case(-0.3, 0)]
#[case(f64::NAN, 0)]
#[case(f64::INFINITY, 0)]
fn fractions_round_to_points(#[case] fraction: f64, #[case] expected: u32) {
    assert_eq!(to_score(fraction), expected);
}
