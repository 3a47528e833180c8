//! Facade crate for the Parkbench bench quality engine.
//!
//! This crate re-exports the core domain types and, behind the `scorer`
//! feature, the weighted quality scorer and label classifier.

#![forbid(unsafe_code)]

pub use parkbench_core::{
    BenchComfortFactors, BenchFlag, BenchSubmission, FlagError, FlagLedger, FlagReason, Location,
    QualityAssessment, QualityLabel, QualityScorer, Shade, SubmissionError,
};

#[cfg(feature = "scorer")]
pub use parkbench_scorer::{
    BenchRecord, Factor, LabelThresholds, QualityWeights, RankedBench, ThresholdsError,
    WeightTable, WeightedQualityScorer, WeightsError, calc_bench_quality, calc_bench_quality_with,
    map_quality_to_label, rank_benches,
};
