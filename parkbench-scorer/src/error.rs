//! Error types raised while configuring the quality scorer.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while validating or loading a weight table.
#[derive(Debug, Error)]
pub enum WeightsError {
    /// A weight was `NaN` or infinite.
    #[error("weight for {factor} must be finite")]
    NonFinite {
        /// Name of the offending factor.
        factor: &'static str,
    },
    /// A weight was below zero.
    #[error("weight for {factor} must not be negative (got {weight})")]
    Negative {
        /// Name of the offending factor.
        factor: &'static str,
        /// Value supplied.
        weight: f64,
    },
    /// Every core weight was zero.
    #[error("core weights must sum to a positive value")]
    ZeroTotal,
    /// Opening the weights file failed.
    #[error("failed to read weights file at {path}")]
    Read {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The weights file was not a valid weight table.
    #[error("failed to parse weights file at {path}")]
    Parse {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while validating label thresholds.
#[derive(Debug, Error, PartialEq)]
pub enum ThresholdsError {
    /// A threshold was `NaN` or infinite.
    #[error("label thresholds must be finite")]
    NonFinite,
    /// Thresholds were not strictly descending from excellent to average.
    #[error(
        "label thresholds must satisfy excellent > good > average \
         (got {excellent}, {good}, {average})"
    )]
    NotDescending {
        /// Lower bound for `excellent`.
        excellent: f64,
        /// Lower bound for `good`.
        good: f64,
        /// Lower bound for `average`.
        average: f64,
    },
    /// A threshold fell outside the range the classifier clamps scores to.
    #[error("label thresholds must lie within 0..={ceiling} (got {value})")]
    OutOfRange {
        /// Offending threshold.
        value: f64,
        /// Upper end of the classifier's range.
        ceiling: f64,
    },
}
