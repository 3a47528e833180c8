//! Core domain types for the Parkbench engine.
//!
//! The crate describes a bench's comfort measurements, the labels its quality
//! score maps onto, and the [`QualityScorer`] seam that scoring
//! implementations plug into. It also hosts the community-facing records
//! that travel alongside scores: bench flags and new bench submissions.
//! Constructors and validators return `Result` to surface invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod factors;
pub mod flags;
pub mod label;
pub mod scorer;
pub mod submission;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use factors::{BenchComfortFactors, Shade};
pub use flags::{BenchFlag, FlagError, FlagLedger, FlagReason};
pub use label::{QualityAssessment, QualityLabel};
pub use scorer::QualityScorer;
pub use submission::{BenchSubmission, Location, SubmissionError};
