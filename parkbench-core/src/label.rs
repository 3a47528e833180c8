//! Ordinal quality labels derived from composite scores.
//!
//! Labels are never stored on their own; they are recomputed from the score
//! that produced them.
//!
//! # Examples
//! ```
//! use parkbench_core::QualityLabel;
//!
//! assert_eq!(QualityLabel::NeedsImprovement.as_str(), "needs_improvement");
//! assert_eq!(QualityLabel::Good.to_string(), "good");
//! assert!(QualityLabel::Excellent > QualityLabel::Average);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quality band for a bench, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QualityLabel {
    /// Below every positive threshold.
    NeedsImprovement,
    /// Serviceable but unremarkable.
    Average,
    /// Comfortable and well placed.
    Good,
    /// Among the best benches.
    Excellent,
}

impl QualityLabel {
    /// All labels from worst to best.
    pub const ALL: [Self; 4] = [
        Self::NeedsImprovement,
        Self::Average,
        Self::Good,
        Self::Excellent,
    ];

    /// Return the label as a snake-case `&str`.
    ///
    /// # Examples
    /// ```
    /// use parkbench_core::QualityLabel;
    ///
    /// assert_eq!(QualityLabel::Excellent.as_str(), "excellent");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NeedsImprovement => "needs_improvement",
            Self::Average => "average",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl std::fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QualityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "needs_improvement" => Ok(Self::NeedsImprovement),
            "average" => Ok(Self::Average),
            "good" => Ok(Self::Good),
            "excellent" => Ok(Self::Excellent),
            _ => Err(format!("unknown quality label '{s}'")),
        }
    }
}

/// A composite score together with the label it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualityAssessment {
    /// Composite score, nominally `0..=100` plus any bonus.
    pub score: u32,
    /// Label derived from `score`.
    pub label: QualityLabel,
}
