//! Raw comfort measurements describing a single bench.
//!
//! [`BenchComfortFactors`] is a plain value object assembled by the caller
//! from stored bench attributes. Scoring reads it but never writes to it, so a
//! record can be shared across threads and scored any number of times.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shade coverage over a bench.
///
/// Older records store a bare number whose unit is inferred from its
/// magnitude: values above `1` are percentages and everything else is a
/// fraction. New callers should state the unit explicitly with
/// [`Shade::Fraction`] or [`Shade::Percent`], which removes the ambiguity
/// between "1 %" and "100 %".
///
/// When serialised, inferred readings are plain numbers while explicit ones
/// are written as `{"fraction": 0.4}` or `{"percent": 40}`.
///
/// # Examples
/// ```
/// use parkbench_core::Shade;
///
/// assert_eq!(Shade::from(0.5), Shade::Inferred(0.5));
/// assert_ne!(Shade::Percent(1.0), Shade::Fraction(1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ShadeRepr", into = "ShadeRepr"))]
pub enum Shade {
    /// A bare reading whose unit is inferred from its magnitude.
    Inferred(f64),
    /// Coverage as a fraction in `0.0..=1.0`.
    Fraction(f64),
    /// Coverage as a percentage in `0.0..=100.0`.
    Percent(f64),
}

impl From<f64> for Shade {
    fn from(raw: f64) -> Self {
        Self::Inferred(raw)
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ShadeRepr {
    Raw(f64),
    Explicit(ExplicitShade),
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ExplicitShade {
    Fraction(f64),
    Percent(f64),
}

#[cfg(feature = "serde")]
impl From<ShadeRepr> for Shade {
    fn from(repr: ShadeRepr) -> Self {
        match repr {
            ShadeRepr::Raw(raw) => Self::Inferred(raw),
            ShadeRepr::Explicit(ExplicitShade::Fraction(value)) => Self::Fraction(value),
            ShadeRepr::Explicit(ExplicitShade::Percent(value)) => Self::Percent(value),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Shade> for ShadeRepr {
    fn from(shade: Shade) -> Self {
        match shade {
            Shade::Inferred(raw) => Self::Raw(raw),
            Shade::Fraction(value) => Self::Explicit(ExplicitShade::Fraction(value)),
            Shade::Percent(value) => Self::Explicit(ExplicitShade::Percent(value)),
        }
    }
}

/// Physical and environmental measurements of a bench.
///
/// Every field is supplied by the caller. Out-of-range and non-finite values
/// are tolerated; the scorer clamps them or falls back to the worst case for
/// the affected factor.
///
/// # Examples
/// ```
/// use parkbench_core::BenchComfortFactors;
///
/// let factors = BenchComfortFactors {
///     shade_percent: 40.0.into(),
///     seat_count: 3,
///     has_backrest: true,
///     has_armrests: false,
///     distance_to_trash_can_meters: None,
///     distance_to_footpath_meters: 12.0,
///     average_noise_level: 4.0,
///     cleanliness_rating: 4.0,
///     graffiti_resistance_score: None,
/// }
/// .with_trash_can_distance(30.0);
/// assert_eq!(factors.distance_to_trash_can_meters, Some(30.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct BenchComfortFactors {
    /// Shade coverage over the seat.
    pub shade_percent: Shade,
    /// Number of seats; scoring saturates at eight.
    pub seat_count: u32,
    /// Whether the bench has a backrest.
    pub has_backrest: bool,
    /// Whether the bench has armrests.
    pub has_armrests: bool,
    /// Walking distance to the nearest bin. `None` when unmeasured.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_to_trash_can_meters: Option<f64>,
    /// Walking distance to the nearest footpath.
    pub distance_to_footpath_meters: f64,
    /// Average noise on a `0..=10` scale.
    pub average_noise_level: f64,
    /// Cleanliness on a `1..=5` scale.
    pub cleanliness_rating: f64,
    /// Graffiti resistance as a fraction. `None` when unassessed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub graffiti_resistance_score: Option<f64>,
}

impl BenchComfortFactors {
    /// Record a measured distance to the nearest bin, returning `self`.
    #[must_use]
    pub const fn with_trash_can_distance(mut self, meters: f64) -> Self {
        self.distance_to_trash_can_meters = Some(meters);
        self
    }

    /// Record a graffiti resistance assessment, returning `self`.
    #[must_use]
    pub const fn with_graffiti_resistance(mut self, score: f64) -> Self {
        self.graffiti_resistance_score = Some(score);
        self
    }
}
