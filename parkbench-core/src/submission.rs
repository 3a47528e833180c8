//! Validation for new bench submissions.
//!
//! A submission is what a user sends when pinning a new bench: a title, a
//! description, at least one uploaded photo URL, and the pinned location.

use thiserror::Error;
use url::Url;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MAX_TITLE_CHARS: usize = 100;
const MAX_DESCRIPTION_CHARS: usize = 500;

/// A pinned map location in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Errors returned by [`BenchSubmission::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The title was blank.
    #[error("submission title must not be empty")]
    EmptyTitle,
    /// The title exceeded the length limit.
    #[error("submission title must be at most {max} characters (got {actual})")]
    TitleTooLong {
        /// Maximum permitted characters.
        max: usize,
        /// Characters supplied.
        actual: usize,
    },
    /// The description was blank.
    #[error("submission description must not be empty")]
    EmptyDescription,
    /// The description exceeded the length limit.
    #[error("submission description must be at most {max} characters (got {actual})")]
    DescriptionTooLong {
        /// Maximum permitted characters.
        max: usize,
        /// Characters supplied.
        actual: usize,
    },
    /// No photo URLs were supplied.
    #[error("submission must include at least one photo")]
    MissingPhotos,
    /// A photo URL could not be parsed.
    #[error("photo URL '{url}' is not a valid URL")]
    InvalidPhotoUrl {
        /// Offending URL.
        url: String,
    },
    /// The location was never picked on the map.
    #[error("a location must be picked on the map")]
    LocationNotPicked,
    /// The location lies outside valid coordinate ranges.
    #[error("location must have latitude within ±90 and longitude within ±180")]
    LocationOutOfRange,
}

/// A user's request to add a bench to the map.
///
/// # Examples
/// ```
/// use parkbench_core::{BenchSubmission, Location};
///
/// let submission = BenchSubmission {
///     title: "Bench under the maple".into(),
///     description: "Large wooden bench with a backrest and plenty of shade.".into(),
///     photo_urls: vec!["https://example.com/photo.jpg".into()],
///     location: Location { lat: 54.687157, lng: 25.279652 },
/// };
/// assert!(submission.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BenchSubmission {
    /// Short display name.
    pub title: String,
    /// Longer free-text description.
    pub description: String,
    /// URLs of uploaded photos.
    pub photo_urls: Vec<String>,
    /// Where the bench was pinned.
    pub location: Location,
}

impl BenchSubmission {
    /// Check every field, reporting the first problem found.
    ///
    /// # Errors
    /// Returns a [`SubmissionError`] describing the first invalid field, in
    /// the order title, description, photos, location.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        validate_text(
            &self.title,
            MAX_TITLE_CHARS,
            SubmissionError::EmptyTitle,
            |max, actual| SubmissionError::TitleTooLong { max, actual },
        )?;
        validate_text(
            &self.description,
            MAX_DESCRIPTION_CHARS,
            SubmissionError::EmptyDescription,
            |max, actual| SubmissionError::DescriptionTooLong { max, actual },
        )?;
        self.validate_photos()?;
        validate_location(self.location)
    }

    fn validate_photos(&self) -> Result<(), SubmissionError> {
        if self.photo_urls.is_empty() {
            return Err(SubmissionError::MissingPhotos);
        }
        for raw in &self.photo_urls {
            Url::parse(raw).map_err(|_| SubmissionError::InvalidPhotoUrl { url: raw.clone() })?;
        }
        Ok(())
    }
}

fn validate_text(
    text: &str,
    max: usize,
    empty: SubmissionError,
    too_long: impl FnOnce(usize, usize) -> SubmissionError,
) -> Result<(), SubmissionError> {
    if text.trim().is_empty() {
        return Err(empty);
    }
    let actual = text.chars().count();
    if actual > max {
        return Err(too_long(max, actual));
    }
    Ok(())
}

fn validate_location(location: Location) -> Result<(), SubmissionError> {
    let Location { lat, lng } = location;
    if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
        return Err(SubmissionError::LocationOutOfRange);
    }
    // The map widget reports an unpicked pin as the null island.
    if lat.abs() < f64::EPSILON && lng.abs() < f64::EPSILON {
        return Err(SubmissionError::LocationNotPicked);
    }
    Ok(())
}
