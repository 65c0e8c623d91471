//! Meal domain model.
//!
//! # Responsibility
//! - Define the validated meal entry used across repository and codec.
//! - Make invalid meals unrepresentable: construction is the only way in.
//!
//! # Invariants
//! - `name` is never empty (exact emptiness check, no trimming).
//! - `rating` always lies in `[MIN_RATING, MAX_RATING]`.
//! - `image` carries the caller's bytes untouched; `None` means "no picture"
//!   and is never replaced by placeholder pixels.
//!
//! # See also
//! - docs/architecture/data-model.md

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest accepted meal rating.
pub const MIN_RATING: i32 = 0;

/// Highest accepted meal rating (five stars).
pub const MAX_RATING: i32 = 5;

/// Validation failures raised by [`Meal::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealValidationError {
    /// Meal name was empty.
    EmptyName,
    /// Rating lies outside the accepted range.
    RatingOutOfRange { rating: i32 },
}

impl Display for MealValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "meal name must not be empty"),
            Self::RatingOutOfRange { rating } => write!(
                f,
                "meal rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
            ),
        }
    }
}

impl Error for MealValidationError {}

/// One journaled meal entry.
///
/// Fields are private on purpose: a `Meal` that exists has already passed
/// validation, and stays immutable afterwards. "Editing" an entry means
/// building a replacement via [`Meal::new`] and substituting it in the
/// repository at the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    name: String,
    image: Option<Vec<u8>>,
    rating: i32,
}

impl Meal {
    /// Validating factory for meal entries.
    ///
    /// # Contract
    /// - Returns `EmptyName` when `name` is empty; no trimming is applied.
    /// - Returns `RatingOutOfRange` when `rating` is outside `[0, 5]`;
    ///   out-of-range values are rejected, never clamped.
    /// - On success the returned meal holds the exact inputs, including the
    ///   presence/absence of `image`.
    pub fn new(
        name: impl Into<String>,
        image: Option<Vec<u8>>,
        rating: i32,
    ) -> Result<Self, MealValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(MealValidationError::EmptyName);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(MealValidationError::RatingOutOfRange { rating });
        }

        Ok(Self {
            name,
            image,
            rating,
        })
    }

    /// Meal name. Guaranteed non-empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw picture bytes, when a picture was attached.
    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    /// Star rating in `[0, 5]`.
    pub fn rating(&self) -> i32 {
        self.rating
    }
}
