//! Snapshot codec for the meal journal.
//!
//! # Responsibility
//! - Convert the full ordered meal list to and from durable snapshot bytes.
//! - Keep the wire shape explicit: serde derives live on dedicated wire
//!   structs, never on the domain model.
//!
//! # Invariants
//! - `decode(encode(meals)) == meals` for every valid list, byte-for-byte on
//!   image payloads, order preserved.
//! - Decode is all-or-nothing: one bad record fails the whole snapshot.
//! - Every decoded record re-enters through [`Meal::new`]; tampered bytes
//!   cannot produce an invalid meal.
//! - Exactly one snapshot version is recognized per binary.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::meal::{Meal, MealValidationError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot format version this binary reads and writes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised while encoding a snapshot.
#[derive(Debug)]
pub enum EncodeError {
    /// Snapshot document could not be serialized.
    Serialize(String),
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(message) => write!(f, "failed to serialize meal snapshot: {message}"),
        }
    }
}

impl Error for EncodeError {}

/// Errors raised while decoding snapshot bytes.
#[derive(Debug)]
pub enum DecodeError {
    /// Bytes are not the expected snapshot document (bad JSON, truncated
    /// content, or wrong top-level shape).
    Malformed(String),
    /// Snapshot was written with a format version this binary does not read.
    UnsupportedVersion { found: u32, supported: u32 },
    /// A record's image payload is not valid base64.
    InvalidImage { index: usize, detail: String },
    /// A record's fields do not pass meal validation.
    InvalidRecord {
        index: usize,
        source: MealValidationError,
    },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed meal snapshot: {message}"),
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "meal snapshot version {found} is not supported; this build reads version {supported}"
            ),
            Self::InvalidImage { index, detail } => {
                write!(f, "meal record {index} has an invalid image payload: {detail}")
            }
            Self::InvalidRecord { index, source } => {
                write!(f, "meal record {index} is invalid: {source}")
            }
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRecord { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Top-level snapshot document.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDoc {
    version: u32,
    meals: Vec<WireMeal>,
}

/// Wire form of one meal record. Image bytes travel base64-encoded so the
/// snapshot stays a plain JSON document.
#[derive(Debug, Serialize, Deserialize)]
struct WireMeal {
    name: String,
    image_b64: Option<String>,
    rating: i32,
}

/// Encodes the full meal list into snapshot bytes.
pub fn encode(meals: &[Meal]) -> Result<Vec<u8>, EncodeError> {
    let doc = SnapshotDoc {
        version: SNAPSHOT_VERSION,
        meals: meals.iter().map(wire_from_meal).collect(),
    };

    let mut bytes = serde_json::to_vec_pretty(&doc)
        .map_err(|err| EncodeError::Serialize(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decodes snapshot bytes back into the ordered meal list.
///
/// # Errors
/// - `Malformed` when the bytes do not parse into the snapshot document.
/// - `UnsupportedVersion` when the document's version field differs from
///   [`SNAPSHOT_VERSION`].
/// - `InvalidImage` / `InvalidRecord` when any embedded record is corrupt;
///   no partial list is ever returned.
pub fn decode(bytes: &[u8]) -> Result<Vec<Meal>, DecodeError> {
    let doc: SnapshotDoc =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::Malformed(err.to_string()))?;

    if doc.version != SNAPSHOT_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found: doc.version,
            supported: SNAPSHOT_VERSION,
        });
    }

    let mut meals = Vec::with_capacity(doc.meals.len());
    for (index, wire) in doc.meals.into_iter().enumerate() {
        meals.push(meal_from_wire(index, wire)?);
    }
    Ok(meals)
}

fn wire_from_meal(meal: &Meal) -> WireMeal {
    WireMeal {
        name: meal.name().to_string(),
        image_b64: meal.image().map(|bytes| BASE64.encode(bytes)),
        rating: meal.rating(),
    }
}

fn meal_from_wire(index: usize, wire: WireMeal) -> Result<Meal, DecodeError> {
    let image = match wire.image_b64 {
        Some(encoded) => Some(BASE64.decode(encoded.as_bytes()).map_err(|err| {
            DecodeError::InvalidImage {
                index,
                detail: err.to_string(),
            }
        })?),
        None => None,
    };

    Meal::new(wire.name, image, wire.rating)
        .map_err(|source| DecodeError::InvalidRecord { index, source })
}
