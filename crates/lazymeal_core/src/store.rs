//! Meal snapshot storage.
//!
//! # Responsibility
//! - Read and write the durable snapshot at one injected filesystem path.
//! - Distinguish "no snapshot yet" from real I/O and decode faults.
//!
//! # Invariants
//! - Absence of the snapshot file loads as `Ok(None)`, never as an error.
//! - `save` is atomic from the caller's view: the file holds either the
//!   previous snapshot or the complete new one, even when a write fails
//!   partway.
//! - The snapshot path is injected at construction; core holds no global
//!   storage location.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::codec::{self, DecodeError, EncodeError};
use crate::model::meal::Meal;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Snapshot file name used when a shell configures only a data directory.
pub const SNAPSHOT_FILE_NAME: &str = "meals.json";

/// Result type used by snapshot storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by snapshot storage operations.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem read or write failed.
    Io(std::io::Error),
    /// The in-memory list could not be encoded.
    Encode(EncodeError),
    /// Persisted bytes could not be decoded into a valid list.
    Decode(DecodeError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot I/O failed: {err}"),
            Self::Encode(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<EncodeError> for StoreError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

impl From<DecodeError> for StoreError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

/// Storage contract the repository persists through.
///
/// Kept as a trait so repository behavior under storage failure stays
/// testable without touching the filesystem.
pub trait MealStore {
    /// Loads the persisted meal list.
    ///
    /// Returns `Ok(None)` when no snapshot exists yet (expected first-run
    /// state), `Ok(Some(meals))` on success, and `StoreError` for read or
    /// decode faults on an existing snapshot.
    fn load(&self) -> StoreResult<Option<Vec<Meal>>>;

    /// Persists the full meal list, replacing any prior snapshot.
    fn save(&self, meals: &[Meal]) -> StoreResult<()>;
}

/// Snapshot store backed by one file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileMealStore {
    path: PathBuf,
}

impl FileMealStore {
    /// Creates a store over an explicit snapshot file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store over [`SNAPSHOT_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SNAPSHOT_FILE_NAME),
        }
    }

    /// Snapshot file path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MealStore for FileMealStore {
    fn load(&self) -> StoreResult<Option<Vec<Meal>>> {
        let started_at = Instant::now();
        info!(
            "event=snapshot_load module=store status=start path={}",
            self.path.display()
        );

        if !self.path.exists() {
            // First run: nothing saved yet. Expected, not a fault.
            info!(
                "event=snapshot_load module=store status=ok reason=not_found path={}",
                self.path.display()
            );
            return Ok(None);
        }

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(
                    "event=snapshot_load module=store status=error error_code=snapshot_read_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(StoreError::Io(err));
            }
        };

        match codec::decode(&bytes) {
            Ok(meals) => {
                info!(
                    "event=snapshot_load module=store status=ok count={} duration_ms={}",
                    meals.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Some(meals))
            }
            Err(err) => {
                error!(
                    "event=snapshot_load module=store status=error error_code=snapshot_decode_failed path={} error={}",
                    self.path.display(),
                    err
                );
                Err(StoreError::Decode(err))
            }
        }
    }

    fn save(&self, meals: &[Meal]) -> StoreResult<()> {
        let started_at = Instant::now();
        let bytes = codec::encode(meals)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Io)?;
        }

        // Write the new snapshot beside the target, then rename over it, so
        // a failed write can never truncate the previous snapshot.
        let temp_path = self.path.with_extension("json.tmp");
        match fs::write(&temp_path, &bytes).and_then(|()| fs::rename(&temp_path, &self.path)) {
            Ok(()) => {
                info!(
                    "event=snapshot_save module=store status=ok count={} bytes={} duration_ms={}",
                    meals.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=snapshot_save module=store status=error error_code=snapshot_write_failed path={} error={}",
                    self.path.display(),
                    err
                );
                Err(StoreError::Io(err))
            }
        }
    }
}
