//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level meal journal functions to Dart via FRB.
//! - Keep error semantics simple for the UI: envelopes, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The snapshot path is pinned once per process; every call operates on
//!   the same durable file.
//! - Validation failures surface as `ok=false`; persist failures surface as
//!   `ok=true, persisted=false` (the in-memory mutation took effect).
//!
//! # See also
//! - docs/architecture/logging.md

use lazymeal_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    FileMealStore, InitSource, Meal, MealRepository, MutationReceipt, PersistOutcome,
    SNAPSHOT_FILE_NAME,
};
use std::path::PathBuf;
use std::sync::OnceLock;

static SNAPSHOT_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the meal snapshot location for this process.
///
/// The snapshot file lives at `<data_dir>/meals.json`. The first successful
/// call wins; later calls are idempotent for the same directory and return
/// an error message for a different one.
///
/// # FFI contract
/// - Sync call, non-blocking (no file I/O; the store creates directories
///   lazily on first save).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_meal_store(data_dir: String) -> String {
    let trimmed = data_dir.trim();
    if trimmed.is_empty() {
        return "data_dir cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed).join(SNAPSHOT_FILE_NAME);

    let pinned = SNAPSHOT_PATH.get_or_init(|| requested.clone());
    if *pinned != requested {
        return format!(
            "meal store already initialized at `{}`; refusing to switch to `{}`",
            pinned.display(),
            requested.display()
        );
    }

    String::new()
}

/// One meal entry as presented to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealItem {
    /// Meal name, non-empty.
    pub name: String,
    /// Raw picture bytes; `None` when no picture is attached.
    pub image: Option<Vec<u8>>,
    /// Star rating in `[0, 5]`.
    pub rating: i32,
}

/// List response envelope for the meal journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealListResponse {
    /// Meals in presentation order.
    pub items: Vec<MealItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for meal mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealActionResponse {
    /// Whether the mutation was accepted.
    pub ok: bool,
    /// Index the mutation acted on (for creates, the new entry's index).
    pub index: Option<u32>,
    /// Whether the mutation also reached the snapshot file. `ok=true` with
    /// `persisted=false` means the change is live in memory only.
    pub persisted: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl MealActionResponse {
    fn from_receipt(receipt: MutationReceipt, verb: &str) -> Self {
        let index = u32::try_from(receipt.index).ok();
        match receipt.persistence {
            PersistOutcome::Saved => Self {
                ok: true,
                index,
                persisted: true,
                message: format!("Meal {verb}."),
            },
            PersistOutcome::Failed(err) => Self {
                ok: true,
                index,
                persisted: false,
                message: format!("Meal {verb}, but saving failed: {err}"),
            },
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            index: None,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Lists all journaled meals in presentation order.
///
/// # FFI contract
/// - Sync call, snapshot-backed execution.
/// - Never panics.
/// - A load fault degrades to seed data; the message carries the detail.
#[flutter_rust_bridge::frb(sync)]
pub fn list_meals() -> MealListResponse {
    let mut repo = open_repository();
    let report = repo.initialize();

    let items = repo.meals().iter().map(to_meal_item).collect::<Vec<_>>();
    let message = match report.source {
        InitSource::Restored => format!("Loaded {} meal(s).", report.count),
        InitSource::Seeded => format!("First run; seeded {} sample meal(s).", report.count),
        InitSource::SeededAfterError(err) => {
            format!("Stored meals were unreadable ({err}); showing sample meals.")
        }
    };

    MealListResponse { items, message }
}

/// Creates one meal entry at the end of the list.
///
/// # FFI contract
/// - Sync call, snapshot-backed execution.
/// - Never panics.
/// - Invalid input (empty name, rating outside `[0, 5]`) returns `ok=false`
///   without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn create_meal(name: String, image: Option<Vec<u8>>, rating: i32) -> MealActionResponse {
    let meal = match Meal::new(name, image, rating) {
        Ok(meal) => meal,
        Err(err) => return MealActionResponse::failure(format!("create_meal rejected: {err}")),
    };

    let mut repo = open_repository();
    repo.initialize();
    MealActionResponse::from_receipt(repo.append(meal), "created")
}

/// Replaces the meal entry at `index`.
///
/// # FFI contract
/// - Sync call, snapshot-backed execution.
/// - Never panics.
/// - Invalid input or an out-of-range index returns `ok=false`; an
///   out-of-range index never auto-appends.
#[flutter_rust_bridge::frb(sync)]
pub fn update_meal(
    index: u32,
    name: String,
    image: Option<Vec<u8>>,
    rating: i32,
) -> MealActionResponse {
    let meal = match Meal::new(name, image, rating) {
        Ok(meal) => meal,
        Err(err) => return MealActionResponse::failure(format!("update_meal rejected: {err}")),
    };

    let mut repo = open_repository();
    repo.initialize();
    match repo.replace(index as usize, meal) {
        Ok(receipt) => MealActionResponse::from_receipt(receipt, "updated"),
        Err(err) => MealActionResponse::failure(format!("update_meal failed: {err}")),
    }
}

/// Deletes the meal entry at `index`, shifting later entries down.
///
/// # FFI contract
/// - Sync call, snapshot-backed execution.
/// - Never panics.
/// - An out-of-range index returns `ok=false` without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_meal(index: u32) -> MealActionResponse {
    let mut repo = open_repository();
    repo.initialize();
    match repo.remove_at(index as usize) {
        Ok(receipt) => MealActionResponse::from_receipt(receipt, "deleted"),
        Err(err) => MealActionResponse::failure(format!("delete_meal failed: {err}")),
    }
}

// Each call opens a fresh repository over the pinned snapshot path, so the
// file stays the single authority between calls and core holds no globals.
fn open_repository() -> MealRepository<FileMealStore> {
    MealRepository::new(FileMealStore::new(resolve_snapshot_path()))
}

fn resolve_snapshot_path() -> PathBuf {
    SNAPSHOT_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("LAZYMEAL_DATA_DIR") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed).join(SNAPSHOT_FILE_NAME);
                }
            }
            std::env::temp_dir().join(SNAPSHOT_FILE_NAME)
        })
        .clone()
}

fn to_meal_item(meal: &Meal) -> MealItem {
    MealItem {
        name: meal.name().to_string(),
        image: meal.image().map(<[u8]>::to_vec),
        rating: meal.rating(),
    }
}
