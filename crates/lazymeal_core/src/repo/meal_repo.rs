//! Meal repository: the authoritative ordered collection.
//!
//! # Responsibility
//! - Own the in-memory meal list and expose the only mutation surface.
//! - Keep the snapshot store synchronized after every mutation.
//!
//! # Invariants
//! - Mutations apply in call order; each one persists the full list before
//!   returning, and a failed persist never rolls back the in-memory change.
//! - `replace`/`remove_at` reject out-of-bounds indices without touching
//!   the store.
//! - Initialization always yields a usable list: restored, seeded fresh, or
//!   seeded after a load fault, with the fault kept observable.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::meal::Meal;
use crate::store::{MealStore, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised by repository mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Caller referenced a position outside the current list bounds.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "meal index {index} is out of range for list of {len}")
            }
        }
    }
}

impl Error for RepoError {}

/// Where the collection came from at initialization.
#[derive(Debug)]
pub enum InitSource {
    /// A prior snapshot was loaded.
    Restored,
    /// No snapshot existed; seed data was adopted (expected first run).
    Seeded,
    /// Loading failed; seed data was adopted for availability, but the
    /// fault is a real one and callers may want to surface it.
    SeededAfterError(StoreError),
}

/// Outcome of [`MealRepository::initialize`].
#[derive(Debug)]
pub struct InitReport {
    pub source: InitSource,
    pub count: usize,
}

/// Whether a mutation reached durable storage.
#[derive(Debug)]
pub enum PersistOutcome {
    Saved,
    Failed(StoreError),
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Receipt returned by every successful mutation.
///
/// The in-memory change always took effect; `persistence` tells the caller
/// whether it also reached the snapshot file. Callers that need durability
/// must check it.
#[derive(Debug)]
pub struct MutationReceipt {
    /// Position the mutation acted on (for `append`, the new record's index).
    pub index: usize,
    pub persistence: PersistOutcome,
}

/// Default seed records adopted when no snapshot exists yet.
pub fn sample_meals() -> Vec<Meal> {
    // Static literals, validated at startup; a failure here is a programmer
    // error, not a runtime condition.
    vec![
        Meal::new("Caprese Salad", None, 4).expect("sample meal is valid"),
        Meal::new("Chicken and Potatoes", None, 5).expect("sample meal is valid"),
        Meal::new("Pasta with Meatballs", None, 3).expect("sample meal is valid"),
    ]
}

/// Repository owning the ordered meal collection over a snapshot store.
pub struct MealRepository<S: MealStore> {
    store: S,
    meals: Vec<Meal>,
}

impl<S: MealStore> MealRepository<S> {
    /// Creates an empty repository over `store`. Call
    /// [`initialize`](Self::initialize) before serving reads.
    pub fn new(store: S) -> Self {
        Self {
            store,
            meals: Vec::new(),
        }
    }

    /// Initializes the collection from the store, falling back to
    /// [`sample_meals`] when nothing can be loaded.
    pub fn initialize(&mut self) -> InitReport {
        self.initialize_with(sample_meals)
    }

    /// Initializes the collection from the store, falling back to the given
    /// seed provider when nothing can be loaded.
    ///
    /// Never fails: a load fault degrades to seeding, reported as
    /// [`InitSource::SeededAfterError`] so callers can distinguish a fault
    /// from a fresh install.
    pub fn initialize_with(&mut self, seed: impl FnOnce() -> Vec<Meal>) -> InitReport {
        let source = match self.store.load() {
            Ok(Some(meals)) => {
                self.meals = meals;
                InitSource::Restored
            }
            Ok(None) => {
                self.meals = seed();
                InitSource::Seeded
            }
            Err(err) => {
                error!(
                    "event=meal_init module=repo status=error error_code=load_failed error={err}"
                );
                self.meals = seed();
                InitSource::SeededAfterError(err)
            }
        };

        info!(
            "event=meal_init module=repo status=ok source={} count={}",
            init_source_label(&source),
            self.meals.len()
        );

        InitReport {
            source,
            count: self.meals.len(),
        }
    }

    /// Appends `meal` at the end of the list and persists.
    pub fn append(&mut self, meal: Meal) -> MutationReceipt {
        self.meals.push(meal);
        let index = self.meals.len() - 1;
        info!("event=meal_append module=repo status=ok index={index}");

        MutationReceipt {
            index,
            persistence: self.persist(),
        }
    }

    /// Substitutes the record at `index` and persists.
    ///
    /// Out-of-bounds indices fail without auto-appending and without
    /// touching the store.
    pub fn replace(&mut self, index: usize, meal: Meal) -> RepoResult<MutationReceipt> {
        let slot = self.slot(index)?;
        *slot = meal;
        info!("event=meal_replace module=repo status=ok index={index}");

        Ok(MutationReceipt {
            index,
            persistence: self.persist(),
        })
    }

    /// Removes the record at `index`, shifting later records down, and
    /// persists.
    pub fn remove_at(&mut self, index: usize) -> RepoResult<MutationReceipt> {
        self.slot(index)?;
        self.meals.remove(index);
        info!(
            "event=meal_remove module=repo status=ok index={index} count={}",
            self.meals.len()
        );

        Ok(MutationReceipt {
            index,
            persistence: self.persist(),
        })
    }

    /// Number of meals in the collection.
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Meal at `index`, when within bounds.
    pub fn get(&self, index: usize) -> Option<&Meal> {
        self.meals.get(index)
    }

    /// The full ordered collection.
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    fn slot(&mut self, index: usize) -> RepoResult<&mut Meal> {
        let len = self.meals.len();
        self.meals
            .get_mut(index)
            .ok_or(RepoError::IndexOutOfRange { index, len })
    }

    // Best-effort durability: the in-memory list stays authoritative even
    // when the snapshot write fails, and the receipt carries the fault.
    fn persist(&self) -> PersistOutcome {
        match self.store.save(&self.meals) {
            Ok(()) => PersistOutcome::Saved,
            Err(err) => {
                warn!(
                    "event=meal_persist module=repo status=warn count={} error={err}",
                    self.meals.len()
                );
                PersistOutcome::Failed(err)
            }
        }
    }
}

fn init_source_label(source: &InitSource) -> &'static str {
    match source {
        InitSource::Restored => "restored",
        InitSource::Seeded => "seeded",
        InitSource::SeededAfterError(_) => "seeded_after_error",
    }
}

#[cfg(test)]
mod tests {
    use super::{sample_meals, MealRepository, RepoError};
    use crate::model::meal::Meal;
    use crate::store::{MealStore, StoreResult};
    use std::cell::RefCell;

    /// In-memory store double; the filesystem-backed paths are covered by
    /// the integration suites.
    struct MemoryStore {
        saved: RefCell<Option<Vec<Meal>>>,
    }

    impl MemoryStore {
        fn empty() -> Self {
            Self {
                saved: RefCell::new(None),
            }
        }
    }

    impl MealStore for MemoryStore {
        fn load(&self) -> StoreResult<Option<Vec<Meal>>> {
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, meals: &[Meal]) -> StoreResult<()> {
            *self.saved.borrow_mut() = Some(meals.to_vec());
            Ok(())
        }
    }

    #[test]
    fn sample_meals_are_three_valid_records() {
        let seeds = sample_meals();
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].name(), "Caprese Salad");
        assert!(seeds.iter().all(|meal| meal.image().is_none()));
    }

    #[test]
    fn append_reports_new_index_and_persists() {
        let mut repo = MealRepository::new(MemoryStore::empty());
        repo.initialize_with(Vec::new);

        let receipt = repo.append(Meal::new("Ramen", None, 5).unwrap());
        assert_eq!(receipt.index, 0);
        assert!(receipt.persistence.is_saved());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn replace_out_of_bounds_is_rejected_without_save() {
        let mut repo = MealRepository::new(MemoryStore::empty());
        repo.initialize_with(Vec::new);

        let err = repo
            .replace(3, Meal::new("Ghost", None, 1).unwrap())
            .unwrap_err();
        assert_eq!(err, RepoError::IndexOutOfRange { index: 3, len: 0 });
    }
}
