use lazymeal_core::{DecodeError, FileMealStore, Meal, MealStore, StoreError, SNAPSHOT_FILE_NAME};
use std::fs;

#[test]
fn fresh_directory_loads_as_absent_not_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileMealStore::in_dir(dir.path());

    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_then_load_round_trips_through_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileMealStore::in_dir(dir.path());
    let meals = vec![
        Meal::new("Caprese Salad", None, 4).unwrap(),
        Meal::new("Stew", Some(vec![7, 8, 9]), 1).unwrap(),
    ];

    store.save(&meals).unwrap();
    assert_eq!(store.load().unwrap(), Some(meals));
}

#[test]
fn save_overwrites_the_prior_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileMealStore::in_dir(dir.path());

    store
        .save(&[Meal::new("First", None, 1).unwrap()])
        .unwrap();
    let replacement = vec![Meal::new("Second", None, 2).unwrap()];
    store.save(&replacement).unwrap();

    assert_eq!(store.load().unwrap(), Some(replacement));
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileMealStore::in_dir(dir.path().join("nested").join("data"));

    store.save(&[]).unwrap();
    assert_eq!(store.load().unwrap(), Some(Vec::new()));
}

#[test]
fn successful_save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileMealStore::in_dir(dir.path());

    store.save(&[Meal::new("Soup", None, 3).unwrap()]).unwrap();

    let entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec![SNAPSHOT_FILE_NAME.to_string()]);
}

#[test]
fn corrupt_snapshot_loads_as_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileMealStore::in_dir(dir.path());
    fs::write(store.path(), b"{ definitely not a snapshot").unwrap();

    match store.load().unwrap_err() {
        StoreError::Decode(DecodeError::Malformed(_)) => {}
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unreadable_snapshot_loads_as_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory at the snapshot path exists but cannot be read as a file.
    let store = FileMealStore::new(dir.path().join(SNAPSHOT_FILE_NAME));
    fs::create_dir(store.path()).unwrap();

    match store.load().unwrap_err() {
        StoreError::Io(_) => {}
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_save_leaves_the_previous_snapshot_intact() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileMealStore::in_dir(dir.path());
    let original = vec![Meal::new("Keeper", None, 5).unwrap()];
    store.save(&original).unwrap();

    // Block the temp sibling so the replacement write fails before the
    // rename can happen.
    let temp_path = store.path().with_extension("json.tmp");
    fs::create_dir(&temp_path).unwrap();

    let err = store
        .save(&[Meal::new("Loser", None, 0).unwrap()])
        .unwrap_err();
    assert!(matches!(err, StoreError::Io(_)), "{err:?}");

    fs::remove_dir(&temp_path).unwrap();
    assert_eq!(store.load().unwrap(), Some(original));
}
