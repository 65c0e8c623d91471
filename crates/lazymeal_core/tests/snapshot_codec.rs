use lazymeal_core::codec::{decode, encode};
use lazymeal_core::{DecodeError, Meal, MealValidationError, SNAPSHOT_VERSION};
use serde_json::json;

#[test]
fn empty_collection_round_trips() {
    let bytes = encode(&[]).unwrap();
    assert_eq!(decode(&bytes).unwrap(), Vec::new());
}

#[test]
fn mixed_collection_round_trips_in_order() {
    let meals = vec![
        Meal::new("Caprese Salad", None, 4).unwrap(),
        Meal::new("Chicken and Potatoes", Some(vec![0xDE, 0xAD, 0xBE, 0xEF]), 5).unwrap(),
        Meal::new("Pasta with Meatballs", Some(vec![0x00]), 3).unwrap(),
    ];

    let decoded = decode(&encode(&meals).unwrap()).unwrap();
    assert_eq!(decoded, meals);
    assert_eq!(decoded[0].image(), None);
    assert_eq!(decoded[1].image(), Some(&[0xDE, 0xAD, 0xBE, 0xEF][..]));
}

#[test]
fn truncated_bytes_are_malformed() {
    let mut bytes = encode(&[Meal::new("Soup", None, 2).unwrap()]).unwrap();
    bytes.truncate(bytes.len() / 2);

    let err = decode(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)), "{err:?}");
}

#[test]
fn wrong_top_level_shape_is_malformed() {
    // A bare record array was never a valid snapshot document.
    let bytes = serde_json::to_vec(&json!([
        { "name": "Soup", "image_b64": null, "rating": 2 }
    ]))
    .unwrap();

    let err = decode(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)), "{err:?}");
}

#[test]
fn missing_required_field_is_malformed() {
    let bytes = serde_json::to_vec(&json!({
        "version": SNAPSHOT_VERSION,
        "meals": [ { "name": "Soup", "image_b64": null } ]
    }))
    .unwrap();

    let err = decode(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)), "{err:?}");
}

#[test]
fn unknown_extra_fields_are_ignored() {
    let bytes = serde_json::to_vec(&json!({
        "version": SNAPSHOT_VERSION,
        "generator": "some future build",
        "meals": [
            { "name": "Soup", "image_b64": null, "rating": 2, "starred": true }
        ]
    }))
    .unwrap();

    let meals = decode(&bytes).unwrap();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].name(), "Soup");
}

#[test]
fn unrecognized_version_is_rejected() {
    let bytes = serde_json::to_vec(&json!({ "version": 2, "meals": [] })).unwrap();

    match decode(&bytes).unwrap_err() {
        DecodeError::UnsupportedVersion { found, supported } => {
            assert_eq!(found, 2);
            assert_eq!(supported, SNAPSHOT_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_base64_image_is_rejected_with_its_index() {
    let bytes = serde_json::to_vec(&json!({
        "version": SNAPSHOT_VERSION,
        "meals": [
            { "name": "Soup", "image_b64": null, "rating": 2 },
            { "name": "Stew", "image_b64": "not base64!!", "rating": 4 }
        ]
    }))
    .unwrap();

    match decode(&bytes).unwrap_err() {
        DecodeError::InvalidImage { index, .. } => assert_eq!(index, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn field_violating_record_fails_the_whole_snapshot() {
    let bytes = serde_json::to_vec(&json!({
        "version": SNAPSHOT_VERSION,
        "meals": [
            { "name": "Soup", "image_b64": null, "rating": 2 },
            { "name": "", "image_b64": null, "rating": 3 }
        ]
    }))
    .unwrap();

    match decode(&bytes).unwrap_err() {
        DecodeError::InvalidRecord { index, source } => {
            assert_eq!(index, 1);
            assert_eq!(source, MealValidationError::EmptyName);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn tampered_rating_cannot_produce_a_meal() {
    let bytes = serde_json::to_vec(&json!({
        "version": SNAPSHOT_VERSION,
        "meals": [ { "name": "Soup", "image_b64": null, "rating": 11 } ]
    }))
    .unwrap();

    match decode(&bytes).unwrap_err() {
        DecodeError::InvalidRecord { index, source } => {
            assert_eq!(index, 0);
            assert_eq!(source, MealValidationError::RatingOutOfRange { rating: 11 });
        }
        other => panic!("unexpected error: {other}"),
    }
}
