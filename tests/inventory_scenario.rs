//! End-to-end behaviour of the inventory against a file on disk.

#![allow(missing_docs)]

use std::{collections::BTreeMap, fs};

use bloodbank::{
    BloodType, Confirmation, InventoryError, InventoryStore, JsonFile, Persistence, StoreError,
    TransactionKind, TransactionRecord,
};
use tempfile::TempDir;

fn setup() -> (TempDir, InventoryStore<JsonFile>) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let store = InventoryStore::open(JsonFile::new(tmp.path().join("blood_data.json")));
    (tmp, store)
}

#[test]
fn donations_and_usages_persist_across_sessions() {
    let (tmp, mut store) = setup();
    let path = tmp.path().join("blood_data.json");
    assert!(store.inventory().is_empty());
    assert!(store.records().is_empty());

    let confirmation = store.add_blood("O-", 5, "Alice").unwrap();
    assert_eq!(confirmation.to_string(), "Successfully added 5 units of O-");
    assert_eq!(store.inventory(), &BTreeMap::from([(BloodType::ONegative, 5)]));
    assert_eq!(store.records().len(), 1);

    store.add_blood("O-", 3, "Bob").unwrap();
    assert_eq!(store.inventory(), &BTreeMap::from([(BloodType::ONegative, 8)]));
    assert_eq!(store.records().len(), 2);

    let on_disk = fs::read_to_string(&path).unwrap();
    let error = store.remove_blood("O-", 10, "Carl").unwrap_err();
    assert!(matches!(
        error,
        StoreError::Inventory(InventoryError::InsufficientStock {
            blood_type: BloodType::ONegative,
            available: 8,
            ..
        })
    ));
    assert_eq!(store.inventory(), &BTreeMap::from([(BloodType::ONegative, 8)]));
    assert_eq!(store.records().len(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), on_disk);

    store.remove_blood("O-", 8, "Carl").unwrap();
    assert_eq!(store.inventory(), &BTreeMap::from([(BloodType::ONegative, 0)]));
    assert_eq!(store.records().len(), 3);
    let expected = store.ledger().clone();
    drop(store);

    let reopened = InventoryStore::open(JsonFile::new(&path));
    assert_eq!(reopened.ledger(), &expected);

    let kinds: Vec<_> = reopened
        .records()
        .iter()
        .map(TransactionRecord::kind)
        .collect();
    assert_eq!(
        kinds,
        [
            TransactionKind::Donation,
            TransactionKind::Donation,
            TransactionKind::Usage
        ]
    );
    let names: Vec<_> = reopened
        .records()
        .iter()
        .map(TransactionRecord::counterparty)
        .collect();
    assert_eq!(names, ["Alice", "Bob", "Carl"]);
}

#[test]
fn deleting_a_type_keeps_its_history_on_disk() {
    let (tmp, mut store) = setup();
    store.add_blood("A+", 4, "").unwrap();
    store.add_blood("B+", 2, "").unwrap();

    let confirmation = store.delete_blood_type("A+").unwrap();
    assert_eq!(
        confirmation,
        Confirmation::Deleted {
            blood_type: BloodType::APositive,
            units: 4
        }
    );

    let reloaded = JsonFile::new(tmp.path().join("blood_data.json")).load();
    assert_eq!(reloaded.units(BloodType::APositive), None);
    assert_eq!(reloaded.units(BloodType::BPositive), Some(2));
    assert_eq!(reloaded.records().len(), 2);
    assert_eq!(reloaded.records()[0].blood_type(), BloodType::APositive);
}

#[test]
fn reads_documents_in_the_original_format() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("blood_data.json");
    fs::write(
        &path,
        r#"{
    "blood_inventory": {
        "O+": 12,
        "AB-": 0
    },
    "donation_records": [
        {
            "blood_type": "O+",
            "units": 12,
            "donor_name": "Anonymous",
            "timestamp": "2024-11-05 10:42:17",
            "type": "donation"
        },
        {
            "blood_type": "AB-",
            "units": 1,
            "donor_name": "Rui",
            "timestamp": "2024-11-05 10:43:00",
            "type": "donation"
        },
        {
            "blood_type": "AB-",
            "units": 1,
            "recipient_name": "Ward 4",
            "timestamp": "2024-11-06 08:00:00",
            "type": "usage"
        }
    ]
}"#,
    )
    .unwrap();

    let mut store = InventoryStore::open(JsonFile::new(&path));
    assert_eq!(store.inventory()[&BloodType::OPositive], 12);
    assert_eq!(store.inventory()[&BloodType::AbNegative], 0);
    assert_eq!(store.records()[2].counterparty(), "Ward 4");

    let error = store.remove_blood("AB-", 1, "").unwrap_err();
    assert!(matches!(
        error,
        StoreError::Inventory(InventoryError::InsufficientStock { available: 0, .. })
    ));
    store.remove_blood("O+", 2, "").unwrap();
    assert_eq!(store.records().len(), 4);
}
