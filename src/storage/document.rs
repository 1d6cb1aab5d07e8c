//! The persisted inventory document
//!
//! ```json
//! {
//!     "blood_inventory": { "O-": 8 },
//!     "donation_records": [
//!         {
//!             "type": "donation",
//!             "blood_type": "O-",
//!             "units": 8,
//!             "donor_name": "Alice",
//!             "timestamp": "2024-03-01 12:00:05"
//!         }
//!     ]
//! }
//! ```

use std::{collections::BTreeMap, io::Write};

use serde::{Deserialize, Serialize};
use serde_json::{Value, ser::PrettyFormatter};

use crate::domain::{BloodType, Ledger, TransactionRecord};

#[derive(Debug, Serialize)]
struct DocumentRef<'a> {
    blood_inventory: &'a BTreeMap<BloodType, u64>,
    donation_records: &'a [TransactionRecord],
}

/// Entries are kept as raw values so that one bad entry does not take the
/// rest of the document down with it.
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    blood_inventory: BTreeMap<String, Value>,
    #[serde(default)]
    donation_records: Vec<Value>,
}

/// Writes `ledger` as a pretty-printed document with four-space indentation.
pub fn to_writer<W: Write>(ledger: &Ledger, writer: W) -> serde_json::Result<()> {
    let document = DocumentRef {
        blood_inventory: ledger.inventory(),
        donation_records: ledger.records(),
    };
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)
}

/// Parses a document into a ledger.
///
/// Missing top-level keys are treated as empty. Fails only if the bytes are
/// not JSON or the top level has the wrong shape; inventory entries and
/// records that do not parse are skipped with a warning.
pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Ledger> {
    let Document {
        blood_inventory,
        donation_records,
    } = serde_json::from_slice(bytes)?;

    let inventory = blood_inventory
        .into_iter()
        .filter_map(|(blood_type, units)| {
            let entry = blood_type.parse::<BloodType>().ok().zip(units.as_u64());
            if entry.is_none() {
                tracing::warn!(%blood_type, %units, "Skipping invalid inventory entry");
            }
            entry
        })
        .collect();

    let records = donation_records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            serde_json::from_value::<TransactionRecord>(record)
                .inspect_err(|e| tracing::warn!(index, "Skipping invalid transaction record: {e}"))
                .ok()
        })
        .collect();

    Ok(Ledger::from_parts(inventory, records))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample() -> Ledger {
        let at = NaiveDate::from_ymd_opt(2024, 6, 14)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let mut ledger = Ledger::default();
        ledger.add_blood("O-", 5, "Alice", at).unwrap();
        ledger.add_blood("A+", 12, "", at).unwrap();
        ledger.remove_blood("O-", 2, "Carl", at).unwrap();
        ledger.add_blood("B-", 1, "Bob", at).unwrap();
        ledger.delete_blood_type("B-").unwrap();
        ledger
    }

    fn encode(ledger: &Ledger) -> Vec<u8> {
        let mut buffer = Vec::new();
        to_writer(ledger, &mut buffer).unwrap();
        buffer
    }

    #[test]
    fn round_trip_preserves_inventory_and_record_order() {
        let ledger = sample();
        let decoded = from_slice(&encode(&ledger)).unwrap();
        assert_eq!(decoded, ledger);
    }

    #[test]
    fn uses_original_key_names() {
        let value: serde_json::Value = serde_json::from_slice(&encode(&sample())).unwrap();
        assert_eq!(value["blood_inventory"]["O-"], 3);
        assert_eq!(value["blood_inventory"]["A+"], 12);
        assert!(value["blood_inventory"].get("B-").is_none());

        let records = value["donation_records"].as_array().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[2]["type"], "usage");
        assert_eq!(records[2]["recipient_name"], "Carl");
        assert_eq!(records[3]["blood_type"], "B-");
    }

    #[test]
    fn indents_with_four_spaces() {
        let text = String::from_utf8(encode(&sample())).unwrap();
        assert!(text.starts_with("{\n    \"blood_inventory\": {\n        \""));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let ledger = from_slice(br#"{ "blood_inventory": { "AB+": 2 } }"#).unwrap();
        assert_eq!(ledger.units(BloodType::AbPositive), Some(2));
        assert!(ledger.records().is_empty());

        assert_eq!(from_slice(b"{}").unwrap(), Ledger::default());
    }

    #[test]
    fn rejects_documents_with_the_wrong_shape() {
        assert!(from_slice(b"not json").is_err());
        assert!(from_slice(b"[]").is_err());
        assert!(from_slice(br#"{ "blood_inventory": [] }"#).is_err());
        assert!(from_slice(br#"{ "donation_records": {} }"#).is_err());
    }

    #[test]
    fn skips_invalid_inventory_entries() {
        let ledger =
            from_slice(br#"{ "blood_inventory": { "C+": 1, "A+": -1, "B-": 2.5, "O+": 7 } }"#)
                .unwrap();
        assert_eq!(ledger.inventory(), &BTreeMap::from([(BloodType::OPositive, 7)]));
    }

    #[test]
    fn skips_invalid_records_and_keeps_their_neighbours() {
        let ledger = from_slice(
            br#"{
                "donation_records": [
                    { "type": "donation", "blood_type": "O+", "units": 3,
                      "donor_name": "Alice", "timestamp": "2024-11-05 10:42:17" },
                    { "type": "donation", "blood_type": "A-", "units": 0,
                      "donor_name": "Bob", "timestamp": "2024-11-05 10:43:00" },
                    { "type": "transfer", "blood_type": "A-", "units": 1,
                      "donor_name": "Bob", "timestamp": "2024-11-05 10:44:00" },
                    { "type": "usage", "blood_type": "O+", "units": 1,
                      "recipient_name": "Ward 4", "timestamp": "2024-11-06 08:00:00" }
                ]
            }"#,
        )
        .unwrap();

        let names: Vec<_> = ledger
            .records()
            .iter()
            .map(TransactionRecord::counterparty)
            .collect();
        assert_eq!(names, ["Alice", "Ward 4"]);
    }
}
