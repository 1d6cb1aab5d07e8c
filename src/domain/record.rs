use std::{fmt, num::NonZeroU64};

use chrono::NaiveDateTime;
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::domain::BloodType;

/// Name recorded when a donor or recipient is not given.
pub const ANONYMOUS: &str = "Anonymous";

/// Format of record timestamps, both on disk and for display.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether a transaction added units to the inventory or drew them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Units received from a donor.
    Donation,
    /// Units issued to a recipient.
    Usage,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Donation => f.write_str("donation"),
            Self::Usage => f.write_str("usage"),
        }
    }
}

/// A single entry in the transaction log.
///
/// Records are immutable once created. They outlive the inventory entry they
/// refer to, so a record may name a blood type that is no longer stocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Serialized", into = "Serialized")]
pub struct TransactionRecord {
    blood_type: BloodType,
    units: NonZeroU64,
    counterparty: NonEmptyString,
    timestamp: NaiveDateTime,
    kind: TransactionKind,
}

impl TransactionRecord {
    /// Creates a donation record.
    ///
    /// A blank donor name is recorded as [`ANONYMOUS`].
    #[must_use]
    pub fn donation(
        blood_type: BloodType,
        units: NonZeroU64,
        donor_name: &str,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            blood_type,
            units,
            counterparty: counterparty(donor_name),
            timestamp,
            kind: TransactionKind::Donation,
        }
    }

    /// Creates a usage record.
    ///
    /// A blank recipient name is recorded as [`ANONYMOUS`].
    #[must_use]
    pub fn usage(
        blood_type: BloodType,
        units: NonZeroU64,
        recipient_name: &str,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            blood_type,
            units,
            counterparty: counterparty(recipient_name),
            timestamp,
            kind: TransactionKind::Usage,
        }
    }

    /// The blood type moved by this transaction.
    #[must_use]
    pub const fn blood_type(&self) -> BloodType {
        self.blood_type
    }

    /// The number of units moved.
    #[must_use]
    pub const fn units(&self) -> NonZeroU64 {
        self.units
    }

    /// The donor (for donations) or recipient (for usages).
    #[must_use]
    pub fn counterparty(&self) -> &str {
        self.counterparty.as_str()
    }

    /// When the transaction was recorded, to the second.
    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Donation or usage.
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.kind
    }
}

/// Normalises a name given for a new record.
fn counterparty(name: &str) -> NonEmptyString {
    stored_counterparty(name.trim().to_string())
}

/// Keeps a name read back from disk as written. Only an empty name, which a
/// record cannot hold, is replaced.
fn stored_counterparty(name: String) -> NonEmptyString {
    NonEmptyString::new(name).unwrap_or_else(|_| {
        NonEmptyString::new(ANONYMOUS.to_string()).expect("this must never fail")
    })
}

/// On-disk shape of a record.
///
/// The counterparty field is named after the transaction kind, so the
/// document carries either `donor_name` or `recipient_name`, never both.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Serialized {
    Donation {
        blood_type: BloodType,
        units: NonZeroU64,
        donor_name: String,
        #[serde(with = "timestamp")]
        timestamp: NaiveDateTime,
    },
    Usage {
        blood_type: BloodType,
        units: NonZeroU64,
        recipient_name: String,
        #[serde(with = "timestamp")]
        timestamp: NaiveDateTime,
    },
}

impl From<Serialized> for TransactionRecord {
    fn from(serialized: Serialized) -> Self {
        match serialized {
            Serialized::Donation {
                blood_type,
                units,
                donor_name,
                timestamp,
            } => Self {
                blood_type,
                units,
                counterparty: stored_counterparty(donor_name),
                timestamp,
                kind: TransactionKind::Donation,
            },
            Serialized::Usage {
                blood_type,
                units,
                recipient_name,
                timestamp,
            } => Self {
                blood_type,
                units,
                counterparty: stored_counterparty(recipient_name),
                timestamp,
                kind: TransactionKind::Usage,
            },
        }
    }
}

impl From<TransactionRecord> for Serialized {
    fn from(record: TransactionRecord) -> Self {
        let TransactionRecord {
            blood_type,
            units,
            counterparty,
            timestamp,
            kind,
        } = record;
        let name = counterparty.as_str().to_string();
        match kind {
            TransactionKind::Donation => Self::Donation {
                blood_type,
                units,
                donor_name: name,
                timestamp,
            },
            TransactionKind::Usage => Self::Usage {
                blood_type,
                units,
                recipient_name: name,
                timestamp,
            },
        }
    }
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
