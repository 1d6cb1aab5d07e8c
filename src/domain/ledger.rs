//! The in-memory inventory ledger
//!
//! A [`Ledger`] knows nothing about persistence. It holds the unit balance for
//! each stocked blood type and the append-only transaction log, and enforces
//! the validation rules for every mutation.

use std::{collections::BTreeMap, fmt, num::NonZeroU64};

use chrono::NaiveDateTime;

use crate::domain::{BloodType, InvalidBloodType, TransactionRecord};

/// Unit balances and the transaction log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    /// Balance per blood type. A missing key means the type is not stocked.
    inventory: BTreeMap<BloodType, u64>,

    /// Transactions in creation order, oldest first.
    records: Vec<TransactionRecord>,
}

impl Ledger {
    /// Reassembles a ledger from previously persisted parts.
    #[must_use]
    pub const fn from_parts(
        inventory: BTreeMap<BloodType, u64>,
        records: Vec<TransactionRecord>,
    ) -> Self {
        Self { inventory, records }
    }

    /// Current balance per stocked blood type.
    #[must_use]
    pub const fn inventory(&self) -> &BTreeMap<BloodType, u64> {
        &self.inventory
    }

    /// The transaction log, oldest first.
    #[must_use]
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// The balance of a blood type, or `None` if it is not stocked.
    #[must_use]
    pub fn units(&self, blood_type: BloodType) -> Option<u64> {
        self.inventory.get(&blood_type).copied()
    }

    /// Records a donation, creating the inventory entry if needed.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::InvalidBloodType`] if `blood_type` is not one of the
    ///   eight known types
    /// - [`InventoryError::InvalidUnits`] if `units` is not positive
    /// - [`InventoryError::Overflow`] if the balance cannot hold the new total
    pub fn add_blood(
        &mut self,
        blood_type: &str,
        units: i64,
        donor_name: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Confirmation, InventoryError> {
        let blood_type: BloodType = blood_type.parse()?;
        let units = positive(units)?;

        let balance = self.inventory.get(&blood_type).copied().unwrap_or(0);
        let total = balance
            .checked_add(units.get())
            .ok_or(InventoryError::Overflow(blood_type))?;

        self.inventory.insert(blood_type, total);
        self.records.push(TransactionRecord::donation(
            blood_type, units, donor_name, timestamp,
        ));
        Ok(Confirmation::Added { blood_type, units })
    }

    /// Records a usage, drawing units from an existing entry.
    ///
    /// A type whose balance has fallen to zero is still stocked and may be
    /// drawn from (and fail on insufficient stock). A type that was never
    /// added, or has been deleted, is unknown.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::UnknownBloodType`] if there is no entry for
    ///   `blood_type` (including strings that are not blood types at all)
    /// - [`InventoryError::InvalidUnits`] if `units` is not positive
    /// - [`InventoryError::InsufficientStock`] if `units` exceeds the balance
    pub fn remove_blood(
        &mut self,
        blood_type: &str,
        units: i64,
        recipient_name: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Confirmation, InventoryError> {
        let (blood_type, available) = self.entry(blood_type)?;
        let units = positive(units)?;

        let Some(remaining) = available.checked_sub(units.get()) else {
            return Err(InventoryError::InsufficientStock {
                blood_type,
                requested: units,
                available,
            });
        };

        self.inventory.insert(blood_type, remaining);
        self.records.push(TransactionRecord::usage(
            blood_type,
            units,
            recipient_name,
            timestamp,
        ));

        Ok(Confirmation::Removed { blood_type, units })
    }

    /// Removes a blood type from the inventory entirely.
    ///
    /// The transaction log is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::UnknownBloodType`] if there is no entry for
    /// `blood_type`.
    pub fn delete_blood_type(&mut self, blood_type: &str) -> Result<Confirmation, InventoryError> {
        let (blood_type, units) = self.entry(blood_type)?;
        self.inventory.remove(&blood_type);
        Ok(Confirmation::Deleted { blood_type, units })
    }

    fn entry(&self, blood_type: &str) -> Result<(BloodType, u64), InventoryError> {
        blood_type
            .parse::<BloodType>()
            .ok()
            .and_then(|parsed| self.units(parsed).map(|units| (parsed, units)))
            .ok_or_else(|| InventoryError::UnknownBloodType(blood_type.to_string()))
    }
}

fn positive(units: i64) -> Result<NonZeroU64, InventoryError> {
    u64::try_from(units)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or(InventoryError::InvalidUnits(units))
}

/// The outcome of a successful inventory operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// A donation was recorded.
    Added {
        /// The blood type donated.
        blood_type: BloodType,
        /// Units added to the balance.
        units: NonZeroU64,
    },
    /// A usage was recorded.
    Removed {
        /// The blood type issued.
        blood_type: BloodType,
        /// Units drawn from the balance.
        units: NonZeroU64,
    },
    /// A blood type was dropped from the inventory.
    Deleted {
        /// The blood type deleted.
        blood_type: BloodType,
        /// The balance the entry held when it was deleted.
        units: u64,
    },
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { blood_type, units } => {
                write!(f, "Successfully added {units} units of {blood_type}")
            }
            Self::Removed { blood_type, units } => {
                write!(f, "Successfully removed {units} units of {blood_type}")
            }
            Self::Deleted { blood_type, units } => {
                write!(f, "Deleted {blood_type} ({units} units removed)")
            }
        }
    }
}

/// Reasons an inventory operation can fail.
///
/// Every variant leaves the inventory and log exactly as they were.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// The blood type is not one of the eight known types.
    #[error(transparent)]
    InvalidBloodType(#[from] InvalidBloodType),

    /// The unit count was zero or negative.
    #[error("Units must be greater than 0 (got {0})")]
    InvalidUnits(i64),

    /// No inventory entry exists for the blood type.
    #[error("Blood type {0} is not in inventory")]
    UnknownBloodType(String),

    /// The request exceeds the available balance.
    #[error("Insufficient stock of {blood_type}. Available: {available} units")]
    InsufficientStock {
        /// The blood type requested.
        blood_type: BloodType,
        /// Units requested.
        requested: NonZeroU64,
        /// Units currently held.
        available: u64,
    },

    /// The new balance does not fit in the unit counter.
    #[error("Balance of {0} would overflow")]
    Overflow(BloodType),
}
