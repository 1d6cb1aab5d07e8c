//! A persistent blood inventory
//!
//! The [`InventoryStore`] wraps the persistence-agnostic [`Ledger`] and writes
//! the complete state through a [`Persistence`] adapter after every change.

use std::collections::BTreeMap;

use tracing::instrument;

use crate::{
    domain::{
        BloodType, Clock, Confirmation, InventoryError, Ledger, SystemClock, TransactionRecord,
    },
    storage::{Persistence, SaveError},
};

/// Why a change to an [`InventoryStore`] was not applied.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The ledger refused the operation.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// The operation was valid but the result could not be saved. The
    /// in-memory state is unchanged.
    #[error("Failed to save inventory: {0}")]
    Persistence(#[from] SaveError),
}

/// The blood inventory and its transaction log, kept in sync with storage.
///
/// Each mutating operation is applied to a copy of the ledger, the copy is
/// saved, and only then does it replace the in-memory state. A failed save
/// therefore leaves memory as it was before the call and surfaces
/// [`StoreError::Persistence`].
#[derive(Debug)]
pub struct InventoryStore<P, C = SystemClock> {
    ledger: Ledger,
    persistence: P,
    clock: C,
}

impl<P: Persistence> InventoryStore<P> {
    /// Loads the ledger from `persistence`, stamping records with the system
    /// clock.
    ///
    /// A missing or unreadable document yields an empty store.
    #[must_use]
    pub fn open(persistence: P) -> Self {
        Self::with_clock(persistence, SystemClock)
    }
}

impl<P: Persistence, C: Clock> InventoryStore<P, C> {
    /// Loads the ledger from `persistence`, stamping records with `clock`.
    #[must_use]
    pub fn with_clock(persistence: P, clock: C) -> Self {
        let ledger = persistence.load();
        tracing::debug!(
            entries = ledger.inventory().len(),
            records = ledger.records().len(),
            "Loaded inventory"
        );
        Self {
            ledger,
            persistence,
            clock,
        }
    }

    /// Records a donation of `units` of `blood_type`.
    ///
    /// A blank `donor_name` is recorded as "Anonymous".
    ///
    /// # Errors
    ///
    /// See [`Ledger::add_blood`]. Also fails with
    /// [`StoreError::Persistence`] if the change cannot be saved.
    #[instrument(level = "debug", skip(self))]
    pub fn add_blood(
        &mut self,
        blood_type: &str,
        units: i64,
        donor_name: &str,
    ) -> Result<Confirmation, StoreError> {
        let now = self.clock.now();
        self.commit(|ledger| ledger.add_blood(blood_type, units, donor_name, now))
    }

    /// Records a usage of `units` of `blood_type`.
    ///
    /// A blank `recipient_name` is recorded as "Anonymous".
    ///
    /// # Errors
    ///
    /// See [`Ledger::remove_blood`]. Also fails with
    /// [`StoreError::Persistence`] if the change cannot be saved.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_blood(
        &mut self,
        blood_type: &str,
        units: i64,
        recipient_name: &str,
    ) -> Result<Confirmation, StoreError> {
        let now = self.clock.now();
        self.commit(|ledger| ledger.remove_blood(blood_type, units, recipient_name, now))
    }

    /// Drops `blood_type` from the inventory. Records are kept.
    ///
    /// # Errors
    ///
    /// See [`Ledger::delete_blood_type`]. Also fails with
    /// [`StoreError::Persistence`] if the change cannot be saved.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_blood_type(&mut self, blood_type: &str) -> Result<Confirmation, StoreError> {
        self.commit(|ledger| ledger.delete_blood_type(blood_type))
    }

    /// Current balance per stocked blood type.
    #[must_use]
    pub const fn inventory(&self) -> &BTreeMap<BloodType, u64> {
        self.ledger.inventory()
    }

    /// The transaction log, oldest first.
    #[must_use]
    pub fn records(&self) -> &[TransactionRecord] {
        self.ledger.records()
    }

    /// The full in-memory state.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The persistence adapter.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Mutable access to the persistence adapter.
    pub const fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    fn commit<F>(&mut self, operation: F) -> Result<Confirmation, StoreError>
    where
        F: FnOnce(&mut Ledger) -> Result<Confirmation, InventoryError>,
    {
        let mut staged = self.ledger.clone();
        let confirmation = operation(&mut staged)?;

        if let Err(e) = self.persistence.save(&staged) {
            tracing::warn!("Discarding change, save failed: {e}");
            return Err(e.into());
        }

        self.ledger = staged;
        tracing::info!("{confirmation}");
        Ok(confirmation)
    }
}
