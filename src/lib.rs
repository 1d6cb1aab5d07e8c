//! Blood Bank Inventory Management
//!
//! Units of blood are tracked per blood type alongside an append-only log of
//! donations and usages. The whole state lives in a single JSON document that
//! is rewritten after every change.

pub mod domain;
pub use domain::{
    BloodType, Config, Confirmation, InventoryError, Ledger, TransactionKind, TransactionRecord,
};

/// Persistence of the inventory ledger.
pub mod storage;
pub use storage::{InventoryStore, JsonFile, MemoryStorage, Persistence, SaveError, StoreError};
