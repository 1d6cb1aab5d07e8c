//! Domain models for blood inventory management.
//!
//! This module contains the core domain types: blood types, transaction
//! records, the in-memory ledger and configuration.

/// Blood type enumeration and parsing.
pub mod blood_type;
pub use blood_type::{BloodType, InvalidBloodType};

mod clock;
pub use clock::{Clock, SystemClock};

mod config;
pub use config::{Config, ConfigError};

pub mod ledger;
pub use ledger::{Confirmation, InventoryError, Ledger};

/// Transaction records and their on-disk shape.
pub mod record;
pub use record::{TransactionKind, TransactionRecord};
