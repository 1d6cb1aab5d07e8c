mod document;
pub mod json_file;
mod memory;
mod persistence;
pub mod store;

pub use json_file::JsonFile;
pub use memory::MemoryStorage;
pub use persistence::{Persistence, SaveError};
pub use store::{InventoryStore, StoreError};
