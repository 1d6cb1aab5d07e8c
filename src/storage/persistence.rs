use std::io;

use crate::domain::Ledger;

/// A backing store for the whole ledger.
///
/// Loading is best-effort: an adapter that cannot produce a ledger returns an
/// empty one. Saving always writes the complete state, replacing whatever was
/// there before.
pub trait Persistence {
    /// Reads the persisted ledger, or an empty ledger if there is none or it
    /// cannot be parsed.
    fn load(&self) -> Ledger;

    /// Overwrites the persisted state with `ledger`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be encoded or written.
    fn save(&mut self, ledger: &Ledger) -> Result<(), SaveError>;
}

/// Failure to persist the ledger.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The ledger could not be encoded as a document.
    #[error("failed to encode inventory document: {0}")]
    Encode(#[from] serde_json::Error),

    /// The document could not be written to its target.
    #[error("failed to write {target}: {source}")]
    Write {
        /// Where the document was being written.
        target: String,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
