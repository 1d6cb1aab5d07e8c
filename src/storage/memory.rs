use std::io;

use crate::{
    domain::Ledger,
    storage::{Persistence, SaveError, document},
};

/// Keeps the encoded document in memory.
///
/// Goes through the same encoding as [`JsonFile`](super::JsonFile), so a
/// ledger that survives a round trip here survives one on disk. Writes can be
/// switched off to exercise failure handling.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    document: Option<Vec<u8>>,
    saves: usize,
    reject_writes: bool,
}

impl MemoryStorage {
    /// Empty storage that accepts writes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-loaded with raw document bytes, which need not be valid.
    #[must_use]
    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: Some(document.into()),
            ..Self::default()
        }
    }

    /// The most recently saved document, if any.
    #[must_use]
    pub fn document(&self) -> Option<&[u8]> {
        self.document.as_deref()
    }

    /// How many saves have succeeded.
    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }

    /// Makes subsequent saves fail (or succeed again).
    pub const fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }
}

impl Persistence for MemoryStorage {
    fn load(&self) -> Ledger {
        self.document
            .as_deref()
            .and_then(|bytes| document::from_slice(bytes).ok())
            .unwrap_or_default()
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), SaveError> {
        if self.reject_writes {
            return Err(SaveError::Write {
                target: "memory".to_string(),
                source: io::Error::other("writes are disabled"),
            });
        }

        let mut buffer = Vec::new();
        document::to_writer(ledger, &mut buffer)?;
        self.document = Some(buffer);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_storage_loads_empty() {
        assert_eq!(MemoryStorage::new().load(), Ledger::default());
    }

    #[test]
    fn garbage_document_loads_empty() {
        let storage = MemoryStorage::with_document("]]]");
        assert_eq!(storage.load(), Ledger::default());
    }

    #[test]
    fn rejected_write_keeps_previous_document() {
        let mut storage = MemoryStorage::with_document("{}");
        storage.reject_writes(true);

        assert!(storage.save(&Ledger::default()).is_err());
        assert_eq!(storage.document(), Some(b"{}".as_slice()));
        assert_eq!(storage.saves(), 0);
    }
}
