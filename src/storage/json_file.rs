//! A JSON document on the local filesystem.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{
    domain::Ledger,
    storage::{Persistence, SaveError, document},
};

/// Persists the ledger as a single JSON file.
///
/// Every save rewrites the file in full. There is no locking: if two
/// processes share a file, the last save wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Creates an adapter for the file at `path`. The file need not exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFile {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Ledger {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No data file yet, starting with an empty inventory");
                return Ledger::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read data file, starting empty: {e}");
                return Ledger::default();
            }
        };

        document::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!("Data file is not a valid inventory document, starting empty: {e}");
            Ledger::default()
        })
    }

    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    fn save(&mut self, ledger: &Ledger) -> Result<(), SaveError> {
        let write_error = |source: io::Error| SaveError::Write {
            target: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let file = File::create(&self.path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        document::to_writer(ledger, &mut writer)?;
        writer.write_all(b"\n").map_err(write_error)?;
        writer.flush().map_err(write_error)?;

        tracing::debug!(
            entries = ledger.inventory().len(),
            records = ledger.records().len(),
            "Saved inventory"
        );
        Ok(())
    }
}
