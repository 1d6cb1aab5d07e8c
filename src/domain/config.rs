use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Configuration for the blood inventory.
///
/// Read from [`Config::FILE_NAME`] in the working root. Every setting has a
/// default, so a missing file is never an error for callers that use
/// [`Config::load_or_default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Path of the inventory document.
    ///
    /// Relative paths are resolved against the working root.
    data_file: PathBuf,

    /// Balances strictly below this are reported as low stock.
    low_stock_threshold: u64,

    /// How many of the most recent records to show by default.
    recent_records: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            low_stock_threshold: default_low_stock_threshold(),
            recent_records: default_recent_records(),
        }
    }
}

impl Config {
    /// Name of the configuration file within the working root.
    pub const FILE_NAME: &'static str = "bloodbank.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration from `root`, falling back to the defaults if
    /// the file is missing or cannot be parsed.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join(Self::FILE_NAME);
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config from {}: {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// The configured data file, as written.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// The data file resolved against `root`.
    #[must_use]
    pub fn data_path(&self, root: &Path) -> PathBuf {
        root.join(&self.data_file)
    }

    /// Balances strictly below this are low stock.
    #[must_use]
    pub const fn low_stock_threshold(&self) -> u64 {
        self.low_stock_threshold
    }

    /// Default number of records to display.
    #[must_use]
    pub const fn recent_records(&self) -> usize {
        self.recent_records
    }

    /// Whether a balance counts as low stock.
    #[must_use]
    pub const fn is_low(&self, units: u64) -> bool {
        units < self.low_stock_threshold
    }
}

/// Errors reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] io::Error),

    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] io::Error),
}

fn default_data_file() -> PathBuf {
    PathBuf::from("blood_data.json")
}

const fn default_low_stock_threshold() -> u64 {
    10
}

const fn default_recent_records() -> usize {
    10
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_file")]
        data_file: PathBuf,

        #[serde(default = "default_low_stock_threshold")]
        low_stock_threshold: u64,

        #[serde(default = "default_recent_records")]
        recent_records: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                data_file,
                low_stock_threshold,
                recent_records,
            } => Self {
                data_file,
                low_stock_threshold,
                recent_records,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            data_file: config.data_file,
            low_stock_threshold: config.low_stock_threshold,
            recent_records: config.recent_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"_version = "1"
data_file = "stock/bank.json"
low_stock_threshold = 4
recent_records = 25
"#,
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.data_file(), Path::new("stock/bank.json"));
        assert_eq!(config.low_stock_threshold(), 4);
        assert_eq!(config.recent_records(), 25);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read(_)));
        assert!(error.to_string().starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nlow_stock_threshold = \"ten\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn load_or_default_falls_back_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_or_default(tmp.path()), Config::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);
        let config: Config =
            toml::from_str("_version = \"1\"\nlow_stock_threshold = 2\n").unwrap();

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
        assert_eq!(Config::load_or_default(tmp.path()), config);
    }

    #[test]
    fn data_path_is_relative_to_root() {
        let config = Config::default();
        assert_eq!(
            config.data_path(Path::new("/srv/bank")),
            PathBuf::from("/srv/bank/blood_data.json")
        );
    }

    #[test]
    fn low_stock_is_strictly_below_threshold() {
        let config = Config::default();
        assert!(config.is_low(0));
        assert!(config.is_low(9));
        assert!(!config.is_low(10));
    }
}
