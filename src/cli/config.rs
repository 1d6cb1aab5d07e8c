use std::path::Path;

use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
/// Show the effective configuration
///
/// Configuration is read from bloodbank.toml in the root directory. Missing
/// keys (or a missing file) fall back to the defaults.
///
/// Available configuration keys:
///   `data_file`            Inventory document (default: `blood_data.json`)
///   `low_stock_threshold`  Balances below this are LOW (default: 10)
///   `recent_records`       Records shown by `records` (default: 10)
pub struct Config {
    /// Print a single key instead of the full configuration
    key: Option<String>,
}

impl Config {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let path = root.join(bloodbank::Config::FILE_NAME);
        let config = bloodbank::Config::load_or_default(root);

        let Some(key) = self.key else {
            let source = if path.exists() {
                path.display().to_string()
            } else {
                "defaults".to_string()
            };
            println!("{}", format!("Configuration ({source})").info());
            println!("  data_file            {}", config.data_file().display());
            println!("  low_stock_threshold  {}", config.low_stock_threshold());
            println!("  recent_records       {}", config.recent_records());
            return Ok(());
        };

        match key.as_str() {
            "data_file" => println!("{}", config.data_file().display()),
            "low_stock_threshold" => println!("{}", config.low_stock_threshold()),
            "recent_records" => println!("{}", config.recent_records()),
            _ => anyhow::bail!(
                "Unknown configuration key '{key}'. Available keys: data_file, \
                 low_stock_threshold, recent_records"
            ),
        }

        Ok(())
    }
}
