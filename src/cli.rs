use std::{
    path::{Path, PathBuf},
    process,
};

mod add;
mod config;
mod delete;
mod inventory;
mod records;
mod remove;
mod terminal;

use add::Add;
use anyhow::Context;
use bloodbank::{Confirmation, InventoryStore, JsonFile, StoreError};
use clap::{
    ArgAction,
    builder::{StringValueParser, TypedValueParser},
};
use config::Config;
use delete::Delete;
use inventory::Inventory;
use records::Records;
use remove::Remove;
use terminal::Colorize;
use tracing::instrument;

/// Normalize a blood type typed at the command line.
///
/// Accepts lowercase and the Unicode minus sign (`o−` becomes `O-`). Whether
/// the result is a known blood type is for the inventory to decide.
fn normalize_blood_type(s: &str) -> String {
    s.trim().to_uppercase().replace('\u{2212}', "-")
}

/// Argument parser applying [`normalize_blood_type`].
fn blood_type_parser() -> impl TypedValueParser<Value = String> {
    StringValueParser::new().map(|s| normalize_blood_type(&s))
}

/// Load the configuration and open the inventory under `root`.
fn open_store(root: &Path) -> (bloodbank::Config, InventoryStore<JsonFile>) {
    let config = bloodbank::Config::load_or_default(root);
    let store = InventoryStore::open(JsonFile::new(config.data_path(root)));
    (config, store)
}

/// Print the outcome of an inventory operation, exiting non-zero on failure.
fn report(result: Result<Confirmation, StoreError>) {
    match result {
        Ok(confirmation) => println!("{}", format!("✅ {confirmation}").success()),
        Err(error) => {
            eprintln!("{}", terminal::stderr_error(&format!("❌ {error}")));
            process::exit(1);
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory holding the configuration and data file
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Inventory(Inventory::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show units on hand for every blood type (default)
    Inventory(Inventory),

    /// Record a donation
    Add(Add),

    /// Record units issued to a recipient
    Remove(Remove),

    /// Drop a blood type from the inventory
    ///
    /// The transaction history for the type is kept.
    Delete(Delete),

    /// Show the most recent transactions
    Records(Records),

    /// Write a default configuration file
    Init(Init),

    /// Show the effective configuration
    Config(Config),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Inventory(command) => command.run(root)?,
            Self::Add(command) => command.run(root),
            Self::Remove(command) => command.run(root),
            Self::Delete(command) => command.run(root)?,
            Self::Records(command) => command.run(root)?,
            Self::Init(command) => command.run(root)?,
            Self::Config(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument(skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let config_path = root.join(bloodbank::Config::FILE_NAME);
        if config_path.exists() {
            anyhow::bail!(
                "Already initialized (found existing {})",
                config_path.display()
            );
        }

        std::fs::create_dir_all(root)
            .with_context(|| format!("Failed to create {}", root.display()))?;

        let config = bloodbank::Config::default();
        config.save(&config_path)?;

        println!("Initialized blood bank in {}", root.display());
        println!("  Created: {}", bloodbank::Config::FILE_NAME);
        println!(
            "  Data file: {} (created on first change)",
            config.data_file().display()
        );
        println!();
        println!("Next steps:");
        println!("  bloodbank add O- 5 --donor \"Donor Name\"");

        Ok(())
    }
}
