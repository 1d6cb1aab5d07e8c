use std::path::Path;

use bloodbank::{TransactionKind, TransactionRecord, domain::record::TIMESTAMP_FORMAT};
use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Parser)]
#[command(about = "Show the most recent transactions, newest first")]
pub struct Records {
    /// Number of records to show (defaults to the configured
    /// `recent_records`)
    #[arg(long, short = 'n')]
    limit: Option<usize>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Records {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (config, store) = super::open_store(root);
        let limit = self.limit.unwrap_or_else(|| config.recent_records());
        let recent = most_recent(store.records(), limit);

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recent)?),
            OutputFormat::Table => Self::output_table(&recent),
        }

        Ok(())
    }

    fn output_table(records: &[&TransactionRecord]) {
        if records.is_empty() {
            println!("No records available yet.");
            return;
        }

        println!("{}", "═".repeat(RULE_WIDTH).dim());
        for record in records {
            let kind = record.kind().to_string().to_uppercase();
            let kind = match record.kind() {
                TransactionKind::Donation => kind.success(),
                TransactionKind::Usage => kind.warning(),
            };
            println!("Type: {kind}");
            println!("Blood: {} | Units: {}", record.blood_type(), record.units());
            match record.kind() {
                TransactionKind::Donation => println!("Donor: {}", record.counterparty()),
                TransactionKind::Usage => println!("Recipient: {}", record.counterparty()),
            }
            println!("Time: {}", record.timestamp().format(TIMESTAMP_FORMAT));
            println!("{}", "─".repeat(RULE_WIDTH).dim());
        }
    }
}

/// The last `limit` records, newest first.
fn most_recent(records: &[TransactionRecord], limit: usize) -> Vec<&TransactionRecord> {
    records.iter().rev().take(limit).collect()
}
