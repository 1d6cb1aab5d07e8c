use std::{collections::BTreeMap, path::Path};

use bloodbank::BloodType;
use clap::Parser;
use serde::Serialize;
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, Parser, Default)]
#[command(about = "Show units on hand for every blood type")]
pub struct Inventory {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
enum Status {
    Low,
    Ok,
}

#[derive(Debug, Serialize)]
struct Row {
    blood_type: BloodType,
    units: u64,
    status: Status,
}

impl Inventory {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (config, store) = super::open_store(root);

        let rows = rows(store.inventory(), |units| config.is_low(units));

        match self.output {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "inventory": rows,
                    "low_stock_threshold": config.low_stock_threshold(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => Self::output_table(&rows),
        }

        Ok(())
    }

    fn output_table(rows: &[Row]) {
        let narrow = is_narrow();

        if narrow {
            println!("{}", "Type   Units".dim());
        } else {
            println!("{}", "Blood Type   Units   Status".dim());
        }

        for row in rows {
            let status = match row.status {
                Status::Low => "LOW".error(),
                Status::Ok => "OK".success(),
            };
            if narrow {
                let units = format!("{:>5}", row.units);
                let units = match row.status {
                    Status::Low => units.error(),
                    Status::Ok => units,
                };
                println!("{:<6} {units}", row.blood_type.as_str());
            } else {
                println!("{:<12} {:>5}   {status}", row.blood_type.as_str(), row.units);
            }
        }
    }
}

/// One row per blood type, in display order. Types without an entry show as
/// zero units.
fn rows(inventory: &BTreeMap<BloodType, u64>, is_low: impl Fn(u64) -> bool) -> Vec<Row> {
    BloodType::ALL
        .into_iter()
        .map(|blood_type| {
            let units = inventory.get(&blood_type).copied().unwrap_or(0);
            let status = if is_low(units) { Status::Low } else { Status::Ok };
            Row {
                blood_type,
                units,
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_type_with_zero_for_missing() {
        let inventory = BTreeMap::from([(BloodType::OPositive, 25), (BloodType::ANegative, 3)]);

        let rows = rows(&inventory, |units| units < 10);

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].blood_type, BloodType::APositive);
        assert_eq!(rows[0].units, 0);
        assert_eq!(rows[0].status, Status::Low);
        assert_eq!(rows[1].units, 3);
        assert_eq!(rows[6].blood_type, BloodType::OPositive);
        assert_eq!(rows[6].status, Status::Ok);
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Status::Low).unwrap(), "\"LOW\"");
        assert_eq!(serde_json::to_string(&Status::Ok).unwrap(), "\"OK\"");
    }
}
