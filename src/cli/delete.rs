use std::path::Path;

use clap::Parser;
use dialoguer::Confirm;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Drop a blood type from the inventory")]
pub struct Delete {
    /// The blood type to delete
    #[arg(value_parser = super::blood_type_parser())]
    blood_type: String,

    /// Skip confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Delete {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let confirmed = self.yes
            || Confirm::new()
                .with_prompt(format!(
                    "Are you sure you want to delete {}?",
                    self.blood_type
                ))
                .default(false)
                .interact()?;

        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }

        let (_, mut store) = super::open_store(root);
        super::report(store.delete_blood_type(&self.blood_type));
        Ok(())
    }
}
