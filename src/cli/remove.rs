use std::path::Path;

use clap::Parser;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Record units issued to a recipient")]
pub struct Remove {
    /// The blood type issued
    #[arg(value_parser = super::blood_type_parser())]
    blood_type: String,

    /// Number of units issued
    #[arg(allow_negative_numbers = true)]
    units: i64,

    /// Name of the recipient (defaults to Anonymous)
    #[arg(long, short, default_value = "")]
    recipient: String,
}

impl Remove {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) {
        let (_, mut store) = super::open_store(root);
        super::report(store.remove_blood(&self.blood_type, self.units, &self.recipient));
    }
}
