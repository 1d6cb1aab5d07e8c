use std::path::Path;

use clap::Parser;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Record a donation")]
pub struct Add {
    /// The blood type donated (A+, A-, B+, B-, AB+, AB-, O+, O-)
    #[arg(value_parser = super::blood_type_parser())]
    blood_type: String,

    /// Number of units donated
    #[arg(allow_negative_numbers = true)]
    units: i64,

    /// Name of the donor (defaults to Anonymous)
    #[arg(long, short, default_value = "")]
    donor: String,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) {
        let (_, mut store) = super::open_store(root);
        super::report(store.add_blood(&self.blood_type, self.units, &self.donor));
    }
}
