//! `bloodbank`: record donations and usages against a blood inventory from
//! the command line.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
