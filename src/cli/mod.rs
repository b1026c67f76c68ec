pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "taxmerge",
    version,
    about = "Merge Greengenes and SILVA reference databases into one corpus",
    long_about = "Taxmerge merges a Greengenes 16S database with the eukaryal portion of a \
                  SILVA database into a single sequence file and a parallel taxonomy table, \
                  normalizing RNA sequences to DNA along the way."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge the two source databases into one corpus
    Merge(commands::merge::MergeArgs),

    /// Check taxonomy coverage of a Greengenes file before merging
    Check(commands::check::CheckArgs),
}
