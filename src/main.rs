use clap::Parser;
use colored::*;
use std::process;
use taxmerge::cli::{Cli, Commands};
use taxmerge::TaxMergeError;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging with TAXMERGE_LOG environment variable support
    let log_level = std::env::var("TAXMERGE_LOG")
        .unwrap_or_else(|_| default_log_level(cli.verbose).to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<TaxMergeError>() {
            Some(TaxMergeError::TaxonomyMissing { .. })
            | Some(TaxMergeError::TaxonomyFormat { .. }) => 2,
            Some(TaxMergeError::Io(_)) | Some(TaxMergeError::Open { .. }) => 3,
            Some(TaxMergeError::Parse(_)) => 4,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Merge(args) => taxmerge::cli::commands::merge::run(args),
        Commands::Check(args) => taxmerge::cli::commands::check::run(args),
    }
}
