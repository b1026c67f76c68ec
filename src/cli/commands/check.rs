use crate::bio::fasta::FastaReader;
use crate::bio::taxonomy::{TaxonomySource, TaxonomyTable};
use crate::cli::output::*;
use anyhow::bail;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Greengenes FASTA file (.gz supported)
    #[arg(short, long, value_name = "FILE")]
    pub greengenes: PathBuf,

    /// Tab-delimited id-to-taxonomy table to check coverage against
    #[arg(short, long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Maximum number of unresolved identifiers to list
    #[arg(long, default_value = "10", value_name = "N")]
    pub show: usize,
}

/// Dry-run taxonomy resolution over a Greengenes file. A merge aborts on the
/// first unresolved record; this walks the whole file and reports every one.
pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let source = match &args.taxonomy {
        Some(path) => {
            let table = TaxonomyTable::from_path(path)?;
            info(&format!(
                "Loaded {} taxonomy entries from {}",
                format_number(table.len() as u64),
                path.display()
            ));
            TaxonomySource::Table(table)
        }
        None => TaxonomySource::Description,
    };

    let mut total = 0u64;
    let mut unresolved = Vec::new();

    for record in FastaReader::from_path(&args.greengenes)? {
        let seq = record?;
        total += 1;
        if source.resolve(&seq).is_err() {
            unresolved.push(seq.id);
        }
    }

    section_header_with_line("Taxonomy Coverage");
    tree_item(false, "Records", Some(&format_number(total)));
    tree_item(
        false,
        "Resolvable",
        Some(&format_number(total - unresolved.len() as u64)),
    );
    tree_item(true, "Unresolved", Some(&format_number(unresolved.len() as u64)));
    println!();

    if unresolved.is_empty() {
        success("Every record resolves a taxonomy string");
        return Ok(());
    }

    for id in unresolved.iter().take(args.show) {
        warning(&format!("No taxonomy for {}", id));
    }
    if unresolved.len() > args.show {
        warning(&format!("... and {} more", unresolved.len() - args.show));
    }

    bail!(
        "{} of {} records would fail taxonomy resolution",
        unresolved.len(),
        total
    );
}
