use crate::cli::output::*;
use crate::merge::{MergeOptions, MergeSummary, Merger};
use anyhow::bail;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct MergeArgs {
    /// Greengenes FASTA file (.gz supported)
    #[arg(short, long, value_name = "FILE")]
    pub greengenes: PathBuf,

    /// SILVA FASTA file (.gz supported)
    #[arg(short, long, value_name = "FILE")]
    pub silva: PathBuf,

    /// Tab-delimited id-to-taxonomy table for the Greengenes records
    #[arg(short, long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Prefix for the two output files
    #[arg(short, long, default_value = "merged_gg_silva", value_name = "PREFIX")]
    pub output: String,

    /// Keep record descriptions in the output FASTA
    #[arg(long)]
    pub keep_description: bool,

    /// Summary format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: MergeArgs) -> anyhow::Result<()> {
    if !matches!(args.format.as_str(), "text" | "json") {
        bail!("Unknown format: {} (expected text or json)", args.format);
    }

    let options = MergeOptions {
        greengenes: args.greengenes,
        silva: args.silva,
        taxonomy_table: args.taxonomy,
        output_prefix: args.output,
        keep_description: args.keep_description,
    };

    let summary = Merger::new(options)
        .with_silent(args.quiet || args.format == "json")
        .run()?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print_text_summary(&summary),
    }

    Ok(())
}

fn print_text_summary(summary: &MergeSummary) {
    section_header_with_line("Merge Summary");
    tree_item(
        false,
        "Greengenes records",
        Some(&format_number(summary.greengenes_written)),
    );
    tree_item(
        false,
        "SILVA records kept",
        Some(&format_number(summary.silva_written)),
    );
    tree_item(
        false,
        "SILVA records skipped",
        Some(&format_number(summary.silva_skipped)),
    );
    tree_item(
        false,
        "Sequence file",
        Some(&summary.sequence_file.display().to_string()),
    );
    tree_item(
        true,
        "Taxonomy file",
        Some(&summary.taxonomy_file.display().to_string()),
    );
    println!();

    if summary.id_collisions > 0 {
        warning(&format!(
            "{} identifiers appear in both sources",
            format_number(summary.id_collisions)
        ));
    }
    success(&format!(
        "Merged {} records",
        format_number(summary.total_written())
    ));
}
