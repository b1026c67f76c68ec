use crate::bio::fasta::FastaReader;
use crate::bio::taxonomy::is_eukaryote;
use crate::merge::output::PairedOutput;
use crate::Result;
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SilvaSummary {
    pub written: u64,
    pub skipped: u64,
    pub collisions: u64,
}

/// Stream SILVA records into the merged output. The description field of a
/// SILVA record is its taxonomy string, so no resolution step is needed;
/// only records classified under Eukaryota are kept.
///
/// An identifier already present in `greengenes_ids` is a diagnostic, not a
/// dedup gate: the collision is logged and both records stay in the output.
pub fn process<R, W, X>(
    records: FastaReader<R>,
    greengenes_ids: &HashSet<String>,
    keep_description: bool,
    progress: &ProgressBar,
    out: &mut PairedOutput<W, X>,
) -> Result<SilvaSummary>
where
    R: BufRead,
    W: Write,
    X: Write,
{
    let mut summary = SilvaSummary::default();

    for record in records {
        let mut seq = record?;
        progress.inc(1);

        let taxonomy = seq.description.clone().unwrap_or_default();

        if !is_eukaryote(&taxonomy) {
            debug!("Skipping {}: not classified under Eukaryota", seq.id);
            summary.skipped += 1;
            continue;
        }

        if greengenes_ids.contains(&seq.id) {
            warn!("ID {} exists in both sources; keeping both records", seq.id);
            summary.collisions += 1;
        }

        if !keep_description {
            seq.description = None;
        }
        let seq = seq.to_dna();
        out.write_pair(&taxonomy, &seq)?;
        summary.written += 1;
    }

    Ok(summary)
}
