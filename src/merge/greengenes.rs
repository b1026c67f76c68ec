use crate::bio::fasta::FastaReader;
use crate::bio::taxonomy::TaxonomySource;
use crate::merge::output::PairedOutput;
use crate::Result;
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// Stream every Greengenes record into the merged output, resolving each
/// record's taxonomy via the selected source before emission.
///
/// Returns the set of identifiers read, used for collision detection during
/// the SILVA pass. Identifiers are recorded before taxonomy resolution so
/// the set covers every record this pass touched.
pub fn process<R, W, X>(
    records: FastaReader<R>,
    taxonomy: &TaxonomySource,
    keep_description: bool,
    progress: &ProgressBar,
    out: &mut PairedOutput<W, X>,
) -> Result<HashSet<String>>
where
    R: BufRead,
    W: Write,
    X: Write,
{
    let mut ids = HashSet::new();

    for record in records {
        let mut seq = record?;
        progress.inc(1);

        ids.insert(seq.id.clone());
        let lineage = taxonomy.resolve(&seq)?;

        if !keep_description {
            seq.description = None;
        }
        let seq = seq.to_dna();
        out.write_pair(&lineage, &seq)?;
    }

    Ok(ids)
}
