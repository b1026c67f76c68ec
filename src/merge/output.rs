use crate::bio::fasta::FastaWriter;
use crate::bio::sequence::Sequence;
use crate::{Result, TaxMergeError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub const TAXONOMY_HEADER: &str = "prokMSA_id\ttaxonomy";

pub fn sequence_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{}_seqs.fasta", prefix))
}

pub fn taxonomy_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{}_taxo.txt", prefix))
}

/// The two merge destinations behind one writer, so a taxonomy row and its
/// sequence record can only be emitted together. Line N of the taxonomy file
/// (after the header) always matches record N of the sequence file.
pub struct PairedOutput<W: Write, X: Write> {
    sequences: FastaWriter<W>,
    taxonomy: X,
    pairs: u64,
}

impl<W: Write, X: Write> PairedOutput<W, X> {
    pub fn new(sequences: W, taxonomy: X) -> Self {
        Self {
            sequences: FastaWriter::new(sequences),
            taxonomy,
            pairs: 0,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        writeln!(self.taxonomy, "{}", TAXONOMY_HEADER)?;
        Ok(())
    }

    pub fn write_pair(&mut self, taxonomy: &str, seq: &Sequence) -> Result<()> {
        writeln!(self.taxonomy, "{}\t{}", seq.id, taxonomy)?;
        self.sequences.write_record(seq)?;
        self.pairs += 1;
        Ok(())
    }

    /// Number of pairs written so far, not counting the header row.
    pub fn pairs(&self) -> u64 {
        self.pairs
    }

    /// Flush both destinations. Only called on the success path; a run that
    /// aborts mid-way may leave truncated output behind.
    pub fn finish(mut self) -> Result<()> {
        self.sequences.flush()?;
        self.taxonomy.flush()?;
        Ok(())
    }
}

impl PairedOutput<BufWriter<File>, BufWriter<File>> {
    /// Create `<prefix>_seqs.fasta` and `<prefix>_taxo.txt` for writing.
    pub fn create(prefix: &str) -> Result<Self> {
        let seq_path = sequence_path(prefix);
        let taxo_path = taxonomy_path(prefix);

        let sequences = File::create(&seq_path).map_err(|source| TaxMergeError::Open {
            path: seq_path,
            source,
        })?;
        let taxonomy = File::create(&taxo_path).map_err(|source| TaxMergeError::Open {
            path: taxo_path,
            source,
        })?;

        Ok(Self::new(BufWriter::new(sequences), BufWriter::new(taxonomy)))
    }
}
