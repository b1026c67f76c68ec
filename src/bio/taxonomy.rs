use crate::bio::sequence::Sequence;
use crate::utils::open_reader;
use crate::{Result, TaxMergeError};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

lazy_static! {
    /// Greengenes lineages start at the kingdom marker, e.g. `k__Archaea`.
    static ref LINEAGE_RE: Regex = Regex::new(r"(?i)k__.*").unwrap();
    /// Trailing OTU cluster annotation, e.g. `; otu_127`.
    static ref OTU_SUFFIX_RE: Regex = Regex::new(r"(?i);\s*otu_\d+\s*$").unwrap();
    static ref EUKARYOTA_RE: Regex = Regex::new(r"(?i)^eukaryota\s*;").unwrap();
}

/// Extract a Greengenes-style lineage from a record description: everything
/// from the kingdom marker onward, with any trailing OTU annotation removed.
pub fn greengenes_lineage(description: &str) -> Option<String> {
    let found = LINEAGE_RE.find(description)?;
    let lineage = OTU_SUFFIX_RE.replace(found.as_str(), "");
    Some(lineage.trim_end().to_string())
}

/// True when a taxonomy string classifies the record under the Eukaryota
/// domain, i.e. it starts with `Eukaryota;` (case-insensitive, whitespace
/// allowed before the separator).
pub fn is_eukaryote(taxonomy: &str) -> bool {
    EUKARYOTA_RE.is_match(taxonomy)
}

/// Tab-delimited id-to-lineage mapping loaded up front from a reference
/// taxonomy file.
#[derive(Debug, Default)]
pub struct TaxonomyTable {
    entries: HashMap<String, String>,
}

impl TaxonomyTable {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut entries = HashMap::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((id, taxonomy)) => {
                    // Duplicate ids are not an error; the last line wins.
                    entries.insert(id.to_string(), taxonomy.to_string());
                }
                None => {
                    return Err(TaxMergeError::Parse(format!(
                        "taxonomy table line {}: expected two tab-separated fields",
                        index + 1
                    )));
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(open_reader(path)?)
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How a record's taxonomy string is resolved: looked up in a reference
/// table, or extracted from the record's own description. Chosen once per
/// run, before any record is read.
pub enum TaxonomySource {
    Table(TaxonomyTable),
    Description,
}

impl TaxonomySource {
    pub fn resolve(&self, seq: &Sequence) -> Result<String> {
        match self {
            TaxonomySource::Table(table) => table
                .get(&seq.id)
                .map(|s| s.to_string())
                .ok_or_else(|| TaxMergeError::TaxonomyMissing { id: seq.id.clone() }),
            TaxonomySource::Description => seq
                .description
                .as_deref()
                .and_then(greengenes_lineage)
                .ok_or_else(|| TaxMergeError::TaxonomyFormat { id: seq.id.clone() }),
        }
    }
}
