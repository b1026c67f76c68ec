#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Greengenes-style input: lineage embedded in the description with a
/// trailing OTU annotation, mixed RNA and DNA residues.
pub const GREENGENES_FASTA: &str = "\
>4 U55237.1 Methanobrevibacter thaueri str. CW k__Archaea; p__Euryarchaeota; c__Methanobacteria; Unclassified; otu_127
CUGGUUGAUCCUGCC
AGGAUCAACCUGC
>7 AF391990.1 Lactobacillus casei k__Bacteria; p__Firmicutes; g__Lactobacillus; otu_204
ACGTACGTACGTACGT
";

/// SILVA-style input: the description field is the taxonomy string itself.
/// One bacterial record to exercise the domain filter.
pub const SILVA_FASTA: &str = "\
>AB001 Eukaryota;Viridiplantae;Streptophyta;Arabidopsis thaliana
GGCUAAGGCUAA
>AB002 Bacteria;Proteobacteria;Gammaproteobacteria;Escherichia coli
ACGTACGTACGT
>AB003 eukaryota ;Fungi;Dikarya;Saccharomyces cerevisiae
UUGGCCAAUUGG
";

/// Reference taxonomy table covering both Greengenes identifiers.
pub const TAXONOMY_TABLE: &str = "\
# prokMSA_id\ttaxonomy
4\tk__Archaea; p__Euryarchaeota; c__Methanobacteria; Unclassified
7\tk__Bacteria; p__Firmicutes; g__Lactobacillus
";

/// Helper to run the taxmerge CLI
pub fn taxmerge_cmd() -> Command {
    Command::cargo_bin("taxmerge").unwrap()
}

/// Setup test environment with temporary directory
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let input_dir = temp_dir.path().join("input");
        let output_dir = temp_dir.path().join("output");

        fs::create_dir_all(&input_dir)?;
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            temp_dir,
            input_dir,
            output_dir,
        })
    }

    pub fn create_input_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.input_dir.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn create_gzipped_input(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.input_dir.join(name);
        let file = File::create(&path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(content.as_bytes())?;
        encoder.finish()?;
        Ok(path)
    }

    /// Output prefix inside the output directory, as passed to `-o`.
    pub fn output_prefix(&self, name: &str) -> String {
        self.output_dir.join(name).to_string_lossy().into_owned()
    }

    pub fn sequence_output(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}_seqs.fasta", name))
    }

    pub fn taxonomy_output(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}_taxo.txt", name))
    }
}

/// Count sequences in a FASTA file
pub fn count_sequences(path: &Path) -> Result<usize> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().filter(|l| l.starts_with('>')).count())
}

/// Identifiers of all records in a FASTA file, in file order
pub fn fasta_ids(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter(|l| l.starts_with('>'))
        .map(|l| l[1..].split_whitespace().next().unwrap_or("").to_string())
        .collect())
}

/// Data rows of a taxonomy output file, header excluded
pub fn taxonomy_rows(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().skip(1).map(|l| l.to_string()).collect())
}
