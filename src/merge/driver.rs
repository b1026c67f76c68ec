use crate::bio::fasta::FastaReader;
use crate::bio::taxonomy::{TaxonomySource, TaxonomyTable};
use crate::merge::output::{self, PairedOutput};
use crate::merge::{greengenes, silva};
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub greengenes: PathBuf,
    pub silva: PathBuf,
    pub taxonomy_table: Option<PathBuf>,
    pub output_prefix: String,
    pub keep_description: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeSummary {
    pub greengenes_written: u64,
    pub silva_written: u64,
    pub silva_skipped: u64,
    pub id_collisions: u64,
    pub sequence_file: PathBuf,
    pub taxonomy_file: PathBuf,
}

impl MergeSummary {
    pub fn total_written(&self) -> u64 {
        self.greengenes_written + self.silva_written
    }
}

/// Two-pass merge pipeline: the Greengenes source is drained first so its
/// identifier set is complete before the SILVA source is even opened, then
/// SILVA records are filtered and appended to the same output pair.
pub struct Merger {
    options: MergeOptions,
    silent: bool,
}

impl Merger {
    pub fn new(options: MergeOptions) -> Self {
        Self {
            options,
            silent: false,
        }
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn run(&self) -> Result<MergeSummary> {
        // The resolution strategy is fixed once per run, not per record.
        let taxonomy = match &self.options.taxonomy_table {
            Some(path) => {
                let table = TaxonomyTable::from_path(path)?;
                info!(
                    "Loaded {} taxonomy entries from {}",
                    table.len(),
                    path.display()
                );
                TaxonomySource::Table(table)
            }
            None => TaxonomySource::Description,
        };

        let mut out = PairedOutput::create(&self.options.output_prefix)?;
        out.write_header()?;

        let progress = self.stage_progress("Merging Greengenes records");
        let records = FastaReader::from_path(&self.options.greengenes)?;
        let ids = greengenes::process(
            records,
            &taxonomy,
            self.options.keep_description,
            &progress,
            &mut out,
        )?;
        progress.finish_and_clear();
        let greengenes_written = out.pairs();
        info!("Greengenes pass complete: {} records", greengenes_written);

        let progress = self.stage_progress("Merging SILVA records");
        let records = FastaReader::from_path(&self.options.silva)?;
        let silva_summary = silva::process(
            records,
            &ids,
            self.options.keep_description,
            &progress,
            &mut out,
        )?;
        progress.finish_and_clear();
        info!(
            "SILVA pass complete: {} kept, {} skipped, {} id collisions",
            silva_summary.written, silva_summary.skipped, silva_summary.collisions
        );

        out.finish()?;

        Ok(MergeSummary {
            greengenes_written,
            silva_written: silva_summary.written,
            silva_skipped: silva_summary.skipped,
            id_collisions: silva_summary.collisions,
            sequence_file: output::sequence_path(&self.options.output_prefix),
            taxonomy_file: output::taxonomy_path(&self.options.output_prefix),
        })
    }

    fn stage_progress(&self, message: &str) -> ProgressBar {
        if self.silent {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}: {pos} records")
                .unwrap(),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaxMergeError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const GREENGENES: &str = "\
>4 U55237.1 Methanobrevibacter thaueri str. CW k__Archaea; p__Euryarchaeota; Unclassified; otu_127
CUGGUUGAUCCUGCC
>7 AF391990.1 Lactobacillus casei k__Bacteria; p__Firmicutes; otu_204
ACGTACGT
";

    const SILVA: &str = "\
>AB001 Eukaryota;Viridiplantae;Arabidopsis thaliana
GGCUAAGGCU
>AB002 Bacteria;Proteobacteria;Escherichia coli
ACGTACGT
";

    const TABLE: &str = "\
# prokMSA_id\ttaxonomy
4\tk__Archaea; p__Euryarchaeota; Unclassified
7\tk__Bacteria; p__Firmicutes
";

    struct Fixture {
        dir: TempDir,
        options: MergeOptions,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let greengenes = dir.path().join("gg.fasta");
            let silva = dir.path().join("silva.fasta");
            let table = dir.path().join("taxonomy.txt");
            fs::write(&greengenes, GREENGENES).unwrap();
            fs::write(&silva, SILVA).unwrap();
            fs::write(&table, TABLE).unwrap();

            let options = MergeOptions {
                greengenes,
                silva,
                taxonomy_table: Some(table),
                output_prefix: dir.path().join("merged").to_string_lossy().into_owned(),
                keep_description: false,
            };
            Self { dir, options }
        }
    }

    fn run(options: MergeOptions) -> Result<MergeSummary> {
        Merger::new(options).with_silent(true).run()
    }

    #[test]
    fn test_run_merges_both_sources() {
        let fixture = Fixture::new();
        let summary = run(fixture.options).unwrap();

        assert_eq!(summary.greengenes_written, 2);
        assert_eq!(summary.silva_written, 1);
        assert_eq!(summary.silva_skipped, 1);
        assert_eq!(summary.id_collisions, 0);
        assert_eq!(summary.total_written(), 3);

        let taxo = fs::read_to_string(&summary.taxonomy_file).unwrap();
        let rows: Vec<&str> = taxo.lines().collect();
        assert_eq!(
            rows,
            vec![
                "prokMSA_id\ttaxonomy",
                "4\tk__Archaea; p__Euryarchaeota; Unclassified",
                "7\tk__Bacteria; p__Firmicutes",
                "AB001\tEukaryota;Viridiplantae;Arabidopsis thaliana",
            ]
        );

        let seqs = fs::read_to_string(&summary.sequence_file).unwrap();
        let headers: Vec<&str> = seqs.lines().filter(|l| l.starts_with('>')).collect();
        assert_eq!(headers, vec![">4", ">7", ">AB001"]);
        assert!(seqs.contains("CTGGTTGATCCTGCC"));
        assert!(!seqs.contains('U'));
    }

    #[test]
    fn test_run_without_table_extracts_from_description() {
        let mut fixture = Fixture::new();
        fixture.options.taxonomy_table = None;
        let summary = run(fixture.options).unwrap();

        let taxo = fs::read_to_string(&summary.taxonomy_file).unwrap();
        assert!(taxo.contains("4\tk__Archaea; p__Euryarchaeota; Unclassified\n"));
        assert!(taxo.contains("7\tk__Bacteria; p__Firmicutes\n"));
    }

    #[test]
    fn test_run_pairing_stays_in_step() {
        let fixture = Fixture::new();
        let summary = run(fixture.options).unwrap();

        let taxo = fs::read_to_string(&summary.taxonomy_file).unwrap();
        let seqs = fs::read_to_string(&summary.sequence_file).unwrap();

        let taxo_ids: Vec<&str> = taxo
            .lines()
            .skip(1)
            .map(|l| l.split('\t').next().unwrap())
            .collect();
        let seq_ids: Vec<&str> = seqs
            .lines()
            .filter(|l| l.starts_with('>'))
            .map(|l| &l[1..])
            .collect();
        assert_eq!(taxo_ids, seq_ids);
    }

    #[test]
    fn test_run_counts_cross_source_collisions() {
        let fixture = Fixture::new();
        let mut options = fixture.options;
        // SILVA reuses an id from the Greengenes side.
        fs::write(
            &options.silva,
            ">4 Eukaryota;Fungi;Saccharomyces cerevisiae\nUUGG\n",
        )
        .unwrap();
        options.taxonomy_table = None;

        let summary = run(options).unwrap();
        assert_eq!(summary.id_collisions, 1);
        assert_eq!(summary.silva_written, 1);

        // Both records stay, keyed by the same id.
        let taxo = fs::read_to_string(&summary.taxonomy_file).unwrap();
        let keyed: Vec<&str> = taxo
            .lines()
            .filter(|l| l.starts_with("4\t"))
            .collect();
        assert_eq!(keyed.len(), 2);
    }

    #[test]
    fn test_run_missing_table_entry_halts_before_silva() {
        let fixture = Fixture::new();
        let mut options = fixture.options;
        fs::write(
            options.taxonomy_table.as_ref().unwrap(),
            "4\tk__Archaea; p__Euryarchaeota\n",
        )
        .unwrap();
        // A missing SILVA file only matters if the run gets that far.
        options.silva = fixture.dir.path().join("never_opened.fasta");

        let err = run(options).unwrap_err();
        match err {
            TaxMergeError::TaxonomyMissing { id } => assert_eq!(id, "7"),
            other => panic!("expected TaxonomyMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_run_missing_greengenes_file() {
        let fixture = Fixture::new();
        let mut options = fixture.options;
        options.greengenes = fixture.dir.path().join("missing.fasta");

        let err = run(options).unwrap_err();
        assert!(matches!(err, TaxMergeError::Open { .. }));
    }

    #[test]
    fn test_run_keep_description() {
        let fixture = Fixture::new();
        let mut options = fixture.options;
        options.keep_description = true;
        let summary = run(options).unwrap();

        let seqs = fs::read_to_string(&summary.sequence_file).unwrap();
        assert!(seqs.contains(">4 U55237.1 Methanobrevibacter thaueri str. CW"));
        assert!(seqs.contains(">AB001 Eukaryota;Viridiplantae;Arabidopsis thaliana"));
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let fixture = Fixture::new();
        let summary = run(fixture.options).unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["greengenes_written"], 2);
        assert_eq!(json["silva_skipped"], 1);
        assert!(json["sequence_file"].as_str().unwrap().ends_with("merged_seqs.fasta"));
    }
}
