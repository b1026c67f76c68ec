pub mod bio;
pub mod cli;
pub mod merge;
pub mod utils;

pub use crate::merge::{MergeOptions, MergeSummary, Merger};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxMergeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("the taxonomy table has no entry for '{id}'")]
    TaxonomyMissing { id: String },

    #[error("cannot extract a k__ lineage from the description of '{id}'; supply an id-to-lineage table with --taxonomy")]
    TaxonomyFormat { id: String },
}

pub type Result<T> = std::result::Result<T, TaxMergeError>;
