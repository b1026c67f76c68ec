pub mod driver;
pub mod greengenes;
pub mod output;
pub mod silva;

pub use driver::{MergeOptions, MergeSummary, Merger};
