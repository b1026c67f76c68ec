pub mod fasta;
pub mod sequence;
pub mod taxonomy;

pub use sequence::{Alphabet, Sequence};
