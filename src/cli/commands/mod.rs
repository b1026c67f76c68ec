pub mod check;
pub mod merge;
