pub mod coverage;

pub use coverage::{CoverageRow, CoverageView};
