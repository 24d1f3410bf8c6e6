// Scan file parsing: text format in, feature matrix out.

pub mod matrix;
pub mod parser;

pub use matrix::{FeatureMatrix, NO_SIGNAL_DBM};
pub use parser::{parse_scan_file, parse_scan_str};
