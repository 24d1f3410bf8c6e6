// wifiloc: wifi fingerprint analysis for labeled locations
//
// This is the library root. The pipeline is linear: scan files are parsed
// into a feature matrix, charted, imputed, compared by cosine similarity,
// and charted again.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod plot;
pub mod scan;
pub mod similarity;
pub mod status;
