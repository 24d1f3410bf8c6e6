// Full analysis pipeline: parse → histogram → impute → similarity → heatmap.
//
// The histogram is drawn from the raw matrix so gaps stay visible; similarity
// needs a dense matrix, so it runs on an imputed copy. Reports are optional
// and written last.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::Config;
use crate::output::json::{self, AnalysisReport};
use crate::output::markdown;
use crate::plot;
use crate::scan::{self, FeatureMatrix};
use crate::similarity::{Cosine, SimilarityMatrix};

/// Per-run choices that don't belong in the environment config.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Scan file; falls back to the configured one
    pub scan_file: Option<PathBuf>,
    pub histogram_path: Option<PathBuf>,
    pub heatmap_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
    /// Closest pairs to list in the markdown report and JSON export
    pub top_pairs: usize,
}

/// Closest pairs listed when the caller doesn't say otherwise.
pub const DEFAULT_TOP_PAIRS: usize = 10;

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            scan_file: None,
            histogram_path: None,
            heatmap_path: None,
            report_path: None,
            json_path: None,
            top_pairs: DEFAULT_TOP_PAIRS,
        }
    }
}

/// What a pipeline run produced.
#[derive(Debug)]
pub struct AnalysisSummary {
    pub raw: FeatureMatrix,
    pub imputed_cells: usize,
    pub similarity: SimilarityMatrix,
    pub histogram_path: PathBuf,
    pub heatmap_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

/// Return a copy of `raw` with every missing reading replaced by `fill`,
/// plus the number of cells that were filled.
pub fn impute(raw: &FeatureMatrix, fill: f64) -> (FeatureMatrix, usize) {
    let mut dense = raw.clone();
    let filled = dense.impute_missing(fill);
    (dense, filled)
}

/// Run every stage of the analysis.
pub fn run(config: &Config, options: &AnalyzeOptions) -> Result<AnalysisSummary> {
    let scan_file = config.scan_file_or(options.scan_file.as_deref());
    Config::require_scan_file(&scan_file)?;

    let histogram_path = options
        .histogram_path
        .clone()
        .unwrap_or_else(|| config.chart_path("signal_histogram"));
    let heatmap_path = options
        .heatmap_path
        .clone()
        .unwrap_or_else(|| config.chart_path("cosine_similarity"));

    let stages = 5 + options.report_path.is_some() as u64 + options.json_path.is_some() as u64;
    let pb = ProgressBar::new(stages);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Analyze [{bar:30}] {pos}/{len} {msg}")?,
    );

    pb.set_message("parsing");
    let raw = scan::parse_scan_file(&scan_file)?;
    pb.inc(1);

    pb.set_message("histogram");
    plot::plot_signal_histogram(&raw, config.subplots_per_row, &histogram_path)?;
    pb.inc(1);

    pb.set_message("imputing");
    let (dense, imputed_cells) = impute(&raw, config.no_signal_dbm);
    info!(
        filled = imputed_cells,
        fill_dbm = config.no_signal_dbm,
        "Imputed missing readings"
    );
    pb.inc(1);

    pb.set_message("similarity");
    let similarity = SimilarityMatrix::compute(&dense, &Cosine)?;
    pb.inc(1);

    pb.set_message("heatmap");
    plot::plot_similarity_heatmap(&similarity, &heatmap_path)?;
    pb.inc(1);

    if let Some(path) = &options.report_path {
        pb.set_message("report");
        ensure_parent(path)?;
        let charts = [
            ("Signal histogram", histogram_path.as_path()),
            ("Similarity heatmap", heatmap_path.as_path()),
        ];
        markdown::generate_report(&raw, &similarity, &charts, options.top_pairs, path)?;
        info!(path = %path.display(), "Markdown report written");
        pb.inc(1);
    }

    if let Some(path) = &options.json_path {
        pb.set_message("json");
        ensure_parent(path)?;
        let report = AnalysisReport::new(
            &scan_file,
            &raw,
            config.no_signal_dbm,
            similarity.clone(),
            options.top_pairs,
        );
        json::write_json(&report, path)?;
        info!(path = %path.display(), "JSON export written");
        pb.inc(1);
    }

    pb.finish_and_clear();

    Ok(AnalysisSummary {
        raw,
        imputed_cells,
        similarity,
        histogram_path,
        heatmap_path,
        report_path: options.report_path.clone(),
        json_path: options.json_path.clone(),
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
