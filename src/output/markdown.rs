// Markdown report: a shareable write-up of one analysis run.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::scan::FeatureMatrix;
use crate::similarity::SimilarityMatrix;

/// Render the report as a markdown string.
///
/// `matrix` is the raw (pre-imputation) matrix so coverage reflects what was
/// actually observed. At most `top_pairs` closest pairs are listed.
pub fn render_report(
    matrix: &FeatureMatrix,
    similarity: &SimilarityMatrix,
    charts: &[(&str, &Path)],
    top_pairs: usize,
) -> String {
    let mut out = String::new();
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    let _ = writeln!(out, "# Wifi Location Fingerprint Report\n");
    let _ = writeln!(out, "Generated: {now}\n");

    let _ = writeln!(out, "## Summary\n");
    let _ = writeln!(out, "- Scans: {}", matrix.n_locations());
    let _ = writeln!(out, "- Access points: {}", matrix.n_access_points());
    let _ = writeln!(out, "- Missing readings: {}", matrix.missing_count());
    if let Some((lo, hi)) = matrix.finite_range() {
        let _ = writeln!(out, "- Signal range: {lo:.0} to {hi:.0} dBm");
    }
    let _ = writeln!(out, "- Similarity measure: {}\n", similarity.measure);

    let _ = writeln!(out, "## Coverage\n");
    let _ = writeln!(out, "| Row | Location | Access points seen |");
    let _ = writeln!(out, "|---:|---|---:|");
    for (i, label) in matrix.labels.iter().enumerate() {
        let _ = writeln!(
            out,
            "| {i} | {} | {}/{} |",
            escape_cell(label),
            matrix.coverage(i),
            matrix.n_access_points()
        );
    }
    out.push('\n');

    let pairs = similarity.ranked_pairs(top_pairs);
    if !pairs.is_empty() {
        let _ = writeln!(out, "## Closest Locations\n");
        let _ = writeln!(out, "| # | Location A | Location B | Similarity |");
        let _ = writeln!(out, "|---:|---|---|---:|");
        for (rank, pair) in pairs.iter().enumerate() {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {:.4} |",
                rank + 1,
                escape_cell(&similarity.labels[pair.i]),
                escape_cell(&similarity.labels[pair.j]),
                pair.score
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Similarity Matrix\n");
    let header: Vec<String> = (0..similarity.len()).map(|j| j.to_string()).collect();
    let _ = writeln!(out, "| | {} |", header.join(" | "));
    let _ = writeln!(out, "|---|{}", "---:|".repeat(similarity.len()));
    for (i, row) in similarity.values.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.3}")).collect();
        let _ = writeln!(
            out,
            "| {i}: {} | {} |",
            escape_cell(&similarity.labels[i]),
            cells.join(" | ")
        );
    }
    out.push('\n');

    if !charts.is_empty() {
        let _ = writeln!(out, "## Charts\n");
        for (name, path) in charts {
            let _ = writeln!(out, "- {name}: `{}`", path.display());
        }
    }

    out
}

/// Write the report to `path`.
pub fn generate_report(
    matrix: &FeatureMatrix,
    similarity: &SimilarityMatrix,
    charts: &[(&str, &Path)],
    top_pairs: usize,
    path: &Path,
) -> Result<()> {
    let content = render_report(matrix, similarity, charts, top_pairs);
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// Pipes would break the table layout.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
