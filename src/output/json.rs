// JSON export of the analysis: raw features, fill value, similarity.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::scan::FeatureMatrix;
use crate::similarity::{SimilarPair, SimilarityMatrix};

/// Everything one analysis run produced, in a machine-readable shape.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub labels: Vec<String>,
    pub access_points: Vec<String>,
    /// Raw readings; `null` where an access point wasn't seen
    pub features: Vec<Vec<Option<f64>>>,
    /// Value substituted for `null` before computing similarity
    pub no_signal_dbm: f64,
    pub similarity: SimilarityMatrix,
    pub closest_pairs: Vec<SimilarPair>,
}

impl AnalysisReport {
    /// Build a report from the raw (pre-imputation) matrix and the similarity
    /// computed on its imputed copy.
    pub fn new(
        source: &Path,
        raw: &FeatureMatrix,
        no_signal_dbm: f64,
        similarity: SimilarityMatrix,
        top_pairs: usize,
    ) -> Self {
        let features = raw
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| if v.is_nan() { None } else { Some(*v) })
                    .collect()
            })
            .collect();
        let closest_pairs = similarity.ranked_pairs(top_pairs);

        Self {
            generated_at: Utc::now(),
            source: source.display().to_string(),
            labels: raw.labels.clone(),
            access_points: raw.access_points.clone(),
            features,
            no_signal_dbm,
            similarity,
            closest_pairs,
        }
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_json(report: &AnalysisReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write JSON export to {}", path.display()))?;
    Ok(())
}
