// Cosine similarity between location fingerprints.
//
//   cos(a, b) = dot(a, b) / (|a| * |b|)
//
// A zero-length vector is treated as having norm 1, so it scores 0 against
// everything (itself included) instead of producing NaN. Results are not
// clamped: two vectors pointing apart legitimately score below zero.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use super::traits::SimilarityMeasure;
use crate::scan::FeatureMatrix;

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 for mismatched lengths or empty input.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let norm = |m: f64| if m == 0.0 { 1.0 } else { m };
    dot / (norm(mag_a) * norm(mag_b))
}

/// The default measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl SimilarityMeasure for Cosine {
    fn name(&self) -> &'static str {
        "cosine"
    }

    fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        cosine_similarity(a, b)
    }
}

/// Symmetric location × location similarity matrix.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityMatrix {
    /// Name of the measure that produced the values
    pub measure: String,
    /// Row/column labels (same order as the feature matrix rows)
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// One off-diagonal entry, `i < j`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPair {
    pub i: usize,
    pub j: usize,
    pub score: f64,
}

impl SimilarityMatrix {
    /// Compute pairwise similarity between every pair of location rows.
    ///
    /// The feature matrix must be fully imputed: a NaN cell would poison
    /// every score it touches.
    pub fn compute(features: &FeatureMatrix, measure: &dyn SimilarityMeasure) -> Result<Self> {
        let missing = features.missing_count();
        if missing > 0 {
            anyhow::bail!(
                "feature matrix has {missing} missing readings; impute them before computing similarity"
            );
        }

        let n = features.n_locations();
        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let s = measure.similarity(&features.rows[i], &features.rows[j]);
                values[i][j] = s;
                values[j][i] = s;
            }
        }

        debug!(n, measure = measure.name(), "Computed similarity matrix");

        Ok(Self {
            measure: measure.name().to_string(),
            labels: features.labels.clone(),
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Min and max over all cells, for color scaling.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .flat_map(|r| r.iter())
            .copied()
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Off-diagonal pairs sorted by descending similarity, truncated to `top_n`.
    ///
    /// The top of this list is the set of locations hardest to tell apart.
    pub fn ranked_pairs(&self, top_n: usize) -> Vec<SimilarPair> {
        let n = self.len();
        let mut pairs: Vec<SimilarPair> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| SimilarPair {
                i,
                j,
                score: self.values[i][j],
            })
            .collect();
        pairs.sort_by(|a, b| b.score.total_cmp(&a.score));
        pairs.truncate(top_n);
        pairs
    }

    /// The most similar *other* location to `row`, with its score.
    pub fn nearest_neighbor(&self, row: usize) -> Option<(usize, f64)> {
        let scores = self.values.get(row)?;
        scores
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != row)
            .map(|(j, s)| (j, *s))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}
