// Similarity measure trait: swap-ready abstraction.
//
// The matrix builder only needs "score two equal-length vectors", so the
// measure is pluggable. Cosine is what the analysis uses by default.

/// Pairwise similarity between two feature vectors of equal length.
pub trait SimilarityMeasure {
    /// Short name used in reports and logs.
    fn name(&self) -> &'static str;

    fn similarity(&self, a: &[f64], b: &[f64]) -> f64;
}
