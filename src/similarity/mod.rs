// Location similarity: how distinguishable are places by their wifi signature?

pub mod cosine;
pub mod traits;

pub use cosine::{cosine_similarity, Cosine, SimilarPair, SimilarityMatrix};
pub use traits::SimilarityMeasure;
