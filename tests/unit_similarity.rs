// Unit tests for the similarity matrix: shape, symmetry, the imputation
// precondition, and pair ranking.

use wifiloc::scan::{FeatureMatrix, NO_SIGNAL_DBM};
use wifiloc::similarity::{cosine_similarity, Cosine, SimilarityMatrix, SimilarityMeasure};

fn dense(rows: Vec<Vec<f64>>) -> FeatureMatrix {
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    FeatureMatrix {
        labels: (0..rows.len()).map(|i| format!("loc{i}")).collect(),
        access_points: (0..width).map(|j| format!("ap{j}")).collect(),
        rows,
    }
}

// ============================================================
// cosine_similarity: numerical behavior
// ============================================================

#[test]
fn scale_invariant() {
    let a = [-40.0, -60.0, -80.0];
    let b = [-20.0, -30.0, -40.0];
    assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
}

#[test]
fn known_value() {
    // [1, 0] vs [1, 1] → 1 / sqrt(2)
    let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 1.0]);
    assert!((sim - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
}

#[test]
fn measure_trait_delegates() {
    let a = [3.0, 4.0];
    let b = [4.0, 3.0];
    assert_eq!(Cosine.similarity(&a, &b), cosine_similarity(&a, &b));
    assert_eq!(Cosine.name(), "cosine");
}

// ============================================================
// SimilarityMatrix::compute
// ============================================================

#[test]
fn matrix_is_square_symmetric_with_unit_diagonal() {
    let m = dense(vec![
        vec![-40.0, -70.0, -100.0],
        vec![-45.0, -65.0, -90.0],
        vec![-100.0, -50.0, -60.0],
    ]);
    let s = SimilarityMatrix::compute(&m, &Cosine).unwrap();

    assert_eq!(s.len(), 3);
    assert_eq!(s.labels, m.labels);
    for i in 0..3 {
        assert!((s.values[i][i] - 1.0).abs() < 1e-12);
        for j in 0..3 {
            assert_eq!(s.values[i][j], s.values[j][i]);
        }
    }
}

#[test]
fn refuses_missing_values() {
    let m = dense(vec![vec![-40.0, f64::NAN], vec![-50.0, -60.0]]);
    let err = SimilarityMatrix::compute(&m, &Cosine)
        .unwrap_err()
        .to_string();
    assert!(err.contains("impute"), "got: {err}");
}

#[test]
fn works_after_imputation() {
    let mut m = dense(vec![vec![-40.0, f64::NAN], vec![f64::NAN, -60.0]]);
    m.impute_missing(NO_SIGNAL_DBM);
    let s = SimilarityMatrix::compute(&m, &Cosine).unwrap();
    // [-40, -100] · [-100, -60] is positive: all-negative vectors never oppose
    assert!(s.values[0][1] > 0.0);
    assert!(s.values[0][1] < 1.0);
}

#[test]
fn single_location_has_no_pairs() {
    let m = dense(vec![vec![-40.0, -50.0]]);
    let s = SimilarityMatrix::compute(&m, &Cosine).unwrap();
    assert_eq!(s.len(), 1);
    assert!(s.ranked_pairs(10).is_empty());
    assert_eq!(s.nearest_neighbor(0), None);
}

// ============================================================
// ranked_pairs
// ============================================================

#[test]
fn ranked_pairs_sorted_descending_and_truncated() {
    let s = SimilarityMatrix {
        measure: "cosine".to_string(),
        labels: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        values: vec![
            vec![1.0, 0.5, 0.9, 0.1],
            vec![0.5, 1.0, 0.7, 0.3],
            vec![0.9, 0.7, 1.0, 0.2],
            vec![0.1, 0.3, 0.2, 1.0],
        ],
    };

    let all = s.ranked_pairs(100);
    assert_eq!(all.len(), 6, "n*(n-1)/2 off-diagonal pairs");
    assert!(all.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(all.iter().all(|p| p.i < p.j));

    let top = s.ranked_pairs(2);
    assert_eq!(top.len(), 2);
    assert_eq!((top[0].i, top[0].j), (0, 2));
    assert_eq!((top[1].i, top[1].j), (1, 2));
}

#[test]
fn range_spans_all_cells() {
    let m = dense(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    let s = SimilarityMatrix::compute(&m, &Cosine).unwrap();
    let (lo, hi) = s.range().unwrap();
    assert!(lo.abs() < 1e-12);
    assert!((hi - 1.0).abs() < 1e-12);
}
