// Colored terminal output for matrix summaries and similarity rankings.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::scan::FeatureMatrix;
use crate::similarity::{SimilarPair, SimilarityMatrix};

/// Similarity at or above this means two locations are nearly indistinguishable.
pub const CONFUSABLE_THRESHOLD: f64 = 0.99;
/// Similarity at or above this is worth a second look.
pub const CLOSE_THRESHOLD: f64 = 0.95;

/// Display dimensions and per-scan coverage of a parsed feature matrix.
pub fn display_matrix_summary(matrix: &FeatureMatrix) {
    let total_cells = matrix.n_locations() * matrix.n_access_points();
    let missing = matrix.missing_count();

    println!(
        "\n{}",
        format!(
            "=== Feature Matrix ({} scans × {} access points) ===",
            matrix.n_locations(),
            matrix.n_access_points()
        )
        .bold()
    );

    let missing_pct = if total_cells > 0 {
        missing as f64 / total_cells as f64 * 100.0
    } else {
        0.0
    };
    println!("  Missing readings: {missing} of {total_cells} ({missing_pct:.0}%)");
    if let Some((lo, hi)) = matrix.finite_range() {
        println!("  Signal range:     {lo:.0} to {hi:.0} dBm");
    }
    println!();

    println!(
        "  {:>4}  {:<32} {:>8}",
        "Row".dimmed(),
        "Location".dimmed(),
        "Seen".dimmed(),
    );
    println!("  {}", "-".repeat(48).dimmed());

    let n_ap = matrix.n_access_points();
    for (i, label) in matrix.labels.iter().enumerate() {
        let seen = matrix.coverage(i);
        let seen_str = format!("{seen}/{n_ap}");
        let colored_seen = if seen == 0 {
            seen_str.red()
        } else if seen * 2 < n_ap {
            seen_str.yellow()
        } else {
            seen_str.green()
        };
        println!(
            "  {:>4}  {:<32} {:>8}",
            i,
            super::truncate_chars(label, 29),
            colored_seen
        );
    }
    println!();
}

/// Display the most similar location pairs.
pub fn display_similarity_pairs(similarity: &SimilarityMatrix, pairs: &[SimilarPair]) {
    if pairs.is_empty() {
        println!("Only one location scanned, nothing to compare.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Most Similar Locations ({} similarity) ===",
            similarity.measure
        )
        .bold()
    );
    println!();

    for (rank, pair) in pairs.iter().enumerate() {
        println!(
            "  {:>3}. {:<28} ~ {:<28} {}",
            rank + 1,
            super::truncate_chars(&similarity.labels[pair.i], 25),
            super::truncate_chars(&similarity.labels[pair.j], 25),
            colorize_score(pair.score),
        );
    }
    println!();

    let confusable = pairs
        .iter()
        .filter(|p| p.score >= CONFUSABLE_THRESHOLD)
        .count();
    if confusable > 0 {
        println!(
            "  {} {} pair(s) nearly indistinguishable by wifi signature",
            "!!".red().bold(),
            confusable
        );
    }
}

/// Display each location's closest other location.
pub fn display_nearest_neighbors(similarity: &SimilarityMatrix) {
    println!("{}", "Nearest neighbor per location:".bold());
    for (i, label) in similarity.labels.iter().enumerate() {
        match similarity.nearest_neighbor(i) {
            Some((j, score)) => println!(
                "  {:<28} -> {:<28} {}",
                super::truncate_chars(label, 25),
                super::truncate_chars(&similarity.labels[j], 25),
                colorize_score(score)
            ),
            None => println!("  {:<28} -> {}", label, "(none)".dimmed()),
        }
    }
    println!();
}

/// Colorize a similarity score by how confusable it makes two locations.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.4}");
    if score >= CONFUSABLE_THRESHOLD {
        text.red().bold()
    } else if score >= CLOSE_THRESHOLD {
        text.yellow()
    } else {
        text.green()
    }
}
