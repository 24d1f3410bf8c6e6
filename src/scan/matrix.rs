// FeatureMatrix: locations × access points.
//
// Each row is one wifi scan, each column one access point (MAC address).
// Cells hold signal strength in dBm. An access point that was not seen during
// a scan is stored as NaN until `impute_missing` replaces it.

use serde::Serialize;

/// Signal strength used for "not seen at all" when imputing missing cells.
pub const NO_SIGNAL_DBM: f64 = -100.0;

/// Dense signal-strength matrix with NaN marking missing readings.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureMatrix {
    /// Location label for each row, in file order
    pub labels: Vec<String>,
    /// MAC address for each column, in first-appearance order
    pub access_points: Vec<String>,
    /// `rows[i][j]` is the strength of access point `j` in scan `i`
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn n_locations(&self) -> usize {
        self.rows.len()
    }

    pub fn n_access_points(&self) -> usize {
        self.access_points.len()
    }

    /// Strength at (row, col), or `None` if the access point wasn't seen.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .filter(|v| !v.is_nan())
    }

    /// Number of missing (NaN) cells across the whole matrix.
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.iter())
            .filter(|v| v.is_nan())
            .count()
    }

    /// Number of access points actually seen in the given scan.
    pub fn coverage(&self, row: usize) -> usize {
        self.rows
            .get(row)
            .map(|r| r.iter().filter(|v| !v.is_nan()).count())
            .unwrap_or(0)
    }

    /// Replace every missing cell with `fill`. Returns how many were replaced.
    pub fn impute_missing(&mut self, fill: f64) -> usize {
        let mut replaced = 0;
        for cell in self.rows.iter_mut().flat_map(|r| r.iter_mut()) {
            if cell.is_nan() {
                *cell = fill;
                replaced += 1;
            }
        }
        replaced
    }

    /// Labels suffixed with their row index (`Kitchen_0`, `Kitchen_1`, ...)
    /// so repeated location names stay apart on chart axes.
    pub fn unique_labels(&self) -> Vec<String> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| format!("{label}_{i}"))
            .collect()
    }

    /// Min and max over all finite cells, or `None` if every cell is missing.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .flat_map(|r| r.iter())
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
