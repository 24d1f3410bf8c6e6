// Per-location signal strength bar charts, laid out in a grid.
//
// One subplot per scan, `per_row` subplots across. All subplots share the
// same x (access point) and y (dBm) ranges so bar heights are comparable
// between locations. Missing readings simply have no bar.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::FontTransform;

use super::{last_index, segment_edge, segment_label, Chart};
use crate::scan::{FeatureMatrix, NO_SIGNAL_DBM};

const CELL_WIDTH: u32 = 420;
const CELL_HEIGHT: u32 = 360;

/// Grid of bar charts, one per location scan.
pub struct SignalHistogram<'a> {
    pub matrix: &'a FeatureMatrix,
    pub per_row: usize,
}

impl<'a> SignalHistogram<'a> {
    pub fn new(matrix: &'a FeatureMatrix, per_row: usize) -> Self {
        Self {
            matrix,
            per_row: per_row.max(1),
        }
    }
}

/// (rows, cols) of the subplot grid for `n` scans.
pub fn grid_shape(n: usize, per_row: usize) -> (usize, usize) {
    let per_row = per_row.max(1);
    (n.div_ceil(per_row).max(1), per_row)
}

/// Shared y range: covers every finite reading and the 0 dBm baseline,
/// padded by 5% so the longest bar doesn't touch the frame.
pub fn shared_y_range(matrix: &FeatureMatrix) -> (f64, f64) {
    let (lo, hi) = match matrix.finite_range() {
        Some((lo, hi)) => (lo.min(0.0), hi.max(0.0)),
        None => (NO_SIGNAL_DBM, 0.0),
    };
    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = span * 0.05;
    (lo - pad, hi + pad)
}

impl Chart for SignalHistogram<'_> {
    fn size(&self) -> (u32, u32) {
        let (rows, cols) = grid_shape(self.matrix.n_locations(), self.per_row);
        (cols as u32 * CELL_WIDTH, rows as u32 * CELL_HEIGHT)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let matrix = self.matrix;
        let n_ap = matrix.n_access_points();
        let (y_lo, y_hi) = shared_y_range(matrix);
        let cells = root.split_evenly(grid_shape(matrix.n_locations(), self.per_row));

        // split_evenly is row-major, so cell i sits at (i / per_row, i % per_row)
        for (i, (label, area)) in matrix.labels.iter().zip(cells.iter()).enumerate() {
            let mut chart = ChartBuilder::on(area)
                .caption(label, ("sans-serif", 14).into_font())
                .margin(8)
                .x_label_area_size(110)
                .y_label_area_size(50)
                .build_cartesian_2d((0..last_index(n_ap)).into_segmented(), y_lo..y_hi)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(n_ap)
                .x_label_formatter(&|v: &SegmentValue<i32>| {
                    segment_label(v, &matrix.access_points)
                })
                .x_label_style(
                    ("sans-serif", 10)
                        .into_font()
                        .transform(FontTransform::Rotate90),
                )
                .y_desc("dBm")
                .draw()?;

            let bars = matrix.rows[i]
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(j, v)| {
                    Rectangle::new(
                        [
                            (segment_edge(j, n_ap), v.max(0.0)),
                            (segment_edge(j + 1, n_ap), v.min(0.0)),
                        ],
                        BLUE.mix(0.8).filled(),
                    )
                });
            chart.draw_series(bars)?;
        }

        Ok(())
    }
}
