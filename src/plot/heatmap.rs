// Similarity heatmap with a colorbar.
//
// Cell (i, j) is colored by the similarity between locations i and j on the
// Blues scale, normalized to the matrix's own min..max. Row 0 is drawn at the
// top, matching how the matrix reads when printed.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::FontTransform;

use super::colormap::{blues, normalize};
use super::{last_index, segment_edge, segment_label, Chart};
use crate::similarity::SimilarityMatrix;

const COLORBAR_WIDTH: u32 = 110;
const LABEL_AREA: u32 = 140;
const COLORBAR_STEPS: usize = 100;

pub struct SimilarityHeatmap<'a> {
    pub similarity: &'a SimilarityMatrix,
    pub title: String,
}

impl<'a> SimilarityHeatmap<'a> {
    pub fn new(similarity: &'a SimilarityMatrix) -> Self {
        Self {
            similarity,
            title: "Cosine Similarity".to_string(),
        }
    }
}

/// Color scale bounds. A flat matrix gets a unit-wide range around its value
/// so the colorbar still has an axis.
pub fn color_range(similarity: &SimilarityMatrix) -> (f64, f64) {
    match similarity.range() {
        Some((lo, hi)) if hi - lo > f64::EPSILON => (lo, hi),
        Some((v, _)) => (v - 0.5, v + 0.5),
        None => (0.0, 1.0),
    }
}

impl Chart for SimilarityHeatmap<'_> {
    fn size(&self) -> (u32, u32) {
        let side = (LABEL_AREA + 40 * self.similarity.len() as u32).clamp(600, 2400);
        (side + COLORBAR_WIDTH, side)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let n = self.similarity.len();
        let labels = &self.similarity.labels;
        let (lo, hi) = color_range(self.similarity);

        let (width, _) = root.dim_in_pixel();
        let (main, bar) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

        let mut chart = ChartBuilder::on(&main)
            .caption(&self.title, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(LABEL_AREA)
            .y_label_area_size(LABEL_AREA)
            .build_cartesian_2d(
                (0..last_index(n)).into_segmented(),
                (0..last_index(n)).into_segmented(),
            )?;

        // y segment k shows row n-1-k so that row 0 lands on top
        let flipped_label = |v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(k) => {
                let row = last_index(n) - *k;
                segment_label(&SegmentValue::CenterOf(row), labels)
            }
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n)
            .y_labels(n)
            .x_label_formatter(&|v: &SegmentValue<i32>| segment_label(v, labels))
            .y_label_formatter(&flipped_label)
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_style(("sans-serif", 12).into_font())
            .draw()?;

        let cells = self.similarity.values.iter().enumerate().flat_map(|(i, row)| {
            let y = n - 1 - i;
            row.iter().enumerate().map(move |(j, v)| {
                Rectangle::new(
                    [
                        (segment_edge(j, n), segment_edge(y + 1, n)),
                        (segment_edge(j + 1, n), segment_edge(y, n)),
                    ],
                    blues(normalize(*v, lo, hi)).filled(),
                )
            })
        });
        chart.draw_series(cells)?;

        // Colorbar: a vertical strip of the scale with value ticks
        let mut bar_chart = ChartBuilder::on(&bar)
            .margin_top(50)
            .margin_bottom(LABEL_AREA)
            .margin_right(10)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..1.0, lo..hi)?;

        bar_chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .y_label_formatter(&|v: &f64| format!("{v:.2}"))
            .draw()?;

        let step = (hi - lo) / COLORBAR_STEPS as f64;
        bar_chart.draw_series((0..COLORBAR_STEPS).map(|k| {
            let y0 = lo + step * k as f64;
            Rectangle::new(
                [(0.0, y0 + step), (1.0, y0)],
                blues(k as f64 / (COLORBAR_STEPS - 1) as f64).filled(),
            )
        }))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(values: Vec<Vec<f64>>) -> SimilarityMatrix {
        SimilarityMatrix {
            measure: "cosine".to_string(),
            labels: (0..values.len()).map(|i| format!("loc{i}")).collect(),
            values,
        }
    }

    #[test]
    fn test_color_range_uses_data_bounds() {
        let m = matrix(vec![vec![1.0, 0.6], vec![0.6, 1.0]]);
        assert_eq!(color_range(&m), (0.6, 1.0));
    }

    #[test]
    fn test_color_range_flat_matrix() {
        let m = matrix(vec![vec![1.0]]);
        assert_eq!(color_range(&m), (0.5, 1.5));
    }

    #[test]
    fn test_size_has_colorbar_and_floor() {
        let m = matrix(vec![vec![1.0]]);
        let chart = SimilarityHeatmap::new(&m);
        assert_eq!(chart.size(), (600 + COLORBAR_WIDTH, 600));
    }
}
