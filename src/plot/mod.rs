// Chart rendering: signal histogram grid and similarity heatmap.
//
// Charts are drawn against a generic plotters backend and written to disk.
// The file extension picks the backend: `.svg` for vector output, anything
// else goes through the bitmap encoder as PNG.

pub mod colormap;
pub mod heatmap;
pub mod histogram;

use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::info;

use crate::scan::FeatureMatrix;
use crate::similarity::SimilarityMatrix;

pub use heatmap::SimilarityHeatmap;
pub use histogram::SignalHistogram;

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Infer the format from a file extension (case-insensitive). Defaults to PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => anyhow::bail!("unknown image format {other:?} (expected png or svg)"),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Something that can draw itself onto any plotters backend.
pub trait Chart {
    /// Canvas size in pixels.
    fn size(&self) -> (u32, u32);

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>;
}

/// Render a chart to `path`, creating parent directories as needed.
pub fn render<C: Chart>(chart: &C, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let size = chart.size();
    match ImageFormat::from_path(path) {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            chart
                .draw(&root)
                .and_then(|_| root.present())
                .map_err(|e| anyhow::anyhow!("failed to render {}: {e}", path.display()))?;
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            chart
                .draw(&root)
                .and_then(|_| root.present())
                .map_err(|e| anyhow::anyhow!("failed to render {}: {e}", path.display()))?;
        }
    }

    info!(path = %path.display(), width = size.0, height = size.1, "Chart written");
    Ok(())
}

/// Render the per-scan signal strength grid to `path`.
pub fn plot_signal_histogram(matrix: &FeatureMatrix, per_row: usize, path: &Path) -> Result<()> {
    render(&SignalHistogram::new(matrix, per_row), path)
}

/// Render the location similarity heatmap to `path`.
pub fn plot_similarity_heatmap(similarity: &SimilarityMatrix, path: &Path) -> Result<()> {
    render(&SimilarityHeatmap::new(similarity), path)
}

/// Highest index on an `n`-segment discrete axis.
///
/// Integer ranges in plotters are inclusive when segmented, so `0..=n-1`
/// yields exactly `n` segments.
pub(crate) fn last_index(n: usize) -> i32 {
    n.max(1) as i32 - 1
}

/// Left edge of segment `idx` on an `n`-segment axis. The right edge of the
/// final segment is the axis end.
pub(crate) fn segment_edge(idx: usize, n: usize) -> SegmentValue<i32> {
    if idx >= n {
        SegmentValue::Last
    } else {
        SegmentValue::Exact(idx as i32)
    }
}

/// Tick label for a segment center, looked up in `names`.
pub(crate) fn segment_label(value: &SegmentValue<i32>, names: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| names.get(i))
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path(Path::new("a/b.svg")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.SVG")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("noext")), ImageFormat::Png);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ImageFormat::parse("SVG").unwrap(), ImageFormat::Svg);
        assert!(ImageFormat::parse("gif").is_err());
    }

    #[test]
    fn test_segment_label() {
        let names = vec!["aa".to_string(), "bb".to_string()];
        assert_eq!(segment_label(&SegmentValue::CenterOf(1), &names), "bb");
        assert_eq!(segment_label(&SegmentValue::CenterOf(5), &names), "");
        assert_eq!(segment_label(&SegmentValue::CenterOf(-1), &names), "");
        assert_eq!(segment_label(&SegmentValue::Exact(0), &names), "");
    }

    #[test]
    fn test_segment_edge() {
        assert!(matches!(segment_edge(0, 3), SegmentValue::Exact(0)));
        assert!(matches!(segment_edge(2, 3), SegmentValue::Exact(2)));
        assert!(matches!(segment_edge(3, 3), SegmentValue::Last));
        assert_eq!(last_index(0), 0);
        assert_eq!(last_index(4), 3);
    }
}
