// heatmap-tables/src/render/mod.rs

mod pdf;
mod png;

use crate::contrast::ContrastSelector;
use crate::layout::LayoutParameters;
use crate::normalize::RenderData;
use crate::palette::Palette;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Captions around the grid, fixed by convention.
const X_CAPTION: &str = "Data Categories";
const Y_CAPTION: &str = "Features";
const COLORBAR_CAPTION: &str = "Count";

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Png,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
        }
    }
}

/// Everything one render needs, borrowed from the pipeline stages.
/// Nothing here is mutated by drawing.
pub struct RenderTask<'a> {
    pub title: &'a str,
    pub data: &'a RenderData,
    pub row_labels: &'a [String],
    pub col_labels: &'a [String],
    pub layout: &'a LayoutParameters,
    pub palette: Palette,
    pub selector: &'a ContrastSelector,
    /// Raster density in DPI; ignored by the vector backend.
    pub resolution: u32,
}

/// The output file sits next to the input, extension swapped.
pub fn output_path(data_path: &Path, format: OutputFormat) -> PathBuf {
    data_path.with_extension(format.extension())
}

/// Annotations show the pre-normalization value with one decimal.
pub(crate) fn format_annotation(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn render(task: &RenderTask, path: &Path, format: OutputFormat) -> Result<(), RenderError> {
    log::info!(
        "rendering {}x{} grid to {} ({:?})",
        task.data.nrows(),
        task.data.ncols(),
        path.display(),
        format
    );
    match format {
        OutputFormat::Png => png::render_png(task, path),
        OutputFormat::Pdf => pdf::render_pdf(task, path),
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
    // The plotters error type is generic over the backend, so it is
    // carried as its display form.
    #[error("Drawing failed: {0}")]
    Backend(String),
    #[error("PDF error: {0}")]
    PdfError(#[from] printpdf::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_swaps_extension() {
        let path = Path::new("/tmp/counts.tsv");
        assert_eq!(
            output_path(path, OutputFormat::Png),
            PathBuf::from("/tmp/counts.png")
        );
        assert_eq!(
            output_path(path, OutputFormat::Pdf),
            PathBuf::from("/tmp/counts.pdf")
        );
    }

    #[test]
    fn test_annotation_format_one_decimal() {
        assert_eq!(format_annotation(3.0), "3.0");
        assert_eq!(format_annotation(2.25), "2.2");
        assert_eq!(format_annotation(-1.07), "-1.1");
    }
}
