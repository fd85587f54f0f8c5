use clap::ValueEnum;

/// Tables beyond either cutoff get the compact "large" styling.
const LARGE_ROW_CUTOFF: usize = 50;
const LARGE_COL_CUTOFF: usize = 6;

/// Canvas floors in inches; small tables still get a legible page.
const MIN_FIGURE_WIDTH: f64 = 8.5;
const MIN_FIGURE_HEIGHT: f64 = 11.0;
const INCHES_PER_COL: f64 = 0.5;
const INCHES_PER_ROW: f64 = 0.3;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Large,
}

/// Explicit user overrides; anything left `None` falls back to the value
/// inferred from the table shape. Overrides are resolved last.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutOpts {
    pub size: Option<SizeClass>,
    pub cell_font_size: Option<f64>,
}

/// Figure dimensions and font sizes for one render. Computed once,
/// immutable afterwards. Dimensions are in inches, font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParameters {
    pub figure_width: f64,
    pub figure_height: f64,
    pub font_scale: f64,
    pub annotation_font_size: f64,
    pub label_font_size: f64,
    pub tick_font_size: f64,
}

impl LayoutParameters {
    pub fn plan(nrows: usize, ncols: usize, opts: &LayoutOpts) -> Self {
        let is_large_auto = nrows > LARGE_ROW_CUTOFF || ncols > LARGE_COL_CUTOFF;
        let is_large = match opts.size {
            Some(SizeClass::Large) => true,
            Some(SizeClass::Small) => false,
            None => is_large_auto,
        };
        let (font_scale, annotation_default) = if is_large { (1.0, 8.0) } else { (1.2, 12.0) };
        let annotation_font_size = opts.cell_font_size.unwrap_or(annotation_default);
        log::debug!(
            "layout: {}x{} is_large={} (auto={}) annot={}pt",
            nrows,
            ncols,
            is_large,
            is_large_auto,
            annotation_font_size
        );
        Self {
            figure_width: MIN_FIGURE_WIDTH.max(ncols as f64 * INCHES_PER_COL),
            figure_height: MIN_FIGURE_HEIGHT.max(nrows as f64 * INCHES_PER_ROW),
            font_scale,
            annotation_font_size,
            label_font_size: 12.0,
            tick_font_size: 12.0,
        }
    }
}
