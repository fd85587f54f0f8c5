use super::{format_annotation, RenderError, RenderTask, COLORBAR_CAPTION, X_CAPTION, Y_CAPTION};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, FontTransform};
use std::path::Path;

const DARK_BLUE: RGBColor = RGBColor(0, 0, 139);
const TITLE_FONT_PT: f64 = 18.0;
const CELL_SEPARATOR_PT: f64 = 0.5;
const COLORBAR_SLICES: usize = 128;

pub(super) fn render_png(task: &RenderTask, path: &Path) -> Result<(), RenderError> {
    let dpi = task.resolution as f64;
    let width = (task.layout.figure_width * dpi).round() as u32;
    let height = (task.layout.figure_height * dpi).round() as u32;
    // The backend is scoped to this call; drop releases it even when
    // drawing fails partway.
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    draw(&root, task, dpi)?;
    root.present().map_err(backend)?;
    Ok(())
}

fn backend<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

fn draw(
    root: &DrawingArea<BitMapBackend, Shift>,
    task: &RenderTask,
    dpi: f64,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(backend)?;

    let layout = task.layout;
    let pt = |points: f64| points * dpi / 72.0;
    let annot_px = pt(layout.annotation_font_size);
    let tick_px = pt(layout.tick_font_size);
    let label_px = pt(layout.label_font_size);
    let title_px = pt(TITLE_FONT_PT);
    let cbar_px = pt(10.0 * layout.font_scale);

    let (w, h) = root.dim_in_pixel();
    let (w, h) = (w as f64, h as f64);

    // Margin bookkeeping: title on top, y caption + row labels on the
    // left, column labels + x caption below, colorbar on the right.
    let title_lines: Vec<&str> = task.title.lines().collect();
    let top = title_lines.len() as f64 * title_px * 1.4 + title_px;
    let row_label_chars = task
        .row_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let left = label_px * 1.8 + row_label_chars * tick_px * 0.62 + tick_px * 0.8;
    let bottom = tick_px * 1.8 + label_px * 2.2;
    let bar_w = 0.25 * dpi;
    let right = bar_w + tick_px * 4.5 + cbar_px * 1.8;

    let grid_w = (w - left - right).max(1.0);
    let grid_h = (h - top - bottom).max(1.0);
    let nrows = task.data.nrows();
    let ncols = task.data.ncols();
    let cell_w = grid_w / ncols as f64;
    let cell_h = grid_h / nrows as f64;
    let sep = (pt(CELL_SEPARATOR_PT).round() as u32).max(1);

    // Title, dark blue and bold, one line per literal "\n".
    for (k, line) in title_lines.iter().enumerate() {
        let style = ("sans-serif", title_px as i32)
            .into_font()
            .style(FontStyle::Bold)
            .color(&DARK_BLUE)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(
            line.to_string(),
            ((w / 2.0) as i32, (title_px * 0.5 + k as f64 * title_px * 1.4) as i32),
            style,
        ))
        .map_err(backend)?;
    }

    // Cells: background by render value, annotation from the original
    // value with the selector's text color.
    let annot_pos = Pos::new(HPos::Center, VPos::Center);
    for i in 0..nrows {
        for j in 0..ncols {
            let x0 = (left + j as f64 * cell_w) as i32;
            let x1 = (left + (j + 1) as f64 * cell_w) as i32;
            let y0 = (top + i as f64 * cell_h) as i32;
            let y1 = (top + (i + 1) as f64 * cell_h) as i32;
            let render_v = task.data.render[[i, j]];
            let (r, g, b) = task.selector.background(render_v);
            root.draw(&Rectangle::new(
                [(x0, y0), (x1, y1)],
                RGBColor(r, g, b).filled(),
            ))
            .map_err(backend)?;
            root.draw(&Rectangle::new(
                [(x0, y0), (x1, y1)],
                WHITE.stroke_width(sep),
            ))
            .map_err(backend)?;

            let (tr, tg, tb) = task.selector.pick(render_v).rgb();
            let style = ("sans-serif", annot_px as i32)
                .into_font()
                .color(&RGBColor(tr, tg, tb))
                .pos(annot_pos);
            root.draw(&Text::new(
                format_annotation(task.data.annot[[i, j]]),
                ((x0 + x1) / 2, (y0 + y1) / 2),
                style,
            ))
            .map_err(backend)?;
        }
    }

    // Row labels, italic, right-aligned against the grid.
    for (i, label) in task.row_labels.iter().enumerate() {
        let style = ("sans-serif", tick_px as i32)
            .into_font()
            .style(FontStyle::Italic)
            .color(&DARK_BLUE)
            .pos(Pos::new(HPos::Right, VPos::Center));
        root.draw(&Text::new(
            label.clone(),
            (
                (left - tick_px * 0.5) as i32,
                (top + (i as f64 + 0.5) * cell_h) as i32,
            ),
            style,
        ))
        .map_err(backend)?;
    }

    // Column labels under the grid.
    for (j, label) in task.col_labels.iter().enumerate() {
        let style = ("sans-serif", tick_px as i32)
            .into_font()
            .style(FontStyle::Bold)
            .color(&DARK_BLUE)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(
            label.clone(),
            (
                (left + (j as f64 + 0.5) * cell_w) as i32,
                (top + grid_h + tick_px * 0.4) as i32,
            ),
            style,
        ))
        .map_err(backend)?;
    }

    // Axis captions.
    let style = ("sans-serif", label_px as i32)
        .into_font()
        .style(FontStyle::Bold)
        .color(&DARK_BLUE)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    root.draw(&Text::new(
        X_CAPTION,
        ((left + grid_w / 2.0) as i32, (h - label_px * 0.4) as i32),
        style,
    ))
    .map_err(backend)?;
    let style = ("sans-serif", label_px as i32)
        .into_font()
        .style(FontStyle::Bold)
        .transform(FontTransform::Rotate270)
        .color(&DARK_BLUE)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        Y_CAPTION,
        ((label_px * 0.9) as i32, (top + grid_h / 2.0) as i32),
        style,
    ))
    .map_err(backend)?;

    draw_colorbar(root, task, left + grid_w + tick_px * 0.8, top, bar_w, grid_h, cbar_px)
}

/// Vertical reference ramp at the right edge, max on top.
fn draw_colorbar(
    root: &DrawingArea<BitMapBackend, Shift>,
    task: &RenderTask,
    x: f64,
    y: f64,
    bar_w: f64,
    bar_h: f64,
    font_px: f64,
) -> Result<(), RenderError> {
    let slice_h = bar_h / COLORBAR_SLICES as f64;
    for s in 0..COLORBAR_SLICES {
        let t = 1.0 - s as f64 / (COLORBAR_SLICES - 1) as f64;
        let (r, g, b) = task.palette.color(t);
        let y0 = (y + s as f64 * slice_h) as i32;
        let y1 = (y + (s + 1) as f64 * slice_h) as i32;
        root.draw(&Rectangle::new(
            [(x as i32, y0), ((x + bar_w) as i32, y1)],
            RGBColor(r, g, b).filled(),
        ))
        .map_err(backend)?;
    }
    root.draw(&Rectangle::new(
        [(x as i32, y as i32), ((x + bar_w) as i32, (y + bar_h) as i32)],
        BLACK.stroke_width(1),
    ))
    .map_err(backend)?;

    let data_min = task.data.render.iter().fold(f64::MAX, |a, &v| a.min(v));
    let data_max = task.data.render.iter().fold(f64::MIN, |a, &v| a.max(v));
    for (value, vpos, ty) in [
        (data_max, VPos::Top, y),
        (data_min, VPos::Bottom, y + bar_h),
    ] {
        let style = ("sans-serif", font_px as i32)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, vpos));
        root.draw(&Text::new(
            format_annotation(value),
            ((x + bar_w + font_px * 0.4) as i32, ty as i32),
            style,
        ))
        .map_err(backend)?;
    }

    let style = ("sans-serif", font_px as i32)
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        COLORBAR_CAPTION,
        (
            (x + bar_w + font_px * 3.2) as i32,
            (y + bar_h / 2.0) as i32,
        ),
        style,
    ))
    .map_err(backend)?;
    Ok(())
}
