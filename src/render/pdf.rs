use super::{format_annotation, RenderError, RenderTask, COLORBAR_CAPTION, X_CAPTION, Y_CAPTION};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb, TextMatrix,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const MM_PER_INCH: f64 = 25.4;
const MM_PER_PT: f64 = 25.4 / 72.0;
const TITLE_FONT_PT: f64 = 18.0;
const COLORBAR_SLICES: usize = 128;

const DARK_BLUE: (f64, f64, f64) = (0.0, 0.0, 139.0 / 255.0);
const BLACK: (f64, f64, f64) = (0.0, 0.0, 0.0);
const WHITE: (f64, f64, f64) = (1.0, 1.0, 1.0);

/// Vector output; the resolution option plays no role here.
pub(super) fn render_pdf(task: &RenderTask, path: &Path) -> Result<(), RenderError> {
    let page_w = task.layout.figure_width * MM_PER_INCH;
    let page_h = task.layout.figure_height * MM_PER_INCH;
    let (doc, page, layer) =
        PdfDocument::new("heatmap", Mm(page_w as f32), Mm(page_h as f32), "heatmap");
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let italic = doc.add_builtin_font(BuiltinFont::HelveticaOblique)?;
    let fonts = Fonts {
        regular,
        bold,
        italic,
    };

    draw(&layer, task, &fonts, page_w, page_h);
    doc.save(&mut BufWriter::new(File::create(path)?))?;
    Ok(())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

fn fill(layer: &PdfLayerReference, (r, g, b): (f64, f64, f64)) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None)));
}

/// Text is centered with a Helvetica width estimate (~0.5 em per glyph);
/// exact metrics are not worth carrying for grid annotations.
fn text_width_mm(text: &str, size_pt: f64) -> f64 {
    text.chars().count() as f64 * size_pt * 0.5 * MM_PER_PT
}

fn centered_text(
    layer: &PdfLayerReference,
    text: &str,
    size_pt: f64,
    cx_mm: f64,
    baseline_mm: f64,
    font: &IndirectFontRef,
) {
    let x = cx_mm - text_width_mm(text, size_pt) / 2.0;
    layer.use_text(
        text,
        size_pt as f32,
        Mm(x as f32),
        Mm(baseline_mm as f32),
        font,
    );
}

fn rotated_text(
    layer: &PdfLayerReference,
    text: &str,
    size_pt: f64,
    x_mm: f64,
    y_mm: f64,
    angle_deg: f64,
    font: &IndirectFontRef,
) {
    layer.begin_text_section();
    layer.set_font(font, size_pt as f32);
    layer.set_text_matrix(TextMatrix::TranslateRotate(
        Mm(x_mm as f32).into_pt(),
        Mm(y_mm as f32).into_pt(),
        angle_deg as f32,
    ));
    layer.write_text(text, font);
    layer.end_text_section();
}

fn draw(layer: &PdfLayerReference, task: &RenderTask, fonts: &Fonts, page_w: f64, page_h: f64) {
    let layout = task.layout;
    let annot_pt = layout.annotation_font_size;
    let tick_pt = layout.tick_font_size;
    let label_pt = layout.label_font_size;
    let cbar_pt = 10.0 * layout.font_scale;
    let line_mm = |points: f64| points * MM_PER_PT;

    // PDF origin is bottom-left; the title margin is measured from the top.
    let title_lines: Vec<&str> = task.title.lines().collect();
    let top = title_lines.len() as f64 * line_mm(TITLE_FONT_PT) * 1.4 + line_mm(TITLE_FONT_PT);
    let row_label_chars = task
        .row_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let left = line_mm(label_pt) * 1.8 + row_label_chars * line_mm(tick_pt) * 0.55;
    let bottom = line_mm(tick_pt) * 2.4 + line_mm(label_pt) * 2.2;
    let bar_w = 0.25 * MM_PER_INCH;
    let right = bar_w + line_mm(tick_pt) * 4.5 + line_mm(cbar_pt) * 1.8;

    let grid_w = (page_w - left - right).max(1.0);
    let grid_h = (page_h - top - bottom).max(1.0);
    let grid_top = page_h - top;
    let nrows = task.data.nrows();
    let ncols = task.data.ncols();
    let cell_w = grid_w / ncols as f64;
    let cell_h = grid_h / nrows as f64;

    // Title block.
    fill(layer, DARK_BLUE);
    for (k, line) in title_lines.iter().enumerate() {
        let baseline = page_h - line_mm(TITLE_FONT_PT) * 1.4 * (k as f64 + 1.0);
        centered_text(layer, line, TITLE_FONT_PT, page_w / 2.0, baseline, &fonts.bold);
    }

    // Cell grid with thin white separators.
    layer.set_outline_color(Color::Rgb(Rgb::new(
        WHITE.0 as f32,
        WHITE.1 as f32,
        WHITE.2 as f32,
        None,
    )));
    layer.set_outline_thickness(0.5);
    for i in 0..nrows {
        for j in 0..ncols {
            let x0 = left + j as f64 * cell_w;
            let y1 = grid_top - i as f64 * cell_h;
            let render_v = task.data.render[[i, j]];
            let (r, g, b) = task.selector.background(render_v);
            fill(
                layer,
                (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0),
            );
            layer.add_rect(
                Rect::new(
                    Mm(x0 as f32),
                    Mm((y1 - cell_h) as f32),
                    Mm((x0 + cell_w) as f32),
                    Mm(y1 as f32),
                )
                .with_mode(PaintMode::FillStroke),
            );
        }
    }

    // Annotations on top of the cells, original values, one decimal.
    for i in 0..nrows {
        for j in 0..ncols {
            let render_v = task.data.render[[i, j]];
            let (r, g, b) = task.selector.pick(render_v).rgb();
            fill(
                layer,
                (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0),
            );
            let cx = left + (j as f64 + 0.5) * cell_w;
            let baseline = grid_top - (i as f64 + 0.5) * cell_h - line_mm(annot_pt) * 0.35;
            centered_text(
                layer,
                &format_annotation(task.data.annot[[i, j]]),
                annot_pt,
                cx,
                baseline,
                &fonts.regular,
            );
        }
    }

    // Row labels, italic, right-aligned.
    fill(layer, DARK_BLUE);
    for (i, label) in task.row_labels.iter().enumerate() {
        let x = left - line_mm(tick_pt) * 0.4 - text_width_mm(label, tick_pt);
        let baseline = grid_top - (i as f64 + 0.5) * cell_h - line_mm(tick_pt) * 0.35;
        layer.use_text(
            label.as_str(),
            tick_pt as f32,
            Mm(x as f32),
            Mm(baseline as f32),
            &fonts.italic,
        );
    }

    // Column labels below the grid, rotated 45 degrees like the
    // conventional layout for long category names.
    for (j, label) in task.col_labels.iter().enumerate() {
        let x = left + (j as f64 + 0.5) * cell_w;
        let y = grid_top - grid_h - line_mm(tick_pt) * 0.8;
        rotated_text(layer, label, tick_pt, x, y, -45.0, &fonts.bold);
    }

    // Axis captions.
    centered_text(
        layer,
        X_CAPTION,
        label_pt,
        left + grid_w / 2.0,
        line_mm(label_pt) * 0.6,
        &fonts.bold,
    );
    rotated_text(
        layer,
        Y_CAPTION,
        label_pt,
        line_mm(label_pt) * 0.9,
        grid_top - grid_h / 2.0 - text_width_mm(Y_CAPTION, label_pt) / 2.0,
        90.0,
        &fonts.bold,
    );

    draw_colorbar(
        layer,
        task,
        fonts,
        left + grid_w + line_mm(tick_pt) * 0.8,
        grid_top,
        bar_w,
        grid_h,
        cbar_pt,
    );
}

fn draw_colorbar(
    layer: &PdfLayerReference,
    task: &RenderTask,
    fonts: &Fonts,
    x: f64,
    top: f64,
    bar_w: f64,
    bar_h: f64,
    font_pt: f64,
) {
    let slice_h = bar_h / COLORBAR_SLICES as f64;
    for s in 0..COLORBAR_SLICES {
        let t = 1.0 - s as f64 / (COLORBAR_SLICES - 1) as f64;
        let (r, g, b) = task.palette.color(t);
        fill(
            layer,
            (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0),
        );
        let y1 = top - s as f64 * slice_h;
        layer.add_rect(
            Rect::new(
                Mm(x as f32),
                Mm((y1 - slice_h) as f32),
                Mm((x + bar_w) as f32),
                Mm(y1 as f32),
            )
            .with_mode(PaintMode::Fill),
        );
    }
    layer.set_outline_color(Color::Rgb(Rgb::new(
        BLACK.0 as f32,
        BLACK.1 as f32,
        BLACK.2 as f32,
        None,
    )));
    layer.set_outline_thickness(0.5);
    layer.add_rect(
        Rect::new(
            Mm(x as f32),
            Mm((top - bar_h) as f32),
            Mm((x + bar_w) as f32),
            Mm(top as f32),
        )
        .with_mode(PaintMode::Stroke),
    );

    let data_min = task.data.render.iter().fold(f64::MAX, |a, &v| a.min(v));
    let data_max = task.data.render.iter().fold(f64::MIN, |a, &v| a.max(v));
    fill(layer, BLACK);
    let label_x = x + bar_w + font_pt * MM_PER_PT * 0.4;
    layer.use_text(
        format_annotation(data_max),
        font_pt as f32,
        Mm(label_x as f32),
        Mm((top - font_pt * MM_PER_PT) as f32),
        &fonts.regular,
    );
    layer.use_text(
        format_annotation(data_min),
        font_pt as f32,
        Mm(label_x as f32),
        Mm((top - bar_h) as f32),
        &fonts.regular,
    );
    rotated_text(
        layer,
        COLORBAR_CAPTION,
        font_pt,
        x + bar_w + font_pt * MM_PER_PT * 4.0,
        top - bar_h / 2.0 - text_width_mm(COLORBAR_CAPTION, font_pt) / 2.0,
        90.0,
        &fonts.regular,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::{ContrastSelector, DEFAULT_CORRECTION};
    use crate::layout::{LayoutOpts, LayoutParameters};
    use crate::normalize::RenderData;
    use crate::palette::Palette;
    use ndarray::array;

    #[test]
    fn test_pdf_smoke() {
        let data = RenderData::new(array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]], false, false);
        let layout = LayoutParameters::plan(3, 2, &LayoutOpts::default());
        let selector =
            ContrastSelector::new(data.render.view(), Palette::Blues, DEFAULT_CORRECTION).unwrap();
        let row_labels = vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()];
        let col_labels = vec!["A".to_string(), "B".to_string()];
        let task = RenderTask {
            title: "Counts\nby group",
            data: &data,
            row_labels: &row_labels,
            col_labels: &col_labels,
            layout: &layout,
            palette: Palette::Blues,
            selector: &selector,
            resolution: 300,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.pdf");
        render_pdf(&task, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
