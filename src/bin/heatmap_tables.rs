use clap::Parser;
use heatmap_tables::contrast::ContrastSelector;
use heatmap_tables::layout::{LayoutOpts, LayoutParameters, SizeClass};
use heatmap_tables::normalize::RenderData;
use heatmap_tables::palette::Palette;
use heatmap_tables::render::{self, OutputFormat, RenderTask};
use heatmap_tables::table::{NumericTable, RawTable};
use pretty_env_logger;
use std::process::ExitCode;
use std::{error::Error, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    about = "Generate a heatmap from a TSV file containing numeric data",
    long_about = None,
    version = env!("HEATMAP_TABLES_VERSION")
)]
struct Cli {
    /// Title for the heatmap (use '\n' for new lines)
    #[clap(short, long)]
    title: String,

    /// Path to the TSV file containing numeric data with headers
    #[clap(short, long)]
    data: PathBuf,

    /// Output file format
    #[clap(short, long, default_value = "png")]
    format: OutputFormat,

    /// Resolution for PNG output in DPI (ignored for PDF)
    #[clap(short, long, default_value = "300")]
    resolution: u32,

    /// Override preset font sizes (optional)
    #[clap(short, long)]
    size: Option<SizeClass>,

    /// Font color mean correction value, used by sequential palettes
    #[clap(short, long, default_value = "2.0")]
    correction: f64,

    /// Color scheme for the heatmap
    #[clap(short, long, default_value = "Blues")]
    palette: Palette,

    /// Min-max scale each row to [0, 1] before coloring
    #[clap(long, action)]
    normalize_rows: bool,

    /// Min-max scale each column to [0, 1] before coloring (applied after
    /// row scaling when both are set)
    #[clap(long, action)]
    normalize_columns: bool,

    /// Explicit annotation font size in points
    #[clap(long)]
    cell_font_size: Option<f64>,
}

fn entrypoint() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let title = cli.title.replace("\\n", "\n");

    let raw = RawTable::from_tsv(&cli.data)
        .map_err(|e| format!("Could not load data file: {}", e))?;
    let numeric =
        NumericTable::try_from(&raw).map_err(|e| format!("Data processing failed: {}", e))?;

    let output_path = render::output_path(&cli.data, cli.format);
    // Color computation and drawing are best-effort: a failure here is
    // reported but does not fail the process, and the canvas is released
    // either way.
    match generate(&cli, &title, numeric, &output_path) {
        Ok(()) => println!("Wrote {}", output_path.display()),
        Err(e) => eprintln!("[Error] Heatmap generation failed: {}", e),
    }
    Ok(())
}

fn generate(
    cli: &Cli,
    title: &str,
    numeric: NumericTable,
    output_path: &PathBuf,
) -> Result<(), Box<dyn Error>> {
    let NumericTable {
        row_labels,
        col_labels,
        values,
    } = numeric;
    let data = RenderData::new(values, cli.normalize_rows, cli.normalize_columns);
    let opts = LayoutOpts {
        size: cli.size,
        cell_font_size: cli.cell_font_size,
    };
    let layout = LayoutParameters::plan(data.nrows(), data.ncols(), &opts);
    let selector = ContrastSelector::new(data.render.view(), cli.palette, cli.correction)?;
    let task = RenderTask {
        title,
        data: &data,
        row_labels: &row_labels,
        col_labels: &col_labels,
        layout: &layout,
        palette: cli.palette,
        selector: &selector,
        resolution: cli.resolution,
    };
    render::render(&task, output_path, cli.format)?;
    Ok(())
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("[Error] {}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
