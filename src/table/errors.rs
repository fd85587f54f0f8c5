// heatmap-tables/src/table/errors.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Input table has no header row")]
    MissingHeader,
    #[error("Data row {0} has no label field")]
    MissingRowLabel(usize),
}

#[derive(Error, Debug)]
pub enum CleaningError {
    #[error("Table has no data rows left after cleaning")]
    EmptyTable,
    #[error("Table has no numeric columns")]
    NoNumericColumns,
}
