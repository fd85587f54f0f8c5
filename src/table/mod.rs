// heatmap-tables/src/table/mod.rs

mod errors;
mod loader;
mod projector;

pub use errors::{CleaningError, LoadError};
pub use loader::RawTable;
pub use projector::NumericTable;
