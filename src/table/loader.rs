use super::errors::LoadError;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Marker substring for summary rows that must not be plotted.
const TOTAL_MARKER: &str = "TOTAL:";

/// Column that carries percentages as text ("42%") and needs its suffix
/// stripped before numeric coercion.
const PERCENT_COLUMN: &str = "% Public";

/// A labeled table as read from a TSV file, after cleaning but before
/// numeric projection. Cells are still strings.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub cells: Vec<Vec<String>>,
}

impl RawTable {
    /// Reads a tab-separated table. First row holds column headers, first
    /// column holds row labels. Blank lines are skipped, rows labeled with
    /// "TOTAL:" are dropped, and a "% Public" column loses its trailing '%'.
    pub fn from_tsv(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = rdr.records();
        let header = loop {
            match records.next() {
                None => return Err(LoadError::MissingHeader),
                Some(record) => {
                    let record = record?;
                    if record.iter().any(|f| !f.trim().is_empty()) {
                        break record;
                    }
                }
            }
        };
        // First header field labels the index column and is not a data column.
        let col_labels: Vec<String> = header.iter().skip(1).map(|s| s.to_string()).collect();
        let ncols = col_labels.len();

        let mut row_labels = Vec::new();
        let mut cells: Vec<Vec<String>> = Vec::new();
        for (i, record) in records.enumerate() {
            let record = record?;
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            let label = record
                .get(0)
                .ok_or(LoadError::MissingRowLabel(i + 2))?
                .to_string();
            if label.contains(TOTAL_MARKER) {
                log::debug!("dropping summary row {:?}", label);
                continue;
            }
            let mut row: Vec<String> = record.iter().skip(1).map(|s| s.to_string()).collect();
            // Ragged rows are padded so every row has one cell per header.
            row.resize(ncols, String::new());
            row_labels.push(label);
            cells.push(row);
        }

        let mut table = Self {
            row_labels,
            col_labels,
            cells,
        };
        table.strip_percent_suffix();
        Ok(table)
    }

    pub fn nrows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn ncols(&self) -> usize {
        self.col_labels.len()
    }

    fn strip_percent_suffix(&mut self) {
        let Some(col) = self.col_labels.iter().position(|c| c == PERCENT_COLUMN) else {
            return;
        };
        for row in self.cells.iter_mut() {
            let cell = &mut row[col];
            if let Some(stripped) = cell.trim().strip_suffix('%') {
                *cell = stripped.trim().to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(input: &str) -> RawTable {
        RawTable::from_reader(input.as_bytes()).unwrap()
    }

    #[test]
    fn test_basic_shape() {
        let table = load("Feature\tA\tB\nx\t1\t2\ny\t3\t4\n");
        assert_eq!(table.row_labels, vec!["x", "y"]);
        assert_eq!(table.col_labels, vec!["A", "B"]);
        assert_eq!(table.cells[1], vec!["3", "4"]);
    }

    #[test]
    fn test_total_rows_dropped() {
        let table = load("Feature\tA\nx\t1\nTOTAL: all\t99\ny\t2\n");
        assert_eq!(table.row_labels, vec!["x", "y"]);
        assert_eq!(table.nrows(), 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = load("Feature\tA\n\nx\t1\n\ny\t2\n");
        assert_eq!(table.nrows(), 2);
    }

    #[test]
    fn test_percent_column_stripped() {
        let table = load("Feature\tCount\t% Public\nx\t10\t25%\ny\t20\t75%\n");
        assert_eq!(table.cells[0][1], "25");
        assert_eq!(table.cells[1][1], "75");
        // Untouched column keeps its text.
        assert_eq!(table.cells[0][0], "10");
    }

    #[test]
    fn test_ragged_rows_padded() {
        let table = load("Feature\tA\tB\nx\t1\n");
        assert_eq!(table.cells[0], vec!["1", ""]);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(RawTable::from_reader("".as_bytes()).is_err());
    }
}
