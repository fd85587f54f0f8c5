use super::errors::CleaningError;
use super::loader::RawTable;
use ndarray::Array2;

/// The numeric view of a [`RawTable`]: only columns where every non-empty
/// cell parses as a number survive, and every cell inside a surviving
/// column is coerced to a finite f64 (blanks and bad parses become 0.0).
#[derive(Debug, Clone)]
pub struct NumericTable {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub values: Array2<f64>,
}

impl NumericTable {
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }
}

impl TryFrom<&RawTable> for NumericTable {
    type Error = CleaningError;

    fn try_from(raw: &RawTable) -> Result<Self, Self::Error> {
        if raw.nrows() == 0 {
            return Err(CleaningError::EmptyTable);
        }
        let numeric_cols: Vec<usize> = (0..raw.ncols())
            .filter(|&c| is_numeric_column(raw, c))
            .collect();
        if numeric_cols.is_empty() {
            return Err(CleaningError::NoNumericColumns);
        }
        log::debug!(
            "projected {} of {} columns as numeric",
            numeric_cols.len(),
            raw.ncols()
        );

        let mut values = Array2::zeros((raw.nrows(), numeric_cols.len()));
        for (i, row) in raw.cells.iter().enumerate() {
            for (j, &c) in numeric_cols.iter().enumerate() {
                values[[i, j]] = coerce(&row[c]);
            }
        }
        let col_labels = numeric_cols
            .iter()
            .map(|&c| raw.col_labels[c].clone())
            .collect();
        Ok(Self {
            row_labels: raw.row_labels.clone(),
            col_labels,
            values,
        })
    }
}

/// A column counts as numeric when every non-empty cell parses as f64.
/// A single text cell excludes the whole column.
fn is_numeric_column(raw: &RawTable, col: usize) -> bool {
    raw.cells.iter().all(|row| {
        let cell = row[col].trim();
        cell.is_empty() || cell.parse::<f64>().is_ok()
    })
}

/// Individual cell coercion never fails; anything unparseable or
/// non-finite is rendered as 0.0.
fn coerce(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(input: &str) -> RawTable {
        RawTable::from_reader(input.as_bytes()).unwrap()
    }

    #[test]
    fn test_selects_only_numeric_columns() {
        let table = raw("Feature\tName\tCount\nx\tfoo\t1\ny\tbar\t2\n");
        let numeric = NumericTable::try_from(&table).unwrap();
        assert_eq!(numeric.col_labels, vec!["Count"]);
        assert_eq!(numeric.values.shape(), &[2, 1]);
        assert_eq!(numeric.values[[1, 0]], 2.0);
    }

    #[test]
    fn test_blank_cells_become_zero() {
        let table = raw("Feature\tA\tB\nx\t1\t\ny\t\t4\n");
        let numeric = NumericTable::try_from(&table).unwrap();
        assert_eq!(numeric.values[[0, 1]], 0.0);
        assert_eq!(numeric.values[[1, 0]], 0.0);
        assert_eq!(numeric.values[[1, 1]], 4.0);
    }

    #[test]
    fn test_all_cells_finite() {
        let table = raw("Feature\tA\nx\tNaN\ny\tinf\nz\t3\n");
        let numeric = NumericTable::try_from(&table).unwrap();
        assert!(numeric.values.iter().all(|v| v.is_finite()));
        assert_eq!(numeric.values[[0, 0]], 0.0);
        assert_eq!(numeric.values[[1, 0]], 0.0);
    }

    #[test]
    fn test_no_numeric_columns_is_error() {
        let table = raw("Feature\tName\nx\tfoo\n");
        assert!(matches!(
            NumericTable::try_from(&table),
            Err(CleaningError::NoNumericColumns)
        ));
    }

    #[test]
    fn test_empty_table_is_error() {
        let table = raw("Feature\tA\nTOTAL: everything\t5\n");
        assert!(matches!(
            NumericTable::try_from(&table),
            Err(CleaningError::EmptyTable)
        ));
    }

    #[test]
    fn test_percent_column_is_numeric_after_strip() {
        let table = raw("Feature\tCount\t% Public\nx\t10\t25%\ny\t20\t75%\n");
        let numeric = NumericTable::try_from(&table).unwrap();
        assert_eq!(numeric.col_labels, vec!["Count", "% Public"]);
        assert_eq!(numeric.values[[0, 1]], 25.0);
    }
}
