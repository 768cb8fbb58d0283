//! Immutable table snapshots

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::value::CellValue;

/// One table row: cell values positionally aligned with the column list.
///
/// Invariant: every row holds exactly `columns.len()` cells.
pub type Row = Vec<CellValue>;

/// A table state at one point in time.
///
/// Snapshots are treated as values: every engine operation takes a
/// snapshot by reference and returns a fresh one. Callers never observe
/// partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,
}

impl TableSnapshot {
    /// Create a snapshot from rows and columns
    pub fn new(rows: Vec<Row>, columns: Vec<Column>) -> Self {
        Self { rows, columns }
    }

    /// An empty table with no columns
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Find the index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// All values of one column, cloned in row order
    pub fn column_values(&self, index: usize) -> Vec<CellValue> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).cloned())
            .collect()
    }

    /// Display strings of one column, in row order
    pub fn column_strings(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).map(|v| v.to_string()))
            .collect()
    }

    /// Numerically coerced values of one column.
    ///
    /// Cells that fail coercion are dropped, so the result may be
    /// shorter than the row count.
    pub fn numeric_column(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).and_then(|v| v.as_number()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    fn sample() -> TableSnapshot {
        TableSnapshot::new(
            vec![
                vec![CellValue::Number(1.0), CellValue::from("a")],
                vec![CellValue::from("2"), CellValue::from("b")],
                vec![CellValue::Null, CellValue::from("c")],
            ],
            vec![
                Column::new("x", ColumnType::Number),
                Column::new("label", ColumnType::Text),
            ],
        )
    }

    #[test]
    fn test_column_lookup() {
        let snap = sample();
        assert_eq!(snap.column_index("x"), Some(0));
        assert_eq!(snap.column_index("label"), Some(1));
        assert_eq!(snap.column_index("missing"), None);
    }

    #[test]
    fn test_numeric_column_drops_failures() {
        let snap = sample();
        // "2" coerces, Null does not
        assert_eq!(snap.numeric_column(0), vec![1.0, 2.0]);
        assert!(snap.numeric_column(1).is_empty());
    }

    #[test]
    fn test_column_strings() {
        let snap = sample();
        assert_eq!(snap.column_strings(1), vec!["a", "b", "c"]);
    }
}
