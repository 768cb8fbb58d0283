//! Column descriptors

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// The inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Mostly numeric values
    Number,
    /// Free-form text
    Text,
    /// Mostly date-like values
    DateTime,
    /// No usable sample (every value was empty)
    Unknown,
}

/// A column descriptor paired positionally with row cells.
///
/// Within a snapshot, column identity is by index: `row[i]` belongs to
/// `columns[i]`. Names are unique within a table. Descriptors are not
/// mutated after creation; schema changes replace the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within a table
    pub name: String,

    /// Inferred or derived type
    pub data_type: ColumnType,

    /// First few raw values observed during inference, kept for preview
    pub sample_values: Vec<CellValue>,
}

impl Column {
    /// Create a column with no retained sample values
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
            sample_values: Vec::new(),
        }
    }

    /// Attach preview sample values
    pub fn with_samples(mut self, sample_values: Vec<CellValue>) -> Self {
        self.sample_values = sample_values;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_construction() {
        let col = Column::new("price", ColumnType::Number)
            .with_samples(vec![CellValue::Number(1.0), CellValue::Number(2.0)]);
        assert_eq!(col.name, "price");
        assert_eq!(col.data_type, ColumnType::Number);
        assert_eq!(col.sample_values.len(), 2);
    }
}
