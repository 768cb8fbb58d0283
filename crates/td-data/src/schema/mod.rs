//! Column type inference from value samples

use once_cell::sync::Lazy;
use regex::Regex;

use td_core::{CellValue, Column, ColumnType, Row};

/// Default number of leading rows used as the classification sample
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// How many raw values each column keeps for preview
const PREVIEW_VALUES: usize = 5;

/// Share of non-empty sample values that must match for a type to win
const TYPE_THRESHOLD: f64 = 0.8;

// Fast-reject layout patterns for date-like strings. A pattern match
// alone is not sufficient; the string must also parse to a valid
// instant.
static DATE_LAYOUTS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap(), // YYYY-MM-DD...
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}").unwrap(), // MM/DD/YYYY...
        Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}").unwrap(), // DD-MM-YYYY...
        Regex::new(r"^\d{4}/\d{2}/\d{2}").unwrap(), // YYYY/MM/DD...
    ]
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Classifies columns from a leading-row sample.
///
/// NUMBER is tested before DATETIME, each at its own independent
/// threshold, so a column that is 85% numeric is NUMBER even if every
/// value also looks date-like.
pub struct TypeInferencer {
    sample_size: usize,
}

impl Default for TypeInferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInferencer {
    pub fn new() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    /// Override the sample size
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Infer a column descriptor per header.
    ///
    /// Takes the first `sample_size` rows (not a random sample). Values
    /// that are null or exactly the empty string are discarded before
    /// classification; numeric NaN is kept and classifies as neither
    /// numeric nor date-like. Pure function, no error paths: malformed
    /// values simply fail to match.
    pub fn infer(&self, headers: &[String], rows: &[Row]) -> Vec<Column> {
        let sample: Vec<&Row> = rows.iter().take(self.sample_size).collect();

        headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let observed: Vec<&CellValue> =
                    sample.iter().filter_map(|row| row.get(idx)).collect();

                let preview = observed
                    .iter()
                    .take(PREVIEW_VALUES)
                    .map(|v| (*v).clone())
                    .collect();

                let values: Vec<&CellValue> = observed
                    .into_iter()
                    .filter(|v| !discard_for_classification(v))
                    .collect();

                Column::new(name.clone(), classify(&values)).with_samples(preview)
            })
            .collect()
    }
}

/// Convenience wrapper with the default sample size
pub fn infer_column_types(headers: &[String], rows: &[Row]) -> Vec<Column> {
    TypeInferencer::new().infer(headers, rows)
}

/// Null and the exact empty string leave the sample; everything else
/// (including NaN) stays and counts against the thresholds.
fn discard_for_classification(value: &CellValue) -> bool {
    match value {
        CellValue::Null => true,
        CellValue::Text(s) => s.is_empty(),
        _ => false,
    }
}

fn classify(values: &[&CellValue]) -> ColumnType {
    if values.is_empty() {
        return ColumnType::Unknown;
    }

    let total = values.len() as f64;
    let numeric = values.iter().filter(|v| v.as_number().is_some()).count() as f64;
    if numeric / total >= TYPE_THRESHOLD {
        return ColumnType::Number;
    }

    let date_like = values.iter().filter(|v| is_date_like(v)).count() as f64;
    if date_like / total >= TYPE_THRESHOLD {
        return ColumnType::DateTime;
    }

    ColumnType::Text
}

/// A native date-time is always date-like; a string must match one of
/// the four layout patterns and then actually parse.
fn is_date_like(value: &CellValue) -> bool {
    match value {
        CellValue::DateTime(_) => true,
        CellValue::Text(s) => {
            DATE_LAYOUTS.iter().any(|re| re.is_match(s)) && parses_as_date(s)
        }
        _ => false,
    }
}

fn parses_as_date(s: &str) -> bool {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .any(|fmt| chrono::NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| chrono::NaiveDate::parse_from_str(s, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(column: Vec<CellValue>) -> Vec<Row> {
        column.into_iter().map(|v| vec![v]).collect()
    }

    fn headers() -> Vec<String> {
        vec!["col".to_string()]
    }

    #[test]
    fn test_numeric_majority_wins() {
        // 80%+ parseable numbers, remainder arbitrary
        let mut cells: Vec<CellValue> = (0..9).map(|i| CellValue::from(format!("{}", i))).collect();
        cells.push(CellValue::from("not a number"));
        let cols = infer_column_types(&headers(), &rows_of(cells));
        assert_eq!(cols[0].data_type, ColumnType::Number);
    }

    #[test]
    fn test_comma_separated_numbers_count_as_numeric() {
        let cells = vec![
            CellValue::from("1,000"),
            CellValue::from("2,500.5"),
            CellValue::from("3,000"),
        ];
        let cols = infer_column_types(&headers(), &rows_of(cells));
        assert_eq!(cols[0].data_type, ColumnType::Number);
    }

    #[test]
    fn test_number_tested_before_date() {
        // Plain integers never match the date layouts, but a column of
        // date strings that also parse as numbers cannot exist; instead
        // verify the ordering with values that are 100% numeric.
        let cells = vec![CellValue::from("20200101"), CellValue::from("20200102")];
        let cols = infer_column_types(&headers(), &rows_of(cells));
        assert_eq!(cols[0].data_type, ColumnType::Number);
    }

    #[test]
    fn test_date_strings_classify_as_datetime() {
        let cells = vec![
            CellValue::from("2024-01-15"),
            CellValue::from("2024-02-20 08:30:00"),
            CellValue::from("2024-03-01"),
        ];
        let cols = infer_column_types(&headers(), &rows_of(cells));
        assert_eq!(cols[0].data_type, ColumnType::DateTime);
    }

    #[test]
    fn test_pattern_match_alone_is_not_enough() {
        // Matches the YYYY-MM-DD layout but is not a real date
        let cells = vec![
            CellValue::from("9999-99-99"),
            CellValue::from("0000-88-77"),
        ];
        let cols = infer_column_types(&headers(), &rows_of(cells));
        assert_eq!(cols[0].data_type, ColumnType::Text);
    }

    #[test]
    fn test_nan_counts_as_text() {
        let cells = vec![
            CellValue::Number(f64::NAN),
            CellValue::Number(f64::NAN),
            CellValue::from("1"),
        ];
        let cols = infer_column_types(&headers(), &rows_of(cells));
        assert_eq!(cols[0].data_type, ColumnType::Text);
    }

    #[test]
    fn test_empty_sample_is_unknown() {
        let cells = vec![CellValue::Null, CellValue::Text(String::new())];
        let cols = infer_column_types(&headers(), &rows_of(cells));
        assert_eq!(cols[0].data_type, ColumnType::Unknown);
    }

    #[test]
    fn test_sample_size_limits_classification() {
        // First two rows numeric, everything after is text but outside
        // the sample window
        let mut cells = vec![CellValue::from("1"), CellValue::from("2")];
        cells.extend((0..10).map(|_| CellValue::from("text")));
        let cols = TypeInferencer::new()
            .with_sample_size(2)
            .infer(&headers(), &rows_of(cells));
        assert_eq!(cols[0].data_type, ColumnType::Number);
    }

    #[test]
    fn test_preview_values_retained() {
        let cells: Vec<CellValue> = (0..10).map(|i| CellValue::Number(i as f64)).collect();
        let cols = infer_column_types(&headers(), &rows_of(cells));
        assert_eq!(cols[0].sample_values.len(), 5);
        assert_eq!(cols[0].sample_values[0], CellValue::Number(0.0));
    }
}
