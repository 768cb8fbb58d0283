//! Pearson correlation and the dense correlation matrix

use serde::Serialize;
use td_core::{Column, Row};

/// One entry of the correlation matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationCell {
    pub x: String,
    pub y: String,
    /// Pearson's r, rounded to two decimals, in [-1, 1]
    pub value: f64,
}

/// Pearson's r over two equal-length series.
///
/// Returns 0 when the lengths differ, either series is empty, or
/// either series is constant (zero denominator). Callers needing to
/// distinguish "no data" from "zero correlation" must check input
/// sizes themselves.
pub fn calculate_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    for (&a, &b) in x.iter().zip(y.iter()) {
        sum_x += a;
        sum_y += b;
        sum_xy += a * b;
        sum_x2 += a * a;
        sum_y2 += b * b;
    }

    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Dense N x N correlation matrix over the requested columns,
/// self-pairs included.
///
/// Each column is coerced independently: cells that fail numeric
/// coercion are dropped from that column's series, and the two series
/// of a pair are truncated to the shorter length before correlating.
/// When two columns drop a different number of cells this silently
/// shifts their row correspondence; callers that need aligned pairs
/// must drop incomplete rows before calling.
pub fn calculate_correlation_matrix(
    rows: &[Row],
    column_names: &[String],
    columns: &[Column],
) -> Vec<CorrelationCell> {
    let series: Vec<Vec<f64>> = column_names
        .iter()
        .map(|name| {
            let Some(idx) = columns.iter().position(|c| c.name == *name) else {
                return Vec::new();
            };
            rows.iter()
                .filter_map(|row| row.get(idx).and_then(|v| v.as_number()))
                .collect()
        })
        .collect();

    let mut cells = Vec::with_capacity(column_names.len() * column_names.len());
    for (i, x_name) in column_names.iter().enumerate() {
        for (j, y_name) in column_names.iter().enumerate() {
            let len = series[i].len().min(series[j].len());
            let r = calculate_correlation(&series[i][..len], &series[j][..len]);
            cells.push(CorrelationCell {
                x: x_name.clone(),
                y: y_name.clone(),
                value: (r * 100.0).round() / 100.0,
            });
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_core::{CellValue, ColumnType};

    #[test]
    fn test_perfect_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let r = calculate_correlation(&x, &y);
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_anticorrelation() {
        let x = [1.0, 2.0, 3.0];
        let y = [3.0, 2.0, 1.0];
        let r = calculate_correlation(&x, &y);
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_return_zero() {
        assert_eq!(calculate_correlation(&[], &[]), 0.0);
        assert_eq!(calculate_correlation(&[1.0, 2.0], &[1.0]), 0.0);
        // Constant series has zero variance
        assert_eq!(calculate_correlation(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_matrix_is_dense_with_unit_diagonal() {
        let columns = vec![
            Column::new("a", ColumnType::Number),
            Column::new("b", ColumnType::Number),
        ];
        let rows: Vec<Row> = (0..5)
            .map(|i| {
                vec![
                    CellValue::Number(i as f64),
                    CellValue::Number(10.0 - i as f64),
                ]
            })
            .collect();
        let names = vec!["a".to_string(), "b".to_string()];

        let cells = calculate_correlation_matrix(&rows, &names, &columns);
        assert_eq!(cells.len(), 4);
        for cell in &cells {
            assert!(cell.value >= -1.0 && cell.value <= 1.0);
            if cell.x == cell.y {
                assert_eq!(cell.value, 1.0);
            } else {
                assert_eq!(cell.value, -1.0);
            }
        }
    }

    #[test]
    fn test_matrix_drops_non_numeric_cells() {
        let columns = vec![
            Column::new("a", ColumnType::Number),
            Column::new("b", ColumnType::Number),
        ];
        let rows: Vec<Row> = vec![
            vec![CellValue::Number(1.0), CellValue::Number(1.0)],
            vec![CellValue::from("oops"), CellValue::Number(2.0)],
            vec![CellValue::Number(3.0), CellValue::Number(3.0)],
        ];
        let names = vec!["a".to_string(), "b".to_string()];

        // Column a keeps 2 values, column b keeps 3; the pair truncates
        // to length 2 without realignment.
        let cells = calculate_correlation_matrix(&rows, &names, &columns);
        let ab = cells.iter().find(|c| c.x == "a" && c.y == "b").unwrap();
        assert!((ab.value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_matrix_unknown_column_yields_zero() {
        let columns = vec![Column::new("a", ColumnType::Number)];
        let rows: Vec<Row> = vec![vec![CellValue::Number(1.0)], vec![CellValue::Number(2.0)]];
        let names = vec!["a".to_string(), "ghost".to_string()];

        let cells = calculate_correlation_matrix(&rows, &names, &columns);
        assert_eq!(cells.len(), 4);
        let ag = cells.iter().find(|c| c.x == "a" && c.y == "ghost").unwrap();
        assert_eq!(ag.value, 0.0);
    }
}
