//! Pipeline execution

use ahash::AHashSet;
use indexmap::IndexMap;
use tracing::debug;

use td_core::{CellValue, Column, ColumnType, Row, TableSnapshot};

use crate::step::{Aggregation, FillStrategy, SortDirection, StepConfig, TransformStep};

/// Apply an ordered list of steps to a raw table.
///
/// Steps execute strictly in list order; each receives the previous
/// step's full output. Same inputs always produce the same output, and
/// the inputs are never mutated.
pub fn process_data(rows: &[Row], columns: &[Column], steps: &[TransformStep]) -> TableSnapshot {
    let mut snapshot = TableSnapshot::new(rows.to_vec(), columns.to_vec());
    for step in steps {
        snapshot = apply_step(&snapshot, &step.config);
        debug!(
            step = ?step.config,
            rows = snapshot.row_count(),
            "applied transformation step"
        );
    }
    snapshot
}

fn apply_step(snapshot: &TableSnapshot, config: &StepConfig) -> TableSnapshot {
    match config {
        StepConfig::DropMissing { columns } => drop_missing(snapshot, columns),
        StepConfig::FillMissing {
            column,
            strategy,
            value,
        } => fill_missing(snapshot, column, *strategy, value.as_ref()),
        StepConfig::RemoveDuplicates { columns } => remove_duplicates(snapshot, columns),
        StepConfig::Sort { column, direction } => sort_rows(snapshot, column, *direction),
        StepConfig::GroupBy {
            group_column,
            agg_column,
            agg,
        } => group_by(snapshot, group_column, agg_column, *agg),
    }
}

/// Resolve a target column list to indices. An empty list means every
/// column; names that do not exist are skipped.
fn resolve_targets(snapshot: &TableSnapshot, columns: &[String]) -> Vec<usize> {
    if columns.is_empty() {
        (0..snapshot.column_count()).collect()
    } else {
        columns
            .iter()
            .filter_map(|name| snapshot.column_index(name))
            .collect()
    }
}

fn drop_missing(snapshot: &TableSnapshot, columns: &[String]) -> TableSnapshot {
    let targets = resolve_targets(snapshot, columns);
    if targets.is_empty() {
        return snapshot.clone();
    }

    let rows = snapshot
        .rows
        .iter()
        .filter(|row| !targets.iter().any(|&i| row[i].is_missing()))
        .cloned()
        .collect();
    TableSnapshot::new(rows, snapshot.columns.clone())
}

fn fill_missing(
    snapshot: &TableSnapshot,
    column: &str,
    strategy: FillStrategy,
    value: Option<&CellValue>,
) -> TableSnapshot {
    let Some(idx) = snapshot.column_index(column) else {
        return snapshot.clone();
    };

    let present: Vec<&CellValue> = snapshot
        .rows
        .iter()
        .map(|row| &row[idx])
        .filter(|v| !v.is_missing())
        .collect();

    let fill = match strategy {
        FillStrategy::Zero => CellValue::Number(0.0),
        FillStrategy::Mean => CellValue::Number(mean(&coerced(&present))),
        FillStrategy::Median => CellValue::Number(median(&mut coerced(&present))),
        FillStrategy::Mode => match mode(&present) {
            Some(v) => v,
            None => return snapshot.clone(),
        },
        FillStrategy::Constant => match value {
            Some(v) => v.clone(),
            None => return snapshot.clone(),
        },
    };

    let rows = snapshot
        .rows
        .iter()
        .map(|row| {
            if row[idx].is_missing() {
                let mut filled = row.clone();
                filled[idx] = fill.clone();
                filled
            } else {
                row.clone()
            }
        })
        .collect();
    TableSnapshot::new(rows, snapshot.columns.clone())
}

/// Fill value sources operate on the coercible subset of the column's
/// non-missing values; an empty subset degrades to 0.
fn coerced(values: &[&CellValue]) -> Vec<f64> {
    values.iter().filter_map(|v| v.as_number()).collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn median(values: &mut Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Most frequent raw value; insertion-order iteration makes ties
/// resolve to the first-encountered value.
fn mode(values: &[&CellValue]) -> Option<CellValue> {
    let mut counts: IndexMap<String, (CellValue, usize)> = IndexMap::new();
    for &v in values {
        let key = cell_key(&[v]);
        counts
            .entry(key)
            .and_modify(|(_, n)| *n += 1)
            .or_insert(((*v).clone(), 1));
    }

    let mut best: Option<(CellValue, usize)> = None;
    for (_, (value, count)) in counts {
        match &best {
            Some((_, n)) if *n >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(v, _)| v)
}

/// Serialized form of a projected cell tuple, used as a duplicate key
fn cell_key(cells: &[&CellValue]) -> String {
    serde_json::to_string(cells).unwrap_or_default()
}

fn remove_duplicates(snapshot: &TableSnapshot, columns: &[String]) -> TableSnapshot {
    let targets = resolve_targets(snapshot, columns);
    if targets.is_empty() {
        return snapshot.clone();
    }

    let mut seen = AHashSet::new();
    let rows = snapshot
        .rows
        .iter()
        .filter(|row| {
            let projected: Vec<&CellValue> = targets.iter().map(|&i| &row[i]).collect();
            seen.insert(cell_key(&projected))
        })
        .cloned()
        .collect();
    TableSnapshot::new(rows, snapshot.columns.clone())
}

fn sort_rows(snapshot: &TableSnapshot, column: &str, direction: SortDirection) -> TableSnapshot {
    let Some(idx) = snapshot.column_index(column) else {
        return snapshot.clone();
    };

    let mut rows = snapshot.rows.clone();
    rows.sort_by(|a, b| {
        let ordering = compare_cells(&a[idx], &b[idx]);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    TableSnapshot::new(rows, snapshot.columns.clone())
}

/// Mixed comparator: numeric when both cells coerce, string form
/// otherwise. A column with mixed content therefore compares with
/// different semantics pair by pair; the behavior is intentional.
fn compare_cells(a: &CellValue, b: &CellValue) -> std::cmp::Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn group_by(
    snapshot: &TableSnapshot,
    group_column: &str,
    agg_column: &str,
    agg: Aggregation,
) -> TableSnapshot {
    let (Some(gidx), Some(aidx)) = (
        snapshot.column_index(group_column),
        snapshot.column_index(agg_column),
    ) else {
        return snapshot.clone();
    };

    // Groups keep first-appearance order, never sorted order.
    let mut groups: IndexMap<String, Vec<CellValue>> = IndexMap::new();
    for row in &snapshot.rows {
        groups
            .entry(row[gidx].to_string())
            .or_default()
            .push(row[aidx].clone());
    }

    let rows = groups
        .into_iter()
        .map(|(key, values)| {
            vec![
                CellValue::Text(key),
                CellValue::Number(aggregate(&values, agg)),
            ]
        })
        .collect();

    let columns = vec![
        snapshot.columns[gidx].clone(),
        Column::new(
            format!("{}_{}", agg.label(), agg_column),
            ColumnType::Number,
        ),
    ];
    TableSnapshot::new(rows, columns)
}

/// COUNT counts every grouped value; the numeric aggregates coerce and
/// silently discard non-numeric entries. A group with no numeric
/// entries aggregates to 0.
fn aggregate(values: &[CellValue], agg: Aggregation) -> f64 {
    if agg == Aggregation::Count {
        return values.len() as f64;
    }

    let numbers: Vec<f64> = values.iter().filter_map(|v| v.as_number()).collect();
    if numbers.is_empty() {
        return 0.0;
    }
    match agg {
        Aggregation::Sum => numbers.iter().sum(),
        Aggregation::Avg => numbers.iter().sum::<f64>() / numbers.len() as f64,
        Aggregation::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregation::Max => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregation::Count => unreachable!(),
    }
}
