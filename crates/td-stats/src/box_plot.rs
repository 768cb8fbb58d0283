//! Box-plot five-number summaries and category grouping

use indexmap::IndexMap;
use serde::Serialize;

/// Default cap on distinct box-plot categories before collapsing
pub const DEFAULT_MAX_CATEGORIES: usize = 100;

/// Grouped box-plot data ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct GroupedBoxPlot {
    /// Category labels along the axis
    pub axis_data: Vec<String>,

    /// Five-number summary per category, aligned with `axis_data`
    pub box_data: Vec<[f64; 5]>,

    /// Whether adjacent categories were collapsed to respect the cap
    pub grouped: bool,

    /// Distinct category count before any collapsing
    pub original_count: usize,
}

/// Compute `[min, Q1, median, Q3, max]` for a value set.
///
/// Quartiles use the R-7 method: linear interpolation between order
/// statistics at `pos = (n - 1) * q`. Empty input yields all zeros.
pub fn calculate_box_plot_stats(data: &[f64]) -> [f64; 5] {
    if data.is_empty() {
        return [0.0; 5];
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);

    [sorted[0], q1, median, q3, sorted[sorted.len() - 1]]
}

/// R-7 quantile over pre-sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    interpolate(sorted, pos)
}

fn interpolate(sorted: &[f64], idx: f64) -> f64 {
    let lower = idx.floor() as usize;
    let upper = lower + 1;

    if upper >= sorted.len() {
        sorted[lower]
    } else {
        let fraction = idx - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Group y-values by their paired x-label and box-plot-stat each group.
///
/// Labels and values are index-aligned. Groups keep first-appearance
/// order, never sorted order. When the distinct group count exceeds
/// `max_categories`, consecutive runs of `ceil(count / max)` groups are
/// merged into buckets relabeled `"Group N (start-end)"` with 1-based
/// original-group ordinals, and the summary is taken over each bucket's
/// concatenated values. `original_count` always reports the
/// pre-collapse distinct count.
pub fn group_data_for_box_plot(
    x_labels: &[String],
    y_values: &[f64],
    max_categories: usize,
) -> GroupedBoxPlot {
    let mut groups: IndexMap<String, Vec<f64>> = IndexMap::new();
    for (label, &value) in x_labels.iter().zip(y_values.iter()) {
        groups.entry(label.clone()).or_default().push(value);
    }

    let original_count = groups.len();
    let max_categories = max_categories.max(1);

    if original_count <= max_categories {
        let axis_data = groups.keys().cloned().collect();
        let box_data = groups
            .values()
            .map(|values| calculate_box_plot_stats(values))
            .collect();
        return GroupedBoxPlot {
            axis_data,
            box_data,
            grouped: false,
            original_count,
        };
    }

    // Collapse consecutive groups, in insertion order, into buckets of
    // ceil(count / max) groups each.
    let bucket_span = original_count.div_ceil(max_categories);
    let entries: Vec<(&String, &Vec<f64>)> = groups.iter().collect();

    let mut axis_data = Vec::new();
    let mut box_data = Vec::new();
    for (bucket_idx, chunk) in entries.chunks(bucket_span).enumerate() {
        let start = bucket_idx * bucket_span + 1;
        let end = start + chunk.len() - 1;
        axis_data.push(format!("Group {} ({}-{})", bucket_idx + 1, start, end));

        let merged: Vec<f64> = chunk
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .collect();
        box_data.push(calculate_box_plot_stats(&merged));
    }

    GroupedBoxPlot {
        axis_data,
        box_data,
        grouped: true,
        original_count,
    }
}
