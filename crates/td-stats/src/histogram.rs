//! Histogram binning

use serde::Serialize;

/// Binned counts ready for a bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Human-readable bin labels, "lo ~ hi" with two decimals
    pub bins: Vec<String>,

    /// Count of values per bin, aligned with `bins`
    pub counts: Vec<usize>,
}

impl Histogram {
    fn empty() -> Self {
        Self {
            bins: Vec::new(),
            counts: Vec::new(),
        }
    }
}

/// Compute a histogram over raw values.
///
/// Bin count is the explicit `bin_count` when given, otherwise Sturges'
/// rule `ceil(log2(n) + 1)`. A single-valued distribution collapses to
/// one bin labeled with that value; empty input yields empty output.
/// The maximum value is clamped into the last bin.
pub fn calculate_histogram(data: &[f64], bin_count: Option<usize>) -> Histogram {
    if data.is_empty() {
        return Histogram::empty();
    }

    // Linear scan rather than a variadic max, which would blow the
    // stack on very large inputs.
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in data {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    if min == max {
        return Histogram {
            bins: vec![format!("{:.2}", min)],
            counts: vec![data.len()],
        };
    }

    let k = bin_count
        .unwrap_or_else(|| ((data.len() as f64).log2() + 1.0).ceil() as usize)
        .max(1);
    let width = (max - min) / k as f64;

    let bins = (0..k)
        .map(|i| {
            let lo = min + i as f64 * width;
            let hi = min + (i + 1) as f64 * width;
            format!("{:.2} ~ {:.2}", lo, hi)
        })
        .collect();

    let mut counts = vec![0usize; k];
    for &v in data {
        let idx = (((v - min) / width).floor() as usize).min(k - 1);
        counts[idx] += 1;
    }

    Histogram { bins, counts }
}
