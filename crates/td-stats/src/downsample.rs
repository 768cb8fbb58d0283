//! Min-max bucket downsampling for large point series

use serde::{Deserialize, Serialize};

/// One chart point, x ascending within a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Transient numeric bounds applied to a derived point series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterRange {
    pub min: f64,
    pub max: f64,
}

/// Keep only points whose y lies within the range; `None` keeps all.
pub fn apply_filter_range(points: &[PlotPoint], range: Option<FilterRange>) -> Vec<PlotPoint> {
    match range {
        Some(r) => points
            .iter()
            .filter(|p| p.y >= r.min && p.y <= r.max)
            .copied()
            .collect(),
        None => points.to_vec(),
    }
}

/// Reduce an ordered series to roughly `threshold` points while keeping
/// local extremes.
///
/// The first and last points are always kept. Interior points are
/// partitioned into `floor((threshold - 2) / 2)` buckets with floating
/// boundaries floored to indices; each bucket contributes its min-y and
/// max-y points (first occurrence wins on ties) in ascending-x order,
/// or one point when they coincide. Unlike naive stride sampling this
/// never smooths away spikes, at the cost of emitting up to about
/// `threshold` points rather than exactly `threshold`.
pub fn downsample_data(points: &[PlotPoint], threshold: usize) -> Vec<PlotPoint> {
    if points.len() <= threshold || points.len() <= 2 {
        return points.to_vec();
    }

    let bucket_count = threshold.saturating_sub(2) / 2;
    let mut sampled = Vec::with_capacity(bucket_count * 2 + 2);
    sampled.push(points[0]);

    if bucket_count > 0 {
        let interior = (points.len() - 2) as f64;
        let bucket_size = interior / bucket_count as f64;

        for bucket in 0..bucket_count {
            let start = 1 + (bucket as f64 * bucket_size).floor() as usize;
            let end = (1 + ((bucket + 1) as f64 * bucket_size).floor() as usize)
                .min(points.len() - 1);
            if start >= end {
                continue;
            }

            let mut min_idx = start;
            let mut max_idx = start;
            for i in start..end {
                if points[i].y < points[min_idx].y {
                    min_idx = i;
                }
                if points[i].y > points[max_idx].y {
                    max_idx = i;
                }
            }

            let (first, second) = if min_idx <= max_idx {
                (min_idx, max_idx)
            } else {
                (max_idx, min_idx)
            };
            sampled.push(points[first]);
            if second != first {
                sampled.push(points[second]);
            }
        }
    }

    sampled.push(points[points.len() - 1]);
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<PlotPoint> {
        (0..n)
            .map(|i| PlotPoint::new(i as f64, (i as f64 * 0.7).sin()))
            .collect()
    }

    #[test]
    fn test_identity_below_threshold() {
        let points = series(50);
        assert_eq!(downsample_data(&points, 100), points);
        assert_eq!(downsample_data(&points, 50), points);
    }

    #[test]
    fn test_endpoints_preserved() {
        let points = series(10_000);
        let sampled = downsample_data(&points, 500);
        assert_eq!(sampled.first(), points.first());
        assert_eq!(sampled.last(), points.last());
    }

    #[test]
    fn test_output_bounded() {
        let points = series(10_000);
        let sampled = downsample_data(&points, 500);
        assert!(sampled.len() <= 500);
        assert!(sampled.len() < points.len());
    }

    #[test]
    fn test_spikes_survive() {
        let mut points = series(5_000);
        points[2500].y = 1000.0;
        points[3000].y = -1000.0;
        let sampled = downsample_data(&points, 200);
        assert!(sampled.iter().any(|p| p.y == 1000.0));
        assert!(sampled.iter().any(|p| p.y == -1000.0));
    }

    #[test]
    fn test_x_order_is_preserved() {
        let points = series(3_000);
        let sampled = downsample_data(&points, 100);
        for pair in sampled.windows(2) {
            assert!(pair[0].x <= pair[1].x);
        }
    }

    #[test]
    fn test_tiny_threshold_keeps_endpoints_only() {
        let points = series(10);
        let sampled = downsample_data(&points, 3);
        assert_eq!(sampled.len(), 2);
        assert_eq!(sampled[0], points[0]);
        assert_eq!(sampled[1], points[9]);
    }

    #[test]
    fn test_filter_range() {
        let points = vec![
            PlotPoint::new(0.0, -5.0),
            PlotPoint::new(1.0, 0.5),
            PlotPoint::new(2.0, 2.0),
        ];
        let filtered = apply_filter_range(&points, Some(FilterRange { min: 0.0, max: 1.0 }));
        assert_eq!(filtered, vec![PlotPoint::new(1.0, 0.5)]);
        assert_eq!(apply_filter_range(&points, None), points);
    }
}
