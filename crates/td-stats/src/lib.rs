//! Statistical summarization and series downsampling
//!
//! Everything here is chart-facing: histograms, box-plot five-number
//! summaries, Pearson correlation, and the min-max bucket downsampler
//! applied to large point series before rendering. All functions are
//! pure and degrade to well-typed fallback values (empty output, zero,
//! a single bin) on degenerate input rather than returning errors.

pub mod box_plot;
pub mod correlation;
pub mod downsample;
pub mod histogram;

pub use box_plot::{calculate_box_plot_stats, group_data_for_box_plot, GroupedBoxPlot};
pub use correlation::{calculate_correlation, calculate_correlation_matrix, CorrelationCell};
pub use downsample::{apply_filter_range, downsample_data, FilterRange, PlotPoint};
pub use histogram::{calculate_histogram, Histogram};
