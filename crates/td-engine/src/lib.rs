//! Declarative transformation pipeline
//!
//! A pipeline is an ordered list of steps applied to a raw snapshot to
//! produce a processed snapshot. Execution is always a full replay from
//! raw, so the processed table is a pure function of (raw, pipeline).
//! Steps never fail: a bad configuration degrades to a no-op for that
//! step and the pipeline continues. Validation is the editor's job
//! before a step is added.

pub mod pipeline;
pub mod step;

pub use pipeline::process_data;
pub use step::{Aggregation, FillStrategy, SortDirection, StepConfig, TransformStep};
