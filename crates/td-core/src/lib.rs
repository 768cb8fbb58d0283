//! Core data model for the tabular data engine
//!
//! This crate provides the fundamental value, column, and snapshot
//! abstractions shared by the transformation, statistics, and ingestion
//! crates. It owns the two predicates every other component must agree
//! on: the missing-value test and numeric coercion.

pub mod column;
pub mod snapshot;
pub mod value;

// Re-export commonly used types
pub use column::{Column, ColumnType};
pub use snapshot::{Row, TableSnapshot};
pub use value::CellValue;
