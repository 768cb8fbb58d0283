//! Ingestion surface and orchestration for the tabular data engine
//!
//! This crate owns everything between a parsed file and the
//! transformation pipeline: type inference over value samples, the
//! ingest message protocol, a streaming CSV source, and the
//! [`DataStore`] that holds the raw and processed snapshots.

pub mod ingest;
pub mod schema;
pub mod sources;
pub mod store;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use ingest::{FileInfo, IngestMessage};
pub use schema::{infer_column_types, TypeInferencer};
pub use sources::CsvSource;
pub use store::DataStore;

/// Errors that can occur while ingesting data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("ingest channel closed")]
    ChannelClosed,

    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
