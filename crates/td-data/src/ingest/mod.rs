//! The ingestion message protocol
//!
//! A source delivers messages in send order: `Init`, any number of
//! `Chunk`/`Progress`, then `Complete`, or `Error` at any point, which
//! terminates the stream.

use serde::{Deserialize, Serialize};
use td_core::{Column, Row};

/// Metadata about the file being ingested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Display name (usually the file name)
    pub name: String,

    /// Size on disk in bytes, when known
    pub size_bytes: u64,
}

/// One message from an ingestion source to the data store
#[derive(Debug, Clone)]
pub enum IngestMessage {
    /// Ingestion started; carries the inferred columns and file metadata
    Init {
        columns: Vec<Column>,
        file_info: FileInfo,
    },

    /// A batch of parsed rows
    Chunk { rows: Vec<Row> },

    /// Fraction of the input consumed so far, in [0, 1]
    Progress { fraction: f64 },

    /// Ingestion finished successfully
    Complete,

    /// Ingestion aborted; no partial table is committed
    Error { message: String },
}
