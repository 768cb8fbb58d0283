//! Streaming CSV source
//!
//! Parses a CSV file on a blocking worker thread and feeds the data
//! store through the ingest message channel. The parse never shares
//! memory with the store: whole-chunk row batches and plain progress
//! numbers cross the boundary, in send order. Cancellation is the
//! host's concern: dropping the receiver stops the worker at the next
//! send.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use td_core::{CellValue, Row};

use crate::ingest::{FileInfo, IngestMessage};
use crate::schema::TypeInferencer;
use crate::DataError;

/// Rows per chunk sent to the store
const CHUNK_SIZE: usize = 10_000;

/// CSV data source streaming ingest messages
pub struct CsvSource {
    path: PathBuf,
    chunk_size: usize,
}

impl CsvSource {
    /// Create a new CSV source for a file path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Override the chunk size (mainly for tests)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Parse the file and deliver the full ingest message sequence.
    ///
    /// Runs the parse inside `spawn_blocking`; parse failures are
    /// reported through the channel as an `Error` message rather than
    /// through the return value, which only carries runtime failures.
    pub async fn stream(self, sender: mpsc::Sender<IngestMessage>) -> Result<(), DataError> {
        tokio::task::spawn_blocking(move || {
            if let Err(err) = Self::stream_blocking(&self.path, self.chunk_size, &sender) {
                warn!(path = %self.path.display(), error = %err, "csv ingestion failed");
                let _ = sender.blocking_send(IngestMessage::Error {
                    message: err.to_string(),
                });
            }
        })
        .await
        .map_err(DataError::Join)
    }

    fn stream_blocking(
        path: &Path,
        chunk_size: usize,
        sender: &mpsc::Sender<IngestMessage>,
    ) -> Result<(), DataError> {
        let file_size = std::fs::metadata(path)?.len();
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let mut records = reader.into_records();

        // Sample leading rows for type inference before anything is
        // sent; the sampled rows become the first chunk's seed.
        let inferencer = TypeInferencer::new();
        let mut sample: Vec<Row> = Vec::new();
        for result in records.by_ref() {
            let record = result?;
            sample.push(record.iter().map(parse_cell).collect());
            if sample.len() >= crate::schema::DEFAULT_SAMPLE_SIZE {
                break;
            }
        }

        let columns = inferencer.infer(&headers, &sample);
        let file_info = FileInfo {
            name: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown.csv")
                .to_string(),
            size_bytes: file_size,
        };
        debug!(columns = columns.len(), "csv schema inferred");
        send(sender, IngestMessage::Init { columns, file_info })?;

        let mut chunk = sample;
        for result in records {
            let record = result?;
            let fraction = record
                .position()
                .map(|p| progress_fraction(p.byte(), file_size))
                .unwrap_or(0.0);
            chunk.push(record.iter().map(parse_cell).collect());

            if chunk.len() >= chunk_size {
                send(sender, IngestMessage::Chunk {
                    rows: std::mem::take(&mut chunk),
                })?;
                send(sender, IngestMessage::Progress { fraction })?;
            }
        }

        if !chunk.is_empty() {
            send(sender, IngestMessage::Chunk { rows: chunk })?;
        }
        send(sender, IngestMessage::Progress { fraction: 1.0 })?;
        send(sender, IngestMessage::Complete)?;
        Ok(())
    }
}

fn send(sender: &mpsc::Sender<IngestMessage>, message: IngestMessage) -> Result<(), DataError> {
    sender
        .blocking_send(message)
        .map_err(|_| DataError::ChannelClosed)
}

fn progress_fraction(bytes: u64, total: u64) -> f64 {
    if total == 0 {
        1.0
    } else {
        (bytes as f64 / total as f64).min(1.0)
    }
}

/// Dynamic cell parsing: empty fields become null, numeric-looking
/// fields become numbers, everything else stays text. Date strings
/// stay text here; classification happens during inference.
fn parse_cell(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Null;
    }
    match field.trim().parse::<f64>() {
        Ok(n) => CellValue::Number(n),
        Err(_) => CellValue::Text(field.to_string()),
    }
}
