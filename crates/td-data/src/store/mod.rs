//! The data store orchestrator

use tracing::{debug, info, warn};
use uuid::Uuid;

use td_core::{Column, Row, TableSnapshot};
use td_engine::{process_data, TransformStep};

use crate::ingest::{FileInfo, IngestMessage};

/// Holds the raw snapshot, the processed snapshot, and the pipeline
/// that derives one from the other.
///
/// An explicit, constructible object: the host application owns its
/// lifetime and threading discipline. The processed snapshot is always
/// a full replay of the pipeline over raw; every pipeline edit
/// synchronously recomputes it. During streamed ingestion chunks are
/// appended to both snapshots without replaying the pipeline, which is
/// empty until ingestion completes anyway.
#[derive(Debug, Default)]
pub struct DataStore {
    raw: TableSnapshot,
    processed: TableSnapshot,
    pipeline: Vec<TransformStep>,
    file_info: Option<FileInfo>,
    ingesting: bool,
}

impl DataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing raw snapshot
    pub fn with_raw(snapshot: TableSnapshot) -> Self {
        Self {
            raw: snapshot.clone(),
            processed: snapshot,
            pipeline: Vec::new(),
            file_info: None,
            ingesting: false,
        }
    }

    // --- read surface ---

    pub fn raw(&self) -> &TableSnapshot {
        &self.raw
    }

    pub fn processed(&self) -> &TableSnapshot {
        &self.processed
    }

    pub fn pipeline(&self) -> &[TransformStep] {
        &self.pipeline
    }

    pub fn file_info(&self) -> Option<&FileInfo> {
        self.file_info.as_ref()
    }

    pub fn is_ingesting(&self) -> bool {
        self.ingesting
    }

    // --- ingestion surface ---

    /// Replace the raw snapshot wholesale with a fully parsed table
    pub fn load_complete(&mut self, rows: Vec<Row>, columns: Vec<Column>) {
        self.raw = TableSnapshot::new(rows, columns);
        self.processed = self.raw.clone();
        self.pipeline.clear();
        self.ingesting = false;
        info!(
            rows = self.raw.row_count(),
            columns = self.raw.column_count(),
            "table loaded"
        );
    }

    /// Begin streamed ingestion: empty table with the inferred columns
    pub fn init_data(&mut self, columns: Vec<Column>, file_info: FileInfo) {
        self.raw = TableSnapshot::new(Vec::new(), columns);
        self.processed = self.raw.clone();
        self.pipeline.clear();
        self.file_info = Some(file_info);
        self.ingesting = true;
    }

    /// Append a chunk to both snapshots identically.
    ///
    /// The pipeline is not replayed here; transformations apply only
    /// after ingestion is declared complete.
    pub fn append_data(&mut self, rows: Vec<Row>) {
        self.raw.rows.extend(rows.iter().cloned());
        self.processed.rows.extend(rows);
    }

    /// Declare streamed ingestion complete
    pub fn finalize_data(&mut self) {
        self.ingesting = false;
        info!(
            rows = self.raw.row_count(),
            columns = self.raw.column_count(),
            "ingestion complete"
        );
    }

    /// Abort ingestion: discard any partial table
    pub fn abort_ingest(&mut self, message: &str) {
        warn!(error = message, "ingestion aborted");
        self.raw = TableSnapshot::empty();
        self.processed = TableSnapshot::empty();
        self.pipeline.clear();
        self.file_info = None;
        self.ingesting = false;
    }

    /// Dispatch one ingest message to the matching operation
    pub fn handle_message(&mut self, message: IngestMessage) {
        match message {
            IngestMessage::Init { columns, file_info } => self.init_data(columns, file_info),
            IngestMessage::Chunk { rows } => self.append_data(rows),
            IngestMessage::Progress { .. } => {}
            IngestMessage::Complete => self.finalize_data(),
            IngestMessage::Error { message } => self.abort_ingest(&message),
        }
    }

    // --- pipeline surface ---

    /// Append a step and replay the pipeline from raw
    pub fn add_step(&mut self, step: TransformStep) {
        self.pipeline.push(step);
        self.reprocess();
    }

    /// Remove a step by id (unknown ids are ignored) and replay
    pub fn remove_step(&mut self, id: Uuid) {
        let before = self.pipeline.len();
        self.pipeline.retain(|step| step.id != id);
        if self.pipeline.len() != before {
            self.reprocess();
        }
    }

    /// Drop every step; processed becomes a copy of raw again
    pub fn reset_pipeline(&mut self) {
        self.pipeline.clear();
        self.processed = self.raw.clone();
    }

    fn reprocess(&mut self) {
        self.processed = process_data(&self.raw.rows, &self.raw.columns, &self.pipeline);
        debug!(
            steps = self.pipeline.len(),
            rows = self.processed.row_count(),
            "pipeline replayed"
        );
    }
}
