//! CSV-file triage log.
//!
//! The file carries a header row and one line per processed ticket. A missing
//! or zero-byte file reads as an empty log. Every column is written non-null,
//! so an empty field reads back as an empty string.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use arrow::array::{ArrayRef, AsArray, StringArray};
use arrow::compute::concat_batches;
use arrow::datatypes::DataType;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, FixedOffset};
use supportbrain_core::triage_log::schema_ref;
use tracing::{info, warn};

use crate::row::{LogRow, rows_to_batch};
use crate::{StoreError, TriageLog};

/// Append-only log stored as CSV at a fixed path.
///
/// Reads and writes go through an internal lock, so a reader in the same
/// process never sees a half-written append or a clear in progress.
pub struct CsvLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Missing and zero-byte files are blank. Any other metadata failure is
    /// an error.
    fn is_blank(&self) -> Result<bool, StoreError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                std::fs::create_dir_all(dir).map_err(|e| self.io_err(e))
            }
            _ => Ok(()),
        }
    }

    /// Append rows, writing the header first when the file is new or empty.
    fn write_rows(&self, rows: &[LogRow]) -> Result<(), StoreError> {
        self.ensure_parent()?;
        let with_header = self.is_blank()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;

        let mut writer = WriterBuilder::new().with_header(with_header).build(file);
        writer.write(&rows_to_batch(rows)?)?;
        Ok(())
    }

    /// Replace the file with a header-only log.
    fn reset(&self) -> Result<(), StoreError> {
        let file = File::create(&self.path).map_err(|e| self.io_err(e))?;
        let mut writer = WriterBuilder::new().with_header(true).build(file);
        writer.write(&rows_to_batch(&[])?)?;
        Ok(())
    }
}

impl TriageLog for CsvLog {
    fn append(&self, row: &LogRow) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write_rows(std::slice::from_ref(row))
    }

    fn read(&self) -> Result<RecordBatch, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let schema = schema_ref();
        if self.is_blank()? {
            return Ok(RecordBatch::new_empty(schema));
        }

        let file = File::open(&self.path).map_err(|e| self.io_err(e))?;
        let reader = ReaderBuilder::new(schema.clone())
            .with_header(true)
            .build(file)?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;
        empty_strings_not_null(concat_batches(&schema, &batches)?)
    }

    fn clear(&self, now: DateTime<FixedOffset>) -> Result<LogRow, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let row = LogRow::admin_clear(now);

        self.write_rows(std::slice::from_ref(&row))?;
        warn!(path = %self.path.display(), at = %row.timestamp, "clearing triage log");
        self.reset()?;
        info!(path = %self.path.display(), "triage log cleared");
        Ok(row)
    }
}

/// The CSV reader parses an empty field as null. Log rows never hold nulls,
/// so turn those back into empty strings.
fn empty_strings_not_null(batch: RecordBatch) -> Result<RecordBatch, StoreError> {
    let columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| {
            if col.data_type() != &DataType::Utf8 || col.null_count() == 0 {
                return Arc::clone(col);
            }
            let values = col.as_string::<i32>().iter().map(|v| v.unwrap_or(""));
            Arc::new(StringArray::from_iter_values(values)) as ArrayRef
        })
        .collect();
    Ok(RecordBatch::try_new(batch.schema(), columns)?)
}
