//! Prediction log: one row per triaged ticket, with an admin clear.
//!
//! [`TriageLog`] is the seam the caller injects; [`CsvLog`] persists to a
//! file and [`MemoryLog`] keeps rows for one process.

mod csv_log;
mod error;
mod history;
mod memory;
mod row;
mod stats;

pub use csv_log::CsvLog;
pub use error::StoreError;
pub use history::{HistoryEntry, SUBJECT_PREVIEW_CHARS};
pub use memory::MemoryLog;
pub use row::{
    ADMIN_CLEAR_ACTION, ADMIN_CLEAR_SUBJECT, LogRow, NO_LABEL, now_at, rows_to_batch, utc_offset,
};
pub use stats::LogStats;

use arrow::record_batch::RecordBatch;
use chrono::{DateTime, FixedOffset};

/// Append-only record of processed tickets.
pub trait TriageLog: Send + Sync {
    /// Add one row at the end of the log.
    fn append(&self, row: &LogRow) -> Result<(), StoreError>;

    /// All rows, in the triage log schema. An empty or missing log yields an
    /// empty batch rather than an error.
    fn read(&self) -> Result<RecordBatch, StoreError>;

    /// Record an admin-clear row stamped `now`, then empty the log.
    ///
    /// Returns the row that was recorded.
    fn clear(&self, now: DateTime<FixedOffset>) -> Result<LogRow, StoreError>;
}
