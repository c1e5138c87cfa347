use std::sync::Mutex;

use arrow::record_batch::RecordBatch;
use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::row::{LogRow, rows_to_batch};
use crate::{StoreError, TriageLog};

/// In-process log. Rows live as long as the value does.
#[derive(Default)]
pub struct MemoryLog {
    rows: Mutex<Vec<LogRow>>,
    /// Admin rows recorded by past clears, oldest first.
    clears: Mutex<Vec<LogRow>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows written by every clear so far.
    pub fn clear_history(&self) -> Vec<LogRow> {
        self.clears.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl TriageLog for MemoryLog {
    fn append(&self, row: &LogRow) -> Result<(), StoreError> {
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(row.clone());
        Ok(())
    }

    fn read(&self) -> Result<RecordBatch, StoreError> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        rows_to_batch(&rows)
    }

    fn clear(&self, now: DateTime<FixedOffset>) -> Result<LogRow, StoreError> {
        let row = LogRow::admin_clear(now);
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        rows.push(row.clone());
        warn!(rows = rows.len(), at = %row.timestamp, "clearing in-memory triage log");
        rows.clear();
        self.clears
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{now_at, utc_offset};

    fn row(subject: &str) -> LogRow {
        LogRow {
            timestamp: "2025-12-01 10:00:00".into(),
            subject: subject.into(),
            ticket_type: "Request".into(),
            priority: "Low".into(),
            queue: "General".into(),
            auto_queue: false,
            action: "HUMAN REVIEW SUGGESTED → Low overall confidence".into(),
        }
    }

    #[test]
    fn empty_log_reads_empty_batch() {
        let log = MemoryLog::new();
        let batch = log.read().unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 7);
    }

    #[test]
    fn append_then_clear() {
        let log = MemoryLog::new();
        log.append(&row("one")).unwrap();
        log.append(&row("two")).unwrap();
        assert_eq!(log.read().unwrap().num_rows(), 2);

        let admin = log.clear(now_at(utc_offset(1).unwrap())).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.read().unwrap().num_rows(), 0);
        assert_eq!(log.clear_history(), vec![admin]);
    }
}
