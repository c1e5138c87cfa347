//! One row of the triage log, and conversion to Arrow.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, StringArray};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use supportbrain_core::TriageResult;
use supportbrain_core::triage_log::{SUBJECT_MAX_CHARS, TIMESTAMP_FORMAT, schema_ref};

use crate::StoreError;

/// Subject written by an admin clear.
pub const ADMIN_CLEAR_SUBJECT: &str = "ADMIN CLEAR";
/// Action written by an admin clear.
pub const ADMIN_CLEAR_ACTION: &str = "All data cleared by admin";
/// Placeholder for label columns of rows that are not predictions.
pub const NO_LABEL: &str = "—";

/// Fixed offset from whole hours east of UTC.
pub fn utc_offset(hours: i32) -> Result<FixedOffset, StoreError> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or(StoreError::InvalidOffset(hours))
}

/// Current wall-clock time at `offset`.
pub fn now_at(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    pub timestamp: String,
    pub subject: String,
    pub ticket_type: String,
    /// Auto-set priority, else the predicted one.
    pub priority: String,
    /// Auto-routed queue, else the predicted one.
    pub queue: String,
    pub auto_queue: bool,
    pub action: String,
}

impl LogRow {
    pub fn from_result(subject: &str, result: &TriageResult, now: DateTime<FixedOffset>) -> Self {
        Self {
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            subject: subject.chars().take(SUBJECT_MAX_CHARS).collect(),
            ticket_type: result.ticket_type().to_string(),
            priority: result.resolved_priority().to_string(),
            queue: result.resolved_queue().to_string(),
            auto_queue: result.auto_route_to().is_some(),
            action: result.final_action().label(),
        }
    }

    /// The terminal row recorded when the log is wiped.
    pub fn admin_clear(now: DateTime<FixedOffset>) -> Self {
        Self {
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            subject: ADMIN_CLEAR_SUBJECT.to_string(),
            ticket_type: NO_LABEL.to_string(),
            priority: NO_LABEL.to_string(),
            queue: NO_LABEL.to_string(),
            auto_queue: false,
            action: ADMIN_CLEAR_ACTION.to_string(),
        }
    }
}

/// Pack rows into a batch with the triage log schema.
pub fn rows_to_batch(rows: &[LogRow]) -> Result<RecordBatch, StoreError> {
    let columns: Vec<ArrayRef> = vec![
        string_column(rows, |r| r.timestamp.as_str()),
        string_column(rows, |r| r.subject.as_str()),
        string_column(rows, |r| r.ticket_type.as_str()),
        string_column(rows, |r| r.priority.as_str()),
        string_column(rows, |r| r.queue.as_str()),
        Arc::new(BooleanArray::from(
            rows.iter().map(|r| r.auto_queue).collect::<Vec<_>>(),
        )),
        string_column(rows, |r| r.action.as_str()),
    ];

    Ok(RecordBatch::try_new(schema_ref(), columns)?)
}

fn string_column(rows: &[LogRow], field: impl Fn(&LogRow) -> &str) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(rows.iter().map(field)))
}
