use arrow::array::BooleanArray;
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use supportbrain_core::triage_log::AUTO_QUEUE;

use crate::StoreError;

/// All-time counters over a read of the log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogStats {
    pub total: usize,
    pub auto_routed: usize,
}

impl LogStats {
    pub fn from_batch(batch: &RecordBatch) -> Result<Self, StoreError> {
        let auto = batch
            .column_by_name(AUTO_QUEUE)
            .ok_or_else(|| StoreError::Other(format!("log has no {AUTO_QUEUE} column")))?
            .as_any()
            .downcast_ref::<BooleanArray>()
            .ok_or_else(|| StoreError::Other(format!("{AUTO_QUEUE} column not boolean")))?;

        Ok(Self {
            total: batch.num_rows(),
            auto_routed: auto.true_count(),
        })
    }

    /// Percentage of rows that were auto-routed, or `None` for an empty log.
    pub fn auto_routed_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.auto_routed as f64 / self.total as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{LogRow, rows_to_batch};

    fn rows(flags: &[bool]) -> Vec<LogRow> {
        flags
            .iter()
            .map(|&auto_queue| LogRow {
                timestamp: "2025-12-01 10:00:00".into(),
                subject: "s".into(),
                ticket_type: "Incident".into(),
                priority: "High".into(),
                queue: "Technical".into(),
                auto_queue,
                action: "x".into(),
            })
            .collect()
    }

    #[test]
    fn empty_log_has_no_rate() {
        let stats = LogStats::from_batch(&rows_to_batch(&[]).unwrap()).unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.auto_routed_rate(), None);
    }

    #[test]
    fn rate_is_percentage_of_auto_routed() {
        let batch = rows_to_batch(&rows(&[true, false, true, true])).unwrap();
        let stats = LogStats::from_batch(&batch).unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.auto_routed, 3);
        assert_eq!(stats.auto_routed_rate(), Some(75.0));
    }
}
