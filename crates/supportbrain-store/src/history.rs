//! Compact per-session view of triaged tickets.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use supportbrain_core::TriageResult;

/// Subjects longer than this are cut and suffixed with `...`.
pub const SUBJECT_PREVIEW_CHARS: usize = 45;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub time: String,
    pub subject: String,
    pub ticket_type: String,
    /// Resolved priority, upper-cased.
    pub priority: String,
    pub queue: String,
    /// Headline of the final action, without its explanation.
    pub action: String,
}

impl HistoryEntry {
    pub fn new(subject: &str, result: &TriageResult, now: DateTime<FixedOffset>) -> Self {
        Self {
            time: now.format("%H:%M:%S").to_string(),
            subject: preview(subject),
            ticket_type: result.ticket_type().to_string(),
            priority: result.resolved_priority().as_str().to_uppercase(),
            queue: result.resolved_queue().to_string(),
            action: result.final_action().headline().to_string(),
        }
    }
}

fn preview(subject: &str) -> String {
    if subject.chars().count() > SUBJECT_PREVIEW_CHARS {
        let head: String = subject.chars().take(SUBJECT_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        subject.to_string()
    }
}
