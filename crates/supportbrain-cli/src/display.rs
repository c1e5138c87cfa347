//! Terminal rendering for triage results, session history, and the log.

use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use supportbrain_core::TriageResult;
use supportbrain_store::{HistoryEntry, LogStats};

const LABEL_WIDTH: usize = 14;

// ── Result card ──

/// Card for one triaged ticket: the three stage outcomes, then the action.
pub fn format_result_card(subject: &str, result: &TriageResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {subject} ===\n\n"));
    out.push_str(&metric(
        "Ticket Type",
        result.ticket_type().as_str(),
        result.type_confidence(),
    ));
    out.push_str(&metric(
        "Priority",
        &result.resolved_priority().as_str().to_uppercase(),
        result.priority_confidence(),
    ));
    out.push_str(&metric(
        "Queue",
        result.resolved_queue().as_str(),
        result.queue_confidence(),
    ));
    out.push('\n');
    out.push_str(&format!("{}\n", result.final_action()));
    match result.auto_route_to() {
        Some(queue) => out.push_str(&format!("AUTO-ROUTED TO → {queue}\n")),
        None => out.push_str("No auto-routing, model not confident enough\n"),
    }
    out
}

fn metric(label: &str, value: &str, confidence: f32) -> String {
    format!(
        "  {label:<LABEL_WIDTH$} {value:<16} {:>6.1}%\n",
        confidence * 100.0
    )
}

// ── Session history ──

pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No tickets yet\n".to_string();
    }
    let mut out = format!(
        "{:<9} {:<48} {:<8} {:<9} {:<14} {}\n",
        "Time", "Subject", "Type", "Priority", "Queue", "Action"
    );
    for e in entries {
        out.push_str(&format!(
            "{:<9} {:<48} {:<8} {:<9} {:<14} {}\n",
            e.time, e.subject, e.ticket_type, e.priority, e.queue, e.action
        ));
    }
    out
}

// ── Log ──

/// The last `limit` rows of the log as an ASCII table.
pub fn format_log(batch: &RecordBatch, limit: Option<usize>) -> anyhow::Result<String> {
    let rows = batch.num_rows();
    if rows == 0 {
        return Ok("Log is empty\n".to_string());
    }
    let shown = limit.map_or(rows, |n| n.min(rows));
    let tail = batch.slice(rows - shown, shown);
    Ok(format!("{}\n", pretty_format_batches(&[tail])?))
}

pub fn format_stats(stats: &LogStats, session: Option<usize>) -> String {
    let mut out = format!("  {:<28} {}\n", "Total processed (all time)", stats.total);
    if let Some(rate) = stats.auto_routed_rate() {
        out.push_str(&format!("  {:<28} {rate:.1}%\n", "Auto-routed rate (all time)"));
    }
    if let Some(n) = session {
        out.push_str(&format!("  {:<28} {n}\n", "This session"));
    }
    out
}
