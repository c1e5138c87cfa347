//! Batch triage of JSON-lines tickets.
//!
//! Each line is one ticket object (`subject`, `body`, optional
//! `queue_hint`). Tickets are independent, so they run concurrently on the
//! blocking pool against one shared engine.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use supportbrain_ai::TriageEngine;
use supportbrain_core::{SharedThresholds, TicketInput, TriageResult};
use tracing::{info, warn};

/// A ticket read from the input, with its 1-based line number.
#[derive(Debug, Clone)]
pub struct NumberedTicket {
    pub line: usize,
    pub ticket: TicketInput,
}

/// Parse JSON lines, skipping blank lines. Tickets missing a subject or body
/// are dropped with a warning.
pub fn parse_tickets(input: &str) -> Result<Vec<NumberedTicket>> {
    let mut tickets = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let ticket: TicketInput =
            serde_json::from_str(raw).with_context(|| format!("line {line}: invalid ticket"))?;
        if !ticket.is_complete() {
            warn!(line, "ticket needs both subject and body, skipping");
            continue;
        }
        tickets.push(NumberedTicket { line, ticket });
    }
    Ok(tickets)
}

pub fn read_tickets(path: &Path) -> Result<Vec<NumberedTicket>> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_tickets(&input)
}

/// Triage every ticket, each against the thresholds current when its worker
/// starts. Results keep input order.
pub async fn triage_all(
    engine: Arc<TriageEngine>,
    tickets: Vec<NumberedTicket>,
    thresholds: &SharedThresholds,
) -> Result<Vec<(NumberedTicket, TriageResult)>> {
    let count = tickets.len();
    let tasks = tickets.into_iter().map(|numbered| {
        let engine = Arc::clone(&engine);
        let thresholds = thresholds.clone();
        tokio::task::spawn_blocking(move || {
            let result = engine
                .run(&numbered.ticket, thresholds.snapshot())
                .with_context(|| format!("line {}", numbered.line))?;
            Ok::<_, anyhow::Error>((numbered, result))
        })
    });

    let mut out = Vec::with_capacity(count);
    for joined in join_all(tasks).await {
        out.push(joined.context("triage worker panicked")??);
    }
    info!(count, "batch triaged");
    Ok(out)
}
