//! Inbound ticket as submitted by a caller.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Queue fed to the type and priority stages when the caller gave no hint.
pub const DEFAULT_QUEUE: &str = "General";

/// A support ticket awaiting triage. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketInput {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub queue_hint: Option<String>,
}

impl TicketInput {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            queue_hint: None,
        }
    }

    pub fn with_queue_hint(mut self, hint: impl Into<String>) -> Self {
        self.queue_hint = Some(hint.into());
        self
    }

    /// Normalised subject + body.
    pub fn normalized_text(&self) -> String {
        normalize(&self.subject, &self.body)
    }

    /// The caller's queue hint, trimmed, or [`DEFAULT_QUEUE`] when the hint is
    /// absent, empty, or whitespace only.
    pub fn resolved_queue(&self) -> &str {
        self.queue_hint
            .as_deref()
            .map(str::trim)
            .filter(|hint| !hint.is_empty())
            .unwrap_or(DEFAULT_QUEUE)
    }

    /// Whether both subject and body carry visible text.
    pub fn is_complete(&self) -> bool {
        !self.subject.trim().is_empty() && !self.body.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_hint_defaults_to_general() {
        assert_eq!(TicketInput::new("s", "b").resolved_queue(), "General");
        assert_eq!(
            TicketInput::new("s", "b").with_queue_hint("").resolved_queue(),
            "General"
        );
        assert_eq!(
            TicketInput::new("s", "b").with_queue_hint(" \t ").resolved_queue(),
            "General"
        );
    }

    #[test]
    fn queue_hint_is_trimmed() {
        let ticket = TicketInput::new("s", "b").with_queue_hint("  billing ");
        assert_eq!(ticket.resolved_queue(), "billing");
    }

    #[test]
    fn missing_fields_deserialize_empty() {
        let ticket: TicketInput = serde_json::from_str(r#"{"subject": "VPN down"}"#).unwrap();
        assert_eq!(ticket.subject, "VPN down");
        assert_eq!(ticket.body, "");
        assert!(ticket.queue_hint.is_none());
        assert!(!ticket.is_complete());
    }

    #[test]
    fn null_queue_hint() {
        let ticket: TicketInput =
            serde_json::from_str(r#"{"subject": "a", "body": "b", "queue_hint": null}"#).unwrap();
        assert_eq!(ticket.resolved_queue(), DEFAULT_QUEUE);
        assert!(ticket.is_complete());
    }
}
