//! Ordered feature records passed to each cascade stage.
//!
//! Column names and order must match what each classifier was trained on.
//! A wrong name does not fail loudly inside most models, it just produces a
//! meaningless prediction, so records are only built through the per-stage
//! constructors below.

use crate::labels::{Priority, TicketType};

pub const TEXT: &str = "text";
pub const QUEUE: &str = "queue";
pub const PRIORITY: &str = "priority";
pub const TICKET_TYPE: &str = "ticket_type";

/// Column layout of the type stage.
pub const TYPE_STAGE_COLUMNS: [&str; 3] = [TEXT, QUEUE, PRIORITY];
/// Column layout of the priority stage.
pub const PRIORITY_STAGE_COLUMNS: [&str; 3] = [TEXT, QUEUE, TICKET_TYPE];
/// Column layout of the queue stage. The caller's queue hint is absent.
pub const QUEUE_STAGE_COLUMNS: [&str; 3] = [TEXT, TICKET_TYPE, PRIORITY];

/// One row of named string features, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    fields: Vec<(&'static str, String)>,
}

impl FeatureRecord {
    /// Build a record from explicit columns.
    pub fn from_pairs(fields: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// `{text, queue, priority}` with the placeholder [`Priority::DEFAULT`].
    pub fn for_type_stage(text: &str, queue: &str) -> Self {
        Self::from_pairs([
            (TEXT, text.to_string()),
            (QUEUE, queue.to_string()),
            (PRIORITY, Priority::DEFAULT.as_str().to_string()),
        ])
    }

    /// `{text, queue, ticket_type}`.
    pub fn for_priority_stage(text: &str, queue: &str, ticket_type: TicketType) -> Self {
        Self::from_pairs([
            (TEXT, text.to_string()),
            (QUEUE, queue.to_string()),
            (TICKET_TYPE, ticket_type.as_str().to_string()),
        ])
    }

    /// `{text, ticket_type, priority}`.
    pub fn for_queue_stage(text: &str, ticket_type: TicketType, priority: Priority) -> Self {
        Self::from_pairs([
            (TEXT, text.to_string()),
            (TICKET_TYPE, ticket_type.as_str().to_string()),
            (PRIORITY, priority.as_str().to_string()),
        ])
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Value of a named column.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields.iter().map(|(n, v)| (*n, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the columns match `expected` exactly, including order.
    pub fn matches_columns(&self, expected: &[impl AsRef<str>]) -> bool {
        self.fields.len() == expected.len()
            && self
                .names()
                .zip(expected)
                .all(|(name, want)| name == want.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_stage_layout() {
        let rec = FeatureRecord::for_type_stage("printer jam", "General");
        assert!(rec.matches_columns(&TYPE_STAGE_COLUMNS));
        assert_eq!(rec.get(PRIORITY), Some("Medium"));
        assert_eq!(rec.get(QUEUE), Some("General"));
    }

    #[test]
    fn priority_stage_layout() {
        let rec = FeatureRecord::for_priority_stage("printer jam", "IT", TicketType::Incident);
        assert!(rec.matches_columns(&PRIORITY_STAGE_COLUMNS));
        assert_eq!(rec.get(TICKET_TYPE), Some("Incident"));
    }

    #[test]
    fn queue_stage_has_no_queue_column() {
        let rec =
            FeatureRecord::for_queue_stage("printer jam", TicketType::Problem, Priority::High);
        assert!(rec.matches_columns(&QUEUE_STAGE_COLUMNS));
        assert_eq!(rec.get(QUEUE), None);
        assert_eq!(rec.get(PRIORITY), Some("High"));
    }

    #[test]
    fn column_order_matters() {
        let rec = FeatureRecord::from_pairs([
            (QUEUE, "General".to_string()),
            (TEXT, "x".to_string()),
            (PRIORITY, "Medium".to_string()),
        ]);
        assert!(!rec.matches_columns(&TYPE_STAGE_COLUMNS));
        assert!(!rec.matches_columns(&["text", "queue"]));
    }
}
