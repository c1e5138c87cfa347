//! Aggregated triage outcome for one ticket.

use serde::{Serialize, Serializer};

use crate::labels::{Priority, QueueName, TicketType};
use crate::policy::{Decision, FinalAction};

/// A stage's label with the classifier's confidence in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagePrediction<L> {
    pub label: L,
    /// Maximum posterior probability over the stage's label set.
    pub confidence: f32,
}

impl<L> StagePrediction<L> {
    pub fn new(label: L, confidence: f32) -> Self {
        Self { label, confidence }
    }
}

/// Result of running one ticket through the cascade and the policy.
///
/// Serializes to the flat field layout consumed by log writers and UIs, with
/// `final_action` rendered as its human-readable label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageResult {
    ticket_type: TicketType,
    type_confidence: f32,
    predicted_priority: Priority,
    priority_confidence: f32,
    auto_set_priority: Option<Priority>,
    predicted_queue: QueueName,
    queue_confidence: f32,
    auto_route_to: Option<QueueName>,
    #[serde(serialize_with = "serialize_action_label")]
    final_action: FinalAction,
}

impl TriageResult {
    pub fn new(
        ticket_type: StagePrediction<TicketType>,
        priority: StagePrediction<Priority>,
        queue: StagePrediction<QueueName>,
        decision: Decision<Priority, QueueName>,
    ) -> Self {
        Self {
            ticket_type: ticket_type.label,
            type_confidence: ticket_type.confidence,
            predicted_priority: priority.label,
            priority_confidence: priority.confidence,
            auto_set_priority: decision.auto_priority,
            predicted_queue: queue.label,
            queue_confidence: queue.confidence,
            auto_route_to: decision.auto_queue,
            final_action: decision.final_action,
        }
    }

    pub fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    pub fn type_confidence(&self) -> f32 {
        self.type_confidence
    }

    pub fn predicted_priority(&self) -> Priority {
        self.predicted_priority
    }

    pub fn priority_confidence(&self) -> f32 {
        self.priority_confidence
    }

    pub fn auto_set_priority(&self) -> Option<Priority> {
        self.auto_set_priority
    }

    pub fn predicted_queue(&self) -> &QueueName {
        &self.predicted_queue
    }

    pub fn queue_confidence(&self) -> f32 {
        self.queue_confidence
    }

    pub fn auto_route_to(&self) -> Option<&QueueName> {
        self.auto_route_to.as_ref()
    }

    pub fn final_action(&self) -> FinalAction {
        self.final_action
    }

    /// The auto-set priority if there is one, else the prediction.
    pub fn resolved_priority(&self) -> Priority {
        self.auto_set_priority.unwrap_or(self.predicted_priority)
    }

    /// The auto-routed queue if there is one, else the prediction.
    pub fn resolved_queue(&self) -> &QueueName {
        self.auto_route_to.as_ref().unwrap_or(&self.predicted_queue)
    }
}

fn serialize_action_label<S: Serializer>(action: &FinalAction, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(action)
}
