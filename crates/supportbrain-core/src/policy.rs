//! Auto-action policy: turns three stage confidences into one routing action.
//!
//! Priority and queue each have an independently tunable threshold because a
//! wrong queue and a wrong urgency cost different amounts. The final action
//! tells the agent exactly which confirmation, if any, is still theirs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::thresholds::Thresholds;

/// Fixed type-confidence floor for [`FinalAction::AutoTypeOnly`]. Not tunable.
pub const TYPE_ONLY_CONFIDENCE: f32 = 0.90;

/// Outcome of the policy, in decreasing order of automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalAction {
    /// Priority and queue both applied.
    FullyAutoTriaged,
    /// Queue applied; agent confirms priority.
    AutoRouted,
    /// Priority applied; agent confirms queue.
    AutoPriority,
    /// Only the ticket type is trusted.
    AutoTypeOnly,
    /// Nothing trusted.
    HumanReviewSuggested,
}

impl FinalAction {
    pub const ALL: [FinalAction; 5] = [
        Self::FullyAutoTriaged,
        Self::AutoRouted,
        Self::AutoPriority,
        Self::AutoTypeOnly,
        Self::HumanReviewSuggested,
    ];

    /// Ordered decision list; the first matching rule wins.
    pub fn select(auto_priority: bool, auto_queue: bool, type_confidence: f32) -> Self {
        if auto_priority && auto_queue {
            Self::FullyAutoTriaged
        } else if auto_queue {
            Self::AutoRouted
        } else if auto_priority {
            Self::AutoPriority
        } else if type_confidence >= TYPE_ONLY_CONFIDENCE {
            Self::AutoTypeOnly
        } else {
            Self::HumanReviewSuggested
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullyAutoTriaged => "FULLY_AUTO_TRIAGED",
            Self::AutoRouted => "AUTO_ROUTED",
            Self::AutoPriority => "AUTO_PRIORITY",
            Self::AutoTypeOnly => "AUTO_TYPE_ONLY",
            Self::HumanReviewSuggested => "HUMAN_REVIEW_SUGGESTED",
        }
    }

    /// Short display name, e.g. `AUTO-ROUTED`.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::FullyAutoTriaged => "FULLY AUTO-TRIAGED",
            Self::AutoRouted => "AUTO-ROUTED",
            Self::AutoPriority => "AUTO-PRIORITY",
            Self::AutoTypeOnly => "AUTO-TYPE ONLY",
            Self::HumanReviewSuggested => "HUMAN REVIEW SUGGESTED",
        }
    }

    /// What the agent still has to do.
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::FullyAutoTriaged => "No human needed",
            Self::AutoRouted => "Agent only confirms priority",
            Self::AutoPriority => "Agent confirms queue",
            Self::AutoTypeOnly => "Agent decides priority & queue",
            Self::HumanReviewSuggested => "Low overall confidence",
        }
    }

    /// Human-readable label, e.g. `FULLY AUTO-TRIAGED → No human needed`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Whether the queue prediction was applied.
    pub fn is_auto_routed(&self) -> bool {
        matches!(self, Self::FullyAutoTriaged | Self::AutoRouted)
    }
}

impl fmt::Display for FinalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.headline(), self.explanation())
    }
}

/// Which predictions may be applied without confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<P, Q> {
    pub auto_priority: Option<P>,
    pub auto_queue: Option<Q>,
    pub final_action: FinalAction,
}

/// Apply the thresholds to the three stage outcomes.
///
/// A confidence exactly equal to its threshold auto-applies.
pub fn decide<P: Clone, Q: Clone>(
    type_confidence: f32,
    priority: &P,
    priority_confidence: f32,
    queue: &Q,
    queue_confidence: f32,
    thresholds: &Thresholds,
) -> Decision<P, Q> {
    let auto_priority =
        (priority_confidence >= thresholds.priority_threshold()).then(|| priority.clone());
    let auto_queue = (queue_confidence >= thresholds.queue_threshold()).then(|| queue.clone());

    let final_action = FinalAction::select(
        auto_priority.is_some(),
        auto_queue.is_some(),
        type_confidence,
    );

    Decision {
        auto_priority,
        auto_queue,
        final_action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn thresholds(p: f32, q: f32) -> Thresholds {
        Thresholds::new(p, q).unwrap()
    }

    #[test]
    fn boundary_is_inclusive() {
        let t = thresholds(0.80, 0.85);
        let d = decide(0.5, &"Medium", 0.80, &"Technical", 0.85, &t);
        assert_eq!(d.auto_priority, Some("Medium"));
        assert_eq!(d.auto_queue, Some("Technical"));
        assert_eq!(d.final_action, FinalAction::FullyAutoTriaged);
    }

    #[test]
    fn just_below_boundary_is_absent() {
        let t = thresholds(0.80, 0.85);
        let d = decide(0.5, &"Medium", 0.7999, &"Technical", 0.8499, &t);
        assert_eq!(d.auto_priority, None);
        assert_eq!(d.auto_queue, None);
    }

    #[test]
    fn auto_present_iff_confidence_meets_threshold() {
        let steps: Vec<f32> = (0..=20).map(|i| i as f32 * 0.05).collect();
        for &t in steps.iter().filter(|&&t| t >= 0.5) {
            let th = thresholds(t, t);
            for &c in &steps {
                let d = decide(0.0, &1u8, c, &2u8, c, &th);
                assert_eq!(d.auto_priority.is_some(), c >= t, "c={c} t={t}");
                assert_eq!(d.auto_queue.is_some(), c >= t, "c={c} t={t}");
            }
        }
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(FinalAction::select(true, true, 0.1), FinalAction::FullyAutoTriaged);
        assert_eq!(FinalAction::select(false, true, 0.99), FinalAction::AutoRouted);
        assert_eq!(FinalAction::select(true, false, 0.99), FinalAction::AutoPriority);
        assert_eq!(FinalAction::select(false, false, 0.90), FinalAction::AutoTypeOnly);
        assert_eq!(
            FinalAction::select(false, false, 0.8999),
            FinalAction::HumanReviewSuggested
        );
    }

    #[test]
    fn final_action_exhaustive_and_exclusive() {
        let mut seen = HashSet::new();
        for auto_priority in [false, true] {
            for auto_queue in [false, true] {
                for type_confidence in [0.5, 0.95] {
                    let action = FinalAction::select(auto_priority, auto_queue, type_confidence);
                    let expected = match (auto_priority, auto_queue, type_confidence >= 0.90) {
                        (true, true, _) => FinalAction::FullyAutoTriaged,
                        (false, true, _) => FinalAction::AutoRouted,
                        (true, false, _) => FinalAction::AutoPriority,
                        (false, false, true) => FinalAction::AutoTypeOnly,
                        (false, false, false) => FinalAction::HumanReviewSuggested,
                    };
                    assert_eq!(action, expected);
                    seen.insert(action);
                }
            }
        }
        assert_eq!(seen.len(), FinalAction::ALL.len());
    }

    #[test]
    fn type_floor_ignores_thresholds() {
        // Thresholds never move the fixed type floor.
        let t = thresholds(1.0, 1.0);
        let d = decide(0.89, &"Low", 0.99, &"Billing", 0.99, &t);
        assert_eq!(d.final_action, FinalAction::HumanReviewSuggested);
        let d = decide(0.90, &"Low", 0.99, &"Billing", 0.99, &t);
        assert_eq!(d.final_action, FinalAction::AutoTypeOnly);
    }

    #[test]
    fn labels_render_with_explanation() {
        assert_eq!(
            FinalAction::FullyAutoTriaged.label(),
            "FULLY AUTO-TRIAGED → No human needed"
        );
        assert_eq!(
            FinalAction::HumanReviewSuggested.to_string(),
            "HUMAN REVIEW SUGGESTED → Low overall confidence"
        );
        assert_eq!(FinalAction::AutoTypeOnly.as_str(), "AUTO_TYPE_ONLY");
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&FinalAction::AutoRouted).unwrap();
        assert_eq!(json, "\"AUTO_ROUTED\"");
    }
}
