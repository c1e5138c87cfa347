//! Auto-action thresholds.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted threshold value.
pub const MIN_THRESHOLD: f32 = 0.5;
/// Highest accepted threshold value.
pub const MAX_THRESHOLD: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("{name} threshold {value} is outside [0.5, 1.0]")]
    OutOfRange { name: &'static str, value: f32 },
}

/// Confidence floors above which the priority and queue predictions are
/// applied without human confirmation.
///
/// Both values are validated on construction, so a `Thresholds` in hand is
/// always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct Thresholds {
    priority_threshold: f32,
    queue_threshold: f32,
}

#[derive(Deserialize)]
struct RawThresholds {
    priority_threshold: f32,
    queue_threshold: f32,
}

impl TryFrom<RawThresholds> for Thresholds {
    type Error = ThresholdError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.priority_threshold, raw.queue_threshold)
    }
}

impl Thresholds {
    pub const DEFAULT_PRIORITY: f32 = 0.80;
    pub const DEFAULT_QUEUE: f32 = 0.85;

    pub fn new(priority_threshold: f32, queue_threshold: f32) -> Result<Self, ThresholdError> {
        check("priority", priority_threshold)?;
        check("queue", queue_threshold)?;
        Ok(Self {
            priority_threshold,
            queue_threshold,
        })
    }

    pub fn priority_threshold(&self) -> f32 {
        self.priority_threshold
    }

    pub fn queue_threshold(&self) -> f32 {
        self.queue_threshold
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            priority_threshold: Self::DEFAULT_PRIORITY,
            queue_threshold: Self::DEFAULT_QUEUE,
        }
    }
}

fn check(name: &'static str, value: f32) -> Result<(), ThresholdError> {
    // NaN fails both comparisons and is rejected here.
    if (MIN_THRESHOLD..=MAX_THRESHOLD).contains(&value) {
        Ok(())
    } else {
        Err(ThresholdError::OutOfRange { name, value })
    }
}

/// Thresholds shared between callers that may retune them between calls.
///
/// Each triage call takes one [`snapshot`](Self::snapshot) and uses it for the
/// whole cascade, so an update never lands halfway through a decision.
#[derive(Debug, Clone, Default)]
pub struct SharedThresholds {
    inner: Arc<RwLock<Thresholds>>,
}

impl SharedThresholds {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            inner: Arc::new(RwLock::new(thresholds)),
        }
    }

    pub fn snapshot(&self) -> Thresholds {
        match self.inner.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn update(&self, thresholds: Thresholds) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = thresholds;
        tracing::info!(
            priority = thresholds.priority_threshold,
            queue = thresholds.queue_threshold,
            "thresholds updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Thresholds::new(0.5, 1.0).is_ok());
        assert!(Thresholds::new(1.0, 0.5).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Thresholds::new(0.49, 0.85),
            Err(ThresholdError::OutOfRange {
                name: "priority",
                value: 0.49
            })
        );
        assert!(matches!(
            Thresholds::new(0.8, 1.01),
            Err(ThresholdError::OutOfRange { name: "queue", .. })
        ));
    }

    #[test]
    fn rejects_nan() {
        assert!(Thresholds::new(f32::NAN, 0.8).is_err());
        assert!(Thresholds::new(0.8, f32::INFINITY).is_err());
    }

    #[test]
    fn default_values() {
        let t = Thresholds::default();
        assert_eq!(t.priority_threshold(), 0.80);
        assert_eq!(t.queue_threshold(), 0.85);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Thresholds =
            serde_json::from_str(r#"{"priority_threshold": 0.7, "queue_threshold": 0.9}"#)
                .unwrap();
        assert_eq!(ok.queue_threshold(), 0.9);
        assert!(
            serde_json::from_str::<Thresholds>(
                r#"{"priority_threshold": 0.2, "queue_threshold": 0.9}"#
            )
            .is_err()
        );
    }

    #[test]
    fn shared_snapshot_sees_updates() {
        let shared = SharedThresholds::new(Thresholds::default());
        let before = shared.snapshot();
        shared.update(Thresholds::new(0.6, 0.7).unwrap());
        let after = shared.snapshot();
        assert_eq!(before, Thresholds::default());
        assert_eq!(after.priority_threshold(), 0.6);
        assert_eq!(after.queue_threshold(), 0.7);
    }
}
