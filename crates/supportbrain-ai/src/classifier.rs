//! Classifier port shared by the three cascade stages.
//!
//! Implementations only produce a probability distribution over their label
//! set. Picking the label and its confidence (the maximum probability) is
//! done once here, so every backend reports confidence the same way.

use supportbrain_core::{FeatureRecord, LabelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("feature columns {found:?} do not match expected {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("malformed probability distribution: {0}")]
    MalformedOutput(String),

    #[error("predicted label outside the stage's domain: {0}")]
    UnexpectedLabel(#[from] LabelError),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Top label of a distribution and its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    /// Pick the arg-max label from a distribution aligned with `labels`.
    ///
    /// Rejects empty or length-mismatched distributions and any value that is
    /// not a finite probability. Ties resolve to the earliest label.
    pub fn from_distribution(
        labels: &[String],
        probabilities: &[f32],
    ) -> Result<Self, ClassifierError> {
        if probabilities.is_empty() {
            return Err(ClassifierError::MalformedOutput(
                "empty distribution".into(),
            ));
        }
        if probabilities.len() != labels.len() {
            return Err(ClassifierError::MalformedOutput(format!(
                "{} probabilities for {} labels",
                probabilities.len(),
                labels.len()
            )));
        }
        if let Some(bad) = probabilities
            .iter()
            .find(|p| !p.is_finite() || !(0.0..=1.0).contains(*p))
        {
            return Err(ClassifierError::MalformedOutput(format!(
                "probability {bad} outside [0, 1]"
            )));
        }

        let mut best = 0;
        for (i, &p) in probabilities.iter().enumerate().skip(1) {
            if p > probabilities[best] {
                best = i;
            }
        }

        Ok(Self {
            label: labels[best].clone(),
            confidence: probabilities[best],
        })
    }
}

/// A trained classifier, loaded once and read-only afterwards.
///
/// Must be safe to call from several threads at once.
pub trait Classifier: Send + Sync {
    /// Artifact name, used in logs and errors.
    fn name(&self) -> &str;

    /// Label set, in the order of [`predict_proba`](Self::predict_proba) output.
    fn labels(&self) -> &[String];

    /// Probability of each label for one feature record.
    fn predict_proba(&self, features: &FeatureRecord) -> Result<Vec<f32>, ClassifierError>;

    /// Most probable label, with its probability as confidence.
    fn predict_with_confidence(
        &self,
        features: &FeatureRecord,
    ) -> Result<Prediction, ClassifierError> {
        let probabilities = self.predict_proba(features)?;
        Prediction::from_distribution(self.labels(), &probabilities)
    }

    /// Most probable label.
    fn predict(&self, features: &FeatureRecord) -> Result<String, ClassifierError> {
        Ok(self.predict_with_confidence(features)?.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn confidence_is_max_probability() {
        let p = Prediction::from_distribution(
            &labels(&["Incident", "Request", "Problem"]),
            &[0.1, 0.7, 0.2],
        )
        .unwrap();
        assert_eq!(p.label, "Request");
        assert_eq!(p.confidence, 0.7);
    }

    #[test]
    fn ties_pick_first_label() {
        let p = Prediction::from_distribution(&labels(&["Low", "High"]), &[0.5, 0.5]).unwrap();
        assert_eq!(p.label, "Low");
    }

    #[test]
    fn rejects_malformed_distributions() {
        let l = labels(&["a", "b"]);
        assert!(matches!(
            Prediction::from_distribution(&l, &[]),
            Err(ClassifierError::MalformedOutput(_))
        ));
        assert!(matches!(
            Prediction::from_distribution(&l, &[1.0]),
            Err(ClassifierError::MalformedOutput(_))
        ));
        assert!(matches!(
            Prediction::from_distribution(&l, &[f32::NAN, 0.5]),
            Err(ClassifierError::MalformedOutput(_))
        ));
        assert!(matches!(
            Prediction::from_distribution(&l, &[1.2, -0.2]),
            Err(ClassifierError::MalformedOutput(_))
        ));
    }

    struct Fixed(Vec<String>, Vec<f32>);

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        fn labels(&self) -> &[String] {
            &self.0
        }
        fn predict_proba(&self, _: &FeatureRecord) -> Result<Vec<f32>, ClassifierError> {
            Ok(self.1.clone())
        }
    }

    #[test]
    fn provided_methods_agree() {
        let clf = Fixed(labels(&["Billing", "Technical"]), vec![0.3, 0.7]);
        let features = FeatureRecord::for_type_stage("x", "General");
        assert_eq!(clf.predict(&features).unwrap(), "Technical");
        let p = clf.predict_with_confidence(&features).unwrap();
        assert_eq!(p.label, "Technical");
        assert_eq!(p.confidence, 0.7);
    }
}
