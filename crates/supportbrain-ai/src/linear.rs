//! Linear text classifier loaded from a JSON artifact.
//!
//! Scores a feature record as a multinomial logistic regression: per-label
//! intercept, plus token weights for every n-gram of the text column, plus
//! one-hot weights for each categorical column. Softmax over the logits gives
//! the label distribution.
//!
//! # Artifact layout
//!
//! ```json
//! {
//!   "name": "priority_classifier",
//!   "labels": ["Low", "Medium", "High"],
//!   "inputs": ["text", "queue", "ticket_type"],
//!   "text_column": "text",
//!   "max_ngram": 2,
//!   "intercept": [0.1, 0.3, -0.4],
//!   "token_weights": { "outage": [-1.0, 0.2, 1.4] },
//!   "categorical_weights": { "ticket_type": { "Incident": [-0.5, 0.0, 0.8] } }
//! }
//! ```
//!
//! Tokens and categorical values missing from the artifact contribute nothing.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use supportbrain_core::FeatureRecord;
use tracing::info;

use crate::classifier::{Classifier, ClassifierError};
use crate::models::ArtifactError;

fn default_text_column() -> String {
    "text".to_string()
}

fn default_max_ngram() -> usize {
    1
}

/// Serialized form of a [`LinearClassifier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub name: String,
    pub labels: Vec<String>,
    /// Feature columns the model was trained on, in order.
    pub inputs: Vec<String>,
    #[serde(default = "default_text_column")]
    pub text_column: String,
    #[serde(default = "default_max_ngram")]
    pub max_ngram: usize,
    pub intercept: Vec<f32>,
    #[serde(default)]
    pub token_weights: HashMap<String, Vec<f32>>,
    /// column → value → per-label weights.
    #[serde(default)]
    pub categorical_weights: HashMap<String, HashMap<String, Vec<f32>>>,
}

/// Multinomial linear model over n-gram and categorical features.
pub struct LinearClassifier {
    artifact: LinearArtifact,
}

impl LinearClassifier {
    /// Build from a parsed artifact, checking that every weight vector has
    /// one entry per label.
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self, ArtifactError> {
        let invalid = |reason: String| ArtifactError::Invalid {
            name: artifact.name.clone(),
            reason,
        };

        let n = artifact.labels.len();
        if n == 0 {
            return Err(invalid("empty label set".into()));
        }
        if artifact.max_ngram == 0 {
            return Err(invalid("max_ngram must be at least 1".into()));
        }
        if !artifact.inputs.contains(&artifact.text_column) {
            return Err(invalid(format!(
                "text column {:?} not among inputs {:?}",
                artifact.text_column, artifact.inputs
            )));
        }
        if artifact.intercept.len() != n {
            return Err(invalid(format!(
                "intercept has {} entries for {n} labels",
                artifact.intercept.len()
            )));
        }
        if let Some((token, _)) = artifact.token_weights.iter().find(|(_, w)| w.len() != n) {
            return Err(invalid(format!("token {token:?} has wrong weight count")));
        }
        for (column, table) in &artifact.categorical_weights {
            if !artifact.inputs.contains(column) {
                return Err(invalid(format!("categorical column {column:?} not an input")));
            }
            if let Some((value, _)) = table.iter().find(|(_, w)| w.len() != n) {
                return Err(invalid(format!(
                    "{column}={value:?} has wrong weight count"
                )));
            }
        }

        Ok(Self { artifact })
    }

    /// Load an artifact file from disk.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: LinearArtifact =
            serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let clf = Self::from_artifact(artifact)?;
        info!(
            name = %clf.artifact.name,
            labels = clf.artifact.labels.len(),
            tokens = clf.artifact.token_weights.len(),
            path = %path.display(),
            "loaded linear classifier"
        );
        Ok(clf)
    }

    /// Declared input columns, in order.
    pub fn inputs(&self) -> &[String] {
        &self.artifact.inputs
    }

    fn check_columns(&self, features: &FeatureRecord) -> Result<(), ClassifierError> {
        if features.matches_columns(&self.artifact.inputs) {
            return Ok(());
        }
        Err(ClassifierError::FeatureMismatch {
            expected: self.artifact.inputs.clone(),
            found: features.names().map(str::to_string).collect(),
        })
    }

    fn logits(&self, features: &FeatureRecord) -> Vec<f32> {
        let mut logits = self.artifact.intercept.clone();

        for (column, value) in features.iter() {
            if column == self.artifact.text_column {
                for gram in ngrams(value, self.artifact.max_ngram) {
                    if let Some(w) = self.artifact.token_weights.get(&gram) {
                        add_assign(&mut logits, w);
                    }
                }
            } else if let Some(table) = self.artifact.categorical_weights.get(column)
                && let Some(w) = table.get(value)
            {
                add_assign(&mut logits, w);
            }
        }

        logits
    }
}

impl Classifier for LinearClassifier {
    fn name(&self) -> &str {
        &self.artifact.name
    }

    fn labels(&self) -> &[String] {
        &self.artifact.labels
    }

    fn predict_proba(&self, features: &FeatureRecord) -> Result<Vec<f32>, ClassifierError> {
        self.check_columns(features)?;
        Ok(softmax(&self.logits(features)))
    }
}

// ── Scoring helpers ──

/// All 1..=max_n word n-grams of whitespace-separated text.
fn ngrams(text: &str, max_n: usize) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut grams = Vec::new();
    for n in 1..=max_n {
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}

fn add_assign(acc: &mut [f32], w: &[f32]) {
    for (a, &b) in acc.iter_mut().zip(w) {
        *a += b;
    }
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
