//! Loading the three stage classifiers from a model directory.
//!
//! All three must load before the engine is ready; a missing or malformed
//! artifact is fatal at start-up rather than a per-request error.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::classifier::Classifier;
use crate::linear::LinearClassifier;
use crate::stage::Stage;

/// Artifact file names in cascade order.
pub const ARTIFACT_FILES: [&str; 3] = [
    Stage::Type.artifact_file(),
    Stage::Priority.artifact_file(),
    Stage::Queue.artifact_file(),
];

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// A stage classifier could not be made ready.
#[derive(Debug, Error)]
#[error("{stage} classifier unavailable: {source}")]
pub struct ArtifactUnavailable {
    pub stage: Stage,
    #[source]
    pub source: ArtifactError,
}

/// The three loaded stage classifiers.
pub struct ModelSet {
    pub type_model: Box<dyn Classifier>,
    pub priority_model: Box<dyn Classifier>,
    pub queue_model: Box<dyn Classifier>,
}

impl ModelSet {
    /// Load every stage artifact from `dir`.
    ///
    /// Each artifact must declare exactly its stage's input columns, and every
    /// label it can emit must belong to the stage's label domain.
    pub fn load(dir: &Path) -> Result<Self, ArtifactUnavailable> {
        let models = Self {
            type_model: load_stage(dir, Stage::Type)?,
            priority_model: load_stage(dir, Stage::Priority)?,
            queue_model: load_stage(dir, Stage::Queue)?,
        };
        info!(dir = %dir.display(), "all stage classifiers ready");
        Ok(models)
    }
}

fn load_stage(dir: &Path, stage: Stage) -> Result<Box<dyn Classifier>, ArtifactUnavailable> {
    let unavailable = |source| ArtifactUnavailable { stage, source };

    let clf = LinearClassifier::load(&dir.join(stage.artifact_file())).map_err(unavailable)?;
    check_stage_contract(stage, &clf).map_err(unavailable)?;
    Ok(Box::new(clf))
}

fn check_stage_contract(stage: Stage, clf: &LinearClassifier) -> Result<(), ArtifactError> {
    let invalid = |reason: String| ArtifactError::Invalid {
        name: clf.name().to_string(),
        reason,
    };

    let expected = stage.input_columns();
    let declared = clf.inputs();
    if declared.len() != expected.len() || declared.iter().zip(expected).any(|(d, e)| d != e) {
        return Err(invalid(format!(
            "inputs {declared:?} do not match {stage} stage columns {expected:?}"
        )));
    }

    for label in clf.labels() {
        stage
            .check_label(label)
            .map_err(|e| invalid(format!("label {label:?}: {e}")))?;
    }
    Ok(())
}
