//! Inference layer: classifier port, artifact-backed classifiers, and the triage cascade.

pub mod cascade;
pub mod classifier;
pub mod linear;
pub mod models;
pub mod stage;

pub use cascade::{TriageEngine, TriageError};
pub use classifier::{Classifier, ClassifierError, Prediction};
pub use linear::{LinearArtifact, LinearClassifier};
pub use models::{ARTIFACT_FILES, ArtifactError, ArtifactUnavailable, ModelSet};
pub use stage::Stage;
