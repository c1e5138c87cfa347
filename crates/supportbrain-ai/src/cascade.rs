//! Type → priority → queue cascade.
//!
//! Each stage feeds its predicted label into the next stage's feature record,
//! so the three calls for one ticket run strictly in order. Independent
//! tickets can share one [`TriageEngine`] across threads.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use supportbrain_core::{
    FeatureRecord, LabelError, Priority, QueueName, StagePrediction, ThresholdError,
    Thresholds, TicketInput, TicketType, TriageResult, decide,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::classifier::{Classifier, ClassifierError};
use crate::models::{ArtifactUnavailable, ModelSet};
use crate::stage::Stage;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("invalid thresholds: {0}")]
    Configuration(#[from] ThresholdError),

    #[error("{stage} stage failed: {cause}")]
    StageFailure {
        stage: Stage,
        #[source]
        cause: ClassifierError,
    },
}

impl TriageError {
    /// The stage that failed, if this is a stage failure.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::StageFailure { stage, .. } => Some(*stage),
            Self::Configuration(_) => None,
        }
    }
}

/// Runs tickets through the three stage classifiers and the auto-action policy.
pub struct TriageEngine {
    type_model: Box<dyn Classifier>,
    priority_model: Box<dyn Classifier>,
    queue_model: Box<dyn Classifier>,
}

impl TriageEngine {
    pub fn new(
        type_model: Box<dyn Classifier>,
        priority_model: Box<dyn Classifier>,
        queue_model: Box<dyn Classifier>,
    ) -> Self {
        Self {
            type_model,
            priority_model,
            queue_model,
        }
    }

    pub fn from_models(models: ModelSet) -> Self {
        Self::new(models.type_model, models.priority_model, models.queue_model)
    }

    /// Load all three stage artifacts from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ArtifactUnavailable> {
        ModelSet::load(dir).map(Self::from_models)
    }

    /// Validate raw thresholds, then triage one ticket.
    ///
    /// Out-of-range thresholds are rejected before any classifier runs.
    pub fn triage(
        &self,
        subject: &str,
        body: &str,
        queue_hint: Option<&str>,
        priority_threshold: f32,
        queue_threshold: f32,
    ) -> Result<TriageResult, TriageError> {
        let thresholds = Thresholds::new(priority_threshold, queue_threshold)?;
        let ticket = TicketInput {
            subject: subject.to_string(),
            body: body.to_string(),
            queue_hint: queue_hint.map(str::to_string),
        };
        self.run(&ticket, thresholds)
    }

    /// Triage one ticket with a single threshold snapshot.
    ///
    /// Any stage failure aborts the whole call; no partial result is built.
    pub fn run(
        &self,
        ticket: &TicketInput,
        thresholds: Thresholds,
    ) -> Result<TriageResult, TriageError> {
        let text = ticket.normalized_text();
        let queue = ticket.resolved_queue();

        let ticket_type: StagePrediction<TicketType> = predict_stage(
            Stage::Type,
            self.type_model.as_ref(),
            &FeatureRecord::for_type_stage(&text, queue),
        )?;

        let priority: StagePrediction<Priority> = predict_stage(
            Stage::Priority,
            self.priority_model.as_ref(),
            &FeatureRecord::for_priority_stage(&text, queue, ticket_type.label),
        )?;

        let routed: StagePrediction<QueueName> = predict_stage(
            Stage::Queue,
            self.queue_model.as_ref(),
            &FeatureRecord::for_queue_stage(&text, ticket_type.label, priority.label),
        )?;

        let decision = decide(
            ticket_type.confidence,
            &priority.label,
            priority.confidence,
            &routed.label,
            routed.confidence,
            &thresholds,
        );

        info!(
            ticket_type = %ticket_type.label,
            priority = %priority.label,
            queue = %routed.label,
            action = decision.final_action.as_str(),
            "ticket triaged"
        );

        Ok(TriageResult::new(ticket_type, priority, routed, decision))
    }
}

fn predict_stage<L>(
    stage: Stage,
    model: &dyn Classifier,
    features: &FeatureRecord,
) -> Result<StagePrediction<L>, TriageError>
where
    L: FromStr<Err = LabelError> + Display,
{
    let prediction = model
        .predict_with_confidence(features)
        .and_then(|p| {
            let label = p.label.parse::<L>()?;
            Ok(StagePrediction::new(label, p.confidence))
        })
        .map_err(|cause| TriageError::StageFailure { stage, cause })?;

    debug!(
        stage = stage.as_str(),
        model = model.name(),
        label = %prediction.label,
        confidence = prediction.confidence,
        "stage complete"
    );
    Ok(prediction)
}
