pub mod features;
pub mod labels;
pub mod normalize;
pub mod policy;
pub mod result;
pub mod schema;
pub mod thresholds;
pub mod ticket;

pub use features::FeatureRecord;
pub use labels::{LabelError, Priority, QueueName, TicketType};
pub use normalize::normalize;
pub use policy::{Decision, FinalAction, TYPE_ONLY_CONFIDENCE, decide};
pub use result::{StagePrediction, TriageResult};
pub use schema::triage_log;
pub use thresholds::{SharedThresholds, ThresholdError, Thresholds};
pub use ticket::{DEFAULT_QUEUE, TicketInput};
