//! The three cascade stages.

use std::fmt;

use supportbrain_core::features::{
    PRIORITY_STAGE_COLUMNS, QUEUE_STAGE_COLUMNS, TYPE_STAGE_COLUMNS,
};
use supportbrain_core::{LabelError, Priority, QueueName, TicketType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Type,
    Priority,
    Queue,
}

impl Stage {
    /// In cascade order.
    pub const ALL: [Stage; 3] = [Self::Type, Self::Priority, Self::Queue];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Priority => "priority",
            Self::Queue => "queue",
        }
    }

    /// File name of this stage's artifact inside the model directory.
    pub const fn artifact_file(&self) -> &'static str {
        match self {
            Self::Type => "ticket_type_classifier.json",
            Self::Priority => "priority_classifier.json",
            Self::Queue => "queue_routing.json",
        }
    }

    /// Feature columns the stage's classifier must declare, in order.
    pub fn input_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Type => &TYPE_STAGE_COLUMNS,
            Self::Priority => &PRIORITY_STAGE_COLUMNS,
            Self::Queue => &QUEUE_STAGE_COLUMNS,
        }
    }

    /// Check that a raw label belongs to this stage's domain.
    pub fn check_label(&self, label: &str) -> Result<(), LabelError> {
        match self {
            Self::Type => label.parse::<TicketType>().map(drop),
            Self::Priority => label.parse::<Priority>().map(drop),
            Self::Queue => QueueName::new(label).map(drop),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
