//! Label domains for the three cascade stages.
//!
//! Ticket type and priority are closed enumerations. Queue destinations are
//! deployment-defined, so [`QueueName`] only guarantees a non-empty trimmed
//! identifier; the accepted set comes from the loaded queue artifact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("unknown ticket type: {0:?}")]
    UnknownTicketType(String),
    #[error("unknown priority: {0:?}")]
    UnknownPriority(String),
    #[error("queue name is empty")]
    EmptyQueue,
}

/// Kind of ticket predicted by the first stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketType {
    Incident,
    Request,
    Problem,
    Change,
}

impl TicketType {
    pub const ALL: [TicketType; 4] = [Self::Incident, Self::Request, Self::Problem, Self::Change];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incident => "Incident",
            Self::Request => "Request",
            Self::Problem => "Problem",
            Self::Change => "Change",
        }
    }
}

impl FromStr for TicketType {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LabelError::UnknownTicketType(s.to_string()))
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency level predicted by the second stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Placeholder priority fed to the type stage, which runs before any
    /// priority has been predicted.
    pub const DEFAULT: Priority = Priority::Medium;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl FromStr for Priority {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LabelError::UnknownPriority(s.to_string()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing destination predicted by the third stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QueueName(String);

impl QueueName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, LabelError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(LabelError::EmptyQueue);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for QueueName {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QueueName> for String {
    fn from(value: QueueName) -> Self {
        value.0
    }
}

impl FromStr for QueueName {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_type_parses_case_insensitively() {
        assert_eq!("incident".parse::<TicketType>(), Ok(TicketType::Incident));
        assert_eq!(" CHANGE ".parse::<TicketType>(), Ok(TicketType::Change));
        assert_eq!(
            "Incidnet".parse::<TicketType>(),
            Err(LabelError::UnknownTicketType("Incidnet".into()))
        );
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("medium".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn display_matches_canonical_label() {
        for t in TicketType::ALL {
            assert_eq!(t.to_string().parse::<TicketType>(), Ok(t));
        }
        for p in Priority::ALL {
            assert_eq!(p.to_string().parse::<Priority>(), Ok(p));
        }
        assert_eq!(Priority::DEFAULT.to_string(), "Medium");
    }

    #[test]
    fn queue_name_trims_and_rejects_empty() {
        assert_eq!(QueueName::new("  Technical ").unwrap().as_str(), "Technical");
        assert_eq!(QueueName::new("   "), Err(LabelError::EmptyQueue));
    }

    #[test]
    fn queue_name_serde_validates() {
        let q: QueueName = serde_json::from_str("\"Billing and Payments\"").unwrap();
        assert_eq!(q.as_str(), "Billing and Payments");
        assert!(serde_json::from_str::<QueueName>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"Billing and Payments\"");
    }
}
