use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::AppError;

/// Payload of a successful analyze flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub incident_number: String,
    pub category: String,
    pub analysis: String,
}

/// The one response shape every `/chat` call produces.
///
/// On the wire this is always `{"mode": .., "data": .., "error": ..}`; an
/// `Error` never carries data and the other variants never carry an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatResponse {
    /// The record the ticketing system echoed back after creation, unmodified.
    Create(Value),
    Analyze(AnalysisReport),
    Error(String),
}

impl ChatResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Analyze(_) => "analyze",
            Self::Error(_) => "error",
        }
    }
}

impl From<AppError> for ChatResponse {
    fn from(err: AppError) -> Self {
        Self::Error(err.to_string())
    }
}

impl Serialize for ChatResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_struct("ChatResponse", 3)?;
        envelope.serialize_field("mode", self.mode())?;
        match self {
            Self::Create(record) => {
                envelope.serialize_field("data", record)?;
                envelope.serialize_field("error", &None::<String>)?;
            }
            Self::Analyze(report) => {
                envelope.serialize_field("data", report)?;
                envelope.serialize_field("error", &None::<String>)?;
            }
            Self::Error(message) => {
                envelope.serialize_field("data", &None::<Value>)?;
                envelope.serialize_field("error", message)?;
            }
        }
        envelope.end()
    }
}
