use serde::Serialize;
use serde_json::Value;

/// What the result panel shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultView {
    /// Input rejected before anything was sent.
    Warning { message: String },
    Error { message: String },
    Analyze {
        incident_number: String,
        category: String,
        analysis: String,
    },
    Create { record: String },
    /// A readable envelope with a mode the page does not know.
    Unexpected { raw: String },
    /// The chat endpoint answered with a non-200 status.
    ServerError { body: String },
    ConnectionFailed { message: String },
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

impl ResultView {
    pub fn empty_input() -> Self {
        Self::Warning {
            message: "Please enter a request.".to_string(),
        }
    }

    pub fn connection_failed(err: &impl std::fmt::Display) -> Self {
        Self::ConnectionFailed {
            message: format!("Connection failed: {err}"),
        }
    }

    /// Reads a `/chat` envelope loosely; a missing or unknown mode is shown
    /// raw rather than rejected.
    pub fn from_envelope(envelope: &Value) -> Self {
        match envelope.get("mode").and_then(Value::as_str) {
            Some("error") => Self::Error {
                message: text(envelope.get("error")),
            },
            Some("analyze") => {
                let data = envelope.get("data");
                let field = |name: &str| text(data.and_then(|d| d.get(name)));
                Self::Analyze {
                    incident_number: field("incident_number"),
                    category: field("category"),
                    analysis: field("analysis"),
                }
            }
            Some("create") => Self::Create {
                record: pretty(envelope.get("data").unwrap_or(&Value::Null)),
            },
            _ => Self::Unexpected {
                raw: pretty(envelope),
            },
        }
    }
}
