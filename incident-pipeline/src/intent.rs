use common::error::AppError;
use regex::Regex;

const CREATE_PHRASE: &str = "create incident";
const INCIDENT_NUMBER_PATTERN: &str = r"INC\d+";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create,
    Analyze { incident_number: String },
}

/// Decides between the create and analyze flows for one message.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    incident_number: Regex,
}

impl IntentClassifier {
    pub fn new() -> Result<Self, AppError> {
        let incident_number =
            Regex::new(INCIDENT_NUMBER_PATTERN).map_err(|e| AppError::Pattern(e.to_string()))?;
        Ok(Self { incident_number })
    }

    /// The create phrase wins over any incident number in the same message.
    /// Otherwise the first `INC<digits>` occurrence is the subject; the prefix
    /// is matched case-sensitively.
    pub fn classify(&self, message: &str) -> Result<Intent, AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::EmptyInput);
        }

        if message.to_lowercase().contains(CREATE_PHRASE) {
            return Ok(Intent::Create);
        }

        self.incident_number
            .find(message)
            .map(|m| Intent::Analyze {
                incident_number: m.as_str().to_string(),
            })
            .ok_or(AppError::NoIncidentNumberFound)
    }
}
