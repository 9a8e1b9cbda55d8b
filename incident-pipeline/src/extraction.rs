use common::{
    error::AppError,
    types::incident::{NewIncident, DEFAULT_CATEGORY},
};
use serde::Deserialize;

const DEFAULT_SHORT_DESCRIPTION: &str = "AI Generated Incident";

/// Fields the model extracted from free text. Any of them may be missing or
/// null; a present field that is not a string fails the whole extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractedIncident {
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ExtractedIncident {
    /// Parses the whole completion as one JSON object; there is no attempt to
    /// recover a partial or fenced answer.
    pub fn parse(completion: &str) -> Result<Self, AppError> {
        serde_json::from_str(completion).map_err(AppError::ExtractionParse)
    }

    /// Fills absent fields: a generic title, the user's own words as the
    /// description, and the general category.
    pub fn into_new_incident(self, user_message: &str) -> NewIncident {
        NewIncident {
            short_description: self
                .short_description
                .unwrap_or_else(|| DEFAULT_SHORT_DESCRIPTION.to_string()),
            description: self
                .description
                .unwrap_or_else(|| user_message.to_string()),
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        }
    }
}
