use common::types::incident::IncidentRecord;
use serde::Serialize;

pub static ANALYSIS_INSTRUCTIONS: &str = r"Generate:

1. Incident Summary
2. Root Cause
3. Recommended Resolution
4. Troubleshooting Steps
5. Confidence Score (0-100%)

Use historical patterns only.";

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Asks the model for the three creation fields as a bare JSON object.
pub fn extraction_prompt(user_message: &str) -> String {
    format!(
        r#"Extract short_description, description and category from:
{user_message}

Return valid JSON only:
{{
  "short_description": "...",
  "description": "...",
  "category": "..."
}}"#
    )
}

/// Current incident plus whatever similar history was found, which may be none.
pub fn analysis_prompt(incident: &IncidentRecord, similar: &[IncidentRecord]) -> String {
    format!(
        r"You are an Enterprise ITSM AI System.

Current Incident:
{}

Similar Historical Incidents:
{}

{ANALYSIS_INSTRUCTIONS}",
        to_pretty_json(incident),
        to_pretty_json(similar),
    )
}
