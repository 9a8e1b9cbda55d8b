use thiserror::Error;

// Core internal errors. The display strings double as the messages callers see
// in an error envelope, so keep them user-facing.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Empty request.")]
    EmptyInput,
    #[error("No incident number found.")]
    NoIncidentNumberFound,
    #[error("Failed to parse creation request.")]
    ExtractionParse(#[source] serde_json::Error),
    #[error("{0}")]
    IncidentFetch(String),
    #[error("Incident not found.")]
    IncidentNotFound,
    #[error("{0}")]
    IncidentCreate(String),
    #[error("{0}")]
    LanguageModel(String),
    #[error("Pattern error: {0}")]
    Pattern(String),
}
