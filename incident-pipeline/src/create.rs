use common::{
    error::AppError,
    types::chat_response::ChatResponse,
    utils::{llm::CompletionApi, ticketing::TicketingApi},
};
use tracing::{info, instrument};

use crate::{extraction::ExtractedIncident, prompts::extraction_prompt};

/// Extracts incident fields from the message and creates exactly one record.
#[instrument(skip_all)]
pub async fn create_incident(
    ticketing: &dyn TicketingApi,
    llm: &dyn CompletionApi,
    user_message: &str,
) -> Result<ChatResponse, AppError> {
    let completion = llm.generate(&extraction_prompt(user_message)).await?;
    let incident = ExtractedIncident::parse(&completion)?.into_new_incident(user_message);

    info!(category = %incident.category, "Creating incident from extracted fields");
    let created = ticketing
        .create(&incident)
        .await
        .map_err(|e| AppError::IncidentCreate(e.to_string()))?;

    Ok(ChatResponse::Create(created))
}
