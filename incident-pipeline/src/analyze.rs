use common::{
    error::AppError,
    types::{
        chat_response::{AnalysisReport, ChatResponse},
        incident::IncidentList,
    },
    utils::{llm::CompletionApi, ticketing::TicketingApi},
};
use tracing::{info, instrument, warn};

use crate::prompts::analysis_prompt;

/// Looks up the incident, gathers similar history and asks the model for a
/// diagnostic write-up.
#[instrument(skip(ticketing, llm))]
pub async fn analyze_incident(
    ticketing: &dyn TicketingApi,
    llm: &dyn CompletionApi,
    incident_number: &str,
) -> Result<ChatResponse, AppError> {
    let incidents = ticketing
        .fetch_by_number(incident_number)
        .await
        .map_err(|e| AppError::IncidentFetch(e.to_string()))?;
    let incident = incidents.first().ok_or(AppError::IncidentNotFound)?;

    let category = incident.category_or_default();
    let short_description = incident.short_description_or_default();

    // Similar incidents only enrich the prompt; a failed search means no history.
    let similar = match ticketing.fetch_similar(short_description, category).await {
        Ok(similar) => similar,
        Err(e) => {
            warn!(error = %e, "Similar incident search failed, continuing without history");
            IncidentList::default()
        }
    };
    info!(similar = similar.result.len(), "Requesting incident analysis");

    let analysis = llm
        .generate(&analysis_prompt(incident, &similar.result))
        .await?;

    Ok(ChatResponse::Analyze(AnalysisReport {
        incident_number: incident_number.to_string(),
        category: category.to_string(),
        analysis,
    }))
}
