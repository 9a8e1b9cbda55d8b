pub mod analyze;
pub mod create;
pub mod extraction;
pub mod intent;
pub mod prompts;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use common::{
    error::AppError,
    types::chat_response::ChatResponse,
    utils::{llm::CompletionApi, ticketing::TicketingApi},
};
use intent::{Intent, IntentClassifier};
use tracing::{info, instrument, warn};

pub use analyze::analyze_incident;
pub use create::create_incident;

/// Routes one free-text support request to the create or analyze flow.
#[derive(Clone)]
pub struct IncidentAssistant {
    ticketing: Arc<dyn TicketingApi>,
    llm: Arc<dyn CompletionApi>,
    classifier: IntentClassifier,
}

impl IncidentAssistant {
    pub fn new(
        ticketing: Arc<dyn TicketingApi>,
        llm: Arc<dyn CompletionApi>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            ticketing,
            llm,
            classifier: IntentClassifier::new()?,
        })
    }

    /// Handles a message end to end. Failures become an error envelope, so the
    /// caller always gets the same response shape.
    #[instrument(skip_all)]
    pub async fn respond(&self, message: &str) -> ChatResponse {
        match self.route(message).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Request finished with an error");
                ChatResponse::from(e)
            }
        }
    }

    pub async fn route(&self, message: &str) -> Result<ChatResponse, AppError> {
        let message = message.trim();
        match self.classifier.classify(message)? {
            Intent::Create => {
                info!("Routing to create flow");
                create_incident(self.ticketing.as_ref(), self.llm.as_ref(), message).await
            }
            Intent::Analyze { incident_number } => {
                info!(%incident_number, "Routing to analyze flow");
                analyze_incident(self.ticketing.as_ref(), self.llm.as_ref(), &incident_number)
                    .await
            }
        }
    }
}
