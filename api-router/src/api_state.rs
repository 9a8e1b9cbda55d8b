use std::sync::Arc;

use common::{
    error::AppError,
    utils::{config::AppConfig, llm::OllamaClient, ticketing::ServiceNowClient},
};
use incident_pipeline::IncidentAssistant;

#[derive(Clone)]
pub struct ApiState {
    pub assistant: Arc<IncidentAssistant>,
}

impl ApiState {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let assistant = IncidentAssistant::new(
            Arc::new(ServiceNowClient::from_config(config)),
            Arc::new(OllamaClient::from_config(config)),
        )?;

        Ok(Self {
            assistant: Arc::new(assistant),
        })
    }
}
