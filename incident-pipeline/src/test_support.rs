use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use common::{
    error::AppError,
    types::incident::{IncidentList, NewIncident},
    utils::{
        llm::CompletionApi,
        ticketing::{TicketingApi, TicketingError},
    },
};
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketingCall {
    FetchByNumber(String),
    FetchSimilar(String, String),
    Create(NewIncident),
}

/// Ticketing double with canned answers. `Err` strings become upstream bodies.
pub struct FakeTicketing {
    pub fetch: Result<IncidentList, String>,
    pub similar: Result<IncidentList, String>,
    pub create: Result<Value, String>,
    pub(crate) calls: Mutex<Vec<TicketingCall>>,
}

impl Default for FakeTicketing {
    fn default() -> Self {
        Self {
            fetch: Ok(IncidentList::default()),
            similar: Ok(IncidentList::default()),
            create: Ok(Value::Null),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeTicketing {
    pub fn calls(&self) -> Vec<TicketingCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: TicketingCall) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

fn upstream(body: &str) -> TicketingError {
    TicketingError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: body.to_string(),
    }
}

#[async_trait]
impl TicketingApi for FakeTicketing {
    async fn fetch_by_number(&self, number: &str) -> Result<IncidentList, TicketingError> {
        self.record(TicketingCall::FetchByNumber(number.to_string()));
        self.fetch.clone().map_err(|body| upstream(&body))
    }

    async fn fetch_similar(
        &self,
        short_description: &str,
        category: &str,
    ) -> Result<IncidentList, TicketingError> {
        self.record(TicketingCall::FetchSimilar(
            short_description.to_string(),
            category.to_string(),
        ));
        self.similar.clone().map_err(|body| upstream(&body))
    }

    async fn create(&self, incident: &NewIncident) -> Result<Value, TicketingError> {
        self.record(TicketingCall::Create(incident.clone()));
        self.create.clone().map_err(|body| upstream(&body))
    }
}

/// Model double that replays queued completions and remembers every prompt.
#[derive(Default)]
pub struct FakeModel {
    completions: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn answering(completions: impl IntoIterator<Item = Result<String, String>>) -> Self {
        Self {
            completions: Mutex::new(completions.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

#[async_trait]
impl CompletionApi for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        self.completions
            .lock()
            .expect("completions lock")
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
            .map_err(AppError::LanguageModel)
    }
}
