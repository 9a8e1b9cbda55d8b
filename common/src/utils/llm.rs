use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{error::AppError, utils::config::AppConfig};

/// Text completion backend.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for a local Ollama server's non-streaming `/api/generate` endpoint.
///
/// No timeout is set; a stalled model stalls the request that is waiting on it.
#[derive(Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    generate_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            generate_url: format!("{}/api/generate", base_url.trim_end_matches('/')),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.ollama_url, &config.ollama_model)
    }
}

fn exception(err: &reqwest::Error) -> AppError {
    AppError::LanguageModel(format!("Ollama exception: {err}"))
}

#[async_trait]
impl CompletionApi for OllamaClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        debug!(prompt_bytes = prompt.len(), "Sending generation request");

        let response = self
            .http
            .post(&self.generate_url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| exception(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.map_err(|e| exception(&e))?;
            return Err(AppError::LanguageModel(format!("Ollama error: {body}")));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| exception(&e))?;
        debug!(completion_bytes = body.response.len(), "Generation finished");

        Ok(body.response)
    }
}
