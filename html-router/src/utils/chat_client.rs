use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::result_view::ResultView;

/// Posts page submissions to the `/chat` endpoint over plain HTTP.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Never fails: transport problems become a connection-failure view.
    pub async fn send(&self, message: &str) -> ResultView {
        let response = match self
            .http
            .post(&self.endpoint)
            .json(&json!({ "message": message }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "Chat endpoint unreachable");
                return ResultView::connection_failed(&e);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return ResultView::connection_failed(&e),
        };

        if status != StatusCode::OK {
            warn!(%status, "Chat endpoint returned an error status");
            return ResultView::ServerError { body };
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(envelope) => {
                let view = ResultView::from_envelope(&envelope);
                info!(mode = ?envelope.get("mode"), "Rendering chat response");
                view
            }
            Err(e) => ResultView::connection_failed(&e),
        }
    }
}
