use axum::{body::Bytes, extract::State, Json};
use common::types::chat_response::ChatResponse;
use serde::Deserialize;
use tracing::info;

use crate::{api_state::ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// `POST /chat`. The body is read as JSON whatever the content type says.
pub async fn chat(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let request: ChatRequest = serde_json::from_slice(&body)?;
    info!(message_bytes = request.message.len(), "Received chat request");

    let response = state.assistant.respond(&request.message).await;
    info!(mode = response.mode(), "Chat request handled");

    Ok(Json(response))
}
