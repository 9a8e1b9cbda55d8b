use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::types::chat_response::ChatResponse;
use thiserror::Error;

/// Faults raised at the HTTP boundary, outside the assistant's own flows.
/// Both render as the standard error envelope.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The body could not be read as `{"message": string}`. Reported like any
    /// other input error, with a 200.
    #[error("{0}")]
    MalformedRequest(String),

    #[error("{0}")]
    InternalError(String),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::OK,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedRequest(format!("Invalid request body: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ChatResponse::error(self.to_string()))).into_response()
    }
}

/// Handler for `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("Unhandled server error");

    tracing::error!(panic = message, "Request handler panicked");
    ApiError::InternalError(message.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn malformed_request_is_a_200_error_envelope() {
        let err = serde_json::from_str::<Value>("{oops").expect_err("bad json");
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["mode"], "error");
        assert!(body["data"].is_null());
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("Invalid request body")));
    }

    #[tokio::test]
    async fn panics_become_500_with_the_panic_message() {
        let response = panic_response(Box::new("boom".to_string()));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"mode": "error", "data": null, "error": "boom"})
        );
    }

    #[tokio::test]
    async fn non_string_panic_payload_gets_a_generic_message() {
        let response = panic_response(Box::new(42_u8));
        assert_eq!(body_json(response).await["error"], "Unhandled server error");
    }
}
