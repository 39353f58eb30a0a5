use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use farelight_chat::ChatError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    UpstreamError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl ApiError {
    /// Orchestrator failures map onto the gateway's vocabulary: anything the
    /// model endpoint did wrong is a 502, a bad tool-argument shape that
    /// reached us directly is the caller's fault.
    pub fn from_chat(err: ChatError) -> Self {
        match err {
            ChatError::InvalidToolArguments(msg) => ApiError::BadRequest(msg),
            ChatError::Transport(_)
            | ChatError::Upstream { .. }
            | ChatError::MalformedResponse
            | ChatError::ToolRoundsExhausted(_) => ApiError::UpstreamError(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UpstreamError(msg) => {
                tracing::error!("Upstream LLM error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Language model backend unavailable".to_string(),
                )
            }
            ApiError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            ApiError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
