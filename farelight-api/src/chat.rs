use axum::{extract::State, Json};
use farelight_chat::{ChatMessage, ChatReply};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    if req.messages.is_empty() {
        return Err(ApiError::BadRequest("messages must not be empty".to_string()));
    }
    let reply = state
        .chat
        .respond(&req.messages)
        .await
        .map_err(ApiError::from_chat)?;
    Ok(Json(reply))
}
