//! Axum route handlers for the advisory chat API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::advisor::turn;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default = "default_username")]
    pub username: String,
    pub message: String,
}

fn default_username() -> String {
    "guest".to_string()
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// POST /api/v1/chat
///
/// Runs one advisory turn for the user and returns the assistant's reply.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let response = turn::handle_turn(&state, &request.username, &request.message).await?;

    Ok(Json(ChatResponse { response }))
}

/// GET /api/v1/history/:username
///
/// Returns the user's last 20 turns, oldest first.
pub async fn handle_history(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let user = store::users::get_or_create(&state.db, &username).await?;
    let history = store::messages::recent(&state.db, user.id, 20).await?;

    Ok(Json(
        history
            .into_iter()
            .map(|m| HistoryEntry {
                role: m.role,
                content: m.content,
            })
            .collect(),
    ))
}
