//! Chat completion endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::Result;
use crate::models::ChatRequest;
use crate::AppState;

/// POST /chat-completion - complete a conversation with a language model.
///
/// The raw completion from the upstream model comes back under `result`.
async fn chat_completion(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Value>> {
    let result = state
        .hf
        .chat_completion(&request.messages, request.selector.model.as_deref())
        .await?;

    Ok(Json(json!({ "result": result })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat-completion", post(chat_completion))
}
