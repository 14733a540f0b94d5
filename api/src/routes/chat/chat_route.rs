//! POST /chat — answers a question from retrieved context.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    core::app_state::AppState,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Handler: POST /chat
///
/// Always responds 200; every pipeline failure mode is encoded in the
/// `reply` string.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"Who is the narrator?","selected_text":""}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let outcome = state
        .pipeline
        .answer(&body.message, &body.selected_text)
        .await;

    Json(ChatResponse {
        reply: outcome.reply_text(),
    })
}
