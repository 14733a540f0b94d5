use serde::{Deserialize, Serialize};

/// Request payload for /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Natural language question. Missing or empty yields the fixed
    /// empty-message reply.
    #[serde(default)]
    pub message: String,
    /// Optional text the caller selected in their reader; always prepended
    /// to the retrieved context when present.
    #[serde(default)]
    pub selected_text: String,
}

/// Response payload for /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Final reply (answer or plain-English failure sentence).
    pub reply: String,
}
