use contextor::QueryResult;
use serde::{Deserialize, Serialize};

/// Request payload for /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's question.
    pub message: String,
}

/// Response payload for /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Text to show in the chat log.
    pub reply: String,
    /// Full pipeline result, when the pipeline ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<QueryResult>,
}
