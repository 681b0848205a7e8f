//! POST /api/chat: answers one question with RAG context.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use contextor::{EMPTY_QUESTION_ANSWER, QueryResult, clean_query};
use tracing::warn;

use crate::{
    app::app_state::AppState,
    error_handler::AppResult,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

pub const NOT_INITIALIZED_REPLY: &str =
    "❌ System not properly initialized. Please check the vector store connection.";

/// Handler: POST /api/chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:7860/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"What role do mirrors play in Borges fiction?"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;

    let Some(librarian) = &state.librarian else {
        warn!("chat request while not initialized");
        return Ok(Json(ChatResponse {
            reply: NOT_INITIALIZED_REPLY.to_string(),
            result: None,
        }));
    };

    let message = clean_query(&body.message);
    if message.is_empty() {
        return Ok(Json(ChatResponse {
            reply: EMPTY_QUESTION_ANSWER.to_string(),
            result: None,
        }));
    }

    let result = librarian.chain.query(&message).await;
    Ok(Json(ChatResponse {
        reply: reply_for(&result),
        result: Some(result),
    }))
}

/// Chat-log text for a pipeline result.
pub fn reply_for(result: &QueryResult) -> String {
    match &result.error {
        Some(e) => format!("I apologize, but I encountered an issue: {e}"),
        None => result.answer.clone(),
    }
}
