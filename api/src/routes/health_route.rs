use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::app::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub vector_store: &'static str,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        vector_store: if state.is_ready() {
            "connected"
        } else {
            "unavailable"
        },
    })
}
