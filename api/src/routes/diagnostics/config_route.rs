//! GET /api/config: non-secret configuration snapshot.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::app::app_state::{AppState, SettingsView};

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub title: String,
    pub description: String,
    pub initialized: bool,
    #[serde(flatten)]
    pub settings: SettingsView,
}

pub async fn config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        title: state.config.title.clone(),
        description: state.config.description.clone(),
        initialized: state.is_ready(),
        settings: state.settings.clone(),
    })
}
