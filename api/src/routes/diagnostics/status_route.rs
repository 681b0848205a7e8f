//! GET /api/status: collection diagnostics as a status line.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::app::app_state::AppState;
use crate::routes::diagnostics::status_report::{StatusReport, collection_status};

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusReport> {
    let Some(librarian) = &state.librarian else {
        return Json(StatusReport::not_initialized());
    };

    let info = librarian.store.collection_info().await;
    Json(collection_status(&info, &state.settings.qdrant_url))
}
