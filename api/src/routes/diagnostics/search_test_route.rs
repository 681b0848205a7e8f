//! POST /api/search-test: searches a fixed sample query against the store.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{info, warn};

use crate::app::app_state::AppState;
use crate::routes::diagnostics::status_report::{
    SEARCH_TEST_K, SEARCH_TEST_QUERY, StatusReport, search_test, search_test_failed,
};

pub async fn search_test_route(State(state): State<Arc<AppState>>) -> Json<StatusReport> {
    let Some(librarian) = &state.librarian else {
        return Json(StatusReport::not_initialized());
    };

    match librarian
        .store
        .search(SEARCH_TEST_QUERY, Some(SEARCH_TEST_K), None)
        .await
    {
        Ok(passages) => {
            info!(found = passages.len(), "search test finished");
            Json(search_test(&passages))
        }
        Err(e) => {
            warn!(error = %e, "search test failed");
            Json(search_test_failed(&e.to_string()))
        }
    }
}
