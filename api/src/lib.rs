//! HTTP surface of the Librarian: chat widget page plus JSON endpoints.

pub mod app;
pub mod error_handler;
mod routes;

use std::sync::Arc;

use ai_llm_service::{LlmModelConfig, LlmServiceProfiles};
use axum::{
    Router,
    routing::{get, post},
};
use rag_store::{RagConfig, RagStore, ServiceEmbedder};
use tokio::signal;
use tracing::{error, info};

pub use crate::app::app_config::AppConfig;
pub use crate::app::app_state::{AppState, Librarian, SettingsView};
pub use crate::error_handler::{AppError, AppResult};

use crate::routes::{
    chat::chat_route::chat,
    diagnostics::{
        config_route::config, search_test_route::search_test_route, status_route::status,
    },
    health_route::health,
    starters_route::starters,
    ui_route::index,
};

/// Builds the shared state, connecting to the LLM backends and Qdrant.
///
/// A failed connection is logged and yields a state in disabled mode rather
/// than an error, so the page can still report what went wrong.
pub async fn init_state(
    config: AppConfig,
    rag: RagConfig,
    chat: LlmModelConfig,
    embedding: LlmModelConfig,
) -> AppState {
    let settings = SettingsView::new(&rag, &embedding.model, &chat.model);

    let librarian = match connect(rag, chat, embedding).await {
        Ok(l) => {
            info!("✅ Application components initialized successfully");
            Some(l)
        }
        Err(e) => {
            error!(error = %e, "❌ Failed to initialize components");
            None
        }
    };

    AppState {
        config,
        settings,
        librarian,
    }
}

async fn connect(
    rag: RagConfig,
    chat: LlmModelConfig,
    embedding: LlmModelConfig,
) -> Result<Librarian, AppError> {
    let svc = Arc::new(LlmServiceProfiles::new(chat, embedding)?);
    let embedder = Arc::new(ServiceEmbedder::new(svc.clone(), rag.embedding_dim));
    let store = RagStore::connect(rag, embedder).await?;
    Ok(Librarian::new(Arc::new(store), svc))
}

/// All routes, bound to `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .route("/api/status", get(status))
        .route("/api/search-test", post(search_test_route))
        .route("/api/config", get(config))
        .route("/api/starters", get(starters))
        .route("/api/health", get(health))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Serves until Ctrl+C.
///
/// # Errors
/// `AppError::Bind` if the address is taken, `AppError::Server` on I/O failure.
pub async fn start(state: AppState) -> AppResult<()> {
    let addr = state.config.address;
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    info!(%addr, "🚀 Librarian listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
