use std::error::Error;

use ai_llm_service::config::default_config::{config_chat, config_embedding};
use ai_llm_service::telemetry;
use rag_store::RagConfig;
use tracing::{Level, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::INFO))
        .with(telemetry::layer())
        .init();

    // Missing OPENAI_API_KEY for an OpenAI chat profile is fatal.
    let chat = config_chat().inspect_err(|e| error!(error = %e, "chat model configuration"))?;
    let embedding =
        config_embedding().inspect_err(|e| error!(error = %e, "embedding configuration"))?;
    let rag = RagConfig::from_env().inspect_err(|e| error!(error = %e, "vector store configuration"))?;
    let app = api::AppConfig::from_env()?;

    info!(
        collection = %rag.collection,
        chat_model = %chat.model,
        embedding_model = %embedding.model,
        "starting The Librarian"
    );

    let state = api::init_state(app, rag, chat, embedding).await;
    api::start(state).await?;

    Ok(())
}
