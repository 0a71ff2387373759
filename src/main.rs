use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use api::{AppState, HealthState};
use chat_engine::{ChatBackend, ChatEngine};
use chat_history::RedisHistory;
use doc_index::{DocumentIndex, Embedder, IndexConfig};
use llm_service::config::OpenAiConfig;
use llm_service::error_handler::must_env;
use llm_service::OpenAiService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Required configuration; any missing piece aborts the boot.
    let connection_string = must_env("REDIS_URL")?;
    let chat_llm = Arc::new(OpenAiService::new(OpenAiConfig::chat_from_env()?)?);
    let embed_llm = Arc::new(OpenAiService::new(OpenAiConfig::embedding_from_env()?)?);

    // History store must answer a PING before any request is served.
    let history = RedisHistory::connect(&connection_string).await?;

    // Build the process-wide retrieval index; fatal on any failure, so the
    // server never starts with a partial index.
    let index_cfg = IndexConfig::from_env()?;
    let index = Arc::new(
        DocumentIndex::build(&index_cfg, Arc::clone(&embed_llm) as Arc<dyn Embedder>).await?,
    );
    tracing::info!(chunks = index.len(), "retrieval index ready");

    let engine: Arc<dyn ChatBackend> = Arc::new(ChatEngine::new(
        Arc::clone(&index),
        Arc::new(history.clone()),
        Arc::clone(&chat_llm),
    ));

    let state = AppState {
        engine,
        health: Arc::new(HealthState { chat_llm, history }),
    };

    api::start(state).await?;

    Ok(())
}
