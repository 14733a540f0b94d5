//! Offline ingestion entry point.
//!
//! Walks a directory of documents, embeds each file with Gemini, and upserts
//! the points into the configured Qdrant collection.
//!
//! Usage: `ingest [corpus_dir] [--recreate]`
//!
//! - `corpus_dir` defaults to `DOCS_DIR` (or `docs`); the extension filter
//!   comes from `DOCS_EXT` (default `md`).
//! - `--recreate` drops the collection before ingesting (destructive);
//!   without it the collection is created only if absent.

use std::{error::Error, sync::Arc};

use ai_llm_service::{GeminiConfig, GeminiService, services::gemini_service::EmbeddingTask};
use rag_store::{CollectionPolicy, EMBEDDING_SIZE, GeminiEmbedder, RagConfig, RagStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut corpus_dir = std::env::var("DOCS_DIR").unwrap_or_else(|_| "docs".into());
    let mut policy = CollectionPolicy::CreateIfMissing;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--recreate" => policy = CollectionPolicy::Recreate,
            other => corpus_dir = other.to_string(),
        }
    }
    let extension = std::env::var("DOCS_EXT").unwrap_or_else(|_| "md".into());

    let gemini = Arc::new(GeminiService::new(GeminiConfig::from_env()?)?);
    let embedder = GeminiEmbedder::new(gemini, EmbeddingTask::RetrievalDocument, EMBEDDING_SIZE);

    let cfg = RagConfig::from_env()?;
    let collection = cfg.collection.clone();
    let store = RagStore::new(cfg)?;

    let uploaded = store
        .ingest_dir(&corpus_dir, &extension, policy, &embedder)
        .await?;

    tracing::info!("Successfully uploaded {uploaded} documents to '{collection}'");
    Ok(())
}
