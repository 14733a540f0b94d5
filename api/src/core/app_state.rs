use std::{error::Error, sync::Arc};

use ai_llm_service::{GeminiConfig, GeminiService, services::gemini_service::EmbeddingTask};
use contextor::{ChatPipeline, DEFAULT_TOP_K, GeminiAnswerer};
use rag_store::{EMBEDDING_SIZE, GeminiEmbedder, RagConfig, RagStore};

/// Shared state for all HTTP handlers.
///
/// Provider clients are constructed exactly once here and handed to the
/// pipeline as explicit dependencies; there are no process-wide singletons.
pub struct AppState {
    pub pipeline: ChatPipeline,
}

impl AppState {
    /// Wires the pipeline from environment variables.
    ///
    /// Required: `GOOGLE_API_KEY`, `QDRANT_HOST`. Optional: `QDRANT_API_KEY`,
    /// `COLLECTION_NAME`, `RAG_TOP_K`, and the `GEMINI_*` overrides.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let gemini = Arc::new(GeminiService::new(GeminiConfig::from_env()?)?);
        let store = Arc::new(RagStore::new(RagConfig::from_env()?)?);

        let embedder = Arc::new(GeminiEmbedder::new(
            gemini.clone(),
            EmbeddingTask::RetrievalQuery,
            EMBEDDING_SIZE,
        ));
        let generator = Arc::new(GeminiAnswerer::new(gemini));

        let top_k = std::env::var("RAG_TOP_K")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TOP_K);

        let pipeline = ChatPipeline::new(embedder, store, generator).with_top_k(top_k);

        Ok(Self { pipeline })
    }
}
