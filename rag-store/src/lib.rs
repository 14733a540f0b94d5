//! High-level RAG facade: ingestion + retrieval over Qdrant.
//!
//! This crate provides a clean API to:
//! - Ingest a directory of text documents, one Qdrant point per file
//! - Retrieve top-K hits for a precomputed query vector
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules.

mod config;
mod discovery;
mod embed;
mod errors;
mod ingest;
mod qdrant_facade;
mod record;
mod retrieve;

pub use config::{CollectionPolicy, DistanceKind, EMBEDDING_SIZE, RagConfig, VectorSpace};
pub use discovery::corpus_files;
pub use embed::{EmbeddingsProvider, gemini::GeminiEmbedder};
pub use errors::RagError;
pub use record::{DocRecord, RagHit};

use std::path::Path;

use tracing::{debug, trace};

/// High-level facade that wires configuration and Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct RagStore {
    cfg: RagConfig,
    client: qdrant_facade::QdrantFacade,
}

impl RagStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `RagError::Config` if the client initialization fails.
    pub fn new(cfg: RagConfig) -> Result<Self, RagError> {
        trace!("RagStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    /// Ingests every `*.{extension}` file under `corpus_dir` (recursively)
    /// into the configured collection and returns the number of uploaded
    /// points.
    ///
    /// The collection lifecycle follows `policy`: `CreateIfMissing` keeps any
    /// existing data, `Recreate` drops the collection first.
    ///
    /// # Errors
    /// Returns errors on I/O, embedding, vector size mismatch, or Qdrant
    /// failures. A single unreadable or unembeddable file aborts the run.
    pub async fn ingest_dir(
        &self,
        corpus_dir: impl AsRef<Path>,
        extension: &str,
        policy: CollectionPolicy,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<usize, RagError> {
        debug!(
            "RagStore::ingest_dir dir={:?} ext={extension} policy={policy:?}",
            corpus_dir.as_ref()
        );
        ingest::ingest_dir(&self.cfg, corpus_dir, extension, policy, provider, &self.client).await
    }

    /// Performs a vector search and returns the top-K hits in rank order.
    ///
    /// # Errors
    /// Returns `RagError::Qdrant` if the search fails.
    pub async fn top_hits(&self, query_vector: Vec<f32>, top_k: u64) -> Result<Vec<RagHit>, RagError> {
        trace!("RagStore::top_hits top_k={top_k}");
        retrieve::top_hits(&self.client, query_vector, top_k).await
    }
}
