//! Runtime and collection configuration.

use crate::errors::RagError;

/// Vector dimensionality produced by `text-embedding-004`.
///
/// Every inserted or queried vector must have exactly this length, or the
/// store rejects the operation.
pub const EMBEDDING_SIZE: usize = 768;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

/// Describes the vector space of the collection.
#[derive(Clone, Debug)]
pub struct VectorSpace {
    /// Dimensionality of vectors.
    pub size: usize,
    /// Distance function.
    pub distance: DistanceKind,
}

/// Collection lifecycle applied at the start of an ingestion run.
///
/// The two policies carry materially different operational guarantees and
/// are never mixed: the caller picks one explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionPolicy {
    /// Idempotent: create the collection only if absent, never destroy data.
    CreateIfMissing,
    /// Destructive: drop and recreate the collection empty before ingesting.
    Recreate,
}

/// Configuration for RAG ingestion and retrieval.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// Qdrant endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Vector dimensionality of the collection.
    pub vector_size: usize,
}

impl RagConfig {
    /// Creates a sane default config for a given collection name and Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            vector_size: EMBEDDING_SIZE,
        }
    }

    /// Builds the config from environment variables.
    ///
    /// `QDRANT_HOST` is required; `QDRANT_API_KEY` and `COLLECTION_NAME`
    /// (default `book_embeddings`) are optional.
    ///
    /// # Errors
    /// Returns `RagError::Config` if `QDRANT_HOST` is unset or validation fails.
    pub fn from_env() -> Result<Self, RagError> {
        let qdrant_url = std::env::var("QDRANT_HOST")
            .map_err(|_| RagError::Config("QDRANT_HOST must be set".into()))?;
        let collection =
            std::env::var("COLLECTION_NAME").unwrap_or_else(|_| "book_embeddings".into());

        let mut cfg = Self::new_default(qdrant_url, collection);
        cfg.qdrant_api_key = std::env::var("QDRANT_API_KEY").ok().filter(|k| !k.is_empty());
        cfg.validate()?;
        Ok(cfg)
    }

    /// The vector space of the configured collection.
    pub fn vector_space(&self) -> VectorSpace {
        VectorSpace {
            size: self.vector_size,
            distance: self.distance,
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(RagError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.vector_size == 0 {
            return Err(RagError::Config("vector_size must be > 0".into()));
        }
        Ok(())
    }
}
