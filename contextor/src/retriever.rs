//! Retrieval seam: trait + `RagStore` adapter.

use std::{future::Future, pin::Pin};

use rag_store::{RagError, RagHit, RagStore};

/// Vector-store retrieval interface consumed by the pipeline.
///
/// The query vector is always supplied; results come back in rank order.
pub trait Retriever: Send + Sync {
    fn top_hits<'a>(
        &'a self,
        query_vector: Vec<f32>,
        top_k: u64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RagHit>, RagError>> + Send + 'a>>;
}

impl Retriever for RagStore {
    fn top_hits<'a>(
        &'a self,
        query_vector: Vec<f32>,
        top_k: u64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RagHit>, RagError>> + Send + 'a>> {
        Box::pin(RagStore::top_hits(self, query_vector, top_k))
    }
}
