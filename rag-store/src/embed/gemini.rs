//! Gemini embedding provider implementation.
//!
//! Adapts [`GeminiService`] to the [`EmbeddingsProvider`] trait and enforces
//! the collection's vector dimensionality on every response.

use std::sync::Arc;

use ai_llm_service::services::gemini_service::{EmbeddingTask, GeminiService};

use crate::{EmbeddingsProvider, RagError};

/// Gemini embedding provider (async).
#[derive(Clone)]
pub struct GeminiEmbedder {
    svc: Arc<GeminiService>,
    task: EmbeddingTask,
    dim: usize,
}

impl GeminiEmbedder {
    /// Constructs an embedder for the given task type and expected dimension.
    pub fn new(svc: Arc<GeminiService>, task: EmbeddingTask, dim: usize) -> Self {
        Self { svc, task, dim }
    }
}

impl EmbeddingsProvider for GeminiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>>
    {
        Box::pin(async move {
            let resp = self
                .svc
                .embed(text, self.task)
                .await
                .map_err(|e| RagError::Embedding(e.to_string()))?;

            if resp.len() != self.dim {
                return Err(RagError::VectorSizeMismatch {
                    got: resp.len(),
                    want: self.dim,
                });
            }

            Ok(resp)
        })
    }
}
