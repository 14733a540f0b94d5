//! Retrieval helpers: vector search and hit mapping.

use crate::errors::RagError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::RagHit;

use tracing::trace;

/// Performs a similarity search given a ready query vector and returns hits
/// in rank order.
///
/// The query vector is always supplied to the store; a search without it
/// would return arbitrary points unrelated to the question.
///
/// # Errors
/// Returns `RagError::Qdrant` on client failures.
pub async fn top_hits(
    client: &QdrantFacade,
    query_vector: Vec<f32>,
    top_k: u64,
) -> Result<Vec<RagHit>, RagError> {
    trace!("retrieve::top_hits top_k={top_k}");

    let raw = client.search(query_vector, top_k).await?;
    let hits: Vec<RagHit> = raw
        .into_iter()
        .map(|(score, payload)| hit_from(score, payload))
        .collect();

    trace!("retrieve::top_hits hits={}", hits.len());
    Ok(hits)
}

/// Maps a `(score, payload)` pair into a [`RagHit`].
///
/// `text` is kept only when the payload carries a non-empty string; the
/// distinction between "no text" and "empty text" is deliberately collapsed.
fn hit_from(score: f32, payload: serde_json::Value) -> RagHit {
    let text = payload
        .get("text")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    let file_path = payload
        .get("file_path")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    RagHit {
        score,
        text,
        file_path,
        payload,
    }
}
