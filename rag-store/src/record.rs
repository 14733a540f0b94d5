//! Core data models used by the library.

/// Staged ingestion unit: one source file, one point.
///
/// Ids are assigned sequentially per ingestion run, starting at 1.
#[derive(Clone, Debug)]
pub struct DocRecord {
    pub id: u64,
    pub text: String,
    pub file_path: String,
    pub vector: Vec<f32>,
}

/// A single retrieval hit in rank order.
///
/// `text` is `None` when the stored payload had no non-empty `text` field;
/// such hits are dropped during context assembly, not padded with empties.
#[derive(Clone, Debug)]
pub struct RagHit {
    pub score: f32,
    pub text: Option<String>,
    pub file_path: Option<String>,
    /// Full payload as JSON, for diagnostics.
    pub payload: serde_json::Value,
}
