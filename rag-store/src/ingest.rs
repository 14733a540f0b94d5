//! End-to-end ingestion pipeline: enumerate corpus files → embed → stage →
//! upsert into Qdrant.
//!
//! One file becomes one point. Ids are sequential per run, starting at 1, in
//! sorted enumeration order. The whole staged batch is upserted in a single
//! call; an empty corpus skips the upsert entirely.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use qdrant_client::Payload;
use qdrant_client::qdrant::PointStruct;
use serde_json::json;
use tracing::{info, warn};

use crate::config::{CollectionPolicy, RagConfig};
use crate::discovery::corpus_files;
use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::DocRecord;

/// Ingests every matching file under `corpus_dir` into the configured
/// collection. Returns the number of uploaded points.
///
/// A failure to read or embed any single file aborts the run; ingestion is
/// re-runnable, a partially indexed corpus is not.
pub async fn ingest_dir(
    cfg: &RagConfig,
    corpus_dir: impl AsRef<Path>,
    extension: &str,
    policy: CollectionPolicy,
    provider: &dyn EmbeddingsProvider,
    client: &QdrantFacade,
) -> Result<usize, RagError> {
    let space = cfg.vector_space();
    match policy {
        CollectionPolicy::CreateIfMissing => client.ensure_collection(&space).await?,
        CollectionPolicy::Recreate => client.recreate_collection(&space).await?,
    }

    let files = corpus_files(&corpus_dir, extension)?;
    if files.is_empty() {
        warn!(
            "No *.{extension} files found under {:?}; nothing to upsert",
            corpus_dir.as_ref()
        );
        return Ok(0);
    }

    info!("Found {} files, generating embeddings", files.len());
    let records = stage_corpus(&files, provider, space.size).await?;

    let uploaded = client.upsert_points(to_points(&records)?).await?;
    info!(
        "Uploaded {} documents to collection '{}'",
        uploaded, cfg.collection
    );
    Ok(uploaded)
}

/// Reads and embeds each file, assigning sequential ids starting at 1.
async fn stage_corpus(
    files: &[PathBuf],
    provider: &dyn EmbeddingsProvider,
    vector_size: usize,
) -> Result<Vec<DocRecord>, RagError> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-"),
    );

    let mut records = Vec::with_capacity(files.len());
    for (idx, path) in files.iter().enumerate() {
        let text = std::fs::read_to_string(path)?;
        let vector = provider.embed(&text).await?;
        if vector.len() != vector_size {
            return Err(RagError::VectorSizeMismatch {
                got: vector.len(),
                want: vector_size,
            });
        }

        records.push(DocRecord {
            id: idx as u64 + 1,
            text,
            file_path: path.display().to_string(),
            vector,
        });
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(records)
}

/// Builds Qdrant points from staged records.
///
/// Payload carries the full document text plus the originating file path for
/// traceability.
fn to_points(records: &[DocRecord]) -> Result<Vec<PointStruct>, RagError> {
    records
        .iter()
        .map(|r| {
            let payload: Payload = json!({
                "text": r.text,
                "file_path": r.file_path,
            })
            .try_into()
            .map_err(|e| RagError::Qdrant(format!("payload convert: {e}")))?;
            Ok(PointStruct::new(r.id, r.vector.clone(), payload))
        })
        .collect()
}
