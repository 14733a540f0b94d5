//! Lightweight Gemini service for text generation and embeddings.
//!
//! This module implements a thin client for the Generative Language REST API:
//! - `POST {endpoint}/models/{model}:generateContent` — synchronous generation
//! - `POST {endpoint}/models/{model}:embedContent`    — embeddings retrieval
//!
//! The API key is sent as the `key` query parameter and is never included in
//! the precomputed URLs, so request logging stays credential-free.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::gemini_config::GeminiConfig;

/// Errors produced by [`GeminiService`].
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Invalid endpoint (empty or missing http/https).
    #[error("[AI LLM Service] invalid Gemini endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error.
    #[error("[AI LLM Service] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("[AI LLM Service] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL (without the key parameter).
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Unexpected/invalid JSON response.
    #[error("[AI LLM Service] failed to decode response: {0}")]
    Decode(String),
}

/// Result alias for Gemini operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Embedding task type hint passed to `embedContent`.
///
/// Corpus documents are embedded as `RETRIEVAL_DOCUMENT`, questions as
/// `RETRIEVAL_QUERY`; the model optimizes the vector for the given role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingTask {
    /// Embedding a search query.
    RetrievalQuery,
    /// Embedding a document to be indexed.
    RetrievalDocument,
}

impl EmbeddingTask {
    fn as_str(self) -> &'static str {
        match self {
            EmbeddingTask::RetrievalQuery => "RETRIEVAL_QUERY",
            EmbeddingTask::RetrievalDocument => "RETRIEVAL_DOCUMENT",
        }
    }
}

/// Terminal outcome of a generation call.
///
/// A safety block is not a transport failure; it is a distinct outcome that
/// callers surface with its reason.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The model produced text.
    Text(String),
    /// The model returned no candidates; `reason` is the block reason name
    /// from prompt feedback, or `"UNKNOWN"` when none was given.
    Blocked { reason: String },
}

/// Thin client for Gemini.
///
/// Initialized with a full [`GeminiConfig`]. Reuses an HTTP client with a
/// configurable timeout. Provides two high-level calls:
/// - [`GeminiService::generate`] — synchronous text generation
/// - [`GeminiService::embed`]    — embeddings retrieval
pub struct GeminiService {
    client: reqwest::Client,
    cfg: GeminiConfig,
    url_generate: String,
    url_embed: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`GeminiError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`GeminiError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: GeminiConfig) -> Result<Self> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(GeminiError::InvalidEndpoint(cfg.endpoint));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/models/{}:generateContent", base, cfg.chat_model);
        let url_embed = format!("{}/models/{}:embedContent", base, cfg.embed_model);

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embed,
        })
    }

    /// Performs a generation request via `:generateContent`.
    ///
    /// Returns [`GenerationOutcome::Blocked`] when the response carries no
    /// candidates (safety filter); transport and protocol problems are errors.
    ///
    /// # Errors
    /// - [`GeminiError::HttpStatus`] for non-2xx responses
    /// - [`GeminiError::Transport`] for client errors
    /// - [`GeminiError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.chat_model))]
    pub async fn generate(&self, prompt: &str) -> Result<GenerationOutcome> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .query(&[("key", self.cfg.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(GeminiError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GeminiError::Decode(format!("serde error: {e}")))?;

        Ok(parse_generation(out))
    }

    /// Retrieves an embedding vector via `:embedContent`.
    ///
    /// # Errors
    /// - [`GeminiError::HttpStatus`] for non-2xx responses
    /// - [`GeminiError::Transport`] for client errors
    /// - [`GeminiError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.embed_model))]
    pub async fn embed(&self, input: &str, task: EmbeddingTask) -> Result<Vec<f32>> {
        let body = EmbedRequest {
            model: format!("models/{}", self.cfg.embed_model),
            content: Content {
                parts: vec![Part {
                    text: input.to_string(),
                }],
            },
            task_type: task.as_str(),
        };

        debug!("POST {}", self.url_embed);
        let resp = self
            .client
            .post(&self.url_embed)
            .query(&[("key", self.cfg.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embed.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(GeminiError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: EmbedResponse = resp.json().await.map_err(|e| {
            GeminiError::Decode(format!("serde error: {e}; expected embedding.values"))
        })?;

        Ok(out.embedding.values)
    }
}

/// Maps a decoded `generateContent` response to a terminal outcome.
///
/// Candidate part texts are joined in order. A response without candidates
/// is a safety block; the reason falls back to `"UNKNOWN"`.
fn parse_generation(resp: GenerateResponse) -> GenerationOutcome {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "UNKNOWN".to_string());
        return GenerationOutcome::Blocked { reason };
    };

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    GenerationOutcome::Text(text)
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Request body for `:generateContent`.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

/// Response body for `:generateContent` (minimal shape).
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// Request body for `:embedContent`.
#[derive(Debug, Serialize)]
struct EmbedRequest {
    model: String,
    content: Content,
    #[serde(rename = "taskType")]
    task_type: &'static str,
}

/// Response body for `:embedContent`.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(endpoint: &str) -> GeminiConfig {
        GeminiConfig {
            endpoint: endpoint.to_string(),
            api_key: "test-key".to_string(),
            chat_model: "gemini-2.0-flash".to_string(),
            embed_model: "text-embedding-004".to_string(),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn rejects_non_http_endpoint() {
        assert!(matches!(
            GeminiService::new(cfg("localhost:8080")),
            Err(GeminiError::InvalidEndpoint(_))
        ));
        assert!(GeminiService::new(cfg("https://example.com/v1beta")).is_ok());
    }

    #[test]
    fn parse_generation_joins_candidate_parts() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            parse_generation(resp),
            GenerationOutcome::Text("Hello world".to_string())
        );
    }

    #[test]
    fn parse_generation_reports_block_reason() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[],"promptFeedback":{"blockReason":"SAFETY"}}"#)
                .unwrap();
        assert_eq!(
            parse_generation(resp),
            GenerationOutcome::Blocked {
                reason: "SAFETY".to_string()
            }
        );
    }

    #[test]
    fn parse_generation_defaults_to_unknown_reason() {
        let resp: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(
            parse_generation(resp),
            GenerationOutcome::Blocked {
                reason: "UNKNOWN".to_string()
            }
        );
    }

    #[test]
    fn embed_response_decodes_values() {
        let resp: EmbedResponse =
            serde_json::from_str(r#"{"embedding":{"values":[0.25,-0.5,1.0]}}"#).unwrap();
        assert_eq!(resp.embedding.values, vec![0.25, -0.5, 1.0]);
    }
}
