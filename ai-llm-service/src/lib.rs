//! Thin client for the Google Gemini API.
//!
//! Exposes two operations used by the RAG backend:
//! - text embeddings via `embedContent` (profile model `text-embedding-004`)
//! - text generation via `generateContent` (profile model `gemini-2.0-flash`)
//!
//! Construct one [`services::gemini_service::GeminiService`], wrap it in an
//! `Arc`, and pass clones to dependents.

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::gemini_config::GeminiConfig;
pub use error_handler::{AiLlmError, ConfigError};
pub use services::gemini_service::{EmbeddingTask, GeminiService, GenerationOutcome};
