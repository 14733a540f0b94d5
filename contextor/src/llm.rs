//! Generation seam: trait + Gemini adapter.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use ai_llm_service::error_handler::AiLlmError;
use ai_llm_service::services::gemini_service::{GeminiService, GenerationOutcome};

/// Provider interface for answer generation.
///
/// Implement this trait to plug in another model backend, or a fake in tests.
pub trait AnswerGenerator: Send + Sync {
    /// Async generation function. A safety block is a successful result
    /// ([`GenerationOutcome::Blocked`]), not an error.
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationOutcome, AiLlmError>> + Send + 'a>>;
}

/// [`AnswerGenerator`] backed by the Gemini chat model.
#[derive(Clone)]
pub struct GeminiAnswerer {
    svc: Arc<GeminiService>,
}

impl GeminiAnswerer {
    pub fn new(svc: Arc<GeminiService>) -> Self {
        Self { svc }
    }
}

impl AnswerGenerator for GeminiAnswerer {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationOutcome, AiLlmError>> + Send + 'a>> {
        Box::pin(async move { self.svc.generate(prompt).await.map_err(AiLlmError::from) })
    }
}
