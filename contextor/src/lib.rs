//! RAG + LLM chat pipeline with a single public entry point.
//!
//! [`ChatPipeline::answer`] embeds the question, retrieves top-K context from
//! the vector store, assembles a grounded prompt, calls the model, and
//! returns a typed [`ChatReply`].
//!
//! Failure policy (deliberate, uniform):
//! - embedding failure aborts — without a query vector there is nothing to
//!   retrieve, and answering without even attempting retrieval would drop the
//!   grounding guarantee silently;
//! - retrieval failure degrades — the pipeline continues with only the
//!   caller-selected text (or the placeholder) as context;
//! - generation failure and safety blocks are terminal outcomes of their own.
//!
//! No retries anywhere: one failed external call immediately yields the
//! corresponding outcome.

mod context;
mod llm;
mod prompt;
mod reply;
mod retriever;

pub use context::{NO_CONTEXT_PLACEHOLDER, assemble_context};
pub use llm::{AnswerGenerator, GeminiAnswerer};
pub use prompt::build_prompt;
pub use reply::{ChatReply, FailureKind};
pub use retriever::Retriever;

use std::sync::Arc;

use rag_store::EmbeddingsProvider;
use tracing::{debug, trace, warn};

use ai_llm_service::services::gemini_service::GenerationOutcome;

/// Default number of nearest neighbors pulled from the vector store.
pub const DEFAULT_TOP_K: u64 = 3;

/// The query pipeline: three explicit dependencies, one linear flow.
///
/// Dependencies are constructed once at startup and passed in; tests
/// substitute fakes for all three seams.
pub struct ChatPipeline {
    embedder: Arc<dyn EmbeddingsProvider>,
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn AnswerGenerator>,
    top_k: u64,
}

impl ChatPipeline {
    /// Wires the pipeline with the default top-K.
    pub fn new(
        embedder: Arc<dyn EmbeddingsProvider>,
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        Self {
            embedder,
            retriever,
            generator,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Overrides the number of retrieved neighbors.
    pub fn with_top_k(mut self, top_k: u64) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Answers `question` from retrieved context, with `selected_text`
    /// (possibly empty) always prepended to the context when present.
    ///
    /// Never returns an error: every failure mode is a [`ChatReply`] variant.
    pub async fn answer(&self, question: &str, selected_text: &str) -> ChatReply {
        if question.trim().is_empty() {
            return ChatReply::EmptyQuestion;
        }

        debug!("question: {question}");

        let query_vector = match self.embedder.embed(question).await {
            Ok(v) => {
                debug!("embedding ok, dim={}", v.len());
                v
            }
            Err(e) => {
                warn!("embedding failed: {e}");
                return ChatReply::Failed {
                    kind: FailureKind::Embedding,
                    message: e.to_string(),
                };
            }
        };

        let hits = match self.retriever.top_hits(query_vector, self.top_k).await {
            Ok(hits) => {
                trace!("retrieved {} hits", hits.len());
                hits
            }
            Err(e) => {
                // Degrade: answer from selected_text/placeholder instead of
                // failing the whole request.
                warn!("retrieval failed, continuing without hits: {e}");
                Vec::new()
            }
        };

        // Hits without a text payload are dropped, not padded with empties.
        let hit_texts: Vec<String> = hits.into_iter().filter_map(|h| h.text).collect();
        let context = assemble_context(selected_text, &hit_texts);
        trace!("assembled context: {context}");

        let prompt = build_prompt(&context, question);
        match self.generator.generate(&prompt).await {
            Ok(GenerationOutcome::Text(text)) => ChatReply::Answer(text),
            Ok(GenerationOutcome::Blocked { reason }) => {
                warn!("generation blocked by safety filter: {reason}");
                ChatReply::Blocked { reason }
            }
            Err(e) => {
                warn!("generation failed: {e}");
                ChatReply::Failed {
                    kind: FailureKind::Generation,
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ai_llm_service::error_handler::AiLlmError;
    use ai_llm_service::services::gemini_service::GeminiError;
    use rag_store::{RagError, RagHit};
    use serde_json::json;

    struct FakeEmbedder {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeEmbedder {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    impl EmbeddingsProvider for FakeEmbedder {
        fn embed<'a>(
            &'a self,
            text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls.lock().unwrap().push(text.to_string());
                if self.fail {
                    Err(RagError::Embedding("provider down".into()))
                } else {
                    Ok(vec![0.1, 0.2, 0.3])
                }
            })
        }
    }

    struct FakeRetriever {
        calls: AtomicUsize,
        result: Result<Vec<RagHit>, ()>,
    }

    impl FakeRetriever {
        fn with_hits(hits: Vec<RagHit>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Ok(hits),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Err(()),
            }
        }
    }

    impl Retriever for FakeRetriever {
        fn top_hits<'a>(
            &'a self,
            _query_vector: Vec<f32>,
            _top_k: u64,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<RagHit>, RagError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                match &self.result {
                    Ok(hits) => Ok(hits.clone()),
                    Err(()) => Err(RagError::Qdrant("connection refused".into())),
                }
            })
        }
    }

    enum GenBehavior {
        Text(&'static str),
        Blocked(&'static str),
        Fail,
    }

    struct FakeGenerator {
        prompts: Mutex<Vec<String>>,
        behavior: GenBehavior,
    }

    impl FakeGenerator {
        fn new(behavior: GenBehavior) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                behavior,
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl AnswerGenerator for FakeGenerator {
        fn generate<'a>(
            &'a self,
            prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<GenerationOutcome, AiLlmError>> + Send + 'a>>
        {
            Box::pin(async move {
                self.prompts.lock().unwrap().push(prompt.to_string());
                match &self.behavior {
                    GenBehavior::Text(t) => Ok(GenerationOutcome::Text(t.to_string())),
                    GenBehavior::Blocked(reason) => Ok(GenerationOutcome::Blocked {
                        reason: reason.to_string(),
                    }),
                    GenBehavior::Fail => Err(AiLlmError::Gemini(GeminiError::Decode(
                        "bad response".into(),
                    ))),
                }
            })
        }
    }

    fn hit(text: Option<&str>) -> RagHit {
        RagHit {
            score: 0.5,
            text: text.map(|t| t.to_string()),
            file_path: None,
            payload: json!({}),
        }
    }

    fn pipeline(
        embedder: Arc<FakeEmbedder>,
        retriever: Arc<FakeRetriever>,
        generator: Arc<FakeGenerator>,
    ) -> ChatPipeline {
        ChatPipeline::new(embedder, retriever, generator)
    }

    #[tokio::test]
    async fn empty_question_short_circuits_without_any_provider_call() {
        let embedder = Arc::new(FakeEmbedder::ok());
        let retriever = Arc::new(FakeRetriever::with_hits(vec![]));
        let generator = Arc::new(FakeGenerator::new(GenBehavior::Text("x")));
        let p = pipeline(embedder.clone(), retriever.clone(), generator.clone());

        for q in ["", "   ", "\n\t"] {
            assert_eq!(p.answer(q, "selected").await, ChatReply::EmptyQuestion);
        }
        assert!(embedder.calls.lock().unwrap().is_empty());
        assert_eq!(retriever.calls.load(Ordering::SeqCst), 0);
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn embeds_the_question_exactly_once_and_answers() {
        let embedder = Arc::new(FakeEmbedder::ok());
        let retriever = Arc::new(FakeRetriever::with_hits(vec![hit(Some("A"))]));
        let generator = Arc::new(FakeGenerator::new(GenBehavior::Text("the answer")));
        let p = pipeline(embedder.clone(), retriever, generator);

        let reply = p.answer("why?", "").await;
        assert_eq!(reply, ChatReply::Answer("the answer".into()));
        assert_eq!(*embedder.calls.lock().unwrap(), vec!["why?".to_string()]);
    }

    #[tokio::test]
    async fn prompt_carries_selected_text_then_hits_and_drops_textless_hits() {
        let embedder = Arc::new(FakeEmbedder::ok());
        let retriever = Arc::new(FakeRetriever::with_hits(vec![
            hit(Some("A")),
            hit(None),
            hit(Some("B")),
        ]));
        let generator = Arc::new(FakeGenerator::new(GenBehavior::Text("ok")));
        let p = pipeline(embedder, retriever, generator.clone());

        p.answer("why?", "S").await;

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Context:\nS\n\nA\n\nB\n"));
        assert!(prompts[0].contains("Question: why?"));
    }

    #[tokio::test]
    async fn embedding_failure_aborts_before_retrieval_and_generation() {
        let embedder = Arc::new(FakeEmbedder::failing());
        let retriever = Arc::new(FakeRetriever::with_hits(vec![hit(Some("A"))]));
        let generator = Arc::new(FakeGenerator::new(GenBehavior::Text("x")));
        let p = pipeline(embedder, retriever.clone(), generator.clone());

        let reply = p.answer("why?", "").await;
        assert!(matches!(
            reply,
            ChatReply::Failed {
                kind: FailureKind::Embedding,
                ..
            }
        ));
        assert_eq!(reply.reply_text(), "Embedding failed.");
        assert_eq!(retriever.calls.load(Ordering::SeqCst), 0);
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn retrieval_failure_degrades_to_placeholder_context() {
        let embedder = Arc::new(FakeEmbedder::ok());
        let retriever = Arc::new(FakeRetriever::failing());
        let generator = Arc::new(FakeGenerator::new(GenBehavior::Text("degraded answer")));
        let p = pipeline(embedder, retriever, generator.clone());

        let reply = p.answer("why?", "").await;
        assert_eq!(reply, ChatReply::Answer("degraded answer".into()));

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(NO_CONTEXT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn retrieval_failure_still_uses_selected_text() {
        let embedder = Arc::new(FakeEmbedder::ok());
        let retriever = Arc::new(FakeRetriever::failing());
        let generator = Arc::new(FakeGenerator::new(GenBehavior::Text("ok")));
        let p = pipeline(embedder, retriever, generator.clone());

        p.answer("why?", "S").await;
        let prompts = generator.prompts();
        assert!(prompts[0].contains("Context:\nS\n"));
        assert!(!prompts[0].contains(NO_CONTEXT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn safety_block_is_reported_with_its_reason() {
        let embedder = Arc::new(FakeEmbedder::ok());
        let retriever = Arc::new(FakeRetriever::with_hits(vec![]));
        let generator = Arc::new(FakeGenerator::new(GenBehavior::Blocked("SAFETY")));
        let p = pipeline(embedder, retriever, generator);

        let reply = p.answer("why?", "").await;
        assert_eq!(
            reply,
            ChatReply::Blocked {
                reason: "SAFETY".into()
            }
        );
        assert!(reply.reply_text().contains("SAFETY"));
    }

    #[tokio::test]
    async fn generation_failure_yields_fixed_reply() {
        let embedder = Arc::new(FakeEmbedder::ok());
        let retriever = Arc::new(FakeRetriever::with_hits(vec![]));
        let generator = Arc::new(FakeGenerator::new(GenBehavior::Fail));
        let p = pipeline(embedder, retriever, generator);

        let reply = p.answer("why?", "").await;
        assert!(matches!(
            reply,
            ChatReply::Failed {
                kind: FailureKind::Generation,
                ..
            }
        ));
        assert_eq!(reply.reply_text(), "Failed to generate answer.");
    }
}
