use crate::error_handler::{AiLlmError, must_env, validate_http_endpoint};

/// Default REST base for the Generative Language API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";

/// Default embedding model (768-dimensional vectors).
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-004";

/// Configuration for the Gemini client.
///
/// One config covers both profiles (generation and embeddings); the two
/// model ids select the profile per call.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// REST base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub endpoint: String,

    /// API key passed as the `key` query parameter.
    pub api_key: String,

    /// Model id used by `generate` (e.g. `gemini-2.0-flash`).
    pub chat_model: String,

    /// Model id used by `embed` (e.g. `text-embedding-004`).
    pub embed_model: String,

    /// Optional request timeout (in seconds). Defaults to 60.
    pub timeout_secs: Option<u64>,
}

impl GeminiConfig {
    /// Loads the config from environment variables.
    ///
    /// `GOOGLE_API_KEY` is required. `GEMINI_ENDPOINT`, `GEMINI_CHAT_MODEL`,
    /// `GEMINI_EMBED_MODEL`, and `GEMINI_TIMEOUT_SECS` are optional overrides.
    ///
    /// # Errors
    /// Returns [`AiLlmError::Config`] if the key is missing or the endpoint
    /// override is not an http(s) URL.
    pub fn from_env() -> Result<Self, AiLlmError> {
        let api_key = must_env("GOOGLE_API_KEY")?;

        let endpoint =
            std::env::var("GEMINI_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        validate_http_endpoint("GEMINI_ENDPOINT", &endpoint)?;

        let chat_model =
            std::env::var("GEMINI_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let embed_model =
            std::env::var("GEMINI_EMBED_MODEL").unwrap_or_else(|_| DEFAULT_EMBED_MODEL.to_string());

        let timeout_secs = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        Ok(Self {
            endpoint,
            api_key,
            chat_model,
            embed_model,
            timeout_secs,
        })
    }
}
