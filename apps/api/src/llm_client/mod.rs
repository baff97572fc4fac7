/// LLM Client — the single point of entry for all text-model calls.
///
/// No other module talks to the model backend directly. Callers depend on the
/// [`TextModel`] trait so the backend can be swapped for a test double.
///
/// Model: amazon.titan-text-express-v1 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use thiserror::Error;

pub mod bedrock;
#[cfg(test)]
pub mod mock;
pub mod prompts;

pub use bedrock::BedrockTextModel;

/// The model used for all plan generation calls.
pub const MODEL_ID: &str = "amazon.titan-text-express-v1";

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport, auth or throttling failure reported by the backend client.
    #[error("model invocation failed: {0}")]
    Invoke(String),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,
}

/// Sampling parameters sent with every call. Fixed per deployment,
/// never taken from the request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.1,
            top_p: 0.9,
        }
    }
}

/// One outbound call: the prompt, the wire-format hints, and sampling params.
#[derive(Debug, Clone)]
pub struct ModelInvocation<'a> {
    pub prompt: &'a str,
    pub content_type: &'a str,
    pub accept: &'a str,
    pub params: GenerationParams,
}

impl<'a> ModelInvocation<'a> {
    pub fn json(prompt: &'a str, params: GenerationParams) -> Self {
        Self {
            prompt,
            content_type: JSON_CONTENT_TYPE,
            accept: JSON_CONTENT_TYPE,
            params,
        }
    }
}

/// A hosted text-generation backend.
///
/// Implementations are shared across requests and must hold no per-request state.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Returns the model's raw text output for the invocation.
    async fn complete(&self, invocation: &ModelInvocation<'_>) -> Result<String, LlmError>;
}
