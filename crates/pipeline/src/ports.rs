//! Port traits implemented by infrastructure crates.

use async_trait::async_trait;

use crate::{LlmError, ModelProfile};

/// A generative-language-model backend.
///
/// The only capability the pipeline needs from a model service: turn one
/// prompt into text using the given model and sampling profile. Production
/// code uses the Gemini adapter from the `llm` crate; tests substitute
/// scripted stand-ins.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates text for `prompt`.
    ///
    /// Any fault is returned as an [`LlmError`]; callers decide what a fault
    /// means for their stage.
    async fn generate(&self, profile: &ModelProfile, prompt: &str) -> Result<String, LlmError>;
}
