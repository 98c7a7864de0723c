//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{ApiKey, LanguageModel, LlmError, ModelId, ModelProfile, PipelineConfig};
use tracing::{debug, instrument, warn};

use crate::wire::{api_error, GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// [`LanguageModel`] backed by the Gemini REST API.
///
/// One instance serves all three stages; the model name and sampling come
/// from the [`ModelProfile`] of each call.
#[derive(Clone)]
pub struct GeminiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

impl GeminiProvider {
    /// Creates a provider talking to `base_url` with a per-request `timeout`.
    pub fn new(
        api_key: ApiKey,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| LlmError::Configuration {
                message: err.to_string(),
            })?;

        Ok(Self::with_client(http, api_key, base_url))
    }

    fn with_client(http: reqwest::Client, api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Creates a provider from the pipeline configuration.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, LlmError> {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.request_timeout,
        )
    }

    fn endpoint(&self, model: &ModelId) -> String {
        endpoint(&self.base_url, model)
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

fn endpoint(base_url: &str, model: &ModelId) -> String {
    format!("{base_url}/v1beta/models/{model}:generateContent")
}

#[async_trait]
impl LanguageModel for GeminiProvider {
    #[instrument(
        name = "gemini.generate",
        skip_all,
        fields(model = %profile.model, prompt_chars = prompt.chars().count())
    )]
    async fn generate(&self, profile: &ModelProfile, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateContentRequest::single_turn(prompt, profile.sampling);

        let response = self
            .http
            .post(self.endpoint(&profile.model))
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|err| LlmError::Transport {
                message: err.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| LlmError::Transport {
            message: err.to_string(),
        })?;

        if !status.is_success() {
            let err = api_error(status.as_u16(), &text);
            warn!(status = status.as_u16(), error = %err, "model call rejected");
            return Err(err);
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|err| LlmError::InvalidResponse {
                message: err.to_string(),
            })?;
        let output = parsed.into_text()?;

        debug!(output_chars = output.chars().count(), "model call completed");
        Ok(output)
    }
}
