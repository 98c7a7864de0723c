//! Explicit pipeline configuration.
//!
//! Everything a run needs from its environment (credential, model names,
//! endpoint, output location) is gathered into a [`PipelineConfig`] before
//! the pipeline is built. The domain never reads process state itself:
//! [`PipelineConfig::from_lookup`] takes the key lookup as a function, which
//! the binary wires to `std::env::var`.

use std::path::PathBuf;
use std::time::Duration;

use crate::{ModelId, ModelProfile, SamplingConfig, ScribeError, StageId};

/// Environment key holding the service credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment key overriding the service base URL.
pub const BASE_URL_VAR: &str = "GEMINI_API_BASE_URL";
/// Environment key overriding the per-request timeout in seconds.
pub const TIMEOUT_VAR: &str = "SCRIBE_REQUEST_TIMEOUT_SECS";
/// Environment key overriding the directory default-named articles go to.
pub const OUTPUT_DIR_VAR: &str = "SCRIBE_OUTPUT_DIR";

/// Default base URL of the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

// ---------------------------------------------------------------------------

/// The model-service credential.
///
/// `Debug` and `Display` never print the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a credential, returning `None` if it is blank.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the secret for use in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

// ---------------------------------------------------------------------------

/// Configuration handed to the pipeline and model backend at construction.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Model-service credential.
    pub api_key: ApiKey,
    /// Base URL of the model service.
    pub base_url: String,
    /// Per-request timeout enforced by the HTTP client.
    pub request_timeout: Duration,
    /// Researcher model and sampling.
    pub researcher: ModelProfile,
    /// Writer model and sampling.
    pub writer: ModelProfile,
    /// Editor model and sampling.
    pub editor: ModelProfile,
    /// Directory that receives articles saved without an explicit path.
    pub output_dir: PathBuf,
}

impl PipelineConfig {
    /// Builds a configuration with the default stage roster.
    pub fn with_defaults(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            researcher: default_profile(StageId::Researcher),
            writer: default_profile(StageId::Writer),
            editor: default_profile(StageId::Editor),
            output_dir: PathBuf::from("."),
        }
    }

    /// Builds a configuration from a key lookup (normally the process
    /// environment).
    ///
    /// Fails with [`ScribeError::MissingCredential`] when [`API_KEY_VAR`] is
    /// absent or blank, and with [`ScribeError::ConfigurationError`] when an
    /// override is present but unusable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScribeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .and_then(ApiKey::new)
            .ok_or_else(|| ScribeError::MissingCredential {
                variable: API_KEY_VAR.to_string(),
            })?;

        let mut config = Self::with_defaults(api_key);

        if let Some(url) = lookup(BASE_URL_VAR) {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                return Err(ScribeError::ConfigurationError {
                    message: format!("{BASE_URL_VAR} must not be blank"),
                });
            }
            config.base_url = url.to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                ScribeError::ConfigurationError {
                    message: format!("{TIMEOUT_VAR} must be a positive number of seconds, got '{raw}'"),
                }
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        for stage in StageId::ALL {
            let var = model_var(stage);
            if let Some(name) = lookup(&var) {
                let model = ModelId::new(name.trim()).ok_or_else(|| {
                    ScribeError::ConfigurationError {
                        message: format!("{var} must not be blank"),
                    }
                })?;
                config.profile_mut(stage).model = model;
            }
        }

        if let Some(dir) = lookup(OUTPUT_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir.trim());
        }

        Ok(config)
    }

    /// Returns the profile `stage` calls the model with.
    pub fn profile(&self, stage: StageId) -> &ModelProfile {
        match stage {
            StageId::Researcher => &self.researcher,
            StageId::Writer => &self.writer,
            StageId::Editor => &self.editor,
        }
    }

    fn profile_mut(&mut self, stage: StageId) -> &mut ModelProfile {
        match stage {
            StageId::Researcher => &mut self.researcher,
            StageId::Writer => &mut self.writer,
            StageId::Editor => &mut self.editor,
        }
    }
}

/// Environment key overriding the model used by `stage`,
/// e.g. `SCRIBE_WRITER_MODEL`.
pub fn model_var(stage: StageId) -> String {
    format!("SCRIBE_{}_MODEL", stage.as_str().to_ascii_uppercase())
}

/// The built-in model and sampling profile of `stage`.
pub fn default_profile(stage: StageId) -> ModelProfile {
    let (model, temperature, top_p, top_k) = match stage {
        StageId::Researcher => ("gemini-2.5-flash", 0.3, 0.8, 40),
        StageId::Writer => ("gemini-2.5-pro", 0.5, 0.85, 40),
        StageId::Editor => ("gemini-2.0-flash", 0.2, 0.75, 30),
    };
    ModelProfile {
        model: ModelId::builtin(model),
        sampling: SamplingConfig::builtin(temperature, top_p, top_k),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_credential_is_reported() {
        let err = PipelineConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ScribeError::MissingCredential { ref variable } if variable == API_KEY_VAR));
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let err = PipelineConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, ScribeError::MissingCredential { .. }));
    }

    #[test]
    fn defaults_follow_stage_roster() {
        let config = PipelineConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "k")])).unwrap();
        assert_eq!(config.researcher.model.as_str(), "gemini-2.5-flash");
        assert_eq!(config.writer.model.as_str(), "gemini-2.5-pro");
        assert_eq!(config.editor.model.as_str(), "gemini-2.0-flash");
        assert_eq!(config.writer.sampling.temperature(), 0.5);
        assert_eq!(config.editor.sampling.top_k(), 30);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn research_and_editing_sample_colder_than_writing() {
        let writer = default_profile(StageId::Writer).sampling.temperature();
        assert!(default_profile(StageId::Researcher).sampling.temperature() < writer);
        assert!(default_profile(StageId::Editor).sampling.temperature() < writer);
    }

    #[test]
    fn overrides_are_applied() {
        let config = PipelineConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, " secret "),
            (BASE_URL_VAR, "http://localhost:8080/"),
            (TIMEOUT_VAR, "15"),
            ("SCRIBE_WRITER_MODEL", "gemini-2.5-flash"),
            (OUTPUT_DIR_VAR, "out"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.expose(), "secret");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.writer.model.as_str(), "gemini-2.5-flash");
        assert_eq!(config.researcher.model.as_str(), "gemini-2.5-flash");
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        for pairs in [
            vec![(API_KEY_VAR, "k"), (TIMEOUT_VAR, "soon")],
            vec![(API_KEY_VAR, "k"), (TIMEOUT_VAR, "0")],
            vec![(API_KEY_VAR, "k"), ("SCRIBE_EDITOR_MODEL", " ")],
            vec![(API_KEY_VAR, "k"), (BASE_URL_VAR, "/")],
        ] {
            let err = PipelineConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(matches!(err, ScribeError::ConfigurationError { .. }), "{pairs:?}");
        }
    }

    #[test]
    fn api_key_is_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        assert!(!format!("{key:?}").contains("super-secret"));
        assert!(!key.to_string().contains("super-secret"));
    }

    #[test]
    fn model_vars_are_per_stage() {
        assert_eq!(model_var(StageId::Researcher), "SCRIBE_RESEARCHER_MODEL");
        assert_eq!(model_var(StageId::Editor), "SCRIBE_EDITOR_MODEL");
    }
}
