//! Core orchestration domain for Scribe.
//!
//! This crate contains every domain concept used by the three-stage article
//! pipeline: stage identifiers, sampling profiles, the inter-stage message log,
//! the per-run result record, prompt templates, configuration and the
//! [`LanguageModel`] port. Infrastructure crates implement the port; they
//! never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | `PipelineRunId`, `ModelId`, `StageId` |
//! | [`types`] | `SamplingConfig`, `ModelProfile`, `Timestamp` |
//! | [`message`] | `Message`, `MessageLog` |
//! | [`run`] | `RunResult` and the saved-article envelope |
//! | [`prompts`] | Stage instruction templates |
//! | [`config`] | `PipelineConfig`, `ApiKey` |
//! | [`ports`] | `LanguageModel` |
//! | [`errors`] | `LlmError`, `ScribeError` |

pub mod config;
pub mod errors;
pub mod identifiers;
pub mod message;
pub mod ports;
pub mod prompts;
pub mod run;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{ApiKey, PipelineConfig};
pub use errors::{LlmError, ScribeError};
pub use identifiers::{ModelId, PipelineRunId, StageId};
pub use message::{Message, MessageLog};
pub use ports::LanguageModel;
pub use run::{stage_failure_text, RunResult, StageOutcome};
pub use types::{ModelProfile, SamplingConfig, Timestamp};
