//! Scribe language-model infrastructure adapter.
//!
//! Implements the [`pipeline::LanguageModel`] trait for Google's Gemini
//! `generateContent` API. Additional providers are added as new types in this
//! crate without any changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting and response parsing
//! live here. The [`pipeline`] crate sees only [`pipeline::LanguageModel`] and
//! [`pipeline::LlmError`].
//!
//! No retries are attempted: a failed call is returned to the stage as-is.

mod gemini;
mod wire;

pub use gemini::GeminiProvider;
