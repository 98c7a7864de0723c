//! Scribe stage agents and pipeline coordinator.
//!
//! This crate provides the [`StageAgent`] shared by the researcher, writer and
//! editor stages and the [`ArticlePipeline`] that runs them in sequence and
//! saves the result.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Agents sequence calls between the domain in the
//! [`pipeline`] crate and the [`pipeline::LanguageModel`] port. They contain
//! no domain rules of their own.

mod coordinator;
mod stage;

pub use coordinator::ArticlePipeline;
pub use stage::{StageAgent, StageInput};
