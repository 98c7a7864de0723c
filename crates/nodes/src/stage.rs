//! Stage agents.
//!
//! A [`StageAgent`] is one model profile plus one prompt template. All three
//! stages share this shape; they differ only in [`StageId`], which selects the
//! template, the failure wording and the stage the output is addressed to.

use std::sync::Arc;

use pipeline::{prompts, LanguageModel, MessageLog, ModelProfile, StageId, StageOutcome};
use tracing::{info, instrument, warn};

/// Where a stage takes its input from.
#[derive(Debug, Clone, Copy)]
pub enum StageInput<'a> {
    /// Caller-supplied text (the researcher's topic).
    Explicit(&'a str),
    /// The latest message addressed to the running stage.
    Inbox,
}

/// One configured pipeline stage.
#[derive(Clone)]
pub struct StageAgent {
    stage: StageId,
    profile: ModelProfile,
    model: Arc<dyn LanguageModel>,
}

impl StageAgent {
    /// Creates the agent for `stage`.
    pub fn new(stage: StageId, profile: ModelProfile, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            stage,
            profile,
            model,
        }
    }

    /// The stage this agent runs.
    pub fn stage(&self) -> StageId {
        self.stage
    }

    /// The model and sampling this agent calls with.
    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    /// Runs the stage once and returns its outcome.
    ///
    /// - No input (empty inbox): a skipped outcome, without calling the model.
    /// - Model success: appends the output to `log` addressed to the next
    ///   stage, if there is one, and returns it.
    /// - Model fault: a failed outcome carrying the failure report. Nothing
    ///   is appended.
    #[instrument(
        name = "stage",
        skip_all,
        fields(stage = %self.stage, model = %self.profile.model)
    )]
    pub async fn run(&self, input: StageInput<'_>, log: &mut MessageLog) -> StageOutcome {
        let input = match input {
            StageInput::Explicit(text) => text.to_string(),
            StageInput::Inbox => match log.latest_for(self.stage) {
                Some(message) => {
                    info!(from = %message.sender(), "input received");
                    message.content().to_string()
                }
                None => {
                    warn!("no input addressed to this stage; skipping model call");
                    return StageOutcome::skipped();
                }
            },
        };

        let prompt = prompts::render(self.stage, &input);
        info!(agent = self.stage.agent_name(), "calling model");

        match self.model.generate(&self.profile, &prompt).await {
            Ok(output) => {
                info!(output_chars = output.chars().count(), "stage completed");
                if let Some(next) = self.stage.next() {
                    log.append(self.stage, next, output.clone());
                }
                StageOutcome::completed(output)
            }
            Err(err) => {
                warn!(error = %err, "stage failed");
                StageOutcome::failed(self.stage, &err)
            }
        }
    }
}

impl std::fmt::Debug for StageAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageAgent")
            .field("stage", &self.stage)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
