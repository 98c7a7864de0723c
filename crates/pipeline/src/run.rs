//! Per-run result record and the text envelope it is saved in.

use serde::{Deserialize, Serialize};

use crate::{PipelineRunId, StageId, Timestamp};

/// Width of the `=` rules framing the saved article.
const RULE_WIDTH: usize = 80;

/// Returns the output a stage reports when its model call failed.
pub fn stage_failure_text(stage: StageId, fault: &impl std::fmt::Display) -> String {
    format!("Error during {}: {fault}", stage.activity())
}

/// What a single stage run produced.
///
/// The failure flag is carried next to the text so that model output which
/// happens to read like a failure report is never mistaken for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    /// Stage output, a failure report, or `""` when the stage had no input.
    pub text: String,
    /// `true` when the model call failed and `text` is a failure report.
    pub failed: bool,
}

impl StageOutcome {
    /// Output of a successful model call.
    pub fn completed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: false,
        }
    }

    /// A stage that had nothing to work on.
    pub fn skipped() -> Self {
        Self::completed(String::new())
    }

    /// A failed model call, reported as text.
    pub fn failed(stage: StageId, fault: &impl std::fmt::Display) -> Self {
        Self {
            text: stage_failure_text(stage, fault),
            failed: true,
        }
    }
}

// ---------------------------------------------------------------------------

/// Everything one pipeline run produced.
///
/// Created with empty text fields when the run starts and filled in stage by
/// stage. A field holds either the stage's text, a failure report (listed in
/// `failed`) or the empty string when the stage had no input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Identifier of the run that produced this record.
    pub run_id: PipelineRunId,
    /// Topic exactly as supplied by the caller.
    pub topic: String,
    /// Researcher output.
    pub research: String,
    /// Writer output.
    pub draft: String,
    /// Editor output.
    pub final_text: String,
    /// When the run started.
    pub timestamp: Timestamp,
    /// Stages whose model call failed, in execution order.
    #[serde(default)]
    pub failed: Vec<StageId>,
}

impl RunResult {
    /// Starts an empty record for `topic`.
    pub fn start(run_id: PipelineRunId, topic: impl Into<String>) -> Self {
        Self {
            run_id,
            topic: topic.into(),
            research: String::new(),
            draft: String::new(),
            final_text: String::new(),
            timestamp: Timestamp::now(),
            failed: Vec::new(),
        }
    }

    /// Returns the output recorded for `stage`.
    pub fn output(&self, stage: StageId) -> &str {
        match stage {
            StageId::Researcher => &self.research,
            StageId::Writer => &self.draft,
            StageId::Editor => &self.final_text,
        }
    }

    /// Records the outcome of `stage`, replacing any earlier one.
    pub fn record(&mut self, stage: StageId, outcome: StageOutcome) {
        let StageOutcome { text, failed } = outcome;
        match stage {
            StageId::Researcher => self.research = text,
            StageId::Writer => self.draft = text,
            StageId::Editor => self.final_text = text,
        }
        self.failed.retain(|s| *s != stage);
        if failed {
            self.failed.push(stage);
            self.failed.sort();
        }
    }

    /// Stages whose model call failed.
    pub fn failed_stages(&self) -> &[StageId] {
        &self.failed
    }

    /// Returns `true` if the editor produced text without failing.
    pub fn is_complete(&self) -> bool {
        !self.final_text.is_empty() && !self.failed.contains(&StageId::Editor)
    }

    /// Renders the plain-text file contents for this result.
    pub fn render_article(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!(
            "{rule}\nARTICLE GENERATED BY MULTI-AGENT SYSTEM\n{rule}\n\n\
             Topic: {}\nDate: {}\n{rule}\n\n{}",
            self.topic,
            self.timestamp.human(),
            self.final_text
        )
    }

    /// Default file name for this result, derived from its timestamp.
    pub fn default_file_name(&self) -> String {
        format!("article_{}.txt", self.timestamp.file_stamp())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixed_result() -> RunResult {
        let mut result = RunResult::start(PipelineRunId::new_random(), "Rust in 2025");
        result.timestamp = Timestamp::from_utc(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
        result
    }

    #[test]
    fn start_has_empty_outputs() {
        let result = RunResult::start(PipelineRunId::new_random(), "topic");
        for stage in StageId::ALL {
            assert_eq!(result.output(stage), "");
        }
        assert!(!result.is_complete());
    }

    #[test]
    fn record_routes_by_stage() {
        let mut result = fixed_result();
        result.record(StageId::Researcher, StageOutcome::completed("r"));
        result.record(StageId::Writer, StageOutcome::completed("d"));
        result.record(StageId::Editor, StageOutcome::completed("f"));
        assert_eq!(
            (result.research.as_str(), result.draft.as_str(), result.final_text.as_str()),
            ("r", "d", "f")
        );
        assert!(result.is_complete());
    }

    #[test]
    fn failure_reports_are_detected() {
        let mut result = fixed_result();
        result.record(StageId::Researcher, StageOutcome::completed("notes"));
        result.record(
            StageId::Writer,
            StageOutcome::failed(StageId::Writer, &"quota exhausted"),
        );
        assert_eq!(result.draft, "Error during drafting: quota exhausted");
        assert_eq!(result.failed_stages(), &[StageId::Writer]);
    }

    #[test]
    fn failure_wording_in_model_output_is_not_a_failure() {
        let mut result = fixed_result();
        let text = "Error during deployment: lessons from a failed rollout";
        for stage in StageId::ALL {
            result.record(stage, StageOutcome::completed(text));
        }
        assert!(result.failed_stages().is_empty());
        assert!(result.is_complete());
    }

    #[test]
    fn failed_editor_is_incomplete() {
        let mut result = fixed_result();
        result.record(StageId::Editor, StageOutcome::failed(StageId::Editor, &"timeout"));
        assert!(!result.is_complete());
        assert_eq!(result.failed_stages(), &[StageId::Editor]);

        result.record(StageId::Editor, StageOutcome::completed("final"));
        assert!(result.is_complete());
        assert!(result.failed_stages().is_empty());
    }

    #[test]
    fn article_envelope_layout() {
        let mut result = fixed_result();
        result.final_text = "Final body".into();
        let rule = "=".repeat(80);
        let expected = format!(
            "{rule}\nARTICLE GENERATED BY MULTI-AGENT SYSTEM\n{rule}\n\n\
             Topic: Rust in 2025\nDate: 2025-01-02 03:04:05\n{rule}\n\nFinal body"
        );
        assert_eq!(result.render_article(), expected);
        assert_eq!(result.default_file_name(), "article_20250102_030405.txt");
    }
}
