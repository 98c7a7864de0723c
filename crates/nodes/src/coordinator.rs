//! The research → write → edit coordinator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pipeline::{
    LanguageModel, MessageLog, PipelineConfig, PipelineRunId, RunResult, ScribeError, StageId,
};
use tracing::{info, info_span, warn, Instrument};

use crate::stage::{StageAgent, StageInput};

/// Runs the three stages in order and stores the final article.
///
/// Every call to [`generate`](Self::generate) starts from a fresh
/// [`MessageLog`], so runs never observe each other's messages.
#[derive(Debug, Clone)]
pub struct ArticlePipeline {
    researcher: StageAgent,
    writer: StageAgent,
    editor: StageAgent,
    output_dir: PathBuf,
}

impl ArticlePipeline {
    /// Builds the pipeline from explicit configuration and a model backend.
    pub fn new(config: &PipelineConfig, model: Arc<dyn LanguageModel>) -> Self {
        let agent = |stage| StageAgent::new(stage, config.profile(stage).clone(), model.clone());
        let pipeline = Self {
            researcher: agent(StageId::Researcher),
            writer: agent(StageId::Writer),
            editor: agent(StageId::Editor),
            output_dir: config.output_dir.clone(),
        };
        for stage in pipeline.agents() {
            info!(
                stage = %stage.stage(),
                agent = stage.stage().agent_name(),
                role = stage.stage().role(),
                model = %stage.profile().model,
                sampling = %stage.profile().sampling,
                "stage agent ready"
            );
        }
        pipeline
    }

    /// The stage agents in execution order.
    pub fn agents(&self) -> [&StageAgent; 3] {
        [&self.researcher, &self.writer, &self.editor]
    }

    /// Generates an article about `topic`.
    ///
    /// Always returns a record. A failed stage leaves a failure report in its
    /// field and the stages after it receive no input.
    pub async fn generate(&self, topic: &str) -> RunResult {
        self.generate_with_transcript(topic).await.0
    }

    /// Like [`generate`](Self::generate), also returning the messages the
    /// stages exchanged.
    pub async fn generate_with_transcript(&self, topic: &str) -> (RunResult, MessageLog) {
        let run_id = PipelineRunId::new_random();
        let span = info_span!("pipeline_run", %run_id, topic);
        self.run(run_id, topic).instrument(span).await
    }

    async fn run(&self, run_id: PipelineRunId, topic: &str) -> (RunResult, MessageLog) {
        let mut result = RunResult::start(run_id, topic);
        let mut log = MessageLog::new();
        info!(started_at = %result.timestamp.human(), "run started");

        let research = self
            .researcher
            .run(StageInput::Explicit(topic), &mut log)
            .await;
        result.record(StageId::Researcher, research);

        let draft = self.writer.run(StageInput::Inbox, &mut log).await;
        result.record(StageId::Writer, draft);

        let final_text = self.editor.run(StageInput::Inbox, &mut log).await;
        result.record(StageId::Editor, final_text);

        let failed = result.failed_stages();
        if failed.is_empty() {
            info!(messages = log.len(), "run finished");
        } else {
            warn!(messages = log.len(), ?failed, "run finished with failed stages");
        }
        (result, log)
    }

    /// Writes `result` as a plain-text article.
    ///
    /// Without an explicit `path` the file goes to the configured output
    /// directory under a name derived from the run's timestamp. Returns the
    /// path written.
    pub async fn save(
        &self,
        result: &RunResult,
        path: Option<&Path>,
    ) -> Result<PathBuf, ScribeError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => self.output_dir.join(result.default_file_name()),
        };

        tokio::fs::write(&path, result.render_article())
            .await
            .map_err(|source| {
                warn!(path = %path.display(), error = %source, "article not saved");
                ScribeError::Storage {
                    path: path.clone(),
                    source,
                }
            })?;

        info!(path = %path.display(), run_id = %result.run_id, "article saved");
        Ok(path)
    }
}
