//! End-to-end behaviour of the article pipeline against scripted models.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use nodes::ArticlePipeline;
use pipeline::{
    ApiKey, LanguageModel, LlmError, ModelId, ModelProfile, PipelineConfig,
    ScribeError, StageId,
};
use pretty_assertions::assert_eq;

const RESEARCH_MODEL: &str = "research-model";
const WRITER_MODEL: &str = "writer-model";
const EDITOR_MODEL: &str = "editor-model";

fn test_config(output_dir: &std::path::Path) -> PipelineConfig {
    let mut config = PipelineConfig::with_defaults(ApiKey::new("test-key").unwrap());
    config.researcher.model = ModelId::new(RESEARCH_MODEL).unwrap();
    config.writer.model = ModelId::new(WRITER_MODEL).unwrap();
    config.editor.model = ModelId::new(EDITOR_MODEL).unwrap();
    config.output_dir = output_dir.to_path_buf();
    config
}

/// Deterministic stand-in: answers with the model name and a digest of the
/// prompt (or a fixed reply), or fails for one chosen model.
#[derive(Default)]
struct ScriptedModel {
    failing_model: Option<&'static str>,
    fixed_reply: Option<&'static str>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    fn failing_on(model: &'static str) -> Self {
        Self {
            failing_model: Some(model),
            ..Self::default()
        }
    }

    fn replying(reply: &'static str) -> Self {
        Self {
            fixed_reply: Some(reply),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, profile: &ModelProfile, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_model == Some(profile.model.as_str()) {
            return Err(LlmError::Transport {
                message: "connection reset".into(),
            });
        }
        if let Some(reply) = self.fixed_reply {
            return Ok(reply.to_string());
        }
        let words = prompt.split_whitespace().count();
        Ok(format!("{} output ({words} prompt words)", profile.model))
    }
}

fn build(model: Arc<ScriptedModel>) -> (ArticlePipeline, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = ArticlePipeline::new(&test_config(dir.path()), model);
    (pipeline, dir)
}

#[tokio::test]
async fn topic_is_preserved_exactly() {
    let (pipeline, _dir) = build(Arc::new(ScriptedModel::default()));
    for topic in ["Quantum computing", "", "  padded  ", "ünïcødé: ✓"] {
        assert_eq!(pipeline.generate(topic).await.topic, topic);
    }
}

#[tokio::test]
async fn successful_run_fills_every_stage() {
    let model = Arc::new(ScriptedModel::default());
    let (pipeline, _dir) = build(model.clone());

    let (result, log) = pipeline.generate_with_transcript("Rust").await;

    assert!(result.research.starts_with(RESEARCH_MODEL));
    assert!(result.draft.starts_with(WRITER_MODEL));
    assert!(result.final_text.starts_with(EDITOR_MODEL));
    assert!(result.is_complete());
    assert_eq!(model.calls(), 3);
    assert_eq!(log.len(), 2);
    let senders: Vec<_> = log.iter().map(|m| (m.sender(), m.recipient())).collect();
    assert_eq!(
        senders,
        vec![
            (StageId::Researcher, StageId::Writer),
            (StageId::Writer, StageId::Editor)
        ]
    );
}

#[tokio::test]
async fn missing_research_propagates_absence_downstream() {
    let model = Arc::new(ScriptedModel::failing_on(RESEARCH_MODEL));
    let (pipeline, _dir) = build(model.clone());

    let (result, log) = pipeline.generate_with_transcript("Rust").await;

    assert!(result.research.starts_with("Error during research:"));
    assert_eq!(result.draft, "");
    assert_eq!(result.final_text, "");
    assert!(log.is_empty());
    assert_eq!(model.calls(), 1);
    assert_eq!(result.failed_stages(), &[StageId::Researcher]);
}

#[tokio::test]
async fn writer_fault_is_isolated_to_the_draft() {
    let model = Arc::new(ScriptedModel::failing_on(WRITER_MODEL));
    let (pipeline, _dir) = build(model);

    let result = pipeline.generate("Rust").await;

    assert!(result.research.starts_with(RESEARCH_MODEL));
    assert!(result.draft.starts_with("Error during drafting:"), "{}", result.draft);
    assert!(result.draft.contains("connection reset"));
    assert_eq!(result.final_text, "");
    assert_eq!(result.failed_stages(), &[StageId::Writer]);
    assert!(!result.is_complete());
}

#[tokio::test]
async fn article_opening_like_an_error_report_is_complete() {
    let reply = "Error during deployment: lessons from a failed rollout\n\nBody";
    let model = Arc::new(ScriptedModel::replying(reply));
    let (pipeline, dir) = build(model.clone());

    let (result, log) = pipeline.generate_with_transcript("Postmortems").await;

    assert_eq!(model.calls(), 3);
    assert_eq!(log.len(), 2);
    assert!(result.failed_stages().is_empty());
    assert!(result.is_complete());
    assert_eq!(result.final_text, reply);

    let path = pipeline.save(&result, None).await.unwrap();
    assert!(path.starts_with(dir.path()));
    assert!(std::fs::read_to_string(&path).unwrap().ends_with(reply));
}

#[tokio::test]
async fn repeated_runs_do_not_share_state() {
    let (pipeline, _dir) = build(Arc::new(ScriptedModel::default()));

    let first = pipeline.generate("Same topic").await;
    let second = pipeline.generate("Same topic").await;

    assert_eq!(
        (&first.topic, &first.research, &first.draft, &first.final_text, &first.failed),
        (&second.topic, &second.research, &second.draft, &second.final_text, &second.failed)
    );
    assert_ne!(first.run_id, second.run_id);
}

#[tokio::test]
async fn save_without_path_uses_timestamped_name() {
    let (pipeline, dir) = build(Arc::new(ScriptedModel::default()));
    let result = pipeline.generate("Storage").await;

    let path = pipeline.save(&result, None).await.unwrap();

    assert_eq!(path.parent(), Some(dir.path()));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.contains(&result.timestamp.file_stamp()), "{name}");
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains(&result.final_text));
    assert!(contents.contains("Topic: Storage"));
}

#[tokio::test]
async fn save_to_explicit_path() {
    let (pipeline, dir) = build(Arc::new(ScriptedModel::default()));
    let result = pipeline.generate("Explicit").await;
    let target = dir.path().join("custom.txt");

    let path = pipeline.save(&result, Some(target.as_path())).await.unwrap();

    assert_eq!(path, target);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), result.render_article());
}

#[tokio::test]
async fn storage_fault_is_reported() {
    let (pipeline, dir) = build(Arc::new(ScriptedModel::default()));
    let result = pipeline.generate("Unwritable").await;
    let target = dir.path().join("missing-dir").join("article.txt");

    let err = pipeline.save(&result, Some(target.as_path())).await.unwrap_err();

    assert!(matches!(err, ScribeError::Storage { ref path, .. } if *path == target));
}
