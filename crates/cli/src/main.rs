//! Scribe CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Load configuration**: read `.env`, then build a
//!    [`pipeline::PipelineConfig`] from the process environment. A missing
//!    credential stops the program before any run.
//! 2. **Wire observability**: configure `tracing-subscriber` (pretty or JSON
//!    on stderr) and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an
//!    OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: create the [`llm::GeminiProvider`] and
//!    inject it into [`nodes::ArticlePipeline`].
//! 4. **Pick a topic**: from `--topic` or the interactive menu.
//! 5. **Run and save**: generate the article, save it when the editor produced
//!    text, and print a run summary.

mod telemetry;
mod topics;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use llm::GeminiProvider;
use nodes::ArticlePipeline;
use pipeline::{MessageLog, PipelineConfig, RunResult};
use tracing::{error, info};

use crate::telemetry::LogFormat;

/// Generate a blog article with a research → write → edit model pipeline.
#[derive(Debug, Parser)]
#[command(name = "scribe", version)]
struct Cli {
    /// Topic to write about. Without it an interactive menu is shown.
    #[arg(long)]
    topic: Option<String>,

    /// File to write the article to. Defaults to a timestamped name in
    /// `SCRIBE_OUTPUT_DIR`.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the run result as JSON on stdout instead of the summary.
    #[arg(long)]
    json: bool,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Log at debug level (ignored when `RUST_LOG` is set).
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let otlp_endpoint = std::env::var(telemetry::OTLP_ENDPOINT_VAR).ok();
    let _telemetry = match telemetry::init(cli.log_format, cli.verbose, otlp_endpoint.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: failed to initialise logging: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "scribe failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = PipelineConfig::from_lookup(|key| std::env::var(key).ok())?;

    let topic = match cli.topic {
        Some(topic) => topic,
        None => {
            println!("\n{}", "=".repeat(80));
            println!("  SCRIBE - MULTI-AGENT ARTICLE GENERATOR");
            println!("{}\n", "=".repeat(80));
            let stdin = std::io::stdin();
            topics::prompt(stdin.lock(), std::io::stdout()).context("failed to read topic")?
        }
    };
    info!(%topic, "topic selected");

    let provider = GeminiProvider::from_config(&config).context("failed to build model client")?;
    let pipeline = ArticlePipeline::new(&config, Arc::new(provider));

    let (result, transcript) = pipeline.generate_with_transcript(&topic).await;

    let saved = if result.is_complete() {
        Some(pipeline.save(&result, cli.output.as_deref()).await)
    } else {
        None
    };
    let saved_path = saved
        .as_ref()
        .and_then(|outcome| outcome.as_ref().ok())
        .map(PathBuf::as_path);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result, &transcript, saved_path);
    }

    match saved {
        Some(Ok(_)) => Ok(()),
        Some(Err(err)) => Err(err).context("the article was generated but not saved"),
        None => anyhow::bail!("the pipeline did not produce a final article"),
    }
}

fn print_summary(result: &RunResult, transcript: &MessageLog, saved: Option<&std::path::Path>) {
    let rule = "=".repeat(80);
    println!("\n{rule}");
    println!("RUN SUMMARY");
    println!("{rule}");
    println!("Topic: {}", result.topic);
    println!("Research: {} characters", result.research.chars().count());
    println!("Draft: {} characters", result.draft.chars().count());
    println!("Final article: {} characters", result.final_text.chars().count());
    println!("Messages exchanged: {}", transcript.len());
    for message in transcript {
        println!("   {message}");
    }
    for &stage in result.failed_stages() {
        println!("Failed stage: {} ({})", stage.agent_name(), result.output(stage));
    }
    match saved {
        Some(path) => println!("Article saved to: {}", path.display()),
        None => println!("No article was saved."),
    }
    println!("{rule}\n");
}
