//! Run command implementation.

use super::{check_sources, read_submission, source_name};
use crate::cli::RunArgs;
use crate::config::{Config, OllamaSettings};
use crate::error::Result;
use crate::output::Formatter;
use concord_domain::JobSubmission;
use concord_llm::{OllamaEmbedder, OllamaProvider};
use concord_orchestrator::{JobWorker, Orchestrator};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Execute the run command.
///
/// Every readable, admissible file becomes one job. Returns whether all of
/// them finished `done`.
pub async fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<bool> {
    check_sources(&args.files)?;
    let ollama = resolve_ollama(&args, &config.ollama);
    let orchestrator = build_orchestrator(config, &ollama)?;

    let mut all_done = true;
    let mut jobs = Vec::new();
    for path in &args.files {
        let source = source_name(path);
        let admitted = read_submission(path)
            .map(|submission| apply_overrides(submission, &args))
            .and_then(|submission| Ok(orchestrator.admit(submission)?));
        match admitted {
            Ok(job) => {
                info!(job_id = %job.id(), source = %source, "Submission admitted");
                jobs.push(job);
            }
            Err(e) => {
                all_done = false;
                println!("{}", formatter.error(&format!("{}: {}", source, e)));
            }
        }
    }

    if jobs.is_empty() {
        return Ok(false);
    }

    let worker = JobWorker::new(Arc::new(orchestrator), config.pipeline.max_concurrent_jobs);
    let (tx, rx) = mpsc::channel(jobs.len());
    for job in jobs {
        // capacity covers every job, so the receiver is never full
        if tx.send(job).await.is_err() {
            break;
        }
    }
    drop(tx);

    for outcome in worker.run(rx).await {
        let outcome = outcome?;
        all_done &= outcome.is_done();
        println!("{}", formatter.format_outcome(&outcome)?);
    }

    Ok(all_done)
}

/// Command-line flags win over the `[ollama]` table.
pub fn resolve_ollama(args: &RunArgs, settings: &OllamaSettings) -> OllamaSettings {
    OllamaSettings {
        url: args.ollama_url.clone().or_else(|| settings.url.clone()),
        model: args.model.clone().unwrap_or_else(|| settings.model.clone()),
        embedding_model: args
            .embedding_model
            .clone()
            .or_else(|| settings.embedding_model.clone()),
        embedding_dimension: settings.embedding_dimension,
    }
}

/// Apply the run command's option overrides to a submission.
pub fn apply_overrides(mut submission: JobSubmission, args: &RunArgs) -> JobSubmission {
    if let Some(strategy) = args.strategy {
        submission = submission.with_strategy(strategy.into());
    }
    if let Some(backend) = args.backend {
        submission = submission.with_backend(backend.into());
    }
    if let Some(depth) = args.depth {
        submission = submission.with_depth(depth.into());
    }
    submission
}

/// Build the orchestrator; it stays offline unless an Ollama URL is set.
pub fn build_orchestrator(config: &Config, ollama: &OllamaSettings) -> Result<Orchestrator> {
    let mut orchestrator = Orchestrator::new(&config.pipeline)?;

    let Some(url) = &ollama.url else {
        info!("No Ollama endpoint configured, running offline");
        return Ok(orchestrator);
    };

    info!(endpoint = %url, model = %ollama.model, "Using Ollama");
    let provider = OllamaProvider::new(url.clone(), ollama.model.clone())?;
    orchestrator = orchestrator.with_model(Arc::new(provider));

    if let Some(embedding_model) = &ollama.embedding_model {
        let embedder = OllamaEmbedder::new(
            url.clone(),
            embedding_model.clone(),
            ollama.embedding_dimension,
        )?;
        orchestrator = orchestrator.with_embedder(Arc::new(embedder));
    }

    Ok(orchestrator)
}
