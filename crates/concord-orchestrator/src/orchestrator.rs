//! Job state machine
//!
//! [`Orchestrator::run`] drives one job from `pending` to a terminal state:
//!
//! 1. classify documents without a declared type, one after another
//! 2. fan out one scoring task per document and wait for all of them
//! 3. embed every claim, cluster and resolve conflicts
//! 4. summarize the resolved claims, retrying transient failures
//! 5. assemble and persist the report
//!
//! Per-document faults are absorbed and recorded on the outcome. A job fails
//! only when no document is usable, when summarization gives up, or when the
//! report cannot be saved. Cancellation is honoured until the fan-in
//! completes; after that the job runs to the end.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::metrics::PipelineMetrics;
use crate::store::InMemoryReportStore;
use concord_agents::{
    AgentConfig, AgentRegistry, AgentRunner, DefaultAgent, LlmClaimExtractor, ScoredDocument,
    SentenceExtractor, SignalContext, TrustTables,
};
use concord_classifier::{ClassifierConfig, KeywordClassifier};
use concord_domain::{
    Claim, ClaimExtractor, ClaimId, ConflictStrategy, CredibilityScore, DocType, Document,
    DocumentClassifier, DocumentId, DocumentSummary, EmbeddingModel, FaultKind, Job, JobStatus,
    JobSubmission, LanguageModel, PipelineFault, ReportParts, ReportStore, Summarizer,
    SummarizerBackend, SummaryInput, SummaryReport,
};
use concord_gatekeeper::Gatekeeper;
use concord_llm::{HashingEmbedder, RetryPolicy};
use concord_resolver::{select_strategy, ConflictResolver};
use concord_summarizer::{summarizer_for, SummarizerConfig};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::{AbortHandle, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Error recorded on jobs that were cancelled
pub const CANCELLED_MESSAGE: &str = "Job cancelled";

/// Embedding calls in flight at once for one job
pub const MAX_CONCURRENT_EMBEDDINGS: usize = 8;

/// Terminal state of one job with everything it produced
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// The job, `done` or `failed`
    pub job: Job,
    /// The report of a `done` job
    pub report: Option<SummaryReport>,
    /// Faults absorbed or raised along the way
    pub faults: Vec<PipelineFault>,
    /// Strategy applied by the resolver, once resolution ran
    pub strategy: Option<ConflictStrategy>,
}

impl JobOutcome {
    /// Whether the job reached `done`
    pub fn is_done(&self) -> bool {
        self.job.status() == JobStatus::Done
    }

    /// Whether the job failed because it was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.job.error() == Some(CANCELLED_MESSAGE)
    }

    /// Faults of one kind
    pub fn faults_of(&self, kind: FaultKind) -> impl Iterator<Item = &PipelineFault> {
        self.faults.iter().filter(move |f| f.kind == kind)
    }
}

/// Runs jobs through classification, scoring, resolution and summarization
///
/// Built offline by default: keyword classification, sentence extraction,
/// hashing embeddings and the extractive summarizer. [`with_model`] switches
/// every language-model stage over to one provider.
///
/// [`with_model`]: Orchestrator::with_model
pub struct Orchestrator {
    gatekeeper: Gatekeeper,
    classifier_config: ClassifierConfig,
    classifier: Arc<dyn DocumentClassifier>,
    registry: Arc<AgentRegistry>,
    extractor: Arc<dyn ClaimExtractor>,
    context: SignalContext,
    agent_config: AgentConfig,
    embedder: Arc<dyn EmbeddingModel>,
    resolver: ConflictResolver,
    model: Option<Arc<dyn LanguageModel>>,
    summarizer: Option<Arc<dyn Summarizer>>,
    summarizer_config: SummarizerConfig,
    store: Arc<dyn ReportStore>,
    retry: RetryPolicy,
    metrics: Mutex<PipelineMetrics>,
}

impl Orchestrator {
    /// Create an offline orchestrator from a validated configuration
    ///
    /// Loads the trust tables named in `[agents]` once; they are shared
    /// read-only by every job.
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;

        let gatekeeper = Gatekeeper::new(config.validation.clone())
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        let resolver = ConflictResolver::new(config.resolver.clone())
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        let tables = TrustTables::load(&config.agents)?;

        Ok(Self {
            gatekeeper,
            classifier_config: config.classifier.clone(),
            classifier: Arc::new(KeywordClassifier::new(config.classifier.clone())),
            registry: Arc::new(AgentRegistry::standard()),
            extractor: Arc::new(SentenceExtractor),
            context: SignalContext::new(Arc::new(tables)),
            agent_config: config.agents.clone(),
            embedder: Arc::new(HashingEmbedder::default()),
            resolver,
            model: None,
            summarizer: None,
            summarizer_config: config.summarizer.clone(),
            store: Arc::new(InMemoryReportStore::new()),
            retry: config.retry.clone(),
            metrics: Mutex::new(PipelineMetrics::new()),
        })
    }

    /// Use a language model for classification fallback, claim extraction
    /// and `rag` summaries
    pub fn with_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.classifier = Arc::new(
            KeywordClassifier::new(self.classifier_config.clone())
                .with_model(Arc::clone(&model), self.retry.clone()),
        );
        self.extractor = Arc::new(
            LlmClaimExtractor::new(Arc::clone(&model))
                .with_max_chunk_chars(self.agent_config.max_chunk_chars),
        );
        self.model = Some(model);
        self
    }

    /// Replace the document classifier
    pub fn with_classifier(mut self, classifier: Arc<dyn DocumentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the scoring agent registry
    pub fn with_registry(mut self, registry: AgentRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Replace the claim extractor
    pub fn with_extractor(mut self, extractor: Arc<dyn ClaimExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the embedding model
    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingModel>) -> Self {
        self.embedder = embedder;
        self
    }

    /// Use one summarizer for every backend
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Replace the report store
    pub fn with_store(mut self, store: Arc<dyn ReportStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the retry policy for extraction, embedding, summarization
    /// and persistence calls
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Snapshot of the metrics collected so far
    pub fn metrics(&self) -> PipelineMetrics {
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validate a submission and create its pending job
    pub fn admit(&self, submission: JobSubmission) -> Result<Job, PipelineError> {
        Ok(self.gatekeeper.admit(submission)?)
    }

    /// Admit a submission and run it to completion
    pub async fn run_submission(
        &self,
        submission: JobSubmission,
        cancel: CancellationToken,
    ) -> Result<JobOutcome, PipelineError> {
        let job = self.admit(submission)?;
        self.run(job, cancel).await
    }

    /// Run a pending job to `done` or `failed`
    ///
    /// Returns an error only when the job was not pending; every failure
    /// inside the pipeline ends in a failed job on the outcome.
    pub async fn run(
        &self,
        mut job: Job,
        cancel: CancellationToken,
    ) -> Result<JobOutcome, PipelineError> {
        let mut faults = Vec::new();
        if cancel.is_cancelled() {
            return self
                .finish_failed(job, faults, None, CANCELLED_MESSAGE)
                .await;
        }

        job.start()?;
        info!(
            job_id = %job.id(),
            documents = job.documents.len(),
            backend = %job.options.summarizer_backend,
            "Job started"
        );
        self.persist_job(&job).await;

        if !self
            .classify(&mut job.documents, &mut faults, &cancel)
            .await
        {
            return self
                .finish_failed(job, faults, None, CANCELLED_MESSAGE)
                .await;
        }
        if job.documents.iter().all(|d| d.text.trim().is_empty()) {
            return self
                .finish_failed(
                    job,
                    faults,
                    None,
                    "No usable documents after classification",
                )
                .await;
        }

        let Some(scored) = self.score_documents(&job.documents, &cancel).await else {
            return self
                .finish_failed(job, faults, None, CANCELLED_MESSAGE)
                .await;
        };

        let mut scores: HashMap<DocumentId, CredibilityScore> = HashMap::new();
        let mut claims = Vec::new();
        for result in scored {
            faults.extend(result.faults);
            scores.insert(result.document.id, result.score);
            claims.extend(result.claims);
        }

        let embeddings = self.embed_claims(&claims, &mut faults).await;

        let doc_types: Vec<DocType> = job.documents.iter().map(Document::effective_type).collect();
        let strategy = select_strategy(job.options.conflict_strategy.explicit(), &doc_types);
        let resolution = match self.resolver.resolve(claims, &embeddings, strategy) {
            Ok(resolution) => resolution,
            Err(e) => {
                let message = format!("Conflict resolution failed: {}", e);
                return self
                    .finish_failed(job, faults, Some(strategy), message)
                    .await;
            }
        };

        let input = SummaryInput {
            documents: document_summaries(&job.documents, &scores),
            resolved_claims: resolution.resolved_claims.clone(),
            conflicts: resolution.conflicts.clone(),
            depth: job.options.summary_depth,
            passages: job.documents.iter().map(|d| d.text.clone()).collect(),
        };
        let summarizer = self.summarizer_for(job.options.summarizer_backend);
        let output = match self
            .retry
            .run("summarize", || summarizer.summarize(&input))
            .await
        {
            Ok(output) => output,
            Err(e) => {
                faults.push(PipelineFault::for_job(FaultKind::Generation, e.to_string()));
                let message = format!("Summarization failed: {}", e.capability_error());
                return self
                    .finish_failed(job, faults, Some(strategy), message)
                    .await;
            }
        };

        let report = SummaryReport::assemble(
            job.id(),
            &job.documents,
            ReportParts {
                scores,
                resolved_claims: resolution.resolved_claims,
                conflicts: resolution.conflicts,
                sections: output.sections,
                full_summary: output.full_summary,
                summary_depth: job.options.summary_depth,
            },
        );

        if let Err(e) = self
            .retry
            .run("save_report", || self.store.save_report(&report))
            .await
        {
            let message = format!("Report could not be saved: {}", e.capability_error());
            return self
                .finish_failed(job, faults, Some(strategy), message)
                .await;
        }

        job.complete()?;
        info!(
            job_id = %job.id(),
            %strategy,
            claims = report.resolved_claims.len(),
            conflicts = report.conflicts.len(),
            unresolved = report.unresolved_count(),
            faults = faults.len(),
            "Job done"
        );
        self.persist_job(&job).await;

        let outcome = JobOutcome {
            job,
            report: Some(report),
            faults,
            strategy: Some(strategy),
        };
        self.record(&outcome);
        Ok(outcome)
    }

    /// Classify undeclared documents; false when cancelled part-way
    async fn classify(
        &self,
        documents: &mut [Document],
        faults: &mut Vec<PipelineFault>,
        cancel: &CancellationToken,
    ) -> bool {
        for document in documents.iter_mut() {
            if cancel.is_cancelled() {
                return false;
            }
            if let Some(declared) = document.doc_type() {
                debug!(doc_id = %document.id, doc_type = %declared, "Declared type, skipping classifier");
                continue;
            }

            let classification = self.classifier.classify_reporting(document).await;
            if let Some(message) = classification.fault {
                warn!(doc_id = %document.id, error = %message, "Classification degraded to unknown");
                faults.push(PipelineFault::for_document(
                    FaultKind::Classification,
                    document.id,
                    message,
                ));
            }
            debug!(doc_id = %document.id, doc_type = %classification.doc_type, "Document classified");
            document.assign_type(classification.doc_type);
        }
        true
    }

    /// Fan out one scoring task per document and wait for every one
    ///
    /// Returns `None` when cancelled before the join; outstanding tasks are
    /// aborted. A task that panics stands in as a scoring fault with the
    /// default score and no claims.
    async fn score_documents(
        &self,
        documents: &[Document],
        cancel: &CancellationToken,
    ) -> Option<Vec<ScoredDocument>> {
        let runner = AgentRunner::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.extractor),
            self.context.clone(),
        )
        .with_config(&self.agent_config)
        .with_retry(self.retry.clone());

        let handles: Vec<JoinHandle<ScoredDocument>> = documents
            .iter()
            .cloned()
            .map(|document| {
                let runner = runner.clone();
                tokio::spawn(async move { runner.process(document).await })
            })
            .collect();
        let aborts: Vec<AbortHandle> = handles.iter().map(JoinHandle::abort_handle).collect();

        let joined = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                aborts.iter().for_each(AbortHandle::abort);
                info!(tasks = aborts.len(), "Cancelled during scoring");
                return None;
            }
            joined = join_all(handles) => joined,
        };

        let scored = joined
            .into_iter()
            .zip(documents)
            .map(|(result, document)| match result {
                Ok(scored) => scored,
                Err(e) => {
                    warn!(doc_id = %document.id, error = %e, "Scoring task failed, using default score");
                    ScoredDocument {
                        document: document.clone(),
                        score: DefaultAgent::conservative_score(),
                        claims: Vec::new(),
                        faults: vec![PipelineFault::for_document(
                            FaultKind::Scoring,
                            document.id,
                            format!("scoring task failed: {}", e),
                        )],
                    }
                }
            })
            .collect();
        Some(scored)
    }

    /// Embed every claim; failures leave the claim out of the map
    async fn embed_claims(
        &self,
        claims: &[Claim],
        faults: &mut Vec<PipelineFault>,
    ) -> HashMap<ClaimId, Vec<f32>> {
        let pending: Vec<_> = claims
            .iter()
            .map(|claim| async move {
                let result = self
                    .retry
                    .run("embed", || self.embedder.embed(&claim.text))
                    .await;
                (claim, result)
            })
            .collect();
        let results: Vec<_> = stream::iter(pending)
            .buffered(MAX_CONCURRENT_EMBEDDINGS)
            .collect()
            .await;

        let mut embeddings = HashMap::with_capacity(claims.len());
        for (claim, result) in results {
            match result {
                Ok(vector) => {
                    embeddings.insert(claim.id, vector);
                }
                Err(e) => {
                    warn!(claim_id = %claim.id, doc_id = %claim.source_doc_id, error = %e, "Embedding failed, claim stays a singleton");
                    faults.push(PipelineFault::for_document(
                        FaultKind::Embedding,
                        claim.source_doc_id,
                        e.to_string(),
                    ));
                }
            }
        }
        debug!(
            claims = claims.len(),
            embedded = embeddings.len(),
            "Claims embedded"
        );
        embeddings
    }

    fn summarizer_for(&self, backend: SummarizerBackend) -> Arc<dyn Summarizer> {
        match &self.summarizer {
            Some(summarizer) => Arc::clone(summarizer),
            None => summarizer_for(backend, self.model.clone(), &self.summarizer_config),
        }
    }

    async fn finish_failed(
        &self,
        mut job: Job,
        faults: Vec<PipelineFault>,
        strategy: Option<ConflictStrategy>,
        message: impl Into<String>,
    ) -> Result<JobOutcome, PipelineError> {
        let message = message.into();
        job.fail(message.clone())?;
        if message == CANCELLED_MESSAGE {
            info!(job_id = %job.id(), "Job cancelled");
        } else {
            error!(job_id = %job.id(), error = %message, faults = faults.len(), "Job failed");
        }
        self.persist_job(&job).await;

        let outcome = JobOutcome {
            job,
            report: None,
            faults,
            strategy,
        };
        self.record(&outcome);
        Ok(outcome)
    }

    /// Job state is recorded best-effort; only the report is required
    async fn persist_job(&self, job: &Job) {
        if let Err(e) = self.store.save_job(job).await {
            warn!(job_id = %job.id(), status = %job.status(), error = %e, "Failed to save job state");
        }
    }

    fn record(&self, outcome: &JobOutcome) {
        let mut metrics = self.metrics.lock().unwrap_or_else(PoisonError::into_inner);
        for fault in &outcome.faults {
            metrics.record_fault(fault.kind);
        }
        match &outcome.report {
            Some(report) => metrics.record_completed(
                report.documents.len(),
                report.conflicts.len(),
                report.unresolved_count(),
            ),
            None => metrics.record_failed(outcome.is_cancelled()),
        }
    }
}

fn document_summaries(
    documents: &[Document],
    scores: &HashMap<DocumentId, CredibilityScore>,
) -> Vec<DocumentSummary> {
    documents
        .iter()
        .filter_map(|doc| {
            scores.get(&doc.id).map(|score| DocumentSummary {
                doc_id: doc.id,
                doc_type: doc.effective_type(),
                title: doc.title.clone(),
                source_url: doc.source_url.clone(),
                credibility_score: score.clone(),
            })
        })
        .collect()
}
