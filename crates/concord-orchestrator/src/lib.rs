//! Concord Orchestrator
//!
//! Drives jobs through the pipeline and runs them in the background.
//!
//! # Overview
//!
//! The orchestrator is responsible for:
//! - **Job state machine**: `pending → running → done | failed`, logged and
//!   persisted at every transition
//! - **Fan-out/fan-in**: one scoring task per document; a failing document
//!   degrades to the default score without touching its siblings
//! - **Resolution and summarization**: claim embedding, clustering, strategy
//!   selection, summarization with bounded retries
//! - **Background work**: bounded cross-job concurrency, cancellation, metrics
//!
//! # Usage
//!
//! ## One job
//!
//! ```no_run
//! use concord_domain::{DocumentInput, JobSubmission};
//! use concord_orchestrator::{Orchestrator, PipelineConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::new(&PipelineConfig::default())?;
//! let submission = JobSubmission::new(vec![
//!     DocumentInput::new("The bridge reopened on Monday after eight months of repairs."),
//! ]);
//!
//! let outcome = orchestrator
//!     .run_submission(submission, CancellationToken::new())
//!     .await?;
//! if let Some(report) = outcome.report {
//!     println!("{}", report.full_summary);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use concord_orchestrator::PipelineConfig;
//!
//! // Default: τ = 0.75, three attempts per capability call
//! let config = PipelineConfig::default();
//!
//! // Aggressive: looser clustering, strict input, fast failure
//! let config = PipelineConfig::aggressive();
//!
//! // Lenient: tighter clustering, permissive input, patient retries
//! let config = PipelineConfig::lenient();
//! ```
//!
//! # Configuration
//!
//! ```toml
//! max_concurrent_jobs = 4
//!
//! [resolver]
//! similarity_threshold = 0.75
//! tie_epsilon = 0.02
//! high_trust_threshold = 0.7
//!
//! [retry]
//! max_attempts = 3
//! timeout_secs = 30
//!
//! [validation]
//! min_document_chars = 50
//! max_documents = 50
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod orchestrator;
mod store;
mod worker;

pub use config::{PipelineConfig, DEFAULT_MAX_CONCURRENT_JOBS};
pub use error::PipelineError;
pub use metrics::PipelineMetrics;
pub use orchestrator::{JobOutcome, Orchestrator, CANCELLED_MESSAGE, MAX_CONCURRENT_EMBEDDINGS};
pub use store::InMemoryReportStore;
pub use worker::{JobHandle, JobWorker};
