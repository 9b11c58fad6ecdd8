//! Error types for the scoring agents

use concord_domain::DocType;
use thiserror::Error;

/// Errors that can occur while scoring or preparing agents
#[derive(Error, Debug)]
pub enum AgentError {
    /// The agent could not score the document
    #[error("Scoring failed for {doc_type}: {message}")]
    Scoring {
        /// Agent variant that failed
        doc_type: DocType,
        /// What went wrong
        message: String,
    },

    /// A trust table file could not be read
    #[error("Failed to read trust table {path}: {source}")]
    TableIo {
        /// File path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A trust table file is not a JSON object of scores
    #[error("Invalid trust table {path}: {message}")]
    TableFormat {
        /// File path
        path: String,
        /// What is wrong with it
        message: String,
    },
}
