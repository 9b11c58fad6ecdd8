//! Concord Classifier
//!
//! Assigns a document type to every document of a job.
//!
//! # Overview
//!
//! Classification is total: it always returns a valid `DocType`, degrading to
//! `unknown` when nothing else decides.
//!
//! ```text
//! title + text → keyword/pattern scoring ─ score ≥ 0.15 → type
//!                         │
//!                         └─ low confidence → language model (optional)
//!                                                 │
//!                                                 └─ failure/absent → hints → unknown
//! ```
//!
//! # Example Usage
//!
//! ```
//! use concord_classifier::KeywordClassifier;
//! use concord_domain::{DocType, Document, DocumentId};
//!
//! let classifier = KeywordClassifier::offline();
//! let doc = Document::new(
//!     DocumentId::new(),
//!     "WHEREAS the parties agree, pursuant to Section 4, hereinafter the Agreement...",
//! );
//! assert_eq!(classifier.classify_offline(&doc), DocType::LegalDocument);
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
pub mod signals;

pub use classifier::{ClassificationMethod, KeywordClassifier};
pub use config::ClassifierConfig;
pub use error::ClassifierError;
