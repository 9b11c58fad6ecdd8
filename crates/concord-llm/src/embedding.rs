//! Embedding models for claim clustering
//!
//! The resolver compares claims by cosine similarity of their embeddings.
//! This module provides the offline default, a fixed-vector model for tests
//! and an Ollama-backed model.
//!
//! # Examples
//!
//! ```rust
//! use concord_llm::{cosine_similarity, HashingEmbedder};
//!
//! let model = HashingEmbedder::new(256);
//! let a = model.embed_text("Coffee causes insomnia");
//! let b = model.embed_text("Coffee does not cause insomnia");
//! assert!(cosine_similarity(&a, &b) > 0.75);
//! ```

use crate::ollama::{http_client, status_error, transport_error};
use crate::LlmError;
use async_trait::async_trait;
use concord_domain::{CapabilityError, EmbeddingModel};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

/// Default dimension of the hashing embedder
pub const DEFAULT_DIMENSION: usize = 384;

/// Function words that carry no topic; negations are kept on purpose
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "of", "to", "in", "on", "for", "and", "or", "is", "are", "was", "were",
    "be", "been", "by", "with", "as", "at", "that", "this", "it", "its", "from", "does", "do",
    "did", "has", "have", "had", "which", "than",
];

/// Offline embedding model based on feature hashing
///
/// Each text becomes a bag of normalized word stems. Every stem is hashed
/// into one of `dimension` buckets with a hashed sign, and the vector is
/// normalized to unit length. Texts sharing most of their words land close
/// together, which is what topic clustering needs; word order and synonyms
/// are ignored.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    /// Create a new hashing embedder
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(token: &str, seed: u64) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        seed.hash(&mut hasher);
        hasher.finish()
    }

    /// Embed text synchronously; never fails
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimension];

        for token in tokens(text) {
            let bucket = (Self::hash_token(&token, 0) % self.dimension as u64) as usize;
            let sign = if Self::hash_token(&token, 1) & 1 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        // Normalize to unit length for cosine similarity
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }
        embedding
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

#[async_trait]
impl EmbeddingModel for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, CapabilityError> {
        if text.trim().is_empty() {
            return Err(CapabilityError::Invalid(
                "Empty text cannot be embedded".to_string(),
            ));
        }
        Ok(self.embed_text(text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Lowercased, stopword-free, lightly stemmed word tokens
fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .map(|w| stem(&w))
        .collect()
}

fn stem(word: &str) -> String {
    if word.chars().count() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Embedding model returning fixed vectors per text
///
/// Texts without a registered vector fail with `Invalid`; texts marked as
/// failing return a transient error.
#[derive(Debug, Clone, Default)]
pub struct StaticEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    failing: HashSet<String>,
    dimension: usize,
}

impl StaticEmbedder {
    /// Create an empty embedder for vectors of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            failing: HashSet::new(),
            dimension,
        }
    }

    /// Register a vector for a text
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Make embedding of a text fail
    pub fn with_failure(mut self, text: impl Into<String>) -> Self {
        self.failing.insert(text.into());
        self
    }
}

#[async_trait]
impl EmbeddingModel for StaticEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, CapabilityError> {
        if self.failing.contains(text) {
            return Err(CapabilityError::Transient(format!(
                "embedding unavailable for '{}'",
                text
            )));
        }
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| CapabilityError::Invalid(format!("no vector registered for '{}'", text)))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[derive(Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

/// Embedding model backed by Ollama's embeddings endpoint
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    endpoint: String,
    model: String,
    dimension: usize,
    client: reqwest::Client,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder
    ///
    /// `dimension` must match the model's output; mismatching vectors are
    /// rejected as invalid.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimension,
            client: http_client()?,
        })
    }
}

#[async_trait]
impl EmbeddingModel for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, CapabilityError> {
        let url = format!("{}/api/embeddings", self.endpoint);
        let response = self
            .client
            .post(&url)
            .json(&OllamaEmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body, &self.model).into());
        }

        let parsed: OllamaEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse embedding: {}", e)))?;

        if parsed.embedding.len() != self.dimension {
            return Err(CapabilityError::Invalid(format!(
                "expected {} dimensions, got {}",
                self.dimension,
                parsed.embedding.len()
            )));
        }
        Ok(parsed.embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Calculate cosine similarity between two embedding vectors
///
/// Returns a value in [-1, 1]. Vectors of different lengths or with zero
/// magnitude have similarity 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    (dot_product / (magnitude_a * magnitude_b)).clamp(-1.0, 1.0)
}
