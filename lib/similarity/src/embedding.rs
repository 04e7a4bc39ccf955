//! Embedding provider interface
//!
//! Vector generation happens outside the engine (a remote model, a local
//! service). The engine only consumes the vectors. It never retries; a
//! failed or slow provider yields `None` so the caller can fall back to a
//! cheaper text metric.

use crate::vector::embedding_similarity;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use vinsmak_core::text::tokenize;

/// Default upper bound for one provider call
pub const DEFAULT_EMBED_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    #[error("Embedding provider unavailable: {0}")]
    Unavailable(String),

    #[error("Embedding timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of fixed-length text embeddings
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed already cleaned text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Lowercased, punctuation- and stopword-free text handed to the provider
pub fn clean_for_embedding(text: &str) -> String {
    tokenize(text).join(" ")
}

/// Embed `text` under a timeout
pub async fn embed_with_timeout(
    provider: &dyn EmbeddingProvider,
    text: &str,
    timeout: Duration,
) -> Result<Vec<f32>, EmbeddingError> {
    match tokio::time::timeout(timeout, provider.embed(text)).await {
        Ok(result) => result,
        Err(_) => Err(EmbeddingError::Timeout(timeout)),
    }
}

/// Clean and embed one text
///
/// Text that cleans to nothing yields an empty vector without calling the
/// provider, so it scores 0 against anything.
pub async fn embed_text(
    provider: &dyn EmbeddingProvider,
    text: &str,
    timeout: Duration,
) -> Result<Vec<f32>, EmbeddingError> {
    let cleaned = clean_for_embedding(text);
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }
    embed_with_timeout(provider, &cleaned, timeout).await
}

/// Embedding cosine between two texts
///
/// Returns
/// - `Some(0)` when either text cleans to nothing, or a vector is empty, or
///   the vectors differ in length
/// - `Some(score)` on success
/// - `None` when the provider fails or times out
pub async fn embedding_text_similarity(
    provider: &dyn EmbeddingProvider,
    text1: &str,
    text2: &str,
    timeout: Duration,
) -> Option<u8> {
    let clean1 = clean_for_embedding(text1);
    let clean2 = clean_for_embedding(text2);
    if clean1.is_empty() || clean2.is_empty() {
        return Some(0);
    }

    let (a, b) = tokio::join!(
        embed_with_timeout(provider, &clean1, timeout),
        embed_with_timeout(provider, &clean2, timeout),
    );

    match (a, b) {
        (Ok(a), Ok(b)) => Some(embedding_similarity(&a, &b)),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Embedding unavailable, falling back to text metric");
            None
        }
    }
}
