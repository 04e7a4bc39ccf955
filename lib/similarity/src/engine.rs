//! Similarity engine
//!
//! Dispatches a pair of texts to one of the interchangeable metrics. The
//! embedding metric needs an [`EmbeddingProvider`]; without one, or when the
//! provider fails, the engine scores with its fallback text metric instead
//! and reports that metric in the returned [`SimilarityScore`].
//!
//! A text compared against many others is prepared once with
//! [`SimilarityEngine::prepare`] or [`SimilarityEngine::prepare_embedded`],
//! so its analysis and vector are computed a single time.

use crate::distance::{category_similarity, composite_of, lemma_cosine, lexical_similarity};
use crate::embedding::{
    embed_text, embedding_text_similarity, EmbeddingProvider, DEFAULT_EMBED_TIMEOUT,
};
use crate::score::{Algorithm, SimilarityScore};
use crate::vector::embedding_similarity;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use vinsmak_core::{Analyzer, TextAnalysis};

/// A text analyzed once for scoring against many others
#[derive(Debug, Clone)]
pub struct PreparedText {
    text: String,
    analysis: TextAnalysis,
    /// Empty when the text cleans to nothing, `None` when not embedded
    embedding: Option<Vec<f32>>,
}

impl PreparedText {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn analysis(&self) -> &TextAnalysis {
        &self.analysis
    }

    pub fn is_embedded(&self) -> bool {
        self.embedding.is_some()
    }
}

#[derive(Clone)]
pub struct SimilarityEngine<'a> {
    analyzer: Analyzer<'a>,
    fallback: Algorithm,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    embed_timeout: Duration,
}

impl fmt::Debug for SimilarityEngine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("profile", &self.analyzer.profile().name)
            .field("fallback", &self.fallback)
            .field("embedder", &self.embedder.is_some())
            .field("embed_timeout", &self.embed_timeout)
            .finish()
    }
}

impl<'a> SimilarityEngine<'a> {
    pub fn new(analyzer: Analyzer<'a>) -> Self {
        Self {
            analyzer,
            fallback: Algorithm::Lemma,
            embedder: None,
            embed_timeout: DEFAULT_EMBED_TIMEOUT,
        }
    }

    /// Metric used in place of `Embedding` when no vectors are available.
    /// `Embedding` itself is not accepted and leaves the current fallback.
    pub fn with_fallback(mut self, fallback: Algorithm) -> Self {
        if fallback != Algorithm::Embedding {
            self.fallback = fallback;
        }
        self
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>, timeout: Duration) -> Self {
        self.embedder = Some(embedder);
        self.embed_timeout = timeout;
        self
    }

    pub fn analyzer(&self) -> &Analyzer<'a> {
        &self.analyzer
    }

    pub fn fallback(&self) -> Algorithm {
        self.fallback
    }

    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    fn sync_algorithm(&self, algorithm: Algorithm) -> Algorithm {
        match algorithm {
            Algorithm::Embedding => {
                debug!(fallback = %self.fallback, "Synchronous scoring cannot embed");
                self.fallback
            }
            other => other,
        }
    }

    /// Score with a text metric. `Embedding` runs the fallback metric.
    pub fn score(&self, algorithm: Algorithm, text1: &str, text2: &str) -> SimilarityScore {
        match self.sync_algorithm(algorithm) {
            Algorithm::Lexical => {
                SimilarityScore::new(lexical_similarity(text1, text2), Algorithm::Lexical)
            }
            other => self.score_prepared(other, &self.prepare(text1), text2),
        }
    }

    /// Score with any metric, calling the embedder for `Embedding`
    pub async fn score_async(
        &self,
        algorithm: Algorithm,
        text1: &str,
        text2: &str,
    ) -> SimilarityScore {
        if algorithm == Algorithm::Embedding {
            if let Some(embedder) = &self.embedder {
                let scored =
                    embedding_text_similarity(embedder.as_ref(), text1, text2, self.embed_timeout)
                        .await;
                if let Some(value) = scored {
                    return SimilarityScore::new(value, Algorithm::Embedding);
                }
            }
        }
        self.score(algorithm, text1, text2)
    }

    pub fn prepare(&self, text: &str) -> PreparedText {
        PreparedText {
            text: text.to_string(),
            analysis: self.analyzer.analyze(text),
            embedding: None,
        }
    }

    /// [`prepare`](Self::prepare) plus one provider call. A failed call
    /// leaves the text unembedded and later scores use the fallback metric.
    pub async fn prepare_embedded(&self, text: &str) -> PreparedText {
        let mut prepared = self.prepare(text);
        if let Some(embedder) = &self.embedder {
            match embed_text(embedder.as_ref(), text, self.embed_timeout).await {
                Ok(vector) => prepared.embedding = Some(vector),
                Err(e) => warn!(error = %e, "Embedding unavailable, falling back to text metric"),
            }
        }
        prepared
    }

    /// Score `text` against a prepared text. `Embedding` runs the fallback metric.
    pub fn score_prepared(
        &self,
        algorithm: Algorithm,
        query: &PreparedText,
        text: &str,
    ) -> SimilarityScore {
        let algorithm = self.sync_algorithm(algorithm);
        let value = match algorithm {
            Algorithm::Lexical => lexical_similarity(&query.text, text),
            Algorithm::Lemma => lemma_cosine(&query.analysis, &self.analyzer.analyze(text)),
            Algorithm::Category => {
                category_similarity(&query.analysis, &self.analyzer.analyze(text))
            }
            Algorithm::Composite => {
                composite_of(&query.text, &query.analysis, text, &self.analyzer.analyze(text))
            }
            Algorithm::Embedding => 0,
        };
        SimilarityScore::new(value, algorithm)
    }

    /// Async [`score_prepared`](Self::score_prepared). Only `text` is sent
    /// to the provider; the query vector comes from
    /// [`prepare_embedded`](Self::prepare_embedded).
    pub async fn score_prepared_async(
        &self,
        algorithm: Algorithm,
        query: &PreparedText,
        text: &str,
    ) -> SimilarityScore {
        if algorithm == Algorithm::Embedding {
            if let (Some(embedder), Some(query_vector)) = (&self.embedder, &query.embedding) {
                if query_vector.is_empty() {
                    return SimilarityScore::new(0, Algorithm::Embedding);
                }
                match embed_text(embedder.as_ref(), text, self.embed_timeout).await {
                    Ok(vector) => {
                        let value = embedding_similarity(query_vector, &vector);
                        return SimilarityScore::new(value, Algorithm::Embedding);
                    }
                    Err(e) => {
                        warn!(error = %e, "Embedding unavailable, falling back to text metric")
                    }
                }
            }
        }
        self.score_prepared(algorithm, query, text)
    }

    /// Every synchronous metric for one pair, in [`Algorithm::ALL`] order
    pub fn score_all(&self, text1: &str, text2: &str) -> Vec<SimilarityScore> {
        Algorithm::ALL
            .into_iter()
            .filter(|a| *a != Algorithm::Embedding)
            .map(|a| self.score(a, text1, text2))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::tests::provider;
    use vinsmak_core::EngineConfig;

    fn engine(profile: &str) -> SimilarityEngine<'static> {
        SimilarityEngine::new(Analyzer::from_config(&EngineConfig::new(Some(
            profile.to_string(),
        ))))
    }

    #[test]
    fn test_dispatch_tags_algorithm() {
        let e = engine("inverted");
        for algorithm in [
            Algorithm::Lexical,
            Algorithm::Lemma,
            Algorithm::Category,
            Algorithm::Composite,
        ] {
            let score = e.score(algorithm, "solbær eik", "solbær vanilje");
            assert_eq!(score.algorithm, algorithm);
            assert!(score.value <= 100);
        }
    }

    #[test]
    fn test_sync_embedding_uses_fallback() {
        let e = engine("inverted").with_fallback(Algorithm::Lexical);
        let score = e.score(Algorithm::Embedding, "solbær kirsebær", "solbær kirsebær");
        assert_eq!(score.algorithm, Algorithm::Lexical);
        assert_eq!(score.value, 100);
    }

    #[test]
    fn test_fallback_rejects_embedding() {
        let e = engine("inverted").with_fallback(Algorithm::Embedding);
        assert_eq!(e.fallback(), Algorithm::Lemma);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let e = engine("moderate");
        for score in e.score_all("", "solbær") {
            assert_eq!(score.value, 0, "{}", score.algorithm);
        }
    }

    #[test]
    fn test_score_all_skips_embedding() {
        let scores = engine("inverted").score_all("eik", "eik");
        assert_eq!(scores.len(), 4);
        assert!(scores.iter().all(|s| s.algorithm != Algorithm::Embedding));
    }

    #[tokio::test]
    async fn test_async_embedding() {
        let e = engine("inverted").with_embedder(Arc::new(provider()), DEFAULT_EMBED_TIMEOUT);
        let score = e
            .score_async(Algorithm::Embedding, "solbær og kirsebær", "mørke bær")
            .await;
        assert_eq!(score, SimilarityScore::new(71, Algorithm::Embedding));
    }

    #[tokio::test]
    async fn test_async_provider_failure_falls_back() {
        let e = engine("inverted").with_embedder(Arc::new(provider()), DEFAULT_EMBED_TIMEOUT);
        let score = e
            .score_async(Algorithm::Embedding, "eik vanilje", "eik vanilje")
            .await;
        assert_eq!(score.algorithm, Algorithm::Lemma);
        assert_eq!(score.value, 100);
    }

    #[tokio::test]
    async fn test_async_empty_vector_scores_zero() {
        let e = engine("inverted").with_embedder(Arc::new(provider()), DEFAULT_EMBED_TIMEOUT);
        let score = e.score_async(Algorithm::Embedding, "tom", "mørke bær").await;
        assert_eq!(score, SimilarityScore::new(0, Algorithm::Embedding));
    }

    #[test]
    fn test_prepared_matches_direct() {
        let e = engine("moderate");
        let query = e.prepare("Solbær og kirsebær, litt eik");
        for text in ["kirsebær, vanilje", "frisk syre", "", "eik"] {
            for algorithm in Algorithm::ALL {
                assert_eq!(
                    e.score_prepared(algorithm, &query, text),
                    e.score(algorithm, query.text(), text),
                    "{} {:?}",
                    algorithm,
                    text
                );
            }
        }
    }

    #[tokio::test]
    async fn test_prepared_query_embedded_once() {
        let p = Arc::new(provider());
        let e = engine("inverted").with_embedder(p.clone(), DEFAULT_EMBED_TIMEOUT);

        let query = e.prepare_embedded("solbær og kirsebær").await;
        assert!(query.is_embedded());
        for _ in 0..3 {
            let score = e
                .score_prepared_async(Algorithm::Embedding, &query, "mørke bær")
                .await;
            assert_eq!(score, SimilarityScore::new(71, Algorithm::Embedding));
        }
        assert_eq!(p.calls(), 4);
    }

    #[tokio::test]
    async fn test_prepared_unembedded_query_falls_back() {
        let p = Arc::new(provider());
        let e = engine("inverted").with_embedder(p.clone(), DEFAULT_EMBED_TIMEOUT);

        let query = e.prepare_embedded("eik vanilje").await;
        assert!(!query.is_embedded());
        let score = e
            .score_prepared_async(Algorithm::Embedding, &query, "eik vanilje")
            .await;
        assert_eq!(score, SimilarityScore::new(100, Algorithm::Lemma));
        // no retry for the failed query, no call for the candidate
        assert_eq!(p.calls(), 1);
    }

    #[tokio::test]
    async fn test_async_without_embedder() {
        let e = engine("inverted");
        let score = e.score_async(Algorithm::Embedding, "eik", "eik").await;
        assert_eq!(score.algorithm, Algorithm::Lemma);
    }
}
