//! # Vinsmak Similarity
//!
//! Interchangeable similarity metrics for tasting notes, plus numeric
//! attribute closeness.
//!
//! ## Metrics
//!
//! - **Lexical**: overlap coefficient blended with Jaccard over content tokens
//! - **Lemma**: cosine over lemma vectors weighted by the active profile
//! - **Category**: Jaccard over the categories each note touches
//! - **Composite**: mean of the three above
//! - **Embedding**: cosine over vectors from an external [`EmbeddingProvider`]
//!
//! All metrics return an integer in `[0, 100]` and score empty input as 0.
//!
//! ## Example
//!
//! ```rust
//! use vinsmak_core::{Analyzer, EngineConfig};
//! use vinsmak_similarity::{lexical_similarity, numeric_closeness, Algorithm, SimilarityEngine};
//!
//! let analyzer = Analyzer::from_config(&EngineConfig::default());
//! let engine = SimilarityEngine::new(analyzer);
//!
//! let score = engine.score(Algorithm::Lemma, "solbær og kirsebær", "kirsebærene, solbær");
//! assert_eq!(score.value, 100);
//!
//! assert_eq!(lexical_similarity("", "eik"), 0);
//! assert_eq!(numeric_closeness("12,5 %", "12.5"), 100);
//! ```

pub mod distance;
pub mod embedding;
pub mod engine;
pub mod numeric;
pub mod score;
pub mod vector;

pub use distance::{
    category_similarity, composite_of, composite_similarity, lemma_cosine, lemma_similarity,
    lexical_similarity,
};
pub use embedding::{
    clean_for_embedding, embed_text, embedding_text_similarity, EmbeddingError, EmbeddingProvider,
    DEFAULT_EMBED_TIMEOUT,
};
pub use engine::{PreparedText, SimilarityEngine};
pub use numeric::{closeness, numeric_closeness, parse_numeric, six_to_ten, NumericLike};
pub use score::{to_score, Algorithm, SimilarityScore};
pub use vector::{cosine, embedding_similarity};
