//! # Vinsmak
//!
//! Similarity and recommendation engine for wine tasting notes.
//!
//! Vinsmak turns free-text notes into weighted, categorized terms, compares
//! them with several interchangeable metrics, and ranks untasted wines by
//! combining text similarity with numeric attribute closeness.
//!
//! ## Quick Start
//!
//! ### From the Command Line
//!
//! ```bash
//! vinsmak analyze "Solbær, kirsebær og litt eik"
//! vinsmak compare "mørke bær" "solbær og bjørnebær" --algorithm composite
//! vinsmak recommend --data tastings.json --user anna --limit 5
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use vinsmak::prelude::*;
//!
//! let analyzer = Analyzer::from_config(&EngineConfig::new(Some("moderate".into())));
//! let engine = SimilarityEngine::new(analyzer);
//!
//! let score = engine.score(Algorithm::Composite, "solbær og eik", "solbær, eikefat");
//! assert_eq!(score.algorithm, Algorithm::Composite);
//! assert!(score.value <= 100);
//! ```
//!
//! ## Crate Structure
//!
//! - [`vinsmak-core`](https://docs.rs/vinsmak-core) - term dictionary, weight profiles, lemmatizer
//! - [`vinsmak-similarity`](https://docs.rs/vinsmak-similarity) - text metrics and numeric closeness
//! - [`vinsmak-recommend`](https://docs.rs/vinsmak-recommend) - persistence interface and ranking

// Re-export core types
pub use vinsmak_core::{
    AnalyzedTerm, Analyzer, CategoryPath, ConsistencyIssue, EngineConfig, Error, MainCategory,
    Result, TermDictionary, TermEntry, TextAnalysis, WeightProfile,
};

// Re-export similarity
pub use vinsmak_similarity::{
    numeric_closeness, Algorithm, EmbeddingError, EmbeddingProvider, SimilarityEngine,
    SimilarityScore,
};

// Re-export recommendation
pub use vinsmak_recommend::{
    Dataset, MemoryStore, RecommendError, RecommendResponse, RecommendationStats,
    RecommendationThresholds, RecommendationWeights, Recommender, ScoredCandidate, Tasting,
    TastingStore, Wine, WineCategory,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Algorithm, Analyzer, EngineConfig, MemoryStore, RecommendationThresholds,
        RecommendationWeights, Recommender, SimilarityEngine, TastingStore, TermDictionary,
        WeightProfile, WineCategory,
    };
}

/// Text metrics, for callers that score without an engine
pub mod metrics {
    pub use vinsmak_similarity::{
        category_similarity, composite_similarity, lemma_similarity, lexical_similarity,
    };
}
