//! # Vinsmak Recommend
//!
//! Ranks untasted wines for a user.
//!
//! The [`Recommender`] reads tastings and wines through a [`TastingStore`],
//! averages the attributes of the wines the user liked, and scores each
//! candidate with numeric closeness plus a text similarity metric.

pub mod aggregate;
pub mod error;
pub mod explain;
pub mod model;
pub mod store;
pub mod weights;

pub use aggregate::{attribute_score, score_candidate, Recommender, ScoredCandidate, UserProfile};
pub use error::{RecommendError, Result};
pub use explain::{RecommendResponse, RecommendationStats};
pub use model::{NumericValue, RatingScale, Tasting, Wine, WineCategory, WineId};
pub use store::{Dataset, MemoryStore, StoreError, TastingStore};
pub use weights::{Attribute, RecommendationThresholds, RecommendationWeights, NEUTRAL_SCORE};
