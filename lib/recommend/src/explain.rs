//! Explainability for recommendation results
//!
//! Every returned candidate carries its per-attribute breakdown; the summary
//! statistics describe the call as a whole.

use crate::aggregate::ScoredCandidate;
use crate::weights::{Attribute, RecommendationWeights};
use serde::Serialize;

/// Response of one recommendation call
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    /// Candidates sorted by descending score
    pub result: Vec<ScoredCandidate>,
    pub stats: RecommendationStats,
}

impl RecommendResponse {
    pub fn new(result: Vec<ScoredCandidate>, stats: RecommendationStats) -> Self {
        Self { result, stats }
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Summary statistics for a recommendation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationStats {
    /// Number of candidates scored
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    pub avg_score: f64,
    pub best_score: f64,
    /// Attribute with the largest weighted contribution to the best result
    pub top_contributing_attribute: Option<Attribute>,
}

impl RecommendationStats {
    pub fn empty(candidates_count: usize) -> Self {
        Self {
            candidates_count,
            results_count: 0,
            avg_score: 0.0,
            best_score: 0.0,
            top_contributing_attribute: None,
        }
    }

    /// Compute stats from results already sorted by descending score
    pub fn compute(
        results: &[ScoredCandidate],
        candidates_count: usize,
        weights: &RecommendationWeights,
    ) -> Self {
        let Some(best) = results.first() else {
            return Self::empty(candidates_count);
        };

        let avg_score =
            results.iter().map(|r| r.similarity_score).sum::<f64>() / results.len() as f64;

        // First attribute wins ties, in breakdown order
        let top_contributing_attribute = best
            .breakdown
            .iter()
            .map(|(attribute, score)| (*attribute, f64::from(*score) * weights.get(*attribute)))
            .fold(None::<(Attribute, f64)>, |top, (attribute, contribution)| match top {
                Some((_, best)) if best >= contribution => top,
                _ => Some((attribute, contribution)),
            })
            .map(|(attribute, _)| attribute);

        Self {
            candidates_count,
            results_count: results.len(),
            avg_score,
            best_score: best.similarity_score,
            top_contributing_attribute,
        }
    }
}
