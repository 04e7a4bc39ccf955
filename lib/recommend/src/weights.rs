//! Per-call tunables for the recommendation aggregator

use serde::{Deserialize, Serialize};

/// Score given to an attribute missing on either side
pub const NEUTRAL_SCORE: u8 = 50;

/// A scored signal of a candidate wine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Body,
    Freshness,
    Tannin,
    Sweetness,
    Price,
    Smell,
    Taste,
}

impl Attribute {
    /// True for attributes compared with numeric closeness
    pub fn is_numeric(self) -> bool {
        !matches!(self, Attribute::Smell | Attribute::Taste)
    }
}

/// Multiplier per scored attribute
///
/// No normalization is required; the aggregate is divided by the sum of the
/// weights actually applied to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationWeights {
    pub body: f64,
    pub freshness: f64,
    /// Red wines only
    pub tannin: f64,
    /// Everything but red wines
    pub sweetness: f64,
    pub price: f64,
    pub smell: f64,
    pub taste: f64,
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            body: 1.0,
            freshness: 1.0,
            tannin: 1.0,
            sweetness: 1.0,
            price: 0.0,
            smell: 1.5,
            taste: 1.5,
        }
    }
}

impl RecommendationWeights {
    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Body => self.body,
            Attribute::Freshness => self.freshness,
            Attribute::Tannin => self.tannin,
            Attribute::Sweetness => self.sweetness,
            Attribute::Price => self.price,
            Attribute::Smell => self.smell,
            Attribute::Taste => self.taste,
        }
    }

    /// Copy with negative and non-finite weights replaced by 0
    pub fn sanitized(&self) -> Self {
        let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        Self {
            body: clean(self.body),
            freshness: clean(self.freshness),
            tannin: clean(self.tannin),
            sweetness: clean(self.sweetness),
            price: clean(self.price),
            smell: clean(self.smell),
            taste: clean(self.taste),
        }
    }
}

/// Candidate selection limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    /// Minimum rating (1–10) for a tasting to count as liked
    pub min_rating: f64,
    /// Upper bound on the candidate pool fetched from the store
    pub candidate_limit: usize,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            min_rating: 7.0,
            candidate_limit: 200,
        }
    }
}
