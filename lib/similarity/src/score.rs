//! Score type shared by every metric
//!
//! All metrics report an integer in `[0, 100]`. Non-finite intermediate
//! values collapse to 0 so NaN never leaves a scorer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric that produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Overlap coefficient blended with Jaccard over content tokens
    Lexical,
    /// Cosine over profile-weighted lemma vectors
    #[default]
    Lemma,
    /// Jaccard over the sets of categories each text touches
    Category,
    /// Unweighted mean of lexical, lemma and category
    Composite,
    /// Cosine over vectors from an external embedding provider
    Embedding,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Lexical,
        Algorithm::Lemma,
        Algorithm::Category,
        Algorithm::Composite,
        Algorithm::Embedding,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Lexical => "lexical",
            Algorithm::Lemma => "lemma",
            Algorithm::Category => "category",
            Algorithm::Composite => "composite",
            Algorithm::Embedding => "embedding",
        }
    }

    /// Parse a metric name, case-insensitive
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|a| a.as_str().eq_ignore_ascii_case(name))
    }

    /// True when the metric depends on the active weight profile
    pub fn is_profile_sensitive(self) -> bool {
        matches!(self, Algorithm::Lemma | Algorithm::Composite)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A score in `[0, 100]` tagged with the metric that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub value: u8,
    pub algorithm: Algorithm,
}

impl SimilarityScore {
    pub fn new(value: u8, algorithm: Algorithm) -> Self {
        Self {
            value: value.min(100),
            algorithm,
        }
    }
}

/// Round a `0..=100` quantity into a score; NaN and infinities become 0
#[inline]
pub fn to_score(x: f64) -> u8 {
    if !x.is_finite() {
        return 0;
    }
    x.round().clamp(0.0, 100.0) as u8
}

/// Scale a `0..=1` ratio to a score
#[inline]
pub fn ratio_to_score(ratio: f64) -> u8 {
    to_score(ratio * 100.0)
}
