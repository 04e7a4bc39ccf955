//! Tasting-note lemmatizer
//!
//! Turns free text into an ordered list of weighted, categorized terms:
//!
//! 1. lowercase, strip punctuation, split on whitespace
//! 2. drop stopwords
//! 3. resolve each token through the [`TermDictionary`]; recognized terms get
//!    the active profile's weight for their main category, unknown tokens get 1.0
//! 4. accumulate per-category counts and the weight sum
//!
//! No minimum token length is applied, so short terms such as "eik" survive.

use crate::config::EngineConfig;
use crate::dictionary::TermDictionary;
use crate::profile::WeightProfile;
use crate::text::tokenize;
use ahash::AHashMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Category label given to tokens missing from the dictionary
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Weight given to tokens missing from the dictionary
pub const UNKNOWN_WEIGHT: f32 = 1.0;

/// One resolved token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedTerm {
    pub original: String,
    pub lemma: String,
    pub weight: f32,
    /// Fine-grained category such as "berry" or "acidity"
    pub category: String,
}

impl AnalyzedTerm {
    #[inline]
    pub fn is_known(&self) -> bool {
        self.category != UNKNOWN_CATEGORY
    }
}

/// Result of analyzing one text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextAnalysis {
    /// Terms in token order; duplicates are kept
    pub terms: Vec<AnalyzedTerm>,
    /// Category label → occurrence count
    pub categories: BTreeMap<String, usize>,
    pub weight_sum: f32,
}

impl TextAnalysis {
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Lemma → summed weight. A recurring lemma accumulates its weight.
    pub fn lemma_weights(&self) -> AHashMap<&str, f32> {
        let mut weights: AHashMap<&str, f32> = AHashMap::with_capacity(self.terms.len());
        for term in &self.terms {
            *weights.entry(term.lemma.as_str()).or_insert(0.0) += term.weight;
        }
        weights
    }

    /// Set of recognized categories touched by the text ("unknown" excluded)
    pub fn category_set(&self) -> BTreeSet<&str> {
        self.categories
            .keys()
            .map(String::as_str)
            .filter(|c| *c != UNKNOWN_CATEGORY)
            .collect()
    }
}

/// Lemmatizer bound to one dictionary and one weight profile
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    dictionary: &'a TermDictionary,
    profile: &'a WeightProfile,
}

impl<'a> Analyzer<'a> {
    pub fn new(dictionary: &'a TermDictionary, profile: &'a WeightProfile) -> Self {
        Self { dictionary, profile }
    }

    pub fn dictionary(&self) -> &'a TermDictionary {
        self.dictionary
    }

    pub fn profile(&self) -> &'a WeightProfile {
        self.profile
    }

    pub fn analyze(&self, text: &str) -> TextAnalysis {
        let mut analysis = TextAnalysis::default();

        for token in tokenize(text) {
            let term = match self.dictionary.lookup(&token) {
                Some(entry) => AnalyzedTerm {
                    lemma: entry.lemma.clone(),
                    weight: self.profile.weight_for(entry.category_path.main),
                    category: entry.category_path.sub.clone(),
                    original: token,
                },
                None => AnalyzedTerm {
                    lemma: token.clone(),
                    weight: UNKNOWN_WEIGHT,
                    category: UNKNOWN_CATEGORY.to_string(),
                    original: token,
                },
            };

            *analysis.categories.entry(term.category.clone()).or_insert(0) += 1;
            analysis.weight_sum += term.weight;
            analysis.terms.push(term);
        }

        analysis
    }
}

impl Analyzer<'static> {
    /// Analyzer over the bundled dictionary with the configured profile
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(TermDictionary::builtin(), config.profile())
    }
}
