//! Recommendation aggregation
//!
//! Builds a taste profile from the wines a user rated highly, then scores every
//! untasted candidate against it. Numeric attributes use relative closeness,
//! smell and taste use the configured text metric, and the overall score is
//! the weighted mean over the attributes that apply to the candidate.

use crate::error::Result;
use crate::explain::{RecommendResponse, RecommendationStats};
use crate::model::{NumericValue, Tasting, Wine, WineCategory, WineId};
use crate::store::TastingStore;
use crate::weights::{Attribute, RecommendationThresholds, RecommendationWeights, NEUTRAL_SCORE};
use futures_util::future::{join, join_all};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};
use vinsmak_similarity::{closeness, Algorithm, NumericLike, PreparedText, SimilarityEngine};

/// Aggregated preferences of one user
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserProfile {
    pub body: Option<f64>,
    pub freshness: Option<f64>,
    pub tannin: Option<f64>,
    pub sweetness: Option<f64>,
    /// Taken from the liked wines, users do not record price
    pub price: Option<f64>,
    /// Reference smell of the liked wines followed by the user's own notes
    pub smell: String,
    pub taste: String,
    pub liked_count: usize,
}

impl UserProfile {
    /// Average each attribute over the values that parse, skipping the rest
    pub fn build(liked: &[Tasting], liked_wines: &[Wine]) -> Self {
        Self {
            body: average(liked.iter().map(|t| t.body.to_numeric())),
            freshness: average(liked.iter().map(|t| t.freshness.to_numeric())),
            tannin: average(liked.iter().map(|t| t.tannin.to_numeric())),
            sweetness: average(liked.iter().map(|t| t.sweetness.to_numeric())),
            price: average(liked_wines.iter().map(|w| w.price.to_numeric())),
            smell: join_texts(
                liked_wines
                    .iter()
                    .map(|w| w.smell.as_deref())
                    .chain(liked.iter().map(|t| t.smell.as_deref())),
            ),
            taste: join_texts(
                liked_wines
                    .iter()
                    .map(|w| w.taste.as_deref())
                    .chain(liked.iter().map(|t| t.taste.as_deref())),
            ),
            liked_count: liked.len(),
        }
    }
}

fn average(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn join_texts<'a>(texts: impl Iterator<Item = Option<&'a str>>) -> String {
    texts
        .flatten()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Closeness of a profile average to a candidate value, neutral when either is missing
pub fn attribute_score(profile: Option<f64>, candidate: Option<&NumericValue>) -> u8 {
    match (profile, candidate.and_then(|v| v.to_numeric())) {
        (Some(p), Some(c)) => closeness(p, c),
        _ => NEUTRAL_SCORE,
    }
}

/// Text scores of one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextScores {
    pub smell: u8,
    pub taste: u8,
}

impl Default for TextScores {
    fn default() -> Self {
        Self {
            smell: NEUTRAL_SCORE,
            taste: NEUTRAL_SCORE,
        }
    }
}

/// A candidate wine with its overall score and the per-attribute scores behind it
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub wine: Wine,
    /// Weighted mean of `breakdown`, in `[0, 100]`
    pub similarity_score: f64,
    /// Unweighted score of every attribute that carried weight
    pub breakdown: BTreeMap<Attribute, u8>,
}

/// Attributes compared for a wine of `category`
fn applicable(category: WineCategory) -> [Attribute; 6] {
    let style = if category.is_red() {
        Attribute::Tannin
    } else {
        Attribute::Sweetness
    };
    [
        Attribute::Body,
        Attribute::Freshness,
        style,
        Attribute::Price,
        Attribute::Smell,
        Attribute::Taste,
    ]
}

/// Score one candidate. `weights` must already be sanitized.
pub fn score_candidate(
    profile: &UserProfile,
    wine: Wine,
    text: TextScores,
    weights: &RecommendationWeights,
) -> ScoredCandidate {
    let mut breakdown = BTreeMap::new();
    let mut weighted = 0.0;
    let mut weight_sum = 0.0;

    for attribute in applicable(wine.category) {
        let weight = weights.get(attribute);
        if weight <= 0.0 {
            continue;
        }
        let score = match attribute {
            Attribute::Body => attribute_score(profile.body, wine.body.as_ref()),
            Attribute::Freshness => attribute_score(profile.freshness, wine.freshness.as_ref()),
            Attribute::Tannin => attribute_score(profile.tannin, wine.tannin.as_ref()),
            Attribute::Sweetness => attribute_score(profile.sweetness, wine.sweetness.as_ref()),
            Attribute::Price => attribute_score(profile.price, wine.price.as_ref()),
            Attribute::Smell => text.smell,
            Attribute::Taste => text.taste,
        };
        weighted += f64::from(score) * weight;
        weight_sum += weight;
        breakdown.insert(attribute, score);
    }

    let similarity_score = if weight_sum > 0.0 {
        (weighted / weight_sum).clamp(0.0, 100.0)
    } else {
        0.0
    };

    ScoredCandidate {
        wine,
        similarity_score,
        breakdown,
    }
}

/// Recommends untasted wines for a user
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn TastingStore>,
    engine: SimilarityEngine<'static>,
    metric: Algorithm,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("engine", &self.engine)
            .field("metric", &self.metric)
            .finish()
    }
}

impl Recommender {
    pub fn new(store: Arc<dyn TastingStore>, engine: SimilarityEngine<'static>) -> Self {
        Self {
            store,
            engine,
            metric: Algorithm::default(),
        }
    }

    /// Text metric for smell and taste
    pub fn with_metric(mut self, metric: Algorithm) -> Self {
        self.metric = metric;
        self
    }

    pub fn metric(&self) -> Algorithm {
        self.metric
    }

    /// Up to `limit` candidates sorted by descending score
    ///
    /// A user with no liked tastings gets an empty response. Ties keep the
    /// store's candidate order. Scoring runs on tokio's blocking pool, so
    /// this must be awaited inside a tokio runtime.
    pub async fn recommend(
        &self,
        user_id: &str,
        limit: usize,
        weights: &RecommendationWeights,
        thresholds: &RecommendationThresholds,
        category: Option<WineCategory>,
    ) -> Result<RecommendResponse> {
        let weights = weights.sanitized();

        let liked = self
            .store
            .liked_tastings(user_id, thresholds.min_rating, category)
            .await?;
        if liked.is_empty() || limit == 0 {
            debug!(user_id, liked = liked.len(), limit, "Nothing to recommend");
            return Ok(RecommendResponse::new(Vec::new(), RecommendationStats::empty(0)));
        }

        let tasted = self.store.tasted_wine_ids(user_id).await?;
        let liked_ids: HashSet<WineId> = liked.iter().map(|t| t.wine_id.clone()).collect();
        let liked_wines = self.store.wines_by_ids(&liked_ids).await?;
        let candidates = self
            .store
            .candidate_wines(&tasted, category, thresholds.candidate_limit)
            .await?;

        let profile = UserProfile::build(&liked, &liked_wines);
        debug!(
            user_id,
            liked = liked.len(),
            tasted = tasted.len(),
            candidates = candidates.len(),
            "Built user profile"
        );

        let candidates_count = candidates.len();
        let embedded = self.embedded_text_scores(&profile, &candidates).await;

        let engine = self.engine.clone();
        let metric = self.metric;
        let scored = tokio::task::spawn_blocking(move || {
            rank(&engine, metric, &profile, candidates, embedded, &weights, limit)
        })
        .await?;

        let stats = RecommendationStats::compute(&scored, candidates_count, &weights);
        info!(
            user_id,
            candidates = candidates_count,
            results = scored.len(),
            metric = %self.metric,
            "Recommendation complete"
        );

        Ok(RecommendResponse::new(scored, stats))
    }

    /// Smell and taste scores through the embedding provider, `None` when the
    /// metric does not embed. Each profile text is embedded once per call.
    async fn embedded_text_scores(
        &self,
        profile: &UserProfile,
        candidates: &[Wine],
    ) -> Option<Vec<TextScores>> {
        if self.metric != Algorithm::Embedding || !self.engine.has_embedder() {
            return None;
        }

        let (smell, taste) = join(
            self.prepare_embedded(&profile.smell),
            self.prepare_embedded(&profile.taste),
        )
        .await;

        let futures = candidates.iter().map(|wine| {
            let (smell, taste) = (&smell, &taste);
            async move {
                let (smell, taste) = join(
                    self.prepared_score_async(smell.as_ref(), wine.smell.as_deref()),
                    self.prepared_score_async(taste.as_ref(), wine.taste.as_deref()),
                )
                .await;
                TextScores { smell, taste }
            }
        });
        Some(join_all(futures).await)
    }

    async fn prepare_embedded(&self, text: &str) -> Option<PreparedText> {
        if has_text(text) {
            Some(self.engine.prepare_embedded(text).await)
        } else {
            None
        }
    }

    async fn prepared_score_async(
        &self,
        query: Option<&PreparedText>,
        candidate: Option<&str>,
    ) -> u8 {
        match (query, candidate) {
            (Some(q), Some(c)) if has_text(c) => {
                self.engine.score_prepared_async(self.metric, q, c).await.value
            }
            _ => NEUTRAL_SCORE,
        }
    }
}

/// Score every candidate and keep the best `limit`. CPU-bound.
fn rank(
    engine: &SimilarityEngine<'_>,
    metric: Algorithm,
    profile: &UserProfile,
    candidates: Vec<Wine>,
    text_scores: Option<Vec<TextScores>>,
    weights: &RecommendationWeights,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let text_scores =
        text_scores.unwrap_or_else(|| text_scores_sync(engine, metric, profile, &candidates));

    let mut scored: Vec<ScoredCandidate> = candidates
        .into_par_iter()
        .zip(text_scores.into_par_iter())
        .map(|(wine, text)| score_candidate(profile, wine, text, weights))
        .collect();

    // Stable sort keeps candidate order on ties
    scored.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
    scored.truncate(limit);
    scored
}

/// Smell and taste scores with a synchronous metric. Each profile text is
/// analyzed once.
fn text_scores_sync(
    engine: &SimilarityEngine<'_>,
    metric: Algorithm,
    profile: &UserProfile,
    candidates: &[Wine],
) -> Vec<TextScores> {
    let smell = has_text(&profile.smell).then(|| engine.prepare(&profile.smell));
    let taste = has_text(&profile.taste).then(|| engine.prepare(&profile.taste));

    candidates
        .par_iter()
        .map(|wine| TextScores {
            smell: prepared_score(engine, metric, smell.as_ref(), wine.smell.as_deref()),
            taste: prepared_score(engine, metric, taste.as_ref(), wine.taste.as_deref()),
        })
        .collect()
}

fn prepared_score(
    engine: &SimilarityEngine<'_>,
    metric: Algorithm,
    query: Option<&PreparedText>,
    candidate: Option<&str>,
) -> u8 {
    match (query, candidate) {
        (Some(q), Some(c)) if has_text(c) => engine.score_prepared(metric, q, c).value,
        _ => NEUTRAL_SCORE,
    }
}

fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}
