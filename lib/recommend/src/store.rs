//! Persistence provider interface and an in-memory implementation
//!
//! The aggregator needs four queries and nothing else; a SQL backend may
//! pre-filter or pre-score the candidate pool however it likes.

use crate::model::{Tasting, Wine, WineCategory, WineId};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait TastingStore: Send + Sync {
    /// Tastings by `user_id` rated at or above `min_rating` (1–10 scale),
    /// optionally limited to wines of one category
    async fn liked_tastings(
        &self,
        user_id: &str,
        min_rating: f64,
        category: Option<WineCategory>,
    ) -> Result<Vec<Tasting>>;

    /// Ids of every wine the user has tasted, regardless of rating
    async fn tasted_wine_ids(&self, user_id: &str) -> Result<HashSet<WineId>>;

    async fn wines_by_ids(&self, ids: &HashSet<WineId>) -> Result<Vec<Wine>>;

    /// Up to `limit` wines not in `exclude`, optionally of one category
    async fn candidate_wines(
        &self,
        exclude: &HashSet<WineId>,
        category: Option<WineCategory>,
        limit: usize,
    ) -> Result<Vec<Wine>>;
}

/// Serializable snapshot of wines and tastings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub wines: Vec<Wine>,
    #[serde(default)]
    pub tastings: Vec<Tasting>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Insertion order, used as the candidate order
    wines: Vec<Wine>,
    index: HashMap<WineId, usize>,
    tastings: Vec<Tasting>,
}

/// In-memory store for tests, demos and the CLI
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        let store = Self::new();
        for wine in dataset.wines {
            store.upsert_wine(wine);
        }
        for tasting in dataset.tastings {
            store.add_tasting(tasting);
        }
        store
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let dataset: Dataset = serde_json::from_str(&raw)?;
        Ok(Self::from_dataset(dataset))
    }

    /// Insert a wine, replacing one with the same id in place
    pub fn upsert_wine(&self, wine: Wine) {
        let mut inner = self.inner.write();
        match inner.index.get(&wine.id).copied() {
            Some(pos) => inner.wines[pos] = wine,
            None => {
                let pos = inner.wines.len();
                inner.index.insert(wine.id.clone(), pos);
                inner.wines.push(wine);
            }
        }
    }

    pub fn add_tasting(&self, tasting: Tasting) {
        self.inner.write().tastings.push(tasting);
    }

    pub fn wine_count(&self) -> usize {
        self.inner.read().wines.len()
    }

    pub fn tasting_count(&self) -> usize {
        self.inner.read().tastings.len()
    }
}

impl Inner {
    fn category_of(&self, id: &WineId) -> Option<WineCategory> {
        self.index.get(id).map(|pos| self.wines[*pos].category)
    }
}

#[async_trait]
impl TastingStore for MemoryStore {
    async fn liked_tastings(
        &self,
        user_id: &str,
        min_rating: f64,
        category: Option<WineCategory>,
    ) -> Result<Vec<Tasting>> {
        let inner = self.inner.read();
        Ok(inner
            .tastings
            .iter()
            .filter(|t| t.user_id == user_id)
            .filter(|t| t.normalized_rating().is_some_and(|r| r >= min_rating))
            .filter(|t| category.map_or(true, |c| inner.category_of(&t.wine_id) == Some(c)))
            .cloned()
            .collect())
    }

    async fn tasted_wine_ids(&self, user_id: &str) -> Result<HashSet<WineId>> {
        let inner = self.inner.read();
        Ok(inner
            .tastings
            .iter()
            .filter(|t| t.user_id == user_id)
            .map(|t| t.wine_id.clone())
            .collect())
    }

    async fn wines_by_ids(&self, ids: &HashSet<WineId>) -> Result<Vec<Wine>> {
        let inner = self.inner.read();
        Ok(inner
            .wines
            .iter()
            .filter(|w| ids.contains(&w.id))
            .cloned()
            .collect())
    }

    async fn candidate_wines(
        &self,
        exclude: &HashSet<WineId>,
        category: Option<WineCategory>,
        limit: usize,
    ) -> Result<Vec<Wine>> {
        let inner = self.inner.read();
        Ok(inner
            .wines
            .iter()
            .filter(|w| !exclude.contains(&w.id))
            .filter(|w| category.map_or(true, |c| w.category == c))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RatingScale;
    use std::io::Write;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.upsert_wine(Wine::new("r1", "Barolo", WineCategory::Red));
        store.upsert_wine(Wine::new("w1", "Chablis", WineCategory::White));
        store.upsert_wine(Wine::new("r2", "Rioja", WineCategory::Red));
        store.upsert_wine(Wine::new("w2", "Riesling", WineCategory::White));

        store.add_tasting(Tasting::new("anna", "r1", 9.0));
        store.add_tasting(Tasting::new("anna", "w1", 4.0));
        let mut old = Tasting::new("anna", "w2", 5.0);
        old.rating_scale = RatingScale::SixPoint;
        store.add_tasting(old);
        store.add_tasting(Tasting::new("bjorn", "r2", 10.0));
        store
    }

    #[tokio::test]
    async fn test_liked_tastings_threshold() {
        let s = store();
        let liked = s.liked_tastings("anna", 7.0, None).await.unwrap();
        // 5 on the six-point scale is 8.2
        let ids: Vec<&str> = liked.iter().map(|t| t.wine_id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "w2"]);
    }

    #[tokio::test]
    async fn test_liked_tastings_category() {
        let s = store();
        let liked = s
            .liked_tastings("anna", 7.0, Some(WineCategory::Red))
            .await
            .unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].wine_id.as_str(), "r1");
    }

    #[tokio::test]
    async fn test_candidates_exclude_tasted() {
        let s = store();
        let tasted = s.tasted_wine_ids("anna").await.unwrap();
        assert_eq!(tasted.len(), 3);

        let candidates = s.candidate_wines(&tasted, None, 10).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id.as_str(), "r2");
    }

    #[tokio::test]
    async fn test_candidates_limit_and_order() {
        let s = store();
        let none = HashSet::new();
        let candidates = s.candidate_wines(&none, None, 3).await.unwrap();
        let ids: Vec<&str> = candidates.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "w1", "r2"]);

        let whites = s
            .candidate_wines(&none, Some(WineCategory::White), 10)
            .await
            .unwrap();
        assert_eq!(whites.len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let s = store();
        s.upsert_wine(Wine::new("r1", "Barolo Riserva", WineCategory::Red));
        assert_eq!(s.wine_count(), 4);

        let ids: HashSet<WineId> = [WineId::from("r1")].into_iter().collect();
        let wines = s.wines_by_ids(&ids).await.unwrap();
        assert_eq!(wines[0].name, "Barolo Riserva");
    }

    #[tokio::test]
    async fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "wines": [{{"id": "r1", "name": "Barolo", "category": "red", "body": "10"}}],
                "tastings": [{{"user_id": "anna", "wine_id": "r1", "rating": 8}}]
            }}"#
        )
        .unwrap();

        let s = MemoryStore::from_json_file(file.path()).unwrap();
        assert_eq!(s.wine_count(), 1);
        assert_eq!(s.tasting_count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = MemoryStore::from_json_file("/nonexistent/vinsmak.json");
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
