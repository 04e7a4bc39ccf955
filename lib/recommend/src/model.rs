//! Wine and tasting records
//!
//! These mirror what the persistence layer hands over. Attribute values are
//! kept as received (numbers or loosely formatted strings) and parsed at
//! scoring time.

use serde::{Deserialize, Serialize};
use std::fmt;
use vinsmak_similarity::numeric::{parse_numeric, six_to_ten, NumericLike};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WineId(pub String);

impl WineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Product category. Decides which numeric attributes are comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WineCategory {
    Red,
    White,
    Rose,
    Sparkling,
    Dessert,
    Fortified,
    #[default]
    Other,
}

impl WineCategory {
    /// Tannin is compared for red wines, residual sugar for everything else
    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, WineCategory::Red)
    }

    /// Accepts English identifiers and the common Norwegian product names
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "red" | "rødvin" | "rød" => Some(WineCategory::Red),
            "white" | "hvitvin" | "hvit" => Some(WineCategory::White),
            "rose" | "rosé" | "rosévin" | "rosevin" => Some(WineCategory::Rose),
            "sparkling" | "musserende" | "musserende vin" => Some(WineCategory::Sparkling),
            "dessert" | "dessertvin" | "søtvin" => Some(WineCategory::Dessert),
            "fortified" | "sterkvin" => Some(WineCategory::Fortified),
            "other" | "annet" => Some(WineCategory::Other),
            _ => None,
        }
    }
}

/// A number, or a string such as `"13,5 %"` that parses into one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
}

impl NumericLike for NumericValue {
    fn to_numeric(&self) -> Option<f64> {
        match self {
            NumericValue::Number(n) => n.to_numeric(),
            NumericValue::Text(s) => parse_numeric(s),
        }
    }
}

impl From<f64> for NumericValue {
    fn from(n: f64) -> Self {
        NumericValue::Number(n)
    }
}

impl From<&str> for NumericValue {
    fn from(s: &str) -> Self {
        NumericValue::Text(s.to_string())
    }
}

/// Reference description of a wine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wine {
    pub id: WineId,
    pub name: String,
    #[serde(default)]
    pub category: WineCategory,
    /// 1–12 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tannin: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweetness: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smell: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taste: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<NumericValue>,
}

impl Wine {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: WineCategory) -> Self {
        Self {
            id: WineId::new(id),
            name: name.into(),
            category,
            body: None,
            freshness: None,
            tannin: None,
            sweetness: None,
            smell: None,
            taste: None,
            price: None,
        }
    }
}

/// Scale a tasting rating was recorded on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingScale {
    #[default]
    TenPoint,
    /// Older forms used 1–6
    SixPoint,
}

/// One user's tasting of one wine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tasting {
    pub user_id: String,
    pub wine_id: WineId,
    pub rating: f64,
    #[serde(default)]
    pub rating_scale: RatingScale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tannin: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweetness: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smell: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taste: Option<String>,
}

impl Tasting {
    pub fn new(user_id: impl Into<String>, wine_id: impl Into<String>, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            wine_id: WineId::new(wine_id),
            rating,
            rating_scale: RatingScale::TenPoint,
            body: None,
            freshness: None,
            tannin: None,
            sweetness: None,
            smell: None,
            taste: None,
        }
    }

    /// Rating on the 1–10 scale; NaN ratings count as unrated
    pub fn normalized_rating(&self) -> Option<f64> {
        if !self.rating.is_finite() {
            return None;
        }
        Some(match self.rating_scale {
            RatingScale::TenPoint => self.rating,
            RatingScale::SixPoint => six_to_ten(self.rating),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_parse() {
        assert_eq!(WineCategory::parse("Rødvin"), Some(WineCategory::Red));
        assert_eq!(WineCategory::parse("white"), Some(WineCategory::White));
        assert_eq!(WineCategory::parse("øl"), None);
        assert!(WineCategory::Red.is_red());
        assert!(!WineCategory::Dessert.is_red());
    }

    #[test]
    fn test_numeric_value_untagged() {
        let wine: Wine = serde_json::from_value(json!({
            "id": "w1",
            "name": "Barolo",
            "category": "red",
            "body": 10,
            "tannin": "8,5"
        }))
        .unwrap();

        assert_eq!(wine.body.to_numeric(), Some(10.0));
        assert_eq!(wine.tannin.to_numeric(), Some(8.5));
        assert!(wine.freshness.is_none());
    }

    #[test]
    fn test_six_point_rating_remapped() {
        let mut tasting = Tasting::new("u1", "w1", 6.0);
        tasting.rating_scale = RatingScale::SixPoint;
        assert_eq!(tasting.normalized_rating(), Some(10.0));

        tasting.rating = 1.0;
        assert_eq!(tasting.normalized_rating(), Some(1.0));
    }

    #[test]
    fn test_nan_rating() {
        let tasting = Tasting::new("u1", "w1", f64::NAN);
        assert_eq!(tasting.normalized_rating(), None);
    }
}
