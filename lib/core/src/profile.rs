//! Weight profiles
//!
//! A profile is a named set of per-category multipliers applied to each
//! recognized term. Exactly one profile is active per [`crate::EngineConfig`];
//! selection never fails and falls back to the first registered profile.

use crate::dictionary::MainCategory;
use serde::Serialize;
use tracing::warn;

/// Name of the profile used when the configured name is missing or unknown
pub const DEFAULT_PROFILE: &str = "inverted";

/// Multiplier per main category. Every category has a value by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryWeights {
    pub fruit: f32,
    pub spice: f32,
    pub herb: f32,
    pub flower: f32,
    pub oak: f32,
    pub mineral: f32,
    pub generic: f32,
}

impl CategoryWeights {
    #[inline]
    pub fn get(&self, category: MainCategory) -> f32 {
        match category {
            MainCategory::Fruit => self.fruit,
            MainCategory::Spice => self.spice,
            MainCategory::Herb => self.herb,
            MainCategory::Flower => self.flower,
            MainCategory::Oak => self.oak,
            MainCategory::Mineral => self.mineral,
            MainCategory::Generic => self.generic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub weights: CategoryWeights,
}

/// Registered profiles. The first entry is the fallback.
static PROFILES: [WeightProfile; 3] = [
    WeightProfile {
        name: "inverted",
        description: "Specific descriptors count 1.8-2.5x, generic terms 1.0x",
        weights: CategoryWeights {
            fruit: 2.0,
            spice: 2.2,
            herb: 2.0,
            flower: 2.0,
            oak: 1.8,
            mineral: 2.5,
            generic: 1.0,
        },
    },
    WeightProfile {
        name: "moderate",
        description: "Mild preference for specific descriptors",
        weights: CategoryWeights {
            fruit: 1.3,
            spice: 1.4,
            herb: 1.3,
            flower: 1.3,
            oak: 1.2,
            mineral: 1.5,
            generic: 1.0,
        },
    },
    WeightProfile {
        name: "data-driven",
        description: "Rewards common generic terms; used for calibration",
        weights: CategoryWeights {
            fruit: 1.0,
            spice: 0.8,
            herb: 0.8,
            flower: 0.8,
            oak: 1.0,
            mineral: 0.7,
            generic: 1.5,
        },
    },
];

impl WeightProfile {
    /// All registered profiles in registry order
    pub fn all() -> &'static [WeightProfile] {
        &PROFILES
    }

    /// Exact lookup by name (case-insensitive, surrounding whitespace ignored)
    pub fn by_name(name: &str) -> Option<&'static WeightProfile> {
        let name = name.trim();
        PROFILES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a configured name, falling back to the first profile
    pub fn select(name: Option<&str>) -> &'static WeightProfile {
        match name {
            Some(n) => match Self::by_name(n) {
                Some(profile) => profile,
                None => {
                    warn!(
                        requested = n,
                        fallback = PROFILES[0].name,
                        "Unknown weight profile, using fallback"
                    );
                    &PROFILES[0]
                }
            },
            None => &PROFILES[0],
        }
    }

    #[inline]
    pub fn weight_for(&self, category: MainCategory) -> f32 {
        self.weights.get(category)
    }
}
