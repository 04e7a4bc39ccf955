//! Term dictionary for tasting notes
//!
//! Maps surface word forms (inflections, compounds) to a canonical lemma and a
//! category path. Categories fall into two disjoint families: specific
//! aroma/flavor categories (fruit, spice, herb, flower, oak, mineral) and the
//! generic family (structure, body, acidity, sweetness, finish, texture,
//! quality adjectives). Weight profiles key off this split.
//!
//! The dictionary is immutable once built. The bundled vocabulary lives in
//! `data/terms.json` and is parsed once per process by [`TermDictionary::builtin`].

use crate::error::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

const BUNDLED_TERMS: &str = include_str!("../data/terms.json");

/// Highest data-file version this build understands
pub const DICTIONARY_VERSION: u32 = 1;

static BUILTIN: OnceLock<TermDictionary> = OnceLock::new();

/// Top-level term category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainCategory {
    Fruit,
    Spice,
    Herb,
    Flower,
    Oak,
    Mineral,
    /// Structure, body, acidity and other non-specific descriptors
    Generic,
}

impl MainCategory {
    /// Every category, specific ones first
    pub const ALL: [MainCategory; 7] = [
        MainCategory::Fruit,
        MainCategory::Spice,
        MainCategory::Herb,
        MainCategory::Flower,
        MainCategory::Oak,
        MainCategory::Mineral,
        MainCategory::Generic,
    ];

    /// True for aroma/flavor categories, false for the generic family
    #[inline]
    pub fn is_specific(self) -> bool {
        !matches!(self, MainCategory::Generic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MainCategory::Fruit => "fruit",
            MainCategory::Spice => "spice",
            MainCategory::Herb => "herb",
            MainCategory::Flower => "flower",
            MainCategory::Oak => "oak",
            MainCategory::Mineral => "mineral",
            MainCategory::Generic => "generic",
        }
    }
}

impl fmt::Display for MainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-level category of a term, e.g. `fruit/berry` or `generic/acidity`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPath {
    pub main: MainCategory,
    pub sub: String,
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main, self.sub)
    }
}

/// One dictionary row, keyed by its surface form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermEntry {
    pub surface_form: String,
    pub lemma: String,
    pub category_path: CategoryPath,
    /// Profile-independent importance hint carried over from older data.
    /// Not used by scoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_weight: Option<f32>,
}

/// A problem found by the offline consistency check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyIssue {
    /// The same surface form is listed more than once. The first listing wins.
    DuplicateForm {
        form: String,
        kept_lemma: String,
        dropped_lemma: String,
    },
    /// A lemma is listed under more than one category path
    CategoryConflict {
        lemma: String,
        first: CategoryPath,
        second: CategoryPath,
    },
}

#[derive(Deserialize)]
struct DictionaryFile {
    #[serde(default = "default_version")]
    version: u32,
    terms: Vec<RawTerm>,
}

fn default_version() -> u32 {
    1
}

#[derive(Deserialize)]
struct RawTerm {
    lemma: String,
    main: MainCategory,
    sub: String,
    forms: Vec<String>,
    #[serde(default)]
    base_weight: Option<f32>,
}

/// Immutable surface-form → term lookup table
#[derive(Debug, Clone)]
pub struct TermDictionary {
    entries: AHashMap<String, TermEntry>,
    issues: Vec<ConsistencyIssue>,
}

impl TermDictionary {
    /// The bundled vocabulary, parsed on first use
    pub fn builtin() -> &'static TermDictionary {
        BUILTIN.get_or_init(|| {
            Self::from_json(BUNDLED_TERMS).expect("bundled term dictionary is valid")
        })
    }

    /// Build a dictionary from the JSON data-file format
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DictionaryFile = serde_json::from_str(json)?;
        if file.version > DICTIONARY_VERSION {
            return Err(Error::UnsupportedVersion(file.version));
        }
        Self::from_raw(file.terms)
    }

    /// Load a dictionary data file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn from_raw(terms: Vec<RawTerm>) -> Result<Self> {
        let mut entries: AHashMap<String, TermEntry> = AHashMap::new();
        let mut lemma_paths: AHashMap<String, CategoryPath> = AHashMap::new();
        let mut issues = Vec::new();

        for raw in terms {
            if raw.forms.is_empty() {
                return Err(Error::EmptyEntry { lemma: raw.lemma });
            }

            let lemma = raw.lemma.to_lowercase();
            let path = CategoryPath {
                main: raw.main,
                sub: raw.sub,
            };

            match lemma_paths.get(&lemma) {
                Some(first) if *first != path => issues.push(ConsistencyIssue::CategoryConflict {
                    lemma: lemma.clone(),
                    first: first.clone(),
                    second: path.clone(),
                }),
                Some(_) => {}
                None => {
                    lemma_paths.insert(lemma.clone(), path.clone());
                }
            }

            for form in raw.forms {
                let form = form.to_lowercase();
                if let Some(existing) = entries.get(&form) {
                    issues.push(ConsistencyIssue::DuplicateForm {
                        form,
                        kept_lemma: existing.lemma.clone(),
                        dropped_lemma: lemma.clone(),
                    });
                    continue;
                }
                entries.insert(
                    form.clone(),
                    TermEntry {
                        surface_form: form,
                        lemma: lemma.clone(),
                        category_path: path.clone(),
                        base_weight: raw.base_weight,
                    },
                );
            }
        }

        Ok(Self { entries, issues })
    }

    /// Case-insensitive exact lookup. No stemming or fuzzy matching.
    #[inline]
    pub fn lookup(&self, surface_form: &str) -> Option<&TermEntry> {
        match self.entries.get(surface_form) {
            Some(entry) => Some(entry),
            None => self.entries.get(&surface_form.to_lowercase()),
        }
    }

    /// Problems recorded while building. Empty for a clean data file.
    pub fn consistency_report(&self) -> &[ConsistencyIssue] {
        &self.issues
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &TermEntry> {
        self.entries.values()
    }
}
