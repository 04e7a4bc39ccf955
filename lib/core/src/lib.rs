//! # Vinsmak Core
//!
//! Core text layer of the Vinsmak tasting engine.
//!
//! - [`TermDictionary`] - surface form → lemma and category path
//! - [`WeightProfile`] - per-category multipliers, selected by [`EngineConfig`]
//! - [`Analyzer`] - tokenizes a tasting note into weighted, categorized terms
//!
//! ## Example
//!
//! ```rust
//! use vinsmak_core::{Analyzer, EngineConfig};
//!
//! let config = EngineConfig::new(Some("inverted".to_string()));
//! let analyzer = Analyzer::from_config(&config);
//!
//! let analysis = analyzer.analyze("Solbær og kirsebær, frisk syre");
//! assert_eq!(analysis.terms.len(), 4);
//! assert_eq!(analysis.categories["berry"], 2);
//! ```

pub mod analyzer;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod profile;
pub mod text;

pub use analyzer::{AnalyzedTerm, Analyzer, TextAnalysis, UNKNOWN_CATEGORY, UNKNOWN_WEIGHT};
pub use config::{EngineConfig, PROFILE_ENV_VAR};
pub use dictionary::{CategoryPath, ConsistencyIssue, MainCategory, TermDictionary, TermEntry};
pub use error::{Error, Result};
pub use profile::{CategoryWeights, WeightProfile, DEFAULT_PROFILE};
