//! NeighborFit Algo - property matching service
//!
//! This library ranks a catalog of real-estate listings against a buyer's
//! stated priorities. Each listing is scored per criterion from its price and
//! description keywords, the scores are combined with the buyer's normalized
//! weights and vibe, and the top matches are returned with a short explanation.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, infer_score, score_criterion, compute_match, explain};
pub use models::{Criterion, FeatureScoreSet, Listing, MatchResult, UserPreferences, PreferenceError, MatchResponse};
pub use services::{CatalogProvider, CatalogError, CsvCatalog, StaticCatalog};
