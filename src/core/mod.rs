// Core algorithm exports
pub mod analytics;
pub mod explain;
pub mod keywords;
pub mod matcher;
pub mod scoring;

pub use analytics::{summarize, CatalogSummary, CityCount};
pub use explain::{explain, ranked_priorities};
pub use keywords::{infer_score, FEATURE_KEYWORDS};
pub use matcher::{Matcher, DEFAULT_TOP_K};
pub use scoring::{compute_match, normalized_weights, score_criterion, score_listing, vibe_score, MatchScore};
