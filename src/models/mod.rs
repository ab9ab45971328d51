// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Criterion, FeatureScoreSet, Listing, MatchResult};
pub use requests::{PreferenceError, UserPreferences, DEFAULT_WEIGHT};
pub use responses::{ErrorResponse, HealthResponse, MatchResponse, ServiceInfo};
