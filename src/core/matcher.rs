use crate::core::{
    explain::explain,
    scoring::{compute_match, score_listing},
};
use crate::models::{Listing, MatchResult, UserPreferences};

/// Number of matches returned per request
pub const DEFAULT_TOP_K: usize = 3;

/// Ranking orchestrator
///
/// Stateless apart from `top_k`; one instance can be shared read-only by
/// every request.
///
/// # Pipeline Stages
/// 1. Criterion scoring from listing attributes and description keywords
/// 2. Weighted aggregation with the vibe bonus
/// 3. Explanation of the top-weighted criteria
/// 4. Stable sort by score and top-K selection
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    top_k: usize,
}

impl Matcher {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Score a single listing against the caller's preferences
    pub fn score(&self, listing: &Listing, preferences: &UserPreferences) -> MatchResult {
        let scores = score_listing(listing);
        let outcome = compute_match(preferences, listing, &scores);
        let explanation = explain(preferences, &scores, outcome.vibe_score);

        tracing::trace!(
            "Scored '{}': {:?} vibe={} match={}",
            listing.name,
            scores,
            outcome.vibe_score,
            outcome.match_score
        );

        MatchResult::new(listing, outcome.match_score, explanation)
    }

    /// Rank the whole catalog and keep the best `top_k`
    ///
    /// Listings with equal scores keep their catalog order. The catalog is
    /// never modified and the output depends only on the inputs.
    pub fn rank(&self, listings: &[Listing], preferences: &UserPreferences) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = listings
            .iter()
            .map(|listing| self.score(listing, preferences))
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(self.top_k);
        results
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_listing(name: &str, price: f64, description: &str) -> Listing {
        Listing {
            name: name.to_string(),
            title: format!("{} Residency", name),
            price,
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rank_sorted_descending() {
        let matcher = Matcher::default();
        let prefs = UserPreferences::default();

        let listings = vec![
            create_listing("plain", 30_000_000.0, ""),
            create_listing("good", 1_000_000.0, "safe, clean, near metro and park"),
            create_listing("mid", 8_000_000.0, "gated"),
        ];

        let results = matcher.rank(&listings, &prefs);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["good", "mid", "plain"]);
    }

    #[test]
    fn test_respects_top_k() {
        let matcher = Matcher::default();
        let prefs = UserPreferences::default();
        let listings: Vec<Listing> = (0..10)
            .map(|i| create_listing(&i.to_string(), i as f64 * 3_000_000.0, ""))
            .collect();

        assert_eq!(matcher.rank(&listings, &prefs).len(), 3);
        assert_eq!(Matcher::new(5).rank(&listings, &prefs).len(), 5);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let matcher = Matcher::default();
        let prefs = UserPreferences::default();
        let listings = vec![
            create_listing("a", 1_000_000.0, "quiet"),
            create_listing("b", 1_000_000.0, "quiet"),
            create_listing("c", 1_000_000.0, "quiet"),
            create_listing("d", 1_000_000.0, "quiet"),
        ];

        let names: Vec<String> = matcher
            .rank(&listings, &prefs)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_catalog() {
        let matcher = Matcher::default();
        assert!(matcher.rank(&[], &UserPreferences::default()).is_empty());
    }
}
