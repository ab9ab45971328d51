use crate::core::keywords::infer_score;
use crate::models::{Criterion, FeatureScoreSet, Listing, UserPreferences};

/// Base score for criteria inferred purely from the description
const BASE_SCORE: u8 = 3;

/// Weight of each vibe keyword hit, as a fraction of the 0-1 base score
const VIBE_BONUS: f64 = 0.05;

/// Affordability base by price tier (currency units)
const PRICE_TIERS: [(f64, u8); 3] = [(5_000_000.0, 5), (10_000_000.0, 4), (20_000_000.0, 3)];
const TOP_TIER_BASE: u8 = 2;

/// Outcome of aggregating one listing against one set of preferences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    /// Percentage-style score rounded to 2 decimals. Not bounded above by 100.
    pub match_score: f64,
    /// Sum of keyword hits across all vibe tokens
    pub vibe_score: u32,
}

/// Score a listing on one criterion, 1 to 5
pub fn score_criterion(listing: &Listing, criterion: Criterion) -> u8 {
    let base = match criterion {
        Criterion::Affordability => affordability_base(listing.price),
        _ => BASE_SCORE,
    };

    (base + infer_score(&listing.description, criterion.key()))
        .clamp(FeatureScoreSet::MIN, FeatureScoreSet::MAX)
}

/// Score a listing on all six criteria
pub fn score_listing(listing: &Listing) -> FeatureScoreSet {
    FeatureScoreSet::from_fn(|criterion| score_criterion(listing, criterion))
}

#[inline]
fn affordability_base(price: f64) -> u8 {
    PRICE_TIERS
        .iter()
        .find(|(ceiling, _)| price < *ceiling)
        .map_or(TOP_TIER_BASE, |(_, base)| *base)
}

/// Per-criterion weights divided by their sum
///
/// When the weights sum to 0 they are returned unnormalized, so every
/// criterion keeps its raw weight and the base score collapses to 0.
/// The total is summed in `i128` so no set of `i64` weights can overflow it.
pub fn normalized_weights(preferences: &UserPreferences) -> [(Criterion, f64); 6] {
    let total: i128 = Criterion::ALL
        .iter()
        .map(|c| i128::from(preferences.weight(*c)))
        .sum();
    let divisor = if total == 0 { 1.0 } else { total as f64 };

    Criterion::ALL.map(|c| (c, preferences.weight(c) as f64 / divisor))
}

/// Sum of keyword hits of every vibe token against the description
///
/// Tokens that are not dictionary keys contribute nothing. There is no cap.
pub fn vibe_score(preferences: &UserPreferences, description: &str) -> u32 {
    preferences
        .vibe_tokens()
        .map(|token| u32::from(infer_score(description, &token)))
        .sum()
}

/// Combine criterion scores, normalized weights and the vibe bonus into a match score
pub fn compute_match(
    preferences: &UserPreferences,
    listing: &Listing,
    scores: &FeatureScoreSet,
) -> MatchScore {
    let base: f64 = normalized_weights(preferences)
        .iter()
        .map(|(criterion, weight)| weight * f64::from(scores.get(*criterion)) / 5.0)
        .sum();

    let vibe_score = vibe_score(preferences, &listing.description);
    let total = base + VIBE_BONUS * f64::from(vibe_score);

    MatchScore {
        match_score: round2(total * 100.0),
        vibe_score,
    }
}

/// Round to 2 decimals, halves away from zero
///
/// Python's `round` sends exact halves to even instead. With weights in
/// [1, 5] no score lands on an exact half, so the two only differ for
/// out-of-range weights.
#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
