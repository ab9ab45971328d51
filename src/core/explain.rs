use crate::models::{Criterion, FeatureScoreSet, UserPreferences};
use std::cmp::Reverse;

/// Number of top-weighted criteria mentioned in an explanation
const EXPLAINED_CRITERIA: usize = 2;

const VIBE_NOTE: &str = "Matches your preferred locality vibe";
const SEPARATOR: &str = " | ";

/// Criteria ordered by the caller's raw weight, highest first
///
/// Equal weights keep declaration order.
pub fn ranked_priorities(preferences: &UserPreferences) -> Vec<Criterion> {
    let mut criteria = Criterion::ALL.to_vec();
    criteria.sort_by_key(|c| Reverse(preferences.weight(*c)));
    criteria
}

/// Render a short justification for a listing's score
///
/// e.g. `Safety score: 5/5 | Affordability score: 4/5 | Matches your preferred locality vibe`
pub fn explain(preferences: &UserPreferences, scores: &FeatureScoreSet, vibe_score: u32) -> String {
    let mut parts: Vec<String> = ranked_priorities(preferences)
        .into_iter()
        .take(EXPLAINED_CRITERIA)
        .map(|c| format!("{} score: {}/5", c.label(), scores.get(c)))
        .collect();

    if vibe_score > 0 {
        parts.push(VIBE_NOTE.to_string());
    }

    parts.join(SEPARATOR)
}
