//! Keyword dictionary and feature inference over free-text descriptions

use once_cell::sync::Lazy;
use regex::RegexSet;
use std::collections::HashMap;

/// Highest score a single feature can reach from keyword matches
pub const MAX_INFERRED_SCORE: u8 = 3;

/// Patterns that indicate a locality feature, matched against lower-cased text
pub const FEATURE_KEYWORDS: &[(&str, &[&str])] = &[
    ("safety", &[r"safe", r"security", r"gated", r"guard", r"cctv"]),
    (
        "affordability",
        &[r"affordable", r"budget", r"low price", r"cheap", r"value for money"],
    ),
    ("cleanliness", &[r"clean", r"well[- ]?maintained", r"hygienic", r"neat"]),
    (
        "commute",
        &[
            r"public transit",
            r"metro",
            r"bus",
            r"commute",
            r"accessible",
            r"connectivity",
            r"transport",
        ],
    ),
    (
        "greenery",
        &[r"park", r"green", r"garden", r"tree", r"nature", r"open space"],
    ),
    (
        "nightlife",
        &[r"nightlife", r"restaurant", r"cafe", r"bar", r"entertainment", r"social"],
    ),
    ("quiet", &[r"quiet", r"peaceful", r"serene", r"calm"]),
    ("lively", &[r"lively", r"vibrant", r"bustling", r"active", r"busy"]),
    (
        "family",
        &[r"family", r"kids", r"school", r"child", r"playground", r"community"],
    ),
];

static DICTIONARY: Lazy<HashMap<&'static str, RegexSet>> = Lazy::new(|| {
    FEATURE_KEYWORDS
        .iter()
        .map(|(feature, patterns)| {
            let set = RegexSet::new(patterns.iter()).expect("keyword patterns are valid regexes");
            (*feature, set)
        })
        .collect()
});

/// Score how strongly `text` mentions `feature`, 0 to 3
///
/// Each pattern counts once no matter how often it occurs. Unknown features score 0.
pub fn infer_score(text: &str, feature: &str) -> u8 {
    let Some(patterns) = DICTIONARY.get(feature) else {
        return 0;
    };

    let text = text.to_lowercase();
    let hits = patterns.matches(&text).iter().count();

    hits.min(MAX_INFERRED_SCORE as usize) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_counts_once_per_pattern() {
        assert_eq!(infer_score("safe safe safe", "safety"), 1);
        assert_eq!(infer_score("safe and gated", "safety"), 2);
    }

    #[test]
    fn test_score_capped_at_three() {
        let text = "safe, gated, security guard and cctv everywhere";
        assert_eq!(infer_score(text, "safety"), 3);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(infer_score("Close to METRO and BUS stops", "commute"), 2);
    }

    #[test]
    fn test_unknown_feature_scores_zero() {
        assert_eq!(infer_score("safe and quiet", "ocean view"), 0);
        assert_eq!(infer_score("safe and quiet", ""), 0);
    }

    #[test]
    fn test_substring_matching() {
        // "barrier" contains "bar"
        assert_eq!(infer_score("noise barrier", "nightlife"), 1);
    }

    #[test]
    fn test_maintained_variants() {
        assert_eq!(infer_score("well maintained", "cleanliness"), 1);
        assert_eq!(infer_score("well-maintained", "cleanliness"), 1);
        assert_eq!(infer_score("wellmaintained", "cleanliness"), 1);
    }

    #[test]
    fn test_vibe_only_features() {
        assert_eq!(infer_score("quiet and calm", "quiet"), 2);
        assert_eq!(infer_score("busy, lively street", "lively"), 2);
        assert_eq!(infer_score("peaceful family community near a school", "family"), 3);
    }

    #[test]
    fn test_empty_text() {
        for (feature, _) in FEATURE_KEYWORDS {
            assert_eq!(infer_score("", feature), 0);
        }
    }
}
