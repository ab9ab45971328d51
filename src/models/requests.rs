use crate::models::domain::Criterion;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Weight used for a criterion the caller did not send
pub const DEFAULT_WEIGHT: i64 = 3;

/// Errors raised while reading a preferences body
///
/// An absent field falls back to its default. A field that is present but
/// cannot be coerced is rejected rather than guessed at.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Preferences must be a JSON object")]
    NotAnObject,

    #[error("Invalid preferences: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Buyer preferences for one match request
///
/// Weights accept integers, floats (truncated toward zero) and integer
/// strings. Weights outside [1, 5] are kept as-is. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default = "default_weight", deserialize_with = "safety_weight")]
    pub safety: i64,
    #[serde(default = "default_weight", deserialize_with = "affordability_weight")]
    pub affordability: i64,
    #[serde(default = "default_weight", deserialize_with = "cleanliness_weight")]
    pub cleanliness: i64,
    #[serde(default = "default_weight", deserialize_with = "commute_weight")]
    pub commute: i64,
    #[serde(default = "default_weight", deserialize_with = "greenery_weight")]
    pub greenery: i64,
    #[serde(default = "default_weight", deserialize_with = "nightlife_weight")]
    pub nightlife: i64,
    #[serde(default)]
    pub vibe: String,
}

fn default_weight() -> i64 {
    DEFAULT_WEIGHT
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            safety: DEFAULT_WEIGHT,
            affordability: DEFAULT_WEIGHT,
            cleanliness: DEFAULT_WEIGHT,
            commute: DEFAULT_WEIGHT,
            greenery: DEFAULT_WEIGHT,
            nightlife: DEFAULT_WEIGHT,
            vibe: String::new(),
        }
    }
}

impl UserPreferences {
    /// Raw (non-normalized) importance weight of a criterion
    pub fn weight(&self, criterion: Criterion) -> i64 {
        match criterion {
            Criterion::Safety => self.safety,
            Criterion::Affordability => self.affordability,
            Criterion::Cleanliness => self.cleanliness,
            Criterion::Commute => self.commute,
            Criterion::Greenery => self.greenery,
            Criterion::Nightlife => self.nightlife,
        }
    }

    /// Vibe tokens: comma separated, trimmed and lower-cased
    pub fn vibe_tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.vibe.split(',').map(|token| token.trim().to_lowercase())
    }

    /// Read preferences from a request body
    pub fn from_json(body: &Value) -> Result<Self, PreferenceError> {
        if !body.is_object() {
            return Err(PreferenceError::NotAnObject);
        }
        Ok(Self::deserialize(body)?)
    }
}

/// Accepts a present weight field, naming its criterion on failure
struct WeightVisitor(Criterion);

impl<'de> Visitor<'de> for WeightVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an integer weight for {}", self.0)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        if v.is_finite() && v.abs() < i64::MAX as f64 {
            Ok(v.trunc() as i64)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.trim()
            .parse::<i64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

fn weight<'de, D: Deserializer<'de>>(deserializer: D, criterion: Criterion) -> Result<i64, D::Error> {
    deserializer.deserialize_any(WeightVisitor(criterion))
}

fn safety_weight<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    weight(d, Criterion::Safety)
}

fn affordability_weight<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    weight(d, Criterion::Affordability)
}

fn cleanliness_weight<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    weight(d, Criterion::Cleanliness)
}

fn commute_weight<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    weight(d, Criterion::Commute)
}

fn greenery_weight<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    weight(d, Criterion::Greenery)
}

fn nightlife_weight<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    weight(d, Criterion::Nightlife)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_default_to_three() {
        let prefs = UserPreferences::from_json(&json!({})).unwrap();
        assert_eq!(prefs, UserPreferences::default());
        for criterion in Criterion::ALL {
            assert_eq!(prefs.weight(criterion), 3);
        }
    }

    #[test]
    fn test_weight_coercion() {
        let prefs = UserPreferences::from_json(&json!({
            "safety": 5,
            "affordability": "4",
            "cleanliness": " 2 ",
            "commute": 4.9,
            "greenery": 9,
            "nightlife": -1,
            "vibe": "Quiet, family",
            "ageGroup": "25-34"
        }))
        .unwrap();

        assert_eq!(prefs.safety, 5);
        assert_eq!(prefs.affordability, 4);
        assert_eq!(prefs.cleanliness, 2);
        assert_eq!(prefs.commute, 4);
        assert_eq!(prefs.greenery, 9);
        assert_eq!(prefs.nightlife, -1);
        assert_eq!(prefs.vibe_tokens().collect::<Vec<_>>(), vec!["quiet", "family"]);
    }

    #[test]
    fn test_extreme_weights_accepted() {
        let prefs = UserPreferences::from_json(&json!({ "safety": i64::MAX, "nightlife": i64::MIN }))
            .unwrap();
        assert_eq!(prefs.safety, i64::MAX);
        assert_eq!(prefs.nightlife, i64::MIN);
    }

    #[test]
    fn test_non_numeric_weight_rejected() {
        let err = UserPreferences::from_json(&json!({ "safety": "high" })).unwrap_err();
        assert!(matches!(err, PreferenceError::Invalid(_)));
        assert!(err.to_string().contains("safety"), "{}", err);
    }

    #[test]
    fn test_explicit_null_weight_rejected() {
        let err = UserPreferences::from_json(&json!({ "commute": null })).unwrap_err();
        assert!(err.to_string().contains("commute"), "{}", err);
    }

    #[test]
    fn test_unrepresentable_weights_rejected() {
        assert!(UserPreferences::from_json(&json!({ "greenery": "4.5" })).is_err());
        assert!(UserPreferences::from_json(&json!({ "greenery": true })).is_err());
        assert!(UserPreferences::from_json(&json!({ "greenery": u64::MAX })).is_err());
        assert!(UserPreferences::from_json(&json!({ "greenery": 1e300 })).is_err());
        assert!(UserPreferences::from_json(&json!({ "greenery": [4] })).is_err());
    }

    #[test]
    fn test_non_string_vibe_rejected() {
        assert!(UserPreferences::from_json(&json!({ "vibe": 3 })).is_err());
        assert!(UserPreferences::from_json(&json!({ "vibe": null })).is_err());
    }

    #[test]
    fn test_body_must_be_object() {
        assert!(matches!(
            UserPreferences::from_json(&json!([1, 2])),
            Err(PreferenceError::NotAnObject)
        ));
    }
}
