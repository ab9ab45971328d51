use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the property catalog
///
/// Numeric fields are already coerced by the catalog provider: anything that
/// failed to parse is 0, and a missing description is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "Property_Name")]
    pub name: String,
    #[serde(rename = "Property_Title")]
    pub title: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Total_Area(SQFT)")]
    pub area_sqft: f64,
    #[serde(rename = "Price_per_SQFT")]
    pub price_per_sqft: f64,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Total_Rooms")]
    pub total_rooms: f64,
    #[serde(rename = "Balcony")]
    pub balcony: String,
    pub city: String,
    pub property_type: String,
    #[serde(rename = "BHK")]
    pub bhk: f64,
}

/// The six buyer priorities, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Safety,
    Affordability,
    Cleanliness,
    Commute,
    Greenery,
    Nightlife,
}

impl Criterion {
    /// All criteria in declaration order. Tie-breaks everywhere rely on this order.
    pub const ALL: [Criterion; 6] = [
        Criterion::Safety,
        Criterion::Affordability,
        Criterion::Cleanliness,
        Criterion::Commute,
        Criterion::Greenery,
        Criterion::Nightlife,
    ];

    /// Key used in the request body and the keyword dictionary
    pub fn key(self) -> &'static str {
        match self {
            Criterion::Safety => "safety",
            Criterion::Affordability => "affordability",
            Criterion::Cleanliness => "cleanliness",
            Criterion::Commute => "commute",
            Criterion::Greenery => "greenery",
            Criterion::Nightlife => "nightlife",
        }
    }

    /// Capitalized name used in explanations
    pub fn label(self) -> &'static str {
        match self {
            Criterion::Safety => "Safety",
            Criterion::Affordability => "Affordability",
            Criterion::Cleanliness => "Cleanliness",
            Criterion::Commute => "Commute",
            Criterion::Greenery => "Greenery",
            Criterion::Nightlife => "Nightlife",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-criterion scores for one listing, each in [1, 5]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureScoreSet {
    scores: [u8; 6],
}

impl FeatureScoreSet {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Build a score set from a per-criterion scoring function, clamping every value
    pub fn from_fn(mut score: impl FnMut(Criterion) -> u8) -> Self {
        let mut scores = [Self::MIN; 6];
        for criterion in Criterion::ALL {
            scores[criterion.index()] = score(criterion).clamp(Self::MIN, Self::MAX);
        }
        Self { scores }
    }

    pub fn get(&self, criterion: Criterion) -> u8 {
        self.scores[criterion.index()]
    }
}

/// Scored listing returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "Property_Name")]
    pub name: String,
    #[serde(rename = "Property_Title")]
    pub title: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Total_Area(SQFT)")]
    pub area_sqft: f64,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "BHK")]
    pub bhk: f64,
    pub property_type: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "why")]
    pub explanation: String,
}

impl MatchResult {
    pub fn new(listing: &Listing, match_score: f64, explanation: String) -> Self {
        Self {
            name: listing.name.clone(),
            title: listing.title.clone(),
            price: listing.price,
            location: listing.location.clone(),
            area_sqft: listing.area_sqft,
            description: listing.description.clone(),
            bhk: listing.bhk,
            property_type: listing.property_type.clone(),
            match_score,
            explanation,
        }
    }
}
