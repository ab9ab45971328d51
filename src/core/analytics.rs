use crate::models::Listing;
use serde::{Deserialize, Serialize};

const TOP_CITIES: usize = 5;
const NOT_AVAILABLE: &str = "N/A";

/// Aggregate view over the catalog for dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total_properties: usize,
    pub avg_price: i64,
    pub avg_area: i64,
    pub top_property_type: String,
    pub top_cities: Vec<CityCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

/// Summarize a catalog snapshot
///
/// Averages are rounded to the nearest integer. Frequency ties go to the
/// value seen first in the catalog.
pub fn summarize(listings: &[Listing]) -> CatalogSummary {
    let total = listings.len();

    let average = |field: fn(&Listing) -> f64| -> i64 {
        if total == 0 {
            return 0;
        }
        (listings.iter().map(field).sum::<f64>() / total as f64).round() as i64
    };

    let property_types = count_in_order(listings.iter().map(|l| l.property_type.as_str()));
    let cities = count_in_order(listings.iter().map(|l| l.city.as_str()));

    CatalogSummary {
        total_properties: total,
        avg_price: average(|l| l.price),
        avg_area: average(|l| l.area_sqft),
        top_property_type: property_types
            .first()
            .map_or_else(|| NOT_AVAILABLE.to_string(), |(name, _)| name.to_string()),
        top_cities: cities
            .into_iter()
            .take(TOP_CITIES)
            .map(|(city, count)| CityCount {
                city: city.to_string(),
                count,
            })
            .collect(),
    }
}

/// Occurrence counts sorted by count descending, ties in first-seen order
fn count_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
