use crate::models::Listing;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading a catalog snapshot
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Source of catalog snapshots
///
/// Each call returns a complete, already-coerced list of listings. The
/// scoring engine only ever sees the returned snapshot.
pub trait CatalogProvider: Send + Sync {
    fn snapshot(&self) -> Result<Vec<Listing>, CatalogError>;

    /// Human-readable origin of the catalog, used in logs
    fn source(&self) -> String;
}

/// Fixed in-memory catalog
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    listings: Vec<Listing>,
}

impl StaticCatalog {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl CatalogProvider for StaticCatalog {
    fn snapshot(&self) -> Result<Vec<Listing>, CatalogError> {
        Ok(self.listings.clone())
    }

    fn source(&self) -> String {
        format!("static ({} listings)", self.listings.len())
    }
}

/// Flat-file catalog, re-read on every snapshot
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse listings from any CSV reader
    ///
    /// Records that cannot be decoded are skipped so one bad row does not
    /// abort the rest of the catalog.
    pub fn parse<R: std::io::Read>(reader: R) -> Result<Vec<Listing>, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        // Header problems are fatal, row problems are not
        reader.headers()?;

        let mut listings = Vec::new();
        for (row, record) in reader.deserialize::<CatalogRow>().enumerate() {
            match record {
                Ok(raw) => listings.push(raw.into_listing(row)),
                Err(e) => tracing::warn!("Skipping catalog row {}: {}", row + 1, e),
            }
        }

        Ok(listings)
    }
}

impl CatalogProvider for CsvCatalog {
    fn snapshot(&self) -> Result<Vec<Listing>, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::NotFound(self.path.clone()));
        }

        let file = std::fs::File::open(&self.path)?;
        let listings = Self::parse(file)?;

        tracing::debug!("Loaded {} listings from {}", listings.len(), self.path.display());
        Ok(listings)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}

/// One raw CSV record, every column optional and untyped
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogRow {
    #[serde(rename = "Property_Name")]
    name: Option<String>,
    #[serde(rename = "Property Title")]
    title: Option<String>,
    #[serde(rename = "Price")]
    price: Option<String>,
    #[serde(rename = "Location")]
    location: Option<String>,
    #[serde(rename = "Total_Area(SQFT)")]
    area_sqft: Option<String>,
    #[serde(rename = "Price_per_SQFT")]
    price_per_sqft: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Total_Rooms")]
    total_rooms: Option<String>,
    #[serde(rename = "Balcony")]
    balcony: Option<String>,
    city: Option<String>,
    property_type: Option<String>,
    #[serde(rename = "BHK")]
    bhk: Option<String>,
}

impl CatalogRow {
    fn into_listing(self, row: usize) -> Listing {
        let number = |field: &str, value: Option<String>| coerce_number(row, field, value);

        Listing {
            price: number("Price", self.price),
            area_sqft: number("Total_Area(SQFT)", self.area_sqft),
            price_per_sqft: number("Price_per_SQFT", self.price_per_sqft),
            total_rooms: number("Total_Rooms", self.total_rooms),
            bhk: number("BHK", self.bhk),
            name: self.name.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            balcony: self.balcony.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            property_type: self.property_type.unwrap_or_default(),
        }
    }
}

/// Parse a numeric field, falling back to 0 for anything missing or malformed
fn coerce_number(row: usize, field: &str, value: Option<String>) -> f64 {
    let Some(raw) = value else {
        return 0.0;
    };

    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => {
            if !raw.trim().is_empty() {
                tracing::debug!("Row {}: {} value {:?} is not numeric, using 0", row + 1, field, raw);
            }
            0.0
        }
    }
}
