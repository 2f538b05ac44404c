//! Faceted filtering and recommendation queries

use serde::{Deserialize, Serialize};

use crate::types::{BrandSummary, ModelListing, PRICE_CEILING};

pub mod builder;
pub mod engine;

pub use builder::PredicateBuilder;
pub use engine::CatalogEngine;

/// Spec-sheet attribute names consumed by residual filtering.
pub const ATTR_MILEAGE: &str = "mileage";
pub const ATTR_RANGE: &str = "range";
pub const ATTR_DRIVE_TYPE: &str = "drive_type";
pub const ATTR_SAFETY_RATING: &str = "safety_rating";

/// Raw faceted-browse parameters, straight off the query string.
///
/// Every field is optional and tolerated in any shape; malformed values
/// degrade to "no constraint" rather than failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterParams {
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    /// Comma-separated OR-sets.
    pub body_types: Option<String>,
    pub fuel_types: Option<String>,
    pub transmissions: Option<String>,
    pub seats: Option<String>,
    pub drive_types: Option<String>,
    /// Inclusive lower bounds, optionally written with a trailing "+".
    pub mileage: Option<String>,
    pub electric_range: Option<String>,
    pub safety_rating: Option<String>,
    pub sort_by: Option<String>,
}

/// Raw recommendation parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendParams {
    pub min: Option<String>,
    pub max: Option<String>,
    pub fuel: Option<String>,
    pub trans: Option<String>,
    #[serde(rename = "type")]
    pub body_type: Option<String>,
}

/// Conjunction over indexed scalar fields, executable by the catalog store.
///
/// Empty sets mean "no constraint on this field", never "match none".
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPredicate {
    pub price_min: u64,
    pub price_max: u64,
    pub body_types: Vec<String>,
    pub fuel_types: Vec<String>,
    pub transmissions: Vec<String>,
    pub seats: Vec<u32>,
}

impl Default for StructuredPredicate {
    fn default() -> Self {
        Self {
            price_min: 0,
            price_max: PRICE_CEILING,
            body_types: Vec::new(),
            fuel_types: Vec::new(),
            transmissions: Vec::new(),
            seats: Vec::new(),
        }
    }
}

/// Conjunction over spec-sheet-derived values, applied in memory after
/// retrieval. A clause passes automatically for variants whose sheet omits
/// the attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResidualPredicate {
    pub min_mileage: Option<f64>,
    pub min_electric_range: Option<f64>,
    /// Requested drive-type labels; a variant matches when the first word of
    /// any label is a substring of its stored drive-type token.
    pub drive_types: Vec<String>,
    pub min_safety_rating: Option<f64>,
}

impl ResidualPredicate {
    pub fn is_empty(&self) -> bool {
        self.min_mileage.is_none()
            && self.min_electric_range.is_none()
            && self.drive_types.is_empty()
            && self.min_safety_rating.is_none()
    }
}

/// Structured constraints for the recommendation ranker. Looser by design
/// than lineup filtering: fuel is exact, transmission is substring, both
/// case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendPredicate {
    pub price_min: u64,
    pub price_max: u64,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub body_type: Option<String>,
}

impl Default for RecommendPredicate {
    fn default() -> Self {
        Self {
            price_min: 0,
            price_max: PRICE_CEILING,
            fuel_type: None,
            transmission: None,
            body_type: None,
        }
    }
}

/// Result ordering for lineup queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    PriceLow,
    PriceHigh,
    /// Ascending by model display name.
    #[default]
    Alphabetical,
}

impl SortKey {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("priceLow") => SortKey::PriceLow,
            Some("priceHigh") => SortKey::PriceHigh,
            _ => SortKey::Alphabetical,
        }
    }
}

/// Faceted lineup response: the owning brand, the filtered models each with
/// their representative variant, and the final count.
#[derive(Debug, Clone, Serialize)]
pub struct LineupResponse {
    pub brand: BrandSummary,
    pub cars: Vec<ModelListing>,
    pub count: usize,
}
