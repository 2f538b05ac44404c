//! Core catalog types for showroom

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Brand ID type
pub type BrandId = u64;

/// Model ID type
pub type ModelId = u64;

/// Variant ID type
pub type VariantId = u64;

/// Highest ex-showroom price considered when no upper bound is given.
/// Keeps unbounded queries deterministic instead of open-ended.
pub const PRICE_CEILING: u64 = 20_000_000;

/// A single value inside a variant's spec sheet.
///
/// Spec sheets come from scraping and are not schematised: the same logical
/// attribute may be a bare string ("18.5 kmpl"), a JSON number, or live one
/// level down inside a named group. Only `crate::specs` interprets these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SpecValue {
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<SpecValue>),
    Group(HashMap<String, SpecValue>),
}

/// Semi-structured attribute document carried by every variant.
pub type SpecSheet = HashMap<String, SpecValue>;

/// Top-level manufacturer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    /// URL-safe, immutable external identifier, unique across brands.
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url_dark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A vehicle lineup under a brand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    pub brand_id: BrandId,
    pub name: String,
    /// Unique per brand, immutable.
    pub slug: String,
    /// Body-type category, e.g. "SUV" or "Hatchback".
    pub body_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A purchasable configuration of a model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub model_id: ModelId,
    pub name: String,
    /// Ex-showroom price in the smallest currency unit.
    pub price: u64,
    pub fuel_type: String,
    pub transmission: String,
    #[serde(default)]
    pub specs: SpecSheet,
    #[serde(default)]
    pub colors: Vec<SpecValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Brand fields exposed alongside query results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandSummary {
    pub id: BrandId,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url_dark: Option<String>,
}

impl From<&Brand> for BrandSummary {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name.clone(),
            slug: brand.slug.clone(),
            logo_url: brand.logo_url.clone(),
            logo_url_dark: brand.logo_url_dark.clone(),
        }
    }
}

/// Model joined to its owning brand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelWithBrand {
    #[serde(flatten)]
    pub model: Model,
    pub brand: BrandSummary,
}

/// Full model detail: brand plus all variants ascending by price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDetail {
    #[serde(flatten)]
    pub model: Model,
    pub brand: BrandSummary,
    pub variants: Vec<Variant>,
}

/// A model paired with its representative (cheapest eligible) variant.
/// This is the unit of faceted lineup results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelListing {
    #[serde(flatten)]
    pub model: Model,
    pub variant: Variant,
}

/// A variant joined to its owning model and brand, as returned by the
/// recommendation ranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantHit {
    #[serde(flatten)]
    pub variant: Variant,
    pub model: Model,
    pub brand: BrandSummary,
}
