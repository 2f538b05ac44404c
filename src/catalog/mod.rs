//! Catalog store abstraction
//!
//! The relational collaborator holding brands, models and variants. The query
//! engine only depends on this trait, so it is constructible in tests without
//! a live store; `MemoryStore` is the bundled reference implementation.

use async_trait::async_trait;

use crate::query::{RecommendPredicate, StructuredPredicate};
use crate::types::{
    Brand, BrandId, Model, ModelDetail, ModelId, ModelListing, ModelWithBrand, SpecSheet,
    SpecValue, Variant, VariantHit, VariantId,
};
use crate::Result;

pub mod memory;

pub use memory::MemoryStore;

/// Fields for creating a brand. Slugs are immutable once assigned.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewBrand {
    pub name: String,
    pub slug: String,
    #[serde(default, alias = "logoUrl")]
    pub logo_url: Option<String>,
    #[serde(default, alias = "logoUrlDark")]
    pub logo_url_dark: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BrandUpdate {
    pub name: Option<String>,
    #[serde(alias = "logoUrl")]
    pub logo_url: Option<String>,
    #[serde(alias = "logoUrlDark")]
    pub logo_url_dark: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewModel {
    pub name: String,
    pub slug: String,
    /// Body-type category ("SUV", "Hatchback", ...).
    #[serde(rename = "type")]
    pub body_type: String,
    #[serde(alias = "brandId")]
    pub brand_id: BrandId,
    #[serde(default)]
    pub seats: Option<u32>,
    #[serde(default, alias = "mainImageUrl")]
    pub main_image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ModelUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub body_type: Option<String>,
    pub seats: Option<u32>,
    #[serde(alias = "mainImageUrl")]
    pub main_image_url: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewVariant {
    pub name: String,
    /// Ex-showroom price in the smallest currency unit.
    #[serde(alias = "priceExShowroom")]
    pub price: u64,
    #[serde(alias = "fuelType")]
    pub fuel_type: String,
    pub transmission: String,
    #[serde(alias = "modelId")]
    pub model_id: ModelId,
    #[serde(default)]
    pub specs: SpecSheet,
    #[serde(default)]
    pub colors: Vec<SpecValue>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct VariantUpdate {
    pub name: Option<String>,
    #[serde(alias = "priceExShowroom")]
    pub price: Option<u64>,
    #[serde(alias = "fuelType")]
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub specs: Option<SpecSheet>,
    pub colors: Option<Vec<SpecValue>>,
}

/// Catalog store interface.
///
/// Mutations maintain the ownership tree: deleting a brand cascades to its
/// models and variants, deleting a model cascades to its variants, and
/// creating a model or variant fails when the owner does not exist. Lookup
/// misses on reads are `Ok(None)`; only mutations raise NotFound errors.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // -- reads --------------------------------------------------------------

    /// All brands, ascending by name.
    async fn list_brands(&self) -> Result<Vec<Brand>>;

    async fn brand_by_slug(&self, slug: &str) -> Result<Option<Brand>>;

    async fn brand_by_id(&self, id: BrandId) -> Result<Option<Brand>>;

    /// Models owned by a brand, ascending by name.
    async fn brand_models(&self, brand_id: BrandId) -> Result<Vec<Model>>;

    /// All models joined to their brands, ascending by name.
    async fn list_models(&self) -> Result<Vec<ModelWithBrand>>;

    /// Model detail with variants ascending by price.
    async fn model_by_slug(&self, slug: &str) -> Result<Option<ModelDetail>>;

    async fn model_by_id(&self, id: ModelId) -> Result<Option<ModelDetail>>;

    /// Faceted lineup fetch: models under `brand_id` whose own fields satisfy
    /// the predicate, each joined to its cheapest variant satisfying the
    /// variant-side clauses. Models with no qualifying variant are excluded.
    /// Representative-variant ties break by variant id.
    async fn lineup(
        &self,
        brand_id: BrandId,
        predicate: &StructuredPredicate,
    ) -> Result<Vec<ModelListing>>;

    /// Variants matching the recommendation predicate, ascending by price
    /// (ties by variant id), capped at `limit`.
    async fn find_variants(
        &self,
        predicate: &RecommendPredicate,
        limit: usize,
    ) -> Result<Vec<VariantHit>>;

    /// All variants with owners, newest (highest id) first.
    async fn list_variants(&self) -> Result<Vec<VariantHit>>;

    async fn variant_by_id(&self, id: VariantId) -> Result<Option<VariantHit>>;

    // -- mutations ----------------------------------------------------------

    async fn create_brand(&self, new: NewBrand) -> Result<Brand>;

    async fn update_brand(&self, id: BrandId, update: BrandUpdate) -> Result<Brand>;

    /// Cascades to owned models and variants.
    async fn delete_brand(&self, id: BrandId) -> Result<()>;

    async fn create_model(&self, new: NewModel) -> Result<Model>;

    async fn update_model(&self, id: ModelId, update: ModelUpdate) -> Result<Model>;

    /// Cascades to owned variants.
    async fn delete_model(&self, id: ModelId) -> Result<()>;

    async fn create_variant(&self, new: NewVariant) -> Result<Variant>;

    async fn update_variant(&self, id: VariantId, update: VariantUpdate) -> Result<Variant>;

    async fn update_variant_price(&self, id: VariantId, price: u64) -> Result<Variant>;

    async fn delete_variant(&self, id: VariantId) -> Result<()>;

    // -- import support -----------------------------------------------------

    /// Create-or-update keyed by slug.
    async fn upsert_brand(&self, new: NewBrand) -> Result<Brand>;

    /// Create-or-update keyed by (brand_id, slug).
    async fn upsert_model(&self, new: NewModel) -> Result<Model>;

    /// Re-import strategy for one model: drop existing variants, insert the
    /// given set. Returns the number inserted.
    async fn replace_variants(
        &self,
        model_id: ModelId,
        variants: Vec<NewVariant>,
    ) -> Result<usize>;
}
