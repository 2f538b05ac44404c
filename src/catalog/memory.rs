//! In-memory catalog store
//!
//! Dashmap-backed reference implementation of [`CatalogStore`]. Used by the
//! server (populated at startup from seed data) and by tests. Mutations hold
//! no cross-map locks; the ownership invariants are maintained by performing
//! cascades eagerly inside each call.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::catalog::{
    BrandUpdate, CatalogStore, ModelUpdate, NewBrand, NewModel, NewVariant, VariantUpdate,
};
use crate::query::{RecommendPredicate, StructuredPredicate};
use crate::types::{
    Brand, BrandId, BrandSummary, Model, ModelDetail, ModelId, ModelListing, ModelWithBrand,
    Variant, VariantHit, VariantId,
};
use crate::{Error, Result};

#[derive(Default)]
pub struct MemoryStore {
    brands: DashMap<BrandId, Brand>,
    models: DashMap<ModelId, Model>,
    variants: DashMap<VariantId, Variant>,
    next_brand_id: AtomicU64,
    next_model_id: AtomicU64,
    next_variant_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn brand_summary(&self, brand_id: BrandId) -> Option<BrandSummary> {
        self.brands.get(&brand_id).map(|b| BrandSummary::from(&*b))
    }

    fn model_variants_sorted(&self, model_id: ModelId) -> Vec<Variant> {
        let mut variants: Vec<Variant> = self
            .variants
            .iter()
            .filter(|v| v.model_id == model_id)
            .map(|v| v.clone())
            .collect();
        variants.sort_by_key(|v| (v.price, v.id));
        variants
    }

    fn hit(&self, variant: Variant) -> Option<VariantHit> {
        let model = self.models.get(&variant.model_id)?.clone();
        let brand = self.brand_summary(model.brand_id)?;
        Some(VariantHit {
            variant,
            model,
            brand,
        })
    }

    fn detail(&self, model: Model) -> Option<ModelDetail> {
        let brand = self.brand_summary(model.brand_id)?;
        let variants = self.model_variants_sorted(model.id);
        Some(ModelDetail {
            model,
            brand,
            variants,
        })
    }
}

/// Case-insensitive set membership; an empty set constrains nothing.
fn in_set(set: &[String], value: &str) -> bool {
    set.is_empty() || set.iter().any(|s| s.eq_ignore_ascii_case(value))
}

fn model_matches(model: &Model, predicate: &StructuredPredicate) -> bool {
    if !in_set(&predicate.body_types, &model.body_type) {
        return false;
    }

    if !predicate.seats.is_empty() {
        match model.seats {
            Some(seats) => {
                if !predicate.seats.contains(&seats) {
                    return false;
                }
            }
            None => return false,
        }
    }

    true
}

fn variant_matches(variant: &Variant, predicate: &StructuredPredicate) -> bool {
    variant.price >= predicate.price_min
        && variant.price <= predicate.price_max
        && in_set(&predicate.fuel_types, &variant.fuel_type)
        && in_set(&predicate.transmissions, &variant.transmission)
}

fn variant_recommendable(
    variant: &Variant,
    model: &Model,
    predicate: &RecommendPredicate,
) -> bool {
    if variant.price < predicate.price_min || variant.price > predicate.price_max {
        return false;
    }

    if let Some(fuel) = &predicate.fuel_type {
        if !variant.fuel_type.eq_ignore_ascii_case(fuel) {
            return false;
        }
    }

    // Transmission matches loosely so "Automatic" finds "Automatic (AMT)".
    if let Some(trans) = &predicate.transmission {
        if !variant
            .transmission
            .to_lowercase()
            .contains(&trans.to_lowercase())
        {
            return false;
        }
    }

    if let Some(body_type) = &predicate.body_type {
        if !model.body_type.eq_ignore_ascii_case(body_type) {
            return false;
        }
    }

    true
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_brands(&self) -> Result<Vec<Brand>> {
        let mut brands: Vec<Brand> = self.brands.iter().map(|b| b.clone()).collect();
        brands.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(brands)
    }

    async fn brand_by_slug(&self, slug: &str) -> Result<Option<Brand>> {
        Ok(self
            .brands
            .iter()
            .find(|b| b.slug == slug)
            .map(|b| b.clone()))
    }

    async fn brand_by_id(&self, id: BrandId) -> Result<Option<Brand>> {
        Ok(self.brands.get(&id).map(|b| b.clone()))
    }

    async fn brand_models(&self, brand_id: BrandId) -> Result<Vec<Model>> {
        let mut models: Vec<Model> = self
            .models
            .iter()
            .filter(|m| m.brand_id == brand_id)
            .map(|m| m.clone())
            .collect();
        models.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(models)
    }

    async fn list_models(&self) -> Result<Vec<ModelWithBrand>> {
        let mut models: Vec<ModelWithBrand> = self
            .models
            .iter()
            .filter_map(|m| {
                let brand = self.brand_summary(m.brand_id)?;
                Some(ModelWithBrand {
                    model: m.clone(),
                    brand,
                })
            })
            .collect();
        models
            .sort_by(|a, b| a.model.name.cmp(&b.model.name).then(a.model.id.cmp(&b.model.id)));
        Ok(models)
    }

    async fn model_by_slug(&self, slug: &str) -> Result<Option<ModelDetail>> {
        let model = self.models.iter().find(|m| m.slug == slug).map(|m| m.clone());
        Ok(model.and_then(|m| self.detail(m)))
    }

    async fn model_by_id(&self, id: ModelId) -> Result<Option<ModelDetail>> {
        let model = self.models.get(&id).map(|m| m.clone());
        Ok(model.and_then(|m| self.detail(m)))
    }

    async fn lineup(
        &self,
        brand_id: BrandId,
        predicate: &StructuredPredicate,
    ) -> Result<Vec<ModelListing>> {
        let mut listings = Vec::new();

        for model in self.models.iter().filter(|m| m.brand_id == brand_id) {
            if !model_matches(&model, predicate) {
                continue;
            }

            // Representative variant: cheapest satisfying the variant-side
            // clauses, ties broken by id. No match drops the model entirely.
            let representative = self
                .model_variants_sorted(model.id)
                .into_iter()
                .find(|v| variant_matches(v, predicate));

            if let Some(variant) = representative {
                listings.push(ModelListing {
                    model: model.clone(),
                    variant,
                });
            }
        }

        Ok(listings)
    }

    async fn find_variants(
        &self,
        predicate: &RecommendPredicate,
        limit: usize,
    ) -> Result<Vec<VariantHit>> {
        let mut hits: Vec<VariantHit> = self
            .variants
            .iter()
            .filter_map(|v| {
                let model = self.models.get(&v.model_id)?.clone();
                if !variant_recommendable(&v, &model, predicate) {
                    return None;
                }
                let brand = self.brand_summary(model.brand_id)?;
                Some(VariantHit {
                    variant: v.clone(),
                    model,
                    brand,
                })
            })
            .collect();

        hits.sort_by_key(|h| (h.variant.price, h.variant.id));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn list_variants(&self) -> Result<Vec<VariantHit>> {
        let mut hits: Vec<VariantHit> = self
            .variants
            .iter()
            .filter_map(|v| self.hit(v.clone()))
            .collect();
        hits.sort_by(|a, b| b.variant.id.cmp(&a.variant.id));
        Ok(hits)
    }

    async fn variant_by_id(&self, id: VariantId) -> Result<Option<VariantHit>> {
        let variant = self.variants.get(&id).map(|v| v.clone());
        Ok(variant.and_then(|v| self.hit(v)))
    }

    async fn create_brand(&self, new: NewBrand) -> Result<Brand> {
        let now = Utc::now();
        let brand = Brand {
            id: Self::next_id(&self.next_brand_id),
            name: new.name,
            slug: new.slug,
            logo_url: new.logo_url,
            logo_url_dark: new.logo_url_dark,
            created_at: now,
            updated_at: now,
        };
        self.brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    async fn update_brand(&self, id: BrandId, update: BrandUpdate) -> Result<Brand> {
        let mut brand = self
            .brands
            .get_mut(&id)
            .ok_or_else(|| Error::BrandNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            brand.name = name;
        }
        if let Some(logo_url) = update.logo_url {
            brand.logo_url = Some(logo_url);
        }
        if let Some(logo_url_dark) = update.logo_url_dark {
            brand.logo_url_dark = Some(logo_url_dark);
        }
        brand.updated_at = Utc::now();

        Ok(brand.clone())
    }

    async fn delete_brand(&self, id: BrandId) -> Result<()> {
        if self.brands.remove(&id).is_none() {
            return Err(Error::BrandNotFound(id.to_string()));
        }

        let owned: Vec<ModelId> = self
            .models
            .iter()
            .filter(|m| m.brand_id == id)
            .map(|m| m.id)
            .collect();
        for model_id in owned {
            self.models.remove(&model_id);
            self.variants.retain(|_, v| v.model_id != model_id);
        }

        Ok(())
    }

    async fn create_model(&self, new: NewModel) -> Result<Model> {
        if !self.brands.contains_key(&new.brand_id) {
            return Err(Error::BrandNotFound(new.brand_id.to_string()));
        }

        let now = Utc::now();
        let model = Model {
            id: Self::next_id(&self.next_model_id),
            brand_id: new.brand_id,
            name: new.name,
            slug: new.slug,
            body_type: new.body_type,
            seats: new.seats,
            main_image_url: new.main_image_url,
            images: new.images,
            created_at: now,
            updated_at: now,
        };
        self.models.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update_model(&self, id: ModelId, update: ModelUpdate) -> Result<Model> {
        let mut model = self
            .models
            .get_mut(&id)
            .ok_or_else(|| Error::ModelNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            model.name = name;
        }
        if let Some(body_type) = update.body_type {
            model.body_type = body_type;
        }
        if let Some(seats) = update.seats {
            model.seats = Some(seats);
        }
        if let Some(main_image_url) = update.main_image_url {
            model.main_image_url = Some(main_image_url);
        }
        if let Some(images) = update.images {
            model.images = images;
        }
        model.updated_at = Utc::now();

        Ok(model.clone())
    }

    async fn delete_model(&self, id: ModelId) -> Result<()> {
        if self.models.remove(&id).is_none() {
            return Err(Error::ModelNotFound(id.to_string()));
        }
        self.variants.retain(|_, v| v.model_id != id);
        Ok(())
    }

    async fn create_variant(&self, new: NewVariant) -> Result<Variant> {
        if !self.models.contains_key(&new.model_id) {
            return Err(Error::ModelNotFound(new.model_id.to_string()));
        }

        let now = Utc::now();
        let variant = Variant {
            id: Self::next_id(&self.next_variant_id),
            model_id: new.model_id,
            name: new.name,
            price: new.price,
            fuel_type: new.fuel_type,
            transmission: new.transmission,
            specs: new.specs,
            colors: new.colors,
            created_at: now,
            updated_at: now,
        };
        self.variants.insert(variant.id, variant.clone());
        Ok(variant)
    }

    async fn update_variant(&self, id: VariantId, update: VariantUpdate) -> Result<Variant> {
        let mut variant = self
            .variants
            .get_mut(&id)
            .ok_or(Error::VariantNotFound(id))?;

        if let Some(name) = update.name {
            variant.name = name;
        }
        if let Some(price) = update.price {
            variant.price = price;
        }
        if let Some(fuel_type) = update.fuel_type {
            variant.fuel_type = fuel_type;
        }
        if let Some(transmission) = update.transmission {
            variant.transmission = transmission;
        }
        if let Some(specs) = update.specs {
            variant.specs = specs;
        }
        if let Some(colors) = update.colors {
            variant.colors = colors;
        }
        variant.updated_at = Utc::now();

        Ok(variant.clone())
    }

    async fn update_variant_price(&self, id: VariantId, price: u64) -> Result<Variant> {
        self.update_variant(
            id,
            VariantUpdate {
                price: Some(price),
                ..Default::default()
            },
        )
        .await
    }

    async fn delete_variant(&self, id: VariantId) -> Result<()> {
        self.variants
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::VariantNotFound(id))
    }

    async fn upsert_brand(&self, new: NewBrand) -> Result<Brand> {
        let existing = self.brand_by_slug(&new.slug).await?;
        match existing {
            Some(brand) => {
                self.update_brand(
                    brand.id,
                    BrandUpdate {
                        name: Some(new.name),
                        logo_url: new.logo_url,
                        logo_url_dark: new.logo_url_dark,
                    },
                )
                .await
            }
            None => self.create_brand(new).await,
        }
    }

    async fn upsert_model(&self, new: NewModel) -> Result<Model> {
        let existing = self
            .models
            .iter()
            .find(|m| m.brand_id == new.brand_id && m.slug == new.slug)
            .map(|m| m.id);

        match existing {
            Some(id) => {
                self.update_model(
                    id,
                    ModelUpdate {
                        name: Some(new.name),
                        body_type: Some(new.body_type),
                        seats: new.seats,
                        main_image_url: new.main_image_url,
                        images: Some(new.images),
                    },
                )
                .await
            }
            None => self.create_model(new).await,
        }
    }

    async fn replace_variants(
        &self,
        model_id: ModelId,
        variants: Vec<NewVariant>,
    ) -> Result<usize> {
        if !self.models.contains_key(&model_id) {
            return Err(Error::ModelNotFound(model_id.to_string()));
        }

        self.variants.retain(|_, v| v.model_id != model_id);

        let mut inserted = 0;
        for mut variant in variants {
            variant.model_id = model_id;
            self.create_variant(variant).await?;
            inserted += 1;
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_brand() -> (MemoryStore, Brand) {
        let store = MemoryStore::new();
        let brand = store
            .create_brand(NewBrand {
                name: "Tata".to_string(),
                slug: "tata".to_string(),
                logo_url: None,
                logo_url_dark: None,
            })
            .await
            .unwrap();
        (store, brand)
    }

    fn new_variant(model_id: ModelId, name: &str, price: u64, fuel: &str) -> NewVariant {
        NewVariant {
            name: name.to_string(),
            price,
            fuel_type: fuel.to_string(),
            transmission: "Manual".to_string(),
            model_id,
            specs: Default::default(),
            colors: Vec::new(),
        }
    }

    #[tokio::test]
    async fn create_model_requires_existing_brand() {
        let store = MemoryStore::new();
        let result = store
            .create_model(NewModel {
                name: "Nexon".to_string(),
                slug: "nexon".to_string(),
                body_type: "SUV".to_string(),
                brand_id: 42,
                seats: None,
                main_image_url: None,
                images: Vec::new(),
            })
            .await;
        assert!(matches!(result, Err(Error::BrandNotFound(_))));
    }

    #[tokio::test]
    async fn delete_brand_cascades_to_models_and_variants() {
        let (store, brand) = store_with_brand().await;
        let model = store
            .create_model(NewModel {
                name: "Nexon".to_string(),
                slug: "nexon".to_string(),
                body_type: "SUV".to_string(),
                brand_id: brand.id,
                seats: Some(5),
                main_image_url: None,
                images: Vec::new(),
            })
            .await
            .unwrap();
        store
            .create_variant(new_variant(model.id, "XE", 800_000, "Petrol"))
            .await
            .unwrap();

        store.delete_brand(brand.id).await.unwrap();

        assert!(store.model_by_id(model.id).await.unwrap().is_none());
        assert!(store.list_variants().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lineup_picks_cheapest_matching_variant() {
        let (store, brand) = store_with_brand().await;
        let model = store
            .create_model(NewModel {
                name: "Nexon".to_string(),
                slug: "nexon".to_string(),
                body_type: "SUV".to_string(),
                brand_id: brand.id,
                seats: Some(5),
                main_image_url: None,
                images: Vec::new(),
            })
            .await
            .unwrap();
        store
            .create_variant(new_variant(model.id, "XZ Diesel", 1_200_000, "Diesel"))
            .await
            .unwrap();
        store
            .create_variant(new_variant(model.id, "XE", 800_000, "Petrol"))
            .await
            .unwrap();

        // Unconstrained: the representative is the overall cheapest.
        let listings = store
            .lineup(brand.id, &StructuredPredicate::default())
            .await
            .unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].variant.price, 800_000);

        // Diesel-only: the representative is the cheapest diesel.
        let predicate = StructuredPredicate {
            fuel_types: vec!["Diesel".to_string()],
            ..Default::default()
        };
        let listings = store.lineup(brand.id, &predicate).await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].variant.price, 1_200_000);

        // No variant qualifies: the model disappears, not an empty shell.
        let predicate = StructuredPredicate {
            fuel_types: vec!["CNG".to_string()],
            ..Default::default()
        };
        assert!(store.lineup(brand.id, &predicate).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_variants_drops_stale_rows() {
        let (store, brand) = store_with_brand().await;
        let model = store
            .create_model(NewModel {
                name: "Tiago".to_string(),
                slug: "tiago".to_string(),
                body_type: "Hatchback".to_string(),
                brand_id: brand.id,
                seats: Some(5),
                main_image_url: None,
                images: Vec::new(),
            })
            .await
            .unwrap();
        store
            .create_variant(new_variant(model.id, "Old", 500_000, "Petrol"))
            .await
            .unwrap();

        let inserted = store
            .replace_variants(
                model.id,
                vec![
                    new_variant(model.id, "XE", 550_000, "Petrol"),
                    new_variant(model.id, "XT", 650_000, "Petrol"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        let detail = store.model_by_id(model.id).await.unwrap().unwrap();
        assert_eq!(detail.variants.len(), 2);
        assert!(detail.variants.iter().all(|v| v.name != "Old"));
    }

    #[tokio::test]
    async fn upsert_brand_is_keyed_by_slug() {
        let (store, brand) = store_with_brand().await;
        let updated = store
            .upsert_brand(NewBrand {
                name: "Tata Motors".to_string(),
                slug: "tata".to_string(),
                logo_url: Some("logo.png".to_string()),
                logo_url_dark: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.id, brand.id);
        assert_eq!(updated.name, "Tata Motors");
        assert_eq!(store.list_brands().await.unwrap().len(), 1);
    }
}
