//! Catalog import from scraped JSON files
//!
//! Each file describes one model of one brand, in the shape produced by the
//! scraper pipeline (camelCase variant fields, `priceExShowroom`, free-form
//! `specs`/`colors`). Import is idempotent: brand and model are upserted by
//! slug, and the model's variants are replaced wholesale so stale rows never
//! survive a re-import.

use std::path::Path;

use serde::Deserialize;

use crate::catalog::{CatalogStore, NewBrand, NewModel, NewVariant};
use crate::types::{SpecSheet, SpecValue};
use crate::Result;

/// One scraped catalog file.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub brand_name: String,
    pub brand_slug: String,
    pub model_name: String,
    pub model_slug: String,
    #[serde(rename = "type")]
    pub body_type: String,
    #[serde(default)]
    pub seats: Option<u32>,
    #[serde(default, rename = "mainImageUrl")]
    pub main_image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub name: String,
    #[serde(default)]
    pub price_ex_showroom: Option<u64>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub specs: SpecSheet,
    #[serde(default)]
    pub colors: Vec<SpecValue>,
}

#[derive(Debug, Default)]
pub struct ImportStats {
    pub files: usize,
    pub skipped: usize,
    pub models: usize,
    pub variants: usize,
}

/// Import every `.json` file under `dir`. A file that fails to read or parse
/// is logged and skipped; the rest of the import continues.
pub async fn load_dir(store: &dyn CatalogStore, dir: &Path) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        stats.files += 1;

        let file = match read_catalog_file(&path).await {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping catalog file");
                stats.skipped += 1;
                continue;
            }
        };

        let inserted = import_file(store, file).await?;
        stats.models += 1;
        stats.variants += inserted;
    }

    tracing::info!(
        files = stats.files,
        skipped = stats.skipped,
        models = stats.models,
        variants = stats.variants,
        "catalog import complete",
    );

    Ok(stats)
}

async fn read_catalog_file(path: &Path) -> Result<CatalogFile> {
    let raw = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Upsert one file's brand and model, then replace the model's variants.
pub async fn import_file(store: &dyn CatalogStore, file: CatalogFile) -> Result<usize> {
    let brand = store
        .upsert_brand(NewBrand {
            name: file.brand_name,
            logo_url: Some(format!("/images/brands/{}", file.brand_slug)),
            logo_url_dark: Some(format!("/images/brands/{}_dark", file.brand_slug)),
            slug: file.brand_slug,
        })
        .await?;

    let model = store
        .upsert_model(NewModel {
            name: file.model_name,
            slug: file.model_slug,
            body_type: file.body_type,
            brand_id: brand.id,
            seats: file.seats,
            main_image_url: file.main_image_url,
            images: file.images,
        })
        .await?;

    let variants: Vec<NewVariant> = file
        .variants
        .into_iter()
        .map(|v| NewVariant {
            name: v.name,
            price: v.price_ex_showroom.unwrap_or(0),
            fuel_type: v.fuel_type.unwrap_or_else(|| "Unknown".to_string()),
            transmission: v.transmission.unwrap_or_else(|| "Unknown".to_string()),
            model_id: model.id,
            specs: v.specs,
            colors: v.colors,
        })
        .collect();

    store.replace_variants(model.id, variants).await
}
