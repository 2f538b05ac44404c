//! Public API handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::{error_response, AppState};
use crate::media;
use crate::query::{FilterParams, LineupResponse, RecommendParams};
use crate::types::{Brand, Model, ModelDetail, ModelWithBrand, VariantHit};

/// Health check with catalog size
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, String)> {
    let brands = state.store.list_brands().await.map_err(error_response)?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        brands: brands.len(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub brands: usize,
}

/// All brands, ascending by name
pub async fn get_brands(
    State(state): State<AppState>,
) -> Result<Json<Vec<Brand>>, (StatusCode, String)> {
    let brands = state.store.list_brands().await.map_err(error_response)?;
    Ok(Json(brands))
}

#[derive(Debug, Serialize)]
pub struct BrandWithModels {
    #[serde(flatten)]
    pub brand: Brand,
    pub models: Vec<Model>,
}

/// One brand by slug, with its models. A brand with zero models is a valid
/// response, not an error.
pub async fn get_brand(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BrandWithModels>, (StatusCode, String)> {
    let brand = state
        .store
        .brand_by_slug(&slug)
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(crate::Error::BrandNotFound(slug)))?;

    let models = state
        .store
        .brand_models(brand.id)
        .await
        .map_err(error_response)?;

    Ok(Json(BrandWithModels { brand, models }))
}

/// Faceted lineup of one brand's models under the full filter surface
pub async fn brand_lineup(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<LineupResponse>, (StatusCode, String)> {
    let response = state
        .engine
        .brand_lineup(&slug, &params)
        .await
        .map_err(error_response)?;

    Ok(Json(response))
}

/// All models across brands
pub async fn get_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelWithBrand>>, (StatusCode, String)> {
    let models = state.store.list_models().await.map_err(error_response)?;
    Ok(Json(models))
}

/// Best-match recommendation: up to 5 variants ascending by price
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<Vec<VariantHit>>, (StatusCode, String)> {
    let hits = state
        .engine
        .recommend(&params)
        .await
        .map_err(error_response)?;

    Ok(Json(hits))
}

/// One model by slug, with brand and variants ascending by price
pub async fn get_model(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ModelDetail>, (StatusCode, String)> {
    let detail = state
        .store
        .model_by_slug(&slug)
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(crate::Error::ModelNotFound(slug)))?;

    Ok(Json(detail))
}

/// Image proxy: resolves extension-less keys against the media store and
/// streams the bytes back with a one-day cache header.
pub async fn get_image(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let image = media::resolve_image(state.media.as_ref(), &path)
        .await
        .map_err(error_response)?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type.to_string()),
            (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
        ],
        image.bytes,
    )
        .into_response())
}
