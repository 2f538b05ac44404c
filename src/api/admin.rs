//! Admin CRUD handlers, guarded by a shared API key
//!
//! Mutations go straight to the catalog store; the query engine never sees
//! them. Deletes cascade down the ownership tree at the store layer.

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{error_response, AppState};
use crate::catalog::{BrandUpdate, ModelUpdate, NewBrand, NewModel, NewVariant, VariantUpdate};
use crate::types::{
    Brand, BrandId, Model, ModelDetail, ModelId, ModelWithBrand, Variant, VariantHit, VariantId,
};

/// Reject requests whose x-api-key header does not match the configured
/// admin key. A missing key in configuration disables the surface outright.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let Some(expected) = state.admin_key.as_deref() else {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Access denied: admin surface is disabled".to_string(),
        ));
    };

    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());

    if provided != Some(expected) {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Access denied: invalid API key".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

// ---- brands ----------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AdminBrand {
    #[serde(flatten)]
    pub brand: Brand,
    pub models: Vec<Model>,
}

pub async fn list_brands(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminBrand>>, (StatusCode, String)> {
    let brands = state.store.list_brands().await.map_err(error_response)?;

    let mut out = Vec::with_capacity(brands.len());
    for brand in brands {
        let models = state
            .store
            .brand_models(brand.id)
            .await
            .map_err(error_response)?;
        out.push(AdminBrand { brand, models });
    }

    Ok(Json(out))
}

#[derive(Debug, Serialize)]
pub struct AdminBrandDetail {
    #[serde(flatten)]
    pub brand: Brand,
    pub models: Vec<ModelDetail>,
}

pub async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<BrandId>,
) -> Result<Json<AdminBrandDetail>, (StatusCode, String)> {
    let brand = state
        .store
        .brand_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(crate::Error::BrandNotFound(id.to_string())))?;

    let mut models = Vec::new();
    for model in state
        .store
        .brand_models(brand.id)
        .await
        .map_err(error_response)?
    {
        if let Some(detail) = state
            .store
            .model_by_id(model.id)
            .await
            .map_err(error_response)?
        {
            models.push(detail);
        }
    }

    Ok(Json(AdminBrandDetail { brand, models }))
}

pub async fn create_brand(
    State(state): State<AppState>,
    Json(payload): Json<NewBrand>,
) -> Result<Json<Brand>, (StatusCode, String)> {
    let brand = state
        .store
        .create_brand(payload)
        .await
        .map_err(error_response)?;
    Ok(Json(brand))
}

pub async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<BrandId>,
    Json(payload): Json<BrandUpdate>,
) -> Result<Json<Brand>, (StatusCode, String)> {
    let brand = state
        .store
        .update_brand(id, payload)
        .await
        .map_err(error_response)?;
    Ok(Json(brand))
}

pub async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<BrandId>,
) -> Result<Json<Deleted>, (StatusCode, String)> {
    state.store.delete_brand(id).await.map_err(error_response)?;
    Ok(Json(Deleted { deleted: true }))
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

// ---- models ----------------------------------------------------------------

pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelWithBrand>>, (StatusCode, String)> {
    let models = state.store.list_models().await.map_err(error_response)?;
    Ok(Json(models))
}

pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<ModelId>,
) -> Result<Json<ModelDetail>, (StatusCode, String)> {
    let detail = state
        .store
        .model_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(crate::Error::ModelNotFound(id.to_string())))?;
    Ok(Json(detail))
}

pub async fn create_model(
    State(state): State<AppState>,
    Json(payload): Json<NewModel>,
) -> Result<Json<Model>, (StatusCode, String)> {
    let model = state
        .store
        .create_model(payload)
        .await
        .map_err(error_response)?;
    Ok(Json(model))
}

pub async fn update_model(
    State(state): State<AppState>,
    Path(id): Path<ModelId>,
    Json(payload): Json<ModelUpdate>,
) -> Result<Json<Model>, (StatusCode, String)> {
    let model = state
        .store
        .update_model(id, payload)
        .await
        .map_err(error_response)?;
    Ok(Json(model))
}

pub async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<ModelId>,
) -> Result<Json<Deleted>, (StatusCode, String)> {
    state.store.delete_model(id).await.map_err(error_response)?;
    Ok(Json(Deleted { deleted: true }))
}

// ---- variants --------------------------------------------------------------

pub async fn list_variants(
    State(state): State<AppState>,
) -> Result<Json<Vec<VariantHit>>, (StatusCode, String)> {
    let variants = state.store.list_variants().await.map_err(error_response)?;
    Ok(Json(variants))
}

pub async fn get_variant(
    State(state): State<AppState>,
    Path(id): Path<VariantId>,
) -> Result<Json<VariantHit>, (StatusCode, String)> {
    let hit = state
        .store
        .variant_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(crate::Error::VariantNotFound(id)))?;
    Ok(Json(hit))
}

pub async fn create_variant(
    State(state): State<AppState>,
    Json(payload): Json<NewVariant>,
) -> Result<Json<Variant>, (StatusCode, String)> {
    let variant = state
        .store
        .create_variant(payload)
        .await
        .map_err(error_response)?;
    Ok(Json(variant))
}

pub async fn update_variant(
    State(state): State<AppState>,
    Path(id): Path<VariantId>,
    Json(payload): Json<VariantUpdate>,
) -> Result<Json<Variant>, (StatusCode, String)> {
    let variant = state
        .store
        .update_variant(id, payload)
        .await
        .map_err(error_response)?;
    Ok(Json(variant))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceRequest {
    pub price: u64,
}

pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<VariantId>,
    Json(payload): Json<UpdatePriceRequest>,
) -> Result<Json<Variant>, (StatusCode, String)> {
    let variant = state
        .store
        .update_variant_price(id, payload.price)
        .await
        .map_err(error_response)?;
    Ok(Json(variant))
}

pub async fn delete_variant(
    State(state): State<AppState>,
    Path(id): Path<VariantId>,
) -> Result<Json<Deleted>, (StatusCode, String)> {
    state
        .store
        .delete_variant(id)
        .await
        .map_err(error_response)?;
    Ok(Json(Deleted { deleted: true }))
}
