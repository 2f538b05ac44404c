//! HTTP API server

use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, patch};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::Error;

pub mod admin;
pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/brands", get(admin::list_brands).post(admin::create_brand))
        .route(
            "/brands/:id",
            get(admin::get_brand)
                .put(admin::update_brand)
                .delete(admin::delete_brand),
        )
        .route("/cars", get(admin::list_models).post(admin::create_model))
        .route(
            "/cars/:id",
            get(admin::get_model)
                .put(admin::update_model)
                .delete(admin::delete_model),
        )
        .route(
            "/variants",
            get(admin::list_variants).post(admin::create_variant),
        )
        .route(
            "/variants/:id",
            get(admin::get_variant)
                .put(admin::update_variant)
                .delete(admin::delete_variant),
        )
        .route("/variants/:id/price", patch(admin::update_price))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin::require_api_key,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/brands", get(handlers::get_brands))
        .route("/brands/:slug", get(handlers::get_brand))
        .route("/brands/:slug/cars", get(handlers::brand_lineup))
        .route("/cars", get(handlers::get_models))
        // Static segment outranks /cars/:slug, so "recommend" is never a slug.
        .route("/cars/recommend", get(handlers::recommend))
        .route("/cars/:slug", get(handlers::get_model))
        .route("/images/*path", get(handlers::get_image))
        .nest("/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map crate errors onto HTTP status codes.
pub(crate) fn error_response(err: Error) -> (StatusCode, String) {
    let status = match &err {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
