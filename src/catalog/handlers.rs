//! REST API handlers for the product catalog
//!
//! This module implements the cached product list endpoint.

use super::{error::CatalogError, state::SharedState};
use crate::cache::{cache_output, CachePolicy, OutputCacheState};
use axum::{
    extract::State,
    http::header,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::time::Duration;

/// Path of the product list endpoint
pub const PRODUCT_LIST_PATH: &str = "/api/productlist";

/// How long a generated product list is served from the cache
pub const PRODUCT_LIST_TTL: Duration = Duration::from_secs(60);

/// Creates routes for catalog operations, with output caching applied
pub fn routes(state: &SharedState) -> Router<SharedState> {
    let cache_layer = OutputCacheState::new(
        state.output_cache.clone(),
        CachePolicy::expire(PRODUCT_LIST_TTL),
    );

    Router::new()
        .route(PRODUCT_LIST_PATH, get(get_product_list))
        .route_layer(middleware::from_fn_with_state(cache_layer, cache_output))
}

/// Endpoint: GET /api/productlist
/// Returns the catalog as a JSON array of products with nested categories.
async fn get_product_list(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, CatalogError> {
    let products = state.catalog.list_products()?;
    let body = serde_json::to_vec(&products)?;

    tracing::info!(count = products.len(), "generated product list");

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
