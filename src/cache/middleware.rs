//! Output caching middleware
//!
//! Attached to individual routes with `route_layer`, so every route can carry
//! its own [`CachePolicy`].

use super::{
    policy::CachePolicy,
    store::{CacheKey, OutputCache},
};
use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// State handed to [`cache_output`]: the shared store and the route's policy.
#[derive(Clone)]
pub struct OutputCacheState {
    pub cache: Arc<OutputCache>,
    pub policy: CachePolicy,
}

impl OutputCacheState {
    pub fn new(cache: Arc<OutputCache>, policy: CachePolicy) -> Self {
        Self { cache, policy }
    }
}

/// Serves fresh entries from the cache and stores cacheable misses.
pub async fn cache_output(
    State(layer): State<OutputCacheState>,
    req: Request,
    next: Next,
) -> Response {
    if !layer.policy.allows_request(&req) {
        return next.run(req).await;
    }

    let key = CacheKey::from_request(&req);

    if let Some(hit) = layer.cache.get(&key) {
        tracing::debug!(path = %req.uri().path(), "output cache hit");
        return hit.to_response(layer.cache.now());
    }

    tracing::debug!(path = %req.uri().path(), "output cache miss");
    let response = next.run(req).await;

    if !layer.policy.allows_response(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();

    // Bodies known to exceed the limit are passed through uncached.
    let size_hint = body.size_hint();
    let limit = u64::try_from(layer.policy.max_body_bytes()).unwrap_or(u64::MAX);
    if size_hint.upper().unwrap_or_else(|| size_hint.lower()) > limit {
        tracing::debug!(limit, "response too large for output cache");
        return Response::from_parts(parts, body);
    }

    let body = match axum::body::to_bytes(body, layer.policy.max_body_bytes()).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "failed to buffer response for output cache");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if let Some(cache_control) = layer.policy.cache_control() {
        parts.headers.insert(header::CACHE_CONTROL, cache_control);
    }

    layer.cache.insert(
        key,
        parts.status,
        parts.headers.clone(),
        body.clone(),
        layer.policy.ttl(),
    );

    Response::from_parts(parts, Body::from(body))
}
