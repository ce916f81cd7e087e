//! Per-route output caching policy
//!
//! Decides which requests may be answered from the cache, which responses
//! may be stored, and how long they stay fresh.

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    response::Response,
};
use std::time::Duration;

/// Largest response body the cache will buffer (64 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Expiry and size limits applied to one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    ttl: Duration,
    max_body_bytes: usize,
}

impl CachePolicy {
    /// A policy whose entries expire `ttl` after they were generated.
    pub const fn expire(ttl: Duration) -> Self {
        Self {
            ttl,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Only anonymous `GET` requests are served from or stored in the cache.
    pub fn allows_request(&self, req: &Request) -> bool {
        req.method() == Method::GET && !req.headers().contains_key(header::AUTHORIZATION)
    }

    /// Only `200 OK` responses that do not set cookies are stored.
    pub fn allows_response(&self, res: &Response) -> bool {
        res.status() == StatusCode::OK && !res.headers().contains_key(header::SET_COOKIE)
    }

    /// `Cache-Control` value advertising the freshness window to clients.
    pub fn cache_control(&self) -> Option<HeaderValue> {
        HeaderValue::try_from(format!("public, max-age={}", self.ttl.as_secs())).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(method: Method) -> Request {
        Request::builder()
            .method(method)
            .uri("/api/productlist")
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_only_anonymous_get_is_cacheable() {
        let policy = CachePolicy::expire(Duration::from_secs(60));

        assert!(policy.allows_request(&request(Method::GET)));
        assert!(!policy.allows_request(&request(Method::POST)));
        assert!(!policy.allows_request(&request(Method::HEAD)));

        let mut authed = request(Method::GET);
        authed
            .headers_mut()
            .insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer x"));
        assert!(!policy.allows_request(&authed));
    }

    #[test]
    fn test_only_plain_ok_responses_are_stored() {
        let policy = CachePolicy::expire(Duration::from_secs(60));

        let ok = Response::new(Body::empty());
        assert!(policy.allows_response(&ok));

        let mut not_found = Response::new(Body::empty());
        *not_found.status_mut() = StatusCode::NOT_FOUND;
        assert!(!policy.allows_response(&not_found));

        let mut with_cookie = Response::new(Body::empty());
        with_cookie
            .headers_mut()
            .insert(header::SET_COOKIE, HeaderValue::from_static("a=b"));
        assert!(!policy.allows_response(&with_cookie));
    }

    #[test]
    fn test_cache_control_uses_ttl_seconds() {
        let policy = CachePolicy::expire(Duration::from_secs(60));
        assert_eq!(policy.cache_control().unwrap(), "public, max-age=60");
    }
}
