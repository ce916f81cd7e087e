//! In-memory output cache store
//!
//! Maps a request identity to a fully buffered response plus its expiry.
//! Entries live only as long as the process.

use super::clock::{Clock, SystemClock};
use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use dashmap::DashMap;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

// =============================================================================
// Cache Key
// =============================================================================

/// Identity of a request for caching purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    method: String,
    host: String,
    path: String,
    query: String,
}

impl CacheKey {
    pub fn new(
        method: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            host: host.into().to_ascii_lowercase(),
            path: path.into(),
            query: query.into(),
        }
    }

    /// Derives the key from method, host, path and query string.
    pub fn from_request(req: &Request) -> Self {
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| req.uri().host())
            .unwrap_or_default();

        Self::new(
            req.method().as_str(),
            host,
            req.uri().path(),
            req.uri().query().unwrap_or_default(),
        )
    }
}

// =============================================================================
// Cached Response
// =============================================================================

/// A response captured on a cache miss.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub stored_at: Instant,
    pub expires_at: Instant,
}

impl CachedResponse {
    pub fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    /// Rebuilds the stored response, adding an `Age` header for `now`.
    pub fn to_response(&self, now: Instant) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();

        let age = now.saturating_duration_since(self.stored_at).as_secs();
        response
            .headers_mut()
            .insert(header::AGE, HeaderValue::from(age));

        response
    }
}

// =============================================================================
// Output Cache
// =============================================================================

/// Thread-safe response cache with per-entry expiry.
///
/// Concurrent misses for the same key are not coalesced: each one runs the
/// handler and the last insert wins.
pub struct OutputCache {
    entries: DashMap<CacheKey, CachedResponse>,
    clock: Arc<dyn Clock>,
}

impl Default for OutputCache {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Returns a fresh entry for `key`, dropping it if it has expired.
    pub fn get(&self, key: &CacheKey) -> Option<CachedResponse> {
        let now = self.now();
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh(now) {
                return Some(entry.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| !entry.is_fresh(now));
        None
    }

    /// Stores a response that stays fresh for `ttl` from now.
    pub fn insert(
        &self,
        key: CacheKey,
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        ttl: Duration,
    ) -> CachedResponse {
        let stored_at = self.now();
        let entry = CachedResponse {
            status,
            headers,
            body,
            stored_at,
            expires_at: stored_at + ttl,
        };
        self.entries.insert(key, entry.clone());
        entry
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = self.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;

    const TTL: Duration = Duration::from_secs(60);

    fn key(path: &str) -> CacheKey {
        CacheKey::new("GET", "localhost", path, "")
    }

    fn cache_with_clock() -> (OutputCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (OutputCache::with_clock(clock.clone()), clock)
    }

    fn store(cache: &OutputCache, path: &str, body: &'static str) {
        cache.insert(
            key(path),
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from_static(body.as_bytes()),
            TTL,
        );
    }

    #[test]
    fn test_entry_fresh_until_ttl_elapses() {
        let (cache, clock) = cache_with_clock();
        store(&cache, "/a", "first");

        clock.advance(Duration::from_secs(59));
        let hit = cache.get(&key("/a")).expect("entry should still be fresh");
        assert_eq!(hit.body, Bytes::from_static(b"first"));

        clock.advance(Duration::from_secs(1));
        assert!(cache.get(&key("/a")).is_none());
        assert!(cache.is_empty(), "expired entry should be dropped on read");
    }

    #[test]
    fn test_insert_replaces_and_restarts_ttl() {
        let (cache, clock) = cache_with_clock();
        store(&cache, "/a", "first");

        clock.advance(Duration::from_secs(50));
        store(&cache, "/a", "second");

        clock.advance(Duration::from_secs(50));
        let hit = cache.get(&key("/a")).unwrap();
        assert_eq!(hit.body, Bytes::from_static(b"second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_purge_expired_keeps_fresh_entries() {
        let (cache, clock) = cache_with_clock();
        store(&cache, "/old", "old");

        clock.advance(Duration::from_secs(30));
        store(&cache, "/new", "new");

        clock.advance(Duration::from_secs(31));
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.get(&key("/new")).is_some());
        assert!(cache.get(&key("/old")).is_none());
    }

    #[test]
    fn test_key_normalizes_host_and_varies_by_query() {
        assert_eq!(
            CacheKey::new("GET", "Example.COM", "/p", ""),
            CacheKey::new("GET", "example.com", "/p", "")
        );
        assert_ne!(
            CacheKey::new("GET", "example.com", "/p", "a=1"),
            CacheKey::new("GET", "example.com", "/p", "a=2")
        );
    }

    #[test]
    fn test_to_response_reports_age() {
        let (cache, clock) = cache_with_clock();
        let entry = cache.insert(
            key("/a"),
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from_static(b"x"),
            TTL,
        );

        clock.advance(Duration::from_secs(12));
        let response = entry.to_response(cache.now());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::AGE], "12");
    }
}
