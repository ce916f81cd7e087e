//! Output Cache Module
//!
//! This module contains the response cache used by cached routes:
//! - Time sources (system and manual clocks)
//! - Per-route cache policy
//! - The in-memory store
//! - The axum middleware that ties them together

pub mod clock;
pub mod middleware;
pub mod policy;
pub mod store;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use middleware::{cache_output, OutputCacheState};
pub use policy::CachePolicy;
pub use store::{CacheKey, CachedResponse, OutputCache};

use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

/// Spawns a task that drops expired entries every `every`.
pub fn spawn_purge_task(cache: Arc<OutputCache>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = cache.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, remaining = cache.len(), "purged expired cache entries");
            }
        }
    })
}
