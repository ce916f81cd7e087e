//! Product Catalog State Management
//!
//! This module holds the application state shared by every request: the
//! product provider and the output cache.

use super::provider::{ProductProvider, StaticCatalog};
use crate::cache::{Clock, OutputCache, SystemClock};
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing the catalog source and response cache
pub struct AppState {
    /// Source of the product list.
    pub catalog: Arc<dyn ProductProvider>,

    /// Process-local response cache.
    /// DashMap-backed, so handlers share it without external Mutexes.
    pub output_cache: Arc<OutputCache>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state serving the built-in catalog on the system clock
    pub fn new() -> Self {
        Self::with_parts(Arc::new(StaticCatalog::new()), Arc::new(SystemClock))
    }

    /// Creates state from an explicit provider and clock
    pub fn with_parts(catalog: Arc<dyn ProductProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            output_cache: Arc::new(OutputCache::with_clock(clock)),
        }
    }
}
