//! Product Catalog Domain Module
//!
//! This module contains everything behind the product list endpoint:
//! - Domain models (Product, Category)
//! - Catalog providers (the built-in static catalog)
//! - Application state management
//! - REST API handlers

pub mod error;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod state;

// Re-export commonly used types for convenience
pub use error::CatalogError;
pub use handlers::routes;
pub use models::{Category, Product, ProductList};
pub use provider::{ProductProvider, StaticCatalog};
pub use state::{AppState, SharedState};
