//! Catalog data providers
//!
//! The handler reads products through [`ProductProvider`] so that the fixed
//! in-memory catalog can later be replaced by a real data source without
//! touching routing or caching.

use super::{error::CatalogError, models::*};

/// Read-only source of the product list.
pub trait ProductProvider: Send + Sync {
    /// Returns the products in their stable display order.
    fn list_products(&self) -> Result<ProductList, CatalogError>;
}

/// The catalog compiled into the binary.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: ProductList,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            products: sample_products(),
        }
    }
}

impl ProductProvider for StaticCatalog {
    fn list_products(&self) -> Result<ProductList, CatalogError> {
        Ok(self.products.clone())
    }
}

/// Builds the sample product set: a laptop followed by headphones.
pub fn sample_products() -> ProductList {
    vec![
        Product::new(1, "Laptop", 1200.50, 25, Category::new(101, "Electronics")),
        Product::new(2, "Headphones", 50.00, 100, Category::new(102, "Accessories")),
    ]
}
