//! Product Catalog Domain Models
//!
//! This module contains the data structures served by the catalog endpoint.

use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog Domain Models
// =============================================================================

/// A classification group, embedded by value into each product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Positive identifier of the category
    pub id: u32,

    /// Display name of the category
    pub name: String,
}

/// A sellable item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Positive identifier, unique within the catalog
    pub id: u32,

    /// Display name of the product
    pub name: String,

    /// Unit price
    pub price: f64,

    /// Units in stock
    pub stock: u32,

    /// Category copied inline into the product
    pub category: Category,
}

/// Ordered sequence of products returned by the product list endpoint
pub type ProductList = Vec<Product>;

impl Category {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Product {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: f64,
        stock: u32,
        category: Category,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            category,
        }
    }

    /// Returns true when the product and its category carry positive ids,
    /// non-empty names and a non-negative price.
    pub fn is_well_formed(&self) -> bool {
        self.id > 0
            && !self.name.is_empty()
            && self.price >= 0.0
            && self.category.id > 0
            && !self.category.name.is_empty()
    }
}
