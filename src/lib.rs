//! Product Catalog Library
//!
//! This library provides a small HTTP service that serves a fixed product
//! catalog behind a 60-second output cache.

// Domain modules
pub mod cache;
pub mod catalog;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod telemetry;
