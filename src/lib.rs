//! Showroom - a vehicle catalog service
//!
//! Showroom catalogs vehicle brands, models and purchasable variants and
//! answers two query classes:
//! - Faceted browsing of a brand's lineup under many simultaneous filters
//! - A "best match" recommendation over loose buyer constraints
//!
//! The filtering/recommendation engine in `query` is the core; storage,
//! HTTP routing, the admin surface, the image proxy and seeding are plumbing
//! around the `catalog::CatalogStore` trait.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod query;
pub mod seed;
pub mod specs;
pub mod types;

pub use error::{Error, Result};
