// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLFront - Catalog Layer
//!
//! This crate provides database schema abstraction for the SQLFront analyzer.
//! It defines the [`Catalog`] trait and re-exports the metadata types the
//! analyzer consumes:
//!
//! - [`TableMetadata`]: table information including columns and type
//! - [`ColumnMetadata`]: column details including type and nullability
//!
//! Catalog lookups are synchronous: statement analysis is single-threaded
//! with no suspension points, so implementations answer from memory or from
//! a cache they maintain themselves.
//!
//! ## Implementing the Catalog trait
//!
//! ```rust
//! use sqlfront_catalog::{Catalog, CatalogError, CatalogResult, TableMetadata};
//!
//! struct EmptyCatalog;
//!
//! impl Catalog for EmptyCatalog {
//!     fn list_tables(&self) -> CatalogResult<Vec<TableMetadata>> {
//!         Ok(Vec::new())
//!     }
//!
//!     fn get_table(&self, table: &str) -> CatalogResult<TableMetadata> {
//!         Err(CatalogError::TableNotFound(table.to_string()))
//!     }
//! }
//!
//! assert!(!EmptyCatalog.contains_table("users"));
//! ```

pub mod error;
pub mod metadata;
pub mod r#static;
pub mod r#trait;

// Re-exports
pub use error::{CatalogError, CatalogResult};
pub use metadata::{ColumnMetadata, DataType, TableMetadata, TableType};
pub use r#static::StaticCatalog;
pub use r#trait::Catalog;
