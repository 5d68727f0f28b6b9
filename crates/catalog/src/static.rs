// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Static Catalog
//!
//! This module provides a catalog implementation backed by predefined schema
//! data, used for tests and for embedding without a real database.

use std::collections::HashMap;

use sqlfront_ir::ident;

use crate::metadata::TableMetadata;
use crate::{Catalog, CatalogError, CatalogResult};

/// Catalog backed by predefined schema data.
///
/// Tables are keyed by normalized name, so lookups follow the same
/// case-folding rules as alias resolution.
///
/// # Examples
///
/// ```rust
/// use sqlfront_catalog::{Catalog, StaticCatalog, TableMetadata};
///
/// let catalog = StaticCatalog::new().with_table(TableMetadata::new("users", "shop"));
/// assert!(catalog.contains_table("users"));
/// assert!(catalog.contains_table("USERS"));
/// assert!(!catalog.contains_table("orders"));
/// ```
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    tables: HashMap<String, TableMetadata>,
}

impl StaticCatalog {
    /// Create an empty static catalog
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Builder method: add a table
    pub fn with_table(mut self, table: TableMetadata) -> Self {
        self.add_table(table);
        self
    }

    /// Add a table, replacing any existing table with the same normalized name
    pub fn add_table(&mut self, table: TableMetadata) {
        self.tables.insert(ident::normalize(&table.name), table);
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for StaticCatalog {
    fn list_tables(&self) -> CatalogResult<Vec<TableMetadata>> {
        Ok(self.tables.values().cloned().collect())
    }

    fn get_table(&self, table: &str) -> CatalogResult<TableMetadata> {
        self.tables
            .get(&ident::normalize(table))
            .cloned()
            .ok_or_else(|| CatalogError::TableNotFound(table.to_string()))
    }
}
