// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog trait for database schema abstraction

use crate::error::CatalogResult;
use crate::metadata::TableMetadata;

/// Catalog trait for database schema abstraction
///
/// This trait provides the interface the analyzer uses to ask whether a named
/// object exists and what shape it has. Implementations can read from static
/// definitions, from a snapshot of a live database, or from a cache.
///
/// # Examples
///
/// ```rust,ignore
/// fn print_tables(catalog: &dyn Catalog) -> Result<(), CatalogError> {
///     for table in catalog.list_tables()? {
///         println!("{}", table.qualified_name());
///     }
///     Ok(())
/// }
/// ```
pub trait Catalog: Send + Sync {
    /// List all tables known to this catalog
    fn list_tables(&self) -> CatalogResult<Vec<TableMetadata>>;

    /// Get metadata for a named table
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TableNotFound` if the table doesn't exist.
    /// Returns `CatalogError::Unavailable` if the catalog cannot answer.
    fn get_table(&self, table: &str) -> CatalogResult<TableMetadata>;

    /// Whether a named table exists in this catalog
    fn contains_table(&self, table: &str) -> bool {
        self.get_table(table).is_ok()
    }
}
