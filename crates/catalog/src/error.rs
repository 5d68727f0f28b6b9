// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during Catalog operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogError {
    /// Requested table was not found
    #[error("Table '{0}' not found in catalog")]
    TableNotFound(String),

    /// The catalog could not answer at all
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}
