// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Error types for semantic analysis

use sqlfront_catalog::CatalogError;
use thiserror::Error;

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur during semantic analysis
///
/// All variants are terminal for the current statement's analysis pass; no
/// local recovery is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A table reference matched neither a visible view nor a catalog object
    #[error("Could not resolve table reference: {0}")]
    UnresolvedReference(String),

    /// Two view definitions in the same scope share an alias
    #[error("Duplicate table alias: {0}")]
    DuplicateAlias(String),

    /// Invalid scope reference (e.g., a dangling arena index)
    #[error("Invalid scope reference: {0}")]
    InvalidScope(String),

    /// The catalog failed for a reason other than a missing table
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
