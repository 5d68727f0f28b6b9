// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Resolution records
//!
//! Analysis never rewrites the statement it was given. Each resolved table
//! reference instead emits a [`ResolvedReference`] record on the analyzer, so
//! a body cloned before or after analysis is identical to its source and can
//! be re-analyzed at every reference site.

use serde::{Deserialize, Serialize};

/// What a table reference resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedTarget {
    /// A WITH-clause view registered in the scope chain
    LocalView {
        /// Scope the matching view is registered in
        scope_id: usize,
        /// The view's declared alias
        alias: String,
    },
    /// A catalog object
    CatalogTable {
        /// Schema-qualified table name
        name: String,
    },
}

/// One resolved table reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReference {
    /// The reference as written in the statement
    pub reference: String,
    /// What it resolved to
    pub target: ResolvedTarget,
}
