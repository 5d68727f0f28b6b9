// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # SQLFront - Semantic Analysis Layer
//!
//! This crate resolves WITH-clause view definitions against a hierarchical
//! scope tree and collects the authorization side-effects of doing so.
//!
//! ## Overview
//!
//! - **Scope tree**: an index-addressed arena of [`Scope`] records with
//!   lookup-only parent links; see [`ScopeManager`]
//! - **WITH-clause resolution**: strict left-to-right analysis of view
//!   definitions with inside-out reference lookup; see
//!   [`Analyzer::resolve_with_clause`]
//! - **Side-effects**: privilege requests and access events accumulate per
//!   scope and are replayed at the caller when a clause resolves; missing
//!   catalog objects merge into a root caller on every exit path
//! - **Resolution records**: analysis emits [`ResolvedReference`] records
//!   instead of annotating statement bodies, so cloned bodies are always
//!   pristine
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use sqlfront_catalog::{StaticCatalog, TableMetadata};
//! use sqlfront_ir::{QueryStmt, SelectItem, SelectStatement, TableRef, View, WithClause};
//! use sqlfront_semantic::{Analyzer, AuthorizationConfig, QueryContext};
//!
//! let catalog = Arc::new(StaticCatalog::new().with_table(TableMetadata::new("users", "shop")));
//! let mut analyzer = Analyzer::new(
//!     catalog,
//!     QueryContext::default(),
//!     AuthorizationConfig::default(),
//! );
//!
//! // WITH v AS (SELECT * FROM users) SELECT * FROM v
//! let body = QueryStmt::new(
//!     SelectStatement::default()
//!         .with_projection(vec![SelectItem::Wildcard])
//!         .with_from(vec![TableRef::new("users")]),
//! );
//! let stmt = QueryStmt::new(
//!     SelectStatement::default()
//!         .with_projection(vec![SelectItem::Wildcard])
//!         .with_from(vec![TableRef::new("v")]),
//! )
//! .with_clause(WithClause::new(vec![View::new("v", body)]));
//!
//! let root = analyzer.analyze_statement(&stmt).unwrap();
//!
//! // The object read inside the view body is authorized and audited at the
//! // statement level, as if the body were inlined at the reference site.
//! let scope = analyzer.scope_manager().get_scope(root).unwrap();
//! assert_eq!(scope.privilege_requests[0].object, "shop.users");
//! assert_eq!(scope.access_events.len(), 1);
//! ```

pub mod analyzer;
pub mod authz;
pub mod error;
pub mod resolution;
pub mod scope;

// Re-export commonly used types
pub use analyzer::{Analyzer, QueryContext};
pub use authz::{AccessEvent, AuthorizationConfig, Privilege, PrivilegeRequest};
pub use error::{AnalysisError, AnalysisResult};
pub use resolution::{ResolvedReference, ResolvedTarget};
pub use scope::{Scope, ScopeManager, ScopeType};
