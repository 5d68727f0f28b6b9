// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLFront - Intermediate Representation
//!
//! This crate defines the query representation the analyzer operates on:
//!
//! - **Query statements**: [`QueryStmt`] with an optional [`WithClause`] and a
//!   [`SelectStatement`] body
//! - **Named view definitions**: [`View`], an alias paired with an owned
//!   subquery body
//! - **Identifier handling**: quoting and normalization rules for the
//!   interchange dialect ([`ident`])
//! - **Schema metadata**: table and column metadata types consumed by the
//!   catalog layer ([`metadata`])
//!
//! Every type reconstructs canonical SQL text via `to_sql`, and every type is
//! a plain value: cloning a statement yields an independent structural copy
//! with no state shared with the source.
//!
//! ```rust
//! use sqlfront_ir::{QueryStmt, SelectItem, SelectStatement, TableRef, View, WithClause};
//!
//! let body = QueryStmt::new(
//!     SelectStatement::default()
//!         .with_projection(vec![SelectItem::Wildcard])
//!         .with_from(vec![TableRef::new("users")]),
//! );
//! let clause = WithClause::new(vec![View::new("active", body)]);
//! assert_eq!(clause.to_sql(), "WITH active AS (SELECT * FROM users)");
//! ```

pub mod ident;
pub mod metadata;
pub mod query;

// Re-export commonly used types
pub use metadata::{ColumnMetadata, DataType, TableMetadata, TableType};
pub use query::{
    ColumnRef, Expr, Literal, QueryStmt, SelectItem, SelectStatement, TableRef, View, WithClause,
};
