// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query Representation
//!
//! This module represents SQL query statements in the IR.
//!
//! ## Query Structure
//!
//! A [`QueryStmt`] consists of an optional [`WithClause`] and a
//! [`SelectStatement`] body. The WITH clause holds an ordered, non-empty list
//! of [`View`] definitions; each view owns its subquery body, so a statement
//! is a self-contained value that can be cloned and re-analyzed at every
//! reference site.
//!
//! ## Scoping rules
//!
//! A WITH-clause view is visible inside the query statement it belongs to,
//! including inline views and nested WITH clauses inside that statement. A
//! view definition may refer to views from the same WITH clause appearing to
//! its left, and to views from outer scopes. References are resolved inside
//! out: the current scope is searched before the enclosing scope(s). Views
//! defined within the same WITH clause may not use the same alias.
//!
//! The scoping rules themselves are enforced by the semantic layer; this
//! module only carries the declaration order they depend on.
//!
//! ## Serialization
//!
//! Every node reconstructs canonical SQL via `to_sql`. View aliases are
//! quoted only when they cannot be parsed as bare identifiers, which keeps
//! persisted definitions readable by other engines speaking the interchange
//! dialect.

use serde::{Deserialize, Serialize};

use crate::ident;

/// A query statement: an optional WITH clause followed by a SELECT body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryStmt {
    /// WITH clause preceding the query body, if any
    pub with: Option<WithClause>,

    /// The SELECT body
    pub select: SelectStatement,
}

impl QueryStmt {
    pub fn new(select: SelectStatement) -> Self {
        Self { with: None, select }
    }

    /// Builder method: attach a WITH clause
    pub fn with_clause(mut self, with: WithClause) -> Self {
        self.with = Some(with);
        self
    }

    pub fn to_sql(&self) -> String {
        match &self.with {
            Some(with) => format!("{} {}", with.to_sql(), self.select.to_sql()),
            None => self.select.to_sql(),
        }
    }
}

/// A SELECT statement: projection list and FROM clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    /// DISTINCT modifier
    pub distinct: bool,

    /// SELECT clause items
    pub projection: Vec<SelectItem>,

    /// FROM clause table references
    pub from: Vec<TableRef>,
}

impl SelectStatement {
    /// Builder method: set the projection list
    pub fn with_projection(mut self, projection: Vec<SelectItem>) -> Self {
        self.projection = projection;
        self
    }

    /// Builder method: set the FROM clause
    pub fn with_from(mut self, from: Vec<TableRef>) -> Self {
        self.from = from;
        self
    }

    /// Builder method: set the DISTINCT modifier
    pub fn with_distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        let items: Vec<String> = self.projection.iter().map(SelectItem::to_sql).collect();
        sql.push_str(&items.join(", "));
        if !self.from.is_empty() {
            let tables: Vec<String> = self.from.iter().map(TableRef::to_sql).collect();
            sql.push_str(" FROM ");
            sql.push_str(&tables.join(", "));
        }
        sql
    }
}

/// An item in the SELECT clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectItem {
    /// Unqualified wildcard (`*`)
    Wildcard,
    /// Regular expression (e.g., `id`, `1`)
    UnnamedExpr(Expr),
    /// Expression with alias (e.g., `COUNT(*) AS total`)
    AliasedExpr { expr: Expr, alias: String },
}

impl SelectItem {
    pub fn to_sql(&self) -> String {
        match self {
            SelectItem::Wildcard => "*".to_string(),
            SelectItem::UnnamedExpr(expr) => expr.to_sql(),
            SelectItem::AliasedExpr { expr, alias } => {
                format!("{} AS {}", expr.to_sql(), ident::ident_sql(alias))
            }
        }
    }
}

/// Scalar expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Column(ColumnRef),
}

impl Expr {
    pub fn to_sql(&self) -> String {
        match self {
            Expr::Literal(literal) => literal.to_sql(),
            Expr::Column(column) => column.to_sql(),
        }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Integer(i64),
    String(String),
    Boolean(bool),
    Null,
}

impl Literal {
    pub fn to_sql(&self) -> String {
        match self {
            Literal::Integer(value) => value.to_string(),
            Literal::String(value) => format!("'{}'", value.replace('\'', "''")),
            Literal::Boolean(true) => "TRUE".to_string(),
            Literal::Boolean(false) => "FALSE".to_string(),
            Literal::Null => "NULL".to_string(),
        }
    }
}

/// A column reference, optionally table-qualified (`t.id` or `id`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Table qualifier, if any
    pub table: Option<String>,
    /// Column name
    pub column: String,
}

impl ColumnRef {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    /// Builder method: set the table qualifier
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn to_sql(&self) -> String {
        match &self.table {
            Some(table) => format!(
                "{}.{}",
                ident::ident_sql(table),
                ident::ident_sql(&self.column)
            ),
            None => ident::ident_sql(&self.column),
        }
    }
}

/// A table reference in the FROM clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    /// Referenced name: a WITH-clause view alias or a catalog table
    pub name: String,
    /// Table alias for the query, if any
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Builder method: set the alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn to_sql(&self) -> String {
        match &self.alias {
            Some(alias) => format!(
                "{} {}",
                ident::ident_sql(&self.name),
                ident::ident_sql(alias)
            ),
            None => ident::ident_sql(&self.name),
        }
    }
}

/// A named view definition inside a WITH clause.
///
/// The alias is the view's identity within its clause; the body is owned
/// exclusively by the view and is the unit that gets cloned and analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Alias the view is referenced by
    pub alias: String,

    /// The view's subquery body
    pub body: QueryStmt,
}

impl View {
    pub fn new(alias: impl Into<String>, body: QueryStmt) -> Self {
        Self {
            alias: alias.into(),
            body,
        }
    }

    /// Comparison key for duplicate detection and lookup
    pub fn normalized_alias(&self) -> String {
        ident::normalize(&self.alias)
    }

    /// Check if this view matches the given name under the normalization
    /// policy
    pub fn matches(&self, name: &str) -> bool {
        self.normalized_alias() == ident::normalize(name)
    }

    pub fn to_sql(&self) -> String {
        format!(
            "{} AS ({})",
            ident::ident_sql(&self.alias),
            self.body.to_sql()
        )
    }
}

/// The WITH clause that may appear before a query statement: an ordered,
/// non-empty list of view definitions.
///
/// Declaration order is semantically meaningful. It is the visibility order
/// (definition *i* may reference definitions 0..*i*-1) and the serialization
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithClause {
    views: Vec<View>,
}

impl WithClause {
    /// Create a WITH clause.
    ///
    /// # Panics
    ///
    /// Panics if `views` is empty; a WITH clause holds at least one view
    /// definition.
    pub fn new(views: Vec<View>) -> Self {
        assert!(
            !views.is_empty(),
            "WITH clause requires at least one view definition"
        );
        Self { views }
    }

    /// View definitions in declaration order
    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn to_sql(&self) -> String {
        let views: Vec<String> = self.views.iter().map(View::to_sql).collect();
        format!("WITH {}", views.join(","))
    }
}
