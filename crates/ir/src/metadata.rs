// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata types for database schema information
//!
//! This module defines the types used to represent database schema metadata,
//! including tables and columns.

use serde::{Deserialize, Serialize};

/// SQL data types (unified across dialects)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DataType {
    // Numeric types
    Integer,
    BigInt,
    Decimal,
    Float,
    Double,

    // String types
    Varchar(Option<usize>),
    Char(Option<usize>),
    Text,

    // Date/Time types
    Date,
    Timestamp,

    // Boolean
    Boolean,

    // Unknown/Other (with original type name)
    Other(String),
}

/// Table type classification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableType {
    Table,
    View,
    MaterializedView,
    Other(String),
}

/// Metadata for a database column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: DataType,
    /// Whether the column is nullable
    pub nullable: bool,
    /// Column comment/description
    pub comment: Option<String>,
}

impl ColumnMetadata {
    /// Create a new column metadata with builder pattern
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
            comment: None,
        }
    }

    /// Builder method: set nullable
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Builder method: set comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Metadata for a database table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Schema the table belongs to
    pub schema: String,
    /// Table name
    pub name: String,
    /// Table type classification
    pub table_type: TableType,
    /// Column metadata
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    /// Create a new table metadata with builder pattern
    pub fn new(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            table_type: TableType::Table,
            columns: Vec::new(),
        }
    }

    /// Builder method: set columns
    pub fn with_columns(mut self, columns: Vec<ColumnMetadata>) -> Self {
        self.columns = columns;
        self
    }

    /// Builder method: set table type
    pub fn with_table_type(mut self, table_type: TableType) -> Self {
        self.table_type = table_type;
        self
    }

    /// Schema-qualified name, `schema.table`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_metadata_builder() {
        let table = TableMetadata::new("users", "shop").with_columns(vec![
            ColumnMetadata::new("id", DataType::Integer),
            ColumnMetadata::new("name", DataType::Text).with_nullable(true),
        ]);

        assert_eq!(table.qualified_name(), "shop.users");
        assert_eq!(table.table_type, TableType::Table);
        assert_eq!(table.columns.len(), 2);
        assert!(table.columns[1].nullable);
    }
}
