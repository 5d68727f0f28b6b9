// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Identifier quoting and normalization
//!
//! Serialized statements must stay parseable by other engines speaking the
//! interchange dialect, so an identifier is quoted on output only when it
//! cannot be written bare: a bare identifier starts with an ASCII letter or
//! underscore, continues with ASCII alphanumerics or underscores, and is not
//! a reserved word.
//!
//! Comparison uses a different rule than output: identifiers shaped like bare
//! identifiers compare case-insensitively (normalized to ASCII lowercase),
//! while identifiers that require quoting compare verbatim. Reserved words
//! affect quoting only, never comparison.

/// Reserved words of the interchange dialect, lowercase, sorted.
const RESERVED: &[&str] = &[
    "all", "and", "as", "by", "case", "cross", "distinct", "else", "end", "except", "from", "full",
    "group", "having", "inner", "insert", "intersect", "into", "join", "left", "limit", "not",
    "null", "offset", "on", "or", "order", "outer", "right", "select", "set", "table", "then",
    "union", "update", "values", "view", "when", "where", "with",
];

fn is_ident_shaped(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `name` can appear unquoted in serialized SQL.
pub fn is_bare_ident(name: &str) -> bool {
    if !is_ident_shaped(name) {
        return false;
    }
    let lowered = name.to_ascii_lowercase();
    RESERVED.binary_search(&lowered.as_str()).is_err()
}

/// Render an identifier for SQL output, quoting it only when it cannot be
/// parsed bare. Embedded double quotes are doubled.
///
/// ```rust
/// use sqlfront_ir::ident::ident_sql;
///
/// assert_eq!(ident_sql("users"), "users");
/// assert_eq!(ident_sql("b-c"), "\"b-c\"");
/// assert_eq!(ident_sql("select"), "\"select\"");
/// ```
pub fn ident_sql(name: &str) -> String {
    if is_bare_ident(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Comparison key for alias duplicate-detection and scope lookup.
///
/// Bare-shaped identifiers fold to ASCII lowercase; identifiers that need
/// quoting keep their exact spelling.
pub fn normalize(name: &str) -> String {
    if is_ident_shaped(name) {
        name.to_ascii_lowercase()
    } else {
        name.to_string()
    }
}
