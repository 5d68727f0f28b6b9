// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Unit tests for IR query representation and serialization

use sqlfront_ir::{
    ColumnRef, Expr, Literal, QueryStmt, SelectItem, SelectStatement, TableRef, View, WithClause,
};

fn select_one() -> QueryStmt {
    QueryStmt::new(
        SelectStatement::default()
            .with_projection(vec![SelectItem::UnnamedExpr(Expr::Literal(
                Literal::Integer(1),
            ))]),
    )
}

fn select_star_from(name: &str) -> QueryStmt {
    QueryStmt::new(
        SelectStatement::default()
            .with_projection(vec![SelectItem::Wildcard])
            .with_from(vec![TableRef::new(name)]),
    )
}

#[test]
fn test_select_to_sql() {
    assert_eq!(select_one().to_sql(), "SELECT 1");
    assert_eq!(select_star_from("a").to_sql(), "SELECT * FROM a");
}

#[test]
fn test_select_distinct_and_aliases() {
    let stmt = QueryStmt::new(
        SelectStatement::default()
            .with_distinct()
            .with_projection(vec![
                SelectItem::UnnamedExpr(Expr::Column(ColumnRef::new("id").with_table("u"))),
                SelectItem::AliasedExpr {
                    expr: Expr::Column(ColumnRef::new("name")),
                    alias: "user_name".to_string(),
                },
            ])
            .with_from(vec![TableRef::new("users").with_alias("u")]),
    );

    assert_eq!(
        stmt.to_sql(),
        "SELECT DISTINCT u.id, name AS user_name FROM users u"
    );
}

#[test]
fn test_literal_to_sql() {
    assert_eq!(Literal::Integer(42).to_sql(), "42");
    assert_eq!(Literal::String("it's".to_string()).to_sql(), "'it''s'");
    assert_eq!(Literal::Boolean(true).to_sql(), "TRUE");
    assert_eq!(Literal::Null.to_sql(), "NULL");
}

#[test]
fn test_with_clause_to_sql_quotes_only_non_bare_aliases() {
    let clause = WithClause::new(vec![
        View::new("a", select_one()),
        View::new("b-c", select_star_from("a")),
    ]);

    assert_eq!(
        clause.to_sql(),
        "WITH a AS (SELECT 1),\"b-c\" AS (SELECT * FROM a)"
    );
}

#[test]
fn test_with_clause_quotes_reserved_alias() {
    let clause = WithClause::new(vec![View::new("order", select_one())]);
    assert_eq!(clause.to_sql(), "WITH \"order\" AS (SELECT 1)");
}

#[test]
fn test_statement_with_clause_to_sql() {
    let stmt = select_star_from("a")
        .with_clause(WithClause::new(vec![View::new("a", select_one())]));
    assert_eq!(stmt.to_sql(), "WITH a AS (SELECT 1) SELECT * FROM a");
}

#[test]
fn test_clone_is_an_independent_structural_copy() {
    let original = select_star_from("users")
        .with_clause(WithClause::new(vec![View::new("v", select_one())]));
    let copy = original.clone();

    assert_eq!(copy, original);
    assert_eq!(copy.to_sql(), original.to_sql());

    // Mutating the original must not leak into the copy.
    let mut mutated = original;
    mutated.select.from.push(TableRef::new("orders"));
    assert_ne!(copy, mutated);
    assert_eq!(copy.to_sql(), "WITH v AS (SELECT 1) SELECT * FROM users");
}

#[test]
fn test_view_matching_follows_normalization_policy() {
    let view = View::new("Totals", select_one());
    assert!(view.matches("totals"));
    assert!(view.matches("TOTALS"));
    assert!(!view.matches("other"));

    let quoted = View::new("b-c", select_one());
    assert!(quoted.matches("b-c"));
    assert!(!quoted.matches("B-C"));
}

#[test]
fn test_query_serde_round_trip() {
    let stmt = select_star_from("a")
        .with_clause(WithClause::new(vec![View::new("a", select_one())]));

    let json = serde_json::to_string(&stmt).unwrap();
    let parsed: QueryStmt = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, stmt);
}

#[test]
#[should_panic(expected = "at least one view")]
fn test_with_clause_rejects_empty_view_list() {
    let _ = WithClause::new(Vec::new());
}
