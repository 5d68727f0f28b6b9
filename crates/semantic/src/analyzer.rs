// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Semantic Analyzer
//!
//! This module implements statement analysis and the WITH-clause resolver.
//!
//! ## WITH-clause scoping rules
//!
//! Each WITH clause establishes a new analysis scope. A view definition may
//! refer to views from the same clause appearing to its left, and to views
//! from outer scopes. References are resolved inside out: a match is found by
//! first looking in the current scope and then in the enclosing scope(s).
//! Views defined within the same clause may not use the same alias.
//!
//! ## Side-effect propagation
//!
//! A resolved reference to a WITH-clause view generates no per-access audit
//! or privilege records of its own, so the records produced while analyzing
//! the view bodies are replayed at the caller's scope once the clause
//! resolves. Missing-object diagnostics take a different path: they merge
//! into a root caller on *every* exit, success or failure, so one analysis
//! pass reports all missing objects discovered in the clause.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlfront_catalog::{Catalog, CatalogError};
use sqlfront_ir::{ident, QueryStmt, TableRef, WithClause};
use tracing::debug;

use crate::authz::{AccessEvent, AuthorizationConfig, Privilege, PrivilegeRequest};
use crate::error::{AnalysisError, AnalysisResult};
use crate::resolution::{ResolvedReference, ResolvedTarget};
use crate::scope::{ScopeManager, ScopeType};

/// Session values carried for collaborators.
///
/// The analyzer stores and forwards these; it does not interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryContext {
    /// Database used to qualify unqualified references, by convention
    pub default_db: String,
    /// Effective user for the session
    pub user: String,
}

impl QueryContext {
    pub fn new(default_db: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            default_db: default_db.into(),
            user: user.into(),
        }
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new("default", "anonymous")
    }
}

/// Semantic analyzer for one statement
///
/// Owns the scope arena for the statement, the resolution records produced
/// by analysis, and the ambient values (catalog handle, query context,
/// authorization configuration) every scope of the statement shares.
pub struct Analyzer {
    /// Catalog for table existence and shape
    catalog: Arc<dyn Catalog>,

    /// Opaque session values, forwarded not interpreted
    query_ctx: QueryContext,

    /// Opaque authorization configuration, forwarded not interpreted
    authz_config: AuthorizationConfig,

    /// Scope arena for the statement being analyzed
    scopes: ScopeManager,

    /// One record per resolved table reference, in resolution order
    resolutions: Vec<ResolvedReference>,
}

impl Analyzer {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        query_ctx: QueryContext,
        authz_config: AuthorizationConfig,
    ) -> Self {
        Self {
            catalog,
            query_ctx,
            authz_config,
            scopes: ScopeManager::new(),
            resolutions: Vec::new(),
        }
    }

    /// Analyze one statement, creating its root scope.
    ///
    /// Returns the root scope ID; the root scope carries the statement's
    /// view bindings, privilege requests, access events, and missing-object
    /// diagnostics after analysis.
    pub fn analyze_statement(&mut self, stmt: &QueryStmt) -> AnalysisResult<usize> {
        let root = self.scopes.create_scope(ScopeType::Statement, None, true);
        self.analyze_query(stmt, root)?;
        Ok(root)
    }

    /// Create a fresh root scope without analyzing anything yet
    pub fn new_root_scope(&mut self) -> usize {
        self.scopes.create_scope(ScopeType::Statement, None, true)
    }

    /// Mark a scope as analyzing under EXPLAIN
    pub fn set_explain(&mut self, scope: usize) -> AnalysisResult<()> {
        self.scopes
            .get_scope_mut(scope)
            .ok_or_else(|| AnalysisError::InvalidScope(format!("scope {}", scope)))?
            .set_explain();
        Ok(())
    }

    /// Analyze a query in an existing scope: resolve its WITH clause, then
    /// its own table references
    pub fn analyze_query(&mut self, stmt: &QueryStmt, scope: usize) -> AnalysisResult<()> {
        if let Some(clause) = &stmt.with {
            self.resolve_with_clause(clause, scope)?;
        }
        for table_ref in &stmt.select.from {
            self.resolve_table_ref(table_ref, scope)?;
        }
        Ok(())
    }

    /// Resolve a WITH clause against a caller scope.
    ///
    /// On success the caller scope gains the clause's view bindings and the
    /// side-effects recorded while analyzing their bodies. On failure the
    /// error propagates unchanged, but for a root caller the missing-object
    /// diagnostics merge first, on every exit path.
    pub fn resolve_with_clause(
        &mut self,
        clause: &WithClause,
        caller: usize,
    ) -> AnalysisResult<()> {
        let caller_scope = self
            .scopes
            .get_scope(caller)
            .ok_or_else(|| AnalysisError::InvalidScope(format!("scope {}", caller)))?;
        let caller_is_root = caller_scope.is_root_analyzer();
        let caller_is_explain = caller_scope.is_explain();

        // A top-level clause resolves its views in an independent scope: its
        // definitions must be reachable from the statement only through
        // explicit reference resolution, and must not chain into an
        // unrelated ancestor. A nested clause becomes a child of the caller
        // so its view bodies can still see views registered by an ancestor.
        let base = if caller_is_root {
            self.scopes.create_scope(ScopeType::WithClause, None, true)
        } else {
            self.scopes
                .create_scope(ScopeType::WithClause, Some(caller), false)
        };
        if caller_is_explain {
            if let Some(scope) = self.scopes.get_scope_mut(base) {
                scope.set_explain();
            }
        }
        debug!(
            views = clause.views().len(),
            base, caller, "resolving WITH clause"
        );

        self.record_missing_objects(clause, base)?;

        let outcome = self.analyze_views(clause, base, caller);

        // The diagnostic merge runs on every exit path, so a single
        // top-level pass reports all missing objects discovered in the
        // clause, not only those seen before the first failure.
        if caller_is_root {
            self.scopes.merge_missing_objects(base, caller)?;
        }
        outcome
    }

    /// Analyze each view in declaration order and, if all resolve, move the
    /// results up to the caller
    fn analyze_views(
        &mut self,
        clause: &WithClause,
        base: usize,
        caller: usize,
    ) -> AnalysisResult<()> {
        for view in clause.views() {
            // Each body gets a fresh transient scope: it sees the views
            // registered so far plus everything the base scope can see, and
            // nothing of its siblings.
            let view_scope = self.scopes.create_scope(ScopeType::View, Some(base), false);
            let analyzed = self.analyze_query(&view.body, view_scope);
            // The transient scope is discarded either way; its logs survive
            // it.
            self.scopes.fold_logs(view_scope, base)?;
            analyzed?;

            // Register this view so the views to its right can reference it.
            self.scopes
                .get_scope_mut(base)
                .ok_or_else(|| AnalysisError::InvalidScope(format!("scope {}", base)))?
                .register_local_view(view.clone())?;
            debug!(alias = %view.alias, base, "registered WITH-clause view");
        }

        self.scopes.propagate_to_caller(base, caller)
    }

    /// Resolve one table reference in a scope.
    ///
    /// WITH-clause views shadow catalog tables. A view hit produces only a
    /// resolution record; a catalog hit also records a privilege request and
    /// an access event on the scope.
    fn resolve_table_ref(&mut self, table_ref: &TableRef, scope: usize) -> AnalysisResult<()> {
        let view_hit = self
            .scopes
            .lookup_view(&table_ref.name, scope)?
            .map(|(scope_id, view)| (scope_id, view.alias.clone()));

        if let Some((scope_id, alias)) = view_hit {
            self.resolutions.push(ResolvedReference {
                reference: table_ref.name.clone(),
                target: ResolvedTarget::LocalView { scope_id, alias },
            });
            return Ok(());
        }

        match self.catalog.get_table(&table_ref.name) {
            Ok(table) => {
                let object = table.qualified_name();
                self.resolutions.push(ResolvedReference {
                    reference: table_ref.name.clone(),
                    target: ResolvedTarget::CatalogTable {
                        name: object.clone(),
                    },
                });
                let target = self
                    .scopes
                    .get_scope_mut(scope)
                    .ok_or_else(|| AnalysisError::InvalidScope(format!("scope {}", scope)))?;
                target
                    .privilege_requests
                    .push(PrivilegeRequest::select_on(object.clone()));
                target.access_events.push(AccessEvent {
                    object,
                    object_type: table.table_type,
                    privilege: Privilege::Select,
                });
                Ok(())
            }
            Err(CatalogError::TableNotFound(_)) => Err(AnalysisError::UnresolvedReference(
                table_ref.name.clone(),
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Record on `base` every catalog object referenced anywhere in the
    /// clause that the catalog does not know.
    ///
    /// Runs before per-view analysis, which stops at the first unresolved
    /// reference. Names bound as clause aliases (including nested clauses)
    /// and names resolvable through the base scope's chain are not catalog
    /// objects and are skipped. This pre-pass is the only writer of
    /// `missing_objects`.
    fn record_missing_objects(&mut self, clause: &WithClause, base: usize) -> AnalysisResult<()> {
        let mut bound = HashSet::new();
        let mut referenced = Vec::new();

        for view in clause.views() {
            bound.insert(view.normalized_alias());
        }
        for view in clause.views() {
            collect_table_names(&view.body, &mut bound, &mut referenced);
        }

        for name in referenced {
            if bound.contains(&name) {
                continue;
            }
            if self.scopes.lookup_view(&name, base)?.is_some() {
                continue;
            }
            if self.catalog.contains_table(&name) {
                continue;
            }
            debug!(object = %name, base, "referenced object missing from catalog");
            self.scopes
                .get_scope_mut(base)
                .ok_or_else(|| AnalysisError::InvalidScope(format!("scope {}", base)))?
                .missing_objects
                .insert(name);
        }
        Ok(())
    }

    /// Scope manager for the statement
    pub fn scope_manager(&self) -> &ScopeManager {
        &self.scopes
    }

    /// Resolution records produced so far, in resolution order
    pub fn resolutions(&self) -> &[ResolvedReference] {
        &self.resolutions
    }

    /// Session values the analyzer was constructed with
    pub fn query_ctx(&self) -> &QueryContext {
        &self.query_ctx
    }

    /// Authorization configuration the analyzer was constructed with
    pub fn authz_config(&self) -> &AuthorizationConfig {
        &self.authz_config
    }

    /// Catalog handle the analyzer was constructed with
    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }
}

/// Collect normalized table names referenced by `stmt`, recursively.
///
/// Aliases bound by nested WITH clauses are added to `bound` rather than
/// reported as references.
fn collect_table_names(stmt: &QueryStmt, bound: &mut HashSet<String>, out: &mut Vec<String>) {
    if let Some(clause) = &stmt.with {
        for view in clause.views() {
            bound.insert(view.normalized_alias());
        }
        for view in clause.views() {
            collect_table_names(&view.body, bound, out);
        }
    }
    for table_ref in &stmt.select.from {
        out.push(ident::normalize(&table_ref.name));
    }
}
