// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Scope management for semantic analysis
//!
//! This module defines the scope records and the scope manager used to track
//! WITH-clause views and their visibility across nested statements.
//!
//! Scopes form a tree for the duration of one statement's analysis. A scope
//! owns its local view bindings and its accumulated side-effect logs; the
//! parent link is a lookup-only back-reference stored as an arena index.
//! Parents never enumerate children and children never own parents; data
//! moves upward only through the explicit merge operations on
//! [`ScopeManager`].

use std::collections::BTreeSet;
use std::mem;

use serde::{Deserialize, Serialize};
use sqlfront_ir::View;

use crate::authz::{AccessEvent, PrivilegeRequest};
use crate::error::{AnalysisError, AnalysisResult};

/// Role a scope was created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeType {
    /// Scope owned by an enclosing statement
    Statement,
    /// Scope a WITH clause registers its views into
    WithClause,
    /// Transient scope a single view body is analyzed in
    View,
}

/// A node in the analysis scope tree
///
/// Lookups fall back to the parent scope; registration and the side-effect
/// logs are strictly local until an explicit merge moves them upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    /// Unique identifier for this scope
    pub id: usize,

    /// Parent scope ID (if any); lookup fallback only
    pub parent_id: Option<usize>,

    /// Role of this scope
    pub scope_type: ScopeType,

    /// Whether this scope is the top of a statement's symbol space
    is_root: bool,

    /// Whether the statement is being analyzed under EXPLAIN
    is_explain: bool,

    /// Views registered in this scope, in registration order
    pub views: Vec<View>,

    /// Privilege requests recorded while analyzing under this scope
    pub privilege_requests: Vec<PrivilegeRequest>,

    /// Access audit events recorded while analyzing under this scope
    pub access_events: Vec<AccessEvent>,

    /// Referenced catalog objects the catalog does not know
    pub missing_objects: BTreeSet<String>,
}

impl Scope {
    /// Create a new scope.
    ///
    /// `is_root` marks the top of a whole statement's symbol space. It is
    /// supplied explicitly by the caller, never inferred from context.
    pub fn new(id: usize, scope_type: ScopeType, is_root: bool) -> Self {
        Self {
            id,
            parent_id: None,
            scope_type,
            is_root,
            is_explain: false,
            views: Vec::new(),
            privilege_requests: Vec::new(),
            access_events: Vec::new(),
            missing_objects: BTreeSet::new(),
        }
    }

    /// Set the parent scope
    pub fn with_parent(mut self, parent_id: usize) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// True when no ancestor ties this scope to an enclosing statement's
    /// symbol space
    pub fn is_root_analyzer(&self) -> bool {
        self.is_root
    }

    pub fn is_explain(&self) -> bool {
        self.is_explain
    }

    pub fn set_explain(&mut self) {
        self.is_explain = true;
    }

    /// Find a view by alias in this scope's own bindings only
    pub fn find_view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.matches(name))
    }

    /// Register a view in this scope's own bindings.
    ///
    /// Fails with `DuplicateAlias` if a view with the same normalized alias
    /// is already registered *here*. Bindings in ancestor scopes do not
    /// count; shadowing an outer definition is legal.
    pub fn register_local_view(&mut self, view: View) -> AnalysisResult<()> {
        let key = view.normalized_alias();
        if self.views.iter().any(|v| v.normalized_alias() == key) {
            return Err(AnalysisError::DuplicateAlias(view.alias.clone()));
        }
        self.views.push(view);
        Ok(())
    }
}

/// Manages the scope tree of one statement's analysis
///
/// Scopes live in an index-addressed arena; a scope's parent is stored as an
/// index into the same arena. Independent statements use disjoint managers,
/// so no synchronization is needed between them.
#[derive(Debug, Clone)]
pub struct ScopeManager {
    /// All scopes managed by this manager
    scopes: Vec<Scope>,

    /// Next scope ID to assign
    next_id: usize,
}

impl ScopeManager {
    /// Create a new scope manager
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            next_id: 0,
        }
    }

    /// Create a scope.
    ///
    /// A child scope inherits `is_explain` from its parent at construction
    /// time.
    pub fn create_scope(
        &mut self,
        scope_type: ScopeType,
        parent_id: Option<usize>,
        is_root: bool,
    ) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        let mut scope = Scope::new(id, scope_type, is_root);
        if let Some(parent) = parent_id {
            scope = scope.with_parent(parent);
            if self.scopes.get(parent).is_some_and(Scope::is_explain) {
                scope.set_explain();
            }
        }

        self.scopes.push(scope);
        id
    }

    /// Get a scope by ID
    pub fn get_scope(&self, id: usize) -> Option<&Scope> {
        self.scopes.get(id)
    }

    /// Get a mutable reference to a scope by ID
    pub fn get_scope_mut(&mut self, id: usize) -> Option<&mut Scope> {
        self.scopes.get_mut(id)
    }

    /// Get the total number of scopes
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    fn scope_ref(&self, id: usize) -> AnalysisResult<&Scope> {
        self.scopes
            .get(id)
            .ok_or_else(|| AnalysisError::InvalidScope(format!("scope {}", id)))
    }

    fn scope_mut_ref(&mut self, id: usize) -> AnalysisResult<&mut Scope> {
        self.scopes
            .get_mut(id)
            .ok_or_else(|| AnalysisError::InvalidScope(format!("scope {}", id)))
    }

    /// Look up a view by alias, searching inside out from `scope_id`.
    ///
    /// The starting scope's own bindings are checked first, then each
    /// ancestor in turn; the first match wins, so an inner redefinition of an
    /// alias hides an outer one for all lookups performed from inside or
    /// below the inner scope. Returns the defining scope's ID together with
    /// the view.
    pub fn lookup_view(&self, name: &str, scope_id: usize) -> AnalysisResult<Option<(usize, &View)>> {
        let mut current_id = Some(scope_id);

        while let Some(id) = current_id {
            let scope = self.scope_ref(id)?;
            if let Some(view) = scope.find_view(name) {
                return Ok(Some((id, view)));
            }
            current_id = scope.parent_id;
        }

        Ok(None)
    }

    /// Resolve a view by alias, reporting an unresolved reference on a miss
    /// at the root
    pub fn resolve_view(&self, name: &str, scope_id: usize) -> AnalysisResult<(usize, &View)> {
        self.lookup_view(name, scope_id)?
            .ok_or_else(|| AnalysisError::UnresolvedReference(name.to_string()))
    }

    /// Fold a discarded scope's logs into an ancestor.
    ///
    /// Moves privilege requests, access events, and missing-object
    /// diagnostics; runs whether or not analysis under `from` succeeded.
    pub fn fold_logs(&mut self, from: usize, to: usize) -> AnalysisResult<()> {
        let source = self.scope_mut_ref(from)?;
        let requests = mem::take(&mut source.privilege_requests);
        let events = mem::take(&mut source.access_events);
        let missing = mem::take(&mut source.missing_objects);

        let target = self.scope_mut_ref(to)?;
        target.privilege_requests.extend(requests);
        target.access_events.extend(events);
        target.missing_objects.extend(missing);
        Ok(())
    }

    /// Merge only missing-object diagnostics from `from` into `to`
    pub fn merge_missing_objects(&mut self, from: usize, to: usize) -> AnalysisResult<()> {
        let missing = mem::take(&mut self.scope_mut_ref(from)?.missing_objects);
        self.scope_mut_ref(to)?.missing_objects.extend(missing);
        Ok(())
    }

    /// Move a base scope's bindings and authorization side-effects up to the
    /// caller scope.
    ///
    /// Views are registered into `to` (duplicate aliases there still fail);
    /// privilege requests and access events are appended. Missing-object
    /// diagnostics are not touched; they merge separately so they survive
    /// failed resolutions too.
    pub fn propagate_to_caller(&mut self, from: usize, to: usize) -> AnalysisResult<()> {
        let source = self.scope_mut_ref(from)?;
        let views = mem::take(&mut source.views);
        let requests = mem::take(&mut source.privilege_requests);
        let events = mem::take(&mut source.access_events);

        let target = self.scope_mut_ref(to)?;
        for view in views {
            target.register_local_view(view)?;
        }
        target.privilege_requests.extend(requests);
        target.access_events.extend(events);
        Ok(())
    }
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlfront_ir::{Expr, Literal, QueryStmt, SelectItem, SelectStatement};

    fn view(alias: &str) -> View {
        let body = QueryStmt::new(SelectStatement::default().with_projection(vec![
            SelectItem::UnnamedExpr(Expr::Literal(Literal::Integer(1))),
        ]));
        View::new(alias, body)
    }

    #[test]
    fn test_register_duplicate_alias_error() {
        let mut scope = Scope::new(0, ScopeType::WithClause, false);
        scope.register_local_view(view("v")).unwrap();

        let result = scope.register_local_view(view("v"));
        assert_eq!(
            result.unwrap_err(),
            AnalysisError::DuplicateAlias("v".to_string())
        );
    }

    #[test]
    fn test_register_duplicate_is_case_insensitive_for_bare_aliases() {
        let mut scope = Scope::new(0, ScopeType::WithClause, false);
        scope.register_local_view(view("foo")).unwrap();

        let result = scope.register_local_view(view("FOO"));
        assert!(matches!(result, Err(AnalysisError::DuplicateAlias(_))));
    }

    #[test]
    fn test_register_quoted_style_aliases_stay_distinct() {
        let mut scope = Scope::new(0, ScopeType::WithClause, false);
        scope.register_local_view(view("b-c")).unwrap();
        scope.register_local_view(view("B-C")).unwrap();
        assert_eq!(scope.views.len(), 2);
    }

    #[test]
    fn test_lookup_falls_back_to_parent() {
        let mut manager = ScopeManager::new();
        let parent = manager.create_scope(ScopeType::Statement, None, true);
        let child = manager.create_scope(ScopeType::WithClause, Some(parent), false);

        manager
            .get_scope_mut(parent)
            .unwrap()
            .register_local_view(view("outer"))
            .unwrap();

        let (found_in, found) = manager.resolve_view("outer", child).unwrap();
        assert_eq!(found_in, parent);
        assert_eq!(found.alias, "outer");
    }

    #[test]
    fn test_lookup_inner_definition_shadows_outer() {
        let mut manager = ScopeManager::new();
        let parent = manager.create_scope(ScopeType::Statement, None, true);
        let child = manager.create_scope(ScopeType::WithClause, Some(parent), false);

        manager
            .get_scope_mut(parent)
            .unwrap()
            .register_local_view(view("v"))
            .unwrap();
        manager
            .get_scope_mut(child)
            .unwrap()
            .register_local_view(view("v"))
            .unwrap();

        // First match wins from the inside out.
        let (found_in, _) = manager.resolve_view("v", child).unwrap();
        assert_eq!(found_in, child);

        // Lookups from the parent still see the outer definition.
        let (found_in, _) = manager.resolve_view("v", parent).unwrap();
        assert_eq!(found_in, parent);
    }

    #[test]
    fn test_lookup_miss_at_root_is_unresolved_reference() {
        let mut manager = ScopeManager::new();
        let root = manager.create_scope(ScopeType::Statement, None, true);

        let result = manager.resolve_view("nope", root);
        assert_eq!(
            result.unwrap_err(),
            AnalysisError::UnresolvedReference("nope".to_string())
        );
    }

    #[test]
    fn test_lookup_dangling_scope_is_invalid_scope() {
        let manager = ScopeManager::new();
        let result = manager.resolve_view("v", 7);
        assert!(matches!(result, Err(AnalysisError::InvalidScope(_))));
    }

    #[test]
    fn test_child_inherits_explain_flag() {
        let mut manager = ScopeManager::new();
        let parent = manager.create_scope(ScopeType::Statement, None, true);
        manager.get_scope_mut(parent).unwrap().set_explain();

        let child = manager.create_scope(ScopeType::View, Some(parent), false);
        assert!(manager.get_scope(child).unwrap().is_explain());
    }

    #[test]
    fn test_fold_logs_moves_all_side_effects() {
        let mut manager = ScopeManager::new();
        let base = manager.create_scope(ScopeType::WithClause, None, true);
        let transient = manager.create_scope(ScopeType::View, Some(base), false);

        {
            let scope = manager.get_scope_mut(transient).unwrap();
            scope
                .privilege_requests
                .push(crate::authz::PrivilegeRequest::select_on("shop.users"));
            scope.missing_objects.insert("t1".to_string());
        }

        manager.fold_logs(transient, base).unwrap();

        let base_scope = manager.get_scope(base).unwrap();
        assert_eq!(base_scope.privilege_requests.len(), 1);
        assert!(base_scope.missing_objects.contains("t1"));
        assert!(manager.get_scope(transient).unwrap().missing_objects.is_empty());
    }

    #[test]
    fn test_propagate_to_caller_registers_views_and_keeps_diagnostics() {
        let mut manager = ScopeManager::new();
        let caller = manager.create_scope(ScopeType::Statement, None, true);
        let base = manager.create_scope(ScopeType::WithClause, None, true);

        {
            let scope = manager.get_scope_mut(base).unwrap();
            scope.register_local_view(view("v")).unwrap();
            scope.missing_objects.insert("t1".to_string());
        }

        manager.propagate_to_caller(base, caller).unwrap();

        assert!(manager.get_scope(caller).unwrap().find_view("v").is_some());
        // Diagnostics stay behind; they merge on a separate path.
        assert!(manager.get_scope(caller).unwrap().missing_objects.is_empty());
        assert!(manager.get_scope(base).unwrap().missing_objects.contains("t1"));
    }
}
