//! Rename planning over a scope tree.
//!
//! Assigns a replacement to every renamable symbol by:
//! 1. Preserving every name that must stay verbatim (undeclared globals,
//!    reserved names, global bindings unless `rename_globals` is set,
//!    bindings in scopes tainted by `eval`/`with`)
//! 2. Walking scopes top-down and asking the generator for a global-scope,
//!    lexical-scope or label name per symbol
//! 3. Minting names for internal helpers the obfuscator introduces
//!
//! Parsing and rewriting source text are left to the caller; this module only
//! sees the scope tree it was handed.

pub mod input;

use crate::config::NameOptions;
use crate::error::Result;
use crate::names::{GeneratorKind, IdentifierNamesGenerator, ScopeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub use input::{ProgramInput, ScopeInput};

// =============================================================================
// Scope Tree
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Global,
    Function,
    #[default]
    Block,
    Catch,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    /// Binding names declared in this scope, in declaration order.
    pub bindings: Vec<String>,
    /// Statement labels declared in this scope.
    pub labels: Vec<String>,
    /// If true, bindings here keep their names (eval/with detected).
    pub has_eval: bool,
    pub children: Vec<ScopeId>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            kind,
            bindings: Vec::new(),
            labels: Vec::new(),
            has_eval: false,
            children: Vec::new(),
        }
    }
}

/// Scopes of one program, rooted at the global scope.
///
/// Children are always created after their parent, so iterating scopes in id
/// order is a top-down walk.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    /// Names referenced but never declared (`console`, `window`, ...).
    globals: BTreeSet<String>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Global, None)],
            globals: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Add a child scope.
    ///
    /// # Panics
    /// Panics if `parent` is not a scope of this tree.
    pub fn add_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(kind, Some(parent)));
        self.scopes[parent.0].children.push(id);
        id
    }

    /// Declare a block-scoped binding (`let`, `const`, class, parameter, ...).
    pub fn add_binding(&mut self, name: &str, scope: ScopeId) {
        let bindings = &mut self.scopes[scope.0].bindings;
        if !bindings.iter().any(|b| b == name) {
            bindings.push(name.to_string());
        }
    }

    /// Declare a `var`, hoisted to the nearest function or global scope.
    pub fn add_var_binding(&mut self, name: &str, scope: ScopeId) -> ScopeId {
        let target = self.hoist_target(scope);
        self.add_binding(name, target);
        target
    }

    pub fn add_label(&mut self, label: &str, scope: ScopeId) {
        let labels = &mut self.scopes[scope.0].labels;
        if !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    }

    /// Record a reference to a name no scope declares.
    pub fn add_global_reference(&mut self, name: &str) {
        self.globals.insert(name.to_string());
    }

    /// Find the nearest function/global scope for var hoisting.
    #[must_use]
    pub fn hoist_target(&self, scope: ScopeId) -> ScopeId {
        let mut current = scope;
        loop {
            let s = &self.scopes[current.0];
            if matches!(s.kind, ScopeKind::Function | ScopeKind::Global) {
                return current;
            }
            match s.parent {
                Some(p) => current = p,
                None => return current,
            }
        }
    }

    /// Mark a scope (and all ancestors) as having eval.
    pub fn mark_eval(&mut self, scope: ScopeId) {
        let mut current = Some(scope);
        while let Some(id) = current {
            self.scopes[id.0].has_eval = true;
            current = self.scopes[id.0].parent;
        }
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    /// Scopes with their ids, parents before children.
    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes.iter().enumerate().map(|(i, s)| (ScopeId(i), s))
    }

    #[must_use]
    pub fn globals(&self) -> &BTreeSet<String> {
        &self.globals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Options for rename planning.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Whether to rename global-scope bindings.
    pub rename_globals: bool,
    /// User-specified names to never rename.
    pub reserved_names: Vec<String>,
    /// Helper identifiers the obfuscator introduces and needs names for.
    pub internal_names: Vec<String>,
    /// Length hint passed to the generator.
    pub name_length: Option<usize>,
}

impl PlanOptions {
    #[must_use]
    pub fn from_name_options(options: &NameOptions) -> Self {
        Self {
            rename_globals: options.rename_globals,
            reserved_names: options.reserved_names.clone(),
            internal_names: Vec::new(),
            name_length: options.name_length,
        }
    }

    #[must_use]
    pub fn with_internal_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.internal_names = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Replacements for one scope. Kept bindings map to themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeRenames {
    pub scope: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub bindings: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
}

/// Result of planning: what every declared name becomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    pub generator: GeneratorKind,
    pub scopes: Vec<ScopeRenames>,
    /// Internal helper name → generated identifier.
    pub internal: BTreeMap<String, String>,
}

impl RenamePlan {
    /// Look up the new name of `name` as referenced from `scope`, walking up
    /// the scope chain. `None` means an undeclared (global) reference.
    #[must_use]
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<&str> {
        let mut current = self.scopes.get(scope.0);
        while let Some(s) = current {
            if let Some(renamed) = s.bindings.get(name) {
                return Some(renamed);
            }
            current = s.parent.and_then(|p| self.scopes.get(p.0));
        }
        None
    }

    /// Same as [`Self::resolve`] for statement labels.
    #[must_use]
    pub fn resolve_label(&self, scope: ScopeId, label: &str) -> Option<&str> {
        let mut current = self.scopes.get(scope.0);
        while let Some(s) = current {
            if let Some(renamed) = s.labels.get(label) {
                return Some(renamed);
            }
            current = s.parent.and_then(|p| self.scopes.get(p.0));
        }
        None
    }

    /// Number of bindings and labels whose name changed.
    #[must_use]
    pub fn renamed_count(&self) -> usize {
        self.scopes
            .iter()
            .flat_map(|s| s.bindings.iter().chain(s.labels.iter()))
            .filter(|(from, to)| from != to)
            .count()
    }
}

/// Assign new names to every binding and label of `tree`.
///
/// The generator's session must be fresh for this program: names the plan
/// keeps are preserved into it before anything is generated.
pub fn plan(
    tree: &ScopeTree,
    generator: &mut dyn IdentifierNamesGenerator,
    options: &PlanOptions,
) -> Result<RenamePlan> {
    let keep_all = generator.kind() == GeneratorKind::KeepOriginal;
    let reserved: BTreeSet<&str> = options.reserved_names.iter().map(String::as_str).collect();

    let keeps = |scope_id: ScopeId, scope: &Scope, name: &str| {
        keep_all
            || scope.has_eval
            || reserved.contains(name)
            || (scope_id == tree.root() && !options.rename_globals)
    };

    // Phase 1: preserve kept names so nothing generated shadows them
    for name in tree.globals() {
        generator.preserve_name(name);
    }
    for name in &reserved {
        generator.preserve_name(name);
    }
    for (id, scope) in tree.scopes() {
        for name in &scope.bindings {
            if keeps(id, scope, name) {
                generator.preserve_name(name);
            }
        }
    }

    // Phase 2: assign top-down, outer scopes first
    let mut scopes = Vec::with_capacity(tree.len());
    for (id, scope) in tree.scopes() {
        let mut bindings = BTreeMap::new();
        for name in &scope.bindings {
            let renamed = if keeps(id, scope, name) {
                name.clone()
            } else if id == tree.root() {
                generator.generate_for_global_scope(options.name_length)?
            } else {
                generator.generate_for_lexical_scope(id, options.name_length)?
            };
            bindings.insert(name.clone(), renamed);
        }

        let mut labels = BTreeMap::new();
        for label in &scope.labels {
            let renamed = generator.generate_for_label(label, options.name_length)?;
            labels.insert(label.clone(), renamed);
        }

        scopes.push(ScopeRenames {
            scope: id,
            kind: scope.kind,
            parent: scope.parent,
            bindings,
            labels,
        });
    }

    // Phase 3: Internal helpers live at the top level
    let mut internal = BTreeMap::new();
    for helper in &options.internal_names {
        if internal.contains_key(helper) {
            continue;
        }
        let name = generator.generate_for_global_scope(options.name_length)?;
        internal.insert(helper.clone(), name);
    }

    let plan = RenamePlan {
        generator: generator.kind(),
        scopes,
        internal,
    };
    debug!(
        generator = plan.generator.as_str(),
        scopes = plan.scopes.len(),
        renamed = plan.renamed_count(),
        internal = plan.internal.len(),
        "rename plan ready"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::mangled::{encode_name, FIRST_CHARS, REST_CHARS};
    use crate::names::{
        HexadecimalGenerator, KeepOriginalGenerator, MangledGenerator, NameSession,
    };
    use std::collections::HashSet;

    /// function outer(first, second) { let inner; label: for (...) {} }
    fn sample_tree() -> (ScopeTree, ScopeId, ScopeId) {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.add_binding("outer", root);
        tree.add_global_reference("console");

        let func = tree.add_scope(ScopeKind::Function, root);
        tree.add_binding("first", func);
        tree.add_binding("second", func);
        tree.add_label("loop", func);

        let block = tree.add_scope(ScopeKind::Block, func);
        tree.add_binding("inner", block);
        (tree, func, block)
    }

    fn mangled() -> MangledGenerator {
        MangledGenerator::new(NameSession::seeded(0))
    }

    #[test]
    fn test_var_hoisting() {
        let mut tree = ScopeTree::new();
        let func = tree.add_scope(ScopeKind::Function, tree.root());
        let block = tree.add_scope(ScopeKind::Block, func);

        assert_eq!(tree.add_var_binding("hoisted", block), func);
        assert!(tree.scope(func).bindings.contains(&"hoisted".to_string()));
        assert!(tree.scope(block).bindings.is_empty());
    }

    #[test]
    fn test_mark_eval_propagates_to_ancestors() {
        let mut tree = ScopeTree::new();
        let func = tree.add_scope(ScopeKind::Function, tree.root());
        let sibling = tree.add_scope(ScopeKind::Function, tree.root());
        let block = tree.add_scope(ScopeKind::Block, func);

        tree.mark_eval(block);
        assert!(tree.scope(block).has_eval);
        assert!(tree.scope(func).has_eval);
        assert!(tree.scope(tree.root()).has_eval);
        assert!(!tree.scope(sibling).has_eval);
    }

    #[test]
    fn test_duplicate_declarations_collapse() {
        let mut tree = ScopeTree::new();
        tree.add_binding("x", tree.root());
        tree.add_binding("x", tree.root());
        assert_eq!(tree.scope(tree.root()).bindings.len(), 1);
    }

    #[test]
    fn test_locals_renamed_globals_kept() {
        let (tree, func, block) = sample_tree();
        let mut gen = mangled();
        let plan = plan(&tree, &mut gen, &PlanOptions::default()).unwrap();

        assert_eq!(plan.resolve(tree.root(), "outer"), Some("outer"));
        assert_eq!(plan.resolve(func, "first"), Some("a"));
        assert_eq!(plan.resolve(func, "second"), Some("b"));
        assert_eq!(plan.resolve_label(block, "loop"), Some("c"));
        assert_eq!(plan.resolve(block, "inner"), Some("d"));
        // Inner scopes see outer bindings
        assert_eq!(plan.resolve(block, "first"), Some("a"));
        // Undeclared references stay global
        assert_eq!(plan.resolve(block, "console"), None);
    }

    #[test]
    fn test_rename_globals() {
        let (tree, _, _) = sample_tree();
        let mut gen = mangled();
        let options = PlanOptions {
            rename_globals: true,
            ..PlanOptions::default()
        };
        let plan = plan(&tree, &mut gen, &options).unwrap();

        assert_eq!(plan.resolve(tree.root(), "outer"), Some("a"));
    }

    #[test]
    fn test_generated_names_avoid_kept_names() {
        let mut tree = ScopeTree::new();
        tree.add_binding("a", tree.root());
        tree.add_global_reference("b");
        let func = tree.add_scope(ScopeKind::Function, tree.root());
        tree.add_binding("param", func);

        let mut gen = mangled();
        let plan = plan(&tree, &mut gen, &PlanOptions::default()).unwrap();
        assert_eq!(plan.resolve(func, "param"), Some("c"));
    }

    #[test]
    fn test_many_short_globals_do_not_exhaust_locals() {
        let mut tree = ScopeTree::new();
        for n in 0..300 {
            tree.add_binding(&encode_name(n, FIRST_CHARS, REST_CHARS), tree.root());
        }
        let func = tree.add_scope(ScopeKind::Function, tree.root());
        tree.add_binding("local", func);

        let mut gen = mangled();
        let plan = plan(&tree, &mut gen, &PlanOptions::default()).unwrap();

        let expected = encode_name(300, FIRST_CHARS, REST_CHARS);
        assert_eq!(plan.resolve(func, "local"), Some(expected.as_str()));
        assert_eq!(plan.resolve(tree.root(), "a"), Some("a"));
    }

    #[test]
    fn test_reserved_names_not_renamed() {
        let (tree, func, _) = sample_tree();
        let mut gen = mangled();
        let options = PlanOptions {
            reserved_names: vec!["first".to_string()],
            ..PlanOptions::default()
        };
        let plan = plan(&tree, &mut gen, &options).unwrap();

        assert_eq!(plan.resolve(func, "first"), Some("first"));
        assert_ne!(plan.resolve(func, "second"), Some("second"));
    }

    #[test]
    fn test_eval_bailout() {
        let (mut tree, func, block) = sample_tree();
        tree.mark_eval(func);

        let mut gen = mangled();
        let plan = plan(&tree, &mut gen, &PlanOptions::default()).unwrap();

        assert_eq!(plan.resolve(func, "first"), Some("first"));
        // The nested block did not call eval and is still renamed
        assert_ne!(plan.resolve(block, "inner"), Some("inner"));
    }

    #[test]
    fn test_shadowed_kept_binding_resolves_locally() {
        let mut tree = ScopeTree::new();
        let func = tree.add_scope(ScopeKind::Function, tree.root());
        tree.add_binding("x", func);
        let inner = tree.add_scope(ScopeKind::Function, func);
        tree.add_binding("x", inner);

        let mut gen = mangled();
        let plan = plan(&tree, &mut gen, &PlanOptions::default()).unwrap();

        let outer_x = plan.resolve(func, "x").unwrap();
        let inner_x = plan.resolve(inner, "x").unwrap();
        assert_ne!(outer_x, inner_x);
    }

    #[test]
    fn test_keep_original_keeps_everything_but_internals() {
        let (tree, func, block) = sample_tree();
        let mut gen = KeepOriginalGenerator::new(NameSession::seeded(1));
        let options = PlanOptions::default().with_internal_names(["stringArray"]);
        let plan = plan(&tree, &mut gen, &options).unwrap();

        assert_eq!(plan.renamed_count(), 0);
        assert_eq!(plan.resolve(func, "first"), Some("first"));
        assert_eq!(plan.resolve_label(block, "loop"), Some("loop"));

        let accessor = &plan.internal["stringArray"];
        assert!(accessor.starts_with('_'));
        assert_eq!(accessor.len(), 7);
    }

    #[test]
    fn test_all_generated_names_unique() {
        let mut tree = ScopeTree::new();
        let mut parent = tree.root();
        for depth in 0..20 {
            let scope = tree.add_scope(ScopeKind::Function, parent);
            for i in 0..10 {
                tree.add_binding(&format!("v{i}"), scope);
            }
            tree.add_label(&format!("label{depth}"), scope);
            parent = scope;
        }

        let mut gen = HexadecimalGenerator::new(NameSession::seeded(8));
        let options = PlanOptions::default().with_internal_names(["a", "b"]);
        let plan = plan(&tree, &mut gen, &options).unwrap();

        let mut seen = HashSet::new();
        for scope in &plan.scopes {
            for name in scope.bindings.values().chain(scope.labels.values()) {
                assert!(seen.insert(name.clone()), "duplicate {name}");
            }
        }
        for name in plan.internal.values() {
            assert!(seen.insert(name.clone()), "duplicate {name}");
        }
        assert_eq!(seen.len(), 20 * 11 + 2);
    }
}
