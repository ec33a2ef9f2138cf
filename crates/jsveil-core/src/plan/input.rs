//! JSON description of a program's scopes, as fed to `jsveil plan`.
//!
//! ```json
//! {
//!   "globals": ["console"],
//!   "internalNames": ["stringArray"],
//!   "scope": {
//!     "bindings": ["main"],
//!     "children": [
//!       { "kind": "function", "bindings": ["a", "b"], "labels": ["outer"] }
//!     ]
//!   }
//! }
//! ```
//!
//! The top-level `scope` is always the global scope, whatever its `kind` says.

use super::{ScopeKind, ScopeTree};
use crate::error::{Error, Result};
use crate::names::ScopeId;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeInput {
    pub kind: ScopeKind,
    /// Block-scoped declarations: `let`, `const`, classes, parameters.
    pub bindings: Vec<String>,
    /// `var` declarations, hoisted to the enclosing function.
    pub vars: Vec<String>,
    pub labels: Vec<String>,
    pub has_eval: bool,
    pub children: Vec<ScopeInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramInput {
    /// Names referenced without a declaration.
    pub globals: Vec<String>,
    pub internal_names: Vec<String>,
    pub scope: ScopeInput,
}

impl ProgramInput {
    /// Load a program description from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::InputRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content).map_err(|e| Error::InputParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Build the scope tree, ids assigned depth-first in document order.
    #[must_use]
    pub fn to_tree(&self) -> ScopeTree {
        let mut tree = ScopeTree::new();
        for name in &self.globals {
            tree.add_global_reference(name);
        }
        let root = tree.root();
        fill_scope(&mut tree, root, &self.scope);
        tree
    }
}

fn fill_scope(tree: &mut ScopeTree, id: ScopeId, input: &ScopeInput) {
    for name in &input.bindings {
        tree.add_binding(name, id);
    }
    for name in &input.vars {
        tree.add_var_binding(name, id);
    }
    for label in &input.labels {
        tree.add_label(label, id);
    }
    if input.has_eval {
        tree.mark_eval(id);
    }
    for child in &input.children {
        let child_id = tree.add_scope(child.kind, id);
        fill_scope(tree, child_id, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "globals": ["console"],
        "internalNames": ["stringArray"],
        "scope": {
            "bindings": ["main"],
            "children": [
                {
                    "kind": "function",
                    "bindings": ["a"],
                    "labels": ["outer"],
                    "children": [
                        { "vars": ["hoisted"], "bindings": ["blockLocal"] },
                        { "kind": "catch", "bindings": ["err"], "hasEval": true }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_tree_from_json() {
        let input = ProgramInput::from_json(SAMPLE).unwrap();
        let tree = input.to_tree();

        assert_eq!(tree.len(), 4);
        assert!(tree.globals().contains("console"));
        assert_eq!(input.internal_names, vec!["stringArray"]);

        let func = ScopeId(1);
        assert_eq!(tree.scope(func).kind, ScopeKind::Function);
        assert_eq!(tree.scope(func).labels, vec!["outer"]);
        // `var` lands on the function, not the block
        assert_eq!(tree.scope(func).bindings, vec!["a", "hoisted"]);
        assert_eq!(tree.scope(ScopeId(2)).bindings, vec!["blockLocal"]);

        let catch = ScopeId(3);
        assert_eq!(tree.scope(catch).kind, ScopeKind::Catch);
        assert!(tree.scope(catch).has_eval);
        assert!(tree.scope(func).has_eval);
        assert!(!tree.scope(ScopeId(2)).has_eval);
    }

    #[test]
    fn test_missing_fields_default() {
        let input = ProgramInput::from_json("{}").unwrap();
        let tree = input.to_tree();
        assert_eq!(tree.len(), 1);
        assert!(tree.scope(tree.root()).bindings.is_empty());
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ \"scope\": 42 }}").unwrap();

        let err = ProgramInput::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::InputParse { .. }));

        let err = ProgramInput::load(Path::new("/nonexistent/scopes.json")).unwrap_err();
        assert!(matches!(err, Error::InputRead { .. }));
    }
}
