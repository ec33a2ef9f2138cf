//! End-to-end planning: JSON scope description in, rename plan out.

use jsveil_core::{
    plan, GeneratorKind, GeneratorSelector, NameOptions, PlanOptions, ProgramInput, ScopeId,
    ScopeTree,
};
use std::collections::HashSet;

const PROGRAM: &str = r#"{
    "globals": ["console", "document"],
    "internalNames": ["stringArray", "decoder"],
    "scope": {
        "bindings": ["app"],
        "vars": ["config"],
        "children": [
            {
                "kind": "function",
                "bindings": ["request", "response"],
                "labels": ["retry"],
                "children": [
                    { "bindings": ["body"], "vars": ["attempts"] },
                    { "kind": "catch", "bindings": ["error"] }
                ]
            },
            {
                "kind": "function",
                "bindings": ["source"],
                "hasEval": true
            }
        ]
    }
}"#;

fn run(kind: GeneratorKind, rename_globals: bool) -> jsveil_core::RenamePlan {
    let input = ProgramInput::from_json(PROGRAM).unwrap();
    let options = NameOptions::default()
        .with_generator(kind.as_str())
        .with_seed(1)
        .with_rename_globals(rename_globals);
    let mut selector = GeneratorSelector::from_options(&options).unwrap();
    let plan_options =
        PlanOptions::from_name_options(&options).with_internal_names(input.internal_names.clone());

    plan(&input.to_tree(), selector.generator_mut(), &plan_options).unwrap()
}

#[test]
fn every_strategy_produces_a_collision_free_plan() {
    for kind in GeneratorKind::ALL {
        for rename_globals in [false, true] {
            let plan = run(kind, rename_globals);

            // Names visible from one scope never clash with each other
            let func = ScopeId(1);
            let visible: Vec<&str> = ["app", "config", "request", "response", "attempts"]
                .iter()
                .map(|name| plan.resolve(func, name).unwrap())
                .collect();
            let unique: HashSet<&&str> = visible.iter().collect();
            assert_eq!(unique.len(), visible.len(), "{kind}: {visible:?}");

            // Undeclared globals resolve to nothing and are never produced
            assert_eq!(plan.resolve(func, "console"), None);
            for scope in &plan.scopes {
                assert!(!scope.bindings.values().any(|n| n == "console" || n == "document"));
            }

            assert_eq!(plan.internal.len(), 2, "{kind}");
        }
    }
}

#[test]
fn globals_only_renamed_on_request() {
    let mut tree = ScopeTree::new();
    tree.add_binding("app", tree.root());
    tree.add_var_binding("config", tree.root());

    for (rename_globals, expect_kept) in [(false, true), (true, false)] {
        let mut selector = GeneratorSelector::resolve("mangled").unwrap();
        let options = PlanOptions {
            rename_globals,
            ..PlanOptions::default()
        };
        let plan = plan(&tree, selector.generator_mut(), &options).unwrap();
        for name in ["app", "config"] {
            assert_eq!(plan.resolve(tree.root(), name) == Some(name), expect_kept);
        }
    }
}

#[test]
fn eval_keeps_enclosing_scopes_verbatim() {
    // The second function calls eval, which can see the global scope
    let plan = run(GeneratorKind::Mangled, true);
    assert_eq!(plan.resolve(ScopeId(0), "app"), Some("app"));
    assert_ne!(plan.resolve(ScopeId(1), "request"), Some("request"));
}

#[test]
fn var_hoists_and_eval_scope_is_kept() {
    let plan = run(GeneratorKind::Hexadecimal, false);

    // `attempts` was declared with `var` inside a block of the first function
    let from_block = plan.resolve(ScopeId(2), "attempts").unwrap();
    assert_eq!(plan.resolve(ScopeId(1), "attempts"), Some(from_block));
    assert!(from_block.starts_with("_0x"));

    let eval_scope = ScopeId(4);
    assert_eq!(plan.resolve(eval_scope, "source"), Some("source"));
}

#[test]
fn keep_original_only_names_internal_helpers() {
    let plan = run(GeneratorKind::KeepOriginal, true);

    assert_eq!(plan.renamed_count(), 0);
    assert_eq!(plan.resolve_label(ScopeId(2), "retry"), Some("retry"));
    for helper in plan.internal.values() {
        assert!(helper.starts_with('_') && helper.len() == 7, "{helper}");
    }
}

#[test]
fn plan_serializes_with_tokens() {
    let plan = run(GeneratorKind::MangledShuffled, false);
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["generator"], "mangled-shuffled");
    assert_eq!(json["scopes"][1]["kind"], "function");
    assert_eq!(json["scopes"][1]["parent"], 0);
    assert!(json["internal"]["stringArray"].is_string());
}
