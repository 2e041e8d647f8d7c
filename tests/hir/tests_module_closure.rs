//! Transitive dependency and dependent closures.

use std::path::Path;

use odoo_index::hir::{Database, Module};
use odoo_index::project::ProjectConfig;
use rstest::rstest;

use crate::helpers::addon_tree::{AddonTree, module, names};

fn chain() -> Database {
    AddonTree::new()
        .module("base", &[])
        .module("a", &["b"])
        .module("b", &["c"])
        .module("c", &[])
        .db()
}

// =============================================================================
// DEPENDS
// =============================================================================

#[test]
fn test_transitive_depends_include_indirect_and_base() {
    let db = chain();
    let a = module(&db, "a");
    assert_eq!(a.depends(), vec!["b", "c", "base"]);
}

#[test]
fn test_base_is_appended_even_if_undeclared_or_missing() {
    let db = AddonTree::new().module("lonely", &[]).db();
    assert_eq!(module(&db, "lonely").depends(), vec!["base"]);
}

#[test]
fn test_depends_preorder_and_dedup() {
    let db = AddonTree::new()
        .module("base", &[])
        .module("top", &["left", "right"])
        .module("left", &["shared"])
        .module("right", &["shared", "base"])
        .module("shared", &["base"])
        .db();

    assert_eq!(
        module(&db, "top").depends(),
        vec!["left", "shared", "base", "right"]
    );
}

#[test]
fn test_dependency_cycle_terminates() {
    let db = AddonTree::new()
        .module("base", &[])
        .module("a", &["b"])
        .module("b", &["a"])
        .db();

    let depends = module(&db, "a").depends();
    assert_eq!(depends.iter().filter(|d| *d == "a").count(), 1);
    assert_eq!(depends.iter().filter(|d| *d == "b").count(), 1);
    assert!(depends.iter().any(|d| d == "base"));

    let dependings = module(&db, "a").dependings();
    assert_eq!(dependings.len(), 2);
}

#[test]
fn test_self_cycle_terminates() {
    let db = AddonTree::new().module("base", &[]).module("a", &["a"]).db();
    assert_eq!(module(&db, "a").depends(), vec!["a", "base"]);
    assert_eq!(names(&module(&db, "a").depends_modules(true)), vec!["base", "a"]);
}

#[test]
fn test_configured_base_module() {
    let db = Database::new(ProjectConfig::default().with_base_module("platform"));
    db.set_file_content(Path::new("/x/m/__init__.py"), "");
    db.set_file_content(Path::new("/x/m/__manifest__.py"), "{}");
    db.reindex_all();

    assert_eq!(Module::by_name(&db, "m").unwrap().depends(), vec!["platform"]);
}

// =============================================================================
// DEPENDINGS
// =============================================================================

#[test]
fn test_transitive_dependings() {
    let db = chain();
    let c = module(&db, "c");

    assert_eq!(names(&c.direct_dependings()), vec!["b"]);
    assert_eq!(c.dependings(), vec!["b", "a"]);
    assert_eq!(names(&c.dependings_modules(true)), vec!["b", "a", "c"]);
    assert!(module(&db, "a").dependings().is_empty());
}

#[test]
fn test_base_is_not_appended_to_dependings() {
    let db = chain();
    assert!(!module(&db, "c").dependings().iter().any(|d| d == "base"));
}

// =============================================================================
// VISIBILITY
// =============================================================================

#[rstest]
#[case("a", "b", true)]
#[case("a", "c", true)]
#[case("a", "base", true)]
#[case("a", "a", true)]
#[case("c", "a", false)]
#[case("b", "a", false)]
#[case("c", "unknown", false)]
fn test_can_see(#[case] from: &str, #[case] target: &str, #[case] visible: bool) {
    let db = chain();
    assert_eq!(module(&db, from).can_see(target), visible);
}

#[test]
fn test_can_see_matches_closure_membership() {
    let db = chain();
    for m in Module::all(&db) {
        let depends = m.depends();
        for other in ["a", "b", "c", "base", "x"] {
            let expected = other == m.name().as_str() || depends.iter().any(|d| d == other);
            assert_eq!(m.can_see(other), expected, "{} -> {}", m.name(), other);
        }
    }
}

#[test]
fn test_manifest_order_is_preserved_until_closure() {
    let db = AddonTree::new()
        .module("base", &[])
        .module("x", &["b", "a", "b"])
        .module("a", &[])
        .module("b", &[])
        .db();

    let x = module(&db, "x");
    assert_eq!(x.descriptor().unwrap().depends, vec!["b", "a", "b"]);
    assert_eq!(x.direct_depends(), vec!["b", "a"]);
    assert_eq!(x.depends(), vec!["b", "base", "a"]);
}

#[test]
fn test_base_follows_first_expanded_subtree() {
    let db = AddonTree::new()
        .module("base", &[])
        .module("top", &["left", "right"])
        .module("left", &[])
        .module("right", &["base"])
        .db();

    assert_eq!(module(&db, "top").depends(), vec!["left", "base", "right"]);
    assert_eq!(
        names(&module(&db, "top").depends_modules(true)),
        vec!["left", "base", "right", "top"]
    );
}
