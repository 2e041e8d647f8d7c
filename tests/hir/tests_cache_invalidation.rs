//! Cached views follow their modification trackers.

use std::path::Path;

use odoo_index::hir::Model;

use crate::helpers::addon_tree::{AddonTree, first_class, module, path};

#[test]
fn test_own_files_recomputed_after_structure_change() {
    let db = AddonTree::new().module("m", &[]).db();
    let m = module(&db, "m");
    let before = m.own_files();
    let stamp = db.trackers().structure.count("m");

    db.set_file_content(Path::new(&path("m/models/new.py")), "");

    assert!(db.trackers().structure.count("m") > stamp);
    let after = m.own_files();
    assert_eq!(after.len(), before.len() + 1);
}

#[test]
fn test_unrelated_change_keeps_other_trackers() {
    let db = AddonTree::new().module("a", &[]).module("b", &[]).db();
    let b_structure = db.trackers().structure.count("b");
    let a_manifest = db.trackers().manifest.count("a");

    db.set_file_content(Path::new(&path("a/models/x.py")), "");

    assert_eq!(db.trackers().structure.count("b"), b_structure);
    assert_eq!(db.trackers().manifest.count("a"), a_manifest);
}

#[test]
fn test_manifest_edit_updates_dependencies() {
    let db = AddonTree::new()
        .module("base", &[])
        .module("sale", &[])
        .module("crm", &["base"])
        .db();
    assert!(!module(&db, "crm").can_see("sale"));

    let manifest = path("crm/__manifest__.py");
    let requeued = db.set_file_content(Path::new(&manifest), "{'depends': ['sale']}");
    db.reindex_files(&requeued);

    let crm = module(&db, "crm");
    assert!(crm.can_see("sale"));
    assert_eq!(crm.descriptor().unwrap().depends, vec!["sale"]);
}

#[test]
fn test_edited_class_gets_fresh_descriptor() {
    let db = AddonTree::new()
        .module("m", &[])
        .file("m/models/a.py", "class A(models.Model):\n    _name = 'one'\n")
        .db();
    let old = first_class(&db, "m/models/a.py");
    assert_eq!(Model::from_class(&db, old).unwrap().id(), "one");

    let requeued = db.set_file_content(
        Path::new(&path("m/models/a.py")),
        "class A(models.Model):\n    _name = 'two'\n",
    );
    db.reindex_files(&requeued);

    assert!(Model::from_class(&db, old).is_none());
    let fresh = first_class(&db, "m/models/a.py");
    assert_eq!(Model::from_class(&db, fresh).unwrap().id(), "two");
    assert!(module(&db, "m").models(false).iter().any(|m| m == "two"));
    assert!(!module(&db, "m").models(false).iter().any(|m| m == "one"));
}

#[test]
fn test_removing_init_dissolves_module() {
    let db = AddonTree::new()
        .module("m", &[])
        .file("m/models/a.py", "class A(models.Model):\n    _name = 'one'\n")
        .db();

    let requeued = db.remove_file(Path::new(&path("m/__init__.py")));
    db.reindex_files(&requeued);

    assert!(odoo_index::Module::by_name(&db, "m").is_none());
    assert!(
        db.model_index()
            .all_keys(&odoo_index::hir::SearchScope::Everything)
            .is_empty()
    );
}
