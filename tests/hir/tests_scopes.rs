//! File scopes of modules.

use odoo_index::hir::SearchScope;

use crate::helpers::addon_tree::{AddonTree, file_id, module};

fn tree() -> odoo_index::hir::Database {
    AddonTree::new()
        .module("base", &[])
        .file("base/models/partner.py", "")
        .module("sale", &["base"])
        .file("sale/models/order.py", "")
        .file("sale/views/order.xml", "<odoo/>")
        .module("sale_stock", &["sale"])
        .file("sale_stock/models/order.py", "")
        .db()
}

#[test]
fn test_scope_with_depends_is_superset() {
    let db = tree();
    for name in ["base", "sale", "sale_stock"] {
        let m = module(&db, name);
        assert!(m.scope(true).is_superset(&m.scope(false)), "{name}");
    }

    let sale = module(&db, "sale");
    assert!(sale.files(true).len() > sale.files(false).len());
}

#[test]
fn test_scope_order_follows_module_order() {
    let db = tree();
    let files = module(&db, "sale_stock").files(true);
    let position = |p: &str| files.iter().position(|f| *f == file_id(&db, p)).unwrap();

    assert!(position("sale/models/order.py") < position("base/models/partner.py"));
    assert!(position("base/models/partner.py") < position("sale_stock/models/order.py"));
}

#[test]
fn test_python_scope_excludes_data_files() {
    let db = tree();
    let sale = module(&db, "sale");
    let view = file_id(&db, "sale/views/order.xml");

    assert!(sale.scope(false).contains(view));
    assert!(!sale.python_scope(false).contains(view));
}

#[test]
fn test_depending_scope_excludes_own_files() {
    let db = tree();
    let sale = module(&db, "sale");
    let scope = sale.depending_scope();

    assert!(scope.contains(file_id(&db, "sale_stock/models/order.py")));
    assert!(!scope.contains(file_id(&db, "sale/models/order.py")));
    assert!(!scope.contains(file_id(&db, "base/models/partner.py")));
}

#[test]
fn test_unscoped_queries_cover_everything() {
    assert!(SearchScope::Everything.contains(odoo_index::FileId::new(42)));
}
