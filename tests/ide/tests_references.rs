//! Goto-definition on model and module references.

use odoo_index::base::LineCol;
use odoo_index::ide::{Analysis, ReferenceKind, ReferenceTarget};

use crate::helpers::addon_tree::{AddonTree, path};
use crate::helpers::fixtures::{SALE_ORDER, SALE_ORDER_EXTENDED};

fn analysis() -> Analysis {
    AddonTree::new()
        .module("base", &[])
        .module("sale", &["base"])
        .file("sale/models/sale_order.py", SALE_ORDER)
        .file("sale/views/sale_views.xml", "<odoo/>")
        .file(
            "sale/__manifest__.py",
            "{\n    'depends': ['base'],\n    'data': ['views/sale_views.xml', 'views/missing.xml'],\n}\n",
        )
        .module("sale_extended", &["sale"])
        .file("sale_extended/models/sale_order.py", SALE_ORDER_EXTENDED)
        .host()
        .analysis()
}

/// Line/column of the first occurrence of `needle` in a file, plus one
/// column so the position is inside it.
fn position(analysis: &Analysis, relative: &str, needle: &str) -> (odoo_index::FileId, LineCol) {
    let file = analysis.file_id(path(relative)).unwrap();
    let text = analysis.db().file_text(file).unwrap();
    let offset = text.find(needle).unwrap() + 1;
    let line_col = analysis.db().parse(file).unwrap().line_col((offset as u32).into());
    (file, line_col)
}

#[test]
fn test_goto_model_from_inherit() {
    let analysis = analysis();
    let (file, at) = position(&analysis, "sale_extended/models/sale_order.py", "'sale.order'");

    let reference = analysis.reference_at(file, at.line, at.col).unwrap();
    assert_eq!(reference.kind, ReferenceKind::ModelName);
    assert_eq!(reference.value, "sale.order");

    let sale_file = analysis.file_id(path("sale/models/sale_order.py")).unwrap();
    let extended_class = analysis.classes(file)[0];
    let targets = analysis.goto_definition(file, at.line, at.col);
    // Both contributors are visible from the extending module.
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0], ReferenceTarget::Class(analysis.classes(sale_file)[0]));
    assert_eq!(targets[1], ReferenceTarget::Class(extended_class));
}

#[test]
fn test_goto_model_from_declaring_module_ignores_dependents() {
    let analysis = analysis();
    let (file, at) = position(&analysis, "sale/models/sale_order.py", "'sale.order'");

    let targets = analysis.goto_definition(file, at.line, at.col);
    assert_eq!(targets, vec![ReferenceTarget::Class(analysis.classes(file)[0])]);
}

#[test]
fn test_goto_module_from_depends() {
    let analysis = analysis();
    let (file, at) = position(&analysis, "sale_extended/__manifest__.py", "'sale'");

    let targets = analysis.goto_definition(file, at.line, at.col);
    assert_eq!(
        targets,
        vec![ReferenceTarget::Module {
            name: "sale".into(),
            dir: path("sale").into(),
        }]
    );
}

#[test]
fn test_goto_data_file() {
    let analysis = analysis();
    let (file, at) = position(&analysis, "sale/__manifest__.py", "'views/sale");
    let view = analysis.file_id(path("sale/views/sale_views.xml")).unwrap();
    assert_eq!(
        analysis.goto_definition(file, at.line, at.col),
        vec![ReferenceTarget::File(view)]
    );

    let (file, at) = position(&analysis, "sale/__manifest__.py", "'views/missing");
    assert!(analysis.goto_definition(file, at.line, at.col).is_empty());
}

#[test]
fn test_plain_strings_are_not_references() {
    let analysis = analysis();
    let (file, at) = position(&analysis, "sale/models/sale_order.py", "'Sales Order'");
    assert!(analysis.reference_at(file, at.line, at.col).is_none());
    assert!(analysis.goto_definition(file, at.line, at.col).is_empty());
}
