//! Super methods and inheritors across modules.

use crate::helpers::addon_tree::{AddonTree, first_class, path};
use crate::helpers::fixtures::{SALE_ORDER, SALE_ORDER_EXTENDED};

#[test]
fn test_super_method_and_inheritors() {
    let mut host = AddonTree::new()
        .module("base", &[])
        .module("sale", &["base"])
        .file("sale/models/sale_order.py", SALE_ORDER)
        .module("sale_extended", &["sale"])
        .file("sale_extended/models/sale_order.py", SALE_ORDER_EXTENDED)
        .host();
    let analysis = host.analysis();
    let db = analysis.db();

    let sale = first_class(db, "sale/models/sale_order.py");
    let extended = first_class(db, "sale_extended/models/sale_order.py");

    let first = analysis.super_methods(extended, "action_confirm").next().unwrap();
    assert_eq!(first.class, sale);
    assert_eq!(
        analysis.file_path(first.file).unwrap().to_str(),
        Some(path("sale/models/sale_order.py").as_str())
    );
    assert_eq!(analysis.super_methods(sale, "action_confirm").count(), 0);

    assert_eq!(analysis.inheritors(sale).collect::<Vec<_>>(), vec![extended]);
    let manifest = analysis.file_id(path("sale/__manifest__.py")).unwrap();
    assert!(analysis.ignore_no_effect_statement(manifest));
}

#[test]
fn test_super_methods_visit_base_before_later_siblings() {
    let partner = |kind: &str| {
        format!(
            "class Partner(models.Model):\n    {kind} = 'res.partner'\n\n    def write(self, vals):\n        pass\n"
        )
    };
    let mut host = AddonTree::new()
        .module("base", &[])
        .file("base/models/partner.py", &partner("_name"))
        .module("left", &[])
        .module("right", &["base"])
        .file("right/models/partner.py", &partner("_inherit"))
        .module("top", &["left", "right"])
        .file("top/models/partner.py", &partner("_inherit"))
        .host();
    let analysis = host.analysis();
    let db = analysis.db();

    let top = first_class(db, "top/models/partner.py");
    let files: Vec<_> = analysis
        .super_methods(top, "write")
        .map(|m| m.file)
        .collect();
    let expected: Vec<_> = ["base/models/partner.py", "right/models/partner.py"]
        .iter()
        .map(|p| analysis.file_id(path(p)).unwrap())
        .collect();
    assert_eq!(files, expected);
}
