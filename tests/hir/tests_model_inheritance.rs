//! Parent and child classes of models across modules.

use odoo_index::hir::{Model, SearchScope, classes_by_model_name};

use crate::helpers::addon_tree::{AddonTree, first_class, module};
use crate::helpers::fixtures::{RES_PARTNER, RES_USERS, SALE_ORDER, SALE_ORDER_EXTENDED};

fn sale_tree() -> odoo_index::hir::Database {
    AddonTree::new()
        .module("base", &[])
        .file("base/models/res_partner.py", RES_PARTNER)
        .file("base/models/res_users.py", RES_USERS)
        .module("sale", &["base"])
        .file("sale/models/sale_order.py", SALE_ORDER)
        .module("sale_extended", &["sale"])
        .file("sale_extended/models/sale_order.py", SALE_ORDER_EXTENDED)
        .module("unrelated", &["base"])
        .file(
            "unrelated/models/order.py",
            "class Order(models.Model):\n    _inherit = 'sale.order'\n",
        )
        .db()
}

#[test]
fn test_sale_extended_scenario() {
    let db = sale_tree();
    let sale = first_class(&db, "sale/models/sale_order.py");
    let extended = first_class(&db, "sale_extended/models/sale_order.py");

    let sale_model = Model::from_class(&db, sale).unwrap();
    let extended_model = Model::from_class(&db, extended).unwrap();
    assert_eq!(sale_model.id(), "sale.order");
    assert_eq!(extended_model.id(), "sale.order");

    assert_eq!(extended_model.parent_classes().collect::<Vec<_>>(), vec![sale]);
    assert_eq!(sale_model.child_classes().collect::<Vec<_>>(), vec![extended]);
    assert_eq!(module(&db, "sale_extended").depends(), vec!["sale", "base"]);
}

#[test]
fn test_visibility_is_forward_only() {
    let db = sale_tree();
    let sale = first_class(&db, "sale/models/sale_order.py");
    let extended = first_class(&db, "sale_extended/models/sale_order.py");

    let sale_model = Model::from_class(&db, sale).unwrap();
    assert!(!sale_model.parent_classes().any(|c| c == extended));
    assert!(sale_model.child_classes().any(|c| c == extended));
}

#[test]
fn test_modules_outside_the_chain_are_invisible() {
    let db = sale_tree();
    let sale = first_class(&db, "sale/models/sale_order.py");
    let unrelated = first_class(&db, "unrelated/models/order.py");

    let unrelated_model = Model::from_class(&db, unrelated).unwrap();
    assert_eq!(unrelated_model.parent_classes().count(), 0);

    let sale_model = Model::from_class(&db, sale).unwrap();
    assert!(!sale_model.child_classes().any(|c| c == unrelated));
}

#[test]
fn test_delegation_map_and_fields() {
    let db = sale_tree();
    let users = Model::from_class(&db, first_class(&db, "base/models/res_users.py")).unwrap();

    assert_eq!(
        users.descriptor().inherits.get("res.partner").map(|f| f.as_str()),
        Some("partner_id")
    );
    let fields: Vec<_> = users.fields().into_iter().map(|f| f.name).collect();
    assert_eq!(fields, vec!["partner_id"]);
}

#[test]
fn test_models_visible_in_module() {
    let db = sale_tree();
    let extended = module(&db, "sale_extended");

    assert_eq!(extended.models(false), vec!["sale.order"]);
    let visible = extended.models(true);
    assert!(visible.iter().any(|m| m == "res.partner"));
    assert!(visible.iter().any(|m| m == "res.users"));
    assert!(visible.iter().any(|m| m == "sale.order"));
}

#[test]
fn test_classes_by_model_name_is_lazy_and_scoped() {
    let db = sale_tree();
    let scope = module(&db, "sale").python_scope(true);

    let mut classes = classes_by_model_name(&db, "sale.order".into(), &scope);
    assert_eq!(
        classes.next(),
        Some(first_class(&db, "sale/models/sale_order.py"))
    );
    assert_eq!(classes.next(), None);

    let everywhere = classes_by_model_name(&db, "sale.order".into(), &SearchScope::Everything);
    assert_eq!(everywhere.count(), 3);
}

#[test]
fn test_non_model_class_has_no_model() {
    let db = AddonTree::new()
        .module("m", &[])
        .file("m/helpers.py", "class Helper:\n    pass\n")
        .db();
    assert!(Model::from_class(&db, first_class(&db, "m/helpers.py")).is_none());
}
