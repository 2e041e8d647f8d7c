//! Addon imports and the addons namespace members.

use std::path::PathBuf;

use odoo_index::ide::ImportTarget;

use crate::helpers::addon_tree::{AddonTree, path};

#[test]
fn test_import_resolution_through_analysis() {
    let mut host = AddonTree::new()
        .module("base", &[])
        .module("sale", &["base"])
        .file("sale/models/__init__.py", "from . import sale_order\n")
        .file("sale/models/sale_order.py", "class SaleOrder:\n    pass\n")
        .module("sale_stock", &["sale"])
        .file("sale_stock/models/order.py", "from odoo.addons.sale.models.sale_order import SaleOrder\n")
        .host();
    let analysis = host.analysis();

    assert_eq!(
        analysis.resolve_import("odoo.addons.sale"),
        Some(ImportTarget::Directory(PathBuf::from(path("sale"))))
    );
    let order = analysis.file_id(path("sale/models/sale_order.py")).unwrap();
    assert_eq!(
        analysis.resolve_import("odoo.addons.sale.models.sale_order.SaleOrder"),
        Some(ImportTarget::Member {
            file: order,
            name: "SaleOrder".into()
        })
    );
    assert_eq!(analysis.resolve_import("odoo.sale"), None);
    assert_eq!(analysis.resolve_import("requests.adapters.HTTPAdapter"), None);

    let origin = analysis.file_id(path("sale_stock/models/order.py")).unwrap();
    let members: Vec<_> = analysis
        .addons_members(origin, "odoo.addons")
        .into_iter()
        .map(|m| m.name.to_string())
        .collect();
    assert_eq!(members, vec!["sale", "base", "sale_stock"]);
}
