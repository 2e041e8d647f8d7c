//! Completion variants in model and manifest positions.

use odoo_index::ide::CompletionKind;

use crate::helpers::addon_tree::{AddonTree, path};

#[test]
fn test_model_and_module_completion() {
    let mut host = AddonTree::new()
        .module("base", &[])
        .file("base/models/partner.py", "class P(models.Model):\n    _name = 'res.partner'\n")
        .module("sale", &["base"])
        .file(
            "sale/models/order.py",
            "class O(models.Model):\n    _name = 'sale.order'\n\n\nclass X(models.Model):\n    _inherit = ''\n",
        )
        .module("stock", &["base"])
        .file("stock/models/move.py", "class M(models.Model):\n    _name = 'stock.move'\n")
        .host();
    let analysis = host.analysis();

    // _inherit = '' on line 5, cursor between the quotes
    let order = analysis.file_id(path("sale/models/order.py")).unwrap();
    let items = analysis.completions(order, 5, 16);
    let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["res.partner", "sale.order"]);
    assert!(items.iter().all(|i| i.kind == CompletionKind::Model));

    // 'depends': ['base'] on line 2 of the generated manifest
    let manifest = analysis.file_id(path("sale/__manifest__.py")).unwrap();
    let items = analysis.completions(manifest, 2, 17);
    let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["base", "stock"]);
    assert_eq!(items[0].detail.as_deref(), Some("base"));
}
