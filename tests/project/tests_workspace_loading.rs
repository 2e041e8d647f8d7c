//! Loading addon trees from disk.

use std::fs;
use std::path::Path;

use odoo_index::ide::AnalysisHost;
use odoo_index::project::LoadError;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn addons_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "base/__init__.py", "");
    write(root, "base/__manifest__.py", "{'name': 'Base'}");
    write(root, "sale/__init__.py", "from . import models\n");
    write(root, "sale/__manifest__.py", "{'name': 'Sales', 'depends': ['base']}");
    write(root, "sale/models/__init__.py", "from . import sale_order\n");
    write(
        root,
        "sale/models/sale_order.py",
        "class SaleOrder(models.Model):\n    _name = 'sale.order'\n",
    );
    write(root, "sale/__pycache__/junk.pyc", "");
    write(root, "legacy/__init__.py", "");
    write(root, "legacy/__openerp__.py", "{'depends': ['sale']}");
    dir
}

#[test]
fn test_load_and_index_directory() {
    let dir = addons_dir();
    let mut host = AnalysisHost::new();
    let errors = host.load_directory(dir.path()).unwrap();
    assert!(errors.is_empty());
    assert!(!host.has_file(dir.path().join("sale/__pycache__/junk.pyc")));

    let analysis = host.analysis();
    let names: Vec<_> = analysis
        .modules()
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(names, vec!["base", "legacy", "sale"]);

    let legacy = analysis.module_by_name("legacy").unwrap();
    assert_eq!(legacy.depends(), vec!["sale", "base"]);
    assert_eq!(
        analysis.module_by_name("sale").unwrap().descriptor().unwrap().name,
        "Sales"
    );
    assert_eq!(
        analysis.module_by_name("sale").unwrap().models(false),
        vec!["sale.order"]
    );
}

#[test]
fn test_edit_after_load() {
    let dir = addons_dir();
    let mut host = AnalysisHost::new();
    host.load_directory(dir.path()).unwrap();
    host.analysis();

    host.set_file_content(
        dir.path().join("sale/models/sale_order.py"),
        "class SaleOrder(models.Model):\n    _name = 'sale.order.renamed'\n",
    );
    let analysis = host.analysis();
    assert_eq!(
        analysis.module_by_name("sale").unwrap().models(false),
        vec!["sale.order.renamed"]
    );
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut host = AnalysisHost::new();
    let result = host.load_directory(&dir.path().join("nope"));
    assert!(matches!(result, Err(LoadError::DirectoryNotFound(_))));
}
