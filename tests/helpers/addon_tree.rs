//! In-memory addon trees for integration tests.

use std::path::Path;

use odoo_index::base::FileId;
use odoo_index::hir::{ClassPtr, Database, Module};
use odoo_index::ide::AnalysisHost;

/// Root under which test modules are created.
pub const ADDONS: &str = "/addons";

/// Builder for a project made of addon modules.
#[derive(Default)]
pub struct AddonTree {
    files: Vec<(String, String)>,
}

impl AddonTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module with an init file and a manifest declaring `depends`.
    pub fn module(mut self, name: &str, depends: &[&str]) -> Self {
        let depends: Vec<String> = depends.iter().map(|d| format!("'{d}'")).collect();
        self.files
            .push((format!("{ADDONS}/{name}/__init__.py"), String::new()));
        self.files.push((
            format!("{ADDONS}/{name}/__manifest__.py"),
            format!("{{\n    'name': '{name}',\n    'depends': [{}],\n}}\n", depends.join(", ")),
        ));
        self
    }

    /// Add a file at `path`, relative to the addons root.
    pub fn file(mut self, path: &str, text: &str) -> Self {
        self.files.push((format!("{ADDONS}/{path}"), text.to_string()));
        self
    }

    /// A fully indexed database.
    pub fn db(self) -> Database {
        let db = Database::default();
        for (path, text) in &self.files {
            db.set_file_content(Path::new(path), text);
        }
        db.reindex_all();
        db
    }

    /// A host with every file loaded and pending reindexing.
    pub fn host(self) -> AnalysisHost {
        let mut host = AnalysisHost::new();
        for (path, text) in &self.files {
            host.set_file_content(path, text);
        }
        host
    }
}

pub fn path(relative: &str) -> String {
    format!("{ADDONS}/{relative}")
}

pub fn file_id(db: &Database, relative: &str) -> FileId {
    db.file_id(Path::new(&path(relative)))
        .unwrap_or_else(|| panic!("file not loaded: {relative}"))
}

pub fn module<'db>(db: &'db Database, name: &str) -> Module<'db> {
    Module::by_name(db, name).unwrap_or_else(|| panic!("module not indexed: {name}"))
}

/// The first top-level class of a file.
pub fn first_class(db: &Database, relative: &str) -> ClassPtr {
    db.top_level_classes(file_id(db, relative))
        .first()
        .copied()
        .unwrap_or_else(|| panic!("no class in {relative}"))
}

pub fn names(modules: &[Module<'_>]) -> Vec<String> {
    modules.iter().map(|m| m.name().to_string()).collect()
}
