//! The module entity: dependency closures, file scopes and visible models.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::project::discovery::{is_module_directory, is_python_file, manifest_in_directory, module_name};

use super::descriptors::ManifestDescriptor;
use super::index::SearchScope;
use super::Database;

/// A module directory with its manifest, viewed through a [`Database`].
///
/// Modules are cheap handles; every query reads the current indices and
/// caches.
#[derive(Clone)]
pub struct Module<'db> {
    db: &'db Database,
    dir: PathBuf,
    manifest: FileId,
    name: SmolStr,
}

impl<'db> Module<'db> {
    /// The module rooted at `dir`, if `dir` is a module directory.
    pub fn from_dir(db: &'db Database, dir: &Path) -> Option<Self> {
        let (manifest, name) = {
            let vfs = db.vfs();
            if !is_module_directory(&vfs, dir) {
                return None;
            }
            let manifest = vfs.file_id(&manifest_in_directory(&vfs, dir)?)?;
            (manifest, SmolStr::new(module_name(dir)?))
        };
        Some(Self {
            db,
            dir: dir.to_path_buf(),
            manifest,
            name,
        })
    }

    /// The module whose manifest is `manifest`.
    pub fn from_manifest(db: &'db Database, manifest: FileId) -> Option<Self> {
        let dir = db.file_path(manifest)?.parent()?.to_path_buf();
        Self::from_dir(db, &dir).filter(|m| m.manifest == manifest)
    }

    /// The module owning `path` (the nearest enclosing module directory).
    pub fn containing(db: &'db Database, path: &Path) -> Option<Self> {
        Self::from_dir(db, &db.owning_module_dir(path)?)
    }

    pub fn for_file(db: &'db Database, file: FileId) -> Option<Self> {
        Self::containing(db, &db.file_path(file)?)
    }

    /// Look a module up by name through the module index.
    pub fn by_name(db: &'db Database, name: &str) -> Option<Self> {
        db.module_index()
            .files_for_key(name, &SearchScope::Everything)
            .into_iter()
            .find_map(|manifest| Self::from_manifest(db, manifest))
    }

    /// Every indexed module, sorted by name.
    pub fn all(db: &'db Database) -> Vec<Self> {
        db.module_index()
            .all_keys(&SearchScope::Everything)
            .iter()
            .filter_map(|name| Self::by_name(db, name))
            .collect()
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest_file(&self) -> FileId {
        self.manifest
    }

    pub fn descriptor(&self) -> Option<Arc<ManifestDescriptor>> {
        self.db.manifest_descriptor(self.manifest)
    }

    // ========================================================================
    // DEPENDENCIES
    // ========================================================================

    /// Names declared in this module's manifest, in declaration order.
    pub fn direct_depends(&self) -> Vec<SmolStr> {
        self.db.dependency_index().keys_of(self.manifest)
    }

    /// Declared dependencies that exist in the project.
    pub fn direct_depends_modules(&self) -> Vec<Module<'db>> {
        self.direct_depends()
            .iter()
            .filter_map(|name| Self::by_name(self.db, name))
            .collect()
    }

    /// Transitive dependency names in preorder, ending with the base module.
    ///
    /// Every dependency's own closure ends with the base module, so the base
    /// module follows the first subtree that is expanded. Each module is
    /// expanded at most once, so dependency cycles terminate.
    pub fn depends(&self) -> Vec<SmolStr> {
        let mut seen = IndexSet::new();
        self.collect_depends(&mut seen);
        seen.into_iter().collect()
    }

    fn collect_depends(&self, seen: &mut IndexSet<SmolStr>) {
        for dep in self.direct_depends_modules() {
            if seen.insert(dep.name.clone()) {
                dep.collect_depends(seen);
            }
        }
        seen.insert(self.db.config().base_module.clone());
    }

    /// Modules of [`depends`](Self::depends); this module last when
    /// `include_self` is set.
    pub fn depends_modules(&self, include_self: bool) -> Vec<Module<'db>> {
        self.closure_modules(self.depends(), include_self)
    }

    /// Manifests declaring a dependency on this module.
    pub fn direct_dependings(&self) -> Vec<Module<'db>> {
        self.db
            .dependency_index()
            .files_for_key(&self.name, &SearchScope::Everything)
            .into_iter()
            .filter_map(|manifest| Self::from_manifest(self.db, manifest))
            .collect()
    }

    /// Names of every module depending on this one, directly or not.
    pub fn dependings(&self) -> Vec<SmolStr> {
        let mut seen = IndexSet::new();
        self.collect_dependings(&mut seen);
        seen.into_iter().collect()
    }

    fn collect_dependings(&self, seen: &mut IndexSet<SmolStr>) {
        for dep in self.direct_dependings() {
            if seen.insert(dep.name.clone()) {
                dep.collect_dependings(seen);
            }
        }
    }

    pub fn dependings_modules(&self, include_self: bool) -> Vec<Module<'db>> {
        self.closure_modules(self.dependings(), include_self)
    }

    fn closure_modules(&self, names: Vec<SmolStr>, include_self: bool) -> Vec<Module<'db>> {
        let mut modules: Vec<Module<'db>> = names
            .iter()
            .filter(|name| **name != self.name)
            .filter_map(|name| Self::by_name(self.db, name))
            .collect();
        if include_self {
            modules.push(self.clone());
        }
        modules
    }

    /// Whether code in this module may refer to module `name`.
    ///
    /// A module always sees itself.
    pub fn can_see(&self, name: &str) -> bool {
        self.name == name || self.depends().iter().any(|d| d == name)
    }

    // ========================================================================
    // FILES AND SCOPES
    // ========================================================================

    /// Files below this module's directory.
    pub fn own_files(&self) -> Arc<[FileId]> {
        self.db.module_files(&self.dir)
    }

    /// Own files, preceded by those of every transitive dependency when
    /// `include_depends` is set.
    pub fn files(&self, include_depends: bool) -> Vec<FileId> {
        if !include_depends {
            return self.own_files().to_vec();
        }
        let mut files = IndexSet::new();
        for module in self.depends_modules(true) {
            files.extend(module.own_files().iter().copied());
        }
        files.into_iter().collect()
    }

    pub fn python_files(&self, include_depends: bool) -> Vec<FileId> {
        self.only_python(self.files(include_depends))
    }

    /// Files of the modules depending on this one; own files excluded.
    pub fn depending_files(&self) -> Vec<FileId> {
        let mut files = IndexSet::new();
        for module in self.dependings_modules(false) {
            files.extend(module.own_files().iter().copied());
        }
        files.into_iter().collect()
    }

    pub fn depending_python_files(&self) -> Vec<FileId> {
        self.only_python(self.depending_files())
    }

    fn only_python(&self, files: Vec<FileId>) -> Vec<FileId> {
        let vfs = self.db.vfs();
        files
            .into_iter()
            .filter(|file| vfs.path(*file).is_some_and(is_python_file))
            .collect()
    }

    pub fn scope(&self, include_depends: bool) -> SearchScope {
        SearchScope::files(self.files(include_depends))
    }

    pub fn python_scope(&self, include_depends: bool) -> SearchScope {
        SearchScope::files(self.python_files(include_depends))
    }

    pub fn depending_scope(&self) -> SearchScope {
        SearchScope::files(self.depending_files())
    }

    pub fn depending_python_scope(&self) -> SearchScope {
        SearchScope::files(self.depending_python_files())
    }

    /// Model ids declared in this module (and its dependencies).
    pub fn models(&self, include_depends: bool) -> Vec<SmolStr> {
        self.db
            .model_index()
            .all_keys(&self.python_scope(include_depends))
    }
}

impl PartialEq for Module<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.dir == other.dir && self.manifest == other.manifest
    }
}

impl Eq for Module<'_> {}

impl fmt::Debug for Module<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("dir", &self.dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(db: &Database, dir: &str, depends: &[&str]) {
        let list: Vec<String> = depends.iter().map(|d| format!("'{d}'")).collect();
        db.set_file_content(Path::new(&format!("{dir}/__init__.py")), "");
        db.set_file_content(
            Path::new(&format!("{dir}/__manifest__.py")),
            &format!("{{'depends': [{}]}}", list.join(", ")),
        );
    }

    #[test]
    fn test_lookup_by_name_and_file() {
        let db = Database::default();
        module(&db, "/addons/sale", &["base"]);
        db.set_file_content(Path::new("/addons/sale/models/order.py"), "");
        db.reindex_all();

        let sale = Module::by_name(&db, "sale").unwrap();
        assert_eq!(sale.dir(), Path::new("/addons/sale"));
        assert_eq!(
            Module::containing(&db, Path::new("/addons/sale/models/order.py")),
            Some(sale)
        );
        assert!(Module::by_name(&db, "stock").is_none());
    }

    #[test]
    fn test_directory_without_init_is_not_a_module() {
        let db = Database::default();
        db.set_file_content(Path::new("/addons/x/__manifest__.py"), "{}");
        db.reindex_all();
        assert!(Module::from_dir(&db, Path::new("/addons/x")).is_none());
    }

    #[test]
    fn test_unknown_dependencies_are_skipped() {
        let db = Database::default();
        module(&db, "/a/base", &[]);
        module(&db, "/a/sale", &["missing", "base"]);
        db.reindex_all();

        let sale = Module::by_name(&db, "sale").unwrap();
        assert_eq!(sale.direct_depends(), vec!["missing", "base"]);
        assert_eq!(sale.direct_depends_modules().len(), 1);
        assert_eq!(sale.depends(), vec!["base"]);
    }

    #[test]
    fn test_depends_modules_puts_self_last() {
        let db = Database::default();
        module(&db, "/a/base", &[]);
        module(&db, "/a/sale", &["base"]);
        db.reindex_all();

        let sale = Module::by_name(&db, "sale").unwrap();
        let names: Vec<_> = sale
            .depends_modules(true)
            .iter()
            .map(|m| m.name().clone())
            .collect();
        assert_eq!(names, vec!["base", "sale"]);
        assert_eq!(sale.depends_modules(false).len(), 1);
    }

    #[test]
    fn test_module_sees_itself() {
        let db = Database::default();
        module(&db, "/a/lonely", &[]);
        db.reindex_all();

        let lonely = Module::by_name(&db, "lonely").unwrap();
        assert!(lonely.can_see("lonely"));
        assert!(lonely.can_see("base"));
        assert!(!lonely.can_see("sale"));
    }

    #[test]
    fn test_own_files_follow_structure_changes() {
        let db = Database::default();
        module(&db, "/a/m", &[]);
        db.reindex_all();
        let m = Module::by_name(&db, "m").unwrap();
        assert_eq!(m.own_files().len(), 2);

        db.set_file_content(Path::new("/a/m/models/x.py"), "");
        assert_eq!(m.own_files().len(), 3);
        assert_eq!(m.python_files(false).len(), 3);
    }
}
