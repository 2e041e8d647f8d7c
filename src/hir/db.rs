//! The analysis database: file set, trackers, indices and derived caches.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::{RwLock, RwLockReadGuard};
use rayon::prelude::*;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::{FileId, ModuleTrackers, TextRange};
use crate::parser::ClassDef;
use crate::project::discovery::{
    find_owning_module, has_manifest_name, is_init_file, is_manifest_file, module_name,
};
use crate::project::{ProjectConfig, Vfs, listener};
use crate::syntax::SyntaxFile;

use super::cache::{DependencyStamp, StampedCache};
use super::descriptors::{ManifestDescriptor, ModelDescriptor};
use super::index::{
    FieldIndex, FileBasedIndex, IndexInput, ModelIndex, ModuleDependencyIndex, ModuleIndex,
};
use super::ClassPtr;

// ============================================================================
// DATABASE
// ============================================================================

/// Owner of all analysis state.
///
/// The file set is the only input. Indices are updated explicitly through
/// [`reindex_files`](Self::reindex_files); everything else is derived on
/// demand and cached against modification trackers or file revisions.
pub struct Database {
    config: ProjectConfig,
    vfs: RwLock<Vfs>,
    trackers: ModuleTrackers,

    module_index: FileBasedIndex<ModuleIndex>,
    dependency_index: FileBasedIndex<ModuleDependencyIndex>,
    model_index: FileBasedIndex<ModelIndex>,
    field_index: FileBasedIndex<FieldIndex>,

    /// Parsed files, stamped with the file revision.
    parses: StampedCache<FileId, Arc<SyntaxFile>>,
    /// Manifest descriptors, stamped with the module's manifest tracker.
    manifests: StampedCache<FileId, Option<Arc<ManifestDescriptor>>>,
    /// Model descriptors keyed by class identity, stamped with the file revision.
    models: StampedCache<(FileId, TextRange), Option<Arc<ModelDescriptor>>>,
    /// Own files of a module directory, stamped with its structure tracker.
    module_files: StampedCache<PathBuf, Arc<[FileId]>>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new(ProjectConfig::default())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("files", &self.vfs.read().len())
            .field("module_index", &self.module_index)
            .field("model_index", &self.model_index)
            .finish_non_exhaustive()
    }
}

/// Keys computed for one file across all indices.
#[derive(Default)]
struct FileKeys {
    modules: IndexSet<SmolStr>,
    dependencies: IndexSet<SmolStr>,
    models: IndexSet<SmolStr>,
    fields: IndexSet<SmolStr>,
}

impl Database {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            vfs: RwLock::new(Vfs::new()),
            trackers: ModuleTrackers::new(),
            module_index: FileBasedIndex::new(),
            dependency_index: FileBasedIndex::new(),
            model_index: FileBasedIndex::new(),
            field_index: FileBasedIndex::new(),
            parses: StampedCache::new("parse"),
            manifests: StampedCache::new("manifest_descriptor"),
            models: StampedCache::new("model_descriptor"),
            module_files: StampedCache::new("module_files"),
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn trackers(&self) -> &ModuleTrackers {
        &self.trackers
    }

    /// Read access to the file set.
    pub fn vfs(&self) -> RwLockReadGuard<'_, Vfs> {
        self.vfs.read()
    }

    pub fn module_index(&self) -> &FileBasedIndex<ModuleIndex> {
        &self.module_index
    }

    pub fn dependency_index(&self) -> &FileBasedIndex<ModuleDependencyIndex> {
        &self.dependency_index
    }

    pub fn model_index(&self) -> &FileBasedIndex<ModelIndex> {
        &self.model_index
    }

    pub fn field_index(&self) -> &FileBasedIndex<FieldIndex> {
        &self.field_index
    }

    // ========================================================================
    // INPUTS
    // ========================================================================

    /// Set the text of a file and record the change.
    ///
    /// Returns the files whose index entries are now out of date.
    pub fn set_file_content(&self, path: &Path, text: &str) -> Vec<FileId> {
        let mut vfs = self.vfs.write();
        let change = vfs.set_file(path, text);
        let file = change.file_id();
        if !change.is_change() {
            return Vec::new();
        }

        listener::file_changed(&vfs, &self.trackers, path);
        self.forget_file(file);

        if is_init_file(path) || has_manifest_name(path) {
            // Module boundaries may have moved: everything below is affected.
            path.parent()
                .map(|dir| vfs.files_under(dir))
                .unwrap_or_else(|| vec![file])
        } else {
            vec![file]
        }
    }

    /// Remove a file. Its index entries are dropped immediately.
    ///
    /// Returns the other files whose index entries are now out of date.
    pub fn remove_file(&self, path: &Path) -> Vec<FileId> {
        let mut vfs = self.vfs.write();
        let Some(file) = vfs.file_id(path) else {
            return Vec::new();
        };

        listener::file_changed(&vfs, &self.trackers, path);
        let affected = if is_init_file(path) || has_manifest_name(path) {
            path.parent()
                .map(|dir| vfs.files_under(dir))
                .unwrap_or_default()
                .into_iter()
                .filter(|f| *f != file)
                .collect()
        } else {
            Vec::new()
        };

        vfs.remove_file(path);
        self.forget_file(file);
        self.module_index.remove(file);
        self.dependency_index.remove(file);
        self.model_index.remove(file);
        self.field_index.remove(file);
        affected
    }

    fn forget_file(&self, file: FileId) {
        self.parses.invalidate(&file);
        self.models.retain(|(f, _)| *f != file);
    }

    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.vfs.read().file_id(path)
    }

    pub fn file_path(&self, file: FileId) -> Option<PathBuf> {
        self.vfs.read().path(file).map(Path::to_path_buf)
    }

    pub fn file_text(&self, file: FileId) -> Option<Arc<str>> {
        self.vfs.read().text(file)
    }

    pub fn file_revision(&self, file: FileId) -> Option<u64> {
        self.vfs.read().revision(file)
    }

    // ========================================================================
    // INDEXING
    // ========================================================================

    /// Bring the index entries of `files` up to date.
    ///
    /// Files are indexed in parallel. If any index changed format, every
    /// file is indexed instead.
    pub fn reindex_files(&self, files: &[FileId]) {
        let rebuild = [
            self.module_index.ensure_version(),
            self.dependency_index.ensure_version(),
            self.model_index.ensure_version(),
            self.field_index.ensure_version(),
        ]
        .contains(&true);

        let vfs = self.vfs.read();
        let all: Vec<FileId>;
        let files = if rebuild {
            all = vfs.iter().map(|(id, _)| id).collect();
            &all[..]
        } else {
            files
        };

        let computed: Vec<(FileId, Option<FileKeys>)> = files
            .par_iter()
            .map(|&file| (file, self.compute_keys(&vfs, file)))
            .collect();
        drop(vfs);

        for (file, keys) in computed {
            match keys {
                Some(keys) => {
                    self.module_index.update(file, keys.modules);
                    self.dependency_index.update(file, keys.dependencies);
                    self.model_index.update(file, keys.models);
                    self.field_index.update(file, keys.fields);
                }
                None => {
                    self.module_index.remove(file);
                    self.dependency_index.remove(file);
                    self.model_index.remove(file);
                    self.field_index.remove(file);
                }
            }
        }
        debug!(files = files.len(), rebuild, "reindexed files");
    }

    /// Index every file in the file set.
    pub fn reindex_all(&self) {
        let files: Vec<FileId> = self.vfs.read().iter().map(|(id, _)| id).collect();
        self.reindex_files(&files);
    }

    fn compute_keys(&self, vfs: &Vfs, file: FileId) -> Option<FileKeys> {
        let path = vfs.path(file)?;
        let revision = vfs.revision(file)?;

        let wanted = self.module_index.accepts_input(vfs, path)
            || self.dependency_index.accepts_input(vfs, path)
            || self.model_index.accepts_input(vfs, path)
            || self.field_index.accepts_input(vfs, path);
        if !wanted {
            return Some(FileKeys::default());
        }

        let syntax = self.parse_in(vfs, file)?;
        let input = IndexInput {
            file,
            revision,
            path,
            syntax: &syntax,
        };
        trace!(file = %path.display(), "indexing file");
        Some(FileKeys {
            modules: self.module_index.compute(vfs, &input),
            dependencies: self.dependency_index.compute(vfs, &input),
            models: self.model_index.compute(vfs, &input),
            fields: self.field_index.compute(vfs, &input),
        })
    }

    // ========================================================================
    // DERIVED DATA
    // ========================================================================

    /// Parse a file (cached per revision).
    pub fn parse(&self, file: FileId) -> Option<Arc<SyntaxFile>> {
        let vfs = self.vfs.read();
        self.parse_in(&vfs, file)
    }

    fn parse_in(&self, vfs: &Vfs, file: FileId) -> Option<Arc<SyntaxFile>> {
        let revision = vfs.revision(file)?;
        let text = vfs.text(file)?;
        Some(self.parses.get_or_compute(
            &file,
            || DependencyStamp::from(revision),
            || Arc::new(SyntaxFile::new(&text)),
        ))
    }

    /// Descriptor of the manifest `file`, if it is the manifest of a module.
    pub fn manifest_descriptor(&self, file: FileId) -> Option<Arc<ManifestDescriptor>> {
        let vfs = self.vfs.read();
        let path = vfs.path(file)?;
        if !is_manifest_file(&vfs, path) {
            return None;
        }
        let dir = path.parent()?;
        let tracker = self.trackers.manifest.get(module_name(dir)?);

        self.manifests.get_or_compute(
            &file,
            || DependencyStamp::of(&[tracker.as_ref()]),
            || {
                let syntax = self.parse_in(&vfs, file)?;
                ManifestDescriptor::parse(dir, file, &syntax.source_file()?).map(Arc::new)
            },
        )
    }

    /// Resolve a class pointer against the current tree of its file.
    ///
    /// A pointer into an older revision resolves to `None`.
    pub fn resolve_class(&self, ptr: ClassPtr) -> Option<ClassDef> {
        let vfs = self.vfs.read();
        self.resolve_class_in(&vfs, ptr)
    }

    fn resolve_class_in(&self, vfs: &Vfs, ptr: ClassPtr) -> Option<ClassDef> {
        if vfs.revision(ptr.file) != Some(ptr.revision) {
            debug!(file = ?ptr.file, revision = ptr.revision, "stale class pointer");
            return None;
        }
        let syntax = self.parse_in(vfs, ptr.file)?;
        ptr.to_node(&syntax.syntax())
    }

    /// Pointers to the top-level classes of `file`.
    pub fn top_level_classes(&self, file: FileId) -> Vec<ClassPtr> {
        let vfs = self.vfs.read();
        let Some(revision) = vfs.revision(file) else {
            return Vec::new();
        };
        let Some(source) = self.parse_in(&vfs, file).and_then(|s| s.source_file()) else {
            return Vec::new();
        };
        source
            .classes()
            .map(|class| ClassPtr::new(file, revision, &class))
            .collect()
    }

    /// Model descriptor of a class, `None` for stale pointers and non-models.
    pub fn model_descriptor(&self, ptr: ClassPtr) -> Option<Arc<ModelDescriptor>> {
        let vfs = self.vfs.read();
        if vfs.revision(ptr.file) != Some(ptr.revision) {
            debug!(file = ?ptr.file, revision = ptr.revision, "stale class pointer");
            return None;
        }
        self.models.get_or_compute(
            &(ptr.file, ptr.range),
            || DependencyStamp::from(ptr.revision),
            || {
                let class = self.resolve_class_in(&vfs, ptr)?;
                ModelDescriptor::parse(ptr, &class).map(Arc::new)
            },
        )
    }

    /// Descriptors of the model classes declared at the top level of `file`.
    pub fn file_models(&self, file: FileId) -> Vec<Arc<ModelDescriptor>> {
        self.top_level_classes(file)
            .into_iter()
            .filter_map(|ptr| self.model_descriptor(ptr))
            .collect()
    }

    /// All files below a module directory (cached per structure change).
    pub fn module_files(&self, dir: &Path) -> Arc<[FileId]> {
        let vfs = self.vfs.read();
        let Some(name) = module_name(dir) else {
            return Arc::from(Vec::new());
        };
        let tracker = self.trackers.structure.get(name);
        self.module_files.get_or_compute(
            &dir.to_path_buf(),
            || DependencyStamp::of(&[tracker.as_ref()]),
            || Arc::from(vfs.files_under(dir)),
        )
    }

    /// Directory of the module owning `path`.
    pub fn owning_module_dir(&self, path: &Path) -> Option<PathBuf> {
        find_owning_module(&self.vfs.read(), path)
    }
}
