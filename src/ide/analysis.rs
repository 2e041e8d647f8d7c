//! AnalysisHost and Analysis: state management for IDE features.
//!
//! The `AnalysisHost` owns the database and records which files changed;
//! `Analysis` snapshots answer queries and can be sent to worker threads.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.load_directory(Path::new("/srv/addons"))?;
//! host.set_file_content("/srv/addons/sale/models/order.py", source);
//!
//! let analysis = host.analysis();
//! let file = analysis.file_id("/srv/addons/sale/models/order.py").unwrap();
//! let completions = analysis.completions(file, 3, 14);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::base::{FileId, LineCol, TextSize};
use crate::hir::{ClassPtr, Database, Module};
use crate::project::{LoadError, ProjectConfig, WorkspaceLoader};

use super::{
    AddonsMember, CompletionItem, ImportTarget, MethodPtr, Reference, ReferenceTarget,
};

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`, then get a
/// consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    db: Arc<Database>,
    /// Files whose index entries are out of date.
    pending: IndexSet<FileId>,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_config(ProjectConfig::default())
    }

    pub fn with_config(config: ProjectConfig) -> Self {
        Self {
            db: Arc::new(Database::new(config)),
            pending: IndexSet::new(),
        }
    }

    /// Set the content of a file. Indices catch up on the next `analysis()`.
    pub fn set_file_content(&mut self, path: impl AsRef<Path>, content: &str) {
        let affected = self.db.set_file_content(path.as_ref(), content);
        self.pending.extend(affected);
    }

    /// Remove a file. Returns `false` if it was not loaded.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let Some(file) = self.db.file_id(path) else {
            return false;
        };
        let affected = self.db.remove_file(path);
        self.pending.shift_remove(&file);
        self.pending.extend(affected);
        true
    }

    /// Load every file below `root`.
    ///
    /// Returns the entries that could not be read; a missing root is an error.
    pub fn load_directory(&mut self, root: &Path) -> Result<Vec<LoadError>, LoadError> {
        let loaded = WorkspaceLoader::new().load_directory(root)?;
        info!(
            root = %root.display(),
            files = loaded.files.len(),
            errors = loaded.errors.len(),
            "loaded workspace"
        );
        for (path, text) in &loaded.files {
            self.set_file_content(path, text);
        }
        Ok(loaded.errors)
    }

    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.db.file_id(path.as_ref()).is_some()
    }

    pub fn file_count(&self) -> usize {
        self.db.vfs().len()
    }

    /// Number of files waiting to be reindexed.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn db(&self) -> &Arc<Database> {
        &self.db
    }

    /// Get a consistent snapshot for querying, reindexing changed files first.
    pub fn analysis(&mut self) -> Analysis {
        if !self.pending.is_empty() {
            let files: Vec<FileId> = self.pending.drain(..).collect();
            debug!(files = files.len(), "reindexing pending files");
            self.db.reindex_files(&files);
        }
        Analysis {
            db: self.db.clone(),
        }
    }
}

/// A snapshot of the analysis state.
///
/// All IDE queries go through this struct. Positions are 0-indexed
/// line/column pairs.
#[derive(Clone)]
pub struct Analysis {
    db: Arc<Database>,
}

impl Analysis {
    // ==================== Files and modules ====================

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.db.file_id(path.as_ref())
    }

    pub fn file_path(&self, file: FileId) -> Option<PathBuf> {
        self.db.file_path(file)
    }

    /// Byte offset of a line/column position in `file`.
    pub fn offset(&self, file: FileId, line: u32, col: u32) -> Option<TextSize> {
        self.db.parse(file)?.offset(LineCol::new(line, col))
    }

    pub fn module_for_file(&self, file: FileId) -> Option<Module<'_>> {
        Module::for_file(&self.db, file)
    }

    pub fn module_by_name(&self, name: &str) -> Option<Module<'_>> {
        Module::by_name(&self.db, name)
    }

    pub fn modules(&self) -> Vec<Module<'_>> {
        Module::all(&self.db)
    }

    /// Top-level classes of a file.
    pub fn classes(&self, file: FileId) -> Vec<ClassPtr> {
        self.db.top_level_classes(file)
    }

    // ==================== References ====================

    pub fn reference_at(&self, file: FileId, line: u32, col: u32) -> Option<Reference> {
        let offset = self.offset(file, line, col)?;
        super::reference_at(&self.db, file, offset)
    }

    pub fn resolve_reference(&self, reference: &Reference) -> Vec<ReferenceTarget> {
        super::resolve_reference(&self.db, reference)
    }

    /// Resolve the reference under the cursor, if any.
    pub fn goto_definition(&self, file: FileId, line: u32, col: u32) -> Vec<ReferenceTarget> {
        self.reference_at(file, line, col)
            .map(|reference| self.resolve_reference(&reference))
            .unwrap_or_default()
    }

    pub fn completions(&self, file: FileId, line: u32, col: u32) -> Vec<CompletionItem> {
        let Some(offset) = self.offset(file, line, col) else {
            return Vec::new();
        };
        super::completions(&self.db, file, offset)
    }

    // ==================== Imports ====================

    pub fn resolve_import(&self, dotted: &str) -> Option<ImportTarget> {
        super::resolve_import(&self.db, dotted)
    }

    pub fn addons_members(&self, origin: FileId, qname: &str) -> Vec<AddonsMember> {
        super::addons_members(&self.db, origin, qname)
    }

    // ==================== Inheritance ====================

    pub fn super_methods<'a>(
        &'a self,
        class: ClassPtr,
        method: &str,
    ) -> impl Iterator<Item = MethodPtr> + use<'a> {
        super::super_methods(&self.db, class, method)
    }

    pub fn inheritors(&self, class: ClassPtr) -> impl Iterator<Item = ClassPtr> + use<'_> {
        super::inheritors(&self.db, class)
    }

    // ==================== Inspections ====================

    pub fn ignore_no_effect_statement(&self, file: FileId) -> bool {
        super::ignore_no_effect_statement(&self.db, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_host_basic() {
        let mut host = AnalysisHost::new();
        host.set_file_content("/a/sale/__init__.py", "");
        host.set_file_content("/a/sale/__manifest__.py", "{'depends': ['base']}");
        assert_eq!(host.pending_count(), 2);

        let analysis = host.analysis();
        assert_eq!(host.pending_count(), 0);
        assert!(analysis.module_by_name("sale").is_some());
    }

    #[test]
    fn test_file_removal() {
        let mut host = AnalysisHost::new();
        host.set_file_content("/a/sale/__init__.py", "");
        host.set_file_content("/a/sale/__manifest__.py", "{}");
        host.analysis();

        assert!(host.remove_file("/a/sale/__manifest__.py"));
        assert!(!host.remove_file("/a/sale/__manifest__.py"));
        let analysis = host.analysis();
        assert!(analysis.module_by_name("sale").is_none());
        assert!(analysis.file_id("/a/sale/__manifest__.py").is_none());
    }

    #[test]
    fn test_snapshot_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analysis>();
    }
}
