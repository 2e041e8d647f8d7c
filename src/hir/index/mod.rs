//! File-based indices: key → set of files, built per file by an extension.
//!
//! Each index is described by an [`IndexExtension`]: a name, a format
//! version, an input filter and an indexer mapping one file to its keys.
//! [`FileBasedIndex`] stores the forward (file → keys) and inverted
//! (key → files) tables and answers scoped queries.
//!
//! Queries never block on a writer: while the table is being updated they
//! return empty results and the caller sees the new data on its next query.

mod dependency_index;
mod field_index;
mod model_index;
mod module_index;

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, info};

use crate::base::FileId;
use crate::project::Vfs;
use crate::syntax::SyntaxFile;

pub use dependency_index::ModuleDependencyIndex;
pub use field_index::FieldIndex;
pub use model_index::ModelIndex;
pub use module_index::ModuleIndex;

/// Everything an indexer may look at for one file.
#[derive(Debug, Clone, Copy)]
pub struct IndexInput<'a> {
    pub file: FileId,
    pub revision: u64,
    pub path: &'a Path,
    pub syntax: &'a SyntaxFile,
}

/// Definition of one index.
pub trait IndexExtension: Send + Sync + 'static {
    /// Unique index name, used in logs.
    const NAME: &'static str;
    /// Format version; a stored table with another version is rebuilt.
    const VERSION: u32;
    /// Whether keys depend on file content (as opposed to its path only).
    const DEPENDS_ON_CONTENT: bool = true;

    /// Input filter: only accepted files are indexed.
    fn accepts_input(vfs: &Vfs, path: &Path) -> bool;

    /// Keys contributed by one accepted file.
    fn index(input: &IndexInput<'_>) -> IndexSet<SmolStr>;
}

// ============================================================================
// SEARCH SCOPE
// ============================================================================

/// The set of files a query is restricted to.
///
/// A file scope is ordered: scoped queries return files in scope order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    Everything,
    Files(Arc<IndexSet<FileId>>),
}

impl SearchScope {
    pub fn files(files: impl IntoIterator<Item = FileId>) -> Self {
        Self::Files(Arc::new(files.into_iter().collect()))
    }

    /// A scope matching no file.
    pub fn empty() -> Self {
        Self::Files(Arc::default())
    }

    pub fn contains(&self, file: FileId) -> bool {
        match self {
            Self::Everything => true,
            Self::Files(files) => files.contains(&file),
        }
    }

    /// Position of `file` in scope order (`None` for unscoped queries).
    pub fn position(&self, file: FileId) -> Option<usize> {
        match self {
            Self::Everything => None,
            Self::Files(files) => files.get_index_of(&file),
        }
    }

    /// Files of the scope, `None` for [`SearchScope::Everything`].
    pub fn file_set(&self) -> Option<&IndexSet<FileId>> {
        match self {
            Self::Everything => None,
            Self::Files(files) => Some(files),
        }
    }

    /// This scope followed by `other`.
    pub fn union(&self, other: &SearchScope) -> SearchScope {
        match (self, other) {
            (Self::Files(a), Self::Files(b)) => {
                Self::files(a.iter().chain(b.iter()).copied())
            }
            _ => Self::Everything,
        }
    }

    pub fn is_superset(&self, other: &SearchScope) -> bool {
        match (self, other) {
            (Self::Everything, _) => true,
            (Self::Files(_), Self::Everything) => false,
            (Self::Files(a), Self::Files(b)) => b.iter().all(|f| a.contains(f)),
        }
    }
}

// ============================================================================
// STORAGE
// ============================================================================

#[derive(Default)]
struct IndexTable {
    version: Option<u32>,
    forward: FxHashMap<FileId, IndexSet<SmolStr>>,
    inverted: FxHashMap<SmolStr, IndexSet<FileId>>,
}

impl IndexTable {
    fn remove(&mut self, file: FileId) {
        let Some(keys) = self.forward.remove(&file) else {
            return;
        };
        for key in keys {
            if let Some(files) = self.inverted.get_mut(&key) {
                files.shift_remove(&file);
                if files.is_empty() {
                    self.inverted.remove(&key);
                }
            }
        }
    }
}

/// In-memory storage of one index.
pub struct FileBasedIndex<E: IndexExtension> {
    table: RwLock<IndexTable>,
    _extension: PhantomData<fn() -> E>,
}

impl<E: IndexExtension> Default for FileBasedIndex<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: IndexExtension> FileBasedIndex<E> {
    /// An empty index that has never been built.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(IndexTable::default()),
            _extension: PhantomData,
        }
    }

    /// An index restored from storage written with `version`.
    pub fn with_stored_version(version: u32) -> Self {
        let index = Self::new();
        index.table.write().version = Some(version);
        index
    }

    pub fn stored_version(&self) -> Option<u32> {
        self.table.read().version
    }

    /// Make sure the stored format matches [`IndexExtension::VERSION`].
    ///
    /// On mismatch all entries are dropped and `true` is returned: every
    /// file must be indexed again.
    pub fn ensure_version(&self) -> bool {
        let mut table = self.table.write();
        if table.version == Some(E::VERSION) {
            return false;
        }
        info!(
            index = E::NAME,
            stored = ?table.version,
            current = E::VERSION,
            "index version changed, rebuilding"
        );
        *table = IndexTable {
            version: Some(E::VERSION),
            ..IndexTable::default()
        };
        true
    }

    pub fn accepts_input(&self, vfs: &Vfs, path: &Path) -> bool {
        E::accepts_input(vfs, path)
    }

    /// Run the indexer, honoring the input filter.
    pub fn compute(&self, vfs: &Vfs, input: &IndexInput<'_>) -> IndexSet<SmolStr> {
        if E::accepts_input(vfs, input.path) {
            E::index(input)
        } else {
            IndexSet::new()
        }
    }

    /// Replace the keys of `file`.
    pub fn update(&self, file: FileId, keys: IndexSet<SmolStr>) {
        let mut table = self.table.write();
        table.remove(file);
        if keys.is_empty() {
            return;
        }
        for key in &keys {
            table.inverted.entry(key.clone()).or_default().insert(file);
        }
        table.forward.insert(file, keys);
    }

    pub fn remove(&self, file: FileId) {
        self.table.write().remove(file);
    }

    fn read(&self) -> Option<parking_lot::RwLockReadGuard<'_, IndexTable>> {
        let table = self.table.try_read();
        if table.is_none() {
            debug!(index = E::NAME, "index is being updated, returning empty result");
        }
        table
    }

    /// Keys contributed by `file`.
    pub fn keys_of(&self, file: FileId) -> Vec<SmolStr> {
        let Some(table) = self.read() else {
            return Vec::new();
        };
        table
            .forward
            .get(&file)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Keys with at least one file in `scope`.
    ///
    /// Scoped results follow scope order; unscoped results are sorted.
    pub fn all_keys(&self, scope: &SearchScope) -> Vec<SmolStr> {
        let Some(table) = self.read() else {
            return Vec::new();
        };
        match scope.file_set() {
            None => {
                let mut keys: Vec<_> = table.inverted.keys().cloned().collect();
                keys.sort();
                keys
            }
            Some(files) => {
                let mut keys = IndexSet::new();
                for file in files {
                    if let Some(file_keys) = table.forward.get(file) {
                        keys.extend(file_keys.iter().cloned());
                    }
                }
                keys.into_iter().collect()
            }
        }
    }

    /// Files containing `key`, restricted to `scope`.
    ///
    /// Scoped results follow scope order; unscoped results are sorted by id.
    pub fn files_for_key(&self, key: &str, scope: &SearchScope) -> Vec<FileId> {
        let Some(table) = self.read() else {
            return Vec::new();
        };
        let Some(files) = table.inverted.get(key) else {
            return Vec::new();
        };
        let mut result: Vec<FileId> = files.iter().copied().filter(|f| scope.contains(*f)).collect();
        match scope {
            SearchScope::Everything => result.sort(),
            SearchScope::Files(_) => result.sort_by_key(|f| scope.position(*f)),
        }
        result
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.read().is_some_and(|t| t.inverted.contains_key(key))
    }

    pub fn file_count(&self) -> usize {
        self.table.read().forward.len()
    }

    pub fn key_count(&self) -> usize {
        self.table.read().inverted.len()
    }
}

impl<E: IndexExtension> fmt::Debug for FileBasedIndex<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.read();
        f.debug_struct("FileBasedIndex")
            .field("name", &E::NAME)
            .field("version", &table.version)
            .field("files", &table.forward.len())
            .field("keys", &table.inverted.len())
            .finish()
    }
}
