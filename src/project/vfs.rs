//! In-memory virtual file system.
//!
//! Every file the analysis knows about lives here, keyed by path. Directories
//! are not stored: a directory exists while at least one file lies below it.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base::FileId;

#[derive(Debug, Clone)]
struct FileEntry {
    path: PathBuf,
    text: Arc<str>,
    revision: u64,
}

/// Outcome of [`Vfs::set_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VfsChange {
    Created(FileId),
    Modified(FileId),
    Unchanged(FileId),
}

impl VfsChange {
    pub fn file_id(self) -> FileId {
        match self {
            Self::Created(id) | Self::Modified(id) | Self::Unchanged(id) => id,
        }
    }

    pub fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

/// Path-keyed file store.
///
/// `FileId`s are handed out sequentially and never reused, so an id held
/// past the removal of its file simply stops resolving. Each content change
/// gets a fresh, globally unique revision.
#[derive(Debug, Default)]
pub struct Vfs {
    paths: BTreeMap<PathBuf, FileId>,
    entries: Vec<Option<FileEntry>>,
    last_revision: u64,
}

impl Vfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the text of the file at `path`.
    pub fn set_file(&mut self, path: impl Into<PathBuf>, text: impl Into<Arc<str>>) -> VfsChange {
        let path = path.into();
        let text = text.into();

        if let Some(&id) = self.paths.get(&path)
            && let Some(Some(entry)) = self.entries.get_mut(id.index() as usize)
        {
            if entry.text == text {
                return VfsChange::Unchanged(id);
            }
            self.last_revision += 1;
            entry.text = text;
            entry.revision = self.last_revision;
            return VfsChange::Modified(id);
        }

        let id = FileId::new(self.entries.len() as u32);
        self.last_revision += 1;
        self.entries.push(Some(FileEntry {
            path: path.clone(),
            text,
            revision: self.last_revision,
        }));
        self.paths.insert(path, id);
        VfsChange::Created(id)
    }

    pub fn remove_file(&mut self, path: &Path) -> Option<FileId> {
        let id = self.paths.remove(path)?;
        if let Some(slot) = self.entries.get_mut(id.index() as usize) {
            *slot = None;
        }
        Some(id)
    }

    fn entry(&self, id: FileId) -> Option<&FileEntry> {
        self.entries.get(id.index() as usize)?.as_ref()
    }

    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.paths.get(path).copied()
    }

    pub fn path(&self, id: FileId) -> Option<&Path> {
        self.entry(id).map(|e| e.path.as_path())
    }

    pub fn text(&self, id: FileId) -> Option<Arc<str>> {
        self.entry(id).map(|e| e.text.clone())
    }

    /// Revision of the file's current content.
    pub fn revision(&self, id: FileId) -> Option<u64> {
        self.entry(id).map(|e| e.revision)
    }

    pub fn is_file(&self, path: &Path) -> bool {
        self.paths.contains_key(path)
    }

    /// A path is a directory when some file lies strictly below it.
    pub fn is_dir(&self, path: &Path) -> bool {
        self.paths
            .range::<Path, _>((Bound::Excluded(path), Bound::Unbounded))
            .next()
            .is_some_and(|(p, _)| p.starts_with(path))
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    /// `dir/name`, if such a file or directory exists.
    pub fn child(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        let path = dir.join(name);
        self.exists(&path).then_some(path)
    }

    /// All files below `dir`, recursively, in path order.
    pub fn files_under(&self, dir: &Path) -> Vec<FileId> {
        self.paths
            .range::<Path, _>((Bound::Excluded(dir), Bound::Unbounded))
            .take_while(|(p, _)| p.starts_with(dir))
            .map(|(_, &id)| id)
            .collect()
    }

    /// Names of the direct children (files and directories) of `dir`.
    pub fn child_names(&self, dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (path, _) in self
            .paths
            .range::<Path, _>((Bound::Excluded(dir), Bound::Unbounded))
            .take_while(|(p, _)| p.starts_with(dir))
        {
            let Ok(rest) = path.strip_prefix(dir) else {
                continue;
            };
            if let Some(first) = rest.components().next() {
                let name = first.as_os_str().to_string_lossy().into_owned();
                if names.last() != Some(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &Path)> + '_ {
        self.paths.iter().map(|(p, &id)| (id, p.as_path()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
