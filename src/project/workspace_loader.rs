//! Loading addon trees from disk.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

/// Directories never descended into.
const SKIPPED_DIRS: [&str; 4] = [".git", "__pycache__", "node_modules", ".venv"];

/// Errors raised while reading a workspace from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Files read from a directory, plus the entries that could not be read.
#[derive(Debug, Default)]
pub struct LoadedFiles {
    pub files: Vec<(PathBuf, String)>,
    pub errors: Vec<LoadError>,
}

/// Reads every regular file below a root directory.
///
/// Every file is loaded, not only Python sources: module file scopes list
/// data files too. Files that are not valid UTF-8 are kept with empty text.
#[derive(Debug, Default)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Collect the paths of all regular files below `root`, sorted.
    pub fn collect_file_paths(&self, root: &Path) -> Result<(Vec<PathBuf>, Vec<LoadError>), LoadError> {
        if !root.is_dir() {
            return Err(LoadError::DirectoryNotFound(root.to_path_buf()));
        }

        let mut paths = Vec::new();
        let mut errors = Vec::new();
        let walker = walkdir::WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
            });

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => paths.push(entry.into_path()),
                Ok(_) => {}
                Err(source) => {
                    let path = source.path().unwrap_or(root).to_path_buf();
                    warn!(path = %path.display(), "skipping unreadable directory entry");
                    errors.push(LoadError::Walk { path, source });
                }
            }
        }

        Ok((paths, errors))
    }

    /// Read all files below `root` in parallel.
    pub fn load_directory(&self, root: &Path) -> Result<LoadedFiles, LoadError> {
        let (paths, mut errors) = self.collect_file_paths(root)?;

        let results: Vec<_> = paths
            .into_par_iter()
            .map(|path| match std::fs::read(&path) {
                Ok(bytes) => {
                    let text = String::from_utf8(bytes).unwrap_or_default();
                    Ok((path, text))
                }
                Err(source) => Err(LoadError::Read { path, source }),
            })
            .collect();

        let mut files = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(file) => files.push(file),
                Err(error) => {
                    warn!(%error, "failed to load file");
                    errors.push(error);
                }
            }
        }

        debug!(
            root = %root.display(),
            files = files.len(),
            errors = errors.len(),
            "loaded workspace"
        );
        Ok(LoadedFiles { files, errors })
    }
}
