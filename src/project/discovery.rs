//! Module boundary discovery.
//!
//! A module directory holds an init marker next to a manifest file. These
//! predicates are cheap enough to evaluate on every query.

use std::path::{Path, PathBuf};

use crate::base::constants::{INIT_FILE, MANIFEST_FILES, PYTHON_EXTENSION};

use super::Vfs;

/// True if `dir` contains the init marker and a recognized manifest.
pub fn is_module_directory(vfs: &Vfs, dir: &Path) -> bool {
    vfs.is_file(&dir.join(INIT_FILE)) && manifest_in_directory(vfs, dir).is_some()
}

/// The manifest of `dir`; the canonical name wins over the legacy alias.
pub fn manifest_in_directory(vfs: &Vfs, dir: &Path) -> Option<PathBuf> {
    MANIFEST_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| vfs.is_file(path))
}

/// Nearest module directory at or above `path`.
pub fn find_owning_module(vfs: &Vfs, path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .find(|dir| is_module_directory(vfs, dir))
        .map(Path::to_path_buf)
}

/// True if `path` is the manifest of a module directory.
pub fn is_manifest_file(vfs: &Vfs, path: &Path) -> bool {
    let Some(dir) = path.parent() else {
        return false;
    };
    manifest_in_directory(vfs, dir).is_some_and(|manifest| manifest == path)
        && vfs.is_file(&dir.join(INIT_FILE))
}

/// True if `path` has a recognized manifest file name, module or not.
pub fn has_manifest_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| MANIFEST_FILES.contains(&n))
}

pub fn is_init_file(path: &Path) -> bool {
    path.file_name().is_some_and(|n| n == INIT_FILE)
}

pub fn is_python_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PYTHON_EXTENSION)
}

/// Module name of a module directory (its base name).
pub fn module_name(dir: &Path) -> Option<&str> {
    dir.file_name()?.to_str()
}
