//! Synthetic addon imports: `odoo.addons.<module>[.<path>...]`.
//!
//! Addon modules are importable under a reserved namespace regardless of
//! where their directory lives. Paths outside the namespace are left to the
//! regular import machinery.

use std::path::PathBuf;

use smol_str::SmolStr;
use tracing::trace;

use crate::base::FileId;
use crate::base::constants::PYTHON_EXTENSION;
use crate::hir::{Database, Module};

/// Result of resolving an addon import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportTarget {
    /// A package directory (a module or one of its subpackages).
    Directory(PathBuf),
    File(FileId),
    /// A top-level class, function or variable of a file.
    Member { file: FileId, name: SmolStr },
}

/// Resolve a dotted import path.
///
/// Returns `None` for paths this resolver does not handle (fewer than three
/// segments, or outside the addons namespace) and for paths that stop
/// resolving at some segment.
pub fn resolve_import(db: &Database, dotted: &str) -> Option<ImportTarget> {
    let segments: Vec<&str> = dotted.split('.').collect();
    let namespace = &db.config().addons_namespace;
    if segments.len() < namespace.len() + 1 {
        return None;
    }
    let (prefix, rest) = segments.split_at(namespace.len());
    if prefix.iter().zip(namespace).any(|(a, b)| *a != b.as_str()) {
        return None;
    }

    let (module_name, path) = rest.split_first()?;
    let module = Module::by_name(db, module_name)?;
    let mut target = ImportTarget::Directory(module.dir().to_path_buf());
    for segment in path {
        target = resolve_child(db, &target, segment)?;
    }
    trace!(import = dotted, ?target, "resolved addon import");
    Some(target)
}

/// Resolve `name` relative to `parent`: a subdirectory or `name.py` below a
/// directory, a top-level member of a file.
fn resolve_child(db: &Database, parent: &ImportTarget, name: &str) -> Option<ImportTarget> {
    match parent {
        ImportTarget::Directory(dir) => {
            let vfs = db.vfs();
            let subdir = dir.join(name);
            if vfs.is_dir(&subdir) {
                return Some(ImportTarget::Directory(subdir));
            }
            vfs.file_id(&dir.join(format!("{name}.{PYTHON_EXTENSION}")))
                .map(ImportTarget::File)
        }
        ImportTarget::File(file) => has_top_level_member(db, *file, name).then(|| {
            ImportTarget::Member {
                file: *file,
                name: SmolStr::new(name),
            }
        }),
        ImportTarget::Member { .. } => None,
    }
}

fn has_top_level_member(db: &Database, file: FileId, name: &str) -> bool {
    let Some(source) = db.parse(file).and_then(|s| s.source_file()) else {
        return false;
    };
    source.classes().any(|c| c.name_text().as_deref() == Some(name))
        || source.functions().any(|f| f.name_text().as_deref() == Some(name))
        || source
            .assignments()
            .any(|a| a.target_name().is_some_and(|t| t.text() == name))
}

/// A module offered as a member of the addons namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddonsMember {
    pub name: SmolStr,
    pub dir: PathBuf,
}

/// Members of the addons namespace as seen from `origin`.
///
/// For the qualified names `odoo.addons` and `addons` these are the modules
/// visible from the module owning `origin`. The module itself is listed last,
/// matching [`Module::can_see`], under which a module always sees itself.
/// Any other qualified name has no extra members.
pub fn addons_members(db: &Database, origin: FileId, qname: &str) -> Vec<AddonsMember> {
    if !db.config().addons_member_qnames().iter().any(|q| q == qname) {
        return Vec::new();
    }
    let Some(module) = Module::for_file(db, origin) else {
        return Vec::new();
    };
    module
        .depends_modules(true)
        .into_iter()
        .map(|m| AddonsMember {
            name: m.name().clone(),
            dir: m.dir().to_path_buf(),
        })
        .collect()
}
