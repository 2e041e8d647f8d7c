use std::path::Path;

use indexmap::IndexSet;
use smol_str::SmolStr;

use super::{IndexExtension, IndexInput};
use crate::hir::ManifestDescriptor;
use crate::project::Vfs;
use crate::project::discovery::{is_manifest_file, is_python_file};

/// Depended-upon module name → manifests declaring that dependency.
///
/// The inverted table answers "which modules depend on X"; the forward
/// table of a manifest lists its direct dependencies.
pub struct ModuleDependencyIndex;

impl IndexExtension for ModuleDependencyIndex {
    const NAME: &'static str = "odoo.module.dependency";
    const VERSION: u32 = 1;

    fn accepts_input(vfs: &Vfs, path: &Path) -> bool {
        is_python_file(path) && is_manifest_file(vfs, path)
    }

    fn index(input: &IndexInput<'_>) -> IndexSet<SmolStr> {
        let Some(dir) = input.path.parent() else {
            return IndexSet::new();
        };
        input
            .syntax
            .source_file()
            .and_then(|source| ManifestDescriptor::parse(dir, input.file, &source))
            .map(|descriptor| descriptor.depends.into_iter().collect())
            .unwrap_or_default()
    }
}
