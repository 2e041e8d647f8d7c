use std::path::Path;

use indexmap::IndexSet;
use smol_str::SmolStr;

use super::{IndexExtension, IndexInput};
use crate::project::Vfs;
use crate::project::discovery::{is_manifest_file, is_python_file, module_name};

/// Module name → manifest file(s).
///
/// The key is the name of the manifest's directory, so the index does not
/// depend on manifest content.
pub struct ModuleIndex;

impl IndexExtension for ModuleIndex {
    const NAME: &'static str = "odoo.module";
    const VERSION: u32 = 1;
    const DEPENDS_ON_CONTENT: bool = false;

    fn accepts_input(vfs: &Vfs, path: &Path) -> bool {
        is_python_file(path) && is_manifest_file(vfs, path)
    }

    fn index(input: &IndexInput<'_>) -> IndexSet<SmolStr> {
        input
            .path
            .parent()
            .and_then(module_name)
            .map(|name| IndexSet::from([SmolStr::new(name)]))
            .unwrap_or_default()
    }
}
