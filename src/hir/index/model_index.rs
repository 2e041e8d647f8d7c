use std::path::Path;

use indexmap::IndexSet;
use smol_str::SmolStr;

use super::{IndexExtension, IndexInput};
use crate::hir::{ClassPtr, ModelDescriptor};
use crate::project::Vfs;
use crate::project::discovery::{find_owning_module, is_python_file};

/// Model id → files with a top-level class contributing to that model.
pub struct ModelIndex;

impl IndexExtension for ModelIndex {
    const NAME: &'static str = "odoo.model";
    const VERSION: u32 = 1;

    fn accepts_input(vfs: &Vfs, path: &Path) -> bool {
        is_python_file(path) && find_owning_module(vfs, path).is_some()
    }

    fn index(input: &IndexInput<'_>) -> IndexSet<SmolStr> {
        let Some(source) = input.syntax.source_file() else {
            return IndexSet::new();
        };
        source
            .classes()
            .filter_map(|class| {
                let ptr = ClassPtr::new(input.file, input.revision, &class);
                ModelDescriptor::parse(ptr, &class).map(|d| d.id)
            })
            .collect()
    }
}
