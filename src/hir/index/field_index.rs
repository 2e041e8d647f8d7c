use std::path::Path;

use indexmap::IndexSet;
use smol_str::SmolStr;

use super::{IndexExtension, IndexInput};
use crate::hir::{ClassPtr, FieldDescriptor, ModelDescriptor};
use crate::project::Vfs;
use crate::project::discovery::{find_owning_module, is_python_file};

/// Field name → files declaring a field with that name on a model class.
pub struct FieldIndex;

impl IndexExtension for FieldIndex {
    const NAME: &'static str = "odoo.field";
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
            .filter(|class| {
                let ptr = ClassPtr::new(input.file, input.revision, class);
                ModelDescriptor::parse(ptr, class).is_some()
            })
            .flat_map(|class| FieldDescriptor::collect(&class))
            .map(|field| field.name)
            .collect()
    }
}
