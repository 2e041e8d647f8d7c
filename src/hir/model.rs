//! The model entity: one class contributing to a logical model, and the
//! other contributors visible from it.

use std::sync::Arc;

use smol_str::SmolStr;

use super::descriptors::{FieldDescriptor, ModelDescriptor};
use super::index::SearchScope;
use super::{ClassPtr, Database, Module};

/// A model class with its parsed descriptor.
#[derive(Debug, Clone)]
pub struct Model<'db> {
    db: &'db Database,
    descriptor: Arc<ModelDescriptor>,
}

impl<'db> Model<'db> {
    /// The model declared by `class`, if the class is a model.
    pub fn from_class(db: &'db Database, class: ClassPtr) -> Option<Self> {
        db.model_descriptor(class)
            .map(|descriptor| Self { db, descriptor })
    }

    pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
        &self.descriptor
    }

    pub fn id(&self) -> &SmolStr {
        &self.descriptor.id
    }

    pub fn class(&self) -> ClassPtr {
        self.descriptor.class
    }

    /// Module declaring this class.
    pub fn module(&self) -> Option<Module<'db>> {
        Module::for_file(self.db, self.descriptor.class.file)
    }

    /// Other classes of this model in this module and its dependencies,
    /// dependencies first in module order.
    pub fn parent_classes(&self) -> impl Iterator<Item = ClassPtr> + Clone + use<'db> {
        let this = self.class();
        let scope = self.scope_of(|module| module.python_scope(true));
        classes_by_model_name(self.db, self.id().clone(), &scope).filter(move |class| *class != this)
    }

    /// Classes of this model in modules depending on this one.
    pub fn child_classes(&self) -> impl Iterator<Item = ClassPtr> + Clone + use<'db> {
        let scope = self.scope_of(|module| module.depending_python_scope());
        classes_by_model_name(self.db, self.id().clone(), &scope)
    }

    fn scope_of(&self, scope: impl FnOnce(&Module<'db>) -> SearchScope) -> SearchScope {
        self.module()
            .map(|module| scope(&module))
            .unwrap_or_else(SearchScope::empty)
    }

    /// Fields declared in this class body.
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        self.db
            .resolve_class(self.class())
            .map(|class| FieldDescriptor::collect(&class))
            .unwrap_or_default()
    }
}

impl PartialEq for Model<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl Eq for Model<'_> {}

/// Classes declaring model `name` in the files of `scope`, in scope order.
///
/// Files are parsed as the iterator advances; clone the iterator to restart.
pub fn classes_by_model_name<'db>(
    db: &'db Database,
    name: SmolStr,
    scope: &SearchScope,
) -> impl Iterator<Item = ClassPtr> + Clone + use<'db> {
    db.model_index()
        .files_for_key(&name, scope)
        .into_iter()
        .flat_map(move |file| {
            let name = name.clone();
            db.file_models(file)
                .into_iter()
                .filter(move |descriptor| descriptor.id == name)
                .map(|descriptor| descriptor.class)
        })
}
