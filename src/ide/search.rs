//! Inheritance-aware search over model classes.

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::hir::{ClassPtr, Database, Model};
use crate::parser::AstNode;

/// A method found in some class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodPtr {
    pub class: ClassPtr,
    pub file: FileId,
    pub range: TextRange,
}

/// Same-named methods in the parent classes of `class`, nearest module
/// dependency first.
///
/// The iterator is lazy: taking only the first element parses only the files
/// needed to find it.
pub fn super_methods<'db>(
    db: &'db Database,
    class: ClassPtr,
    method: &str,
) -> impl Iterator<Item = MethodPtr> + use<'db> {
    let method = SmolStr::new(method);
    Model::from_class(db, class)
        .into_iter()
        .flat_map(|model| model.parent_classes())
        .filter_map(move |parent| {
            let found = db.resolve_class(parent)?.method(&method)?;
            Some(MethodPtr {
                class: parent,
                file: parent.file,
                range: found.syntax().text_range(),
            })
        })
}

/// Classes extending the model declared by `class` from depending modules.
pub fn inheritors<'db>(
    db: &'db Database,
    class: ClassPtr,
) -> impl Iterator<Item = ClassPtr> + use<'db> {
    Model::from_class(db, class)
        .into_iter()
        .flat_map(|model| model.child_classes())
}
