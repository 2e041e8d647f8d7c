//! String literals that refer to models, modules or module files.

use std::path::PathBuf;

use smol_str::SmolStr;

use crate::base::constants::{
    MANIFEST_FILE_KEYS, MANIFEST_MODULE_KEYS, MODEL_INHERIT_ATTR, MODEL_INHERITS_ATTR,
    MODEL_NAME_ATTR,
};
use crate::base::{FileId, TextRange, TextSize};
use crate::hir::{ClassPtr, Database, Module, classes_by_model_name};
use crate::parser::{AstNode, Assignment, KeyValue, StringExpr, SyntaxKind, SyntaxNode};
use crate::project::discovery::is_manifest_file;
use crate::syntax::{string_expr_value, string_value};

/// What a string literal refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `_name`, `_inherit` values and `_inherits` keys in a class body.
    ModelName,
    /// Entries of a manifest's `depends` list.
    ModuleName,
    /// Entries of a manifest's data file lists (`data`, `demo`, ...).
    DataFile,
}

/// A reference found in a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub file: FileId,
    /// Range of the whole string literal, quotes included.
    pub range: TextRange,
    /// Decoded string value.
    pub value: String,
    pub kind: ReferenceKind,
}

/// Where a reference leads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceTarget {
    Module { name: SmolStr, dir: PathBuf },
    File(FileId),
    Class(ClassPtr),
}

/// The reference under `offset`, if the cursor is inside a recognized
/// string literal.
pub fn reference_at(db: &Database, file: FileId, offset: TextSize) -> Option<Reference> {
    let syntax = db.parse(file)?;
    let root = syntax.syntax();
    if !root.text_range().contains_inclusive(offset) {
        return None;
    }
    let token = root
        .token_at_offset(offset)
        .find(|t| t.kind() == SyntaxKind::STRING)?;
    let string = token.parent().and_then(StringExpr::cast)?;

    let kind = if is_model_name_position(&string) {
        ReferenceKind::ModelName
    } else {
        manifest_position(db, file, &string)?
    };

    Some(Reference {
        file,
        range: string.syntax().text_range(),
        value: string_expr_value(&string),
        kind,
    })
}

/// Every reference in `file`, in source order.
pub fn references_in_file(db: &Database, file: FileId) -> Vec<Reference> {
    let Some(syntax) = db.parse(file) else {
        return Vec::new();
    };
    syntax
        .syntax()
        .descendants()
        .filter_map(StringExpr::cast)
        .filter_map(|string| reference_at(db, file, string.syntax().text_range().start()))
        .collect()
}

/// Resolve a reference. Unresolved references yield nothing.
pub fn resolve_reference(db: &Database, reference: &Reference) -> Vec<ReferenceTarget> {
    match reference.kind {
        ReferenceKind::ModelName => {
            let Some(module) = Module::for_file(db, reference.file) else {
                return Vec::new();
            };
            let scope = module.python_scope(true);
            classes_by_model_name(db, SmolStr::new(&reference.value), &scope)
                .map(ReferenceTarget::Class)
                .collect()
        }
        ReferenceKind::ModuleName => Module::by_name(db, &reference.value)
            .map(|module| ReferenceTarget::Module {
                name: module.name().clone(),
                dir: module.dir().to_path_buf(),
            })
            .into_iter()
            .collect(),
        ReferenceKind::DataFile => Module::for_file(db, reference.file)
            .and_then(|module| db.file_id(&module.dir().join(&reference.value)))
            .map(ReferenceTarget::File)
            .into_iter()
            .collect(),
    }
}

// ============================================================================
// Position patterns
// ============================================================================

fn is_model_name_position(string: &StringExpr) -> bool {
    let Some(parent) = string.syntax().parent() else {
        return false;
    };
    match parent.kind() {
        // _name = 'x' / _inherit = 'x'
        SyntaxKind::ASSIGNMENT => {
            is_class_attribute(&parent, &[MODEL_NAME_ATTR, MODEL_INHERIT_ATTR])
        }
        // _inherit = ['x', 'y']
        SyntaxKind::LIST_EXPR | SyntaxKind::TUPLE_EXPR => parent
            .parent()
            .is_some_and(|assignment| is_class_attribute(&assignment, &[MODEL_INHERIT_ATTR])),
        // _inherits = {'x': 'x_id'}
        SyntaxKind::KEY_VALUE => {
            let Some(entry) = KeyValue::cast(parent) else {
                return false;
            };
            let is_key = entry.key().is_some_and(|key| key.syntax() == string.syntax());
            is_key
                && entry
                    .syntax()
                    .parent()
                    .filter(|dict| dict.kind() == SyntaxKind::DICT_EXPR)
                    .and_then(|dict| dict.parent())
                    .is_some_and(|assignment| {
                        is_class_attribute(&assignment, &[MODEL_INHERITS_ATTR])
                    })
        }
        _ => false,
    }
}

/// `node` is an assignment to one of `names` directly in a class body.
fn is_class_attribute(node: &SyntaxNode, names: &[&str]) -> bool {
    let Some(assignment) = Assignment::cast(node.clone()) else {
        return false;
    };
    let in_class_body = node
        .parent()
        .filter(|block| block.kind() == SyntaxKind::BLOCK)
        .and_then(|block| block.parent())
        .is_some_and(|class| class.kind() == SyntaxKind::CLASS_DEF);
    in_class_body
        && assignment
            .target_name()
            .is_some_and(|target| names.contains(&target.text()))
}

/// `string` is an entry of a list under a recognized manifest key.
fn manifest_position(db: &Database, file: FileId, string: &StringExpr) -> Option<ReferenceKind> {
    let list = string
        .syntax()
        .parent()
        .filter(|n| matches!(n.kind(), SyntaxKind::LIST_EXPR | SyntaxKind::TUPLE_EXPR))?;
    let entry = list.parent().and_then(KeyValue::cast)?;
    if entry.value()?.syntax() != &list {
        return None;
    }
    let key = string_value(&entry.key()?)?;

    let kind = if MANIFEST_MODULE_KEYS.contains(&key.as_str()) {
        ReferenceKind::ModuleName
    } else if MANIFEST_FILE_KEYS.contains(&key.as_str()) {
        ReferenceKind::DataFile
    } else {
        return None;
    };

    let vfs = db.vfs();
    let path = vfs.path(file)?;
    is_manifest_file(&vfs, path).then_some(kind)
}
