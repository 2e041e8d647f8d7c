//! Stable handles to class declarations.

use crate::base::{FileId, TextRange};
use crate::parser::{AstNode, ClassDef, SyntaxNode};

/// A pointer to a class declaration in one revision of a file.
///
/// Pointers are plain data: they outlive the syntax tree they were taken
/// from. Resolving a pointer against a newer revision of its file fails
/// instead of returning an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassPtr {
    pub file: FileId,
    pub revision: u64,
    pub range: TextRange,
}

impl ClassPtr {
    pub fn new(file: FileId, revision: u64, class: &ClassDef) -> Self {
        Self {
            file,
            revision,
            range: class.syntax().text_range(),
        }
    }

    /// Find the class in `root`, the tree of the pointer's revision.
    pub fn to_node(&self, root: &SyntaxNode) -> Option<ClassDef> {
        if !root.text_range().contains_range(self.range) {
            return None;
        }
        let start = match root.covering_element(self.range) {
            rowan::NodeOrToken::Node(node) => node,
            rowan::NodeOrToken::Token(token) => token.parent()?,
        };
        start
            .ancestors()
            .filter_map(ClassDef::cast)
            .find(|class| class.syntax().text_range() == self.range)
    }
}
