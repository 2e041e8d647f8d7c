//! Syntax file wrapper for parsed Python files.

use crate::base::{LineCol, LineIndex, TextRange, TextSize};
use crate::parser::{AstNode, GreenNode, Parse, SourceFile, SyntaxError, SyntaxNode, parse};

/// A parsed Python file.
///
/// Holds the green tree, so it is cheap to clone and can be shared across
/// threads. Typed views are rebuilt on demand through [`source_file`].
///
/// [`source_file`]: SyntaxFile::source_file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFile {
    parse: Parse,
    line_index: LineIndex,
}

impl SyntaxFile {
    pub fn new(source: &str) -> Self {
        Self {
            parse: parse(source),
            line_index: LineIndex::new(source),
        }
    }

    /// Get the underlying parse result
    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn green(&self) -> &GreenNode {
        &self.parse.green
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    /// Get the root source file AST node
    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.parse.syntax())
    }

    pub fn has_errors(&self) -> bool {
        !self.parse.errors.is_empty()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        self.line_index.line_col(offset)
    }

    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        self.line_index.offset(line_col)
    }

    /// Deepest node whose range covers `range`.
    pub fn covering_node(&self, range: TextRange) -> SyntaxNode {
        let root = self.syntax();
        if !root.text_range().contains_range(range) {
            return root;
        }
        match root.covering_element(range) {
            rowan::NodeOrToken::Node(node) => node,
            rowan::NodeOrToken::Token(token) => token.parent().unwrap_or(root),
        }
    }
}
