//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all node and token kinds in the syntax tree for the
//! subset of Python the indexer inspects.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (names, strings, punctuation).
/// Nodes are composite (class definitions, assignments, literals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,
    NEWLINE,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,
    NUMBER,
    STRING,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    L_BRACE,   // {
    R_BRACE,   // }
    COMMA,     // ,
    COLON,     // :
    SEMICOLON, // ;
    DOT,       // .
    EQ,        // =
    AT,        // @
    OPERATOR,  // any other operator (+, ==, ->, :=, **, ...)

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    CLASS_KW,
    DEF_KW,

    ERROR,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    CLASS_DEF,
    FUNCTION_DEF,
    NAME,
    ARG_LIST,
    BLOCK,
    ASSIGNMENT,
    TARGET,
    ANNOTATION,
    EXPR_STMT,
    OTHER_STMT,

    STRING_EXPR,
    LITERAL_EXPR,
    NAME_EXPR,
    CALL_EXPR,
    LIST_EXPR,
    TUPLE_EXPR,
    PAREN_EXPR,
    SET_EXPR,
    DICT_EXPR,
    KEY_VALUE,
    OTHER_EXPR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Trivia never starts a statement or an expression.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT | Self::NEWLINE)
    }

    pub fn is_opening_bracket(self) -> bool {
        matches!(self, Self::L_PAREN | Self::L_BRACKET | Self::L_BRACE)
    }

    pub fn is_closing_bracket(self) -> bool {
        matches!(self, Self::R_PAREN | Self::R_BRACKET | Self::R_BRACE)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PythonLanguage {}

impl rowan::Language for PythonLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<PythonLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<PythonLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<PythonLanguage>;
