//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Only the shapes the indexer cares about are typed; anything else is
//! reachable through [`AstNode::syntax`].

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child_tokens(node: &SyntaxNode, kind: SyntaxKind) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(move |t| t.kind() == kind)
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    /// Classes declared at module level (nested classes excluded).
    pub fn classes(&self) -> impl Iterator<Item = ClassDef> + '_ {
        self.0.children().filter_map(ClassDef::cast)
    }

    pub fn functions(&self) -> impl Iterator<Item = FunctionDef> + '_ {
        self.0.children().filter_map(FunctionDef::cast)
    }

    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + '_ {
        self.0.children().filter_map(Assignment::cast)
    }

    /// First dictionary literal in the file, in preorder.
    pub fn first_dict(&self) -> Option<DictExpr> {
        self.0.descendants().find_map(DictExpr::cast)
    }
}

// ============================================================================
// Statements
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        child_tokens(&self.0, SyntaxKind::IDENT).next()
    }
}

ast_node!(ClassDef, CLASS_DEF);

impl ClassDef {
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    pub fn name_text(&self) -> Option<String> {
        self.name()?.ident().map(|t| t.text().to_string())
    }

    /// The parenthesized base-class list.
    pub fn bases(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    /// Class-level assignments, in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = Assignment> {
        self.body()
            .into_iter()
            .flat_map(|body| body.0.children().filter_map(Assignment::cast))
    }

    /// First class-level assignment to `name`.
    pub fn attribute(&self, name: &str) -> Option<Assignment> {
        self.attributes()
            .find(|a| a.target_name().is_some_and(|t| t.text() == name))
    }

    pub fn methods(&self) -> impl Iterator<Item = FunctionDef> {
        self.body()
            .into_iter()
            .flat_map(|body| body.0.children().filter_map(FunctionDef::cast))
    }

    pub fn method(&self, name: &str) -> Option<FunctionDef> {
        self.methods()
            .find(|m| m.name_text().is_some_and(|n| n == name))
    }
}

ast_node!(FunctionDef, FUNCTION_DEF);

impl FunctionDef {
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    pub fn name_text(&self) -> Option<String> {
        self.name()?.ident().map(|t| t.text().to_string())
    }
}

ast_node!(Block, BLOCK);

ast_node!(Assignment, ASSIGNMENT);

impl Assignment {
    pub fn target(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::TARGET)
    }

    pub fn target_name(&self) -> Option<SyntaxToken> {
        child_tokens(&self.target()?, SyntaxKind::IDENT).next()
    }

    /// The assigned value (the expression right of `=`).
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Any expression node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    String(StringExpr),
    Literal(LiteralExpr),
    Name(NameExpr),
    Call(CallExpr),
    List(ListExpr),
    Tuple(TupleExpr),
    Paren(ParenExpr),
    Set(SetExpr),
    Dict(DictExpr),
    Other(OtherExpr),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::STRING_EXPR
                | SyntaxKind::LITERAL_EXPR
                | SyntaxKind::NAME_EXPR
                | SyntaxKind::CALL_EXPR
                | SyntaxKind::LIST_EXPR
                | SyntaxKind::TUPLE_EXPR
                | SyntaxKind::PAREN_EXPR
                | SyntaxKind::SET_EXPR
                | SyntaxKind::DICT_EXPR
                | SyntaxKind::OTHER_EXPR
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::STRING_EXPR => Some(Self::String(StringExpr(node))),
            SyntaxKind::LITERAL_EXPR => Some(Self::Literal(LiteralExpr(node))),
            SyntaxKind::NAME_EXPR => Some(Self::Name(NameExpr(node))),
            SyntaxKind::CALL_EXPR => Some(Self::Call(CallExpr(node))),
            SyntaxKind::LIST_EXPR => Some(Self::List(ListExpr(node))),
            SyntaxKind::TUPLE_EXPR => Some(Self::Tuple(TupleExpr(node))),
            SyntaxKind::PAREN_EXPR => Some(Self::Paren(ParenExpr(node))),
            SyntaxKind::SET_EXPR => Some(Self::Set(SetExpr(node))),
            SyntaxKind::DICT_EXPR => Some(Self::Dict(DictExpr(node))),
            SyntaxKind::OTHER_EXPR => Some(Self::Other(OtherExpr(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::String(n) => n.syntax(),
            Self::Literal(n) => n.syntax(),
            Self::Name(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
            Self::List(n) => n.syntax(),
            Self::Tuple(n) => n.syntax(),
            Self::Paren(n) => n.syntax(),
            Self::Set(n) => n.syntax(),
            Self::Dict(n) => n.syntax(),
            Self::Other(n) => n.syntax(),
        }
    }
}

impl Expr {
    /// Elements of a list, tuple or set literal; `None` for anything else.
    pub fn sequence_elements(&self) -> Option<Vec<Expr>> {
        let node = match self {
            Self::List(n) => n.syntax(),
            Self::Tuple(n) => n.syntax(),
            Self::Set(n) => n.syntax(),
            _ => return None,
        };
        Some(node.children().filter_map(Expr::cast).collect())
    }

    /// Strip redundant parentheses.
    pub fn unparenthesized(self) -> Expr {
        match self {
            Self::Paren(paren) => match paren.inner() {
                Some(inner) => inner.unparenthesized(),
                None => Self::Paren(paren),
            },
            other => other,
        }
    }
}

ast_node!(StringExpr, STRING_EXPR);

impl StringExpr {
    /// The raw string tokens (several for implicit concatenation).
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        child_tokens(&self.0, SyntaxKind::STRING)
    }
}

ast_node!(LiteralExpr, LITERAL_EXPR);

ast_node!(NameExpr, NAME_EXPR);

impl NameExpr {
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        child_tokens(&self.0, SyntaxKind::IDENT)
    }

    /// Dotted path, e.g. `fields.Char`.
    pub fn path(&self) -> String {
        self.segments()
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

ast_node!(CallExpr, CALL_EXPR);

impl CallExpr {
    pub fn callee(&self) -> Option<NameExpr> {
        self.0.children().find_map(NameExpr::cast)
    }

    pub fn args(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }
}

ast_node!(ListExpr, LIST_EXPR);
ast_node!(TupleExpr, TUPLE_EXPR);
ast_node!(SetExpr, SET_EXPR);

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(DictExpr, DICT_EXPR);

impl DictExpr {
    pub fn entries(&self) -> impl Iterator<Item = KeyValue> + '_ {
        self.0.children().filter_map(KeyValue::cast)
    }
}

ast_node!(KeyValue, KEY_VALUE);

impl KeyValue {
    pub fn key(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

ast_node!(OtherExpr, OTHER_EXPR);
