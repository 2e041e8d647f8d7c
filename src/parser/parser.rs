//! Recursive descent parser for Python source
//!
//! Builds a rowan GreenNode tree from tokens. Only the statement and
//! expression shapes the indexer inspects get dedicated nodes; everything else
//! is kept verbatim inside `OTHER_STMT` / `OTHER_EXPR` so the tree stays
//! lossless. Parsing never fails: malformed input yields a tree plus errors.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Python source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// For every significant token that begins a logical line, the width of its
/// indentation. Newlines inside brackets do not end a logical line.
fn logical_line_starts(tokens: &[Token<'_>]) -> Vec<Option<u32>> {
    let mut starts = vec![None; tokens.len()];
    let mut depth = 0usize;
    let mut at_line_start = true;
    let mut indent = 0u32;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            SyntaxKind::NEWLINE => {
                if depth == 0 {
                    at_line_start = true;
                    indent = 0;
                }
            }
            SyntaxKind::WHITESPACE => {
                if at_line_start {
                    for c in token.text.chars() {
                        match c {
                            '\t' => indent = (indent / 8 + 1) * 8,
                            ' ' | '\x0C' => indent += 1,
                            _ => {}
                        }
                    }
                }
            }
            SyntaxKind::COMMENT => {}
            kind => {
                if at_line_start {
                    starts[i] = Some(indent);
                    at_line_start = false;
                }
                if kind.is_opening_bracket() {
                    depth += 1;
                } else if kind.is_closing_bracket() {
                    depth = depth.saturating_sub(1);
                }
            }
        }
    }
    starts
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    line_starts: Vec<Option<u32>>,
    pos: usize,
    /// Token index of the first token of the logical line being parsed
    line_begin: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            line_starts: logical_line_starts(tokens),
            pos: 0,
            line_begin: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (trivia is skipped transparently)
    // =========================================================================

    fn nth_index(&self, n: usize) -> Option<usize> {
        let mut count = 0;
        for idx in self.pos..self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return Some(idx);
                }
                count += 1;
            }
        }
        None
    }

    fn nth(&self, n: usize) -> Option<SyntaxKind> {
        self.nth_index(n).map(|idx| self.tokens[idx].kind)
    }

    fn current(&self) -> Option<SyntaxKind> {
        self.nth(0)
    }

    fn current_text(&self) -> &str {
        self.nth_index(0).map(|idx| self.tokens[idx].text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.nth_index(0).is_none()
    }

    /// Indentation of the current token if it begins a logical line.
    fn line_indent(&self) -> Option<u32> {
        self.nth_index(0).and_then(|idx| self.line_starts[idx])
    }

    /// True at end of input or when the next token begins a new logical line.
    fn at_line_end(&self) -> bool {
        match self.nth_index(0) {
            None => true,
            Some(idx) => idx != self.line_begin && self.line_starts[idx].is_some(),
        }
    }

    fn at_expr_end(&self) -> bool {
        self.at_line_end()
            || matches!(
                self.current(),
                Some(
                    SyntaxKind::COMMA
                        | SyntaxKind::R_PAREN
                        | SyntaxKind::R_BRACKET
                        | SyntaxKind::R_BRACE
                        | SyntaxKind::COLON
                        | SyntaxKind::SEMICOLON
                        | SyntaxKind::EQ
                )
            )
    }

    fn starts_primary(&self) -> bool {
        matches!(
            self.current(),
            Some(
                SyntaxKind::STRING
                    | SyntaxKind::NUMBER
                    | SyntaxKind::IDENT
                    | SyntaxKind::L_PAREN
                    | SyntaxKind::L_BRACKET
                    | SyntaxKind::L_BRACE
            )
        )
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Bump leading trivia, then the next significant token.
    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = match self.nth_index(0) {
            Some(idx) => {
                let token = &self.tokens[idx];
                TextRange::at(token.offset, TextSize::of(token.text))
            }
            None => {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            }
        };
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Wrap the rest of the logical line in an ERROR node.
    fn error_to_line_end(&mut self, message: impl Into<String>) {
        self.error(message);
        self.skip_trivia();
        self.builder.start_node(SyntaxKind::ERROR.into());
        while !self.at_line_end() {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        while !self.at_eof() {
            self.statements(None);
            if !self.at_eof() && self.line_indent().is_none() {
                // Only reachable after unbalanced brackets swallowed a line start.
                self.line_begin = self.nth_index(0).unwrap_or(self.pos);
                self.error_to_line_end("unexpected token");
            }
        }
        self.skip_trivia();
        self.finish_node();
    }

    /// Parse logical lines indented deeper than `parent` (all lines when `None`).
    fn statements(&mut self, parent: Option<u32>) {
        while let Some(indent) = self.line_indent() {
            if parent.is_some_and(|p| indent <= p) {
                break;
            }
            self.statement_line(indent);
        }
    }

    fn statement_line(&mut self, indent: u32) {
        self.line_begin = self.nth_index(0).unwrap_or(self.pos);
        self.statement(indent);
        while self.at(SyntaxKind::SEMICOLON) {
            self.bump();
            if self.at_line_end() {
                break;
            }
            self.statement(indent);
        }
        if !self.at_line_end() {
            self.error_to_line_end("expected end of statement");
        }
    }

    fn statement(&mut self, indent: u32) {
        match self.current() {
            Some(SyntaxKind::CLASS_KW) => self.class_def(indent),
            Some(SyntaxKind::DEF_KW) => self.function_def(indent),
            Some(SyntaxKind::IDENT)
                if self.current_text() == "async" && self.nth(1) == Some(SyntaxKind::DEF_KW) =>
            {
                self.function_def(indent)
            }
            Some(SyntaxKind::IDENT) if self.nth(1) == Some(SyntaxKind::EQ) => self.assignment(),
            Some(SyntaxKind::IDENT)
                if self.nth(1) == Some(SyntaxKind::COLON) && self.annotated_value_ahead() =>
            {
                self.assignment()
            }
            Some(
                SyntaxKind::STRING
                | SyntaxKind::NUMBER
                | SyntaxKind::L_PAREN
                | SyntaxKind::L_BRACKET
                | SyntaxKind::L_BRACE,
            ) => self.expr_stmt(),
            _ => self.other_stmt(indent),
        }
    }

    fn class_def(&mut self, indent: u32) {
        self.skip_trivia();
        self.start_node(SyntaxKind::CLASS_DEF);
        self.bump(); // class
        self.name();
        if self.at(SyntaxKind::L_PAREN) {
            self.arg_list();
        }
        if self.eat(SyntaxKind::COLON) {
            self.suite(indent);
        } else {
            self.error_to_line_end("expected ':' after class header");
        }
        self.finish_node();
    }

    fn function_def(&mut self, indent: u32) {
        self.skip_trivia();
        self.start_node(SyntaxKind::FUNCTION_DEF);
        if self.current_text() == "async" {
            self.bump();
        }
        self.bump(); // def
        self.name();
        if self.at(SyntaxKind::L_PAREN) {
            self.arg_list();
        }
        // Return annotation, if any
        while !self.at_line_end()
            && !self.at(SyntaxKind::SEMICOLON)
            && !self.at(SyntaxKind::COLON)
        {
            self.primary_or_token();
        }
        if self.eat(SyntaxKind::COLON) {
            self.suite(indent);
        } else {
            self.error("expected ':' after function signature");
        }
        self.finish_node();
    }

    fn name(&mut self) {
        if self.at(SyntaxKind::IDENT) {
            self.skip_trivia();
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected a name");
        }
    }

    /// Body of a compound statement: either the rest of the header line or an
    /// indented block.
    fn suite(&mut self, indent: u32) {
        if !self.at_line_end() {
            self.skip_trivia();
            self.start_node(SyntaxKind::BLOCK);
            self.statement(indent);
            while self.at(SyntaxKind::SEMICOLON) {
                self.bump();
                if self.at_line_end() {
                    break;
                }
                self.statement(indent);
            }
            self.finish_node();
            return;
        }

        match self.line_indent() {
            Some(next) if next > indent => {
                self.skip_trivia();
                self.start_node(SyntaxKind::BLOCK);
                self.statements(Some(indent));
                self.finish_node();
            }
            _ => self.error("expected an indented block"),
        }
    }

    /// Whether `name: annotation` on this line is followed by `= value`.
    fn annotated_value_ahead(&self) -> bool {
        let Some(start) = self.nth_index(2) else {
            return false;
        };
        let mut depth = 0usize;
        for idx in start..self.tokens.len() {
            let kind = self.tokens[idx].kind;
            if kind.is_trivia() {
                continue;
            }
            if idx != self.line_begin && self.line_starts[idx].is_some() {
                return false;
            }
            match kind {
                SyntaxKind::EQ if depth == 0 => return true,
                SyntaxKind::SEMICOLON if depth == 0 => return false,
                k if k.is_opening_bracket() => depth += 1,
                k if k.is_closing_bracket() => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        false
    }

    /// `name = value` or `name: annotation = value`.
    fn assignment(&mut self) {
        self.skip_trivia();
        self.start_node(SyntaxKind::ASSIGNMENT);
        self.start_node(SyntaxKind::TARGET);
        self.bump();
        self.finish_node();
        if self.at(SyntaxKind::COLON) {
            self.bump();
            self.skip_trivia();
            self.start_node(SyntaxKind::ANNOTATION);
            self.expr();
            self.finish_node();
        }
        self.bump(); // =
        self.expr_list();
        self.rest_of_statement();
        self.finish_node();
    }

    fn expr_stmt(&mut self) {
        self.skip_trivia();
        self.start_node(SyntaxKind::EXPR_STMT);
        self.expr_list();
        self.rest_of_statement();
        self.finish_node();
    }

    fn other_stmt(&mut self, indent: u32) {
        self.skip_trivia();
        self.start_node(SyntaxKind::OTHER_STMT);
        let mut last = None;
        while !self.at_line_end() && !self.at(SyntaxKind::SEMICOLON) {
            last = self.current();
            self.primary_or_token();
        }
        if last == Some(SyntaxKind::COLON) {
            self.suite(indent);
        }
        self.finish_node();
    }

    fn rest_of_statement(&mut self) {
        while !self.at_line_end() && !self.at(SyntaxKind::SEMICOLON) {
            self.primary_or_token();
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// One or more comma-separated expressions; several become a tuple.
    fn expr_list(&mut self) {
        self.skip_trivia();
        let checkpoint = self.builder.checkpoint();
        self.expr();
        if self.at(SyntaxKind::COMMA) && !self.at_line_end() {
            while self.at(SyntaxKind::COMMA) {
                self.bump();
                if self.at_expr_end() {
                    break;
                }
                self.expr();
            }
            self.builder
                .start_node_at(checkpoint, SyntaxKind::TUPLE_EXPR.into());
            self.finish_node();
        }
    }

    fn expr(&mut self) {
        self.skip_trivia();
        if self.at_expr_end() {
            self.error("expected an expression");
            return;
        }
        let checkpoint = self.builder.checkpoint();
        let simple = self.starts_primary();
        self.primary_or_token();
        if !simple || !self.at_expr_end() {
            while !self.at_expr_end() {
                self.primary_or_token();
            }
            self.builder
                .start_node_at(checkpoint, SyntaxKind::OTHER_EXPR.into());
            self.finish_node();
        }
    }

    fn primary_or_token(&mut self) {
        if self.starts_primary() {
            self.primary();
        } else {
            self.bump();
        }
    }

    fn primary(&mut self) {
        self.skip_trivia();
        match self.current() {
            Some(SyntaxKind::STRING) => {
                self.start_node(SyntaxKind::STRING_EXPR);
                self.bump();
                // Implicit concatenation of adjacent literals
                while self.at(SyntaxKind::STRING) && !self.at_line_end() {
                    self.bump();
                }
                self.finish_node();
            }
            Some(SyntaxKind::NUMBER) => {
                self.start_node(SyntaxKind::LITERAL_EXPR);
                self.bump();
                self.finish_node();
            }
            Some(SyntaxKind::IDENT) => self.name_or_call(),
            Some(SyntaxKind::L_BRACKET) => {
                self.start_node(SyntaxKind::LIST_EXPR);
                self.bump();
                self.bracket_items(SyntaxKind::R_BRACKET);
                self.finish_node();
            }
            Some(SyntaxKind::L_PAREN) => {
                let checkpoint = self.builder.checkpoint();
                self.bump();
                let items = self.bracket_items(SyntaxKind::R_PAREN);
                let kind = if items.count == 1 && !items.trailing_comma {
                    SyntaxKind::PAREN_EXPR
                } else {
                    SyntaxKind::TUPLE_EXPR
                };
                self.builder.start_node_at(checkpoint, kind.into());
                self.finish_node();
            }
            Some(SyntaxKind::L_BRACE) => {
                let checkpoint = self.builder.checkpoint();
                self.bump();
                let items = self.bracket_items(SyntaxKind::R_BRACE);
                let kind = if items.count > 0 && !items.key_values {
                    SyntaxKind::SET_EXPR
                } else {
                    SyntaxKind::DICT_EXPR
                };
                self.builder.start_node_at(checkpoint, kind.into());
                self.finish_node();
            }
            _ => self.bump(),
        }
    }

    fn name_or_call(&mut self) {
        if matches!(self.current_text(), "True" | "False" | "None") {
            self.start_node(SyntaxKind::LITERAL_EXPR);
            self.bump();
            self.finish_node();
            return;
        }

        let checkpoint = self.builder.checkpoint();
        self.start_node(SyntaxKind::NAME_EXPR);
        self.bump();
        while self.at(SyntaxKind::DOT)
            && self.nth(1) == Some(SyntaxKind::IDENT)
            && !self.at_line_end()
        {
            self.bump();
            self.bump();
        }
        self.finish_node();

        if self.at(SyntaxKind::L_PAREN) && !self.at_line_end() {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::CALL_EXPR.into());
            self.arg_list();
            self.finish_node();
        }
    }

    fn arg_list(&mut self) {
        self.skip_trivia();
        self.start_node(SyntaxKind::ARG_LIST);
        self.bump(); // (
        self.bracket_items(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Parse comma-separated items up to and including `close`.
    ///
    /// `key: value` items become `KEY_VALUE` nodes; stray delimiters are kept
    /// without complaint (slices, keyword arguments, annotations).
    fn bracket_items(&mut self, close: SyntaxKind) -> BracketItems {
        let mut items = BracketItems::default();
        loop {
            self.skip_trivia();
            if self.at_line_end() {
                self.error(format!("unclosed bracket, expected {:?}", close));
                break;
            }
            match self.current() {
                Some(kind) if kind == close => {
                    self.bump();
                    break;
                }
                Some(SyntaxKind::COMMA) => {
                    self.bump();
                    items.trailing_comma = true;
                }
                _ if self.at_expr_end() => self.bump(),
                _ => {
                    let checkpoint = self.builder.checkpoint();
                    self.expr();
                    items.count += 1;
                    items.trailing_comma = false;
                    if close == SyntaxKind::R_BRACE && self.at(SyntaxKind::COLON) {
                        self.bump();
                        self.expr();
                        self.builder
                            .start_node_at(checkpoint, SyntaxKind::KEY_VALUE.into());
                        self.finish_node();
                        items.key_values = true;
                    }
                }
            }
        }
        items
    }
}

#[derive(Default)]
struct BracketItems {
    count: usize,
    trailing_comma: bool,
    key_values: bool,
}
