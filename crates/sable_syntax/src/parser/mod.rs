//! Parser for the Sable programming language
//!
//! Converts source text into AST nodes, recording syntax errors and populating a symbol table as declarations are
//! met. Parsing is single pass: whether an identifier names a type (and therefore starts a declaration, or may be
//! followed by generic arguments) is decided by looking it up in the symbol table built so far.
//!
//! ## Notes
//!
//! - **Error tolerance**: every production returns [`PResult`]. `Ok(Some(_))` is a parsed node, `Ok(None)` means
//!   "nothing of this kind starts here" (no tokens consumed), and `Err(_)` is a syntax error. The statement loop
//!   records errors and resynchronises, so a parse always runs to end of input.
//! - **Speculation**: generic argument lists and declaration-vs-expression are decided by trying one reading and
//!   restoring a [`Checkpoint`] if it fails. A checkpoint covers the lexer state, the error and comment queues, the
//!   lookaside slot and the current scope.
//! - **Comments**: the parser skips trivia but queues comment tokens. The statement loop attaches them to
//!   statements as leading/trailing comments, or emits them as standalone `Comment` nodes.
//!
//! ## Module Structure
//!
//! - `expr` - Expression precedence chain, values, generic argument speculation
//! - `stmt` - Statements and the error-recovering statement loop
//! - `decl` - Declarations: variables, types, functions, operators, templates, classes, imports

mod decl;
mod expr;
mod stmt;


use crate::ast::{IdentRole, Node};
use crate::config::ParseConfig;
use crate::diagnostics::{ParsingErrors, SyntaxError};
use crate::lexer::{Lexer, LexerState, Token, TokenKind};
use crate::source::{SourceText, TextBuffer};
use crate::symbols::{ScopeId, SymbolId, SymbolOrigin, SymbolTable};
use sable_core::lang::keywords::KeywordId;
use sable_core::lang::operators::OperatorId;
use sable_core::lang::punctuation::PunctuationId;
use tracing::debug;

/// Result of one production: a node, nothing, or a syntax error.
pub(crate) type PResult<T> = Result<Option<T>, SyntaxError>;

/// Output of a parse.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Top-level nodes in source order.
    pub nodes: Vec<Node>,
    /// Syntax errors in the order they were met.
    pub errors: Vec<SyntaxError>,
    /// Every symbol declared during the parse, plus the builtins.
    pub symbols: SymbolTable,
}

impl ParseResult {
    /// `true` when no syntax error was recorded.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a text buffer with the default configuration.
pub fn parse(buffer: &impl TextBuffer) -> ParseResult {
    parse_with(buffer, ParseConfig::default())
}

/// Parse a string with the default configuration.
pub fn parse_str(source: &str) -> ParseResult {
    parse(&SourceText::new(source))
}

/// Parse a text buffer.
#[tracing::instrument(skip_all, fields(source_len = buffer.text().len()))]
pub fn parse_with(buffer: &impl TextBuffer, config: ParseConfig) -> ParseResult {
    let result = Parser::new(buffer.text(), config).parse_program();
    debug!(
        nodes = result.nodes.len(),
        errors = result.errors.len(),
        symbols = result.symbols.len(),
        "parsed"
    );
    result
}

/// Saved parser state for backtracking.
pub(crate) struct Checkpoint {
    lexer: LexerState,
    newline_before: bool,
    errors: usize,
    comments: usize,
    lookaside: Option<Node>,
    scope: ScopeId,
}

/// Parser state
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// A newline was skipped right before the current token.
    newline_before: bool,
    symbols: SymbolTable,
    errors: Vec<SyntaxError>,
    /// An identifier already consumed by a statement that bailed out; the next value parse picks it up.
    lookaside: Option<Node>,
    /// Comments skipped since the statement loop last collected them.
    comments: Vec<Token>,
    /// Scope a class/function must be declared in when it is the item of a `template`.
    template_scope: Option<ScopeId>,
    config: ParseConfig,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, config: ParseConfig) -> Self {
        let mut parser = Self {
            lexer: Lexer::new(source),
            newline_before: false,
            symbols: SymbolTable::new(),
            errors: Vec::new(),
            lookaside: None,
            comments: Vec::new(),
            template_scope: None,
            config,
        };
        parser.bump();
        parser
    }

    /// Parse the whole input.
    pub fn parse_program(mut self) -> ParseResult {
        let nodes = self.parse_items(stmt::ItemContext::File);
        ParseResult {
            nodes,
            errors: self.errors,
            symbols: self.symbols,
        }
    }

    // ========================================================================
    // Token cursor
    // ========================================================================

    /// The current significant (non-trivia) token.
    fn current(&self) -> &Token {
        self.lexer.token()
    }

    /// Move to the next significant token, queueing comments and noting newlines on the way.
    fn bump(&mut self) {
        self.newline_before = false;
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::Whitespace => {}
                TokenKind::Newline => self.newline_before = true,
                TokenKind::LineComment | TokenKind::BlockComment => self.comments.push(token),
                _ => return,
            }
        }
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.bump();
        }
        token
    }

    fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    fn at_punct(&self, id: PunctuationId) -> bool {
        self.current().kind.is_punctuation(id)
    }

    fn at_op(&self, id: OperatorId) -> bool {
        self.current().kind.is_operator(id)
    }

    fn at_keyword(&self, id: KeywordId) -> bool {
        self.current().kind.is_keyword(id)
    }

    fn at_ident(&self) -> bool {
        self.current().kind == TokenKind::Ident
    }

    fn eat_punct(&mut self, id: PunctuationId) -> Option<Token> {
        self.at_punct(id).then(|| self.advance())
    }

    fn eat_op(&mut self, id: OperatorId) -> Option<Token> {
        self.at_op(id).then(|| self.advance())
    }

    fn eat_keyword(&mut self, id: KeywordId) -> Option<Token> {
        self.at_keyword(id).then(|| self.advance())
    }

    /// Consume the expected punctuation or fail with `kind` at the current token.
    fn expect_punct(&mut self, id: PunctuationId, kind: ParsingErrors) -> Result<Token, SyntaxError> {
        match self.eat_punct(id) {
            Some(token) => Ok(token),
            None => Err(self.error(kind)),
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// An error of `kind` at the current token.
    fn error(&self, kind: ParsingErrors) -> SyntaxError {
        SyntaxError::new(kind, self.current().clone())
    }

    /// Record an error without interrupting the current production.
    fn record(&mut self, err: SyntaxError) {
        if self.config.max_errors.is_some_and(|max| self.errors.len() >= max) {
            debug!(kind = ?err.kind, "error cap reached, dropping");
            return;
        }
        debug!(kind = ?err.kind, at = %err.token.span.start, "syntax error");
        self.errors.push(err);
    }

    /// Record a missing operand and return the placeholder standing in for it.
    fn missing_operand(&mut self) -> Node {
        self.record(self.error(ParsingErrors::OperatorWithNoRhs));
        self.placeholder()
    }

    /// Zero-width invalid node at the current token.
    fn placeholder(&self) -> Node {
        let current = self.current();
        Node::invalid(Token::placeholder(current.span.start, current.offset))
    }

    // ========================================================================
    // Backtracking
    // ========================================================================

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            lexer: self.lexer.snapshot(),
            newline_before: self.newline_before,
            errors: self.errors.len(),
            comments: self.comments.len(),
            lookaside: self.lookaside.clone(),
            scope: self.symbols.current(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        debug!(
            from = %self.current().span.start,
            to = %checkpoint.lexer.token().span.start,
            "backtrack"
        );
        self.lexer.restore(checkpoint.lexer);
        self.newline_before = checkpoint.newline_before;
        self.errors.truncate(checkpoint.errors);
        self.comments.truncate(checkpoint.comments);
        self.lookaside = checkpoint.lookaside;
        self.symbols.enter(checkpoint.scope);
    }

    // ========================================================================
    // Symbols
    // ========================================================================

    /// Role an occurrence of symbol `id` plays.
    fn role_for(&self, id: SymbolId) -> IdentRole {
        if self.symbols.get(id).origin == SymbolOrigin::Parameter {
            IdentRole::Parameter
        } else if self.symbols.is_member(id) {
            IdentRole::Property
        } else {
            IdentRole::Variable
        }
    }

    /// Build an identifier node from `token`, bound to whatever its name resolves to.
    fn bind_ident(&self, token: Token) -> Node {
        let name = token.name().unwrap_or_default().to_string();
        let found = self.symbols.find(&name);
        let mut node = Node::ident(name, token);
        if let Some(id) = found {
            node.attach_symbol(id, self.symbols.get(id), self.role_for(id));
        }
        node
    }

    /// Symbol the current identifier (or type keyword) resolves to.
    fn lookup_current(&self) -> Option<SymbolId> {
        self.current().name().and_then(|name| self.symbols.find(name))
    }

    /// `true` when the current token names a type.
    fn at_type_name(&self) -> bool {
        self.lookup_current()
            .is_some_and(|id| self.symbols.get(id).ty.is_type())
    }
}
