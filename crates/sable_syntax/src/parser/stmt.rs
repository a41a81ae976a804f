//! Statements and the statement loop.

use super::{PResult, Parser};
use crate::ast::{ForHeader, Node, NodeKind};
use crate::diagnostics::{ParsingErrors, SyntaxError};
use crate::lexer::{Token, TokenKind};
use crate::symbols::ScopeId;
use sable_core::lang::keywords::{self, KeywordId};
use sable_core::lang::punctuation::PunctuationId;

/// Where a run of items is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemContext {
    /// Top level; runs to end of input.
    File,
    /// Inside `{ }`; stops at the closing brace.
    Block,
    /// Inside an enum body; bare names are enumerators.
    Enum,
}

/// Which scope a block's statements go into.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BlockScope {
    /// A fresh child of the current scope.
    Fresh,
    /// An existing scope (a class's member scope).
    Enter(ScopeId),
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Statement loop
    // ========================================================================

    /// Parse items until end of input (or the closing brace, inside a block), recovering from every error.
    pub(crate) fn parse_items(&mut self, context: ItemContext) -> Vec<Node> {
        let mut nodes = Vec::new();
        loop {
            while self.eat_punct(PunctuationId::Semicolon).is_some() {}
            if self.at_eof() || (context != ItemContext::File && self.at_punct(PunctuationId::RBrace)) {
                break;
            }
            let leading = self.take_leading(&mut nodes);
            let scope = self.symbols.current();
            let start = self.current().offset;
            let parsed = if context == ItemContext::Enum && self.at_enumerator() {
                self.parse_enumerator()
            } else {
                self.parse_statement()
            };
            match parsed {
                Ok(Some(mut node)) => {
                    self.stalled(start);
                    self.eat_punct(PunctuationId::Semicolon);
                    node.leading = leading;
                    node.trailing = self.take_trailing(&node);
                    nodes.push(node);
                }
                Ok(None) => {
                    nodes.extend(leading.into_iter().map(comment_node));
                    self.record(self.error(ParsingErrors::IncorrectToken));
                    self.advance();
                }
                Err(err) => {
                    nodes.extend(leading.into_iter().map(comment_node));
                    self.record(err);
                    self.symbols.enter(scope);
                    self.template_scope = None;
                    if let Some(node) = self.lookaside.take() {
                        nodes.push(node);
                    } else if !self.at_eof() && !self.at_punct(PunctuationId::RBrace) {
                        self.advance();
                    }
                }
            }
        }
        nodes.extend(self.comments.drain(..).map(comment_node));
        nodes
    }

    /// Report an item that was produced without consuming input, and step past the token it stuck on.
    pub(super) fn stalled(&mut self, start: usize) {
        if self.current().offset != start || self.at_eof() {
            return;
        }
        let err = self.error(ParsingErrors::UnreachableState).with_reason("(no input consumed)");
        self.record(err);
        self.advance();
    }

    /// Pending comments that lead the next statement. With attachment off they become standalone nodes instead.
    fn take_leading(&mut self, nodes: &mut Vec<Node>) -> Vec<Token> {
        let pending = std::mem::take(&mut self.comments);
        if self.config.attach_comments {
            pending
        } else {
            nodes.extend(pending.into_iter().map(comment_node));
            Vec::new()
        }
    }

    /// Pending comments inside `node` or on its last line.
    fn take_trailing(&mut self, node: &Node) -> Vec<Token> {
        if !self.config.attach_comments {
            return Vec::new();
        }
        let end = node.span.end;
        let (trailing, rest) = std::mem::take(&mut self.comments)
            .into_iter()
            .partition(|c: &Token| c.span.start < end || c.span.start.line == end.line);
        self.comments = rest;
        trailing
    }

    // ========================================================================
    // Statement dispatch
    // ========================================================================

    pub(super) fn parse_statement(&mut self) -> PResult<Node> {
        let kind = self.current().kind;
        match kind {
            TokenKind::Keyword(KeywordId::If) => self.parse_if().map(Some),
            TokenKind::Keyword(KeywordId::While) => self.parse_while().map(Some),
            TokenKind::Keyword(KeywordId::Do) => self.parse_do_while().map(Some),
            TokenKind::Keyword(KeywordId::For) => self.parse_for().map(Some),
            TokenKind::Keyword(KeywordId::Return) => self.parse_return().map(Some),
            TokenKind::Keyword(KeywordId::Delete) => self.parse_delete().map(Some),
            TokenKind::Keyword(KeywordId::Import | KeywordId::From) => self.parse_import().map(Some),
            TokenKind::Keyword(KeywordId::Class | KeywordId::Enum) => self.parse_class(None).map(Some),
            TokenKind::Keyword(KeywordId::Function) if !self.lambda_ahead() => self.parse_function(None, None).map(Some),
            TokenKind::Keyword(KeywordId::Operator) => self.parse_operator(None, None).map(Some),
            TokenKind::Keyword(KeywordId::Template) => self.parse_template().map(Some),
            TokenKind::Keyword(id) if keywords::is_visibility(id) => self.parse_visibility(),
            TokenKind::Keyword(id) if keywords::is_type_name(id) => self.parse_ident_statement(),
            TokenKind::Keyword(id) if keywords::is_storage(id) => {
                let storage = Node::new(NodeKind::StorageSpec, self.advance());
                self.parse_after_storage(storage).map(Some)
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => self.parse_block(BlockScope::Fresh, ItemContext::Block).map(Some),
            TokenKind::Ident => self.parse_ident_statement(),
            _ => self.parse_expression(),
        }
    }

    /// `true` when the current `function` keyword starts a lambda (`function (`) rather than a definition.
    fn lambda_ahead(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        self.advance();
        let lambda = self.at_punct(PunctuationId::LParen);
        self.lexer.restore(checkpoint.lexer);
        self.newline_before = checkpoint.newline_before;
        self.comments.truncate(checkpoint.comments);
        lambda
    }

    /// `public:` section label, or a visibility prefix on a class/function/operator definition.
    fn parse_visibility(&mut self) -> PResult<Node> {
        let visibility = Node::new(NodeKind::Visibility, self.advance());
        if self.eat_punct(PunctuationId::Colon).is_some() {
            return Ok(Some(visibility));
        }
        let storage = if self.current().keyword_id().is_some_and(keywords::is_storage) {
            Some(Node::new(NodeKind::StorageSpec, self.advance()))
        } else {
            None
        };
        let kind = self.current().kind;
        match kind {
            TokenKind::Keyword(KeywordId::Class | KeywordId::Enum) if storage.is_none() => {
                self.parse_class(Some(visibility)).map(Some)
            }
            TokenKind::Keyword(KeywordId::Function) => self.parse_function(Some(visibility), storage).map(Some),
            TokenKind::Keyword(KeywordId::Operator) => self.parse_operator(Some(visibility), storage).map(Some),
            _ => match storage {
                // A visibility-prefixed field: the label stands alone, the declaration follows as its own item.
                None => Ok(Some(visibility)),
                Some(storage) => {
                    let mut decl = self.parse_after_storage(storage)?;
                    decl.extend_span(visibility.span);
                    decl.marks.insert(0, visibility.token);
                    Ok(Some(decl))
                }
            },
        }
    }

    /// What follows a storage keyword: a function/operator definition or a declaration.
    fn parse_after_storage(&mut self, storage: Node) -> Result<Node, SyntaxError> {
        if self.at_keyword(KeywordId::Function) {
            return self.parse_function(None, Some(storage));
        }
        if self.at_keyword(KeywordId::Operator) {
            return self.parse_operator(None, Some(storage));
        }
        match self.parse_declaration(Some(storage))? {
            Some(decl) => Ok(decl),
            None => Err(self.error(ParsingErrors::MissingType)),
        }
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// `{ items }`; the current token is `{`.
    pub(super) fn parse_block(&mut self, scope: BlockScope, context: ItemContext) -> Result<Node, SyntaxError> {
        let open = self.advance();
        let previous = match scope {
            BlockScope::Fresh => self.symbols.push(),
            BlockScope::Enter(scope) => self.symbols.enter(scope),
        };
        let statements = self.parse_items(context);
        self.symbols.enter(previous);
        let close = self.eat_punct(PunctuationId::RBrace);
        if close.is_none() {
            self.record(self.error(ParsingErrors::MissingBlock).with_reason("(unclosed `{`)"));
        }
        let mut node = Node::new(
            NodeKind::Block {
                statements,
                closed: close.is_some(),
            },
            open,
        );
        let spans: Vec<_> = node.children().iter().map(|c| c.span).collect();
        for span in spans.into_iter().chain(close.map(|c| c.span)) {
            node.extend_span(span);
        }
        Ok(node)
    }

    /// A required block body.
    pub(super) fn expect_block(&mut self, scope: BlockScope) -> Result<Node, SyntaxError> {
        if !self.at_punct(PunctuationId::LBrace) {
            return Err(self.error(ParsingErrors::MissingBlock));
        }
        self.parse_block(scope, ItemContext::Block)
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn parse_condition(&mut self) -> Result<Node, SyntaxError> {
        match self.parse_expression()? {
            Some(cond) => Ok(cond),
            None => Err(self.error(ParsingErrors::MissingCond)),
        }
    }

    /// `if cond { } [elif cond { }]* [else { }]`
    fn parse_if(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let mut branches = vec![self.parse_conditional_branch(keyword.clone(), false)?];
        while self.at_keyword(KeywordId::Elif) {
            let elif = self.advance();
            branches.push(self.parse_conditional_branch(elif, true)?);
        }
        if let Some(else_kw) = self.eat_keyword(KeywordId::Else) {
            let body = self.expect_block(BlockScope::Fresh)?;
            let span = body.span;
            branches.push(Node::new(NodeKind::Else { body: Box::new(body) }, else_kw).with_span(span));
        }
        let span = branches
            .iter()
            .fold(keyword.span, |span, branch| span.merge(branch.span));
        Ok(Node::new(NodeKind::IfStatement(branches), keyword).with_span(span))
    }

    fn parse_conditional_branch(&mut self, keyword: Token, elif: bool) -> Result<Node, SyntaxError> {
        let cond = Box::new(self.parse_condition()?);
        let body = Box::new(self.expect_block(BlockScope::Fresh)?);
        let span = body.span;
        let kind = if elif {
            NodeKind::Elif { cond, body }
        } else {
            NodeKind::If { cond, body }
        };
        Ok(Node::new(kind, keyword).with_span(span))
    }

    /// `while cond { }`
    fn parse_while(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let cond = self.parse_condition()?;
        let body = self.expect_block(BlockScope::Fresh)?;
        let span = body.span;
        Ok(Node::new(
            NodeKind::While {
                cond: Box::new(cond),
                body: Box::new(body),
                do_while: false,
            },
            keyword,
        )
        .with_span(span))
    }

    /// `do { } while cond`
    fn parse_do_while(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let body = self.expect_block(BlockScope::Fresh)?;
        let Some(while_kw) = self.eat_keyword(KeywordId::While) else {
            return Err(self.error(ParsingErrors::MissingCond));
        };
        let cond = self.parse_condition()?;
        let span = cond.span;
        Ok(Node::new(
            NodeKind::While {
                cond: Box::new(cond),
                body: Box::new(body),
                do_while: true,
            },
            keyword,
        )
        .with_span(span)
        .with_mark(while_kw))
    }

    /// `for (init; cond; step) { }` or `for (Type x : iterable) { }`; the parentheses are optional.
    ///
    /// The header's declarations live in a scope that also encloses the body.
    fn parse_for(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let previous = self.symbols.push();
        let result = self.parse_for_rest();
        self.symbols.enter(previous);
        let (header, body) = result?;
        let span = body.span;
        Ok(Node::new(
            NodeKind::For {
                header,
                body: Box::new(body),
            },
            keyword,
        )
        .with_span(span))
    }

    fn parse_for_rest(&mut self) -> Result<(ForHeader, Node), SyntaxError> {
        let paren = self.eat_punct(PunctuationId::LParen).is_some();
        let init = if self.at_punct(PunctuationId::Semicolon) {
            None
        } else if self.at_ident() {
            self.parse_ident_statement()?
        } else {
            self.parse_expression()?
        };

        let header = match init {
            Some(binding) if matches!(binding.kind, NodeKind::IdentDef { .. }) && self.at_punct(PunctuationId::Colon) => {
                self.advance();
                let Some(iterable) = self.parse_expression()? else {
                    return Err(self.error(ParsingErrors::MissingValue));
                };
                ForHeader::Each {
                    binding: Box::new(binding),
                    iterable: Box::new(iterable),
                }
            }
            init => {
                self.expect_punct(PunctuationId::Semicolon, ParsingErrors::IncorrectToken)?;
                let cond = self.parse_expression()?;
                self.expect_punct(PunctuationId::Semicolon, ParsingErrors::IncorrectToken)?;
                let step = self.parse_expression()?;
                ForHeader::Classic {
                    init: init.map(Box::new),
                    cond: cond.map(Box::new),
                    step: step.map(Box::new),
                }
            }
        };
        if paren {
            self.expect_punct(PunctuationId::RParen, ParsingErrors::MissingRightParen)?;
        }
        let body = self.expect_block(BlockScope::Fresh)?;
        Ok((header, body))
    }

    /// `return [value]`. The value is omitted when a newline, `;` or `}` follows the keyword.
    fn parse_return(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let bare = self.newline_before
            || self.at_eof()
            || self.at_punct(PunctuationId::Semicolon)
            || self.at_punct(PunctuationId::RBrace);
        let value = if bare { None } else { self.parse_expression()? };
        let mut node = Node::new(NodeKind::Return(None), keyword);
        if let Some(value) = value {
            let value = node.adopt(value);
            node.kind = NodeKind::Return(Some(value));
        }
        Ok(node)
    }

    /// `delete value`
    fn parse_delete(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let Some(value) = self.parse_expression()? else {
            return Err(self.error(ParsingErrors::MissingValue));
        };
        let span = value.span;
        Ok(Node::new(NodeKind::Delete(Box::new(value)), keyword).with_span(span))
    }
}

/// A comment token as a standalone node.
fn comment_node(token: Token) -> Node {
    Node::new(NodeKind::Comment, token)
}
