//! Expression parsing.
//!
//! One method per precedence level, lowest first:
//! assignment → logical → relational (with chained `a < b <= c` ranges) → bitwise → shift → additive →
//! multiplicative → increment/decrement → dereference → inversion → postfix (`()`, `[]`, `.`) → value.

use super::{PResult, Parser};
use crate::ast::{IdentRole, Node, NodeKind, TypeDecl};
use crate::diagnostics::{ParsingErrors, SyntaxError};
use crate::lexer::{Token, TokenKind, TokenValue};
use crate::types::SymbolType;
use sable_core::lang::keywords::{self, KeywordId};
use sable_core::lang::operators::{self, OperatorClass, OperatorId};
use sable_core::lang::punctuation::PunctuationId;

impl<'a> Parser<'a> {
    // ========================================================================
    // Binary levels
    // ========================================================================

    /// Full expression, including (right-associative) assignment.
    pub(super) fn parse_expression(&mut self) -> PResult<Node> {
        let Some(target) = self.parse_logical()? else {
            return Ok(None);
        };
        if !self.current().kind.is_operator_class(OperatorClass::Assignment) {
            return Ok(Some(target));
        }
        let op = self.advance();
        let value = match self.parse_expression()? {
            Some(value) => value,
            None => self.missing_operand(),
        };
        Ok(Some(self.assignment(target, op, value)))
    }

    /// Build an assignment node, flagging targets that cannot be assigned to.
    pub(super) fn assignment(&mut self, target: Node, op: Token, value: Node) -> Node {
        let assignable = matches!(
            target.kind,
            NodeKind::Ident(_)
                | NodeKind::DottedIdent(_)
                | NodeKind::IdentDef { .. }
                | NodeKind::Index { .. }
                | NodeKind::Deref(_)
        );
        if !assignable {
            self.record(SyntaxError::new(ParsingErrors::InvalidAssignment, op.clone()));
        }
        let span = target.span.merge(value.span);
        Node::new(
            NodeKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            op,
        )
        .with_span(span)
    }

    /// Left-associative fold over one operator class.
    fn parse_binary(&mut self, class: OperatorClass, next: fn(&mut Self) -> PResult<Node>) -> PResult<Node> {
        let Some(mut lhs) = next(self)? else {
            return Ok(None);
        };
        while self.current().kind.is_operator_class(class) {
            let op = self.advance();
            let rhs = match next(self)? {
                Some(rhs) => rhs,
                None => self.missing_operand(),
            };
            lhs = binary(lhs, op, rhs);
        }
        Ok(Some(lhs))
    }

    fn parse_logical(&mut self) -> PResult<Node> {
        self.parse_binary(OperatorClass::Logical, Self::parse_relational)
    }

    /// Relational operators. `a < b <= c` (both operators opening the same way) is one `Between` node.
    fn parse_relational(&mut self) -> PResult<Node> {
        let Some(mut lhs) = self.parse_bitwise()? else {
            return Ok(None);
        };
        while self.current().kind.is_operator_class(OperatorClass::Relational) {
            let op = self.advance();
            let rhs = match self.parse_bitwise()? {
                Some(rhs) => rhs,
                None => self.missing_operand(),
            };
            if let Some(op2) = self.chained_ordering(&op) {
                let upper = match self.parse_bitwise()? {
                    Some(upper) => upper,
                    None => self.missing_operand(),
                };
                let span = lhs.span.merge(upper.span);
                lhs = Node::new(
                    NodeKind::Between {
                        lower: Box::new(lhs),
                        value: Box::new(rhs),
                        upper: Box::new(upper),
                    },
                    op,
                )
                .with_span(span)
                .with_mark(op2);
            } else {
                lhs = binary(lhs, op, rhs);
            }
        }
        Ok(Some(lhs))
    }

    /// Consume the second operator of a `lower op value op upper` range, if one follows `op`.
    fn chained_ordering(&mut self, op: &Token) -> Option<Token> {
        let first = op.operator_id().filter(|id| operators::is_ordering(*id))?;
        let second = self.current().operator_id().filter(|id| operators::is_ordering(*id))?;
        let opens = |id: OperatorId| operators::as_str(id).chars().next();
        (opens(first) == opens(second)).then(|| self.advance())
    }

    fn parse_bitwise(&mut self) -> PResult<Node> {
        self.parse_binary(OperatorClass::Bitwise, Self::parse_shift)
    }

    pub(super) fn parse_shift(&mut self) -> PResult<Node> {
        self.parse_binary(OperatorClass::Shift, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> PResult<Node> {
        self.parse_binary(OperatorClass::Additive, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> PResult<Node> {
        self.parse_binary(OperatorClass::Multiplicative, Self::parse_incdec)
    }

    // ========================================================================
    // Unary levels
    // ========================================================================
    //
    // A name waiting in the lookaside slot is the start of the operand, so the
    // operator after it is binary or postfix, never a prefix.

    fn parse_incdec(&mut self) -> PResult<Node> {
        if self.lookaside.is_none() && self.current().kind.is_operator_class(OperatorClass::IncDec) {
            let op = self.advance();
            let operand = match self.parse_incdec()? {
                Some(operand) => operand,
                None => self.missing_operand(),
            };
            return Ok(Some(unary(NodeKind::PrefixIncDec, op, operand)));
        }
        let Some(mut node) = self.parse_deref()? else {
            return Ok(None);
        };
        while self.current().kind.is_operator_class(OperatorClass::IncDec) && !self.newline_before {
            let op = self.advance();
            node = unary(NodeKind::PostfixIncDec, op, node);
        }
        Ok(Some(node))
    }

    fn parse_deref(&mut self) -> PResult<Node> {
        let star = if self.lookaside.is_none() { self.eat_op(OperatorId::Star) } else { None };
        let Some(op) = star else {
            return self.parse_invert();
        };
        let operand = match self.parse_deref()? {
            Some(operand) => operand,
            None => self.missing_operand(),
        };
        Ok(Some(unary(NodeKind::Deref, op, operand)))
    }

    fn parse_invert(&mut self) -> PResult<Node> {
        let inverting = self.lookaside.is_none()
            && (self.current().kind.is_operator_class(OperatorClass::Invert) || self.at_op(OperatorId::Minus));
        if !inverting {
            return self.parse_postfix();
        }
        let op = self.advance();
        let operand = match self.parse_invert()? {
            Some(operand) => operand,
            None => self.missing_operand(),
        };
        Ok(Some(unary(NodeKind::Invert, op, operand)))
    }

    // ========================================================================
    // Postfix
    // ========================================================================

    fn parse_postfix(&mut self) -> PResult<Node> {
        let Some(mut node) = self.parse_value()? else {
            return Ok(None);
        };
        loop {
            if self.at_punct(PunctuationId::LParen) {
                node = self.parse_call(node, Vec::new())?;
            } else if self.at_punct(PunctuationId::LBracket) {
                node = self.parse_subscript(node)?;
            } else if self.at_punct(PunctuationId::Dot) {
                node = self.parse_member(node)?;
            } else {
                return Ok(Some(node));
            }
        }
    }

    /// `callee(args)`; the current token is `(`.
    pub(super) fn parse_call(&mut self, callee: Node, generics: Vec<Node>) -> Result<Node, SyntaxError> {
        let open = self.advance();
        let (args, close) = self.parse_list(PunctuationId::RParen, ParsingErrors::MissingRightParen)?;
        let span = callee.span.merge(close.span);
        Ok(Node::new(
            NodeKind::Call {
                callee: Box::new(callee),
                generics,
                args,
            },
            open,
        )
        .with_span(span))
    }

    /// `target[index]` or `target[start:end]`; the current token is `[`.
    fn parse_subscript(&mut self, target: Node) -> Result<Node, SyntaxError> {
        let open = self.advance();
        let start = self.parse_expression()?;
        let kind = if self.eat_punct(PunctuationId::Colon).is_some() {
            let end = self.parse_expression()?;
            NodeKind::Slice {
                target: Box::new(target),
                start: start.map(Box::new),
                end: end.map(Box::new),
            }
        } else {
            match start {
                Some(index) => NodeKind::Index {
                    target: Box::new(target),
                    index: Box::new(index),
                },
                None => return Err(self.error(ParsingErrors::MissingIndexOrSlice)),
            }
        };
        let close = self.expect_punct(PunctuationId::RBracket, ParsingErrors::MissingRightBracket)?;
        let mut node = Node::new(kind, open);
        let spans: Vec<_> = node.children().iter().map(|c| c.span).collect();
        for span in spans {
            node.extend_span(span);
        }
        node.extend_span(close.span);
        Ok(node)
    }

    /// `base.member`; the current token is `.`. Consecutive members flatten into one dotted identifier.
    fn parse_member(&mut self, base: Node) -> Result<Node, SyntaxError> {
        self.advance();
        if !self.at_ident() {
            return Err(self.error(ParsingErrors::MissingIdent));
        }
        let token = self.advance();
        let name = token.text().unwrap_or_default().to_string();
        let mut member = Node::ident(name.clone(), token);
        let owner_scope = match &base.kind {
            NodeKind::DottedIdent(parts) => parts.last().and_then(|p| p.as_ident()),
            _ => base.as_ident(),
        }
        .and_then(|ident| ident.symbol)
        .and_then(|id| self.symbols.get(id).scope);
        match owner_scope.and_then(|scope| self.symbols.find_in(scope, &name)) {
            Some(id) => member.attach_symbol(id, self.symbols.get(id), IdentRole::Property),
            None => {
                if let Some(ident) = member.as_ident_mut() {
                    ident.role = IdentRole::Property;
                }
            }
        }
        let span = base.span.merge(member.span);
        Ok(match base.kind {
            NodeKind::DottedIdent(mut parts) => {
                parts.push(member);
                Node {
                    kind: NodeKind::DottedIdent(parts),
                    span,
                    ..base
                }
            }
            _ => {
                let anchor = base.token.clone();
                Node::new(NodeKind::DottedIdent(vec![base, member]), anchor).with_span(span)
            }
        })
    }

    /// Comma-separated expressions up to `close`; the opening token was consumed.
    ///
    /// Returns the items and the closing token.
    pub(super) fn parse_list(
        &mut self,
        close: PunctuationId,
        unclosed: ParsingErrors,
    ) -> Result<(Vec<Node>, Token), SyntaxError> {
        let mut items = Vec::new();
        loop {
            if let Some(token) = self.eat_punct(close) {
                return Ok((items, token));
            }
            match self.parse_expression()? {
                Some(item) => items.push(item),
                None if self.at_eof() => return Err(self.error(unclosed)),
                None => return Err(self.error(ParsingErrors::MissingValue)),
            }
            if self.eat_punct(PunctuationId::Comma).is_none() && !self.at_punct(close) {
                let kind = if self.at_eof() { unclosed } else { ParsingErrors::MissingComma };
                return Err(self.error(kind));
            }
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    fn parse_value(&mut self) -> PResult<Node> {
        if let Some(node) = self.lookaside.take() {
            return Ok(Some(node));
        }
        let kind = self.current().kind;
        let node = match kind {
            TokenKind::Ident => return self.parse_ident_value().map(Some),
            TokenKind::Keyword(id) if keywords::is_type_name(id) => return self.parse_ident_value().map(Some),
            TokenKind::Int | TokenKind::Float | TokenKind::Str | TokenKind::Char | TokenKind::Bool | TokenKind::Null => {
                literal(self.advance())
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                let open = self.advance();
                let inner = match self.parse_expression()? {
                    Some(inner) => inner,
                    None => return Err(self.error(ParsingErrors::MissingValue)),
                };
                let close = self.expect_punct(PunctuationId::RParen, ParsingErrors::MissingRightParen)?;
                inner.with_span(open.span.merge(close.span))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                let open = self.advance();
                let (items, close) = self.parse_list(PunctuationId::RBracket, ParsingErrors::MissingRightBracket)?;
                Node::new(NodeKind::List(items), open).with_span(close.span)
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => self.parse_dict()?,
            TokenKind::Keyword(KeywordId::New) => self.parse_new()?,
            TokenKind::Keyword(KeywordId::Function) => self.parse_lambda()?,
            TokenKind::Invalid => self.parse_invalid_run(),
            _ => return Ok(None),
        };
        Ok(Some(node))
    }

    /// Malformed tokens on one line, reported once and kept as a single invalid node.
    fn parse_invalid_run(&mut self) -> Node {
        let first = self.advance();
        let reason = format!("(`{}`)", first.describe());
        self.record(SyntaxError::new(ParsingErrors::InvalidTokenSequence, first.clone()).with_reason(reason));
        let mut span = first.span;
        while self.current().kind == TokenKind::Invalid && !self.newline_before {
            span = span.merge(self.advance().span);
        }
        Node::invalid(first).with_span(span)
    }

    /// An identifier in value position, with a speculative generic argument list when it names a type or template.
    fn parse_ident_value(&mut self) -> Result<Node, SyntaxError> {
        let token = self.advance();
        let node = self.bind_ident(token);
        let generic_capable = node.as_ident().is_some_and(|ident| ident.ty.is_generic_capable());
        if !(self.config.speculate_generics && generic_capable && self.at_op(OperatorId::Lt)) {
            return Ok(node);
        }
        let Some((generics, close)) = self.try_generic_args() else {
            return Ok(node);
        };
        if self.at_punct(PunctuationId::LParen) {
            return self.parse_call(node, generics);
        }
        let ty = node.as_ident().map_or(SymbolType::UNKNOWN, |ident| ident.ty);
        let anchor = node.token.clone();
        let span = node.span.merge(close.span);
        Ok(Node::new(
            NodeKind::TypeDecl(TypeDecl {
                storage: None,
                name: Box::new(node),
                generics,
                ty,
            }),
            anchor,
        )
        .with_span(span))
    }

    /// Try to read `<arg, ...>` at the current `<`. On failure nothing is consumed.
    ///
    /// Arguments are type references or shift-level expressions. A closing `>>`, `>=` or `>>=` is split so that
    /// nested lists close one level at a time.
    pub(super) fn try_generic_args(&mut self) -> Option<(Vec<Node>, Token)> {
        let checkpoint = self.checkpoint();
        self.advance();
        let mut args = Vec::new();
        loop {
            if let Some(close) = self.close_angle() {
                return Some((args, close));
            }
            let arg = if self.at_type_name() {
                self.parse_type(None)
            } else {
                self.parse_shift()
            };
            match arg {
                Ok(Some(arg)) => args.push(arg),
                Ok(None) | Err(_) => break,
            }
            if self.eat_punct(PunctuationId::Comma).is_none() && !self.at_closing_angle() {
                break;
            }
        }
        self.restore(checkpoint);
        None
    }

    pub(super) fn at_closing_angle(&self) -> bool {
        matches!(
            self.current().operator_id(),
            Some(OperatorId::Gt | OperatorId::Shr | OperatorId::GtEq | OperatorId::ShrEq)
        )
    }

    /// Consume one `>`, splitting a compound closing token if needed.
    pub(super) fn close_angle(&mut self) -> Option<Token> {
        if !self.at_closing_angle() {
            return None;
        }
        self.lexer.split_angle();
        Some(self.advance())
    }

    /// `{ key: value, ... }`; the current token is `{`.
    fn parse_dict(&mut self) -> Result<Node, SyntaxError> {
        let open = self.advance();
        let mut entries = Vec::new();
        let close = loop {
            if let Some(close) = self.eat_punct(PunctuationId::RBrace) {
                break close;
            }
            let Some(key) = self.parse_expression()? else {
                return Err(self.error(ParsingErrors::MissingValue));
            };
            self.expect_punct(PunctuationId::Colon, ParsingErrors::MissingValue)?;
            let Some(value) = self.parse_expression()? else {
                return Err(self.error(ParsingErrors::MissingValue));
            };
            entries.push((key, value));
            if self.eat_punct(PunctuationId::Comma).is_none() && !self.at_punct(PunctuationId::RBrace) {
                return Err(self.error(ParsingErrors::MissingComma));
            }
        };
        Ok(Node::new(NodeKind::Dict(entries), open).with_span(close.span))
    }

    /// `new Type` or `new Type(args)`.
    fn parse_new(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let Some(ty) = self.parse_type(None)? else {
            return Err(self.error(ParsingErrors::MissingType));
        };
        let mut span = keyword.span.merge(ty.span);
        let args = match self.eat_punct(PunctuationId::LParen) {
            Some(_) => {
                let (args, close) = self.parse_list(PunctuationId::RParen, ParsingErrors::MissingRightParen)?;
                span = span.merge(close.span);
                Some(args)
            }
            None => None,
        };
        Ok(Node::new(NodeKind::New { ty: Box::new(ty), args }, keyword).with_span(span))
    }

    /// `function (params) [-> Type] { ... }` in value position.
    fn parse_lambda(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let previous = self.symbols.push();
        let result = self.parse_signature_and_body();
        self.symbols.enter(previous);
        let (params, ret, body) = result?;
        let span = keyword.span.merge(body.span);
        Ok(Node::new(
            NodeKind::Lambda {
                params: Box::new(params),
                ret: ret.map(Box::new),
                body: Box::new(body),
            },
            keyword,
        )
        .with_span(span))
    }
}

fn binary(lhs: Node, op: Token, rhs: Node) -> Node {
    let span = lhs.span.merge(rhs.span);
    Node::new(
        NodeKind::Binary {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        op,
    )
    .with_span(span)
}

fn unary(make: fn(Box<Node>) -> NodeKind, op: Token, operand: Node) -> Node {
    let span = operand.span;
    Node::new(make(Box::new(operand)), op).with_span(span)
}

fn literal(token: Token) -> Node {
    let kind = match (&token.kind, &token.value) {
        (TokenKind::Int, TokenValue::Int(value)) => NodeKind::Int(*value),
        (TokenKind::Float, TokenValue::Float { value, single }) => NodeKind::Float {
            value: *value,
            single: *single,
        },
        (TokenKind::Str, TokenValue::Str(value)) => NodeKind::Str(value.clone()),
        (TokenKind::Char, TokenValue::Char(value)) => NodeKind::Char(*value),
        (TokenKind::Bool, TokenValue::Bool(value)) => NodeKind::Bool(*value),
        (TokenKind::Null, _) => NodeKind::Null,
        _ => NodeKind::Invalid,
    };
    Node::new(kind, token)
}
