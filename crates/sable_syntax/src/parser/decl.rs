//! Declarations: typed variables, type references, functions, operators, templates, classes and imports.
//!
//! Every declaration binds its name in the symbol table as soon as the name is read, so the body of a function
//! or class can refer to it. Redeclaring a name in the same scope is reported and the existing binding kept.

use super::stmt::{BlockScope, ItemContext};
use super::{PResult, Parser};
use crate::ast::{Callable, ClassKind, IdentRole, Node, NodeKind, TypeDecl};
use crate::diagnostics::{ParsingErrors, SyntaxError};
use crate::lexer::{Token, TokenKind};
use crate::resolver;
use crate::symbols::{ScopeId, Symbol, SymbolError, SymbolId, SymbolOrigin};
use crate::types::SymbolType;
use sable_core::lang::keywords::KeywordId;
use sable_core::lang::operators::{self, OperatorId};
use sable_core::lang::punctuation::PunctuationId;

impl<'a> Parser<'a> {
    // ========================================================================
    // Binding helpers
    // ========================================================================

    /// Bind `symbol` in `scope` and attach it to the identifier node `name`.
    ///
    /// On a collision a `SymbolAlreadyDefined` error is recorded at the name and the node is attached to the
    /// existing symbol instead.
    fn declare(&mut self, name: &mut Node, symbol: Symbol, scope: ScopeId, role: IdentRole) -> Option<SymbolId> {
        match self.symbols.add_in(scope, symbol) {
            Ok(id) => {
                name.attach_symbol(id, self.symbols.get(id), role);
                name.mark_declaration();
                Some(id)
            }
            Err(SymbolError::AlreadyDefined { name: text, existing }) => {
                self.record(
                    SyntaxError::new(ParsingErrors::SymbolAlreadyDefined, name.token.clone())
                        .with_reason(format!("(`{}`)", text)),
                );
                name.attach_symbol(existing, self.symbols.get(existing), role);
                None
            }
        }
    }

    /// Role of a name declared directly in `scope`.
    fn member_role(&self, scope: ScopeId) -> IdentRole {
        if self.symbols.scope(scope).owner().is_some() {
            IdentRole::Property
        } else {
            IdentRole::Variable
        }
    }

    /// Consume an identifier token or fail with `MissingIdent`.
    fn expect_ident(&mut self) -> Result<(String, Token), SyntaxError> {
        if !self.at_ident() {
            return Err(self.error(ParsingErrors::MissingIdent));
        }
        let token = self.advance();
        Ok((token.text().unwrap_or_default().to_string(), token))
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// A statement starting with an identifier: a declaration when the identifier names a type, otherwise an
    /// expression.
    ///
    /// An unknown name directly followed by another identifier on the same line (`Foo x`) is reported as
    /// `MissingType`; the unknown name is handed back through the lookaside slot.
    pub(super) fn parse_ident_statement(&mut self) -> PResult<Node> {
        if self.at_type_name() {
            let checkpoint = self.checkpoint();
            if let Some(decl) = self.parse_declaration(None)? {
                return Ok(Some(decl));
            }
            self.restore(checkpoint);
            return self.parse_expression();
        }
        if self.lookup_current().is_none() {
            let token = self.advance();
            let node = self.bind_ident(token);
            if self.at_ident() && !self.newline_before {
                let reason = format!("(`{}` does not name a type)", node.token.describe());
                let err = SyntaxError::new(ParsingErrors::MissingType, node.token.clone()).with_reason(reason);
                self.lookaside = Some(node);
                return Err(err);
            }
            self.lookaside = Some(node);
        }
        self.parse_expression()
    }

    /// `[storage] Type name [= value]`.
    ///
    /// Without a storage prefix, `Ok(None)` means the tokens did not form a declaration and the caller should
    /// backtrack. After a storage prefix the declaration is required.
    pub(super) fn parse_declaration(&mut self, storage: Option<Node>) -> PResult<Node> {
        let required = storage.is_some();
        let Some(ty) = self.parse_type(storage)? else {
            return Ok(None);
        };
        if !self.at_ident() {
            return if required {
                Err(self.error(ParsingErrors::MissingIdent))
            } else {
                Ok(None)
            };
        }
        let (text, token) = self.expect_ident()?;
        let (declared, members) = match &ty.kind {
            NodeKind::TypeDecl(decl) => (
                decl.ty,
                decl.name
                    .as_ident()
                    .and_then(|ident| ident.symbol)
                    .and_then(|id| self.symbols.get(id).scope),
            ),
            _ => (SymbolType::UNKNOWN, None),
        };
        let scope = self.symbols.current();
        let role = self.member_role(scope);
        let mut name = Node::ident(text.clone(), token);
        let id = self.declare(&mut name, Symbol::new(text, declared.for_value()), scope, role);
        if let (Some(id), Some(members)) = (id, members) {
            self.symbols.set_scope(id, members);
        }

        let assign = self.eat_op(OperatorId::Eq);
        let value = match assign {
            Some(_) => Some(match self.parse_expression()? {
                Some(value) => value,
                None => self.missing_operand(),
            }),
            None => None,
        };
        if let (Some(id), Some(value)) = (id, &value) {
            self.infer(id, &mut name, value);
        }

        let anchor = name.token.clone();
        let span = ty.span.merge(name.span);
        let def = Node::new(
            NodeKind::IdentDef {
                ty: Box::new(ty),
                name: Box::new(name),
                default: None,
            },
            anchor,
        )
        .with_span(span);
        Ok(Some(match (assign, value) {
            (Some(op), Some(value)) => self.assignment(def, op, value),
            _ => def,
        }))
    }

    /// Give an `auto` binding the type of its initializer.
    ///
    /// A type-valued initializer is copied as is (the binding becomes a type alias); any other known type decays
    /// through `for_value`.
    fn infer(&mut self, id: SymbolId, name: &mut Node, value: &Node) {
        if !self.symbols.get(id).ty.contains(SymbolType::auto()) {
            return;
        }
        let resolved = resolver::resolve(value, &self.symbols);
        if resolved.is_unknown() {
            return;
        }
        let ty = if resolved.is_type() { resolved } else { resolved.for_value() };
        tracing::trace!(name = %self.symbols.get(id).name, %ty, "inferred");
        self.symbols.update_type(id, ty);
        if let Some(ident) = name.as_ident_mut() {
            ident.ty = ty;
        }
    }

    // ========================================================================
    // Type references
    // ========================================================================

    /// `[storage] Type[<args>][...][&|*]*`, when the current identifier names a type.
    pub(super) fn parse_type(&mut self, storage: Option<Node>) -> PResult<Node> {
        if !self.at_type_name() {
            return Ok(None);
        }
        let token = self.advance();
        let name = self.bind_ident(token);
        let mut ty = name.as_ident().map_or(SymbolType::UNKNOWN, |ident| ident.ty);
        let anchor = name.token.clone();
        let mut span = name.span;

        let mut generics = Vec::new();
        if self.at_op(OperatorId::Lt) {
            if let Some((args, close)) = self.try_generic_args() {
                generics = args;
                span = span.merge(close.span);
            }
        }

        let mut marks = Vec::new();
        loop {
            if let Some(dots) = self.eat_punct(PunctuationId::Ellipsis) {
                ty = ty.append(SymbolType::pack());
                marks.push(dots);
            } else if let Some(amp) = self.eat_op(OperatorId::Amp) {
                ty = ty.append(SymbolType::reference());
                marks.push(amp);
            } else if let Some(star) = self.eat_op(OperatorId::Star) {
                ty = ty.append(SymbolType::pointer());
                marks.push(star);
            } else {
                break;
            }
        }

        if let Some(storage) = &storage {
            span = span.merge(storage.span);
        }
        let mut node = Node::new(
            NodeKind::TypeDecl(TypeDecl {
                storage: storage.map(Box::new),
                name: Box::new(name),
                generics,
                ty,
            }),
            anchor,
        )
        .with_span(span);
        for mark in marks {
            node = node.with_mark(mark);
        }
        Ok(Some(node))
    }

    // ========================================================================
    // Functions and operators
    // ========================================================================

    /// `(params) [-> Type]`
    fn parse_signature(&mut self) -> Result<(Node, Option<Node>), SyntaxError> {
        let params = self.parse_params()?;
        let ret = match self.eat_punct(PunctuationId::Arrow) {
            Some(arrow) => match self.parse_type(None)? {
                Some(ty) => {
                    let span = ty.span;
                    Some(Node::new(NodeKind::ReturnType(Box::new(ty)), arrow).with_span(span))
                }
                None => return Err(self.error(ParsingErrors::MissingReturnType)),
            },
            None => None,
        };
        Ok((params, ret))
    }

    /// Signature plus a required body. Used by lambdas, which have no symbol to carry a return type.
    pub(super) fn parse_signature_and_body(&mut self) -> Result<(Node, Option<Node>, Node), SyntaxError> {
        let (params, ret) = self.parse_signature()?;
        let body = self.expect_block(BlockScope::Fresh)?;
        Ok((params, ret, body))
    }

    /// Signature and body of a named callable, recording the declared return type on `id` before the body.
    fn parse_callable_rest(&mut self, id: Option<SymbolId>) -> Result<(Node, Option<Node>, Node), SyntaxError> {
        let (params, ret) = self.parse_signature()?;
        if let Some(id) = id {
            let returns = ret
                .as_ref()
                .and_then(|r| match &r.kind {
                    NodeKind::ReturnType(ty) => match &ty.kind {
                        NodeKind::TypeDecl(decl) => Some(decl.ty.for_value()),
                        _ => None,
                    },
                    _ => None,
                })
                .unwrap_or_else(SymbolType::none);
            self.symbols.set_return_type(id, returns);
        }
        let body = self.expect_block(BlockScope::Fresh)?;
        Ok((params, ret, body))
    }

    /// `(Type name [= default], ...)`; parameters are bound in the current scope.
    fn parse_params(&mut self) -> Result<Node, SyntaxError> {
        let open = self.expect_punct(PunctuationId::LParen, ParsingErrors::MissingParams)?;
        let mut params = Vec::new();
        let close = loop {
            if let Some(close) = self.eat_punct(PunctuationId::RParen) {
                break close;
            }
            params.push(self.parse_param()?);
            if self.eat_punct(PunctuationId::Comma).is_none() && !self.at_punct(PunctuationId::RParen) {
                let kind = if self.at_eof() {
                    ParsingErrors::MissingRightParen
                } else {
                    ParsingErrors::MissingComma
                };
                return Err(self.error(kind));
            }
        };
        Ok(Node::new(NodeKind::Params(params), open).with_span(close.span))
    }

    fn parse_param(&mut self) -> Result<Node, SyntaxError> {
        let Some(ty) = self.parse_type(None)? else {
            let reason = format!("(`{}` does not name a type)", self.current().describe());
            return Err(self.error(ParsingErrors::MissingType).with_reason(reason));
        };
        let (text, token) = self.expect_ident()?;
        let declared = match &ty.kind {
            NodeKind::TypeDecl(decl) => decl.ty,
            _ => SymbolType::UNKNOWN,
        };
        let mut name = Node::ident(text.clone(), token);
        let symbol = Symbol::new(text, declared.for_value()).with_origin(SymbolOrigin::Parameter);
        let scope = self.symbols.current();
        self.declare(&mut name, symbol, scope, IdentRole::Parameter);

        let default = match self.eat_op(OperatorId::Eq) {
            Some(_) => Some(match self.parse_expression()? {
                Some(value) => value,
                None => self.missing_operand(),
            }),
            None => None,
        };
        let anchor = name.token.clone();
        let mut span = ty.span.merge(name.span);
        if let Some(default) = &default {
            span = span.merge(default.span);
        }
        Ok(Node::new(
            NodeKind::IdentDef {
                ty: Box::new(ty),
                name: Box::new(name),
                default: default.map(Box::new),
            },
            anchor,
        )
        .with_span(span))
    }

    /// `function name(params) [-> Type] { body }`; the current token is `function`.
    pub(super) fn parse_function(&mut self, visibility: Option<Node>, storage: Option<Node>) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let template = self.template_scope.take();
        let scope = template.unwrap_or_else(|| self.symbols.current());
        let (text, token) = self.expect_ident()?;
        let mut ty = SymbolType::function();
        if template.is_some() {
            ty = ty.append(SymbolType::template());
        }
        let mut name = Node::ident(text.clone(), token);
        let role = self.member_role(scope);
        let id = self.declare(&mut name, Symbol::new(text, ty), scope, role);

        let previous = self.symbols.push();
        let result = self.parse_callable_rest(id);
        self.symbols.enter(previous);
        let (params, ret, body) = result?;

        Ok(callable_node(
            keyword,
            Callable {
                visibility,
                storage,
                name: Some(name),
                params,
                ret,
                body,
            },
            NodeKind::FunctionDef,
        ))
    }

    /// `operator <op> (params) [-> Type] { body }`; the current token is `operator`.
    ///
    /// Operators bind as `operator<spelling>` and may be overloaded, so a later definition replaces the binding.
    pub(super) fn parse_operator(&mut self, visibility: Option<Node>, storage: Option<Node>) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let template = self.template_scope.take();
        let Some(op) = self.current().operator_id() else {
            return Err(self.error(ParsingErrors::IncorrectToken).with_reason("(expected an operator)"));
        };
        let op_token = self.advance();
        let mut ty = SymbolType::function();
        if template.is_some() {
            ty = ty.append(SymbolType::template());
        }
        let symbol = Symbol::new(format!("operator{}", operators::as_str(op)), ty);
        let id = match template {
            Some(scope) => self.symbols.add_in(scope, symbol).ok(),
            None => Some(self.symbols.insert(symbol)),
        };

        let previous = self.symbols.push();
        let result = self.parse_callable_rest(id);
        self.symbols.enter(previous);
        let (params, ret, body) = result?;

        Ok(callable_node(
            keyword,
            Callable {
                visibility,
                storage,
                name: None,
                params,
                ret,
                body,
            },
            NodeKind::OperatorDef,
        )
        .with_mark(op_token))
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// `template<T, Ts...> item`; the parameters live in their own scope, the item is bound in the enclosing one.
    pub(super) fn parse_template(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        if !self.at_op(OperatorId::Lt) {
            return Err(self.error(ParsingErrors::IncorrectToken).with_reason("(expected `<`)"));
        }
        self.advance();
        let parent = self.symbols.current();
        let previous = self.symbols.push();
        let result = self.parse_template_rest(parent);
        self.symbols.enter(previous);
        self.template_scope = None;
        let (params, item) = result?;
        let span = item.span;
        Ok(Node::new(
            NodeKind::TemplateDef {
                params,
                item: Box::new(item),
            },
            keyword,
        )
        .with_span(span))
    }

    fn parse_template_rest(&mut self, parent: ScopeId) -> Result<(Vec<Node>, Node), SyntaxError> {
        let mut params = Vec::new();
        loop {
            if self.close_angle().is_some() {
                break;
            }
            let (text, token) = self.expect_ident()?;
            let mut param = Node::ident(text.clone(), token);
            let mut ty = SymbolType::meta();
            if let Some(dots) = self.eat_punct(PunctuationId::Ellipsis) {
                ty = ty.append(SymbolType::pack());
                param = param.with_mark(dots);
            }
            let scope = self.symbols.current();
            let symbol = Symbol::new(text, ty).with_origin(SymbolOrigin::Parameter);
            self.declare(&mut param, symbol, scope, IdentRole::Parameter);
            params.push(param);
            if self.eat_punct(PunctuationId::Comma).is_none() && !self.at_closing_angle() {
                return Err(self.error(ParsingErrors::MissingComma));
            }
        }

        let templatable = matches!(
            self.current().keyword_id(),
            Some(
                KeywordId::Class
                    | KeywordId::Enum
                    | KeywordId::Function
                    | KeywordId::Operator
                    | KeywordId::Public
                    | KeywordId::Private
                    | KeywordId::Protected
            )
        );
        if !templatable {
            return Err(self
                .error(ParsingErrors::IncorrectToken)
                .with_reason("(a template must introduce a class or function)"));
        }
        self.template_scope = Some(parent);
        match self.parse_statement()? {
            Some(item) => Ok((params, item)),
            None => Err(self.error(ParsingErrors::ParsingFailed)),
        }
    }

    // ========================================================================
    // Classes and enums
    // ========================================================================

    /// `class Name [: Base, ...] { members }` or `enum Name { ... }`; the current token is the keyword.
    pub(super) fn parse_class(&mut self, visibility: Option<Node>) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let kind = if keyword.kind.is_keyword(KeywordId::Enum) {
            ClassKind::Enum
        } else {
            ClassKind::Class
        };
        let template = self.template_scope.take();
        let scope = template.unwrap_or_else(|| self.symbols.current());
        let (text, token) = self.expect_ident()?;
        let mut ty = SymbolType::structure().as_type();
        if template.is_some() {
            ty = ty.append(SymbolType::template());
        }
        let role = match kind {
            ClassKind::Enum => IdentRole::Enum,
            ClassKind::Class => IdentRole::Variable,
        };
        let mut name = Node::ident(text.clone(), token);
        let id = self.declare(&mut name, Symbol::new(text, ty), scope, role);

        let mut bases = Vec::new();
        if self.eat_punct(PunctuationId::Colon).is_some() {
            loop {
                match self.parse_type(None)? {
                    Some(base) => bases.push(base),
                    None => return Err(self.error(ParsingErrors::MissingType)),
                }
                if self.eat_punct(PunctuationId::Comma).is_none() {
                    break;
                }
            }
        }

        if !self.at_punct(PunctuationId::LBrace) {
            return Err(self.error(ParsingErrors::MissingBlock));
        }
        let members = match id {
            Some(id) => BlockScope::Enter(self.symbols.allocate_struct(id)),
            None => BlockScope::Fresh,
        };
        let context = match kind {
            ClassKind::Enum => ItemContext::Enum,
            ClassKind::Class => ItemContext::Block,
        };
        let body = self.parse_block(members, context)?;

        let mut span = keyword.span.merge(body.span);
        if let Some(visibility) = &visibility {
            span = span.merge(visibility.span);
        }
        Ok(Node::new(
            NodeKind::Class {
                kind,
                visibility: visibility.map(Box::new),
                name: Box::new(name),
                bases,
                body: Box::new(body),
            },
            keyword,
        )
        .with_span(span))
    }

    /// Inside an enum body: a name that is not a type starts an enumerator.
    pub(super) fn at_enumerator(&self) -> bool {
        self.at_ident() && !self.at_type_name()
    }

    /// `Name [= value] [,]`
    pub(super) fn parse_enumerator(&mut self) -> PResult<Node> {
        let (text, token) = self.expect_ident()?;
        let scope = self.symbols.current();
        let ty = self
            .symbols
            .scope(scope)
            .owner()
            .map_or(SymbolType::UNKNOWN, |owner| self.symbols.get(owner).ty.for_value());
        let mut name = Node::ident(text.clone(), token);
        self.declare(&mut name, Symbol::new(text, ty), scope, IdentRole::Property);
        let node = match self.eat_op(OperatorId::Eq) {
            Some(op) => {
                let value = match self.parse_expression()? {
                    Some(value) => value,
                    None => self.missing_operand(),
                };
                self.assignment(name, op, value)
            }
            None => name,
        };
        self.eat_punct(PunctuationId::Comma);
        Ok(Some(node))
    }

    // ========================================================================
    // Imports
    // ========================================================================

    /// `import a.b [as c]` or `from a.b import c [as d], e`.
    ///
    /// The bound names (the alias, else the last path segment or item name) are inserted as imported symbols
    /// with an unknown type; modules are not resolved.
    pub(super) fn parse_import(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.advance();
        let mut module = self.parse_module_path()?;
        if keyword.kind.is_keyword(KeywordId::From) {
            let Some(import_kw) = self.eat_keyword(KeywordId::Import) else {
                return Err(self.error(ParsingErrors::IncorrectToken).with_reason("(expected `import`)"));
            };
            let mut items = Vec::new();
            loop {
                items.push(self.parse_import_item()?);
                if self.eat_punct(PunctuationId::Comma).is_none() {
                    break;
                }
            }
            let span = items.iter().fold(module.span, |span, item| span.merge(item.span));
            return Ok(Node::new(
                NodeKind::Import {
                    module: Box::new(module),
                    alias: None,
                    items,
                },
                keyword,
            )
            .with_span(span)
            .with_mark(import_kw));
        }

        let as_kw = self.eat_keyword(KeywordId::As);
        let alias = match as_kw {
            Some(_) => {
                let (text, token) = self.expect_ident()?;
                let mut alias = Node::ident(text.clone(), token);
                self.import_symbol(&mut alias, text);
                Some(alias)
            }
            None => {
                if let NodeKind::DottedIdent(parts) = &mut module.kind {
                    if let Some(last) = parts.last_mut() {
                        let text = last.as_ident().map(|i| i.name.clone()).unwrap_or_default();
                        self.import_symbol(last, text);
                    }
                } else {
                    let text = module.as_ident().map(|i| i.name.clone()).unwrap_or_default();
                    self.import_symbol(&mut module, text);
                }
                None
            }
        };
        let mut span = module.span;
        if let Some(alias) = &alias {
            span = span.merge(alias.span);
        }
        let mut node = Node::new(
            NodeKind::Import {
                module: Box::new(module),
                alias: alias.map(Box::new),
                items: Vec::new(),
            },
            keyword,
        )
        .with_span(span);
        if let Some(as_kw) = as_kw {
            node = node.with_mark(as_kw);
        }
        Ok(node)
    }

    fn parse_import_item(&mut self) -> Result<Node, SyntaxError> {
        let (text, token) = self.expect_ident()?;
        let mut name = Node::ident(text.clone(), token.clone());
        let as_kw = self.eat_keyword(KeywordId::As);
        let alias = match as_kw {
            Some(_) => {
                let (alias_text, alias_token) = self.expect_ident()?;
                let mut alias = Node::ident(alias_text.clone(), alias_token);
                self.import_symbol(&mut alias, alias_text);
                Some(alias)
            }
            None => {
                self.import_symbol(&mut name, text);
                None
            }
        };
        let mut span = name.span;
        if let Some(alias) = &alias {
            span = span.merge(alias.span);
        }
        let mut node = Node::new(
            NodeKind::ImportIdent {
                name: Box::new(name),
                alias: alias.map(Box::new),
            },
            token,
        )
        .with_span(span);
        if let Some(as_kw) = as_kw {
            node = node.with_mark(as_kw);
        }
        Ok(node)
    }

    /// `a.b.c`; every segment is a namespace identifier.
    fn parse_module_path(&mut self) -> Result<Node, SyntaxError> {
        let mut parts = Vec::new();
        loop {
            let (text, token) = self.expect_ident()?;
            let mut part = Node::ident(text, token);
            if let Some(ident) = part.as_ident_mut() {
                ident.role = IdentRole::Namespace;
            }
            parts.push(part);
            if self.eat_punct(PunctuationId::Dot).is_none() {
                break;
            }
        }
        if parts.len() == 1 {
            return Ok(parts.remove(0));
        }
        let anchor = parts[0].token.clone();
        let span = parts.iter().fold(parts[0].span, |span, part| span.merge(part.span));
        Ok(Node::new(NodeKind::DottedIdent(parts), anchor).with_span(span))
    }

    fn import_symbol(&mut self, name: &mut Node, text: String) {
        let id = self
            .symbols
            .insert(Symbol::new(text, SymbolType::UNKNOWN).with_origin(SymbolOrigin::Imported));
        name.attach_symbol(id, self.symbols.get(id), IdentRole::Namespace);
        name.mark_declaration();
    }
}

/// Wrap a callable into a function/operator definition node spanning from its first prefix to its body.
fn callable_node(keyword: Token, callable: Callable, make: fn(Box<Callable>) -> NodeKind) -> Node {
    let mut span = keyword.span.merge(callable.body.span);
    for prefix in [&callable.visibility, &callable.storage].into_iter().flatten() {
        span = span.merge(prefix.span);
    }
    Node::new(make(Box::new(callable)), keyword).with_span(span)
}

#[cfg(test)]
mod tests {
    use crate::parse_str;
    use crate::types::SymbolType;

    #[test]
    fn operator_definitions_bind_spelled_names() {
        let result = parse_str("class Vec { } operator + (Vec a, Vec b) -> Vec { return a; }");
        assert!(result.is_ok(), "{:?}", result.errors);
        let id = result.symbols.find("operator+").expect("operator symbol");
        let symbol = result.symbols.get(id);
        assert!(symbol.ty.is_function());
        assert_eq!(symbol.return_type, Some(SymbolType::structure()));
    }

    #[test]
    fn function_without_return_type_returns_none() {
        let result = parse_str("function f() { }");
        let id = result.symbols.find("f").unwrap();
        assert_eq!(result.symbols.get(id).return_type, Some(SymbolType::none()));
    }

    #[test]
    fn import_binds_last_segment_and_alias() {
        let result = parse_str("import a.b; import c.d as e; from m import f as g, h;");
        assert!(result.is_ok(), "{:?}", result.errors);
        for name in ["b", "e", "g", "h"] {
            assert!(result.symbols.find(name).is_some(), "missing {name}");
        }
        assert!(result.symbols.find("d").is_none());
        assert!(result.symbols.find("f").is_none());
    }
}
