//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy to work with
//! ID-based tokens.

use crate::lexer::{Token, TokenKind};
use sable_core::lang::keywords::{self, KeywordId};
use sable_core::lang::operators::{self, OperatorClass, OperatorId};
use sable_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the operator class, if this is an operator token.
    pub fn operator_class(&self) -> Option<OperatorClass> {
        self.operator_id().map(operators::class)
    }

    /// Return `true` if this is an operator of the given class.
    pub fn is_operator_class(&self, class: OperatorClass) -> bool {
        self.operator_class() == Some(class)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` for literal kinds (`1`, `1.5`, `"s"`, `'c'`, `true`, `nullptr`).
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::Str | TokenKind::Char | TokenKind::Bool | TokenKind::Null
        )
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }

    /// The name this token refers to: an identifier's text, or the spelling of a type keyword such as `none`.
    pub fn name(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Ident => self.text(),
            TokenKind::Keyword(id) if keywords::is_type_name(id) => Some(keywords::as_str(id)),
            _ => None,
        }
    }
}
