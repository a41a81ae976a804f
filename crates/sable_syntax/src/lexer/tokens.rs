//! Token types for the Sable lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators (including word operators like `and`)
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Tokens are plain values. The parser clones the current token whenever it needs to keep it past an advance,
//!   which is what makes lexer snapshots safe to restore.
//! - Trivia (whitespace, newlines, comments) are real tokens so comments can be reattached to AST nodes.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::source::{Position, Span};
use sable_core::lang::keywords::{self, KeywordId};
use sable_core::lang::operators::OperatorId;
use sable_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Anything the lexer could not make sense of. Never raised as an error by the lexer itself.
    Invalid,
    Eof,

    // ========== Trivia ==========
    Whitespace,
    Newline,
    LineComment,
    BlockComment,

    // ========== Identifiers and literals ==========
    Ident,
    Int,
    Float,
    Str,
    Char,
    Bool,
    Null,

    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),
}

/// Decoded literal payload of a token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    Int(u64),
    Float {
        value: f64,
        /// `true` when the literal carried an `f`/`F` suffix.
        single: bool,
    },
    Str(String),
    Char(char),
    Bool(bool),
    /// Raw source text (identifiers, comments, invalid input).
    Text(String),
}

/// A token with its kind, decoded value and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub span: Span,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
    /// Length in UTF-16 code units.
    pub utf16_len: u32,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, span: Span, offset: usize, len: usize, utf16_len: u32) -> Self {
        Self {
            kind,
            value,
            span,
            offset,
            len,
            utf16_len,
        }
    }

    /// Zero-width end-of-file token at `pos`.
    pub fn eof(pos: Position, offset: usize) -> Self {
        Self::new(TokenKind::Eof, TokenValue::None, Span::point(pos), offset, 0, 0)
    }

    /// Zero-width invalid token, used by the parser for placeholder nodes.
    pub fn placeholder(pos: Position, offset: usize) -> Self {
        Self::new(TokenKind::Invalid, TokenValue::None, Span::point(pos), offset, 0, 0)
    }

    /// A token is valid iff its kind is not [`TokenKind::Invalid`].
    pub fn is_valid(&self) -> bool {
        self.kind != TokenKind::Invalid
    }

    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Raw text payload (identifiers, comments, invalid input).
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Byte range of the token in the source text.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Human-readable spelling used in diagnostics and debug output.
    pub fn describe(&self) -> String {
        use sable_core::lang::{operators, punctuation};
        match (&self.kind, &self.value) {
            (TokenKind::Keyword(id), _) => keywords::as_str(*id).to_string(),
            (TokenKind::Operator(id), _) => operators::as_str(*id).to_string(),
            (TokenKind::Punctuation(id), _) => punctuation::as_str(*id).to_string(),
            (TokenKind::Eof, _) => "end of file".to_string(),
            (_, TokenValue::Text(s)) => s.clone(),
            (_, TokenValue::Int(n)) => n.to_string(),
            (_, TokenValue::Float { value, single }) => {
                format!("{}{}", value, if *single { "f" } else { "" })
            }
            (_, TokenValue::Str(s)) => format!("{:?}", s),
            (_, TokenValue::Char(c)) => format!("{:?}", c),
            (_, TokenValue::Bool(b)) => b.to_string(),
            (TokenKind::Null, _) => "nullptr".to_string(),
            (kind, TokenValue::None) => format!("{:?}", kind),
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
