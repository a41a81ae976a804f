//! Syntax errors.
//!
//! A [`SyntaxError`] pairs the offending token with one of the closed set of [`ParsingErrors`] and an optional
//! free-text reason. Errors are collected by the parser, never thrown: the parse always runs to end of input.
//!
//! `SyntaxError` implements [`miette::Diagnostic`], so callers holding the source text can render it with context:
//!
//! ```rust
//! use miette::NamedSource;
//! use sable_syntax::parse_str;
//!
//! let source = "x = ";
//! let result = parse_str(source);
//! let err = result.errors[0].clone();
//! let report = miette::Report::new(err).with_source_code(NamedSource::new("demo.sbl", source.to_string()));
//! assert!(format!("{report:?}").contains("right-hand side"));
//! ```

use crate::lexer::Token;
use miette::{Diagnostic, LabeledSpan};
use std::fmt;
use thiserror::Error;

/// The kinds of syntax error the parser can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParsingErrors {
    #[error("Unreachable parser state")]
    UnreachableState,
    #[error("Parsing failed")]
    ParsingFailed,
    #[error("Incorrect token")]
    IncorrectToken,
    #[error("Operator has no right-hand side")]
    OperatorWithNoRhs,
    #[error("Invalid token sequence")]
    InvalidTokenSequence,
    #[error("Missing block")]
    MissingBlock,
    #[error("Missing comma")]
    MissingComma,
    #[error("Missing value")]
    MissingValue,
    #[error("Missing index or slice")]
    MissingIndexOrSlice,
    #[error("Missing right bracket")]
    MissingRightBracket,
    #[error("Missing right parenthesis")]
    MissingRightParen,
    #[error("Missing parameters")]
    MissingParams,
    #[error("Missing type")]
    MissingType,
    #[error("Missing return type")]
    MissingReturnType,
    #[error("Missing identifier")]
    MissingIdent,
    #[error("Missing condition")]
    MissingCond,
    #[error("Invalid assignment")]
    InvalidAssignment,
    #[error("Symbol already defined")]
    SymbolAlreadyDefined,
}

impl ParsingErrors {
    /// Stable snake_case code, used in diagnostic codes (`sable::syntax::<code>`).
    pub fn code(self) -> &'static str {
        match self {
            ParsingErrors::UnreachableState => "unreachable_state",
            ParsingErrors::ParsingFailed => "parsing_failed",
            ParsingErrors::IncorrectToken => "incorrect_token",
            ParsingErrors::OperatorWithNoRhs => "operator_with_no_rhs",
            ParsingErrors::InvalidTokenSequence => "invalid_token_sequence",
            ParsingErrors::MissingBlock => "missing_block",
            ParsingErrors::MissingComma => "missing_comma",
            ParsingErrors::MissingValue => "missing_value",
            ParsingErrors::MissingIndexOrSlice => "missing_index_or_slice",
            ParsingErrors::MissingRightBracket => "missing_right_bracket",
            ParsingErrors::MissingRightParen => "missing_right_paren",
            ParsingErrors::MissingParams => "missing_params",
            ParsingErrors::MissingType => "missing_type",
            ParsingErrors::MissingReturnType => "missing_return_type",
            ParsingErrors::MissingIdent => "missing_ident",
            ParsingErrors::MissingCond => "missing_cond",
            ParsingErrors::InvalidAssignment => "invalid_assignment",
            ParsingErrors::SymbolAlreadyDefined => "symbol_already_defined",
        }
    }
}

/// A syntax error attached to the token where it was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub token: Token,
    pub kind: ParsingErrors,
    pub reason: Option<String>,
}

impl SyntaxError {
    pub fn new(kind: ParsingErrors, token: Token) -> Self {
        Self {
            token,
            kind,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// 1-based line and column of the start of the offending token.
    ///
    /// The column counts UTF-16 code units, like the token span.
    pub fn line_column(&self) -> (usize, usize) {
        let start = self.token.span.start;
        (start.line as usize + 1, start.character as usize + 1)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{} {}", self.kind, reason),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for SyntaxError {}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("sable::syntax::{}", self.kind.code())))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new(
            Some(format!("found {}", self.token.describe())),
            self.token.offset,
            self.token.len,
        );
        Some(Box::new(std::iter::once(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{TokenKind, TokenValue};
    use crate::source::{Position, Span};

    fn ident_at(line: u32, character: u32) -> Token {
        Token::new(
            TokenKind::Ident,
            TokenValue::Text("foo".into()),
            Span::new(Position::new(line, character), Position::new(line, character + 3)),
            10,
            3,
            3,
        )
    }

    #[test]
    fn renders_message_then_reason() {
        let err = SyntaxError::new(ParsingErrors::MissingType, ident_at(0, 0));
        assert_eq!(err.to_string(), "Missing type");
        let err = err.with_reason("`foo` does not name a type");
        assert_eq!(err.to_string(), "Missing type `foo` does not name a type");
    }

    #[test]
    fn line_column_is_one_based() {
        let err = SyntaxError::new(ParsingErrors::IncorrectToken, ident_at(2, 4));
        assert_eq!(err.line_column(), (3, 5));
    }

    #[test]
    fn diagnostic_code_and_label() {
        let err = SyntaxError::new(ParsingErrors::SymbolAlreadyDefined, ident_at(0, 0));
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("sable::syntax::symbol_already_defined"));
        let labels: Vec<_> = err.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 10);
        assert_eq!(labels[0].len(), 3);
    }
}
