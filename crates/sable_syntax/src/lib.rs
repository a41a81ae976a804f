//! Syntax front end for the Sable language: lexer, parser, symbols, AST, diagnostics and highlighting.
//!
//! The crate is a pure function of its input: [`parse`] turns a text buffer into top-level AST nodes, the syntax
//! errors met along the way and the symbol table populated by declarations; [`highlight`] walks those nodes and
//! yields editor highlight records.
//!
//! ## Notes
//! - Parsing is error tolerant. A syntax error is recorded and the parser keeps going until end of input.
//! - Vocabulary identity (keywords/operators/punctuation/builtin types) comes from `sable_core::lang` registries.
//! - Type information is limited to what declarations and the [`resolver`] can infer; there is no type checker.
//!
//! ## Examples
//! ```rust
//! use sable_syntax::{highlight, parse_str};
//!
//! let result = parse_str("function add(Int32 a, Int32 b) -> Int32 { return a + b; }");
//! assert!(result.errors.is_empty());
//! assert_eq!(result.nodes.len(), 1);
//! assert!(!highlight(&result.nodes).is_empty());
//! ```
//!
//! ## See also
//! - `sable_core::lang` for registry-backed language vocabulary.

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod highlight;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod source;
pub mod symbols;
pub mod token_helpers;
pub mod types;

pub use config::{HighlightConfig, ParseConfig};
pub use diagnostics::{ParsingErrors, SyntaxError};
pub use highlight::{Highlight, HighlightKind, HighlightModifiers, highlight, highlight_with};
pub use parser::{ParseResult, parse, parse_str, parse_with};
pub use source::{Position, SourceText, Span, TextBuffer};
