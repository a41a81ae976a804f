#![forbid(unsafe_code)]
//! Sable Programming Language Front End
//!
//! Sable is a small statically typed language with C-family syntax. This crate is the facade over the workspace:
//! the vocabulary registries (`sable_core`), the syntax front end (`sable_syntax`: lexer, parser, symbols, type
//! resolver, diagnostics, highlighting) and the `sable` command-line tool.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **Parser**: never panics on user input. Syntax errors are values collected in [`ParseResult::errors`].
//!
//! ## Examples
//! ```rust
//! use sable::{HighlightKind, highlight, parse_str};
//!
//! let result = parse_str("class Point { Int32 x; }");
//! assert!(result.is_ok());
//! let kinds: Vec<_> = highlight(&result.nodes).iter().map(|h| h.kind).collect();
//! assert!(kinds.contains(&HighlightKind::Class));
//! assert!(kinds.contains(&HighlightKind::Property));
//! ```

pub mod cli;

pub use sable_core::lang;
pub use sable_syntax::{ast, config, diagnostics, lexer, parser, resolver, source, symbols, types};

pub use sable_syntax::{
    Highlight, HighlightConfig, HighlightKind, HighlightModifiers, ParseConfig, ParseResult, ParsingErrors, Position,
    SourceText, Span, SyntaxError, TextBuffer, highlight, highlight_with, parse, parse_str, parse_with,
};
