//! Provide the canonical language vocabulary for the Sable front end.
//!
//! This crate is intentionally small and dependency-free. It holds the registries that the lexer,
//! parser, highlighter and tooling agree on: reserved keywords, operators, punctuation and the builtin
//! type names seeded into the global scope.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no syntax-tree types.
//! - Syntax rules live in `sable_syntax`; registries only provide spellings and metadata.
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("function"), Some(KeywordId::Function));
//! assert_eq!(keywords::as_str(KeywordId::Elif), "elif");
//! ```

pub mod lang;
