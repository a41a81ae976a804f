//! Sable language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators,
//! punctuation, and builtin type names.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer/parser/highlighter.
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings/metadata via
//! registry tables.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics,
//!   highlighting, docs).
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::operators::{self, OperatorClass, OperatorId};
//!
//! assert_eq!(operators::from_str("<<="), Some(OperatorId::ShlEq));
//! assert_eq!(operators::class(OperatorId::Lt), OperatorClass::Relational);
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod types;
