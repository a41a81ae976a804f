//! Define the reserved keyword vocabulary for the Sable language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a
//! const metadata table ([`KEYWORDS`]) that records canonical spellings, aliases and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Literal words (`true`, `false`, `nullptr`) are reserved here, but the lexer turns them into literal tokens.
//! - Word operators (`and`, `or`, `not`) are *not* keywords; see [`crate::lang::operators`].
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("template"), Some(KeywordId::Template));
//! assert_eq!(keywords::info_for(KeywordId::Static).category, KeywordCategory::Storage);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    Return,
    If,
    Elif,
    Else,
    For,
    While,
    Do,

    // Storage and location specifiers
    Static,
    Const,
    Extern,
    Local,
    Global,

    // Memory
    New,
    Delete,

    // Imports
    From,
    Import,
    As,

    // Types / definitions
    None,
    Class,
    Enum,
    Function,
    Operator,
    Template,

    // Visibility
    Public,
    Private,
    Protected,

    // Literal words
    True,
    False,
    Nullptr,
}

/// High-level grouping for documentation, tooling and highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Storage,
    Memory,
    Import,
    Definition,
    Visibility,
    Type,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: KeywordCategory,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Elif, "elif", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow),
    // Storage / location
    info(KeywordId::Static, "static", KeywordCategory::Storage),
    info(KeywordId::Const, "const", KeywordCategory::Storage),
    info(KeywordId::Extern, "extern", KeywordCategory::Storage),
    info(KeywordId::Local, "local", KeywordCategory::Storage),
    info(KeywordId::Global, "global", KeywordCategory::Storage),
    // Memory
    info(KeywordId::New, "new", KeywordCategory::Memory),
    info(KeywordId::Delete, "delete", KeywordCategory::Memory),
    // Imports
    info(KeywordId::From, "from", KeywordCategory::Import),
    info(KeywordId::Import, "import", KeywordCategory::Import),
    info(KeywordId::As, "as", KeywordCategory::Import),
    // Types / definitions
    info(KeywordId::None, "none", KeywordCategory::Type),
    info(KeywordId::Class, "class", KeywordCategory::Definition),
    info(KeywordId::Enum, "enum", KeywordCategory::Definition),
    info_with_aliases(KeywordId::Function, "function", &["fn"], KeywordCategory::Definition),
    info(KeywordId::Operator, "operator", KeywordCategory::Definition),
    info(KeywordId::Template, "template", KeywordCategory::Definition),
    // Visibility
    info(KeywordId::Public, "public", KeywordCategory::Visibility),
    info(KeywordId::Private, "private", KeywordCategory::Visibility),
    info(KeywordId::Protected, "protected", KeywordCategory::Visibility),
    // Literal words
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Nullptr, "nullptr", KeywordCategory::Literal),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the accepted aliases for a keyword.
pub fn aliases(id: KeywordId) -> &'static [&'static str] {
    info_for(id).aliases
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling (canonical or alias).
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    if let Some(k) = KEYWORDS.iter().find(|k| k.canonical == s) {
        return Some(k.id);
    }
    KEYWORDS
        .iter()
        .find(|k| {
            let aliases: &[&str] = k.aliases;
            aliases.contains(&s)
        })
        .map(|k| k.id)
}

/// Return `true` if the keyword is a storage or location specifier (`static`, `const`, ...).
pub fn is_storage(id: KeywordId) -> bool {
    info_for(id).category == KeywordCategory::Storage
}

/// Return `true` if the keyword is a visibility modifier.
pub fn is_visibility(id: KeywordId) -> bool {
    info_for(id).category == KeywordCategory::Visibility
}

/// Return `true` if the keyword spells a builtin type (`none`) and so may stand where a type name does.
pub fn is_type_name(id: KeywordId) -> bool {
    info_for(id).category == KeywordCategory::Type
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        aliases: &[],
        category,
    }
}

const fn info_with_aliases(
    id: KeywordId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    category: KeywordCategory,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        aliases,
        category,
    }
}
