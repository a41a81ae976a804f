//! Semantic highlighting.
//!
//! Walks parsed nodes and emits one [`Highlight`] per classified token: identifiers by the role and type of the
//! symbol they bound to, keywords/operators/literals by token kind, and comments (including the ones attached to
//! nodes as leading/trailing trivia). The result is sorted by position, deduplicated, and never contains a
//! multi-line record: block comments are split per line, the way editors expect semantic tokens.
//!
//! ## Examples
//! ```rust
//! use sable_syntax::{HighlightKind, highlight, parse_str};
//!
//! let result = parse_str("Int32 x = 1; // one");
//! let kinds: Vec<_> = highlight(&result.nodes).into_iter().map(|h| h.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         HighlightKind::Type,
//!         HighlightKind::Variable,
//!         HighlightKind::Operator,
//!         HighlightKind::Number,
//!         HighlightKind::Comment,
//!     ]
//! );
//! ```

use crate::ast::{IdentRole, Node, NodeKind};
use crate::config::HighlightConfig;
use crate::lexer::{Token, TokenKind};
use crate::types::SymbolType;
use bitflags::bitflags;
use sable_core::lang::keywords::{self, KeywordId};

/// Highlight categories, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HighlightKind {
    Namespace,
    Type,
    Class,
    Enum,
    Parameter,
    Variable,
    Property,
    Function,
    Keyword,
    Modifier,
    Comment,
    String,
    Number,
    Operator,
}

impl HighlightKind {
    /// Every kind, in legend order.
    pub const ALL: [HighlightKind; 14] = [
        HighlightKind::Namespace,
        HighlightKind::Type,
        HighlightKind::Class,
        HighlightKind::Enum,
        HighlightKind::Parameter,
        HighlightKind::Variable,
        HighlightKind::Property,
        HighlightKind::Function,
        HighlightKind::Keyword,
        HighlightKind::Modifier,
        HighlightKind::Comment,
        HighlightKind::String,
        HighlightKind::Number,
        HighlightKind::Operator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HighlightKind::Namespace => "namespace",
            HighlightKind::Type => "type",
            HighlightKind::Class => "class",
            HighlightKind::Enum => "enum",
            HighlightKind::Parameter => "parameter",
            HighlightKind::Variable => "variable",
            HighlightKind::Property => "property",
            HighlightKind::Function => "function",
            HighlightKind::Keyword => "keyword",
            HighlightKind::Modifier => "modifier",
            HighlightKind::Comment => "comment",
            HighlightKind::String => "string",
            HighlightKind::Number => "number",
            HighlightKind::Operator => "operator",
        }
    }
}

bitflags! {
    /// Highlight modifier bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HighlightModifiers: u8 {
        const DECLARATION     = 1 << 0;
        const READONLY        = 1 << 1;
        const STATIC          = 1 << 2;
        const DEFAULT_LIBRARY = 1 << 3;
    }
}

impl HighlightModifiers {
    /// Legend names of the set bits, lowest bit first.
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "DECLARATION" => "declaration",
                "READONLY" => "readonly",
                "STATIC" => "static",
                _ => "defaultLibrary",
            })
            .collect()
    }
}

/// One highlighted range on a single line. `character` and `length` count UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Highlight {
    pub line: u32,
    pub character: u32,
    pub length: u32,
    pub kind: HighlightKind,
    pub modifiers: HighlightModifiers,
}

/// Highlight every node with the default configuration.
pub fn highlight(nodes: &[Node]) -> Vec<Highlight> {
    highlight_with(nodes, &HighlightConfig::default())
}

/// Highlight every node, keeping only the categories enabled in `config`.
#[tracing::instrument(skip_all, fields(nodes = nodes.len()))]
pub fn highlight_with(nodes: &[Node], config: &HighlightConfig) -> Vec<Highlight> {
    let mut collector = Collector::new(*config);
    for node in nodes {
        collector.node(node, HighlightModifiers::empty());
    }
    let out = collector.finish();
    tracing::debug!(highlights = out.len(), "highlighted");
    out
}

impl Node {
    /// Category of this node's own anchor token.
    ///
    /// Composite nodes whose anchor is just a child's first token (calls, dotted names, type references, blocks...)
    /// return `None` so the token is classified once, by the child.
    pub fn highlight_kind(&self) -> Option<HighlightKind> {
        match &self.kind {
            NodeKind::Ident(ident) => {
                let ty = ident.ty;
                Some(if ident.role == IdentRole::Enum {
                    HighlightKind::Enum
                } else if ty.is_type() {
                    if ty.contains(SymbolType::structure()) {
                        HighlightKind::Class
                    } else {
                        HighlightKind::Type
                    }
                } else if ty.is_function() {
                    HighlightKind::Function
                } else {
                    match ident.role {
                        IdentRole::Parameter => HighlightKind::Parameter,
                        IdentRole::Property => HighlightKind::Property,
                        IdentRole::Namespace => HighlightKind::Namespace,
                        IdentRole::Variable | IdentRole::Enum => HighlightKind::Variable,
                    }
                })
            }
            NodeKind::DottedIdent(_)
            | NodeKind::Call { .. }
            | NodeKind::Index { .. }
            | NodeKind::Slice { .. }
            | NodeKind::TypeDecl(_)
            | NodeKind::IdentDef { .. }
            | NodeKind::IfStatement(_)
            | NodeKind::Params(_)
            | NodeKind::Block { .. }
            | NodeKind::ImportIdent { .. }
            | NodeKind::List(_)
            | NodeKind::Dict(_)
            | NodeKind::ReturnType(_)
            | NodeKind::Invalid => None,
            _ => token_kind(&self.token),
        }
    }

    /// Modifiers carried by this node's own anchor token.
    pub fn highlight_modifiers(&self) -> HighlightModifiers {
        let mut mods = HighlightModifiers::empty();
        if let NodeKind::Ident(ident) = &self.kind {
            if ident.declaration {
                mods |= HighlightModifiers::DECLARATION;
            }
            if ident.builtin {
                mods |= HighlightModifiers::DEFAULT_LIBRARY;
            }
        }
        mods
    }

    /// Highlights for this node and its descendants.
    pub fn highlights(&self) -> Vec<Highlight> {
        let mut collector = Collector::new(HighlightConfig::default());
        collector.node(self, HighlightModifiers::empty());
        collector.finish()
    }
}

/// Category of a bare token, independent of any symbol.
pub fn token_kind(token: &Token) -> Option<HighlightKind> {
    match token.kind {
        TokenKind::Keyword(id) if keywords::is_storage(id) || keywords::is_visibility(id) => Some(HighlightKind::Modifier),
        TokenKind::Keyword(_) | TokenKind::Bool | TokenKind::Null => Some(HighlightKind::Keyword),
        TokenKind::Operator(_) => Some(HighlightKind::Operator),
        TokenKind::Int | TokenKind::Float => Some(HighlightKind::Number),
        TokenKind::Str | TokenKind::Char => Some(HighlightKind::String),
        TokenKind::LineComment | TokenKind::BlockComment => Some(HighlightKind::Comment),
        TokenKind::Ident => Some(HighlightKind::Variable),
        TokenKind::Invalid
        | TokenKind::Eof
        | TokenKind::Whitespace
        | TokenKind::Newline
        | TokenKind::Punctuation(_) => None,
    }
}

fn storage_modifiers(storage: Option<&Node>) -> HighlightModifiers {
    match storage.and_then(|s| s.token.keyword_id()) {
        Some(KeywordId::Const) => HighlightModifiers::READONLY,
        Some(KeywordId::Static) => HighlightModifiers::STATIC,
        _ => HighlightModifiers::empty(),
    }
}

struct Collector {
    config: HighlightConfig,
    out: Vec<Highlight>,
}

impl Collector {
    fn new(config: HighlightConfig) -> Self {
        Self {
            config,
            out: Vec::new(),
        }
    }

    fn node(&mut self, node: &Node, extra: HighlightModifiers) {
        for comment in &node.leading {
            self.token(comment, HighlightKind::Comment, HighlightModifiers::empty());
        }
        if let Some(kind) = node.highlight_kind() {
            self.token(&node.token, kind, node.highlight_modifiers() | extra);
        }
        for mark in &node.marks {
            if let Some(kind) = token_kind(mark) {
                self.token(mark, kind, HighlightModifiers::empty());
            }
        }
        match &node.kind {
            NodeKind::IdentDef { ty, name, default } => {
                let storage = match &ty.kind {
                    NodeKind::TypeDecl(decl) => decl.storage.as_deref(),
                    _ => None,
                };
                self.node(ty, HighlightModifiers::empty());
                self.node(name, storage_modifiers(storage));
                if let Some(default) = default {
                    self.node(default, HighlightModifiers::empty());
                }
            }
            NodeKind::FunctionDef(def) => {
                let mods = storage_modifiers(def.storage.as_ref());
                for child in node.children() {
                    let is_name = def.name.as_ref().is_some_and(|n| std::ptr::eq(n, child));
                    self.node(child, if is_name { mods } else { HighlightModifiers::empty() });
                }
            }
            _ => {
                for child in node.children() {
                    self.node(child, HighlightModifiers::empty());
                }
            }
        }
        for comment in &node.trailing {
            self.token(comment, HighlightKind::Comment, HighlightModifiers::empty());
        }
    }

    fn enabled(&self, kind: HighlightKind) -> bool {
        match kind {
            HighlightKind::Comment => self.config.comments,
            HighlightKind::Operator => self.config.operators,
            HighlightKind::Keyword | HighlightKind::Modifier => self.config.keywords,
            _ => true,
        }
    }

    fn token(&mut self, token: &Token, kind: HighlightKind, modifiers: HighlightModifiers) {
        if !self.enabled(kind) || token.utf16_len == 0 {
            return;
        }
        let start = token.span.start;
        if token.span.end.line == start.line {
            self.out.push(Highlight {
                line: start.line,
                character: start.character,
                length: token.utf16_len,
                kind,
                modifiers,
            });
            return;
        }
        let Some(text) = token.text() else {
            return;
        };
        for (i, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let length = line.encode_utf16().count() as u32;
            if length == 0 {
                continue;
            }
            self.out.push(Highlight {
                line: start.line + i as u32,
                character: if i == 0 { start.character } else { 0 },
                length,
                kind,
                modifiers,
            });
        }
    }

    fn finish(mut self) -> Vec<Highlight> {
        self.out.sort_by_key(|h| (h.line, h.character));
        self.out
            .dedup_by(|later, earlier| later.line == earlier.line && later.character == earlier.character);
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;

    fn kinds(source: &str) -> Vec<(u32, u32, HighlightKind)> {
        highlight(&parse_str(source).nodes)
            .into_iter()
            .map(|h| (h.line, h.character, h.kind))
            .collect()
    }

    #[test]
    fn test_function_definition_classification() {
        let got = kinds("function add(Int32 a) -> Int32 { return a; }");
        assert_eq!(
            got,
            vec![
                (0, 0, HighlightKind::Keyword),
                (0, 9, HighlightKind::Function),
                (0, 13, HighlightKind::Type),
                (0, 19, HighlightKind::Parameter),
                (0, 25, HighlightKind::Type),
                (0, 33, HighlightKind::Keyword),
                (0, 40, HighlightKind::Parameter),
            ]
        );
    }

    #[test]
    fn test_class_members_are_properties() {
        let hl = highlight(&parse_str("class Foo { Int32 x; }").nodes);
        let name = hl.iter().find(|h| h.character == 6).unwrap();
        assert_eq!(name.kind, HighlightKind::Class);
        assert!(name.modifiers.contains(HighlightModifiers::DECLARATION));
        let field = hl.iter().find(|h| h.character == 18).unwrap();
        assert_eq!(field.kind, HighlightKind::Property);
    }

    #[test]
    fn test_enum_name() {
        let got = kinds("enum Color { Int32 red; }");
        assert_eq!(got[1], (0, 5, HighlightKind::Enum));
    }

    #[test]
    fn test_builtin_types_carry_default_library() {
        let hl = highlight(&parse_str("Int32 x;").nodes);
        assert_eq!(hl[0].kind, HighlightKind::Type);
        assert!(hl[0].modifiers.contains(HighlightModifiers::DEFAULT_LIBRARY));
        assert!(hl[1].modifiers.contains(HighlightModifiers::DECLARATION));
    }

    #[test]
    fn test_storage_modifiers_reach_declared_name() {
        let hl = highlight(&parse_str("const Int32 x = 1;").nodes);
        assert_eq!(hl[0].kind, HighlightKind::Modifier);
        let name = hl.iter().find(|h| h.character == 12).unwrap();
        assert!(name.modifiers.contains(HighlightModifiers::READONLY));
    }

    #[test]
    fn test_block_comment_split_per_line() {
        let hl = highlight(&parse_str("/* one\ntwo */\nInt32 x;").nodes);
        let comments: Vec<_> = hl.iter().filter(|h| h.kind == HighlightKind::Comment).collect();
        assert_eq!(comments.len(), 2);
        assert_eq!((comments[0].line, comments[0].character, comments[0].length), (0, 0, 6));
        assert_eq!((comments[1].line, comments[1].character, comments[1].length), (1, 0, 6));
    }

    #[test]
    fn test_config_filters_categories() {
        let nodes = parse_str("Int32 x = 1 + 2; // c").nodes;
        let config = HighlightConfig::new().comments(false).operators(false);
        let hl = highlight_with(&nodes, &config);
        assert!(
            hl.iter()
                .all(|h| h.kind != HighlightKind::Comment && h.kind != HighlightKind::Operator)
        );
        assert_eq!(hl.len(), 4);
    }

    #[test]
    fn test_node_highlights_match_collection() {
        let nodes = parse_str("Int32 x = 1;").nodes;
        assert_eq!(nodes[0].highlights(), highlight(&nodes));
    }

    #[test]
    fn test_modifier_names() {
        let mods = HighlightModifiers::DECLARATION | HighlightModifiers::DEFAULT_LIBRARY;
        assert_eq!(mods.names(), vec!["declaration", "defaultLibrary"]);
        assert_eq!(HighlightKind::ALL.len(), 14);
        assert_eq!(HighlightKind::Namespace.as_str(), "namespace");
    }
}
