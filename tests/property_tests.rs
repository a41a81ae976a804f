//! Property-based tests for the Sable front end
//!
//! These tests use proptest to check invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use sable::lexer::{Lexer, lex};
use sable::types::{SymbolType, Width};
use sable::{highlight, parse_str};

/// Source-like input: identifiers, keywords, literals and punctuation glued together at random.
fn sable_soup() -> impl Strategy<Value = String> {
    let atoms = prop::sample::select(vec![
        "Int32", "auto", "x", "y", "class", "enum", "function", "template", "return", "if", "elif", "else", "for",
        "while", "do", "import", "from", "as", "new", "delete", "const", "static", "public", ":", ";", ",", ".", "(",
        ")", "{", "}", "[", "]", "<", ">", ">>", "=", "+", "-", "*", "&", "...", "->", "1", "2.5f", "\"s\"", "'c'",
        "// note\n", "/* a\nb */", "\n", " ",
    ]);
    prop::collection::vec(atoms, 0..48).prop_map(|parts| parts.join(" "))
}

/// Types assembled from the named constructors, including the bare type-of-type and pack bits.
fn any_type() -> impl Strategy<Value = SymbolType> {
    let parts = prop::sample::select(vec![
        SymbolType::int(Width::W8, false),
        SymbolType::int(Width::W32, true),
        SymbolType::float(Width::W64),
        SymbolType::bool(),
        SymbolType::string(),
        SymbolType::dict(),
        SymbolType::set(),
        SymbolType::structure(),
        SymbolType::function(),
        SymbolType::reference(),
        SymbolType::pointer(),
        SymbolType::pack(),
        SymbolType::auto(),
        SymbolType::none(),
        SymbolType::template(),
        SymbolType::meta(),
    ]);
    prop::collection::vec(parts, 0..5)
        .prop_map(|parts| parts.into_iter().fold(SymbolType::UNKNOWN, SymbolType::append))
}

// =============================================================================
// Lexer Properties
// =============================================================================

mod lexer_props {
    use super::*;

    proptest! {
        /// Property: token byte ranges tile the input with no gaps, ending in a zero-width Eof
        #[test]
        fn tokens_are_contiguous(source in "[ -~\n]{0,64}") {
            let tokens = lex(&source);
            let mut offset = 0;
            for token in &tokens {
                prop_assert_eq!(token.offset, offset);
                offset += token.len;
            }
            let last = tokens.last().unwrap();
            prop_assert!(last.is_eof());
            prop_assert_eq!(last.offset, source.len());
        }

        /// Property: once the lexer reports Eof it keeps reporting Eof
        #[test]
        fn eof_is_sticky(source in "[ -~\n]{0,32}") {
            let mut lexer = Lexer::new(&source);
            let mut guard = 0;
            while !lexer.next_token().is_eof() {
                guard += 1;
                prop_assert!(guard <= source.len() + 1, "lexer did not terminate");
            }
            prop_assert!(lexer.next_token().is_eof());
            prop_assert!(lexer.next_token().is_eof());
        }
    }
}

// =============================================================================
// Parser and Highlighter Properties
// =============================================================================

mod parser_props {
    use super::*;

    proptest! {
        /// Property: the parser never panics, whatever the input
        #[test]
        fn parse_never_panics(source in "\\PC{0,80}") {
            let _ = parse_str(&source);
        }

        /// Property: malformed programs built from real vocabulary still parse to completion
        #[test]
        fn parse_vocabulary_soup(source in sable_soup()) {
            let result = parse_str(&source);
            prop_assert!(result.nodes.len() <= source.len() + 1);
        }

        /// Property: highlights are non-empty, sorted by position and never overlap on a line
        #[test]
        fn highlights_are_ordered(source in sable_soup()) {
            let records = highlight(&parse_str(&source).nodes);
            for h in &records {
                prop_assert!(h.length > 0);
            }
            for pair in records.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                prop_assert!((prev.line, prev.character) < (next.line, next.character));
                if prev.line == next.line {
                    prop_assert!(prev.character + prev.length <= next.character, "{:?} overlaps {:?}", prev, next);
                }
            }
        }
    }
}

// =============================================================================
// Type Properties
// =============================================================================

mod type_props {
    use super::*;

    proptest! {
        /// Property: decaying a declared type to a value type
        ///
        /// A bare type-of-type gains `auto`; everything else loses both the type and pack bits.
        #[test]
        fn for_value_decay(ty in any_type()) {
            let value = ty.for_value();
            if ty.without(SymbolType::pack()) == SymbolType::meta() {
                prop_assert_eq!(value, SymbolType::meta().append(SymbolType::auto()));
            } else {
                prop_assert!(!value.is_type());
                prop_assert!(!value.contains(SymbolType::pack()));
                if !value.is_unknown() {
                    prop_assert_eq!(value.as_type().for_value(), value);
                }
            }
        }
    }
}
