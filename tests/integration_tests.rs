//! Integration tests for the Sable front end

use std::fs;
use std::path::{Path, PathBuf};

use sable::{HighlightKind, ParseResult, ParsingErrors, highlight, parse_str};

fn fixtures(kind: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(kind);
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == "sbl"))
        .collect();
    paths.sort();
    paths
}

fn parse_file(path: &Path) -> ParseResult {
    let source = fs::read_to_string(path).unwrap();
    parse_str(&source)
}

/// Test that all valid fixtures parse without syntax errors
#[test]
fn test_valid_fixtures() {
    let paths = fixtures("valid");
    assert!(!paths.is_empty(), "no valid fixtures found");
    for path in paths {
        let result = parse_file(&path);
        assert!(
            result.is_ok(),
            "Expected {} to parse cleanly, got errors: {:?}",
            path.display(),
            result.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>()
        );
        assert!(result.nodes.iter().all(|node| node.is_valid()), "{}", path.display());
    }
}

/// Test that invalid fixtures produce errors
#[test]
fn test_invalid_fixtures() {
    let paths = fixtures("invalid");
    assert!(!paths.is_empty(), "no invalid fixtures found");
    for path in paths {
        let result = parse_file(&path);
        assert!(!result.is_ok(), "Expected {} to report syntax errors", path.display());
    }
}

#[test]
fn test_invalid_fixture_error_kinds() {
    let expected = [
        ("bad_assignment.sbl", ParsingErrors::InvalidAssignment),
        ("invalid_token.sbl", ParsingErrors::InvalidTokenSequence),
        ("missing_params.sbl", ParsingErrors::MissingParams),
        ("missing_rhs.sbl", ParsingErrors::OperatorWithNoRhs),
        ("redeclared.sbl", ParsingErrors::SymbolAlreadyDefined),
        ("unclosed_block.sbl", ParsingErrors::MissingBlock),
        ("unknown_type.sbl", ParsingErrors::MissingType),
    ];
    for (name, kind) in expected {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/invalid").join(name);
        let result = parse_file(&path);
        assert_eq!(result.errors.first().map(|e| e.kind), Some(kind), "{name}");
    }
}

/// Highlights of every fixture are non-empty, in source order and disjoint.
#[test]
fn test_fixture_highlights_are_well_formed() {
    for path in fixtures("valid").into_iter().chain(fixtures("invalid")) {
        let records = highlight(&parse_file(&path).nodes);
        for pair in records.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            assert!(
                (prev.line, prev.character) < (next.line, next.character),
                "{}: {:?} then {:?}",
                path.display(),
                prev,
                next
            );
            if prev.line == next.line {
                assert!(
                    prev.character + prev.length <= next.character,
                    "{}: {:?} overlaps {:?}",
                    path.display(),
                    prev,
                    next
                );
            }
        }
        assert!(records.iter().all(|h| h.length > 0), "{}", path.display());
    }
}

#[test]
fn test_multiline_block_comment_is_split() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/valid/classes.sbl");
    let records = highlight(&parse_file(&path).nodes);
    let comments: Vec<_> = records.iter().filter(|h| h.kind == HighlightKind::Comment).collect();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].line, comments[0].line + 1);
    assert_eq!(comments[1].character, 0);
}

mod lexer_tests {
    use sable::lexer::{Lexer, TokenKind, lex};
    use sable::lang::keywords::KeywordId;
    use sable::lang::operators::OperatorId;

    #[test]
    fn test_keywords_and_word_operators() {
        let kinds: Vec<_> = lex("function f() { return a and not b; }")
            .into_iter()
            .filter(|t| !t.is_trivia())
            .map(|t| t.kind)
            .collect();
        assert_eq!(kinds[0], TokenKind::Keyword(KeywordId::Function));
        assert!(kinds.contains(&TokenKind::Keyword(KeywordId::Return)));
        assert!(kinds.iter().any(|k| matches!(k, TokenKind::Operator(_))));
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        while !lexer.next_token().is_eof() {}
        for _ in 0..3 {
            assert!(lexer.next_token().is_eof());
        }
    }

    #[test]
    fn test_split_angle_closes_nested_generics() {
        let mut lexer = Lexer::new(">>x");
        assert_eq!(lexer.next_token().kind, TokenKind::Operator(OperatorId::Shr));
        assert!(lexer.split_angle());
        assert_eq!(lexer.token().kind, TokenKind::Operator(OperatorId::Gt));
        assert_eq!(lexer.next_token().kind, TokenKind::Operator(OperatorId::Gt));
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    }
}

mod resolver_tests {
    use sable::parse_str;
    use sable::resolver::resolve;
    use sable::types::{SymbolType, Width};

    #[test]
    fn test_resolves_through_declared_symbols() {
        let result = parse_str("Float32 f = 1.5f; f + 1");
        let ty = resolve(result.nodes.last().unwrap(), &result.symbols);
        assert_eq!(ty, SymbolType::float(Width::W32));
        assert_eq!(ty.to_string(), "Float32");
        assert!(!ty.is_type());
    }

    #[test]
    fn test_unknown_call_resolves_to_unknown() {
        let result = parse_str("Int32 n = 0; n(1)");
        let ty = resolve(result.nodes.last().unwrap(), &result.symbols);
        assert!(ty.is_unknown());
    }
}

mod cli_tests {
    use sable::cli::commands::{render_ast, render_highlights};
    use sable::parse_str;

    #[test]
    fn test_parse_and_highlight_rendering_agree_on_nodes() {
        let result = parse_str("import a.b;\nInt32 x = 1;");
        let ast = render_ast(&result);
        assert_eq!(ast.lines().count(), 2);
        let highlights = render_highlights(&sable::highlight(&result.nodes));
        assert!(highlights.starts_with("1:1 6 keyword"), "{highlights}");
        assert!(highlights.contains("1:8 1 namespace"), "{highlights}");
    }
}
