//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Each command is split into a file-reading shell and a pure `render_*` function, so the output formats can be
//! tested without touching the filesystem.

use std::fs;

use miette::NamedSource;
use sable_syntax::lexer::{self, Token};
use sable_syntax::{Highlight, HighlightConfig, ParseConfig, ParseResult, SourceText, SyntaxError};
use serde_json::{Value, json};
use tracing::debug;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file, rejecting files over [`MAX_SOURCE_SIZE`].
///
/// ## Errors
/// - The file cannot be accessed or read
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    debug!(file = file_path, bytes = metadata.len(), "reading source");
    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn parse_source(source: &str, config: ParseConfig) -> ParseResult {
    let result = sable_syntax::parse_with(&SourceText::new(source), config);
    debug!(nodes = result.nodes.len(), errors = result.errors.len(), "parsed");
    result
}

// ============================================================================
// Commands
// ============================================================================

/// Print the token stream.
pub fn lex_file(file_path: &str, trivia: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    print!("{}", render_tokens(&lexer::lex(&source), trivia));
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the AST.
pub fn parse_file(file_path: &str, config: ParseConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let result = parse_source(&source, config);
    print!("{}", render_ast(&result));
    fail_on_errors(file_path, &source, &result.errors)
}

/// Report syntax errors.
pub fn check_file(file_path: &str, config: ParseConfig, json: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let result = parse_source(&source, config);
    if json {
        println!("{}", to_json(&diagnostics_json(file_path, &result.errors))?);
        return Ok(if result.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }
    fail_on_errors(file_path, &source, &result.errors)?;
    println!("✓ No syntax errors in {}", file_path);
    Ok(ExitCode::SUCCESS)
}

/// Print highlight records. Syntax errors do not fail the command; highlighting is best effort.
pub fn highlight_file(
    file_path: &str,
    config: ParseConfig,
    highlight: &HighlightConfig,
    json: bool,
) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let result = parse_source(&source, config);
    let records = sable_syntax::highlight_with(&result.nodes, highlight);
    if json {
        println!("{}", to_json(&highlights_json(&records))?);
    } else {
        print!("{}", render_highlights(&records));
    }
    Ok(ExitCode::SUCCESS)
}

fn fail_on_errors(file_path: &str, source: &str, errors: &[SyntaxError]) -> CliResult<ExitCode> {
    if errors.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    Err(CliError::failure(render_diagnostics(file_path, source, errors).trim_end()))
}

// ============================================================================
// Rendering
// ============================================================================

/// One token per line: `line:col kind spelling`.
pub fn render_tokens(tokens: &[Token], trivia: bool) -> String {
    let mut out = String::new();
    for token in tokens.iter().filter(|t| trivia || !t.is_trivia()) {
        out.push_str(&format!("{} {:?} {}\n", token.span.start, token.kind, token.describe()));
    }
    out
}

/// One S-expression per top-level node.
pub fn render_ast(result: &ParseResult) -> String {
    let mut out = String::new();
    for node in &result.nodes {
        out.push_str(&node.to_string());
        out.push('\n');
    }
    out
}

/// Every error as a miette report with the source snippet.
pub fn render_diagnostics(file_path: &str, source: &str, errors: &[SyntaxError]) -> String {
    let mut out = String::new();
    for err in errors {
        let report = miette::Report::new(err.clone()).with_source_code(NamedSource::new(file_path, source.to_string()));
        out.push_str(&format!("{:?}\n", report));
    }
    out
}

/// One record per line: `line:character length kind [modifiers]`, 1-based like the rest of the CLI output.
pub fn render_highlights(records: &[Highlight]) -> String {
    let mut out = String::new();
    for h in records {
        out.push_str(&format!("{}:{} {} {}", h.line + 1, h.character + 1, h.length, h.kind.as_str()));
        let modifiers = h.modifiers.names();
        if !modifiers.is_empty() {
            out.push_str(&format!(" [{}]", modifiers.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// Highlight records as JSON, with 0-based positions like editor semantic tokens.
pub fn highlights_json(records: &[Highlight]) -> Value {
    Value::Array(
        records
            .iter()
            .map(|h| {
                json!({
                    "line": h.line,
                    "character": h.character,
                    "length": h.length,
                    "kind": h.kind.as_str(),
                    "modifiers": h.modifiers.names(),
                })
            })
            .collect(),
    )
}

/// Syntax errors as JSON.
pub fn diagnostics_json(file_path: &str, errors: &[SyntaxError]) -> Value {
    Value::Array(
        errors
            .iter()
            .map(|err| {
                let (line, column) = err.line_column();
                json!({
                    "file": file_path,
                    "line": line,
                    "column": column,
                    "code": err.kind.code(),
                    "message": err.to_string(),
                })
            })
            .collect(),
    )
}

fn to_json(value: &Value) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::failure(format!("Error serializing output: {}", e)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sable_syntax::{highlight, parse_str};

    #[test]
    fn test_render_tokens_skips_trivia_by_default() {
        let tokens = lexer::lex("x = 1 // c");
        let plain = render_tokens(&tokens, false);
        assert_eq!(plain.lines().count(), 4, "{plain}");
        assert!(plain.lines().next().unwrap().starts_with("1:1 Ident x"));
        let all = render_tokens(&tokens, true);
        assert!(all.contains("LineComment"));
    }

    #[test]
    fn test_render_ast() {
        let result = parse_str("Int32 x = 1;\nx++;");
        assert_eq!(
            render_ast(&result),
            "(assign (ident-def (type (ident Int32)) (ident x)) = (int 1))\n(post-incdec (ident x) ++)\n"
        );
    }

    #[test]
    fn test_render_diagnostics_includes_message() {
        let source = "x = ";
        let result = parse_str(source);
        let rendered = render_diagnostics("demo.sbl", source, &result.errors);
        assert!(rendered.contains("right-hand side"), "{rendered}");
    }

    #[test]
    fn test_highlights_json_shape() {
        let result = parse_str("Int32 x;");
        let value = highlights_json(&highlight(&result.nodes));
        let first = &value[0];
        assert_eq!(first["line"], 0);
        assert_eq!(first["character"], 0);
        assert_eq!(first["length"], 5);
        assert_eq!(first["kind"], "type");
        assert_eq!(first["modifiers"], json!(["defaultLibrary"]));
        assert_eq!(value[1]["modifiers"], json!(["declaration"]));
    }

    #[test]
    fn test_render_highlights_is_one_based() {
        let result = parse_str("Int32 x;");
        let rendered = render_highlights(&highlight(&result.nodes));
        assert_eq!(rendered, "1:1 5 type [defaultLibrary]\n1:7 1 variable [declaration]\n");
    }

    #[test]
    fn test_diagnostics_json() {
        let result = parse_str("class A { } class A { }");
        let value = diagnostics_json("a.sbl", &result.errors);
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["line"], 1);
        assert_eq!(value[0]["column"], 19);
        assert_eq!(value[0]["code"], result.errors[0].kind.code());
    }

    #[test]
    fn test_missing_file_is_cli_error() {
        let err = read_source("definitely/not/here.sbl").unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("Cannot access file"));
    }
}
