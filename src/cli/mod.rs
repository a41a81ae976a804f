//! CLI module for the Sable front end
//!
//! This module provides the command-line interface over the syntax front end.
//!
//! ## Commands
//!
//! - `lex <file>` - Print the token stream
//! - `parse <file>` - Print the AST as S-expressions
//! - `check <file>` - Report syntax errors
//! - `highlight <file>` - Print semantic highlight records
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use sable_syntax::{HighlightConfig, ParseConfig};
use thiserror::Error;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Sable language front end
#[derive(Parser, Debug)]
#[command(name = "sable")]
#[command(version = VERSION)]
#[command(about = "Lex, parse, check and highlight Sable source files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream
    Lex {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Include whitespace, newline and comment tokens
        #[arg(long)]
        trivia: bool,
    },

    /// Print the parsed AST, one S-expression per top-level node
    Parse {
        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Report syntax errors (exit code 1 when any are found)
    Check {
        #[command(flatten)]
        parse: ParseArgs,
        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print semantic highlight records
    Highlight {
        #[command(flatten)]
        parse: ParseArgs,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
        /// Omit operator records
        #[arg(long)]
        no_operators: bool,
        /// Omit keyword and modifier records
        #[arg(long)]
        no_keywords: bool,
    },
}

/// Options shared by every command that parses.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Source file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Keep comments as standalone nodes (and omit them from highlighting)
    #[arg(long)]
    pub no_comments: bool,
    /// Never read `<` after a type name as a generic argument list
    #[arg(long)]
    pub no_generics: bool,
    /// Stop recording syntax errors after N
    #[arg(long, value_name = "N")]
    pub max_errors: Option<usize>,
}

impl ParseArgs {
    pub fn config(&self) -> ParseConfig {
        let mut config = ParseConfig::new()
            .attach_comments(!self.no_comments)
            .speculate_generics(!self.no_generics);
        if let Some(max) = self.max_errors {
            config = config.max_errors(max);
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Lex { file, trivia } => commands::lex_file(&file.to_string_lossy(), trivia),
        Command::Parse { parse } => commands::parse_file(&parse.file.to_string_lossy(), parse.config()),
        Command::Check { parse, json } => commands::check_file(&parse.file.to_string_lossy(), parse.config(), json),
        Command::Highlight {
            parse,
            json,
            no_operators,
            no_keywords,
        } => {
            let highlight = HighlightConfig::new()
                .comments(!parse.no_comments)
                .operators(!no_operators)
                .keywords(!no_keywords);
            commands::highlight_file(&parse.file.to_string_lossy(), parse.config(), &highlight, json)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_lex() {
        let cli = Cli::try_parse_from(["sable", "lex", "main.sbl", "--trivia"]).unwrap();
        if let Command::Lex { file, trivia } = cli.command {
            assert_eq!(file, PathBuf::from("main.sbl"));
            assert!(trivia);
        } else {
            panic!("Expected Lex command");
        }
    }

    #[test]
    fn test_cli_parse_flags_map_onto_config() {
        let cli = Cli::try_parse_from(["sable", "parse", "main.sbl", "--no-generics", "--max-errors", "3"]).unwrap();
        let Command::Parse { parse } = cli.command else {
            panic!("Expected Parse command");
        };
        let config = parse.config();
        assert!(!config.speculate_generics);
        assert!(config.attach_comments);
        assert_eq!(config.max_errors, Some(3));
    }

    #[test]
    fn test_cli_parse_check_json() {
        let cli = Cli::try_parse_from(["sable", "check", "--json", "main.sbl"]).unwrap();
        assert!(matches!(cli.command, Command::Check { json: true, .. }));
    }

    #[test]
    fn test_cli_parse_highlight() {
        let cli = Cli::try_parse_from(["sable", "highlight", "main.sbl", "--no-comments", "--no-operators"]).unwrap();
        if let Command::Highlight {
            parse,
            json,
            no_operators,
            no_keywords,
        } = cli.command
        {
            assert!(parse.no_comments);
            assert!(!parse.config().attach_comments);
            assert!(!json);
            assert!(no_operators);
            assert!(!no_keywords);
        } else {
            panic!("Expected Highlight command");
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["sable"]).is_err());
    }
}
