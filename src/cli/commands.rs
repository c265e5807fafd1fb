//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Each command has a pure `*_output` counterpart that returns the text it would print, so the
//! output format is testable without touching the filesystem.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use cand_core::lang::directives;
use cand_syntax::ast::TokenRange;
use cand_syntax::config::ParseConfig;
use cand_syntax::diagnostics::ParseError;
use cand_syntax::parser::{self, StatementKind};
use cand_syntax::token_helpers::{content_range, join_literals};
use cand_syntax::{lexer, parenthesizer, scope};
use miette::{Diagnostic, NamedSource, Report};
use thiserror::Error;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// while tokenizing.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Errors reading a source file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Cannot access file '{path}': {source}")]
    Access { path: String, source: std::io::Error },

    #[error("Source file '{path}' is too large ({size} bytes, max {max} bytes)")]
    TooLarge { path: String, size: u64, max: u64 },

    #[error("Error reading file '{path}': {source}")]
    Read { path: String, source: std::io::Error },
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        CliError::failure(err.to_string())
    }
}

/// Read a source file with size validation.
///
/// ## Errors
/// - The file cannot be accessed or read
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    let display = path.display().to_string();
    let metadata = fs::metadata(path).map_err(|source| SourceError::Access {
        path: display.clone(),
        source,
    })?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(SourceError::TooLarge {
            path: display,
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }
    fs::read_to_string(path).map_err(|source| SourceError::Read { path: display, source })
}

/// Render a diagnostic against its source with miette's report handler.
fn diagnostic_error<E>(name: &str, source: &str, err: E) -> CliError
where
    E: Diagnostic + Send + Sync + 'static,
{
    let report = Report::new(err).with_source_code(NamedSource::new(name, source.to_string()));
    CliError::failure(format!("{report:?}"))
}

/// Run `output` over a file's contents and print the result.
fn run_on_file(path: &Path, output: impl FnOnce(&str) -> Result<String, ParseError>) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let name = path.display().to_string();
    let text = output(&source).map_err(|e| diagnostic_error(&name, &source, e))?;
    print!("{text}");
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Commands
// ============================================================================

/// Tokenize and display tokens.
pub fn lex_file(path: &Path) -> CliResult<ExitCode> {
    run_on_file(path, lex_output)
}

/// Parse every value statement and display its s-expression.
pub fn parse_file(path: &Path, config: &ParseConfig) -> CliResult<ExitCode> {
    run_on_file(path, |source| parse_output(source, config))
}

/// Display the parenthesized form of every value statement.
pub fn parenthesize_file(path: &Path, config: &ParseConfig) -> CliResult<ExitCode> {
    run_on_file(path, |source| parenthesize_output(source, config))
}

/// Display statement boundaries and bracket scopes.
pub fn scopes_file(path: &Path) -> CliResult<ExitCode> {
    run_on_file(path, scopes_output)
}

/// Parse an inline expression and display its s-expression.
pub fn expr_code(code: &str, config: &ParseConfig) -> CliResult<ExitCode> {
    if code.trim().is_empty() {
        return Err(CliError::failure("Error: expr requires an expression string"));
    }
    let text = expr_output(code, config).map_err(|e| diagnostic_error("<expr>", code, e))?;
    print!("{text}");
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Output builders
// ============================================================================

/// One `line:col kind "literal"` line per token, `eof` included.
pub fn lex_output(source: &str) -> Result<String, ParseError> {
    let tokens = lexer::lex(source)?;
    let mut out = String::new();
    for tok in &tokens {
        let _ = writeln!(out, "{tok}");
    }
    Ok(out)
}

/// One line per statement: the s-expression of a value statement, or the skipped directive.
pub fn parse_output(source: &str, config: &ParseConfig) -> Result<String, ParseError> {
    let tokens = lexer::lex(source)?;
    let program = parser::parse_program_with(&tokens, config)?;
    let mut expressions = program.ast.children(program.root).iter();
    let mut out = String::new();
    for statement in &program.statements {
        let start = &tokens[statement.scope.begin];
        match statement.kind {
            StatementKind::Directive(id) => {
                let _ = writeln!(out, "{}:{} #{} (skipped)", start.line, start.col, directives::as_str(id));
            }
            StatementKind::Value => {
                if let Some(&expr) = expressions.next() {
                    let _ = writeln!(out, "{}:{} {}", start.line, start.col, program.ast.to_sexpr(expr, &tokens));
                }
            }
        }
    }
    Ok(out)
}

/// One fully parenthesized line per value statement.
pub fn parenthesize_output(source: &str, config: &ParseConfig) -> Result<String, ParseError> {
    let tokens = lexer::lex(source)?;
    let statements = parser::split_statements(&tokens, content_range(&tokens))?;
    let mut out = String::new();
    for statement in statements.iter().filter(|s| s.kind == StatementKind::Value) {
        let parenthesized = parenthesizer::parenthesize_with(&tokens, statement.range, config.max_nesting_depth)?;
        let _ = writeln!(out, "{}", parenthesized.text());
    }
    Ok(out)
}

/// Statement ranges followed by every bracket scope in source order.
pub fn scopes_output(source: &str) -> Result<String, ParseError> {
    let tokens = lexer::lex(source)?;
    let range = content_range(&tokens);
    let statements = parser::split_statements(&tokens, range)?;

    let mut out = String::new();
    for statement in &statements {
        let start = &tokens[statement.scope.begin];
        let kind = match statement.kind {
            StatementKind::Directive(id) => format!("#{}", directives::as_str(id)),
            StatementKind::Value => "value".to_string(),
        };
        let _ = writeln!(
            out,
            "statement {}:{} {} {}",
            start.line,
            start.col,
            kind,
            join_literals(&tokens, statement.range)
        );
    }
    for (i, tok) in tokens.iter().enumerate().take(range.end) {
        let Some(kind) = tok.opens() else {
            continue;
        };
        let found = scope::find_matching(&tokens, TokenRange::new(i, range.end), kind)?;
        let close = &tokens[found.end - 1];
        let _ = writeln!(
            out,
            "{} {}:{}..{}:{} {}",
            kind.describe(),
            tok.line,
            tok.col,
            close.line,
            close.col,
            join_literals(&tokens, found.contained())
        );
    }
    Ok(out)
}

/// The s-expression of one expression.
pub fn expr_output(code: &str, config: &ParseConfig) -> Result<String, ParseError> {
    let (tokens, parsed) = parser::parse_source_expression(code, config)?;
    Ok(format!("{}\n", parsed.ast.to_sexpr(parsed.root, &tokens)))
}

// ============================================================================
// Tests
// ============================================================================
