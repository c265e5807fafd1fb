//! CLI module for the Cand front end
//!
//! ## Commands
//!
//! - `lex <file>` - Print the sanitized token stream
//! - `parse <file>` - Parse every value statement and print its s-expression
//! - `parenthesize <file>` - Print the fully parenthesized form of every value statement
//! - `scopes <file>` - Print statement boundaries and every bracket scope
//! - `expr <code>` - Parse one inline expression and print its s-expression
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

use std::fmt;
use std::path::PathBuf;
use std::process;

use cand_syntax::config::{DEFAULT_MAX_NESTING_DEPTH, Normalization, ParseConfig};
use clap::{Parser, Subcommand, ValueEnum};

use crate::version::CAND_VERSION;

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
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
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

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Cand language front end
#[derive(Parser, Debug)]
#[command(name = "cand")]
#[command(version = CAND_VERSION)]
#[command(about = "Lexer, scope resolver and expression parser for the Cand language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// When to run the parenthesizer before precedence climbing
    #[arg(long, global = true, value_enum, default_value_t = NormalizeArg::Auto)]
    pub normalize: NormalizeArg,

    /// Maximum nesting depth of groups, prefix chains and right-associative chains
    #[arg(long = "max-depth", global = true, value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    pub max_depth: usize,

    /// Keep `expression` / `subexpression` wrapper nodes in the output
    #[arg(long = "no-simplify", global = true)]
    pub no_simplify: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the sanitized token stream
    Lex {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse every value statement and print its s-expression
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the fully parenthesized form of every value statement
    Parenthesize {
        /// Source file to parenthesize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print statement boundaries and every bracket scope
    Scopes {
        /// Source file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse one inline expression and print its s-expression
    Expr {
        /// Expression source, e.g. "1 + 2 * 3"
        #[arg(value_name = "CODE")]
        code: String,
    },
}

/// `--normalize` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormalizeArg {
    Never,
    Always,
    Auto,
}

impl From<NormalizeArg> for Normalization {
    fn from(arg: NormalizeArg) -> Self {
        match arg {
            NormalizeArg::Never => Normalization::Never,
            NormalizeArg::Always => Normalization::Always,
            NormalizeArg::Auto => Normalization::Auto,
        }
    }
}

impl Cli {
    /// Parser configuration selected by the global flags.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::new()
            .with_normalization(self.normalize.into())
            .with_max_nesting_depth(self.max_depth)
            .with_simplify(!self.no_simplify)
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
    let config = cli.parse_config();
    tracing::debug!(?config, "parsed command line");
    match cli.command {
        Command::Lex { file } => commands::lex_file(&file),
        Command::Parse { file } => commands::parse_file(&file, &config),
        Command::Parenthesize { file } => commands::parenthesize_file(&file, &config),
        Command::Scopes { file } => commands::scopes_file(&file),
        Command::Expr { code } => commands::expr_code(&code, &config),
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
    fn test_cli_parse_subcommands() {
        let cli = Cli::try_parse_from(["cand", "lex", "main.cand"]).unwrap();
        assert!(matches!(cli.command, Command::Lex { .. }));

        let cli = Cli::try_parse_from(["cand", "parse", "main.cand"]).unwrap();
        assert!(matches!(cli.command, Command::Parse { .. }));

        let cli = Cli::try_parse_from(["cand", "parenthesize", "main.cand"]).unwrap();
        assert!(matches!(cli.command, Command::Parenthesize { .. }));

        let cli = Cli::try_parse_from(["cand", "scopes", "main.cand"]).unwrap();
        assert!(matches!(cli.command, Command::Scopes { .. }));
    }

    #[test]
    fn test_cli_parse_expr_with_global_flags() {
        let cli = Cli::try_parse_from(["cand", "expr", "1 + 2", "--normalize", "never", "--max-depth", "8"]).unwrap();
        if let Command::Expr { code } = &cli.command {
            assert_eq!(code, "1 + 2");
        } else {
            panic!("Expected Expr command");
        }
        let config = cli.parse_config();
        assert_eq!(config.normalization, Normalization::Never);
        assert_eq!(config.max_nesting_depth, 8);
        assert!(config.simplify);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["cand", "--no-simplify", "expr", "x"]).unwrap();
        let config = cli.parse_config();
        assert_eq!(config.normalization, Normalization::Auto);
        assert_eq!(config.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
        assert!(!config.simplify);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["cand"]).is_err());
        assert!(Cli::try_parse_from(["cand", "expr", "x", "--normalize", "sometimes"]).is_err());
    }
}
