//! Error types for the Cand syntax front end.
//!
//! Every public entry point returns one of these as an explicit `Result` error. All of them derive
//! [`miette::Diagnostic`], carry a stable diagnostic code, and label the offending source bytes so the CLI can render
//! them with source context.
//!
//! ## Notes
//! - Line and column are 1-based; columns count characters.
//! - Internal invariant violations are never reported through these types; they panic with an `INVARIANT:` message.

use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Span;
use crate::lexer::Token;

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.end.saturating_sub(span.start))
    }
}

/// Position of a token for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Site {
    pub literal: String,
    pub line: usize,
    pub col: usize,
    pub span: SourceSpan,
}

impl Site {
    /// Site of `tokens[index]`, falling back to the last token (or the start of the input) when out of range.
    pub(crate) fn of(tokens: &[Token], index: usize) -> Self {
        match tokens.get(index).or_else(|| tokens.last()) {
            Some(tok) => Self::token(tok),
            None => Self {
                literal: String::new(),
                line: 1,
                col: 1,
                span: SourceSpan::new(0.into(), 0),
            },
        }
    }

    pub(crate) fn token(tok: &Token) -> Self {
        Self {
            literal: tok.literal.clone(),
            line: tok.line,
            col: tok.col,
            span: tok.span.into(),
        }
    }
}

// ============================================================================
// Lexical errors
// ============================================================================

/// Error produced while scanning source text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LexError {
    #[error("unknown directive `#{name}` at {line}:{col}")]
    #[diagnostic(code(cand::lex::unknown_directive), help("directives form a closed set, e.g. `#var`, `#func`, `#if`"))]
    UnknownDirective {
        name: String,
        line: usize,
        col: usize,
        #[label("not a directive")]
        span: SourceSpan,
    },

    #[error("unknown special object `@{name}` at {line}:{col}")]
    #[diagnostic(code(cand::lex::unknown_special_object))]
    UnknownSpecialObject {
        name: String,
        line: usize,
        col: usize,
        #[label("not a special object")]
        span: SourceSpan,
    },

    #[error("unterminated string literal starting at {line}:{col}")]
    #[diagnostic(code(cand::lex::unterminated_string), help("strings end with `'` on the same line"))]
    UnterminatedString {
        line: usize,
        col: usize,
        #[label("string starts here")]
        span: SourceSpan,
    },

    #[error("invalid escape `\\{escape}` at {line}:{col}")]
    #[diagnostic(code(cand::lex::invalid_escape), help("valid escapes are \\' \\\\ \\n \\t \\r \\0"))]
    InvalidEscape {
        escape: char,
        line: usize,
        col: usize,
        #[label("unknown escape")]
        span: SourceSpan,
    },

    #[error("unterminated block comment starting at {line}:{col}")]
    #[diagnostic(code(cand::lex::unterminated_comment))]
    UnterminatedComment {
        line: usize,
        col: usize,
        #[label("comment starts here")]
        span: SourceSpan,
    },

    #[error("invalid number literal `{literal}` at {line}:{col}")]
    #[diagnostic(code(cand::lex::invalid_number), help("numbers take at most one suffix: `u`, `b` or `o`"))]
    InvalidNumber {
        literal: String,
        line: usize,
        col: usize,
        #[label("invalid number")]
        span: SourceSpan,
    },

    #[error("unexpected character {ch:?} at {line}:{col}")]
    #[diagnostic(code(cand::lex::unexpected_char))]
    UnexpectedChar {
        ch: char,
        line: usize,
        col: usize,
        #[label("unexpected")]
        span: SourceSpan,
    },
}

impl LexError {
    /// 1-based line and column of the error.
    pub fn position(&self) -> (usize, usize) {
        match self {
            LexError::UnknownDirective { line, col, .. }
            | LexError::UnknownSpecialObject { line, col, .. }
            | LexError::UnterminatedString { line, col, .. }
            | LexError::InvalidEscape { line, col, .. }
            | LexError::UnterminatedComment { line, col, .. }
            | LexError::InvalidNumber { line, col, .. }
            | LexError::UnexpectedChar { line, col, .. } => (*line, *col),
        }
    }
}

// ============================================================================
// Scope errors
// ============================================================================

/// Resolver rule that was being applied when a scope error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeRule {
    ParenScope,
    BracketScope,
    BraceScope,
    Statement,
    OpenStatement,
}

impl fmt::Display for ScopeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScopeRule::ParenScope => "paren scope",
            ScopeRule::BracketScope => "bracket scope",
            ScopeRule::BraceScope => "brace scope",
            ScopeRule::Statement => "statement",
            ScopeRule::OpenStatement => "open statement",
        })
    }
}

/// Error produced by the scope resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ScopeError {
    #[error("{rule}: `{literal}` at {line}:{col} does not open a scope, expected `{expected}`")]
    #[diagnostic(code(cand::scope::not_an_opener))]
    NotAnOpener {
        rule: ScopeRule,
        literal: String,
        expected: String,
        line: usize,
        col: usize,
        #[label("expected an opener here")]
        span: SourceSpan,
    },

    #[error("{rule}: `{found}` at {line}:{col} does not match `{open}` opened at {open_line}:{open_col}")]
    #[diagnostic(code(cand::scope::mismatched))]
    Mismatched {
        rule: ScopeRule,
        found: String,
        open: String,
        line: usize,
        col: usize,
        open_line: usize,
        open_col: usize,
        #[label("mismatched closer")]
        span: SourceSpan,
    },

    #[error(
        "{rule}: `{close}` at {line}:{col} closes the scope while `{inner}` opened at {inner_line}:{inner_col} is still open"
    )]
    #[diagnostic(code(cand::scope::unclosed_inner))]
    UnclosedInner {
        rule: ScopeRule,
        close: String,
        inner: String,
        line: usize,
        col: usize,
        inner_line: usize,
        inner_col: usize,
        #[label("inner scope still open")]
        span: SourceSpan,
    },

    #[error("{rule}: `{literal}` repeated at {line}:{col} before the statement opened at {open_line}:{open_col} ended")]
    #[diagnostic(code(cand::scope::repeated_opener), help("terminate the previous statement with `;`"))]
    RepeatedOpener {
        rule: ScopeRule,
        literal: String,
        line: usize,
        col: usize,
        open_line: usize,
        open_col: usize,
        #[label("repeated here")]
        span: SourceSpan,
    },

    #[error("{rule}: `{open}` at {line}:{col} is never closed, expected `{expected}`")]
    #[diagnostic(code(cand::scope::unterminated))]
    Unterminated {
        rule: ScopeRule,
        open: String,
        expected: String,
        line: usize,
        col: usize,
        #[label("opened here")]
        span: SourceSpan,
    },
}

impl ScopeError {
    /// Resolver rule being applied.
    pub fn rule(&self) -> ScopeRule {
        match self {
            ScopeError::NotAnOpener { rule, .. }
            | ScopeError::Mismatched { rule, .. }
            | ScopeError::UnclosedInner { rule, .. }
            | ScopeError::RepeatedOpener { rule, .. }
            | ScopeError::Unterminated { rule, .. } => *rule,
        }
    }

    /// 1-based line and column of the token the error points at.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ScopeError::NotAnOpener { line, col, .. }
            | ScopeError::Mismatched { line, col, .. }
            | ScopeError::UnclosedInner { line, col, .. }
            | ScopeError::RepeatedOpener { line, col, .. }
            | ScopeError::Unterminated { line, col, .. } => (*line, *col),
        }
    }
}

// ============================================================================
// Syntax errors
// ============================================================================

/// What went wrong while building an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    InvalidStart,
    MissingOperand,
    EmptyOperand,
    OperandAfterOperand,
    PrefixAfterOperand,
    NonAssociative,
    InvalidToken,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyntaxErrorKind::InvalidStart => "invalid token at start of expression",
            SyntaxErrorKind::MissingOperand => "operator missing operand",
            SyntaxErrorKind::EmptyOperand => "empty operand",
            SyntaxErrorKind::OperandAfterOperand => "operand after operand",
            SyntaxErrorKind::PrefixAfterOperand => "prefix operator after operand",
            SyntaxErrorKind::NonAssociative => "non-associative operator chained",
            SyntaxErrorKind::InvalidToken => "invalid token in expression",
        })
    }
}

/// Grammar production being parsed when a syntax error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Expression,
    Primary,
    Subexpression,
    Arguments,
    IndexArguments,
    TypeArguments,
    ListLiteral,
    InitializerList,
    Parenthesizer,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Production::Expression => "expression",
            Production::Primary => "primary",
            Production::Subexpression => "subexpression",
            Production::Arguments => "arguments",
            Production::IndexArguments => "index arguments",
            Production::TypeArguments => "type arguments",
            Production::ListLiteral => "list literal",
            Production::InitializerList => "initializer list",
            Production::Parenthesizer => "parenthesizer",
        })
    }
}

/// Error produced by the expression parser or the parenthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at {line}:{col} (`{literal}` in {production})")]
#[diagnostic(code(cand::syntax))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub production: Production,
    pub literal: String,
    pub line: usize,
    pub col: usize,
    #[label("here")]
    pub span: SourceSpan,
}

impl SyntaxError {
    pub(crate) fn at(kind: SyntaxErrorKind, production: Production, tokens: &[Token], index: usize) -> Self {
        let site = Site::of(tokens, index);
        Self {
            kind,
            production,
            literal: site.literal,
            line: site.line,
            col: site.col,
            span: site.span,
        }
    }
}

// ============================================================================
// Literal errors
// ============================================================================

/// Error produced while extracting a literal value from a leaf node.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LiteralError {
    #[error("`{literal}` at {line}:{col} is out of range for {target}")]
    #[diagnostic(code(cand::literal::out_of_range))]
    OutOfRange {
        literal: String,
        target: &'static str,
        line: usize,
        col: usize,
        #[label("out of range")]
        span: SourceSpan,
    },

    #[error("`{literal}` at {line}:{col} is not a valid bit, expected `0b` or `1b`")]
    #[diagnostic(code(cand::literal::invalid_bit))]
    InvalidBit {
        literal: String,
        line: usize,
        col: usize,
        #[label("invalid bit")]
        span: SourceSpan,
    },

    #[error("node `{kind}` is not a literal")]
    #[diagnostic(code(cand::literal::not_a_literal))]
    NotALiteral { kind: String },
}

// ============================================================================
// Umbrella
// ============================================================================

/// Any error produced while turning source text into an AST.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scope(#[from] ScopeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("expression nesting exceeds the limit of {limit} at {line}:{col}")]
    #[diagnostic(code(cand::parse::nesting_too_deep), help("raise --max-depth or split the expression"))]
    NestingTooDeep {
        limit: usize,
        line: usize,
        col: usize,
        #[label("too deep")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub(crate) fn nesting_too_deep(limit: usize, tokens: &[Token], index: usize) -> Self {
        let site = Site::of(tokens, index);
        ParseError::NestingTooDeep {
            limit,
            line: site.line,
            col: site.col,
            span: site.span,
        }
    }

    /// The syntax error, if this is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ParseError::Syntax(e) => Some(e),
            _ => None,
        }
    }

    /// The scope error, if this is one.
    pub fn as_scope(&self) -> Option<&ScopeError> {
        match self {
            ParseError::Scope(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message_names_kind_and_position() {
        let err = SyntaxError {
            kind: SyntaxErrorKind::MissingOperand,
            production: Production::Expression,
            literal: "+".to_string(),
            line: 1,
            col: 5,
            span: SourceSpan::new(4.into(), 1),
        };
        insta::assert_snapshot!(err.to_string(), @"operator missing operand at 1:5 (`+` in expression)");
    }

    #[test]
    fn test_parse_error_is_transparent_over_scope_error() {
        let err = ParseError::from(ScopeError::Unterminated {
            rule: ScopeRule::ParenScope,
            open: "(".to_string(),
            expected: ")".to_string(),
            line: 1,
            col: 1,
            span: SourceSpan::new(0.into(), 1),
        });
        insta::assert_snapshot!(err.to_string(), @"paren scope: `(` at 1:1 is never closed, expected `)`");
        assert_eq!(err.as_scope().map(ScopeError::position), Some((1, 1)));
    }

    #[test]
    fn test_site_of_empty_token_slice() {
        let site = Site::of(&[], 3);
        assert_eq!((site.line, site.col), (1, 1));
        assert_eq!(site.literal, "");
    }
}
