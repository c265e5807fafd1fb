//! Token types for the Cand lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Directive(DirectiveId)` for `#` keywords
//! - `SpecialObject(SpecialObjectId)` for `@` builtins
//! - `Operator(OperatorId)` for operator spellings
//! - `Punctuation(PunctuationId)` for brackets, separators and `...`
//!
//! ## Notes
//! - Every token keeps its exact source text in `literal`, so concatenating literals reproduces the source minus
//!   trivia. Literal values (escapes, suffixes) are decoded on demand by `Ast::literal_value`.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use std::fmt;

use crate::ast::Span;
use cand_core::lang::directives::DirectiveId;
use cand_core::lang::operators::OperatorId;
use cand_core::lang::punctuation::PunctuationId;
use cand_core::lang::special_objects::SpecialObjectId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Vocabulary (ID-based) ==========
    Directive(DirectiveId),
    SpecialObject(SpecialObjectId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident,
    /// Plain integer: `42`.
    Number,
    /// `7u`
    Unsigned,
    /// `1b`
    Bit,
    /// `255o`
    Octet,
    /// `1.5`
    Real,
    /// `'text'`, quotes included in the literal.
    String,

    // ========== Trivia (removed by `sanitize`) ==========
    Whitespace,
    Newline,
    LineComment,
    BlockComment,

    // ========== Special ==========
    Eof,
}

impl TokenKind {
    /// Short lowercase name used by token dumps and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Directive(_) => "directive",
            TokenKind::SpecialObject(_) => "special_object",
            TokenKind::Operator(_) => "operator",
            TokenKind::Punctuation(_) => "punctuation",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::Unsigned => "unsigned",
            TokenKind::Bit => "bit",
            TokenKind::Octet => "octet",
            TokenKind::Real => "real",
            TokenKind::String => "string",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::LineComment => "line_comment",
            TokenKind::BlockComment => "block_comment",
            TokenKind::Eof => "eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its source text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the token.
    pub literal: String,
    /// Byte span in the source.
    pub span: Span,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column (in characters) of the first character.
    pub col: usize,
    /// Number of lexical units combined into this token (`#var` is 2, `1.5` is 3).
    pub size: usize,
}

impl Token {
    /// Create a token of size 1.
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span, line: usize, col: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
            line,
            col,
            size: 1,
        }
    }

    /// Set the combined-unit count.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Zero-width token of `kind` anchored at the start of `anchor`, used for synthesized punctuation.
    pub fn synthesized(kind: TokenKind, literal: &str, anchor: &Token) -> Self {
        Self::new(
            kind,
            literal,
            Span::new(anchor.span.start, anchor.span.start),
            anchor.line,
            anchor.col,
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} {:?}", self.line, self.col, self.kind, self.literal)
    }
}
