//! Lexer for the Cand language
//!
//! Handles tokenization including:
//! - `#` directives and `@` special objects from closed registries
//! - Identifiers and literals (numbers with an optional `u`/`b`/`o` suffix, reals, single-quoted strings)
//! - Symbol operators (longest spelling first), brackets, separators and `...`
//! - Trivia (whitespace runs, newline runs, `//` and `/* */` comments), removed again by [`sanitize`]
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String scanning and escape decoding
//! - `numbers` - Numeric literal scanning

mod numbers;
pub(crate) mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::LexError;
use cand_core::lang::operators::{self, OperatorId};
use cand_core::lang::punctuation::PunctuationId;
use cand_core::lang::{directives, special_objects};

/// Lexer for Cand source code.
///
/// Converts source text into a stream of tokens in a single forward pass. Classifiers are tried in a fixed order:
/// comments, strings, newline runs, whitespace runs, numbers, identifiers, `#` directives, `@` special objects,
/// symbol operators, brackets, separators, and finally `.` / `...`.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    col: usize,
    /// Start of the token being scanned: byte offset, line, column.
    start: (usize, usize, usize),
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            col: 1,
            start: (0, 1, 1),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source code, trivia included.
    ///
    /// The token stream always ends with an `Eof` token. The first lexical error stops the scan.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.peek() {
            self.start = (self.current_pos, self.line, self.col);
            self.scan_token(c)?;
        }

        self.start = (self.current_pos, self.line, self.col);
        self.add_token(TokenKind::Eof);
        Ok(self.tokens)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn rest(&self) -> &'a str {
        &self.source[self.current_pos..]
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn advance_bytes(&mut self, len: usize) {
        let end = self.current_pos + len;
        while self.current_pos < end && self.advance().is_some() {}
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_sized_token(kind, 1);
    }

    fn add_sized_token(&mut self, kind: TokenKind, size: usize) {
        let (start, line, col) = self.start;
        let literal = &self.source[start..self.current_pos];
        self.tokens
            .push(Token::new(kind, literal, Span::new(start, self.current_pos), line, col).with_size(size));
    }

    fn start_span(&self) -> miette::SourceSpan {
        Span::new(self.start.0, self.current_pos).into()
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self, c: char) -> Result<(), LexError> {
        match c {
            '/' if self.peek_next() == Some('/') => {
                self.advance_while(|c| c != '\n');
                self.add_token(TokenKind::LineComment);
            }
            '/' if self.peek_next() == Some('*') => self.scan_block_comment()?,
            '\'' => self.scan_string()?,
            '\n' | '\r' => {
                self.advance_while(|c| c == '\n' || c == '\r');
                self.add_token(TokenKind::Newline);
            }
            c if c.is_whitespace() => {
                self.advance_while(|c| c.is_whitespace() && c != '\n' && c != '\r');
                self.add_token(TokenKind::Whitespace);
            }
            c if c.is_ascii_digit() => self.scan_number()?,
            c if is_ident_start(c) => {
                self.advance_while(is_ident_continue);
                self.add_token(TokenKind::Ident);
            }
            '#' => self.scan_directive()?,
            '@' => self.scan_special_object()?,
            c if operators::is_symbol_start(c) => match operators::longest_match(self.rest()) {
                Some((id, len)) => {
                    self.advance_bytes(len);
                    self.add_token(TokenKind::Operator(id));
                }
                None => return Err(self.unexpected(c)),
            },
            '(' => self.single(PunctuationId::LParen),
            ')' => self.single(PunctuationId::RParen),
            '[' => self.single(PunctuationId::LBracket),
            ']' => self.single(PunctuationId::RBracket),
            '{' => self.single(PunctuationId::LBrace),
            '}' => self.single(PunctuationId::RBrace),
            ';' => self.single(PunctuationId::Semicolon),
            ',' => self.single(PunctuationId::Comma),
            ':' => self.single(PunctuationId::Colon),
            '.' if self.rest().starts_with("...") => {
                self.advance_bytes(3);
                self.add_token(TokenKind::Punctuation(PunctuationId::Ellipsis));
            }
            '.' => {
                self.advance();
                self.add_token(TokenKind::Operator(OperatorId::Dot));
            }
            c => return Err(self.unexpected(c)),
        }
        Ok(())
    }

    fn single(&mut self, id: PunctuationId) {
        self.advance();
        self.add_token(TokenKind::Punctuation(id));
    }

    fn unexpected(&mut self, ch: char) -> LexError {
        self.advance();
        LexError::UnexpectedChar {
            ch,
            line: self.start.1,
            col: self.start.2,
            span: self.start_span(),
        }
    }

    fn scan_block_comment(&mut self) -> Result<(), LexError> {
        self.advance_bytes(2); // consume /*
        loop {
            if self.rest().starts_with("*/") {
                self.advance_bytes(2);
                self.add_token(TokenKind::BlockComment);
                return Ok(());
            }
            if self.advance().is_none() {
                return Err(LexError::UnterminatedComment {
                    line: self.start.1,
                    col: self.start.2,
                    span: Span::new(self.start.0, self.start.0 + 2).into(),
                });
            }
        }
    }

    /// `#name`: the name must be a registered directive.
    fn scan_directive(&mut self) -> Result<(), LexError> {
        self.advance(); // consume #
        let name_start = self.current_pos;
        self.advance_while(is_ident_continue);
        let name = &self.source[name_start..self.current_pos];
        match directives::from_str(name) {
            Some(id) => {
                self.add_sized_token(TokenKind::Directive(id), 2);
                Ok(())
            }
            None => Err(LexError::UnknownDirective {
                name: name.to_string(),
                line: self.start.1,
                col: self.start.2,
                span: self.start_span(),
            }),
        }
    }

    /// `@name`: the name must be a registered special object.
    fn scan_special_object(&mut self) -> Result<(), LexError> {
        self.advance(); // consume @
        let name_start = self.current_pos;
        self.advance_while(is_ident_continue);
        let name = &self.source[name_start..self.current_pos];
        match special_objects::from_str(name) {
            Some(id) => {
                self.add_sized_token(TokenKind::SpecialObject(id), 2);
                Ok(())
            }
            None => Err(LexError::UnknownSpecialObject {
                name: name.to_string(),
                line: self.start.1,
                col: self.start.2,
                span: self.start_span(),
            }),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize source text without removing trivia.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Remove whitespace, newline and comment tokens.
pub fn sanitize(tokens: Vec<Token>) -> Vec<Token> {
    let before = tokens.len();
    let kept: Vec<Token> = tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect();
    tracing::debug!(removed = before - kept.len(), kept = kept.len(), "sanitized token stream");
    kept
}

/// Tokenize source text and remove trivia.
///
/// This is the entry point the parser expects: the result contains no trivia and ends with `Eof`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize(source).map(sanitize)
}
