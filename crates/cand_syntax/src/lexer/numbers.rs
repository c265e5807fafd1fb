//! Number scanning for the Cand lexer
//!
//! Handles integer literals with an optional one-letter suffix (`u` unsigned, `b` bit, `o` octet) and real literals
//! (`digits.digits`). A `.` is only taken as a fractional point when a digit follows, so `1...3` and `1.foo` keep
//! their `...` / `.` tokens.

use super::tokens::TokenKind;
use super::{Lexer, is_ident_continue};
use crate::diagnostics::LexError;

fn suffix_kind(c: char) -> Option<TokenKind> {
    match c {
        'u' => Some(TokenKind::Unsigned),
        'b' => Some(TokenKind::Bit),
        'o' => Some(TokenKind::Octet),
        _ => None,
    }
}

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self) -> Result<(), LexError> {
        self.advance_while(|c| c.is_ascii_digit());

        let mut kind = TokenKind::Number;
        let mut size = 1;

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            self.advance_while(|c| c.is_ascii_digit());
            kind = TokenKind::Real;
            size = 3;
        } else if !self.peek_next().is_some_and(is_ident_continue) {
            if let Some(suffixed) = self.peek().and_then(suffix_kind) {
                self.advance();
                kind = suffixed;
                size = 2;
            }
        }

        if self.peek().is_some_and(is_ident_continue) {
            self.advance_while(is_ident_continue);
            let (start, line, col) = self.start;
            return Err(LexError::InvalidNumber {
                literal: self.source[start..self.current_pos].to_string(),
                line,
                col,
                span: self.start_span(),
            });
        }

        self.add_sized_token(kind, size);
        Ok(())
    }
}
