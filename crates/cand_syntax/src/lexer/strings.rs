//! String scanning for the Cand lexer
//!
//! Strings are single-quoted and may not span lines. The token keeps the raw text (quotes and escapes included);
//! [`unescape`] decodes it when a literal value is requested.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Span;
use crate::diagnostics::LexError;

/// Decode the character following a backslash.
pub(crate) fn escape_char(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '0' => Some('\0'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        _ => None,
    }
}

/// Decode a raw string literal (`'a\nb'`) into its value.
///
/// The lexer has already validated the escapes, so unknown escapes are kept verbatim.
pub(crate) fn unescape(raw: &str) -> String {
    let inner = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(raw);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(e) => match escape_char(e) {
                Some(decoded) => out.push(decoded),
                None => {
                    out.push('\\');
                    out.push(e);
                }
            },
            None => out.push('\\'),
        }
    }
    out
}

impl<'a> Lexer<'a> {
    pub(super) fn scan_string(&mut self) -> Result<(), LexError> {
        self.advance(); // opening quote
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => return Err(self.unterminated_string()),
                Some('\'') => {
                    self.advance();
                    self.add_token(TokenKind::String);
                    return Ok(());
                }
                Some('\\') => {
                    let (escape_pos, line, col) = (self.current_pos, self.line, self.col);
                    self.advance();
                    match self.peek() {
                        None | Some('\n') | Some('\r') => return Err(self.unterminated_string()),
                        Some(e) if escape_char(e).is_some() => {
                            self.advance();
                        }
                        Some(e) => {
                            return Err(LexError::InvalidEscape {
                                escape: e,
                                line,
                                col,
                                span: Span::new(escape_pos, escape_pos + 1 + e.len_utf8()).into(),
                            });
                        }
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn unterminated_string(&self) -> LexError {
        LexError::UnterminatedString {
            line: self.start.1,
            col: self.start.2,
            span: Span::new(self.start.0, self.start.0 + 1).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_decodes_all_escapes() {
        assert_eq!(unescape(r"'a\'b\\c\nd\te\rf\0'"), "a'b\\c\nd\te\rf\0");
        assert_eq!(unescape("''"), "");
    }
}
