//! Bracket and statement scope resolution.
//!
//! Every function here walks a token range with a stack of open brackets. Any of the three bracket kinds may nest
//! inside any other, but each closer must match the innermost open bracket. Results are [`Scope`]s whose `end` is one
//! past the closing token.
//!
//! ## Notes
//! - The resolver is pure: it never allocates AST nodes and never looks past `range.end`.
//! - Separated splitting ([`find_separated_scopes`]) yields no parts for an empty interior and may yield empty parts
//!   for doubled or trailing separators; callers report those as empty operands.

use cand_core::lang::directives::{self, DirectiveId};
use cand_core::lang::punctuation::{self, BracketKind, PunctuationId};

use crate::ast::TokenRange;
use crate::diagnostics::{ScopeError, ScopeRule, Site};
use crate::lexer::Token;

/// A resolved scope: `tokens[begin]` opens it and `tokens[end - 1]` closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    pub begin: usize,
    pub end: usize,
}

impl Scope {
    /// First index strictly inside the delimiters.
    pub fn contained_begin(&self) -> usize {
        self.begin + 1
    }

    /// One past the last index strictly inside the delimiters.
    pub fn contained_end(&self) -> usize {
        self.end - 1
    }

    /// Range strictly inside the delimiters.
    pub fn contained(&self) -> TokenRange {
        TokenRange::new(self.contained_begin(), self.contained_end())
    }

    /// Range including both delimiters.
    pub fn range(&self) -> TokenRange {
        TokenRange::new(self.begin, self.end)
    }
}

/// A bracketed scope together with its separator-delimited parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separated {
    pub scope: Scope,
    pub parts: Vec<TokenRange>,
}

/// Token matcher for statement openers and closers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Punct(PunctuationId),
    Directive(DirectiveId),
    AnyDirective,
    /// Any token at all.
    Any,
}

impl Boundary {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Boundary::Punct(id) => token.is_punctuation(*id),
            Boundary::Directive(id) => token.kind.is_directive(*id),
            Boundary::AnyDirective => token.directive_id().is_some(),
            Boundary::Any => true,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Boundary::Punct(id) => punctuation::as_str(*id).to_string(),
            Boundary::Directive(id) => format!("#{}", directives::as_str(*id)),
            Boundary::AnyDirective => "#directive".to_string(),
            Boundary::Any => "any token".to_string(),
        }
    }
}

fn bracket_rule(kind: BracketKind) -> ScopeRule {
    match kind {
        BracketKind::Paren => ScopeRule::ParenScope,
        BracketKind::Bracket => ScopeRule::BracketScope,
        BracketKind::Brace => ScopeRule::BraceScope,
    }
}

/// Resolve the `( .. )` scope opened at `range.begin`.
pub fn find_paren_scope(tokens: &[Token], range: TokenRange) -> Result<Scope, ScopeError> {
    find_matching(tokens, range, BracketKind::Paren)
}

/// Resolve the `[ .. ]` scope opened at `range.begin`.
pub fn find_bracket_scope(tokens: &[Token], range: TokenRange) -> Result<Scope, ScopeError> {
    find_matching(tokens, range, BracketKind::Bracket)
}

/// Resolve the `{ .. }` scope opened at `range.begin`.
pub fn find_brace_scope(tokens: &[Token], range: TokenRange) -> Result<Scope, ScopeError> {
    find_matching(tokens, range, BracketKind::Brace)
}

/// Resolve the scope of any bracket kind opened at `range.begin`.
pub fn find_matching(tokens: &[Token], range: TokenRange, kind: BracketKind) -> Result<Scope, ScopeError> {
    walk(
        tokens,
        range,
        Boundary::Punct(kind.open()),
        Boundary::Punct(kind.close()),
        false,
        bracket_rule(kind),
    )
}

/// Resolve a statement opened by `open` at `range.begin` and terminated by `close` at depth 0.
///
/// The opener may not appear again at depth 0 before the terminator (`#var a #var b;` is an error).
pub fn find_statement(
    tokens: &[Token],
    range: TokenRange,
    open: Boundary,
    close: Boundary,
) -> Result<Scope, ScopeError> {
    walk(tokens, range, open, close, false, ScopeRule::Statement)
}

/// Like [`find_statement`], but the opener may repeat at depth 0 (`a = a + a;`).
pub fn find_open_statement(
    tokens: &[Token],
    range: TokenRange,
    open: Boundary,
    close: Boundary,
) -> Result<Scope, ScopeError> {
    walk(tokens, range, open, close, true, ScopeRule::OpenStatement)
}

/// Resolve the `( .. )` scope at `range.begin` and split its interior on `separator`.
pub fn find_separated_paren_scopes(
    tokens: &[Token],
    range: TokenRange,
    separator: PunctuationId,
) -> Result<Separated, ScopeError> {
    find_separated_scopes(tokens, range, BracketKind::Paren, separator)
}

/// Resolve the `[ .. ]` scope at `range.begin` and split its interior on `separator`.
pub fn find_separated_bracket_scopes(
    tokens: &[Token],
    range: TokenRange,
    separator: PunctuationId,
) -> Result<Separated, ScopeError> {
    find_separated_scopes(tokens, range, BracketKind::Bracket, separator)
}

/// Resolve the `{ .. }` scope at `range.begin` and split its interior on `separator`.
pub fn find_separated_brace_scopes(
    tokens: &[Token],
    range: TokenRange,
    separator: PunctuationId,
) -> Result<Separated, ScopeError> {
    find_separated_scopes(tokens, range, BracketKind::Brace, separator)
}

/// Resolve a bracketed scope and split its interior on a separator that only counts at depth 0.
pub fn find_separated_scopes(
    tokens: &[Token],
    range: TokenRange,
    kind: BracketKind,
    separator: PunctuationId,
) -> Result<Separated, ScopeError> {
    let scope = find_matching(tokens, range, kind)?;
    let parts = split_interior(tokens, scope.contained(), separator)?;
    Ok(Separated { scope, parts })
}

/// Split an already balanced range on depth-0 `separator` tokens.
pub fn split_interior(
    tokens: &[Token],
    interior: TokenRange,
    separator: PunctuationId,
) -> Result<Vec<TokenRange>, ScopeError> {
    if interior.is_empty() {
        return Ok(Vec::new());
    }

    let mut parts = Vec::new();
    let mut part_begin = interior.begin;
    let mut i = interior.begin;
    while i < interior.end {
        let tok = &tokens[i];
        if let Some(kind) = tok.opens() {
            i = find_matching(tokens, TokenRange::new(i, interior.end), kind)?.end;
            continue;
        }
        if tok.is_punctuation(separator) {
            parts.push(TokenRange::new(part_begin, i));
            part_begin = i + 1;
        }
        i += 1;
    }
    parts.push(TokenRange::new(part_begin, interior.end));
    Ok(parts)
}

fn walk(
    tokens: &[Token],
    range: TokenRange,
    open: Boundary,
    close: Boundary,
    allow_repeat: bool,
    rule: ScopeRule,
) -> Result<Scope, ScopeError> {
    let begin = range.begin;
    let end = range.end.min(tokens.len());
    let opener = match tokens.get(begin).filter(|t| begin < end && open.matches(t)) {
        Some(tok) => tok,
        None => {
            let site = Site::of(tokens, begin);
            return Err(ScopeError::NotAnOpener {
                rule,
                literal: site.literal,
                expected: open.describe(),
                line: site.line,
                col: site.col,
                span: site.span,
            });
        }
    };

    // A statement may itself start with a bracket (`(a + b) * c;`); that bracket nests like any other.
    let statement = matches!(rule, ScopeRule::Statement | ScopeRule::OpenStatement);
    let mut stack: Vec<usize> = if statement && opener.opens().is_some() {
        vec![begin]
    } else {
        Vec::new()
    };
    for (i, tok) in tokens.iter().enumerate().take(end).skip(begin + 1) {
        if stack.is_empty() && close.matches(tok) {
            return Ok(Scope { begin, end: i + 1 });
        }
        if tok.opens().is_some() {
            stack.push(i);
            continue;
        }
        if let Some(kind) = tok.closes() {
            match stack.last() {
                Some(&top) if tokens[top].opens() == Some(kind) => {
                    stack.pop();
                }
                Some(&top) if close.matches(tok) => {
                    let inner = &tokens[top];
                    return Err(ScopeError::UnclosedInner {
                        rule,
                        close: tok.literal.clone(),
                        inner: inner.literal.clone(),
                        line: tok.line,
                        col: tok.col,
                        inner_line: inner.line,
                        inner_col: inner.col,
                        span: tok.span.into(),
                    });
                }
                top => {
                    let open_tok = top.map(|&t| &tokens[t]).unwrap_or(opener);
                    return Err(ScopeError::Mismatched {
                        rule,
                        found: tok.literal.clone(),
                        open: open_tok.literal.clone(),
                        line: tok.line,
                        col: tok.col,
                        open_line: open_tok.line,
                        open_col: open_tok.col,
                        span: tok.span.into(),
                    });
                }
            }
            continue;
        }
        if stack.is_empty() && !allow_repeat && open.matches(tok) {
            return Err(ScopeError::RepeatedOpener {
                rule,
                literal: tok.literal.clone(),
                line: tok.line,
                col: tok.col,
                open_line: opener.line,
                open_col: opener.col,
                span: tok.span.into(),
            });
        }
    }

    tracing::trace!(%rule, begin, end, "scope never closed");
    Err(ScopeError::Unterminated {
        rule,
        open: opener.literal.clone(),
        expected: close.describe(),
        line: opener.line,
        col: opener.col,
        span: opener.span.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use crate::token_helpers::{content_range, join_literals};

    fn lex(source: &str) -> Vec<Token> {
        lexer::lex(source).unwrap()
    }

    #[test]
    fn test_paren_scope_with_mixed_nesting() {
        let tokens = lex("(a[{b}](c)) d");
        let scope = find_paren_scope(&tokens, content_range(&tokens)).unwrap();
        assert_eq!(scope, Scope { begin: 0, end: 11 });
        assert_eq!(join_literals(&tokens, scope.contained()), "a[{b}](c)");
    }

    #[test]
    fn test_unterminated_cites_opener_and_expected_closer() {
        let tokens = lex("(1+2");
        let err = find_paren_scope(&tokens, content_range(&tokens)).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"paren scope: `(` at 1:1 is never closed, expected `)`");
    }

    #[test]
    fn test_not_an_opener() {
        let tokens = lex("a)");
        let err = find_paren_scope(&tokens, content_range(&tokens)).unwrap_err();
        assert!(matches!(err, ScopeError::NotAnOpener { .. }));
    }

    #[test]
    fn test_mismatched_closer() {
        let tokens = lex("(a])");
        let err = find_paren_scope(&tokens, content_range(&tokens)).unwrap_err();
        let ScopeError::Mismatched { found, open, .. } = &err else {
            panic!("expected a mismatched closer, got {err:?}");
        };
        assert_eq!((found.as_str(), open.as_str()), ("]", "("));
    }

    #[test]
    fn test_target_closer_inside_open_inner_scope() {
        let tokens = lex("(a[b)");
        let err = find_paren_scope(&tokens, content_range(&tokens)).unwrap_err();
        let ScopeError::UnclosedInner { inner, .. } = &err else {
            panic!("expected an unclosed inner scope, got {err:?}");
        };
        assert_eq!(inner, "[");
    }

    #[test]
    fn test_statement_rejects_repeated_directive() {
        let tokens = lex("#var a = 1 #var b = 2;");
        let open = Boundary::Directive(DirectiveId::Var);
        let close = Boundary::Punct(PunctuationId::Semicolon);
        let err = find_statement(&tokens, content_range(&tokens), open, close).unwrap_err();
        assert!(matches!(err, ScopeError::RepeatedOpener { col: 12, .. }), "{err}");
    }

    #[test]
    fn test_open_statement_allows_repeated_opener() {
        let tokens = lex("a = a + a; b;");
        let scope = find_open_statement(
            &tokens,
            content_range(&tokens),
            Boundary::Any,
            Boundary::Punct(PunctuationId::Semicolon),
        )
        .unwrap();
        assert_eq!(scope, Scope { begin: 0, end: 6 });

        let tokens = lex("(a + b) * c; d;");
        let scope = find_open_statement(
            &tokens,
            content_range(&tokens),
            Boundary::Any,
            Boundary::Punct(PunctuationId::Semicolon),
        )
        .unwrap();
        assert_eq!(join_literals(&tokens, scope.range()), "(a+b)*c;");
    }

    #[test]
    fn test_statement_skips_nested_terminators() {
        let tokens = lex("#if (x) { a; b; }; c;");
        let open = Boundary::Directive(DirectiveId::If);
        let close = Boundary::Punct(PunctuationId::Semicolon);
        let scope = find_statement(&tokens, content_range(&tokens), open, close).unwrap();
        assert_eq!(join_literals(&tokens, scope.range()), "#if(x){a;b;};");
    }

    #[test]
    fn test_separated_scopes() {
        let tokens = lex("(a, f(b, c), [d, e])");
        let sep = find_separated_paren_scopes(&tokens, content_range(&tokens), PunctuationId::Comma).unwrap();
        let parts: Vec<_> = sep.parts.iter().map(|r| join_literals(&tokens, *r)).collect();
        assert_eq!(parts, vec!["a", "f(b,c)", "[d,e]"]);
    }

    #[test]
    fn test_separated_scopes_empty_and_trailing() {
        let tokens = lex("()");
        let sep = find_separated_paren_scopes(&tokens, content_range(&tokens), PunctuationId::Comma).unwrap();
        assert!(sep.parts.is_empty());

        let tokens = lex("[a,]");
        let sep = find_separated_bracket_scopes(&tokens, content_range(&tokens), PunctuationId::Comma).unwrap();
        assert_eq!(sep.parts.len(), 2);
        assert!(sep.parts[1].is_empty());

        let tokens = lex("{a}");
        let sep = find_separated_brace_scopes(&tokens, content_range(&tokens), PunctuationId::Comma).unwrap();
        assert_eq!(sep.parts, vec![TokenRange::new(1, 2)]);
    }
}
