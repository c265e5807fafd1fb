//! Shunting-yard style normalization of expression token ranges.
//!
//! The parenthesizer rewrites a flat operator/operand range into an equivalent range where every operator
//! application is wrapped in explicit `(` `)`: `1 + 2 * 3` becomes `(1 + (2 * 3))`, `f(a + b)[i]` becomes
//! `((f((a + b)))[i])`. Parsing the output needs no precedence decisions, and parsing it again after a second
//! parenthesize pass yields the same tree.
//!
//! ## How it works
//! The head walks the input alternating between two roles:
//! - **operand**: prefix operators are stored as closures and copied; a bracket group is resolved with the scope
//!   resolver and each depth-0 comma part is parenthesized recursively; a literal or identifier is skipped (copied)
//!   and the head switches to operator role.
//! - **operator**: a binary operator first resolves every stored closure that binds at least as tightly, then is
//!   stored itself; a postfix construct (`++`, `--`, `( )`, `[ ]`, `{ }`) resolves only tighter closures (member
//!   access) and is wrapped immediately.
//!
//! A closure remembers where its operand starts in the output. Resolving it inserts `(` there and appends `)`.
//! Synthesized parentheses carry the position of the token they wrap and have no origin in the input.

use cand_core::lang::operators::{self, Associativity, Fixity, OperationId, POSTFIX_PRIORITY, PREFIX_PRIORITY};
use cand_core::lang::punctuation::{BracketKind, PunctuationId};

use crate::ast::TokenRange;
use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::diagnostics::{ParseError, Production, SyntaxError, SyntaxErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::scope;

/// Errors reported by [`parenthesize`].
pub type ParenthesizeError = ParseError;

/// Output of the parenthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parenthesized {
    /// Fully parenthesized tokens.
    pub tokens: Vec<Token>,
    /// For each output token, the index of the input token it was copied from (`None` for synthesized parentheses).
    pub origins: Vec<Option<usize>>,
}

impl Parenthesized {
    /// Map a range over the output tokens back onto the input tokens.
    ///
    /// The result spans from the first to the last copied token in `range`. A range with no copied token maps to an
    /// empty range right after the nearest preceding copied token.
    pub fn original_range(&self, range: TokenRange) -> TokenRange {
        let slice = &self.origins[range.begin.min(self.origins.len())..range.end.min(self.origins.len())];
        let first = slice.iter().flatten().next();
        let last = slice.iter().rev().flatten().next();
        match (first, last) {
            (Some(&b), Some(&e)) => TokenRange::new(b, e + 1),
            _ => {
                let anchor = self.origins[..range.begin.min(self.origins.len())]
                    .iter()
                    .rev()
                    .flatten()
                    .next()
                    .map_or(0, |&i| i + 1);
                TokenRange::new(anchor, anchor)
            }
        }
    }

    /// Concatenated literals of the output, e.g. `(1+(2*3))`.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.literal.as_str()).collect()
    }
}

/// An unresolved operator application awaiting its parentheses.
#[derive(Debug, Clone, Copy)]
struct Closure {
    fixity: Fixity,
    priority: u8,
    associativity: Associativity,
    /// Output index where the wrapped span starts.
    start: usize,
    /// Input index of the operator token, for diagnostics.
    operator: usize,
}

impl Closure {
    fn sentinel() -> Self {
        Self {
            fixity: Fixity::Binary,
            priority: 0,
            associativity: Associativity::Left,
            start: 0,
            operator: 0,
        }
    }
}

/// Parenthesize an expression range with the default nesting limit.
pub fn parenthesize(tokens: &[Token], range: TokenRange) -> Result<Parenthesized, ParenthesizeError> {
    parenthesize_with(tokens, range, DEFAULT_MAX_NESTING_DEPTH)
}

/// Parenthesize an expression range.
///
/// ## Errors
/// - Scope errors from bracket groups inside the range.
/// - Syntax errors: operator without operand, two operands in a row, prefix operator after an operand, empty operand.
/// - [`ParseError::NestingTooDeep`] when bracket groups nest deeper than `max_depth`.
#[tracing::instrument(skip_all, fields(begin = range.begin, end = range.end))]
pub fn parenthesize_with(
    tokens: &[Token],
    range: TokenRange,
    max_depth: usize,
) -> Result<Parenthesized, ParenthesizeError> {
    let mut p = Parenthesizer {
        tokens,
        out: Vec::with_capacity(range.len() * 2),
        origins: Vec::with_capacity(range.len() * 2),
        depth: 0,
        max_depth,
    };
    p.expression(range)?;
    Ok(Parenthesized {
        tokens: p.out,
        origins: p.origins,
    })
}

struct Parenthesizer<'a> {
    tokens: &'a [Token],
    out: Vec<Token>,
    origins: Vec<Option<usize>>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parenthesizer<'a> {
    fn error(&self, kind: SyntaxErrorKind, index: usize) -> ParseError {
        SyntaxError::at(kind, Production::Parenthesizer, self.tokens, index).into()
    }

    fn copy(&mut self, index: usize) {
        self.out.push(self.tokens[index].clone());
        self.origins.push(Some(index));
    }

    /// Parenthesize one complete expression spanning exactly `range`.
    fn expression(&mut self, range: TokenRange) -> Result<(), ParseError> {
        if range.is_empty() {
            return Err(self.error(SyntaxErrorKind::EmptyOperand, range.begin));
        }
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::nesting_too_deep(self.max_depth, self.tokens, range.begin));
        }

        let tokens = self.tokens;
        let mut stack = vec![Closure::sentinel()];
        let mut head = range.begin;
        loop {
            // ---- operand role ----
            let mut operand_start = self.operand(&mut stack, &mut head, range)?;

            // ---- operator role ----
            loop {
                if head >= range.end {
                    self.resolve_down_to_sentinel(&mut stack);
                    self.depth -= 1;
                    return Ok(());
                }
                let tok = &tokens[head];

                if let Some(kind) = tok.opens() {
                    self.resolve_tighter_than_postfix(&mut stack, &mut operand_start);
                    head = self.group(head, range.end, kind)?;
                    self.wrap(operand_start, head - 1);
                    continue;
                }

                if let Some(id) = tok.operator_id() {
                    if let Some(op) = operators::postfix_operation(id) {
                        self.resolve_tighter_than_postfix(&mut stack, &mut operand_start);
                        self.copy(head);
                        self.wrap(operand_start, head);
                        tracing::trace!(operation = operators::operation_info(op).name, "wrapped postfix");
                        head += 1;
                        continue;
                    }
                    if let Some(op) = operators::binary_operation(id) {
                        self.check(&mut stack, &mut operand_start, op, head)?;
                        self.store(&mut stack, op, operand_start, head);
                        self.copy(head);
                        head += 1;
                        break;
                    }
                    return Err(self.error(SyntaxErrorKind::PrefixAfterOperand, head));
                }

                if tok.is_operand() {
                    return Err(self.error(SyntaxErrorKind::OperandAfterOperand, head));
                }
                return Err(self.error(SyntaxErrorKind::InvalidToken, head));
            }
        }
    }

    /// Operand role: copy prefix operators (storing their closures) and one primary operand.
    ///
    /// Returns the output index where the primary operand starts.
    fn operand(&mut self, stack: &mut Vec<Closure>, head: &mut usize, range: TokenRange) -> Result<usize, ParseError> {
        let tokens = self.tokens;
        loop {
            let Some(tok) = tokens.get(*head).filter(|_| *head < range.end) else {
                return Err(self.error(SyntaxErrorKind::MissingOperand, head.saturating_sub(1)));
            };

            if let Some(op) = tok.operator_id().and_then(operators::prefix_operation) {
                stack.push(Closure {
                    fixity: Fixity::Prefix,
                    priority: PREFIX_PRIORITY,
                    associativity: Associativity::Right,
                    start: self.out.len(),
                    operator: *head,
                });
                tracing::trace!(operation = operators::operation_info(op).name, "stored prefix closure");
                self.copy(*head);
                *head += 1;
                if *head >= range.end {
                    return Err(self.error(SyntaxErrorKind::MissingOperand, *head - 1));
                }
                continue;
            }

            let start = self.out.len();
            if let Some(kind) = tok.opens() {
                if kind == BracketKind::Paren {
                    let scope = scope::find_paren_scope(tokens, TokenRange::new(*head, range.end))?;
                    if scope.contained().is_empty() {
                        return Err(self.error(SyntaxErrorKind::EmptyOperand, scope.begin));
                    }
                }
                *head = self.group(*head, range.end, kind)?;
                return Ok(start);
            }
            if tok.is_operand() {
                self.copy(*head);
                *head += 1;
                return Ok(start);
            }

            // A binary-only operator after another operator means the first one lacks its operand.
            let kind = if *head != range.begin && tok.operator_id().is_some() {
                SyntaxErrorKind::MissingOperand
            } else {
                SyntaxErrorKind::InvalidStart
            };
            return Err(self.error(kind, *head));
        }
    }

    /// Copy a bracket group, parenthesizing each depth-0 comma part. Returns the input index after the closer.
    fn group(&mut self, open: usize, end: usize, kind: BracketKind) -> Result<usize, ParseError> {
        let separated = scope::find_separated_scopes(self.tokens, TokenRange::new(open, end), kind, PunctuationId::Comma)?;
        self.copy(separated.scope.begin);
        for (i, part) in separated.parts.iter().enumerate() {
            if i > 0 {
                // The separator sits right before each later part.
                self.copy(part.begin - 1);
            }
            self.expression(*part)?;
        }
        self.copy(separated.scope.end - 1);
        Ok(separated.scope.end)
    }

    /// Resolve closures that bind at least as tightly as `op` (equal priority only when left-associative).
    fn check(
        &mut self,
        stack: &mut Vec<Closure>,
        operand_start: &mut usize,
        op: OperationId,
        head: usize,
    ) -> Result<(), ParseError> {
        let info = operators::operation_info(op);
        loop {
            let top = *stack.last().expect("INVARIANT: closure stack keeps its sentinel");
            let non_associative =
                info.associativity == Associativity::None || top.associativity == Associativity::None;
            if stack.len() > 1 && top.priority == info.priority && non_associative {
                return Err(self.error(SyntaxErrorKind::NonAssociative, head));
            }
            let binds_tighter = top.priority > info.priority
                || (top.priority == info.priority && info.associativity == Associativity::Left);
            if stack.len() == 1 || !binds_tighter {
                return Ok(());
            }
            self.resolve(stack, operand_start);
        }
    }

    fn store(&mut self, stack: &mut Vec<Closure>, op: OperationId, operand_start: usize, head: usize) {
        let info = operators::operation_info(op);
        stack.push(Closure {
            fixity: info.fixity,
            priority: info.priority,
            associativity: info.associativity,
            start: operand_start,
            operator: head,
        });
    }

    /// Resolve closures that bind tighter than postfix constructs (member access).
    fn resolve_tighter_than_postfix(&mut self, stack: &mut Vec<Closure>, operand_start: &mut usize) {
        while stack.len() > 1 {
            let top = stack[stack.len() - 1];
            if top.priority > POSTFIX_PRIORITY {
                self.resolve(stack, operand_start);
            } else {
                break;
            }
        }
    }

    fn resolve_down_to_sentinel(&mut self, stack: &mut Vec<Closure>) {
        let mut operand_start = 0;
        while stack.len() > 1 {
            self.resolve(stack, &mut operand_start);
        }
        debug_assert_eq!(stack.len(), 1);
    }

    /// Pop the top closure and wrap its output span in parentheses.
    fn resolve(&mut self, stack: &mut Vec<Closure>, operand_start: &mut usize) {
        let closure = stack.pop().expect("INVARIANT: closure stack keeps its sentinel");
        assert!(!stack.is_empty(), "INVARIANT: the sentinel closure is never resolved");
        tracing::trace!(
            fixity = ?closure.fixity,
            priority = closure.priority,
            operator = closure.operator,
            "resolved closure"
        );
        self.wrap(closure.start, closure.operator);
        *operand_start = closure.start;
    }

    /// Insert `(` at output index `start` and append `)`. `anchor` is an input index used for positions.
    fn wrap(&mut self, start: usize, anchor: usize) {
        let anchor_tok = &self.tokens[anchor];
        let open = Token::synthesized(TokenKind::Punctuation(PunctuationId::LParen), "(", &self.out[start]);
        let close = Token::synthesized(TokenKind::Punctuation(PunctuationId::RParen), ")", anchor_tok);
        self.out.insert(start, open);
        self.origins.insert(start, None);
        self.out.push(close);
        self.origins.push(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use crate::token_helpers::content_range;

    fn paren(source: &str) -> String {
        let tokens = lexer::lex(source).unwrap();
        parenthesize(&tokens, content_range(&tokens)).unwrap().text()
    }

    fn paren_err(source: &str) -> ParseError {
        let tokens = lexer::lex(source).unwrap();
        parenthesize(&tokens, content_range(&tokens)).unwrap_err()
    }

    #[test]
    fn test_precedence_and_associativity() {
        insta::assert_snapshot!(paren("1 + 2 * 3"), @"(1+(2*3))");
        insta::assert_snapshot!(paren("1 * 2 + 3"), @"((1*2)+3)");
        insta::assert_snapshot!(paren("1 - 2 - 3"), @"((1-2)-3)");
        insta::assert_snapshot!(paren("a = b = c"), @"(a=(b=c))");
        insta::assert_snapshot!(paren("a || b && c | d"), @"(a||(b&&(c|d)))");
    }

    #[test]
    fn test_prefix_and_postfix() {
        insta::assert_snapshot!(paren("-1 + 2"), @"((-1)+2)");
        insta::assert_snapshot!(paren("-a++"), @"(-(a++))");
        insta::assert_snapshot!(paren("!!x"), @"(!(!x))");
    }

    #[test]
    fn test_calls_index_and_member_access() {
        insta::assert_snapshot!(paren("foo.bar()"), @"((foo.bar)())");
        insta::assert_snapshot!(paren("f(a + b, c)[i]"), @"((f((a+b),c))[i])");
        insta::assert_snapshot!(paren("T{x}"), @"(T{x})");
        insta::assert_snapshot!(paren("f()"), @"(f())");
    }

    #[test]
    fn test_groups_and_literals() {
        insta::assert_snapshot!(paren("(1 + 2) * 3"), @"(((1+2))*3)");
        insta::assert_snapshot!(paren("[1, 2 + 3]"), @"[1,(2+3)]");
        insta::assert_snapshot!(paren("x"), @"x");
    }

    #[test]
    fn test_origins_track_copied_tokens() {
        let tokens = lexer::lex("a + b").unwrap();
        let p = parenthesize(&tokens, content_range(&tokens)).unwrap();
        assert_eq!(p.origins, vec![None, Some(0), Some(1), Some(2), None]);
        assert_eq!(p.original_range(TokenRange::new(0, 5)), TokenRange::new(0, 3));
    }

    #[test]
    fn test_errors() {
        let err = paren_err("1 + + 2");
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.kind, SyntaxErrorKind::MissingOperand);
        assert_eq!((syntax.line, syntax.col), (1, 5));

        assert_eq!(paren_err("a b").as_syntax().unwrap().kind, SyntaxErrorKind::OperandAfterOperand);
        assert_eq!(paren_err("a !b").as_syntax().unwrap().kind, SyntaxErrorKind::PrefixAfterOperand);
        assert_eq!(paren_err("f(a,)").as_syntax().unwrap().kind, SyntaxErrorKind::EmptyOperand);
        assert_eq!(paren_err("a <=> b <=> c").as_syntax().unwrap().kind, SyntaxErrorKind::NonAssociative);
        assert!(paren_err("(1 + 2").as_scope().is_some());
    }

    #[test]
    fn test_nesting_limit() {
        let tokens = lexer::lex("((((1))))").unwrap();
        let err = parenthesize_with(&tokens, content_range(&tokens), 3).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { limit: 3, .. }));
    }
}
