//! Property-based tests for the Cand front end
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use cand::ast::TokenRange;
use cand::lexer::{self, Token, TokenKind};
use cand::token_helpers::{content_range, join_literals};
use cand::{Normalization, ParseConfig, parenthesizer, parser, scope};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,5}"
}

/// Whitespace-free nested groups of identifiers, e.g. `(a,[b,{c}],d)`.
fn group_strategy() -> impl Strategy<Value = String> {
    ident_strategy().prop_recursive(4, 32, 4, |inner| {
        (prop::collection::vec(inner, 0..4), 0usize..3).prop_map(|(items, kind)| {
            let (open, close) = [("(", ")"), ("[", "]"), ("{", "}")][kind];
            format!("{open}{}{close}", items.join(","))
        })
    })
}

fn binary_op() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "=", "+=", "||", "&&", "|", "^", "&", "==", "!=", "<", ">=", "<<", "+", "-", "*", "/", "%",
    ])
}

fn prefix_op() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["-", "!", "~"])
}

/// Syntactically valid expressions with space-separated tokens.
fn expr_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![ident_strategy(), "[0-9]{1,3}"];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (inner.clone(), binary_op(), inner.clone()).prop_map(|(a, op, b)| format!("{a} {op} {b}")),
            (prefix_op(), inner.clone()).prop_map(|(op, a)| format!("{op} {a}")),
            inner.clone().prop_map(|a| format!("( {a} )")),
            (ident_strategy(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(f, args)| format!("{f} ( {} )", args.join(" , "))),
            (ident_strategy(), inner.clone()).prop_map(|(a, i)| format!("{a} [ {i} ]")),
            prop::collection::vec(inner.clone(), 0..3).prop_map(|items| format!("[ {} ]", items.join(" , "))),
            (ident_strategy(), ident_strategy()).prop_map(|(a, b)| format!("{a} . {b}")),
        ]
    })
}

fn shape(tokens: &[Token], range: TokenRange, normalization: Normalization) -> String {
    let config = ParseConfig::default().with_normalization(normalization);
    let parsed = parser::parse_expression_with(tokens, range, &config).expect("parse failed");
    parsed.ast.to_sexpr(parsed.root, tokens)
}

/// Reference matcher: where the `(` at index 0 closes, if it does.
fn reference_close(source: &str) -> Option<usize> {
    let mut stack = Vec::new();
    for (i, c) in source.chars().enumerate().skip(1) {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match stack.last() {
                    Some('(') => ')',
                    Some('[') => ']',
                    Some('{') => '}',
                    _ => ')',
                };
                if c != expected {
                    return None;
                }
                if stack.pop().is_none() {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Property: the literals strictly inside a resolved group reproduce the original text
    #[test]
    fn bracket_contents_round_trip(group in group_strategy()) {
        let source = format!("({group})");
        let tokens = lexer::lex(&source).expect("Lex failed");
        let range = content_range(&tokens);
        let found = scope::find_paren_scope(&tokens, range).expect("group should balance");
        prop_assert_eq!(found.end, range.end);
        prop_assert_eq!(join_literals(&tokens, found.contained()), group);
    }

    /// Property: the resolver succeeds exactly where a stack matcher finds the closing `)`
    #[test]
    fn resolver_agrees_with_stack_matcher(rest in "[()\\[\\]{}]{0,12}") {
        let source = format!("({rest}");
        let tokens = lexer::lex(&source).expect("Lex failed");
        let result = scope::find_paren_scope(&tokens, content_range(&tokens));
        match reference_close(&source) {
            Some(end) => prop_assert_eq!(result.map(|s| s.end).ok(), Some(end)),
            None => prop_assert!(result.is_err()),
        }
    }

    /// Property: parenthesizing twice parses to the same tree as parenthesizing once,
    /// and both match parsing the original directly
    #[test]
    fn parenthesizer_is_idempotent(source in expr_strategy()) {
        let tokens = lexer::lex(&source).expect("Lex failed");
        let once = parenthesizer::parenthesize(&tokens, content_range(&tokens)).expect("parenthesize failed");
        let twice = parenthesizer::parenthesize(&once.tokens, TokenRange::new(0, once.tokens.len()))
            .expect("second parenthesize failed");

        let direct = shape(&tokens, content_range(&tokens), Normalization::Never);
        let normalized = shape(&tokens, content_range(&tokens), Normalization::Always);
        let from_once = shape(&once.tokens, TokenRange::new(0, once.tokens.len()), Normalization::Never);
        let from_twice = shape(&twice.tokens, TokenRange::new(0, twice.tokens.len()), Normalization::Never);
        prop_assert_eq!(&direct, &normalized);
        prop_assert_eq!(&direct, &from_once);
        prop_assert_eq!(&from_once, &from_twice);
    }

    /// Property: identifiers survive lexing unchanged
    #[test]
    fn identifiers_survive_lexing(ident in ident_strategy()) {
        let source = format!("x = {ident};");
        let tokens = lexer::lex(&source).expect("Lex failed");
        prop_assert_eq!(tokens.len(), 5);
        prop_assert_eq!(tokens[2].kind, TokenKind::Ident);
        prop_assert_eq!(&tokens[2].literal, &ident);
    }
}
