//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use crate::ast::TokenRange;
use crate::lexer::{Token, TokenKind};
use cand_core::lang::directives::DirectiveId;
use cand_core::lang::operators::OperatorId;
use cand_core::lang::punctuation::{BracketKind, PunctuationId};

impl TokenKind {
    /// Return the directive id, if this is a directive token.
    pub fn directive_id(&self) -> Option<DirectiveId> {
        match self {
            TokenKind::Directive(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given directive.
    pub fn is_directive(&self, id: DirectiveId) -> bool {
        matches!(self, TokenKind::Directive(d) if *d == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Bracket kind opened by this token.
    pub fn opens(&self) -> Option<BracketKind> {
        self.punctuation_id().and_then(BracketKind::from_open)
    }

    /// Bracket kind closed by this token.
    pub fn closes(&self) -> Option<BracketKind> {
        self.punctuation_id().and_then(BracketKind::from_close)
    }

    /// Whitespace, newlines and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Tokens that form a complete operand on their own (literals, identifiers, special objects).
    pub fn is_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::SpecialObject(_)
                | TokenKind::Number
                | TokenKind::Unsigned
                | TokenKind::Bit
                | TokenKind::Octet
                | TokenKind::Real
                | TokenKind::String
        )
    }
}

impl Token {
    /// Return the directive id, if this is a directive token.
    pub fn directive_id(&self) -> Option<DirectiveId> {
        self.kind.directive_id()
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        self.kind.is_punctuation(id)
    }

    pub fn opens(&self) -> Option<BracketKind> {
        self.kind.opens()
    }

    pub fn closes(&self) -> Option<BracketKind> {
        self.kind.closes()
    }

    pub fn is_operand(&self) -> bool {
        self.kind.is_operand()
    }
}

/// Range covering every token except a trailing `Eof`.
pub fn content_range(tokens: &[Token]) -> TokenRange {
    let end = match tokens.last() {
        Some(t) if t.kind == TokenKind::Eof => tokens.len() - 1,
        _ => tokens.len(),
    };
    TokenRange::new(0, end)
}

/// Concatenate the literals of `tokens[range]`.
pub fn join_literals(tokens: &[Token], range: TokenRange) -> String {
    tokens[range.begin..range.end].iter().map(|t| t.literal.as_str()).collect()
}
