//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the lexer/parser: the three bracket
//! pairs, statement/argument separators, and the ellipsis marker.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source text.
//! - The three bracket pairs are interchangeable for nesting; [`BracketKind`] ties each opener to its closer.
//!
//! ## Examples
//! ```rust
//! use cand_core::lang::punctuation::{self, BracketKind, PunctuationId};
//!
//! assert_eq!(punctuation::from_str(";"), Some(PunctuationId::Semicolon));
//! assert_eq!(BracketKind::from_open(PunctuationId::LBrace), Some(BracketKind::Brace));
//! assert_eq!(BracketKind::Brace.close(), PunctuationId::RBrace);
//! ```

use super::registry::{Since, Stability};

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,` and `;`.
    Separator,
    /// Misc markers like `...`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Semicolon,
    Colon,

    // Markers
    Ellipsis,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all punctuation tokens, ordered by [`PunctuationId`] ordinal.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Ellipsis, "...", PunctuationCategory::Marker),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
];

/// One of the three bracket pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketKind {
    /// `(` `)`: grouping and call arguments.
    Paren,
    /// `[` `]`: list literals and index arguments.
    Bracket,
    /// `{` `}`: initializer lists and type arguments.
    Brace,
}

impl BracketKind {
    /// All bracket kinds, in ordinal order.
    pub const ALL: [BracketKind; 3] = [BracketKind::Paren, BracketKind::Bracket, BracketKind::Brace];

    /// Opening punctuation of this pair.
    pub const fn open(self) -> PunctuationId {
        match self {
            BracketKind::Paren => PunctuationId::LParen,
            BracketKind::Bracket => PunctuationId::LBracket,
            BracketKind::Brace => PunctuationId::LBrace,
        }
    }

    /// Closing punctuation of this pair.
    pub const fn close(self) -> PunctuationId {
        match self {
            BracketKind::Paren => PunctuationId::RParen,
            BracketKind::Bracket => PunctuationId::RBracket,
            BracketKind::Brace => PunctuationId::RBrace,
        }
    }

    /// Bracket kind opened by `id`, if any.
    pub const fn from_open(id: PunctuationId) -> Option<BracketKind> {
        match id {
            PunctuationId::LParen => Some(BracketKind::Paren),
            PunctuationId::LBracket => Some(BracketKind::Bracket),
            PunctuationId::LBrace => Some(BracketKind::Brace),
            _ => None,
        }
    }

    /// Bracket kind closed by `id`, if any.
    pub const fn from_close(id: PunctuationId) -> Option<BracketKind> {
        match id {
            PunctuationId::RParen => Some(BracketKind::Paren),
            PunctuationId::RBracket => Some(BracketKind::Bracket),
            PunctuationId::RBrace => Some(BracketKind::Brace),
            _ => None,
        }
    }

    /// Short human-readable name used in diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            BracketKind::Paren => "parenthesis",
            BracketKind::Bracket => "bracket",
            BracketKind::Brace => "brace",
        }
    }
}

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If [`PUNCTUATION`] is out of ordinal order (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    let info = &PUNCTUATION[id as usize];
    assert_eq!(info.id, id, "INVARIANT: PUNCTUATION is ordered by PunctuationId");
    info
}

/// Resolve a punctuation spelling to its identifier.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}
