//! Shareable metadata for `cand_core::lang` registries.
//!
//! The `cand_core::lang` module is a set of **registry-first** vocabularies. This submodule provides the small,
//! dependency-free metadata types that are reused across all registries.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives in the lexer/parser.

use std::fmt;

/// Identify the language version a vocabulary item is available since, as `(major, minor)`.
///
/// ## Examples
/// ```rust
/// use cand_core::lang::registry::Since;
///
/// assert_eq!(Since(0, 1).to_string(), "0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Since(pub u8, pub u8);

impl fmt::Display for Since {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

/// Describe the lifecycle status of a language vocabulary item.
///
/// ## Notes
/// - This is intended for docs/tooling (e.g. to warn on deprecated spellings), not for feature-gating by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}
