//! Cand language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: operators, punctuation, directives and special
//! objects.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer and parser. Instead, callers work with
//! **stable IDs** (e.g. `OperatorId`, `DirectiveId`) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics, docs,
//!   precedence decisions).
//!
//! ## Examples
//! ```rust
//! use cand_core::lang::directives::{self, DirectiveId};
//!
//! assert_eq!(directives::from_str("var"), Some(DirectiveId::Var));
//! assert_eq!(directives::as_str(DirectiveId::Var), "var");
//! ```
//!
//! ## See also
//! - `cargo run -p cand_core --bin generate_lang_reference` to generate Markdown reference tables.

pub mod directives;
pub mod operators;
pub mod punctuation;
pub mod registry;
pub mod special_objects;
