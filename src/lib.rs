#![forbid(unsafe_code)]
//! Cand language front end
//!
//! This crate bundles the `cand` command-line tool with re-exports of the syntax front end: the lexer, the scope
//! resolver, the parenthesizer and the expression parser from `cand_syntax`, and the vocabulary registries from
//! `cand_core`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: If a panic represents a front-end bug (logic error), use `.expect("INVARIANT: reason")` or
//!   an `assert!` with an `INVARIANT:` message.

pub mod cli;
pub mod version;

pub use cand_core::lang;
pub use cand_syntax::{ast, config, diagnostics, lexer, parenthesizer, parser, scope, simplify, token_helpers};

pub use cand_syntax::config::{Normalization, ParseConfig};
pub use cand_syntax::diagnostics::ParseError;
