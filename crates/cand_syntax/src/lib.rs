//! Syntax front end for the Cand language: lexer, scope resolver, parenthesizer, expression parser, AST.
//!
//! Source text flows through [`lexer::lex`] into a flat token vector. Every later stage addresses that vector by
//! [`ast::TokenRange`]: the [`scope`] resolver carves out statements and bracketed groups, the [`parenthesizer`]
//! rewrites call-heavy ranges into fully parenthesized form, and the [`parser`] builds an [`ast::Ast`].
//!
//! ## Notes
//! - This crate is “syntax-only”: beyond literal-value extraction it does no semantic analysis.
//! - Vocabulary identity (directives/operators/punctuation/special objects) comes from `cand_core::lang` registries.
//!
//! ## Examples
//! ```rust,no_run
//! use cand_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("a = 1; #var x = 2; a + x;").unwrap();
//! let program = parser::parse_program(&tokens).unwrap();
//! assert_eq!(program.statements.len(), 3);
//! assert_eq!(program.ast.children(program.root).len(), 2);
//! ```
//!
//! ## See also
//! - `cand_core::lang` for registry-backed language vocabulary.

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod parenthesizer;
pub mod parser;
pub mod scope;
pub mod simplify;
pub mod token_helpers;
