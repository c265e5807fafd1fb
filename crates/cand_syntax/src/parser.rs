//! Expression and program parser for the Cand language
//!
//! Turns a sanitized token range into an [`Ast`] by precedence climbing over the operation tables in
//! `cand_core::lang::operators`. Ranges containing postfix bracket constructs are first normalized by the
//! [`parenthesizer`](crate::parenthesizer) (see [`Normalization`]); either route yields the same tree.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use cand_syntax::{lexer, parser};
//! use cand_syntax::token_helpers::content_range;
//!
//! let tokens = lexer::lex("foo.bar() + 1").unwrap();
//! let parsed = parser::parse_expression(&tokens, content_range(&tokens)).unwrap();
//! assert_eq!(
//!     parsed.ast.to_sexpr(parsed.root, &tokens),
//!     "addition(function_call(member_access(foo, bar), arguments()), 1)"
//! );
//! ```

use crate::ast::{Ast, NodeId, NodeKind, TokenRange};
use crate::config::{Normalization, ParseConfig};
use crate::diagnostics::{ParseError, Production, ScopeError, SyntaxError, SyntaxErrorKind};
use crate::lexer::{self, Token};
use crate::parenthesizer::{self, Parenthesized};
use crate::scope::{self, Boundary, Scope};
use crate::simplify::simplify;
use crate::token_helpers::content_range;
use cand_core::lang::directives::{self, DirectiveId};
use cand_core::lang::operators::{self, Associativity, OperationId, POSTFIX_PRIORITY, PREFIX_PRIORITY};
use cand_core::lang::punctuation::{BracketKind, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/expr.rs");
include!("parser/statements.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
