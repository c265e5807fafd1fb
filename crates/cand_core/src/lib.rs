//! Provide the canonical language vocabulary for the Cand front end.
//!
//! This crate is intentionally small and dependency-free. It contains the registry tables that both the lexer and the
//! parser consult: operator spellings and their priority/associativity/fixity metadata, punctuation and bracket kinds,
//! the closed set of `#` directives, and the closed set of `@` special objects.
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global state, and no syntax-tree types.
//! - Tables are `const` data indexed by the ordinal of their id enum, so lookups by id are direct indexing. Lookups by
//!   spelling (`from_str`) scan the table linearly.

pub mod lang;
