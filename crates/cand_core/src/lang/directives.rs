//! Define the directive vocabulary for the Cand language.
//!
//! Directives are the `#`-introduced keywords that open declarations and control-flow statements (`#var`, `#func`,
//! `#if`, ...). This module is the single source of truth for them: a stable identifier ([`DirectiveId`]) plus a const
//! metadata table ([`DIRECTIVES`]).
//!
//! ## Notes
//! - Spellings are stored **without** the `#` marker.
//! - The set is closed: the lexer rejects `#` followed by anything not in [`DIRECTIVES`].
//! - Lookup via [`from_str`] is **case-sensitive**.
//!
//! ## Examples
//! ```rust
//! use cand_core::lang::directives::{self, DirectiveCategory, DirectiveId};
//!
//! assert_eq!(directives::from_str("func"), Some(DirectiveId::Func));
//! assert_eq!(directives::category(DirectiveId::While), DirectiveCategory::ControlFlow);
//! assert_eq!(directives::from_str("function"), None);
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every directive keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveId {
    // Program structure / preprocessor
    Enter,
    Start,
    Include,
    Macro,
    Enddef,

    // Declarations
    Var,
    Const,
    Type,
    Func,
    Class,

    // Control flow
    If,
    Elif,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,

    // Misc
    Print,
    Namespace,
    Use,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveCategory {
    Program,
    Preprocessor,
    Declaration,
    ControlFlow,
    Namespace,
    Io,
}

/// Metadata for a directive.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveInfo {
    pub id: DirectiveId,
    pub canonical: &'static str,
    pub category: DirectiveCategory,
    pub description: &'static str,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all directives, ordered by [`DirectiveId`] ordinal.
pub const DIRECTIVES: &[DirectiveInfo] = &[
    info(DirectiveId::Enter, "enter", DirectiveCategory::Program, "Program entry block."),
    info(DirectiveId::Start, "start", DirectiveCategory::Program, "Start of the main program body."),
    info(DirectiveId::Include, "include", DirectiveCategory::Preprocessor, "Splice another source file."),
    info(DirectiveId::Macro, "macro", DirectiveCategory::Preprocessor, "Begin a token-substitution macro."),
    info(DirectiveId::Enddef, "enddef", DirectiveCategory::Preprocessor, "End a macro definition."),
    info(DirectiveId::Var, "var", DirectiveCategory::Declaration, "Declare a variable."),
    info(DirectiveId::Const, "const", DirectiveCategory::Declaration, "Declare a constant."),
    info(DirectiveId::Type, "type", DirectiveCategory::Declaration, "Declare a type alias."),
    info(DirectiveId::Func, "func", DirectiveCategory::Declaration, "Declare a function."),
    info(DirectiveId::Class, "class", DirectiveCategory::Declaration, "Declare a class."),
    info(DirectiveId::If, "if", DirectiveCategory::ControlFlow, "Conditional branch."),
    info(DirectiveId::Elif, "elif", DirectiveCategory::ControlFlow, "Chained conditional branch."),
    info(DirectiveId::Else, "else", DirectiveCategory::ControlFlow, "Fallback branch."),
    info(DirectiveId::While, "while", DirectiveCategory::ControlFlow, "Pre-tested loop."),
    info(DirectiveId::For, "for", DirectiveCategory::ControlFlow, "Counted loop with init/condition/step."),
    info(DirectiveId::Return, "return", DirectiveCategory::ControlFlow, "Return from a function."),
    info(DirectiveId::Break, "break", DirectiveCategory::ControlFlow, "Leave the innermost loop."),
    info(DirectiveId::Continue, "continue", DirectiveCategory::ControlFlow, "Skip to the next loop iteration."),
    info(DirectiveId::Print, "print", DirectiveCategory::Io, "Print a value."),
    info(DirectiveId::Namespace, "namespace", DirectiveCategory::Namespace, "Open a named scope."),
    info(DirectiveId::Use, "use", DirectiveCategory::Namespace, "Bring names from a namespace into scope."),
];

/// Canonical spelling (without the `#` marker).
pub fn as_str(id: DirectiveId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: DirectiveId) -> DirectiveCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If [`DIRECTIVES`] is out of ordinal order (this indicates a programming error).
pub fn info_for(id: DirectiveId) -> &'static DirectiveInfo {
    let info = &DIRECTIVES[id as usize];
    assert_eq!(info.id, id, "INVARIANT: DIRECTIVES is ordered by DirectiveId");
    info
}

/// Lookup by spelling (without the `#` marker).
pub fn from_str(s: &str) -> Option<DirectiveId> {
    DIRECTIVES.iter().find(|d| d.canonical == s).map(|d| d.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: DirectiveId,
    canonical: &'static str,
    category: DirectiveCategory,
    description: &'static str,
) -> DirectiveInfo {
    DirectiveInfo {
        id,
        canonical,
        category,
        description,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}
