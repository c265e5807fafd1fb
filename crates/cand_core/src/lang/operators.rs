//! Operator vocabulary.
//!
//! This module defines two related registries:
//! - [`OPERATORS`]: the canonical operator **spellings** (`+`, `<<=`, `.`) as the lexer sees them.
//! - [`OPERATIONS`]: the **operations** an operator spelling can denote depending on its position, together with the
//!   priority, associativity, fixity and arity the parser and the parenthesizer need.
//!
//! One spelling may denote several operations: `-` is `subtraction` between two operands and `unary_minus` in
//! operand position, `++` is a prefix or a postfix increment.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `priority` is a relative ordering where higher binds tighter.
//! - Both tables are ordered by the ordinal of their id enum; [`info_for`] and [`operation_info`] index directly.
//! - Bracketed postfix constructs (call, index, type arguments) are operations without an operator spelling: the
//!   parser recognizes them from an opening bracket in operator position.
//!
//! ## Examples
//! ```rust
//! use cand_core::lang::operators::{self, OperationId, OperatorId};
//!
//! assert_eq!(operators::from_str("+"), Some(OperatorId::Plus));
//! assert_eq!(operators::binary_operation(OperatorId::Minus), Some(OperationId::Subtraction));
//! assert_eq!(operators::prefix_operation(OperatorId::Minus), Some(OperationId::UnaryMinus));
//! assert!(operators::operation_info(OperationId::Multiplication).priority
//!     > operators::operation_info(OperationId::Addition).priority);
//! ```

use super::registry::Since;

/// Define how operations of equal priority associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define where an operation sits relative to its operand(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Prefix,
    Binary,
    Postfix,
}

/// Number of child nodes an operation owns in the syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationArity {
    Unary,
    Binary,
}

/// Broad grouping of operator spellings, for docs and for the lexer's symbol-run classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCategory {
    Assignment,
    Logical,
    Bitwise,
    Comparison,
    Arithmetic,
    /// Member access `.`; lexed by its own classifier so that `...` stays punctuation.
    Access,
}

/// Stable identifier for every operator spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,

    // Logical
    OrOr,
    AndAnd,
    Bang,

    // Bitwise
    Pipe,
    Caret,
    Amp,
    Tilde,
    Shl,
    Shr,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Spaceship,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,

    // Access
    Dot,
}

/// Stable identifier for every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationId {
    // Assignment family
    Assignment,
    AdditionAssignment,
    SubtractionAssignment,
    MultiplicationAssignment,
    DivisionAssignment,
    RemainderAssignment,
    BitwiseAndAssignment,
    BitwiseOrAssignment,
    BitwiseXorAssignment,
    LeftShiftAssignment,
    RightShiftAssignment,

    // Logical / bitwise
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,

    // Comparison
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    ThreeWayComparison,

    // Arithmetic
    LeftShift,
    RightShift,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,

    // Prefix
    UnaryMinus,
    LogicalNot,
    BitwiseNot,
    PrefixIncrement,
    PrefixDecrement,

    // Postfix
    PostfixIncrement,
    PostfixDecrement,
    FunctionCall,
    IndexOperator,
    TypeCall,

    // Access
    MemberAccess,
}

/// Metadata for an operator spelling.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub category: OperatorCategory,
    pub prefix: Option<OperationId>,
    pub binary: Option<OperationId>,
    pub postfix: Option<OperationId>,
    pub since: Since,
}

/// Metadata for an operation.
///
/// ## Notes
/// - `name` is the snake_case node name used in s-expression dumps and diagnostics.
/// - `symbol` is the operator spelling, or the bracket pair for bracketed postfix constructs.
#[derive(Debug, Clone, Copy)]
pub struct OperationInfo {
    pub id: OperationId,
    pub name: &'static str,
    pub symbol: &'static str,
    pub priority: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub arity: OperationArity,
}

/// Priority of the assignment family (lowest).
pub const ASSIGNMENT_PRIORITY: u8 = 2;
/// Priority shared by every prefix operation.
pub const PREFIX_PRIORITY: u8 = 13;
/// Priority shared by every postfix operation, including bracketed calls.
pub const POSTFIX_PRIORITY: u8 = 14;
/// Priority of member access (highest).
pub const MEMBER_ACCESS_PRIORITY: u8 = 15;

/// Registry of all operator spellings, ordered by [`OperatorId`] ordinal.
pub const OPERATORS: &[OperatorInfo] = &[
    // Assignment
    binary(OperatorId::Eq, "=", OperatorCategory::Assignment, OperationId::Assignment),
    binary(OperatorId::PlusEq, "+=", OperatorCategory::Assignment, OperationId::AdditionAssignment),
    binary(OperatorId::MinusEq, "-=", OperatorCategory::Assignment, OperationId::SubtractionAssignment),
    binary(OperatorId::StarEq, "*=", OperatorCategory::Assignment, OperationId::MultiplicationAssignment),
    binary(OperatorId::SlashEq, "/=", OperatorCategory::Assignment, OperationId::DivisionAssignment),
    binary(OperatorId::PercentEq, "%=", OperatorCategory::Assignment, OperationId::RemainderAssignment),
    binary(OperatorId::AmpEq, "&=", OperatorCategory::Assignment, OperationId::BitwiseAndAssignment),
    binary(OperatorId::PipeEq, "|=", OperatorCategory::Assignment, OperationId::BitwiseOrAssignment),
    binary(OperatorId::CaretEq, "^=", OperatorCategory::Assignment, OperationId::BitwiseXorAssignment),
    binary(OperatorId::ShlEq, "<<=", OperatorCategory::Assignment, OperationId::LeftShiftAssignment),
    binary(OperatorId::ShrEq, ">>=", OperatorCategory::Assignment, OperationId::RightShiftAssignment),
    // Logical
    binary(OperatorId::OrOr, "||", OperatorCategory::Logical, OperationId::LogicalOr),
    binary(OperatorId::AndAnd, "&&", OperatorCategory::Logical, OperationId::LogicalAnd),
    prefix(OperatorId::Bang, "!", OperatorCategory::Logical, OperationId::LogicalNot),
    // Bitwise
    binary(OperatorId::Pipe, "|", OperatorCategory::Bitwise, OperationId::BitwiseOr),
    binary(OperatorId::Caret, "^", OperatorCategory::Bitwise, OperationId::BitwiseXor),
    binary(OperatorId::Amp, "&", OperatorCategory::Bitwise, OperationId::BitwiseAnd),
    prefix(OperatorId::Tilde, "~", OperatorCategory::Bitwise, OperationId::BitwiseNot),
    binary(OperatorId::Shl, "<<", OperatorCategory::Bitwise, OperationId::LeftShift),
    binary(OperatorId::Shr, ">>", OperatorCategory::Bitwise, OperationId::RightShift),
    // Comparison
    binary(OperatorId::EqEq, "==", OperatorCategory::Comparison, OperationId::Equal),
    binary(OperatorId::NotEq, "!=", OperatorCategory::Comparison, OperationId::NotEqual),
    binary(OperatorId::Lt, "<", OperatorCategory::Comparison, OperationId::Less),
    binary(OperatorId::LtEq, "<=", OperatorCategory::Comparison, OperationId::LessEqual),
    binary(OperatorId::Gt, ">", OperatorCategory::Comparison, OperationId::Greater),
    binary(OperatorId::GtEq, ">=", OperatorCategory::Comparison, OperationId::GreaterEqual),
    binary(OperatorId::Spaceship, "<=>", OperatorCategory::Comparison, OperationId::ThreeWayComparison),
    // Arithmetic
    binary(OperatorId::Plus, "+", OperatorCategory::Arithmetic, OperationId::Addition),
    OperatorInfo {
        id: OperatorId::Minus,
        spelling: "-",
        category: OperatorCategory::Arithmetic,
        prefix: Some(OperationId::UnaryMinus),
        binary: Some(OperationId::Subtraction),
        postfix: None,
        since: Since(0, 1),
    },
    binary(OperatorId::Star, "*", OperatorCategory::Arithmetic, OperationId::Multiplication),
    binary(OperatorId::Slash, "/", OperatorCategory::Arithmetic, OperationId::Division),
    binary(OperatorId::Percent, "%", OperatorCategory::Arithmetic, OperationId::Remainder),
    OperatorInfo {
        id: OperatorId::PlusPlus,
        spelling: "++",
        category: OperatorCategory::Arithmetic,
        prefix: Some(OperationId::PrefixIncrement),
        binary: None,
        postfix: Some(OperationId::PostfixIncrement),
        since: Since(0, 1),
    },
    OperatorInfo {
        id: OperatorId::MinusMinus,
        spelling: "--",
        category: OperatorCategory::Arithmetic,
        prefix: Some(OperationId::PrefixDecrement),
        binary: None,
        postfix: Some(OperationId::PostfixDecrement),
        since: Since(0, 1),
    },
    // Access
    binary(OperatorId::Dot, ".", OperatorCategory::Access, OperationId::MemberAccess),
];

/// Registry of all operations, ordered by [`OperationId`] ordinal.
pub const OPERATIONS: &[OperationInfo] = &[
    // Assignment family: lowest priority, right-associative (`a = b = c` is `a = (b = c)`).
    infix(OperationId::Assignment, "assignment", "=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::AdditionAssignment, "addition_assignment", "+=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::SubtractionAssignment, "subtraction_assignment", "-=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::MultiplicationAssignment, "multiplication_assignment", "*=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::DivisionAssignment, "division_assignment", "/=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::RemainderAssignment, "remainder_assignment", "%=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::BitwiseAndAssignment, "bitwise_and_assignment", "&=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::BitwiseOrAssignment, "bitwise_or_assignment", "|=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::BitwiseXorAssignment, "bitwise_xor_assignment", "^=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::LeftShiftAssignment, "left_shift_assignment", "<<=", ASSIGNMENT_PRIORITY, Associativity::Right),
    infix(OperationId::RightShiftAssignment, "right_shift_assignment", ">>=", ASSIGNMENT_PRIORITY, Associativity::Right),
    // Logical below bitwise (C ranking).
    infix(OperationId::LogicalOr, "logical_or", "||", 3, Associativity::Left),
    infix(OperationId::LogicalAnd, "logical_and", "&&", 4, Associativity::Left),
    infix(OperationId::BitwiseOr, "bitwise_or", "|", 5, Associativity::Left),
    infix(OperationId::BitwiseXor, "bitwise_xor", "^", 6, Associativity::Left),
    infix(OperationId::BitwiseAnd, "bitwise_and", "&", 7, Associativity::Left),
    // Comparison
    infix(OperationId::Equal, "equal", "==", 8, Associativity::Left),
    infix(OperationId::NotEqual, "not_equal", "!=", 8, Associativity::Left),
    infix(OperationId::Less, "less", "<", 9, Associativity::Left),
    infix(OperationId::LessEqual, "less_equal", "<=", 9, Associativity::Left),
    infix(OperationId::Greater, "greater", ">", 9, Associativity::Left),
    infix(OperationId::GreaterEqual, "greater_equal", ">=", 9, Associativity::Left),
    infix(OperationId::ThreeWayComparison, "three_way_comparison", "<=>", 9, Associativity::None),
    // Arithmetic
    infix(OperationId::LeftShift, "left_shift", "<<", 10, Associativity::Left),
    infix(OperationId::RightShift, "right_shift", ">>", 10, Associativity::Left),
    infix(OperationId::Addition, "addition", "+", 11, Associativity::Left),
    infix(OperationId::Subtraction, "subtraction", "-", 11, Associativity::Left),
    infix(OperationId::Multiplication, "multiplication", "*", 12, Associativity::Left),
    infix(OperationId::Division, "division", "/", 12, Associativity::Left),
    infix(OperationId::Remainder, "remainder", "%", 12, Associativity::Left),
    // Prefix
    unary(OperationId::UnaryMinus, "unary_minus", "-", Fixity::Prefix),
    unary(OperationId::LogicalNot, "logical_not", "!", Fixity::Prefix),
    unary(OperationId::BitwiseNot, "bitwise_not", "~", Fixity::Prefix),
    unary(OperationId::PrefixIncrement, "prefix_increment", "++", Fixity::Prefix),
    unary(OperationId::PrefixDecrement, "prefix_decrement", "--", Fixity::Prefix),
    // Postfix
    unary(OperationId::PostfixIncrement, "postfix_increment", "++", Fixity::Postfix),
    unary(OperationId::PostfixDecrement, "postfix_decrement", "--", Fixity::Postfix),
    call(OperationId::FunctionCall, "function_call", "()"),
    call(OperationId::IndexOperator, "index_operator", "[]"),
    call(OperationId::TypeCall, "type_call", "{}"),
    // Access
    infix(OperationId::MemberAccess, "member_access", ".", MEMBER_ACCESS_PRIORITY, Associativity::Left),
];

/// Return the full metadata entry for an operator spelling.
///
/// ## Panics
/// - If [`OPERATORS`] is out of ordinal order (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    let info = &OPERATORS[id as usize];
    assert_eq!(info.id, id, "INVARIANT: OPERATORS is ordered by OperatorId");
    info
}

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the full metadata entry for an operation.
///
/// ## Panics
/// - If [`OPERATIONS`] is out of ordinal order (this indicates a programming error).
pub fn operation_info(id: OperationId) -> &'static OperationInfo {
    let info = &OPERATIONS[id as usize];
    assert_eq!(info.id, id, "INVARIANT: OPERATIONS is ordered by OperationId");
    info
}

/// Resolve an operator spelling to its identifier.
///
/// ## Notes
/// - Matching is **case-sensitive** and exact; use [`longest_match`] when scanning source text.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Operation denoted by `id` in operand position, if it can start an operand.
pub fn prefix_operation(id: OperatorId) -> Option<OperationId> {
    info_for(id).prefix
}

/// Operation denoted by `id` between two operands.
pub fn binary_operation(id: OperatorId) -> Option<OperationId> {
    info_for(id).binary
}

/// Operation denoted by `id` directly after a completed operand.
pub fn postfix_operation(id: OperatorId) -> Option<OperationId> {
    info_for(id).postfix
}

/// Find the longest symbol operator spelled at the start of `rest`.
///
/// ## Returns
/// - `Some((id, byte_len))` for the longest matching spelling (`<<=` wins over `<<` over `<`).
/// - `None` if `rest` does not start with a symbol operator.
///
/// ## Notes
/// - Member access `.` is excluded; the lexer scans it together with `...`.
pub fn longest_match(rest: &str) -> Option<(OperatorId, usize)> {
    OPERATORS
        .iter()
        .filter(|o| o.category != OperatorCategory::Access)
        .filter(|o| rest.starts_with(o.spelling))
        .max_by_key(|o| o.spelling.len())
        .map(|o| (o.id, o.spelling.len()))
}

/// Return `true` if `c` can start a symbol operator.
pub fn is_symbol_start(c: char) -> bool {
    OPERATORS
        .iter()
        .filter(|o| o.category != OperatorCategory::Access)
        .any(|o| o.spelling.starts_with(c))
}

// --- helpers -----------------------------------------------------------------

const fn binary(id: OperatorId, spelling: &'static str, category: OperatorCategory, op: OperationId) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        category,
        prefix: None,
        binary: Some(op),
        postfix: None,
        since: Since(0, 1),
    }
}

const fn prefix(id: OperatorId, spelling: &'static str, category: OperatorCategory, op: OperationId) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        category,
        prefix: Some(op),
        binary: None,
        postfix: None,
        since: Since(0, 1),
    }
}

const fn infix(
    id: OperationId,
    name: &'static str,
    symbol: &'static str,
    priority: u8,
    associativity: Associativity,
) -> OperationInfo {
    OperationInfo {
        id,
        name,
        symbol,
        priority,
        associativity,
        fixity: Fixity::Binary,
        arity: OperationArity::Binary,
    }
}

const fn unary(id: OperationId, name: &'static str, symbol: &'static str, fixity: Fixity) -> OperationInfo {
    let (priority, associativity) = match fixity {
        Fixity::Prefix => (PREFIX_PRIORITY, Associativity::Right),
        _ => (POSTFIX_PRIORITY, Associativity::Left),
    };
    OperationInfo {
        id,
        name,
        symbol,
        priority,
        associativity,
        fixity,
        arity: OperationArity::Unary,
    }
}

/// Bracketed postfix construct: the callee plus one argument-list child.
const fn call(id: OperationId, name: &'static str, symbol: &'static str) -> OperationInfo {
    OperationInfo {
        id,
        name,
        symbol,
        priority: POSTFIX_PRIORITY,
        associativity: Associativity::Left,
        fixity: Fixity::Postfix,
        arity: OperationArity::Binary,
    }
}
