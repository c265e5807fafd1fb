//! Abstract Syntax Tree for Cand expressions
//!
//! The tree lives in an arena ([`Ast`]) addressed by [`NodeId`]. Every node owns an ordered list of children and keeps
//! a non-owning parent link, so passes can walk both down (children) and up ([`Ast::find_ancestor`]).
//!
//! Nodes do not copy source text. Each node records the [`TokenRange`] it spans in the token vector it was parsed
//! from; text is recovered on demand with [`Ast::literal`] or [`Ast::source_text`].
//!
//! ## Examples
//!
//! ```rust
//! use cand_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("1 + 2 * 3").unwrap();
//! let parsed = parser::parse_expression(&tokens, cand_syntax::token_helpers::content_range(&tokens)).unwrap();
//! assert_eq!(parsed.ast.to_sexpr(parsed.root, &tokens), "addition(1, multiplication(2, 3))");
//! ```

use std::fmt;

use cand_core::lang::operators::{self, OperationArity, OperationId};
use cand_core::lang::special_objects::SpecialObjectId;

use crate::diagnostics::{LiteralError, Site};
use crate::lexer::strings;
use crate::lexer::{Token, TokenKind};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Half-open range of token indices `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TokenRange {
    pub begin: usize,
    pub end: usize,
}

impl TokenRange {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }

    /// `true` if `other` lies within `self`.
    pub fn contains(&self, other: TokenRange) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

/// Index of a node in its [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How many children a node kind owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Leaf,
    Unary,
    Binary,
    Variadic,
}

/// Kind of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // ========== Leaves ==========
    Identifier,
    SpecialObject(SpecialObjectId),
    Number,
    Unsigned,
    Bit,
    Octet,
    Real,
    String,

    // ========== Operations ==========
    Operation(OperationId),

    // ========== Compounds ==========
    /// `( .. )` after a callee.
    Arguments,
    /// `[ .. ]` after an indexed operand.
    IndexArguments,
    /// `{ .. }` after a type.
    TypeArguments,
    /// `[ .. ]` in operand position.
    ListLiteral,
    /// `{ .. }` in operand position.
    InitializerList,
    /// `( .. )` in operand position.
    Subexpression,
    /// One parsed value statement.
    Expression,
    Program,
}

impl NodeKind {
    /// Leaf kind for an operand token.
    pub fn from_token(kind: TokenKind) -> Option<NodeKind> {
        Some(match kind {
            TokenKind::Ident => NodeKind::Identifier,
            TokenKind::SpecialObject(id) => NodeKind::SpecialObject(id),
            TokenKind::Number => NodeKind::Number,
            TokenKind::Unsigned => NodeKind::Unsigned,
            TokenKind::Bit => NodeKind::Bit,
            TokenKind::Octet => NodeKind::Octet,
            TokenKind::Real => NodeKind::Real,
            TokenKind::String => NodeKind::String,
            _ => return None,
        })
    }

    pub fn arity(&self) -> Arity {
        match self {
            NodeKind::Identifier
            | NodeKind::SpecialObject(_)
            | NodeKind::Number
            | NodeKind::Unsigned
            | NodeKind::Bit
            | NodeKind::Octet
            | NodeKind::Real
            | NodeKind::String => Arity::Leaf,
            NodeKind::Operation(op) => match operators::operation_info(*op).arity {
                OperationArity::Unary => Arity::Unary,
                OperationArity::Binary => Arity::Binary,
            },
            NodeKind::Subexpression | NodeKind::Expression => Arity::Unary,
            NodeKind::Arguments
            | NodeKind::IndexArguments
            | NodeKind::TypeArguments
            | NodeKind::ListLiteral
            | NodeKind::InitializerList
            | NodeKind::Program => Arity::Variadic,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.arity() == Arity::Leaf
    }

    /// snake_case name used in s-expressions.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Identifier => "identifier",
            NodeKind::SpecialObject(_) => "special_object",
            NodeKind::Number => "number",
            NodeKind::Unsigned => "unsigned",
            NodeKind::Bit => "bit",
            NodeKind::Octet => "octet",
            NodeKind::Real => "real",
            NodeKind::String => "string",
            NodeKind::Operation(op) => operators::operation_info(*op).name,
            NodeKind::Arguments => "arguments",
            NodeKind::IndexArguments => "index_arguments",
            NodeKind::TypeArguments => "type_arguments",
            NodeKind::ListLiteral => "list_literal",
            NodeKind::InitializerList => "initializer_list",
            NodeKind::Subexpression => "subexpression",
            NodeKind::Expression => "expression",
            NodeKind::Program => "program",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: TokenRange,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// Decoded value of a literal leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Unsigned(u64),
    Bit(bool),
    Octet(u8),
    Real(f64),
    Str(String),
}

/// A structural invariant that does not hold for a subtree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("node {node:?} ({kind}): {message}")]
pub struct InvariantViolation {
    pub node: NodeId,
    pub kind: NodeKind,
    pub message: String,
}

/// Arena holding every node of one parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever allocated, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node with no children.
    pub fn new_node(&mut self, kind: NodeKind, range: TokenRange) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            range,
            children: Vec::new(),
            parent: None,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn range(&self, id: NodeId) -> TokenRange {
        self.nodes[id.0].range
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Append `child` to `parent` and set its parent link.
    ///
    /// ## Panics
    /// - If `child` is already attached (this indicates a programming error).
    pub fn push_back(&mut self, parent: NodeId, child: NodeId) {
        self.attach(parent, child);
        self.nodes[parent.0].children.push(child);
    }

    /// Prepend `child` to `parent` and set its parent link.
    pub fn push_front(&mut self, parent: NodeId, child: NodeId) {
        self.attach(parent, child);
        self.nodes[parent.0].children.insert(0, child);
    }

    /// Detach and return the last child of `parent`.
    pub fn pop_back(&mut self, parent: NodeId) -> Option<NodeId> {
        let child = self.nodes[parent.0].children.pop()?;
        self.nodes[child.0].parent = None;
        Some(child)
    }

    /// Detach and return the first child of `parent`.
    pub fn pop_front(&mut self, parent: NodeId) -> Option<NodeId> {
        if self.nodes[parent.0].children.is_empty() {
            return None;
        }
        let child = self.nodes[parent.0].children.remove(0);
        self.nodes[child.0].parent = None;
        Some(child)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.nodes[child.0].parent.is_none(),
            "INVARIANT: node {child:?} is already attached"
        );
        self.nodes[child.0].parent = Some(parent);
    }

    /// Re-type a node in place; children and parent are preserved.
    pub fn morph(&mut self, id: NodeId, kind: NodeKind, range: TokenRange) {
        let node = &mut self.nodes[id.0];
        node.kind = kind;
        node.range = range;
    }

    /// Nearest proper ancestor of `id` with the given kind.
    pub fn find_ancestor(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if self.kind(p) == kind {
                return Some(p);
            }
            current = self.parent(p);
        }
        None
    }

    /// Concatenation of the literals of every token the node covers.
    pub fn literal(&self, id: NodeId, tokens: &[Token]) -> String {
        crate::token_helpers::join_literals(tokens, self.range(id))
    }

    /// Exact source slice covered by the node, trivia included.
    pub fn source_text<'s>(&self, id: NodeId, tokens: &[Token], source: &'s str) -> &'s str {
        let range = self.range(id);
        if range.is_empty() {
            return "";
        }
        let start = tokens[range.begin].span.start;
        let end = tokens[range.end - 1].span.end;
        &source[start..end]
    }

    /// Render the subtree as an s-expression: `addition(1, multiplication(2, 3))`.
    ///
    /// Leaves print their literal text.
    pub fn to_sexpr(&self, id: NodeId, tokens: &[Token]) -> String {
        let mut out = String::new();
        self.write_sexpr(id, tokens, &mut out);
        out
    }

    fn write_sexpr(&self, id: NodeId, tokens: &[Token], out: &mut String) {
        let node = self.node(id);
        if node.kind.is_leaf() {
            out.push_str(&self.literal(id, tokens));
            return;
        }
        out.push_str(node.kind.name());
        out.push('(');
        for (i, child) in node.children.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_sexpr(*child, tokens, out);
        }
        out.push(')');
    }

    /// Decode the value of a literal leaf.
    pub fn literal_value(&self, id: NodeId, tokens: &[Token]) -> Result<LiteralValue, LiteralError> {
        let node = self.node(id);
        let Some(tok) = tokens.get(node.range.begin).filter(|_| node.kind.is_leaf()) else {
            return Err(LiteralError::NotALiteral {
                kind: node.kind.name().to_string(),
            });
        };
        let text = tok.literal.as_str();
        let digits = text.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        let out_of_range = |target: &'static str| {
            let site = Site::token(tok);
            LiteralError::OutOfRange {
                literal: site.literal,
                target,
                line: site.line,
                col: site.col,
                span: site.span,
            }
        };

        match node.kind {
            NodeKind::Number => digits
                .parse()
                .map(LiteralValue::Int)
                .map_err(|_| out_of_range("int")),
            NodeKind::Unsigned => digits
                .parse()
                .map(LiteralValue::Unsigned)
                .map_err(|_| out_of_range("uint")),
            NodeKind::Octet => digits
                .parse()
                .map(LiteralValue::Octet)
                .map_err(|_| out_of_range("octet")),
            NodeKind::Real => text
                .parse()
                .map(LiteralValue::Real)
                .map_err(|_| out_of_range("real")),
            NodeKind::Bit => match digits {
                "0" => Ok(LiteralValue::Bit(false)),
                "1" => Ok(LiteralValue::Bit(true)),
                _ => {
                    let site = Site::token(tok);
                    Err(LiteralError::InvalidBit {
                        literal: site.literal,
                        line: site.line,
                        col: site.col,
                        span: site.span,
                    })
                }
            },
            NodeKind::String => Ok(LiteralValue::Str(strings::unescape(text))),
            kind => Err(LiteralError::NotALiteral {
                kind: kind.name().to_string(),
            }),
        }
    }

    /// Rewrite every node range through `map`.
    pub fn remap_ranges(&mut self, map: impl Fn(TokenRange) -> TokenRange) {
        for node in &mut self.nodes {
            node.range = map(node.range);
        }
    }

    /// Copy the subtree rooted at `id` in `other` into this arena and return the new root (detached).
    pub fn graft(&mut self, other: &Ast, id: NodeId) -> NodeId {
        let root = self.new_node(other.kind(id), other.range(id));
        let mut pending = vec![(id, root)];
        while let Some((src, copy)) = pending.pop() {
            for &child in other.children(src) {
                let grafted = self.new_node(other.kind(child), other.range(child));
                self.push_back(copy, grafted);
                pending.push((child, grafted));
            }
        }
        root
    }

    /// Check the structural invariants of the subtree rooted at `id`:
    /// - child count matches the node kind's arity,
    /// - leaves span exactly one token,
    /// - parent links point back at the owner,
    /// - sibling ranges are in source order, non-overlapping, and inside the parent's range.
    pub fn check_invariants(&self, id: NodeId) -> Result<(), InvariantViolation> {
        let node = self.node(id);
        let violation = |message: String| InvariantViolation {
            node: id,
            kind: node.kind,
            message,
        };

        let count = node.children.len();
        let arity_ok = match node.kind.arity() {
            Arity::Leaf => count == 0,
            Arity::Unary => count == 1,
            Arity::Binary => count == 2,
            Arity::Variadic => true,
        };
        if !arity_ok {
            return Err(violation(format!("{count} children for arity {:?}", node.kind.arity())));
        }
        if node.kind.is_leaf() && node.range.len() != 1 {
            return Err(violation(format!("leaf spans {} tokens", node.range.len())));
        }

        let mut cursor = node.range.begin;
        for &child in &node.children {
            if self.parent(child) != Some(id) {
                return Err(violation(format!("child {child:?} has parent {:?}", self.parent(child))));
            }
            let range = self.range(child);
            if !node.range.contains(range) {
                return Err(violation(format!("child range {range} outside {}", node.range)));
            }
            if range.begin < cursor {
                return Err(violation(format!("child range {range} overlaps or precedes its sibling")));
            }
            cursor = range.end;
            self.check_invariants(child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cand_core::lang::operators::OperationId;

    fn leaf(ast: &mut Ast, at: usize) -> NodeId {
        ast.new_node(NodeKind::Identifier, TokenRange::new(at, at + 1))
    }

    #[test]
    fn test_push_and_pop_maintain_parent_links() {
        let mut ast = Ast::new();
        let add = ast.new_node(NodeKind::Operation(OperationId::Addition), TokenRange::new(0, 3));
        let a = leaf(&mut ast, 0);
        let b = leaf(&mut ast, 2);
        ast.push_back(add, b);
        ast.push_front(add, a);
        assert_eq!(ast.children(add), &[a, b]);
        assert_eq!(ast.parent(a), Some(add));
        assert!(ast.check_invariants(add).is_ok());

        assert_eq!(ast.pop_back(add), Some(b));
        assert_eq!(ast.parent(b), None);
        assert_eq!(ast.pop_front(add), Some(a));
        assert_eq!(ast.pop_front(add), None);
    }

    #[test]
    fn test_find_ancestor_walks_parent_links() {
        let mut ast = Ast::new();
        let program = ast.new_node(NodeKind::Program, TokenRange::new(0, 4));
        let expr = ast.new_node(NodeKind::Expression, TokenRange::new(0, 3));
        let neg = ast.new_node(NodeKind::Operation(OperationId::UnaryMinus), TokenRange::new(0, 2));
        let x = leaf(&mut ast, 1);
        ast.push_back(program, expr);
        ast.push_back(expr, neg);
        ast.push_back(neg, x);

        assert_eq!(ast.find_ancestor(x, NodeKind::Program), Some(program));
        assert_eq!(ast.find_ancestor(x, NodeKind::Expression), Some(expr));
        assert_eq!(ast.find_ancestor(x, NodeKind::ListLiteral), None);
        assert_eq!(ast.find_ancestor(program, NodeKind::Program), None);
    }

    #[test]
    fn test_morph_keeps_children() {
        let mut ast = Ast::new();
        let wrapper = ast.new_node(NodeKind::Subexpression, TokenRange::new(0, 3));
        let x = leaf(&mut ast, 1);
        ast.push_back(wrapper, x);
        ast.morph(wrapper, NodeKind::Operation(OperationId::LogicalNot), TokenRange::new(0, 2));
        assert_eq!(ast.kind(wrapper), NodeKind::Operation(OperationId::LogicalNot));
        assert_eq!(ast.children(wrapper), &[x]);
        assert_eq!(ast.parent(x), Some(wrapper));
    }

    #[test]
    fn test_check_invariants_rejects_wrong_arity() {
        let mut ast = Ast::new();
        let add = ast.new_node(NodeKind::Operation(OperationId::Addition), TokenRange::new(0, 3));
        let a = leaf(&mut ast, 0);
        ast.push_back(add, a);
        let err = ast.check_invariants(add).unwrap_err();
        assert!(err.message.contains("arity"), "{err}");
    }

    #[test]
    fn test_check_invariants_rejects_out_of_order_siblings() {
        let mut ast = Ast::new();
        let add = ast.new_node(NodeKind::Operation(OperationId::Addition), TokenRange::new(0, 3));
        let a = leaf(&mut ast, 0);
        let b = leaf(&mut ast, 2);
        ast.push_back(add, b);
        ast.push_back(add, a);
        assert!(ast.check_invariants(add).is_err());
    }

    #[test]
    #[should_panic(expected = "INVARIANT")]
    fn test_double_attach_panics() {
        let mut ast = Ast::new();
        let p = ast.new_node(NodeKind::ListLiteral, TokenRange::new(0, 3));
        let x = leaf(&mut ast, 1);
        ast.push_back(p, x);
        ast.push_back(p, x);
    }

    #[test]
    fn test_literal_value_errors() {
        let tokens = crate::lexer::lex("2b 256o 99999999999999999999 [1]").unwrap();
        let mut ast = Ast::new();
        let mut literal_at = |at: usize| {
            let kind = NodeKind::from_token(tokens[at].kind).unwrap();
            let id = ast.new_node(kind, TokenRange::new(at, at + 1));
            (kind, id)
        };
        let (bit_kind, bit) = literal_at(0);
        let (octet_kind, octet) = literal_at(1);
        let (int_kind, int) = literal_at(2);
        assert_eq!((bit_kind, octet_kind, int_kind), (NodeKind::Bit, NodeKind::Octet, NodeKind::Number));
        let list = ast.new_node(NodeKind::ListLiteral, TokenRange::new(3, 6));

        let err = ast.literal_value(bit, &tokens).unwrap_err();
        assert!(matches!(&err, LiteralError::InvalidBit { line: 1, col: 1, .. }), "{err:?}");

        let err = ast.literal_value(octet, &tokens).unwrap_err();
        assert!(matches!(&err, LiteralError::OutOfRange { target: "octet", col: 4, .. }), "{err:?}");
        assert_eq!(err.to_string(), "`256o` at 1:4 is out of range for octet");

        let err = ast.literal_value(int, &tokens).unwrap_err();
        assert!(matches!(&err, LiteralError::OutOfRange { target: "int", .. }), "{err:?}");

        let err = ast.literal_value(list, &tokens).unwrap_err();
        assert_eq!(err, LiteralError::NotALiteral { kind: "list_literal".to_string() });
    }

    #[test]
    fn test_graft_copies_deep_chain_in_order() {
        // ((((x + x) + x) + x) ...), deep enough to matter if grafting recursed.
        let mut src = Ast::new();
        let mut root = leaf(&mut src, 0);
        for i in 1..5_000 {
            let rhs = leaf(&mut src, 2 * i);
            let add = src.new_node(NodeKind::Operation(OperationId::Addition), TokenRange::new(0, 2 * i + 1));
            src.push_back(add, root);
            src.push_back(add, rhs);
            root = add;
        }

        let mut dst = Ast::new();
        let copy = dst.graft(&src, root);
        assert_eq!(dst.len(), src.len());
        let children = dst.children(copy);
        assert_eq!(dst.kind(children[0]), NodeKind::Operation(OperationId::Addition));
        assert_eq!(dst.range(children[1]), TokenRange::new(9_998, 9_999));
    }

    #[test]
    fn test_graft_copies_subtree() {
        let mut src = Ast::new();
        let neg = src.new_node(NodeKind::Operation(OperationId::UnaryMinus), TokenRange::new(0, 2));
        let x = leaf(&mut src, 1);
        src.push_back(neg, x);

        let mut dst = Ast::new();
        let _pad = dst.new_node(NodeKind::Program, TokenRange::new(0, 2));
        let copy = dst.graft(&src, neg);
        assert_eq!(dst.kind(copy), NodeKind::Operation(OperationId::UnaryMinus));
        assert_eq!(dst.children(copy).len(), 1);
        assert!(dst.check_invariants(copy).is_ok());
    }
}
