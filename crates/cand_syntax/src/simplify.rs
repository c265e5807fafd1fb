//! Wrapper simplification.
//!
//! The parser wraps every value statement in an `expression` node and every parenthesized operand in a
//! `subexpression` node. Once the tree is built those wrappers carry no information beyond their child, so this pass
//! collapses them: the wrapper is morphed into its child's kind and range and adopts the child's children. The
//! wrapper keeps its identity (and therefore its place in the parent's child list); the old child is left detached.

use crate::ast::{Ast, NodeId, NodeKind};

/// Collapse single-child `expression` / `subexpression` wrappers in the subtree rooted at `root`.
pub fn simplify(ast: &mut Ast, root: NodeId) {
    // Post-order, so a wrapper only adopts children that are already simplified.
    let mut order = Vec::new();
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        order.push(id);
        pending.extend_from_slice(ast.children(id));
    }

    let mut collapsed = 0usize;
    for &id in order.iter().rev() {
        if collapse(ast, id) {
            collapsed += 1;
        }
    }
    tracing::trace!(collapsed, "simplified wrappers");
}

fn is_wrapper(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::Expression | NodeKind::Subexpression)
}

fn collapse(ast: &mut Ast, id: NodeId) -> bool {
    if !is_wrapper(ast.kind(id)) || ast.children(id).len() != 1 {
        return false;
    }
    let Some(child) = ast.pop_back(id) else {
        return false;
    };
    let (kind, range) = (ast.kind(child), ast.range(child));
    let mut adopted = Vec::with_capacity(ast.children(child).len());
    while let Some(grandchild) = ast.pop_front(child) {
        adopted.push(grandchild);
    }
    ast.morph(id, kind, range);
    for grandchild in adopted {
        ast.push_back(id, grandchild);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TokenRange;
    use cand_core::lang::operators::OperationId;

    #[test]
    fn test_nested_wrappers_collapse_to_operation() {
        // expression(subexpression(subexpression(unary_minus(x))))
        let mut ast = Ast::new();
        let expr = ast.new_node(NodeKind::Expression, TokenRange::new(0, 6));
        let outer = ast.new_node(NodeKind::Subexpression, TokenRange::new(0, 6));
        let inner = ast.new_node(NodeKind::Subexpression, TokenRange::new(1, 5));
        let neg = ast.new_node(NodeKind::Operation(OperationId::UnaryMinus), TokenRange::new(2, 4));
        let x = ast.new_node(NodeKind::Identifier, TokenRange::new(3, 4));
        ast.push_back(expr, outer);
        ast.push_back(outer, inner);
        ast.push_back(inner, neg);
        ast.push_back(neg, x);

        simplify(&mut ast, expr);

        assert_eq!(ast.kind(expr), NodeKind::Operation(OperationId::UnaryMinus));
        assert_eq!(ast.range(expr), TokenRange::new(2, 4));
        assert_eq!(ast.children(expr), &[x]);
        assert_eq!(ast.parent(x), Some(expr));
        assert!(ast.check_invariants(expr).is_ok());
    }

    #[test]
    fn test_non_wrappers_are_untouched() {
        let mut ast = Ast::new();
        let list = ast.new_node(NodeKind::ListLiteral, TokenRange::new(0, 3));
        let x = ast.new_node(NodeKind::Identifier, TokenRange::new(1, 2));
        ast.push_back(list, x);
        simplify(&mut ast, list);
        assert_eq!(ast.kind(list), NodeKind::ListLiteral);
        assert_eq!(ast.children(list), &[x]);
    }
}
