/// Expression parsing methods.
///
/// This chunk implements precedence climbing over the operation tables:
/// primary → prefix chain → postfix constructs → binary loop.
///
/// ## Notes
/// - Postfix constructs (`(..)`, `[..]`, `{..}`, `++`, `--`) sit at [`POSTFIX_PRIORITY`], above every binary
///   operator except member access, and below it, so `a.b()` calls `a.b`.
/// - A prefix operator parses its operand at [`PREFIX_PRIORITY`]: `-a.b++` is `-((a.b)++)`, `-1 + 2` is
///   `(-1) + 2`.
/// - Chaining two equal-priority operators where either is non-associative (`a <=> b <=> c`) is rejected.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse the longest expression starting at `range.begin`.
    ///
    /// Returns the node and the index of the first token that could not continue the expression (for example
    /// a `;`, a `,` or a second operand). Use [`Parser::expression`] to require that the whole range is
    /// consumed.
    ///
    /// ## Errors
    /// Scope and syntax errors from the consumed prefix of the range.
    pub fn parse_expression(&mut self, range: TokenRange) -> Result<(NodeId, usize), ParseError> {
        if range.is_empty() {
            return Err(self.error(SyntaxErrorKind::EmptyOperand, Production::Expression, range.begin));
        }
        self.climb(range.begin, range.end, 0)
    }

    /// Parse `range` as one whole expression statement.
    ///
    /// The result is an `expression` node wrapping the tree (collapsed into it when simplification is on).
    /// Normalization runs first when the configuration asks for it.
    ///
    /// ## Errors
    /// - Scope and syntax errors anywhere in the range.
    /// - [`ParseError::NestingTooDeep`] past the configured depth.
    pub fn expression(&mut self, range: TokenRange) -> Result<NodeId, ParseError> {
        let inner = if self.should_normalize(range) {
            self.normalized(range)?
        } else {
            self.complete(range, Production::Expression)?
        };
        let expr = self.node_with(NodeKind::Expression, range, &[inner]);
        if self.config.simplify {
            simplify(&mut self.ast, expr);
        }
        Ok(expr)
    }

    /// Parenthesize `range`, parse the normalized tokens, and graft the result back onto this arena.
    fn normalized(&mut self, range: TokenRange) -> Result<NodeId, ParseError> {
        let parenthesized = parenthesizer::parenthesize_with(self.tokens, range, self.config.max_nesting_depth)?;
        tracing::debug!(normalized = %parenthesized.text(), "parenthesized expression");

        let config = self.config.clone().with_normalization(Normalization::Never);
        let mut inner = Parser::over_parenthesized(&parenthesized, config);
        let root = inner.complete(TokenRange::new(0, parenthesized.tokens.len()), Production::Parenthesizer)?;

        let mut ast = inner.into_ast();
        ast.remap_ranges(|r| parenthesized.original_range(r));
        Ok(self.ast.graft(&ast, root))
    }

    /// Parse exactly `range`; parentheses spanning all of it are redundant grouping and dropped.
    fn complete(&mut self, range: TokenRange, production: Production) -> Result<NodeId, ParseError> {
        self.nested(range.begin, |p| {
            let range = p.strip_parens(range, production)?;
            if range.is_empty() {
                return Err(p.error(SyntaxErrorKind::EmptyOperand, production, range.begin));
            }
            let (node, next) = p.climb(range.begin, range.end, 0)?;
            if next < range.end {
                return Err(p.leftover(next, production));
            }
            Ok(node)
        })
    }

    fn strip_parens(&self, mut range: TokenRange, production: Production) -> Result<TokenRange, ParseError> {
        while !range.is_empty() && self.tokens[range.begin].is_punctuation(PunctuationId::LParen) {
            let scope = scope::find_paren_scope(self.tokens, range)?;
            if scope.end != range.end {
                break;
            }
            if scope.contained().is_empty() {
                return Err(self.error(SyntaxErrorKind::EmptyOperand, production, scope.begin));
            }
            range = scope.contained();
        }
        Ok(range)
    }

    /// Precedence climbing: an operand, then every postfix construct and binary operator binding at least
    /// as tightly as `min_priority`.
    fn climb(&mut self, pos: usize, end: usize, min_priority: u8) -> Result<(NodeId, usize), ParseError> {
        let (lhs, pos) = self.unary(pos, end)?;
        self.extend(lhs, pos, end, min_priority)
    }

    /// Continue climbing with `lhs` as the operand already parsed before `pos`.
    fn extend(
        &mut self,
        mut lhs: NodeId,
        mut pos: usize,
        end: usize,
        min_priority: u8,
    ) -> Result<(NodeId, usize), ParseError> {
        let tokens = self.tokens;
        let mut previous: Option<(u8, Associativity)> = None;

        while pos < end {
            let tok = &tokens[pos];

            if POSTFIX_PRIORITY >= min_priority {
                if let Some(kind) = tok.opens() {
                    (lhs, pos) = self.postfix_group(lhs, pos, end, kind)?;
                    continue;
                }
                if let Some(op) = tok.operator_id().and_then(operators::postfix_operation) {
                    let range = self.span_from(lhs, pos + 1);
                    lhs = self.node_with(NodeKind::Operation(op), range, &[lhs]);
                    pos += 1;
                    continue;
                }
            }

            let Some(op) = tok.operator_id().and_then(operators::binary_operation) else {
                break;
            };
            let info = operators::operation_info(op);
            if info.priority < min_priority {
                break;
            }
            if let Some((priority, associativity)) = previous {
                let non_associative =
                    associativity == Associativity::None || info.associativity == Associativity::None;
                if priority == info.priority && non_associative {
                    return Err(self.error(SyntaxErrorKind::NonAssociative, Production::Expression, pos));
                }
            }
            if pos + 1 >= end {
                return Err(self.error(SyntaxErrorKind::MissingOperand, Production::Expression, pos));
            }

            let (rhs, next) = if info.associativity == Associativity::Right {
                self.nested(pos, |p| p.climb(pos + 1, end, info.priority))?
            } else {
                self.climb(pos + 1, end, info.priority + 1)?
            };
            let range = self.span_from(lhs, self.ast.range(rhs).end);
            lhs = self.node_with(NodeKind::Operation(op), range, &[lhs, rhs]);
            tracing::trace!(operation = info.name, "built binary operation");
            previous = Some((info.priority, info.associativity));
            pos = next;
        }

        Ok((lhs, pos))
    }

    /// A prefix chain followed by its operand, or a primary.
    fn unary(&mut self, pos: usize, end: usize) -> Result<(NodeId, usize), ParseError> {
        let tokens = self.tokens;
        let Some(op) = tokens[pos].operator_id().and_then(operators::prefix_operation) else {
            return self.primary(pos, end);
        };
        if pos + 1 >= end {
            return Err(self.error(SyntaxErrorKind::MissingOperand, Production::Primary, pos));
        }
        let (operand, next) = self.nested(pos, |p| p.climb(pos + 1, end, PREFIX_PRIORITY))?;
        let range = TokenRange::new(pos, self.ast.range(operand).end);
        Ok((self.node_with(NodeKind::Operation(op), range, &[operand]), next))
    }

    /// A leaf, a parenthesized subexpression, a list literal or an initializer list.
    fn primary(&mut self, pos: usize, end: usize) -> Result<(NodeId, usize), ParseError> {
        let tokens = self.tokens;
        let tok = &tokens[pos];
        if let Some(kind) = NodeKind::from_token(tok.kind) {
            return Ok((self.ast.new_node(kind, TokenRange::new(pos, pos + 1)), pos + 1));
        }

        match tok.opens() {
            Some(BracketKind::Paren) if self.is_synthesized(pos, PunctuationId::LParen) => {
                self.synthesized_groups(pos, end)
            }
            Some(BracketKind::Paren) => {
                let group = scope::find_paren_scope(tokens, TokenRange::new(pos, end))?;
                if group.contained().is_empty() {
                    return Err(self.error(SyntaxErrorKind::EmptyOperand, Production::Subexpression, pos));
                }
                let inner = self.complete(group.contained(), Production::Subexpression)?;
                Ok((self.node_with(NodeKind::Subexpression, group.range(), &[inner]), group.end))
            }
            Some(BracketKind::Bracket) => {
                self.bracket_list(pos, end, BracketKind::Bracket, NodeKind::ListLiteral, Production::ListLiteral)
            }
            Some(BracketKind::Brace) => self.bracket_list(
                pos,
                end,
                BracketKind::Brace,
                NodeKind::InitializerList,
                Production::InitializerList,
            ),
            None => {
                // A binary-only operator after another operator means the first one lacks its operand.
                let after_operator = pos > 0 && tokens[pos - 1].operator_id().is_some();
                let kind = if after_operator && tok.operator_id().is_some() {
                    SyntaxErrorKind::MissingOperand
                } else {
                    SyntaxErrorKind::InvalidStart
                };
                Err(self.error(kind, Production::Primary, pos))
            }
        }
    }

    /// A run of parenthesizer-inserted groups starting at `pos`, e.g. `(((f()+1)+1)+1)`.
    ///
    /// The groups of a left-leaning chain open back to back; they are parsed innermost first, each outer group
    /// continuing the climb from the inner result, so the chain costs no recursion per group.
    fn synthesized_groups(&mut self, pos: usize, end: usize) -> Result<(NodeId, usize), ParseError> {
        let mut open = 0;
        while pos + open < end && self.is_synthesized(pos + open, PunctuationId::LParen) {
            open += 1;
        }
        let start = pos + open;
        if start >= end {
            return Err(self.error(SyntaxErrorKind::EmptyOperand, Production::Parenthesizer, pos));
        }

        let (mut node, mut next) = self.climb(start, end, 0)?;
        for level in 0..open {
            if level > 0 {
                (node, next) = self.extend(node, next, end, 0)?;
            }
            if !self.is_synthesized(next, PunctuationId::RParen) {
                return Err(if next < end {
                    self.leftover(next, Production::Parenthesizer)
                } else {
                    self.error(SyntaxErrorKind::InvalidToken, Production::Parenthesizer, pos)
                });
            }
            next += 1;
        }
        Ok((node, next))
    }

    /// Resolve the bracket group at `pos`, parse each comma part, and collect them under a `kind` node.
    fn bracket_list(
        &mut self,
        pos: usize,
        end: usize,
        bracket: BracketKind,
        kind: NodeKind,
        production: Production,
    ) -> Result<(NodeId, usize), ParseError> {
        let separated =
            scope::find_separated_scopes(self.tokens, TokenRange::new(pos, end), bracket, PunctuationId::Comma)?;
        let list = self.ast.new_node(kind, separated.scope.range());
        for part in separated.parts {
            let child = self.complete(part, production)?;
            self.ast.push_back(list, child);
        }
        Ok((list, separated.scope.end))
    }

    /// Attach a call, index or type-argument group to `callee`.
    fn postfix_group(
        &mut self,
        callee: NodeId,
        pos: usize,
        end: usize,
        bracket: BracketKind,
    ) -> Result<(NodeId, usize), ParseError> {
        let (op, kind, production) = match bracket {
            BracketKind::Paren => (OperationId::FunctionCall, NodeKind::Arguments, Production::Arguments),
            BracketKind::Bracket => (OperationId::IndexOperator, NodeKind::IndexArguments, Production::IndexArguments),
            BracketKind::Brace => (OperationId::TypeCall, NodeKind::TypeArguments, Production::TypeArguments),
        };
        let (args, next) = self.bracket_list(pos, end, bracket, kind, production)?;
        let range = self.span_from(callee, next);
        Ok((self.node_with(NodeKind::Operation(op), range, &[callee, args]), next))
    }
}
