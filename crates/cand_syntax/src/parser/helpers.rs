/// Low-level parser helpers.
///
/// Error construction, the nesting guard, node assembly, and the token classification the expression
/// chunk relies on.
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    fn error(&self, kind: SyntaxErrorKind, production: Production, index: usize) -> ParseError {
        SyntaxError::at(kind, production, self.tokens, index).into()
    }

    /// Run `f` one nesting level deeper, failing once the configured limit would be exceeded.
    ///
    /// The level is released on every exit path, so a parser that reported an error can keep parsing.
    fn nested<T>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_nesting_depth {
            return Err(ParseError::nesting_too_deep(self.config.max_nesting_depth, self.tokens, index));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Whether `index` holds a `(` or `)` the parenthesizer inserted (no origin in the source).
    fn is_synthesized(&self, index: usize, punct: PunctuationId) -> bool {
        self.tokens.get(index).is_some_and(|t| t.is_punctuation(punct))
            && matches!(self.origins.and_then(|o| o.get(index)), Some(None))
    }

    /// Create a node and attach `children` in order.
    fn node_with(&mut self, kind: NodeKind, range: TokenRange, children: &[NodeId]) -> NodeId {
        let id = self.ast.new_node(kind, range);
        for &child in children {
            self.ast.push_back(id, child);
        }
        id
    }

    /// Range from the start of `first` to `end`.
    fn span_from(&self, first: NodeId, end: usize) -> TokenRange {
        TokenRange::new(self.ast.range(first).begin, end)
    }

    /// Classify a token left over after a complete expression.
    fn leftover(&self, index: usize, production: Production) -> ParseError {
        let tok = &self.tokens[index];
        let kind = if tok.is_operand() {
            SyntaxErrorKind::OperandAfterOperand
        } else if tok.operator_id().and_then(operators::prefix_operation).is_some() {
            SyntaxErrorKind::PrefixAfterOperand
        } else {
            SyntaxErrorKind::InvalidToken
        };
        self.error(kind, production, index)
    }

    /// Whether `range` should go through the parenthesizer before parsing.
    fn should_normalize(&self, range: TokenRange) -> bool {
        match self.config.normalization {
            Normalization::Never => false,
            Normalization::Always => true,
            Normalization::Auto => has_postfix_bracket(self.tokens, range),
        }
    }
}

/// Token that can end an operand: a leaf, a closing bracket, or a postfix `++`/`--`.
fn ends_operand(tok: &Token) -> bool {
    tok.is_operand()
        || tok.closes().is_some()
        || tok.operator_id().and_then(operators::postfix_operation).is_some()
}

/// A bracket opener directly after an operand: a call, index or type-argument construct.
fn has_postfix_bracket(tokens: &[Token], range: TokenRange) -> bool {
    (range.begin + 1..range.end).any(|i| tokens[i].opens().is_some() && ends_operand(&tokens[i - 1]))
}
