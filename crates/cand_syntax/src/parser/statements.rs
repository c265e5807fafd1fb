/// Statement splitting and program assembly.
///
/// A program is a sequence of `;`-terminated statements. Statements opened by a directive keyword
/// (`#var x = 1;`) are located but left to the directive parsers; every other statement is a value
/// statement and parses as one expression.

/// What opens a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Opened by a directive keyword such as `#var`.
    Directive(DirectiveId),
    /// A bare expression statement such as `a = a + 1;`.
    Value,
}

/// One top-level statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    /// Statement tokens without the terminating `;`.
    pub range: TokenRange,
    /// The resolved scope, terminator included.
    pub scope: Scope,
}

/// Locate the top-level statements in `range`.
///
/// Stray `;` tokens (empty statements) are skipped.
///
/// ## Errors
/// - [`ScopeError::Unterminated`] when a statement never reaches a depth-0 `;`.
/// - [`ScopeError::RepeatedOpener`] when a directive statement meets another directive of the same kind
///   before its `;`.
/// - Bracket mismatches inside a statement.
#[tracing::instrument(skip_all, fields(begin = range.begin, end = range.end))]
pub fn split_statements(tokens: &[Token], range: TokenRange) -> Result<Vec<Statement>, ScopeError> {
    let terminator = Boundary::Punct(PunctuationId::Semicolon);
    let mut statements = Vec::new();
    let mut pos = range.begin;
    while pos < range.end {
        if tokens[pos].is_punctuation(PunctuationId::Semicolon) {
            tracing::trace!(pos, "empty statement");
            pos += 1;
            continue;
        }
        let rest = TokenRange::new(pos, range.end);
        let (kind, scope) = match tokens[pos].directive_id() {
            Some(id) => (
                StatementKind::Directive(id),
                scope::find_statement(tokens, rest, Boundary::Directive(id), terminator)?,
            ),
            None => (
                StatementKind::Value,
                scope::find_open_statement(tokens, rest, Boundary::Any, terminator)?,
            ),
        };
        statements.push(Statement {
            kind,
            range: TokenRange::new(scope.begin, scope.end - 1),
            scope,
        });
        pos = scope.end;
    }
    tracing::debug!(count = statements.len(), "split statements");
    Ok(statements)
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Programs
    // ========================================================================

    /// Build a `program` node spanning `range` with one `expression` child per value statement.
    ///
    /// ## Errors
    /// The first error from any value statement.
    pub fn program(&mut self, range: TokenRange, statements: &[Statement]) -> Result<NodeId, ParseError> {
        let program = self.ast.new_node(NodeKind::Program, range);
        for statement in statements {
            match statement.kind {
                StatementKind::Directive(id) => {
                    tracing::debug!(
                        directive = directives::as_str(id),
                        begin = statement.range.begin,
                        "skipping directive statement"
                    );
                }
                StatementKind::Value => {
                    let expr = self.expression(statement.range)?;
                    self.ast.push_back(program, expr);
                }
            }
        }
        Ok(program)
    }
}
