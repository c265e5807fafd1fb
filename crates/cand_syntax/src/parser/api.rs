/// A parsed expression together with the arena that owns it.
#[derive(Debug, Clone)]
pub struct ParsedExpr {
    pub ast: Ast,
    pub root: NodeId,
    /// Index of the first token after the expression.
    pub next: usize,
}

/// A parsed program: a `program` root with one child per value statement.
#[derive(Debug, Clone)]
pub struct ParsedProgram {
    pub ast: Ast,
    pub root: NodeId,
    /// Every top-level statement, directive statements included.
    pub statements: Vec<Statement>,
}

/// Parse `tokens[range]` as one expression with the default [`ParseConfig`].
///
/// ## Errors
/// See [`parse_expression_with`].
pub fn parse_expression(tokens: &[Token], range: TokenRange) -> Result<ParsedExpr, ParseError> {
    parse_expression_with(tokens, range, &ParseConfig::default())
}

/// Parse `tokens[range]` as one expression.
///
/// The whole range must form a single expression; see [`Parser::parse_expression`] for prefix parsing.
///
/// ## Errors
/// Returns the first scope or syntax error, or [`ParseError::NestingTooDeep`].
#[tracing::instrument(skip_all, fields(begin = range.begin, end = range.end))]
pub fn parse_expression_with(tokens: &[Token], range: TokenRange, config: &ParseConfig) -> Result<ParsedExpr, ParseError> {
    let mut parser = Parser::new(tokens, config.clone());
    let root = parser.expression(range)?;
    Ok(ParsedExpr {
        ast: parser.into_ast(),
        root,
        next: range.end,
    })
}

/// Parse a whole token stream as a program with the default [`ParseConfig`].
///
/// ## Errors
/// See [`parse_program_with`].
pub fn parse_program(tokens: &[Token]) -> Result<ParsedProgram, ParseError> {
    parse_program_with(tokens, &ParseConfig::default())
}

/// Parse a whole token stream as a program.
///
/// ## Errors
/// Scope errors from statement splitting, then the first error from any value statement.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_program_with(tokens: &[Token], config: &ParseConfig) -> Result<ParsedProgram, ParseError> {
    let range = content_range(tokens);
    let statements = split_statements(tokens, range)?;
    let mut parser = Parser::new(tokens, config.clone());
    let root = parser.program(range, &statements)?;
    Ok(ParsedProgram {
        ast: parser.into_ast(),
        root,
        statements,
    })
}

/// Lex `source` and parse all of it as one expression.
///
/// ## Errors
/// Lexical errors, then anything [`parse_expression_with`] reports.
pub fn parse_source_expression(source: &str, config: &ParseConfig) -> Result<(Vec<Token>, ParsedExpr), ParseError> {
    let tokens = lexer::lex(source)?;
    let parsed = parse_expression_with(&tokens, content_range(&tokens), config)?;
    Ok((tokens, parsed))
}
