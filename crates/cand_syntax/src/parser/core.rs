/// Parser core type.
///
/// This chunk defines the [`Parser`] type: the token slice it reads, the arena it builds into, and the
/// configuration that selects normalization, simplification and the nesting limit.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
/// - The parser does not own a cursor. Every method takes the index it starts at and returns the index after
///   the last token it consumed, so the scope resolver and the parser speak the same range currency.
pub struct Parser<'a> {
    tokens: &'a [Token],
    config: ParseConfig,
    ast: Ast,
    depth: usize,
    /// Source indices of the tokens when they are parenthesizer output (`None` entries are synthesized).
    origins: Option<&'a [Option<usize>]>,
}

impl<'a> Parser<'a> {
    /// Create a parser over a sanitized token slice.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by [`lexer::lex`].
    /// - `config`: Normalization, simplification and nesting settings.
    pub fn new(tokens: &'a [Token], config: ParseConfig) -> Self {
        Self {
            tokens,
            config,
            ast: Ast::new(),
            depth: 0,
            origins: None,
        }
    }

    /// Create a parser over parenthesizer output.
    ///
    /// Groups the parenthesizer synthesized produce no `subexpression` node and cost no nesting level.
    fn over_parenthesized(parenthesized: &'a Parenthesized, config: ParseConfig) -> Self {
        Self {
            tokens: &parenthesized.tokens,
            config,
            ast: Ast::new(),
            depth: 0,
            origins: Some(&parenthesized.origins),
        }
    }

    /// The tokens this parser reads.
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    /// The arena built so far.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Consume the parser and return its arena.
    pub fn into_ast(self) -> Ast {
        self.ast
    }
}
