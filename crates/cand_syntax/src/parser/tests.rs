#[cfg(test)]
/// Parser unit tests.
///
/// Most tests parse through both routes (direct precedence climbing and parenthesizer-first) and
/// require identical trees.
mod tests {
    use super::*;
    use crate::diagnostics::ScopeRule;

    fn parse_with(source: &str, config: &ParseConfig) -> (Vec<Token>, ParsedExpr) {
        let tokens = lexer::lex(source).unwrap();
        let parsed = parse_expression_with(&tokens, content_range(&tokens), config).unwrap();
        if let Err(violation) = parsed.ast.check_invariants(parsed.root) {
            panic!("{source}: {violation}");
        }
        (tokens, parsed)
    }

    fn sexpr_with(source: &str, normalization: Normalization) -> String {
        let config = ParseConfig::default().with_normalization(normalization);
        let (tokens, parsed) = parse_with(source, &config);
        parsed.ast.to_sexpr(parsed.root, &tokens)
    }

    fn sexpr(source: &str) -> String {
        let direct = sexpr_with(source, Normalization::Never);
        let normalized = sexpr_with(source, Normalization::Always);
        assert_eq!(direct, normalized, "routes disagree on {source}");
        direct
    }

    fn parse_err(source: &str) -> ParseError {
        let tokens = lexer::lex(source).unwrap();
        let config = ParseConfig::default().with_normalization(Normalization::Never);
        parse_expression_with(&tokens, content_range(&tokens), &config).unwrap_err()
    }

    fn syntax_kind(source: &str) -> SyntaxErrorKind {
        match parse_err(source) {
            ParseError::Syntax(e) => e.kind,
            other => panic!("expected a syntax error for {source}, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence() {
        insta::assert_snapshot!(sexpr("1 + 2 * 3"), @"addition(1, multiplication(2, 3))");
        insta::assert_snapshot!(sexpr("1 * 2 + 3"), @"addition(multiplication(1, 2), 3)");
        insta::assert_snapshot!(sexpr("a || b && c | d"), @"logical_or(a, logical_and(b, bitwise_or(c, d)))");
        insta::assert_snapshot!(sexpr("a == b < c"), @"equal(a, less(b, c))");
    }

    #[test]
    fn test_associativity() {
        insta::assert_snapshot!(sexpr("1 - 2 - 3"), @"subtraction(subtraction(1, 2), 3)");
        insta::assert_snapshot!(sexpr("1 = 2 = 3"), @"assignment(1, assignment(2, 3))");
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        insta::assert_snapshot!(sexpr("-1 + 2"), @"addition(unary_minus(1), 2)");
        insta::assert_snapshot!(sexpr("!!x"), @"logical_not(logical_not(x))");
        insta::assert_snapshot!(sexpr("-a++"), @"unary_minus(postfix_increment(a))");
        insta::assert_snapshot!(sexpr("-a.b"), @"unary_minus(member_access(a, b))");
    }

    #[test]
    fn test_postfix_constructs() {
        insta::assert_snapshot!(sexpr("foo.bar()"), @"function_call(member_access(foo, bar), arguments())");
        insta::assert_snapshot!(
            sexpr("f(a + b, c)[i]"),
            @"index_operator(function_call(f, arguments(addition(a, b), c)), index_arguments(i))"
        );
        insta::assert_snapshot!(sexpr("T{x}"), @"type_call(T, type_arguments(x))");
        insta::assert_snapshot!(sexpr("!f(x) * 2"), @"multiplication(logical_not(function_call(f, arguments(x))), 2)");
        insta::assert_snapshot!(sexpr("a.b++"), @"postfix_increment(member_access(a, b))");
    }

    #[test]
    fn test_groups_and_literals() {
        insta::assert_snapshot!(sexpr("(1 + 2) * 3"), @"multiplication(addition(1, 2), 3)");
        insta::assert_snapshot!(sexpr("((x))"), @"x");
        insta::assert_snapshot!(sexpr("[1, 2 + 3]"), @"list_literal(1, addition(2, 3))");
        insta::assert_snapshot!(sexpr("{}"), @"initializer_list()");
        insta::assert_snapshot!(sexpr("@int{'a'}"), @"type_call(@int, type_arguments('a'))");
    }

    #[test]
    fn test_without_simplify_wrappers_remain() {
        let config = ParseConfig::default()
            .with_normalization(Normalization::Never)
            .with_simplify(false);
        let (tokens, parsed) = parse_with("(1) + 2", &config);
        insta::assert_snapshot!(
            parsed.ast.to_sexpr(parsed.root, &tokens),
            @"expression(addition(subexpression(1), 2))"
        );
    }

    #[test]
    fn test_routes_agree_without_simplify() {
        let render = |source: &str, normalization: Normalization| {
            let config = ParseConfig::default()
                .with_normalization(normalization)
                .with_simplify(false);
            let (tokens, parsed) = parse_with(source, &config);
            parsed.ast.to_sexpr(parsed.root, &tokens)
        };
        for source in ["f(a) + b", "(a) + g(b)[c]", "-f(x).y", "a = b = h{T}(1, (2))"] {
            assert_eq!(
                render(source, Normalization::Never),
                render(source, Normalization::Always),
                "routes disagree on {source}"
            );
        }
        insta::assert_snapshot!(
            render("f(a) + b", Normalization::Always),
            @"expression(addition(function_call(f, arguments(a)), b))"
        );
    }

    #[test]
    fn test_long_chain_with_call_is_not_nested() {
        // Normalization wraps every `+` in its own group; those groups cost no nesting level or recursion.
        let source = format!("f(){}", " + 1".repeat(2_000));
        let tokens = lexer::lex(&source).unwrap();
        let range = content_range(&tokens);
        for normalization in [Normalization::Auto, Normalization::Never] {
            let config = ParseConfig::default().with_normalization(normalization);
            let parsed = parse_expression_with(&tokens, range, &config).unwrap();
            assert_eq!(parsed.ast.kind(parsed.root), NodeKind::Operation(OperationId::Addition));
            assert_eq!(parsed.ast.range(parsed.root), range);
        }
    }

    #[test]
    fn test_normalized_ranges_point_into_original_tokens() {
        let source = "f(a + b)";
        let (tokens, parsed) = parse_with(source, &ParseConfig::default());
        assert_eq!(parsed.ast.range(parsed.root), TokenRange::new(0, 6));
        assert_eq!(parsed.ast.literal(parsed.root, &tokens), "f(a+b)");
        let args = parsed.ast.children(parsed.root)[1];
        assert_eq!(parsed.ast.source_text(args, &tokens, source), "(a + b)");
    }

    #[test]
    fn test_prefix_parse_stops_at_terminator() {
        let tokens = lexer::lex("a + b; c").unwrap();
        let mut parser = Parser::new(&tokens, ParseConfig::default());
        let (node, next) = parser.parse_expression(content_range(&tokens)).unwrap();
        assert_eq!(next, 3);
        assert_eq!(parser.ast().to_sexpr(node, &tokens), "addition(a, b)");
    }

    #[test]
    fn test_syntax_errors() {
        let err = parse_err("1 + + 2");
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.kind, SyntaxErrorKind::MissingOperand);
        assert_eq!((syntax.line, syntax.col), (1, 5));
        assert_eq!(syntax.literal, "+");

        assert_eq!(syntax_kind("* 2"), SyntaxErrorKind::InvalidStart);
        assert_eq!(syntax_kind("1 +"), SyntaxErrorKind::MissingOperand);
        assert_eq!(syntax_kind("()"), SyntaxErrorKind::EmptyOperand);
        assert_eq!(syntax_kind("f(a,)"), SyntaxErrorKind::EmptyOperand);
        assert_eq!(syntax_kind("a b"), SyntaxErrorKind::OperandAfterOperand);
        assert_eq!(syntax_kind("a !b"), SyntaxErrorKind::PrefixAfterOperand);
        assert_eq!(syntax_kind("a <=> b <=> c"), SyntaxErrorKind::NonAssociative);
        assert_eq!(syntax_kind("a <=> b < c"), SyntaxErrorKind::NonAssociative);
        assert_eq!(syntax_kind("a ;"), SyntaxErrorKind::InvalidToken);
    }

    #[test]
    fn test_unclosed_group_is_scope_error() {
        let err = parse_err("(1+2");
        let scope = err.as_scope().unwrap();
        assert_eq!(scope.rule(), ScopeRule::ParenScope);
        assert_eq!(scope.position(), (1, 1));
        insta::assert_snapshot!(err.to_string(), @"paren scope: `(` at 1:1 is never closed, expected `)`");
    }

    #[test]
    fn test_nesting_limit() {
        let config = ParseConfig::default()
            .with_normalization(Normalization::Never)
            .with_max_nesting_depth(4);
        let tokens = lexer::lex("f(f(f(f(f(x)))))").unwrap();
        let err = parse_expression_with(&tokens, content_range(&tokens), &config).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { limit: 4, .. }), "{err:?}");

        let tokens = lexer::lex("- - - - - - x").unwrap();
        let err = parse_expression_with(&tokens, content_range(&tokens), &config).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { .. }), "{err:?}");

        // Redundant grouping is unwrapped without recursing.
        let tokens = lexer::lex("((((((x))))))").unwrap();
        assert!(parse_expression_with(&tokens, content_range(&tokens), &config).is_ok());
    }

    #[test]
    fn test_parser_is_reusable_after_errors() {
        let tokens = lexer::lex("a b; - - - - x; (c)").unwrap();
        let config = ParseConfig::default().with_max_nesting_depth(3);
        let mut parser = Parser::new(&tokens, config);
        for _ in 0..3 {
            let err = parser.expression(TokenRange::new(0, 2)).unwrap_err();
            assert_eq!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::OperandAfterOperand));
        }
        let err = parser.expression(TokenRange::new(3, 8)).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { limit: 3, .. }), "{err:?}");

        let node = parser.expression(TokenRange::new(9, 12)).unwrap();
        assert_eq!(parser.ast().to_sexpr(node, &tokens), "c");
    }

    #[test]
    fn test_split_statements() {
        let tokens = lexer::lex("#var x = 1; a = (b; c); ; #print a;").unwrap();
        let statements = split_statements(&tokens, content_range(&tokens)).unwrap();
        let summary: Vec<_> = statements.iter().map(|s| (s.kind, s.range)).collect();
        assert_eq!(
            summary,
            vec![
                (StatementKind::Directive(DirectiveId::Var), TokenRange::new(0, 4)),
                (StatementKind::Value, TokenRange::new(5, 12)),
                (StatementKind::Directive(DirectiveId::Print), TokenRange::new(14, 16)),
            ]
        );
        assert_eq!(statements[1].scope.end, 13);
    }

    #[test]
    fn test_split_statements_errors() {
        let tokens = lexer::lex("#var a #var b;").unwrap();
        let err = split_statements(&tokens, content_range(&tokens)).unwrap_err();
        assert!(matches!(err, ScopeError::RepeatedOpener { .. }), "{err:?}");

        let tokens = lexer::lex("a = 1").unwrap();
        let err = split_statements(&tokens, content_range(&tokens)).unwrap_err();
        assert_eq!(err.rule(), ScopeRule::OpenStatement);
    }

    #[test]
    fn test_parse_program_skips_directives() {
        let tokens = lexer::lex("a = 1; #var x = 2; f(a) + 1;").unwrap();
        let program = parse_program(&tokens).unwrap();
        assert_eq!(program.statements.len(), 3);
        assert!(program.ast.check_invariants(program.root).is_ok());
        insta::assert_snapshot!(
            program.ast.to_sexpr(program.root, &tokens),
            @"program(assignment(a, 1), addition(function_call(f, arguments(a)), 1))"
        );
    }

    #[test]
    fn test_parse_program_reports_statement_errors() {
        let tokens = lexer::lex("a = 1; b c;").unwrap();
        let err = parse_program(&tokens).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.kind, SyntaxErrorKind::OperandAfterOperand);
        assert_eq!(syntax.literal, "c");
    }
}
