    use super::*;
    use crate::syntax::Language;
    use crate::syntax::tokenize;

    fn lex(input: &str) -> Vec<(SyntaxKind, &str)> {
        Lexer::new(input).filter_map(Result::ok).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = lex("static int counter_1;");
        assert_eq!(
            tokens,
            vec![
                (SyntaxKind::KwStatic, "static"),
                (SyntaxKind::KwInt, "int"),
                (SyntaxKind::Ident, "counter_1"),
                (SyntaxKind::Semicolon, ";"),
            ]
        );
    }

    #[test]
    fn test_punctuation_longest_match() {
        let tokens = lex(":: -> ... >>= [[ ]] <<");
        assert_eq!(
            tokens.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            vec![
                SyntaxKind::DoubleColon,
                SyntaxKind::Arrow,
                SyntaxKind::Ellipsis,
                SyntaxKind::RightShiftEqual,
                SyntaxKind::LDoubleBracket,
                SyntaxKind::RDoubleBracket,
                SyntaxKind::LeftShift,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = lex("42 0x1F 1'000 3.14f 'a' \"s\\\"x\" true nullptr");
        assert_eq!(
            tokens,
            vec![
                (SyntaxKind::Integer, "42"),
                (SyntaxKind::Integer, "0x1F"),
                (SyntaxKind::Integer, "1'000"),
                (SyntaxKind::Float, "3.14f"),
                (SyntaxKind::Char, "'a'"),
                (SyntaxKind::String, "\"s\\\"x\""),
                (SyntaxKind::KwTrue, "true"),
                (SyntaxKind::KwNullptr, "nullptr"),
            ]
        );
        assert!(SyntaxKind::KwTrue.is_literal());
    }

    #[test]
    fn test_raw_string_spans_lines() {
        let input = "auto s = R\"x(line one\n)\" still inside)x\";";
        let tokens = lex(input);
        assert_eq!(tokens[3], (SyntaxKind::RawString, "R\"x(line one\n)\" still inside)x\""));
        assert_eq!(tokens[4], (SyntaxKind::Semicolon, ";"));
    }

    #[test]
    fn test_comments_are_emitted() {
        let tokens = lex("a // line\n/* block\n */ b");
        assert_eq!(
            tokens,
            vec![
                (SyntaxKind::Ident, "a"),
                (SyntaxKind::Comment, "// line"),
                (SyntaxKind::Comment, "/* block\n */"),
                (SyntaxKind::Ident, "b"),
            ]
        );
    }

    #[test]
    fn test_directive_is_one_token() {
        let input = "#define MAX(a, b) \\\n    ((a) > (b))\nint x;";
        let tokens = lex(input);
        assert_eq!(tokens[0], (SyntaxKind::Preprocessor, "#define MAX(a, b) \\\n    ((a) > (b))"));
        assert_eq!(tokens[1], (SyntaxKind::KwInt, "int"));
    }

    #[test]
    fn test_hash_inside_line_is_punctuation() {
        let tokens = lex("x # y");
        assert_eq!(tokens[1], (SyntaxKind::Hash, "#"));
    }

    #[test]
    fn test_positions_are_utf16() {
        let tokens: Vec<_> = Lexer::new("\"é😀\" x\n  y").filter_map(Result::ok).collect();
        assert_eq!(tokens[0].span.end, Position::new(0, 5));
        assert_eq!(tokens[1].span.start, Position::new(0, 6));
        assert_eq!(tokens[2].span.start, Position::new(1, 2));
        assert_eq!(tokens[2].span.end, Position::new(1, 3));
    }

    #[test]
    fn test_spaced_flag() {
        let tokens: Vec<_> = Lexer::new("a::b c").filter_map(Result::ok).collect();
        assert!(!tokens[1].spaced);
        assert!(!tokens[2].spaced);
        assert!(tokens[3].spaced);
    }

    #[test]
    fn test_unterminated_string_recovers_on_next_line() {
        let items: Vec<_> = Lexer::new("char *s = \"oops;\nint y;").collect();
        let errors: Vec<_> = items.iter().filter_map(|i| i.as_ref().err()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::UnterminatedString);
        assert_eq!(errors[0].span.start, Position::new(0, 10));
        let after: Vec<_> = items
            .iter()
            .filter_map(|i| i.as_ref().ok())
            .filter(|t| t.span.start.line == 1)
            .map(|t| t.text)
            .collect();
        assert_eq!(after, vec!["int", "y", ";"]);
    }

    #[test]
    fn test_unterminated_char() {
        let errors: Vec<_> = Lexer::new("int c = 'x\n").filter_map(Result::err).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::UnterminatedChar);
    }

    #[test]
    fn test_tokenize_drops_comments_and_demotes_cpp_keywords_in_c() {
        let (tokens, errors) = tokenize("int class; /* c */ int new;", Language::C);
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[1].kind, SyntaxKind::Ident);
        assert_eq!(tokens[4].kind, SyntaxKind::Ident);

        let (tokens, _) = tokenize("class A;", Language::Cpp);
        assert_eq!(tokens[0].kind, SyntaxKind::KwClass);
    }

    #[test]
    fn test_end_position() {
        let lexer = Lexer::new("ab\ncd");
        assert_eq!(lexer.end_position(), Position::new(1, 2));
    }
