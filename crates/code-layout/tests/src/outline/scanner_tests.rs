    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::scope::Access;

    fn names(
        arena: &DeclArena,
        parent: NodeId,
    ) -> Vec<String> {
        arena.children(parent).iter().map(|&id| arena.decl(id).name.clone()).collect()
    }

    fn child(
        arena: &DeclArena,
        parent: NodeId,
        name: &str,
    ) -> NodeId {
        arena
            .children(parent)
            .iter()
            .copied()
            .find(|&id| arena.decl(id).name == name)
            .unwrap_or_else(|| panic!("no child `{name}` in {:?}", names(arena, parent)))
    }

    fn span(
        start: (u32, u32),
        end: (u32, u32),
    ) -> Span {
        Span::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
    }

    #[test]
    fn test_reopened_namespaces_are_separate_nodes() {
        let out = scan("namespace a { int x; }\nnamespace a { int y; }", Language::Cpp);
        assert_eq!(names(&out.arena, NodeId::ROOT), vec!["a", "a"]);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_prototype_and_definition_share_a_node() {
        let out = scan("int f(int a);\nint f(int b) {\n  return b;\n}", Language::Cpp);
        assert_eq!(names(&out.arena, NodeId::ROOT), vec!["f"]);
        let f = child(&out.arena, NodeId::ROOT, "f");
        let decl = out.arena.decl(f);
        assert_eq!(decl.kind, DeclKind::FunctionDefinition);
        assert_eq!(decl.span, span((0, 0), (0, 13)));
        assert_eq!(decl.definition_span, Some(span((1, 0), (3, 1))));
    }

    #[test]
    fn test_out_of_line_member_waits_for_resolution() {
        let source = "class Widget {\npublic:\n  void draw();\n};\nvoid Widget::draw() {}\n";
        let out = scan(source, Language::Cpp);
        assert_eq!(names(&out.arena, NodeId::ROOT), vec!["Widget", "draw"]);

        let widget = child(&out.arena, NodeId::ROOT, "Widget");
        assert_eq!(out.arena.decl(widget).span, span((0, 0), (3, 2)));
        let member = child(&out.arena, widget, "draw");
        assert_eq!(out.arena.decl(member).access, Some(Access::Public));

        let pending = child(&out.arena, NodeId::ROOT, "draw");
        assert!(out.arena.decl(pending).unresolved);
        assert_eq!(out.arena.decl(pending).span, span((4, 0), (4, 22)));
    }

    #[test]
    fn test_function_bodies_hide_locals() {
        let source = "void f() {\n  int local;\n  struct S { int m; };\n}\nint after;\n";
        let out = scan(source, Language::Cpp);
        assert_eq!(names(&out.arena, NodeId::ROOT), vec!["f", "after"]);
        let f = child(&out.arena, NodeId::ROOT, "f");
        assert_eq!(out.arena.decl(f).span, span((0, 0), (3, 1)));
    }

    #[test]
    fn test_typedef_names_anonymous_struct() {
        let out = scan("typedef struct {\n  int a;\n} Point, *PointPtr;", Language::C);
        assert_eq!(names(&out.arena, NodeId::ROOT), vec!["Point", "PointPtr"]);

        let point = child(&out.arena, NodeId::ROOT, "Point");
        let decl = out.arena.decl(point);
        assert_eq!(decl.kind, DeclKind::Struct);
        assert_eq!(decl.span, span((0, 0), (2, 19)));
        assert_eq!(names(&out.arena, point), vec!["a"]);
        assert_eq!(out.arena.lookup(&SymbolKey::new(&["Point".to_string()], None)).count(), 1);

        let alias = child(&out.arena, NodeId::ROOT, "PointPtr");
        assert_eq!(out.arena.decl(alias).kind, DeclKind::PlainTypedef);
    }

    #[test]
    fn test_record_followed_by_variables() {
        let out = scan("struct { int a; } config, *next;", Language::C);
        assert_eq!(names(&out.arena, NodeId::ROOT), vec!["", "config", "next"]);
        let anonymous = child(&out.arena, NodeId::ROOT, "");
        assert_eq!(out.arena.decl(anonymous).span, span((0, 0), (0, 17)));
        let config = child(&out.arena, NodeId::ROOT, "config");
        assert_eq!(out.arena.decl(config).kind, DeclKind::Variable);
    }

    #[test]
    fn test_qualified_record_completes_forward_declaration() {
        let source = "class Outer {\n  class Inner;\n};\nclass Outer::Inner {\n  int value;\n};\n";
        let out = scan(source, Language::Cpp);
        assert_eq!(names(&out.arena, NodeId::ROOT), vec!["Outer"]);

        let outer = child(&out.arena, NodeId::ROOT, "Outer");
        let inner = child(&out.arena, outer, "Inner");
        let decl = out.arena.decl(inner);
        assert!(decl.flags.is_defined);
        assert_eq!(decl.span, span((1, 2), (1, 14)));
        assert_eq!(decl.definition_span, Some(span((3, 0), (5, 2))));
        assert_eq!(names(&out.arena, inner), vec!["value"]);
    }

    #[test]
    fn test_unclosed_scope_runs_to_end_of_input() {
        let out = scan("namespace a {\nint x;\n", Language::Cpp);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::StructureError);
        assert_eq!(out.diagnostics[0].message, "namespace `a` is never closed");

        let ns = child(&out.arena, NodeId::ROOT, "a");
        assert_eq!(out.arena.decl(ns).span.end, Position::new(2, 0));
        assert_eq!(names(&out.arena, ns), vec!["x"]);
    }

    #[test]
    fn test_unmatched_close_is_reported_and_skipped() {
        let out = scan("int x;\n}\nint y;\n", Language::Cpp);
        assert_eq!(names(&out.arena, NodeId::ROOT), vec!["x", "y"]);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].span, span((1, 0), (1, 1)));
    }

    #[test]
    fn test_unknown_statement_is_kept_with_a_diagnostic() {
        let out = scan("x = 1;\nint y;\n", Language::Cpp);
        let first = out.arena.children(NodeId::ROOT)[0];
        assert_eq!(out.arena.decl(first).kind, DeclKind::Unknown);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::ClassificationAmbiguity);
    }

    #[test]
    fn test_lex_error_boundaries_point_past_the_bad_line() {
        let source = "char *s = \"abc\nint a;\nchar c = 'x\nint b;\n";
        let (tokens, errors) = tokenize(source, Language::C);
        assert_eq!(errors.len(), 2);
        let boundaries = lex_error_boundaries(&tokens, &errors);
        let starts: Vec<&str> = boundaries.iter().map(|&index| tokens[index].text).collect();
        assert_eq!(starts, vec!["int", "int"]);
        assert_eq!(boundaries[0], 4);

        let output = scan(source, Language::C);
        assert_eq!(names(&output.arena, NodeId::ROOT), vec!["s", "a", "c", "b"]);
    }
