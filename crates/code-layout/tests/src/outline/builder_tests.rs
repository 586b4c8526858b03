    use super::*;
    use crate::outline::extract_with;
    use crate::syntax::Language;
    use crate::syntax::token::{Position, Span};

    fn keys(
        source: &str,
        options: &ExtractOptions,
    ) -> Vec<String> {
        extract_with(source, options).iter().map(|node| node.key.to_string()).collect()
    }

    #[test]
    fn test_overloads_get_distinct_keys() {
        let source = "struct S {\n  S(int a);\n  S(double b);\n  void reset();\n};\n";
        assert_eq!(
            keys(source, &ExtractOptions::default()),
            vec!["S", "S::S(1)", "S::S(1)#2", "S::reset(0)"]
        );
    }

    #[test]
    fn test_anonymous_nodes_have_a_placeholder_segment() {
        let source = "namespace {\n  int hidden;\n}\n";
        assert_eq!(
            keys(source, &ExtractOptions::default()),
            vec!["<anonymous>", "<anonymous>::hidden"]
        );
    }

    #[test]
    fn test_options_filter_kinds() {
        let source = "#define LIMIT 4\nenum Mode { On, Off };\nx = 1;\n";
        let all = ExtractOptions::default();
        assert_eq!(keys(source, &all), vec!["LIMIT", "Mode", "Mode::On", "Mode::Off", "<anonymous>"]);

        let bare = ExtractOptions {
            include_macros: false,
            include_enumerators: false,
            include_unknown: false,
            ..all
        };
        assert_eq!(keys(source, &bare), vec!["Mode"]);
    }

    #[test]
    fn test_selection_span_is_the_name() {
        let outline = extract_with("static int counter;\n", &ExtractOptions::for_language(Language::C));
        let node = outline.find("counter").expect("counter");
        assert_eq!(node.span, Span::new(Position::new(0, 0), Position::new(0, 19)));
        assert_eq!(node.selection_span, Span::new(Position::new(0, 11), Position::new(0, 18)));
    }

    #[test]
    fn test_children_follow_source_order() {
        let source = "template <typename T> void f(T t);\ntemplate <> void f<char>(char t);\ntemplate <> void f<int>(int t);\n";
        let outline = extract_with(source, &ExtractOptions::default());
        let primary = outline.find("f(1)").expect("primary template");
        let lines: Vec<u32> = primary.children.iter().map(|c| c.span.start.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert_eq!(primary.children[1].key.to_string(), "f(1)::f(1)#2");
    }
