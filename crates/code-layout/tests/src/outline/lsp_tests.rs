    use super::*;
    use crate::outline::extract;
    use crate::syntax::Language;

    const SOURCE: &str = "\
namespace app {
class Widget {
public:
    Widget();
    void draw();
    int size;
};
enum Mode { On };
}
#define LIMIT 4
";

    #[test]
    fn test_symbol_kinds_follow_context() {
        let symbols = extract(SOURCE, Language::Cpp).to_document_symbols();
        assert_eq!(symbols.len(), 2);

        let app = &symbols[0];
        assert_eq!(app.kind, SymbolKind::NAMESPACE);
        let members = app.children.as_deref().unwrap_or_default();
        assert_eq!(members.len(), 2);

        let widget = &members[0];
        assert_eq!(widget.kind, SymbolKind::CLASS);
        let kinds: Vec<SymbolKind> = widget.children.iter().flatten().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SymbolKind::CONSTRUCTOR, SymbolKind::METHOD, SymbolKind::FIELD]);

        let mode = &members[1];
        assert_eq!(mode.kind, SymbolKind::ENUM);
        assert_eq!(mode.children.as_ref().map(|c| c[0].kind), Some(SymbolKind::ENUM_MEMBER));

        assert_eq!(symbols[1].kind, SymbolKind::CONSTANT);
        assert_eq!(symbols[1].name, "LIMIT");
    }

    #[test]
    fn test_ranges_and_selection() {
        let symbols = extract(SOURCE, Language::Cpp).to_document_symbols();
        let app = &symbols[0];
        assert_eq!(app.range, Range::new(lsp_types::Position::new(0, 0), lsp_types::Position::new(8, 1)));

        let widget = &app.children.as_deref().unwrap_or_default()[0];
        assert_eq!(
            widget.selection_range,
            Range::new(lsp_types::Position::new(1, 6), lsp_types::Position::new(1, 12))
        );
        assert_eq!(widget.detail.as_deref(), Some("class Widget"));
    }

    #[test]
    fn test_anonymous_symbols_are_named() {
        let symbols = extract("struct { int a; } value;", Language::C).to_document_symbols();
        assert_eq!(symbols[0].name, "<anonymous>");
        assert_eq!(symbols[0].kind, SymbolKind::STRUCT);
        assert_eq!(symbols[1].kind, SymbolKind::VARIABLE);
    }
