    use super::*;
    use crate::syntax::{Language, tokenize};

    const FILE: DeclContext<'static> = DeclContext {
        access: None,
        record_name: None,
        in_record: false,
    };

    const WIDGET: DeclContext<'static> = DeclContext {
        access: Some(Access::Private),
        record_name: Some("Widget"),
        in_record: true,
    };

    /// Classify a statement ending in `;`, or in `{` for a function body.
    fn declare(
        ctx: DeclContext<'_>,
        source: &str,
    ) -> Option<Vec<Declaration>> {
        let tokens = tokenize(source, Language::Cpp).0;
        let terminator = match tokens.last().map(|t| t.kind) {
            Some(SyntaxKind::LBrace) => Terminator::Body(BodyKind::Function),
            _ => Terminator::Semicolon,
        };
        let head = &tokens[..tokens.len() - 1];
        classify(&ctx, &tokens, head, terminator)
    }

    fn declare_one(
        ctx: DeclContext<'_>,
        source: &str,
    ) -> Declaration {
        let mut decls = declare(ctx, source).expect("declaration");
        assert_eq!(decls.len(), 1, "{decls:?}");
        decls.remove(0)
    }

    #[test]
    fn test_function_prototype() {
        let decl = declare_one(FILE, "int add(int a, int b);");
        assert_eq!(decl.kind, DeclKind::FunctionDeclaration);
        assert_eq!(decl.name, "add");
        assert_eq!(decl.signature, "int add(int a, int b)");
        assert_eq!(decl.arity, Some(2));
        assert_eq!(decl.param_types, Some(vec!["int".to_string(), "int".to_string()]));
        assert!(!decl.flags.is_defined);
    }

    #[test]
    fn test_void_parameter_list_is_empty() {
        let decl = declare_one(FILE, "void reset(void);");
        assert_eq!(decl.arity, Some(0));
    }

    #[test]
    fn test_qualified_definition_with_trailing_qualifiers() {
        let decl = declare_one(FILE, "void Widget::resize(int w) const override {");
        assert_eq!(decl.kind, DeclKind::FunctionDefinition);
        assert_eq!(decl.name, "resize");
        assert_eq!(decl.qualifier, vec!["Widget".to_string()]);
        assert!(decl.flags.is_const);
        assert!(decl.flags.is_override);
        assert!(decl.flags.is_defined);
    }

    #[test]
    fn test_constructor_signature_drops_initializer_list() {
        let decl = declare_one(WIDGET, "Widget(int w) : width(w) {");
        assert_eq!(decl.kind, DeclKind::FunctionDefinition);
        assert_eq!(decl.name, "Widget");
        assert_eq!(decl.signature, "Widget(int w)");
        assert_eq!(decl.access, Some(Access::Private));
    }

    #[test]
    fn test_destructor_and_deleted_copy() {
        let dtor = declare_one(WIDGET, "~Widget();");
        assert_eq!(dtor.name, "~Widget");

        let copy = declare_one(WIDGET, "Widget(const Widget&) = delete;");
        assert_eq!(copy.kind, DeclKind::FunctionDeclaration);
        assert!(copy.flags.is_deleted);
        assert_eq!(copy.param_types, Some(vec!["const Widget&".to_string()]));
    }

    #[test]
    fn test_pure_virtual_method() {
        let decl = declare_one(WIDGET, "virtual void draw() const = 0;");
        assert_eq!(decl.kind, DeclKind::FunctionDeclaration);
        assert_eq!(decl.signature, "virtual void draw() const = 0");
        assert!(decl.flags.is_virtual);
        assert!(decl.flags.is_const);
        assert!(decl.flags.is_pure);
    }

    #[test]
    fn test_operator_names() {
        let eq = declare_one(WIDGET, "bool operator==(const Widget& other) const;");
        assert_eq!(eq.name, "operator==");
        assert_eq!(eq.arity, Some(1));

        let call = declare_one(WIDGET, "int operator()(int x) const;");
        assert_eq!(call.name, "operator()");
        assert_eq!(call.arity, Some(1));
    }

    #[test]
    fn test_function_pointer_declarator() {
        let decl = declare_one(FILE, "void (*callback)(int, char);");
        assert_eq!(decl.kind, DeclKind::FunctionDeclaration);
        assert_eq!(decl.name, "callback");
        assert!(decl.flags.is_function_pointer);
        assert_eq!(decl.arity, Some(2));
    }

    #[test]
    fn test_direct_initialization_is_a_variable() {
        let decl = declare_one(FILE, "Widget w(10);");
        assert_eq!(decl.kind, DeclKind::Variable);
        assert_eq!(decl.name, "w");
        assert!(decl.flags.is_defined);
    }

    #[test]
    fn test_multiple_declarators_share_the_type() {
        let decls = declare(FILE, "static const int a = 1, *b;").expect("declarations");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "a");
        assert_eq!(decls[0].signature, "static const int a");
        assert!(decls[0].flags.is_static);
        assert!(decls[0].flags.is_const);
        assert_eq!(decls[1].name, "b");
        assert_eq!(decls[1].signature, "static const int *b");
        assert!(decls[1].flags.is_static);
    }

    #[test]
    fn test_definition_flag_for_variables() {
        assert!(!declare_one(FILE, "extern int counter;").flags.is_defined);
        assert!(declare_one(FILE, "int counter;").flags.is_defined);
        assert!(!declare_one(WIDGET, "int count;").flags.is_defined);
        assert!(declare_one(FILE, "int values[4];").flags.is_defined);
    }

    #[test]
    fn test_expression_is_not_a_declaration() {
        assert!(declare(FILE, "x = y + 1;").is_none());
        assert!(declare(FILE, "run(1, 2);").is_none());
    }

    #[test]
    fn test_templated_qualifier_and_explicit_arguments() {
        let member = declare_one(FILE, "void Foo<T>::bar() {");
        assert_eq!(member.qualifier, vec!["Foo".to_string()]);
        assert_eq!(member.templated_qualifiers, 1);

        let explicit = declare_one(FILE, "void f<int>(int& x);");
        assert_eq!(explicit.name, "f");
        assert_eq!(explicit.template_args, Some(1));
        assert_eq!(explicit.param_types, Some(vec!["int&".to_string()]));
    }
