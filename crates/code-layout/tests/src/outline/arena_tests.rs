    use super::*;
    use crate::syntax::token::{Position, Span};

    fn line(line: u32) -> Span {
        Span::new(Position::new(line, 0), Position::new(line, 10))
    }

    fn decl(
        kind: DeclKind,
        name: &str,
        at: u32,
    ) -> Declaration {
        Declaration::new(kind, name, name, line(at))
    }

    fn function(
        kind: DeclKind,
        name: &str,
        params: &[&str],
        at: u32,
    ) -> Declaration {
        let mut decl = decl(kind, name, at);
        decl.arity = Some(params.len());
        decl.param_types = Some(params.iter().map(|p| p.to_string()).collect());
        decl.flags.is_defined = kind == DeclKind::FunctionDefinition;
        decl
    }

    fn arena() -> DeclArena {
        DeclArena::new(decl(DeclKind::File, "", 0))
    }

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_push_registers_qualified_name() {
        let mut arena = arena();
        let ns = arena.push(NodeId::ROOT, decl(DeclKind::Namespace, "app", 1));
        let f = arena.push(ns, function(DeclKind::FunctionDeclaration, "run", &["int"], 2));

        let found: Vec<NodeId> = arena.lookup(&SymbolKey::new(&path(&["app", "run"]), Some(1))).collect();
        assert_eq!(found, vec![f]);
        assert_eq!(arena.parent(f), Some(ns));
        assert_eq!(arena.qualified_path(f), path(&["app", "run"]));
    }

    #[test]
    fn test_inline_children_are_pushed() {
        let mut arena = arena();
        let mut color = decl(DeclKind::Enum, "Color", 1);
        color.children = vec![decl(DeclKind::Enumerator, "Red", 1), decl(DeclKind::Enumerator, "Blue", 1)];
        let id = arena.push(NodeId::ROOT, color);
        assert_eq!(arena.children(id).len(), 2);
        assert!(arena.decl(id).children.is_empty());
    }

    #[test]
    fn test_anonymous_levels_are_skipped_in_paths() {
        let mut arena = arena();
        let anonymous = arena.push(NodeId::ROOT, decl(DeclKind::Struct, "", 1));
        let field = arena.push(anonymous, decl(DeclKind::Variable, "x", 2));
        assert_eq!(arena.qualified_path(field), path(&["x"]));
    }

    #[test]
    fn test_definition_merges_into_prototype() {
        let mut arena = arena();
        let proto = arena.push(NodeId::ROOT, function(DeclKind::FunctionDeclaration, "f", &["int"], 1));
        let definition = function(DeclKind::FunctionDefinition, "f", &["int"], 5);

        assert_eq!(arena.find_mergeable(NodeId::ROOT, &definition), Some(proto));
        arena.merge(proto, definition);

        let merged = arena.decl(proto);
        assert_eq!(merged.kind, DeclKind::FunctionDefinition);
        assert_eq!(merged.span, line(1));
        assert_eq!(merged.definition_span, Some(line(5)));
        assert!(merged.flags.is_defined);
    }

    #[test]
    fn test_overloads_stay_apart() {
        let mut arena = arena();
        arena.push(NodeId::ROOT, function(DeclKind::FunctionDeclaration, "f", &["int"], 1));
        let other = function(DeclKind::FunctionDeclaration, "f", &["double"], 2);
        assert_eq!(arena.find_mergeable(NodeId::ROOT, &other), None);

        let template = function(DeclKind::TemplateFunction, "f", &["int"], 3);
        assert_eq!(arena.find_mergeable(NodeId::ROOT, &template), None);
    }

    #[test]
    fn test_record_body_replaces_forward_declaration() {
        let mut arena = arena();
        let forward = arena.push(NodeId::ROOT, decl(DeclKind::Class, "Widget", 1));
        let mut body = decl(DeclKind::Class, "Widget", 4);
        body.flags.is_defined = true;
        body.children = vec![decl(DeclKind::Variable, "size", 5)];

        assert_eq!(arena.find_mergeable(NodeId::ROOT, &body), Some(forward));
        arena.merge(forward, body);

        assert_eq!(arena.decl(forward).span, line(4));
        assert_eq!(arena.decl(forward).definition_span, None);
        assert_eq!(arena.children(forward).len(), 1);
    }

    #[test]
    fn test_merge_definition_keeps_position() {
        let mut arena = arena();
        let forward = arena.push(NodeId::ROOT, decl(DeclKind::Struct, "Inner", 1));
        let mut body = decl(DeclKind::Struct, "Inner", 9);
        body.flags.is_defined = true;
        arena.merge_definition(forward, body);

        assert_eq!(arena.decl(forward).span, line(1));
        assert_eq!(arena.decl(forward).definition_span, Some(line(9)));
    }

    #[test]
    fn test_absorb_moves_children_and_detaches() {
        let mut arena = arena();
        let target = arena.push(NodeId::ROOT, decl(DeclKind::Struct, "S", 1));
        let mut outside = decl(DeclKind::Struct, "S", 6);
        outside.unresolved = true;
        outside.flags.is_defined = true;
        let source = arena.push(NodeId::ROOT, outside);
        let field = arena.push(source, decl(DeclKind::Variable, "value", 7));

        arena.absorb(target, source);

        assert!(arena.is_detached(source));
        assert_eq!(arena.children(NodeId::ROOT), &[target]);
        assert_eq!(arena.children(target), &[field]);
        assert_eq!(arena.parent(field), Some(target));
        assert_eq!(arena.decl(target).definition_span, Some(line(6)));
    }

    #[test]
    fn test_attach_relinks_node() {
        let mut arena = arena();
        let primary = arena.push(NodeId::ROOT, function(DeclKind::TemplateFunction, "f", &["T"], 1));
        let mut spec = function(DeclKind::TemplateSpecialization, "f", &["int"], 3);
        spec.unresolved = true;
        let spec = arena.push(NodeId::ROOT, spec);

        arena.attach(spec, primary);

        assert_eq!(arena.children(NodeId::ROOT), &[primary]);
        assert_eq!(arena.children(primary), &[spec]);
        assert!(!arena.is_detached(spec));
    }

    #[test]
    fn test_detached_nodes_are_not_found() {
        let mut arena = arena();
        let var = arena.push(NodeId::ROOT, decl(DeclKind::Variable, "x", 1));
        arena.detach(var);
        assert_eq!(arena.lookup(&SymbolKey::new(&path(&["x"]), None)).count(), 0);
    }
