#![allow(dead_code)]

use std::path::PathBuf;

use code_layout::{DeclKind, Language, Outline, OutlineNode, Position, Span, extract};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture must exist")
}

pub fn extract_fixture(
    name: &str,
    language: Language,
) -> Outline {
    extract(&read_fixture(name), language)
}

pub fn span(
    start: (u32, u32),
    end: (u32, u32),
) -> Span {
    Span::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
}

/// Look a node up by key, listing every key on failure.
pub fn node<'a>(
    outline: &'a Outline,
    key: &str,
) -> &'a OutlineNode {
    outline.find(key).unwrap_or_else(|| {
        let keys: Vec<String> = outline.iter().map(|n| n.key.to_string()).collect();
        panic!("no node `{key}` in {keys:#?}")
    })
}

pub fn child_keys(node: &OutlineNode) -> Vec<String> {
    node.children.iter().map(|c| c.key.to_string()).collect()
}

/// Every node has a non-empty span nested in its parent, and siblings do not
/// overlap. A body written apart from its declaration counts as part of the
/// parent, and specializations listed under their primary are exempt.
pub fn assert_well_nested(outline: &Outline) {
    check_children(&outline.root);
}

fn check_children(parent: &OutlineNode) {
    let mut previous: Option<&OutlineNode> = None;
    for child in &parent.children {
        assert!(!child.span.is_empty(), "`{}` has an empty span {}", child.key, child.span);
        assert!(
            child.span.contains(&child.selection_span),
            "`{}` selection {} escapes {}",
            child.key,
            child.selection_span,
            child.span
        );

        let specialization = child.kind == DeclKind::TemplateSpecialization && parent.kind.is_template();
        if !specialization {
            let inside = parent.span.contains(&child.span)
                || parent.definition_span.is_some_and(|body| body.contains(&child.span));
            assert!(inside, "`{}` at {} escapes parent `{}` at {}", child.key, child.span, parent.key, parent.span);

            if let Some(previous) = previous {
                assert!(
                    previous.span.end <= child.span.start,
                    "`{}` at {} overlaps `{}` at {}",
                    child.key,
                    child.span,
                    previous.key,
                    previous.span
                );
            }
            previous = Some(child);
        }
        check_children(child);
    }
}
