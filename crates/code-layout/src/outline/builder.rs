//! Freezes the resolved arena into the public [`OutlineNode`] tree.

use std::collections::HashMap;

use crate::outline::arena::{DeclArena, NodeId};
use crate::outline::{DeclKind, ExtractOptions, KindFamily, NodeKey, OutlineNode};

pub(crate) fn build(
    arena: &DeclArena,
    options: &ExtractOptions,
) -> OutlineNode {
    build_node(arena, NodeId::ROOT, NodeKey::root(), options)
}

fn build_node(
    arena: &DeclArena,
    id: NodeId,
    key: NodeKey,
    options: &ExtractOptions,
) -> OutlineNode {
    let decl = arena.decl(id);
    let mut ordered: Vec<NodeId> = arena
        .children(id)
        .iter()
        .copied()
        .filter(|&child| is_emitted(arena.decl(child).kind, options))
        .collect();
    ordered.sort_by_key(|&child| (arena.decl(child).span.start, child));

    let mut seen: HashMap<String, usize> = HashMap::new();
    let children = ordered
        .into_iter()
        .map(|child| {
            let mut segment = key_segment(arena, child);
            let count = seen.entry(segment.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                segment = format!("{segment}#{count}");
            }
            build_node(arena, child, key.child(segment), options)
        })
        .collect();

    OutlineNode {
        key,
        kind: decl.kind,
        name: decl.name.clone(),
        signature: decl.signature.clone(),
        access: decl.access,
        flags: decl.flags,
        template_parameters: decl.template_parameters.clone(),
        span: decl.span,
        selection_span: decl.name_span.unwrap_or(decl.span),
        definition_span: decl.definition_span,
        children,
    }
}

fn is_emitted(
    kind: DeclKind,
    options: &ExtractOptions,
) -> bool {
    match kind {
        DeclKind::MacroObject | DeclKind::MacroFunction => options.include_macros,
        DeclKind::Enumerator => options.include_enumerators,
        DeclKind::Unknown => options.include_unknown,
        _ => true,
    }
}

/// `name`, or `name(arity)` for function-like nodes so overloads differ.
fn key_segment(
    arena: &DeclArena,
    id: NodeId,
) -> String {
    let decl = arena.decl(id);
    let name = if decl.name.is_empty() { "<anonymous>" } else { decl.name.as_str() };
    match decl.family() {
        KindFamily::Function => format!("{name}({})", decl.arity.unwrap_or(0)),
        _ => name.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src/outline/builder_tests.rs"]
mod tests;
