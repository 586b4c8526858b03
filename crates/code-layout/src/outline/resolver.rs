//! Post-pass that attaches qualified out-of-line definitions and explicit
//! specializations to the declarations they belong to.

use tracing::{debug, trace};

use crate::diagnostics::Diagnostic;
use crate::outline::DeclKind;
use crate::outline::arena::{DeclArena, NodeId, SymbolKey, params_match};

pub(crate) fn resolve(
    arena: &mut DeclArena,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let pending: Vec<NodeId> = arena
        .ids()
        .filter(|&id| arena.decl(id).unresolved && !arena.is_detached(id))
        .collect();
    let mut orphans = 0;
    for id in pending {
        let resolved = if arena.decl(id).kind == DeclKind::TemplateSpecialization {
            attach_specialization(arena, id)
        } else {
            absorb_definition(arena, id)
        };
        if !resolved {
            orphans += 1;
            let decl = arena.decl_mut(id);
            decl.unresolved = false;
            decl.flags.orphan_definition = true;
            let name = display_name(decl.qualifier.as_slice(), &decl.name);
            diagnostics.push(Diagnostic::orphan(&name, decl.span));
            arena.register(id);
        }
    }
    debug!("[resolve] done, {orphans} orphan definitions");
}

/// Nodes matching the qualified name of `id`, searched from its own
/// container outward. The innermost scope with any match wins.
fn candidates(
    arena: &DeclArena,
    id: NodeId,
) -> Vec<NodeId> {
    let decl = arena.decl(id);
    let mut container = arena.parent(id);
    while let Some(scope) = container {
        let mut path = arena.qualified_path(scope);
        path.extend(decl.qualifier.iter().cloned());
        path.push(decl.name.clone());
        let found: Vec<NodeId> = arena
            .lookup(&SymbolKey::new(&path, decl.key_arity()))
            .filter(|&candidate| candidate != id)
            .collect();
        if !found.is_empty() {
            return found;
        }
        container = arena.parent(scope);
    }
    Vec::new()
}

fn attach_specialization(
    arena: &mut DeclArena,
    id: NodeId,
) -> bool {
    let family = arena.decl(id).family();
    let primary = candidates(arena, id).into_iter().find(|&candidate| {
        let decl = arena.decl(candidate);
        decl.kind.is_template() && decl.kind != DeclKind::TemplateSpecialization && decl.family() == family
    });
    let Some(primary) = primary else {
        return false;
    };
    trace!("[resolve] specialization `{}` under node {primary:?}", arena.decl(id).name);
    arena.attach(id, primary);
    arena.decl_mut(id).unresolved = false;
    true
}

fn absorb_definition(
    arena: &mut DeclArena,
    id: NodeId,
) -> bool {
    let family = arena.decl(id).family();
    let matching: Vec<NodeId> = candidates(arena, id)
        .into_iter()
        .filter(|&candidate| {
            let decl = arena.decl(candidate);
            decl.kind != DeclKind::TemplateSpecialization && decl.family() == family
        })
        .collect();
    let incoming = arena.decl(id);
    let target = matching
        .iter()
        .copied()
        .find(|&candidate| {
            let decl = arena.decl(candidate);
            decl.param_types.is_some() && params_match(decl, incoming)
        })
        .or_else(|| (matching.len() == 1).then(|| matching[0]));
    let Some(target) = target else {
        return false;
    };
    trace!("[resolve] `{}` defines node {target:?}", incoming.name);
    arena.absorb(target, id);
    true
}

fn display_name(
    qualifier: &[String],
    name: &str,
) -> String {
    qualifier
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join("::")
}

#[cfg(test)]
#[path = "../../tests/src/outline/resolver_tests.rs"]
mod tests;
