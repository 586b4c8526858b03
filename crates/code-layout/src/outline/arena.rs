//! Mutable declaration tree used while a scan is in progress.
//!
//! Nodes live in a flat arena addressed by [`NodeId`]. Parent links and
//! child lists are plain indices, which lets the resolver detach a node and
//! re-attach it elsewhere without fighting the borrow checker. A symbol
//! table keyed by qualified name and arity is kept alongside for merging.

use std::collections::HashMap;

use tracing::trace;

use crate::outline::{DeclKind, Declaration, KindFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct Slot {
    decl: Declaration,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    detached: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SymbolKey {
    pub qualified: String,
    pub arity: Option<usize>,
}

impl SymbolKey {
    pub(crate) fn new(
        path: &[String],
        arity: Option<usize>,
    ) -> Self {
        Self {
            qualified: path.join("::"),
            arity,
        }
    }
}

#[derive(Debug)]
pub(crate) struct DeclArena {
    slots: Vec<Slot>,
    symbols: HashMap<SymbolKey, Vec<NodeId>>,
}

impl DeclArena {
    pub(crate) fn new(root: Declaration) -> Self {
        Self {
            slots: vec![Slot {
                decl: root,
                parent: None,
                children: Vec::new(),
                detached: false,
            }],
            symbols: HashMap::new(),
        }
    }

    /// Append `decl` under `parent`, with its inline children.
    pub(crate) fn push(
        &mut self,
        parent: NodeId,
        mut decl: Declaration,
    ) -> NodeId {
        let inline_children = std::mem::take(&mut decl.children);
        let register = !decl.name.is_empty() && !decl.unresolved;
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            decl,
            parent: Some(parent),
            children: Vec::new(),
            detached: false,
        });
        self.slots[parent.index()].children.push(id);
        if register {
            self.register(id);
        }
        for child in inline_children {
            self.push(id, child);
        }
        id
    }

    /// Make `id` findable under its current qualified name.
    pub(crate) fn register(
        &mut self,
        id: NodeId,
    ) {
        let key = SymbolKey::new(&self.qualified_path(id), self.decl(id).key_arity());
        let entry = self.symbols.entry(key).or_default();
        if !entry.contains(&id) {
            entry.push(id);
        }
    }

    pub(crate) fn decl(
        &self,
        id: NodeId,
    ) -> &Declaration {
        &self.slots[id.index()].decl
    }

    pub(crate) fn decl_mut(
        &mut self,
        id: NodeId,
    ) -> &mut Declaration {
        &mut self.slots[id.index()].decl
    }

    pub(crate) fn parent(
        &self,
        id: NodeId,
    ) -> Option<NodeId> {
        self.slots[id.index()].parent
    }

    pub(crate) fn children(
        &self,
        id: NodeId,
    ) -> &[NodeId] {
        &self.slots[id.index()].children
    }

    pub(crate) fn is_detached(
        &self,
        id: NodeId,
    ) -> bool {
        self.slots[id.index()].detached
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.slots.len() as u32).map(NodeId)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Unlink `id` from its parent. The node keeps its own children.
    pub(crate) fn detach(
        &mut self,
        id: NodeId,
    ) {
        if let Some(parent) = self.slots[id.index()].parent.take() {
            self.slots[parent.index()].children.retain(|&child| child != id);
        }
        self.slots[id.index()].detached = true;
    }

    pub(crate) fn attach(
        &mut self,
        id: NodeId,
        parent: NodeId,
    ) {
        self.detach(id);
        let slot = &mut self.slots[id.index()];
        slot.parent = Some(parent);
        slot.detached = false;
        self.slots[parent.index()].children.push(id);
    }

    /// Drop every child of `id`; used when a record body is replaced.
    pub(crate) fn clear_children(
        &mut self,
        id: NodeId,
    ) {
        let children = std::mem::take(&mut self.slots[id.index()].children);
        for child in children {
            let slot = &mut self.slots[child.index()];
            slot.parent = None;
            slot.detached = true;
        }
    }

    pub(crate) fn move_children(
        &mut self,
        from: NodeId,
        to: NodeId,
    ) {
        let children = std::mem::take(&mut self.slots[from.index()].children);
        for child in children {
            self.slots[child.index()].parent = Some(to);
            self.slots[to.index()].children.push(child);
        }
    }

    /// Names from the outermost named ancestor down to `id`. Anonymous
    /// levels are skipped, so their members read as members of the
    /// enclosing scope.
    pub(crate) fn qualified_path(
        &self,
        id: NodeId,
    ) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            if node == NodeId::ROOT {
                break;
            }
            let decl = self.decl(node);
            if !decl.name.is_empty() {
                path.push(decl.name.clone());
            }
            current = self.parent(node);
        }
        path.reverse();
        path
    }

    /// Live nodes registered under `key`.
    pub(crate) fn lookup<'s>(
        &'s self,
        key: &SymbolKey,
    ) -> impl Iterator<Item = NodeId> + 's {
        self.symbols
            .get(key)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&id| !self.is_detached(id))
    }

    /// An existing sibling under `parent` that `incoming` redeclares.
    pub(crate) fn find_mergeable(
        &self,
        parent: NodeId,
        incoming: &Declaration,
    ) -> Option<NodeId> {
        if incoming.name.is_empty() {
            return None;
        }
        let mut path = self.qualified_path(parent);
        path.push(incoming.name.clone());
        let key = SymbolKey::new(&path, incoming.key_arity());
        self.lookup(&key)
            .find(|&id| self.parent(id) == Some(parent) && redeclares(self.decl(id), incoming))
    }

    /// Fold `incoming` into the node `target`.
    pub(crate) fn merge(
        &mut self,
        target: NodeId,
        incoming: Declaration,
    ) {
        let family = incoming.family();
        let replaces_body = matches!(family, KindFamily::Record | KindFamily::Enum) && incoming.flags.is_defined;
        if replaces_body {
            self.clear_children(target);
        }
        trace!(
            "[outline] merging {} `{}` into node {}",
            incoming.kind,
            incoming.name,
            target.0
        );
        merge_declaration(self.decl_mut(target), &incoming, replaces_body);
        for child in incoming.children {
            self.push(target, child);
        }
    }

    /// Like [`DeclArena::merge`], but the target keeps its span even when
    /// `incoming` carries a record body.
    pub(crate) fn merge_definition(
        &mut self,
        target: NodeId,
        incoming: Declaration,
    ) {
        merge_declaration(self.decl_mut(target), &incoming, false);
        for child in incoming.children {
            self.push(target, child);
        }
    }

    /// Fold the arena node `source` into `target` and detach it.
    pub(crate) fn absorb(
        &mut self,
        target: NodeId,
        source: NodeId,
    ) {
        let incoming = self.decl(source).clone();
        merge_declaration(self.decl_mut(target), &incoming, false);
        self.move_children(source, target);
        self.detach(source);
    }
}

/// Whether `incoming` is another declaration of the entity `existing`.
pub(crate) fn redeclares(
    existing: &Declaration,
    incoming: &Declaration,
) -> bool {
    if existing.family() != incoming.family() {
        return false;
    }
    if existing.kind.is_template() != incoming.kind.is_template() {
        return false;
    }
    match incoming.family() {
        KindFamily::Function => params_match(existing, incoming),
        KindFamily::Variable | KindFamily::Record | KindFamily::Enum => true,
        KindFamily::Other => false,
    }
}

pub(crate) fn params_match(
    a: &Declaration,
    b: &Declaration,
) -> bool {
    match (&a.param_types, &b.param_types) {
        (Some(x), Some(y)) => x == y,
        _ => a.arity == b.arity,
    }
}

/// Merge rules shared by same-scope redeclarations and qualified
/// out-of-line definitions. The target keeps its position; a body seen
/// later is recorded as its definition span. Record and enum bodies
/// instead move the node to the latest body.
fn merge_declaration(
    existing: &mut Declaration,
    incoming: &Declaration,
    replaces_body: bool,
) {
    existing.flags = existing.flags.merged(incoming.flags);
    if existing.template_parameters.is_empty() {
        existing.template_parameters = incoming.template_parameters.clone();
    }
    if existing.access.is_none() {
        existing.access = incoming.access;
    }
    if replaces_body {
        existing.kind = incoming.kind;
        existing.underlying = incoming.underlying;
        existing.signature = incoming.signature.clone();
        existing.span = incoming.span;
        existing.name_span = incoming.name_span;
        existing.definition_span = None;
        return;
    }
    if incoming.flags.is_defined {
        if existing.kind == DeclKind::FunctionDeclaration {
            existing.kind = DeclKind::FunctionDefinition;
            existing.underlying = DeclKind::FunctionDefinition;
        }
        existing.definition_span = Some(incoming.span);
    }
}

#[cfg(test)]
#[path = "../../tests/src/outline/arena_tests.rs"]
mod tests;
