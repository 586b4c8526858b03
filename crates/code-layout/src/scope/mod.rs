//! Stack of nested lexical scopes met during a scan.
//!
//! Scopes live in an arena and point at their parent through a plain
//! [`ScopeId`]; nothing holds a reference back into the arena, so the
//! parent links never form ownership cycles. Exited scopes stay in the
//! arena (the scan is short-lived), only the `current` cursor moves.

use std::fmt;

use serde::Serialize;

use crate::diagnostics::StructureError;
use crate::outline::arena::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Protected,
    Private,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => f.write_str("public"),
            Access::Protected => f.write_str("protected"),
            Access::Private => f.write_str("private"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Struct,
    Class,
    Union,
}

impl RecordKind {
    pub fn default_access(self) -> Access {
        match self {
            RecordKind::Class => Access::Private,
            RecordKind::Struct | RecordKind::Union => Access::Public,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    File,
    Namespace,
    Record(RecordKind),
    FunctionBody,
    TemplateParams,
    /// `extern "C" { ... }`; transparent for nesting.
    Linkage,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::File => f.write_str("file"),
            ScopeKind::Namespace => f.write_str("namespace"),
            ScopeKind::Record(RecordKind::Struct) => f.write_str("struct"),
            ScopeKind::Record(RecordKind::Class) => f.write_str("class"),
            ScopeKind::Record(RecordKind::Union) => f.write_str("union"),
            ScopeKind::FunctionBody => f.write_str("function body"),
            ScopeKind::TemplateParams => f.write_str("template parameter list"),
            ScopeKind::Linkage => f.write_str("linkage block"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const FILE: ScopeId = ScopeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    pub name: Option<String>,
    pub parent: Option<ScopeId>,
    /// Only `Some` for record scopes, and only tracked for C++ input.
    pub access: Option<Access>,
    /// Outline node this scope fills with children, if any.
    pub(crate) node: Option<NodeId>,
    /// The record was introduced by `typedef` and waits for its alias name.
    pub(crate) typedef_alias: bool,
}

impl Scope {
    pub fn is_record(&self) -> bool {
        matches!(self.kind, ScopeKind::Record(_))
    }
}

#[derive(Debug, Clone)]
pub struct ScopeTracker {
    scopes: Vec<Scope>,
    current: ScopeId,
    track_access: bool,
}

impl ScopeTracker {
    /// `track_access` is false for C input, where records have no access levels.
    pub fn new(track_access: bool) -> Self {
        Self {
            scopes: vec![Scope {
                kind: ScopeKind::File,
                name: None,
                parent: None,
                access: None,
                node: None,
                typedef_alias: false,
            }],
            current: ScopeId::FILE,
            track_access,
        }
    }

    /// Push a scope whose parent is the current one and make it current.
    pub fn enter(
        &mut self,
        kind: ScopeKind,
        name: Option<String>,
    ) -> ScopeId {
        let access = match kind {
            ScopeKind::Record(record) if self.track_access => Some(record.default_access()),
            _ => None,
        };
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            kind,
            name,
            parent: Some(self.current),
            access,
            node: None,
            typedef_alias: false,
        });
        self.current = id;
        id
    }

    /// Leave the current scope. Exiting the file scope is a structure error
    /// and leaves the tracker at file scope.
    pub fn exit(&mut self) -> Result<ScopeId, StructureError> {
        let exited = self.current;
        match self.scopes[exited.index()].parent {
            Some(parent) => {
                self.current = parent;
                Ok(exited)
            },
            None => Err(StructureError::UnmatchedClose),
        }
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.current.index()]
    }

    pub fn current_id(&self) -> ScopeId {
        self.current
    }

    pub fn get(
        &self,
        id: ScopeId,
    ) -> &Scope {
        &self.scopes[id.index()]
    }

    pub(crate) fn get_mut(
        &mut self,
        id: ScopeId,
    ) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    /// Update the access level of the innermost record. No-op elsewhere.
    pub fn set_access(
        &mut self,
        level: Access,
    ) {
        if !self.track_access {
            return;
        }
        let id = self.innermost_declarative();
        let scope = &mut self.scopes[id.index()];
        if scope.is_record() {
            scope.access = Some(level);
        }
    }

    /// Access in force at this point: that of the innermost record, if the
    /// innermost declarative scope is one.
    pub fn access_in_force(&self) -> Option<Access> {
        let scope = self.get(self.innermost_declarative());
        if scope.is_record() {
            scope.access
        } else {
            None
        }
    }

    /// Innermost scope that can hold declarations, skipping template
    /// parameter lists.
    pub fn innermost_declarative(&self) -> ScopeId {
        self.ancestors()
            .find(|&id| self.get(id).kind != ScopeKind::TemplateParams)
            .unwrap_or(ScopeId::FILE)
    }

    /// Name of the innermost record, used to recognize constructors.
    pub fn enclosing_record_name(&self) -> Option<&str> {
        let scope = self.get(self.innermost_declarative());
        if scope.is_record() {
            scope.name.as_deref()
        } else {
            None
        }
    }

    /// Current scope first, then every parent up to the file scope.
    pub fn ancestors(&self) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(self.current), move |id| self.get(*id).parent)
    }

    /// Number of open scopes below the file scope.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    pub fn is_file_scope(&self) -> bool {
        self.current == ScopeId::FILE
    }

    pub fn in_function_body(&self) -> bool {
        self.current().kind == ScopeKind::FunctionBody
    }
}

#[cfg(test)]
#[path = "../../tests/src/scope/scope_tests.rs"]
mod tests;
