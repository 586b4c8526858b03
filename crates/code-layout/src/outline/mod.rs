//! Outline extraction: the declaration tree an editor shows in its
//! navigation panel.
//!
//! A scan runs in one pass over the token stream ([`scanner`]), with the
//! [`statement`] splitter and [`classifier`] turning each statement into
//! declarations while the [`crate::scope::ScopeTracker`] follows nesting.
//! Qualified out-of-line definitions and specializations are then merged by
//! the [`resolver`], and [`builder`] freezes the result into an
//! [`OutlineNode`] tree.

pub(crate) mod arena;
pub(crate) mod builder;
pub(crate) mod classifier;
pub(crate) mod declarator;
pub mod lsp;
pub(crate) mod resolver;
pub(crate) mod scanner;
pub(crate) mod statement;

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::scope::Access;
use crate::syntax::Language;
use crate::syntax::token::{Position, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
    File,
    Namespace,
    Struct,
    Class,
    Union,
    Enum,
    EnumTypedefAlias,
    PlainTypedef,
    TypeAlias,
    FunctionDeclaration,
    FunctionDefinition,
    Variable,
    TemplateFunction,
    TemplateClass,
    TemplateVariable,
    TemplateSpecialization,
    MacroObject,
    MacroFunction,
    Enumerator,
    Unknown,
}

/// Groups of kinds that may describe the same entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KindFamily {
    Function,
    Variable,
    Record,
    Enum,
    Other,
}

impl DeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::File => "file",
            DeclKind::Namespace => "namespace",
            DeclKind::Struct => "struct",
            DeclKind::Class => "class",
            DeclKind::Union => "union",
            DeclKind::Enum => "enum",
            DeclKind::EnumTypedefAlias => "enum-typedef-alias",
            DeclKind::PlainTypedef => "plain-typedef",
            DeclKind::TypeAlias => "type-alias",
            DeclKind::FunctionDeclaration => "function-declaration",
            DeclKind::FunctionDefinition => "function-definition",
            DeclKind::Variable => "variable",
            DeclKind::TemplateFunction => "template-function",
            DeclKind::TemplateClass => "template-class",
            DeclKind::TemplateVariable => "template-variable",
            DeclKind::TemplateSpecialization => "template-specialization",
            DeclKind::MacroObject => "macro-object",
            DeclKind::MacroFunction => "macro-function",
            DeclKind::Enumerator => "enumerator",
            DeclKind::Unknown => "unknown",
        }
    }

    pub(crate) fn family(self) -> KindFamily {
        match self {
            DeclKind::FunctionDeclaration | DeclKind::FunctionDefinition | DeclKind::TemplateFunction => {
                KindFamily::Function
            },
            DeclKind::Variable | DeclKind::TemplateVariable => KindFamily::Variable,
            DeclKind::Struct | DeclKind::Class | DeclKind::Union | DeclKind::TemplateClass => KindFamily::Record,
            DeclKind::Enum | DeclKind::EnumTypedefAlias => KindFamily::Enum,
            _ => KindFamily::Other,
        }
    }

    pub fn is_template(self) -> bool {
        matches!(
            self,
            DeclKind::TemplateFunction
                | DeclKind::TemplateClass
                | DeclKind::TemplateVariable
                | DeclKind::TemplateSpecialization
        )
    }

    pub fn is_macro(self) -> bool {
        matches!(self, DeclKind::MacroObject | DeclKind::MacroFunction)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeclFlags {
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_const: bool,
    pub is_override: bool,
    pub is_deleted: bool,
    pub is_defaulted: bool,
    /// `= 0`
    pub is_pure: bool,
    /// A body or initializer exists somewhere in the file.
    pub is_defined: bool,
    /// Declared through a `(*name)(...)` declarator.
    pub is_function_pointer: bool,
    /// Qualified definition or specialization with no matching declaration.
    pub orphan_definition: bool,
}

impl DeclFlags {
    /// Union of both flag sets.
    pub(crate) fn merged(
        self,
        other: DeclFlags,
    ) -> DeclFlags {
        DeclFlags {
            is_static: self.is_static || other.is_static,
            is_virtual: self.is_virtual || other.is_virtual,
            is_const: self.is_const || other.is_const,
            is_override: self.is_override || other.is_override,
            is_deleted: self.is_deleted || other.is_deleted,
            is_defaulted: self.is_defaulted || other.is_defaulted,
            is_pure: self.is_pure || other.is_pure,
            is_defined: self.is_defined || other.is_defined,
            is_function_pointer: self.is_function_pointer || other.is_function_pointer,
            orphan_definition: self.orphan_definition && other.orphan_definition,
        }
    }
}

/// A declaration as the scan first sees it, before it is frozen into an
/// [`OutlineNode`].
#[derive(Debug, Clone)]
pub(crate) struct Declaration {
    pub kind: DeclKind,
    /// Kind before any `template-` tagging.
    pub underlying: DeclKind,
    pub name: String,
    pub signature: String,
    pub access: Option<Access>,
    pub flags: DeclFlags,
    pub template_parameters: Vec<String>,
    pub span: Span,
    pub name_span: Option<Span>,
    pub definition_span: Option<Span>,
    /// `A::B` in `A::B::name`, template arguments stripped.
    pub qualifier: Vec<String>,
    /// Qualifier segments written with template arguments (`A<T>::`).
    pub templated_qualifiers: usize,
    /// Parameter count for function-like declarations.
    pub arity: Option<usize>,
    /// Parameter types with names and defaults removed.
    pub param_types: Option<Vec<String>>,
    /// Explicit template argument count after the name (`f<int>`).
    pub template_args: Option<usize>,
    /// Children produced together with this declaration (enumerators).
    pub children: Vec<Declaration>,
    /// Waiting for the resolver pass.
    pub unresolved: bool,
}

impl Declaration {
    pub(crate) fn new(
        kind: DeclKind,
        name: impl Into<String>,
        signature: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            underlying: kind,
            name: name.into(),
            signature: signature.into(),
            access: None,
            flags: DeclFlags::default(),
            template_parameters: Vec::new(),
            span,
            name_span: None,
            definition_span: None,
            qualifier: Vec::new(),
            templated_qualifiers: 0,
            arity: None,
            param_types: None,
            template_args: None,
            children: Vec::new(),
            unresolved: false,
        }
    }

    pub(crate) fn family(&self) -> KindFamily {
        self.underlying.family()
    }

    /// Arity used in symbol-table keys: only function-like entities have one.
    pub(crate) fn key_arity(&self) -> Option<usize> {
        match self.family() {
            KindFamily::Function => Some(self.arity.unwrap_or(0)),
            _ => None,
        }
    }
}

/// Path-stable identity of a node: the names from the root down to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeKey(Vec<String>);

impl NodeKey {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub(crate) fn child(
        &self,
        segment: String,
    ) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("::"))
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One entry of the finished outline. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineNode {
    pub key: NodeKey,
    pub kind: DeclKind,
    pub name: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    pub flags: DeclFlags,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub template_parameters: Vec<String>,
    /// Where the node is declared, nested inside its parent's span. A body
    /// written elsewhere (`void A::f() {}` outside `class A`) is not part of
    /// it; that range is `definition_span`. Use [`OutlineNode::encloses`] to
    /// test against both.
    pub span: Span,
    /// The name inside `span`, for jump-to-location.
    pub selection_span: Span,
    /// Where the body lives when it is written apart from the declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_span: Option<Span>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// This node and everything below it, in source order.
    pub fn descendants(&self) -> impl Iterator<Item = &OutlineNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn child(
        &self,
        name: &str,
    ) -> Option<&OutlineNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// True when `position` falls in the declaration or its separate body.
    pub fn encloses(
        &self,
        position: Position,
    ) -> bool {
        self.span.contains_position(position)
            || self.definition_span.is_some_and(|span| span.contains_position(position))
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "<anonymous>"
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub language: Language,
    pub include_macros: bool,
    pub include_enumerators: bool,
    pub include_unknown: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            language: Language::Cpp,
            include_macros: true,
            include_enumerators: true,
            include_unknown: true,
        }
    }
}

impl ExtractOptions {
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }
}

/// Result of one scan: the tree plus every non-fatal problem met on the way.
#[derive(Debug, Clone, Serialize)]
pub struct Outline {
    pub language: Language,
    pub root: OutlineNode,
    pub diagnostics: Vec<Diagnostic>,
}

impl Outline {
    /// All nodes below the root, in source order.
    pub fn iter(&self) -> impl Iterator<Item = &OutlineNode> {
        self.root.descendants().skip(1)
    }

    pub fn find(
        &self,
        key: &str,
    ) -> Option<&OutlineNode> {
        self.iter().find(|node| node.key.to_string() == key)
    }

    pub fn find_all<'s>(
        &'s self,
        name: &'s str,
    ) -> impl Iterator<Item = &'s OutlineNode> + 's {
        self.iter().filter(move |node| node.name == name)
    }

    /// Nodes enclosing `position`, outermost first. A body written apart
    /// from its declaration is reached through the declaring node.
    pub fn path_at(
        &self,
        position: Position,
    ) -> Vec<&OutlineNode> {
        let mut path = Vec::new();
        let mut current = &self.root;
        loop {
            let next = current.children.iter().find(|c| c.encloses(position)).or_else(|| {
                current.children.iter().find(|c| {
                    c.descendants().any(|d| d.definition_span.is_some_and(|span| span.contains_position(position)))
                })
            });
            let Some(next) = next else {
                break;
            };
            path.push(next);
            current = next;
        }
        path
    }

    /// Indented `kind name` listing, one node per line.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        for child in &self.root.children {
            render_node(child, 0, &mut out);
        }
        out
    }
}

fn render_node(
    node: &OutlineNode,
    depth: usize,
    out: &mut String,
) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(node.kind.as_str());
    out.push(' ');
    out.push_str(node.display_name());
    if let Some(access) = node.access {
        out.push_str(&format!(" ({access})"));
    }
    out.push('\n');
    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

/// Scan `source` with default options for `language`.
pub fn extract(
    source: &str,
    language: Language,
) -> Outline {
    extract_with(source, &ExtractOptions::for_language(language))
}

pub fn extract_with(
    source: &str,
    options: &ExtractOptions,
) -> Outline {
    let scan = scanner::scan(source, options.language);
    let mut arena = scan.arena;
    let mut diagnostics = scan.diagnostics;
    resolver::resolve(&mut arena, &mut diagnostics);
    let root = builder::build(&arena, options);
    debug!(
        "[outline] {} scan: {} nodes, {} diagnostics",
        options.language,
        root.descendants().count() - 1,
        diagnostics.len(),
    );
    Outline {
        language: options.language,
        root,
        diagnostics,
    }
}
