//! Conversion of an [`Outline`] into LSP `textDocument/documentSymbol`
//! results.

use lsp_types::{DocumentSymbol, Range, SymbolKind};

use crate::outline::{DeclKind, KindFamily, Outline, OutlineNode};
use crate::syntax::token::{Position, Span};

pub fn to_lsp_position(position: Position) -> lsp_types::Position {
    lsp_types::Position::new(position.line, position.column)
}

pub fn to_lsp_range(span: Span) -> Range {
    Range::new(to_lsp_position(span.start), to_lsp_position(span.end))
}

impl Outline {
    /// Hierarchical symbols, one per outline node.
    pub fn to_document_symbols(&self) -> Vec<DocumentSymbol> {
        self.root.children.iter().map(|node| document_symbol(node, None)).collect()
    }
}

fn document_symbol(
    node: &OutlineNode,
    parent: Option<&OutlineNode>,
) -> DocumentSymbol {
    let selection = if node.span.contains(&node.selection_span) {
        node.selection_span
    } else {
        node.span
    };
    let children: Vec<DocumentSymbol> = node
        .children
        .iter()
        .map(|child| document_symbol(child, Some(node)))
        .collect();
    DocumentSymbol {
        name: node.display_name().to_string(),
        detail: (!node.signature.is_empty()).then(|| node.signature.clone()),
        kind: symbol_kind(node, parent),
        tags: None,
        #[allow(deprecated)]
        deprecated: None,
        range: to_lsp_range(node.span),
        selection_range: to_lsp_range(selection),
        children: (!children.is_empty()).then_some(children),
    }
}

fn symbol_kind(
    node: &OutlineNode,
    parent: Option<&OutlineNode>,
) -> SymbolKind {
    let in_record = parent.is_some_and(|p| p.kind.family() == KindFamily::Record);
    match node.kind {
        DeclKind::File => SymbolKind::FILE,
        DeclKind::Namespace => SymbolKind::NAMESPACE,
        DeclKind::Struct | DeclKind::Union => SymbolKind::STRUCT,
        DeclKind::Class | DeclKind::TemplateClass => SymbolKind::CLASS,
        DeclKind::Enum | DeclKind::EnumTypedefAlias => SymbolKind::ENUM,
        DeclKind::Enumerator => SymbolKind::ENUM_MEMBER,
        DeclKind::PlainTypedef | DeclKind::TypeAlias => SymbolKind::TYPE_PARAMETER,
        DeclKind::FunctionDeclaration | DeclKind::FunctionDefinition | DeclKind::TemplateFunction => {
            match parent {
                Some(parent) if in_record && parent.name == node.name => SymbolKind::CONSTRUCTOR,
                _ if in_record => SymbolKind::METHOD,
                _ => SymbolKind::FUNCTION,
            }
        },
        DeclKind::Variable | DeclKind::TemplateVariable if in_record => SymbolKind::FIELD,
        DeclKind::Variable | DeclKind::TemplateVariable => SymbolKind::VARIABLE,
        DeclKind::TemplateSpecialization => match parent.map(|p| p.kind.family()) {
            Some(KindFamily::Function) => SymbolKind::FUNCTION,
            Some(KindFamily::Variable) => SymbolKind::VARIABLE,
            _ => SymbolKind::CLASS,
        },
        DeclKind::MacroObject => SymbolKind::CONSTANT,
        DeclKind::MacroFunction => SymbolKind::FUNCTION,
        DeclKind::Unknown => SymbolKind::NULL,
    }
}

#[cfg(test)]
#[path = "../../tests/src/outline/lsp_tests.rs"]
mod tests;
