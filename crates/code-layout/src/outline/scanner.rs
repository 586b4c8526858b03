//! Single pass over the token stream that drives the scope tracker and the
//! classifier and fills the declaration arena.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::diagnostics::{Diagnostic, LexError, StructureError};
use crate::outline::arena::{DeclArena, NodeId, SymbolKey};
use crate::outline::classifier::{Classifier, Statement};
use crate::outline::declarator::declarator_name;
use crate::outline::statement::split_top_level;
use crate::outline::{DeclKind, Declaration, KindFamily};
use crate::scope::{ScopeId, ScopeKind, ScopeTracker};
use crate::syntax::kind::SyntaxKind;
use crate::syntax::lexer::Lexer;
use crate::syntax::token::{Position, Span, Token, render_tokens, tokens_span};
use crate::syntax::{Language, tokenize};

/// Provisional tree and diagnostics of one scan, before resolution.
#[derive(Debug)]
pub(crate) struct ScanOutput {
    pub arena: DeclArena,
    pub diagnostics: Vec<Diagnostic>,
}

pub(crate) fn scan(
    source: &str,
    language: Language,
) -> ScanOutput {
    let (tokens, lex_errors) = tokenize(source, language);
    let end = Lexer::new(source).end_position();
    let root = Declaration::new(DeclKind::File, "", "", Span::new(Position::default(), end));
    let lex_boundaries = lex_error_boundaries(&tokens, &lex_errors);
    let mut scanner = Scanner {
        tokens: &tokens,
        lex_boundaries,
        classifier: Classifier::new(language),
        tracker: ScopeTracker::new(language.is_cpp()),
        arena: DeclArena::new(root),
        diagnostics: lex_errors.iter().map(Diagnostic::lex).collect(),
        definition_bodies: HashSet::new(),
        end,
    };
    scanner.run();
    scanner.close_remaining();
    debug!(
        "[scan] {} tokens, {} provisional nodes, {} diagnostics",
        tokens.len(),
        scanner.arena.len() - 1,
        scanner.diagnostics.len()
    );
    ScanOutput {
        arena: scanner.arena,
        diagnostics: scanner.diagnostics,
    }
}

/// For each lex error, the index of the first token that starts after it.
fn lex_error_boundaries(
    tokens: &[Token<'_>],
    errors: &[LexError],
) -> Vec<usize> {
    let mut boundaries: Vec<usize> = errors
        .iter()
        .map(|error| tokens.partition_point(|token| token.span.start < error.span.end))
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();
    boundaries
}

struct Scanner<'t, 'a> {
    tokens: &'t [Token<'a>],
    /// Indices of the first token after each malformed literal. No
    /// statement runs across one.
    lex_boundaries: Vec<usize>,
    classifier: Classifier,
    tracker: ScopeTracker,
    arena: DeclArena,
    diagnostics: Vec<Diagnostic>,
    /// Body scopes that belong to a node declared earlier; their closing
    /// brace ends the node's definition span instead of its span.
    definition_bodies: HashSet<ScopeId>,
    end: Position,
}

impl<'t, 'a> Scanner<'t, 'a> {
    fn run(&mut self) {
        let tokens = self.tokens;
        let mut pos = 0;
        while pos < tokens.len() {
            let token = tokens[pos];
            if self.tracker.in_function_body() {
                match token.kind {
                    SyntaxKind::LBrace => {
                        self.tracker.enter(ScopeKind::FunctionBody, None);
                        pos += 1;
                    },
                    SyntaxKind::RBrace => pos = self.close_scope(pos),
                    _ => pos += 1,
                }
                continue;
            }
            if token.kind == SyntaxKind::RBrace {
                pos = self.close_scope(pos);
                continue;
            }
            let limit = self.statement_limit(pos);
            let classification = self.classifier.classify(&mut self.tracker, &tokens[pos..limit]);
            pos += classification.consumed.max(1);
            if let Some(open) = classification.unclosed {
                self.diagnostics.push(Diagnostic::structure(&StructureError::UnclosedGroup, open));
            }
            self.apply(classification.statement);
        }
    }

    fn statement_limit(
        &self,
        pos: usize,
    ) -> usize {
        let next = self.lex_boundaries.partition_point(|&boundary| boundary <= pos);
        self.lex_boundaries.get(next).copied().unwrap_or(self.tokens.len())
    }

    fn apply(
        &mut self,
        statement: Statement,
    ) {
        match statement {
            Statement::Skip => {},
            Statement::Access(level) => self.tracker.set_access(level),
            Statement::Declarations(decls) => {
                for decl in decls {
                    self.declare(decl);
                }
            },
            Statement::OpenScope {
                kind,
                decl,
                typedef_alias,
            } => {
                let name = decl.as_ref().map(|d| d.name.clone()).filter(|name| !name.is_empty());
                let (node, into_definition) = match decl {
                    Some(decl) => self.open_owner(kind, decl),
                    None => (None, false),
                };
                let id = self.tracker.enter(kind, name);
                let scope = self.tracker.get_mut(id);
                scope.node = node;
                scope.typedef_alias = typedef_alias;
                if into_definition {
                    self.definition_bodies.insert(id);
                }
            },
        }
    }

    /// Innermost namespace or record node; linkage blocks and template
    /// parameter lists do not own declarations.
    fn container(&self) -> NodeId {
        for id in self.tracker.ancestors() {
            let scope = self.tracker.get(id);
            match scope.kind {
                ScopeKind::Namespace | ScopeKind::Record(_) => {
                    if let Some(node) = scope.node {
                        return node;
                    }
                },
                ScopeKind::File => return NodeId::ROOT,
                _ => {},
            }
        }
        NodeId::ROOT
    }

    fn declare(
        &mut self,
        mut decl: Declaration,
    ) -> NodeId {
        if decl.kind == DeclKind::Unknown {
            self.diagnostics.push(Diagnostic::ambiguity(&decl.signature, decl.span));
        }
        let parent = self.container();
        if !decl.qualifier.is_empty() || decl.kind == DeclKind::TemplateSpecialization {
            decl.unresolved = true;
            return self.arena.push(parent, decl);
        }
        if let Some(existing) = self.arena.find_mergeable(parent, &decl) {
            self.arena.merge(existing, decl);
            return existing;
        }
        self.arena.push(parent, decl)
    }

    /// Declare the node that owns a scope about to be entered. The flag is
    /// set when the body belongs to a node declared earlier.
    fn open_owner(
        &mut self,
        kind: ScopeKind,
        decl: Declaration,
    ) -> (Option<NodeId>, bool) {
        let parent = self.container();
        match kind {
            // Each `namespace x {` block is its own node.
            ScopeKind::Namespace => (Some(self.arena.push(parent, decl)), false),
            ScopeKind::Record(_) if !decl.qualifier.is_empty() => match self.find_qualified_record(parent, &decl) {
                Some(target) => {
                    self.arena.merge_definition(target, decl);
                    (Some(target), true)
                },
                None => (Some(self.declare(decl)), false),
            },
            ScopeKind::FunctionBody => {
                let merges = decl.qualifier.is_empty()
                    && decl.kind != DeclKind::TemplateSpecialization
                    && self.arena.find_mergeable(parent, &decl).is_some();
                (Some(self.declare(decl)), merges)
            },
            _ => (Some(self.declare(decl)), false),
        }
    }

    /// `class Outer::Inner {` completing a nested forward declaration.
    fn find_qualified_record(
        &self,
        parent: NodeId,
        decl: &Declaration,
    ) -> Option<NodeId> {
        let mut container = Some(parent);
        while let Some(node) = container {
            let mut path = self.arena.qualified_path(node);
            path.extend(decl.qualifier.iter().cloned());
            path.push(decl.name.clone());
            let found = self
                .arena
                .lookup(&SymbolKey::new(&path, None))
                .find(|&id| self.arena.decl(id).family() == KindFamily::Record);
            if found.is_some() {
                return found;
            }
            container = self.arena.parent(node);
        }
        None
    }

    fn close_scope(
        &mut self,
        pos: usize,
    ) -> usize {
        let brace = self.tokens[pos];
        let id = self.tracker.current_id();
        if let Err(error) = self.tracker.exit() {
            debug!("[scan] {error} at {}", brace.span.start);
            self.diagnostics.push(Diagnostic::structure(&error, brace.span));
            return pos + 1;
        }
        let scope = self.tracker.get(id).clone();
        let mut end = brace.span.end;
        let mut next = pos + 1;
        if scope.is_record()
            && let Some(node) = scope.node
        {
            let (tail_end, after) = self.record_tail(node, scope.typedef_alias, next);
            if let Some(tail_end) = tail_end {
                end = tail_end;
            }
            next = after;
        }
        if let Some(node) = scope.node {
            self.extend(node, id, end);
        }
        next
    }

    /// Declarators after a record body: `} alias;`, `} a, *b;`. Returns the
    /// end the record's own span should take, and where scanning resumes.
    fn record_tail(
        &mut self,
        node: NodeId,
        typedef_alias: bool,
        from: usize,
    ) -> (Option<Position>, usize) {
        let tokens = self.tokens;
        let mut stop = from;
        while stop < tokens.len()
            && !matches!(
                tokens[stop].kind,
                SyntaxKind::Semicolon | SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::Preprocessor
            )
        {
            stop += 1;
        }
        let semicolon = tokens.get(stop).filter(|t| t.is(SyntaxKind::Semicolon));
        let next = if semicolon.is_some() { stop + 1 } else { stop };
        let tail = &tokens[from..stop];
        if tail.is_empty() {
            return (semicolon.map(|t| t.span.end), next);
        }

        let record = self.arena.decl(node).clone();
        let access = self.tracker.access_in_force();
        let mut own_end = None;
        for (index, segment) in split_top_level(tail, SyntaxKind::Comma).into_iter().enumerate() {
            let (Some(name), Some(span)) = (declarator_name(segment), tokens_span(segment)) else {
                continue;
            };
            let name_span = segment[name.end - 1].span;
            if typedef_alias && index == 0 && record.name.is_empty() {
                let decl = self.arena.decl_mut(node);
                decl.name = name.name;
                decl.name_span = Some(name_span);
                decl.signature = format!("typedef {} {}", record.signature, render_tokens(segment));
                self.arena.register(node);
                own_end = Some(semicolon.map_or(span.end, |t| t.span.end));
                trace!("[scan] anonymous record named by typedef `{}`", self.arena.decl(node).name);
                continue;
            }
            let (kind, signature) = if typedef_alias {
                (
                    DeclKind::PlainTypedef,
                    format!("typedef {} {}", record.signature, render_tokens(segment)),
                )
            } else {
                (DeclKind::Variable, format!("{} {}", record.signature, render_tokens(segment)))
            };
            let mut decl = Declaration::new(kind, name.name, signature, span);
            decl.name_span = Some(name_span);
            decl.access = access;
            decl.flags.is_defined = kind == DeclKind::Variable;
            self.declare(decl);
        }
        (own_end, next)
    }

    fn extend(
        &mut self,
        node: NodeId,
        scope: ScopeId,
        end: Position,
    ) {
        let into_definition = self.definition_bodies.contains(&scope);
        let decl = self.arena.decl_mut(node);
        match (into_definition, decl.definition_span.as_mut()) {
            (true, Some(definition)) => definition.end = end,
            _ => decl.span.end = end,
        }
    }

    /// Report and close scopes still open at end of input; their nodes run
    /// to the end of the file.
    fn close_remaining(&mut self) {
        while !self.tracker.is_file_scope() {
            let id = self.tracker.current_id();
            let scope = self.tracker.get(id).clone();
            if scope.node.is_some() || scope.kind != ScopeKind::FunctionBody {
                let error = StructureError::UnclosedScope {
                    kind: scope.kind,
                    name: scope.name.clone().unwrap_or_else(|| "<anonymous>".to_string()),
                };
                let span = scope
                    .node
                    .map(|node| self.arena.decl(node).span)
                    .unwrap_or(Span::new(self.end, self.end));
                debug!("[scan] {error}");
                self.diagnostics.push(Diagnostic::structure(&error, span));
            }
            if let Some(node) = scope.node {
                self.extend(node, id, self.end);
            }
            let _ = self.tracker.exit();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/outline/scanner_tests.rs"]
mod tests;
