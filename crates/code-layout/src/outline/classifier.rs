//! First-match dispatch from one statement to the declarations it makes.
//!
//! Rules are tried in a fixed order: macro definitions, template headers,
//! namespaces, records, typedefs, enums, then function and variable
//! declarators. Access labels only update the scope tracker.

use tracing::trace;

use crate::outline::declarator::{self, DeclContext, declarator_name, has_type_tokens};
use crate::outline::statement::{
    self, BodyKind, Terminator, matching_angle, skip_balanced, split_top_level, top_level_equal,
};
use crate::outline::{DeclKind, Declaration, KindFamily};
use crate::scope::{Access, RecordKind, ScopeKind, ScopeTracker};
use crate::syntax::Language;
use crate::syntax::kind::SyntaxKind;
use crate::syntax::token::{Position, Span, Token, render_tokens, tokens_span};

#[derive(Debug, Clone)]
pub(crate) enum Statement {
    Declarations(Vec<Declaration>),
    Access(Access),
    /// The statement ends with a `{` opening a scope of `kind`.
    OpenScope {
        kind: ScopeKind,
        decl: Option<Declaration>,
        /// `typedef struct {`: the alias follows the closing brace.
        typedef_alias: bool,
    },
    Skip,
}

#[derive(Debug, Clone)]
pub(crate) struct Classification {
    pub statement: Statement,
    pub consumed: usize,
    /// Opening brace of an inline group that is never closed.
    pub unclosed: Option<Span>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Classifier {
    language: Language,
}

impl Classifier {
    pub(crate) fn new(language: Language) -> Self {
        Self { language }
    }

    /// Classify the statement at the start of `tokens`.
    pub(crate) fn classify(
        &self,
        tracker: &mut ScopeTracker,
        tokens: &[Token<'_>],
    ) -> Classification {
        let extent = statement::split(tokens, self.language);
        let run = &tokens[..extent.len];
        let mut statement = self.classify_run(tracker, run, extent.terminator);
        if let Terminator::Body(body) = extent.terminator
            && !matches!(statement, Statement::OpenScope { .. })
        {
            statement = force_scope(statement, body);
        }
        if let Some(first) = run.first() {
            trace!("[classify] {} tokens at {} -> {}", run.len(), first.span.start, statement_label(&statement));
        }
        let unclosed = match extent.terminator {
            Terminator::Unclosed(open) => Some(open),
            _ => None,
        };
        Classification {
            statement,
            consumed: extent.len,
            unclosed,
        }
    }

    fn classify_run(
        &self,
        tracker: &mut ScopeTracker,
        run: &[Token<'_>],
        terminator: Terminator,
    ) -> Statement {
        let Some(first) = run.first() else {
            return Statement::Skip;
        };
        match terminator {
            Terminator::Directive => return directive(first),
            Terminator::Label => return access_label(first),
            _ => {},
        }
        let head = head_of(run, terminator);
        if !self.language.is_cpp() && opens_cpp_construct(head) {
            return unknown(run, head, None);
        }
        match head.first() {
            None => Statement::Skip,
            Some(first) if first.kind == SyntaxKind::KwTemplate => self.template(tracker, run, head, terminator),
            Some(_) => self.plain(tracker, run, head, terminator),
        }
    }

    fn template(
        &self,
        tracker: &mut ScopeTracker,
        run: &[Token<'_>],
        head: &[Token<'_>],
        terminator: Terminator,
    ) -> Statement {
        let mut headers: Vec<Vec<String>> = Vec::new();
        let mut index = 0;
        while head.get(index).is_some_and(|t| t.is(SyntaxKind::KwTemplate))
            && head.get(index + 1).is_some_and(|t| t.is(SyntaxKind::Less))
        {
            let Some(end) = matching_angle(head, index + 1) else {
                break;
            };
            let params = &head[index + 2..end - 1];
            headers.push(if params.is_empty() {
                Vec::new()
            } else {
                split_top_level(params, SyntaxKind::Comma).into_iter().map(render_tokens).collect()
            });
            index = end;
        }
        // `template class X<int>;` instantiates, it declares nothing new.
        if headers.is_empty() || index >= head.len() {
            return Statement::Skip;
        }

        tracker.enter(ScopeKind::TemplateParams, None);
        let inner = self.plain(tracker, run, &head[index..], terminator);
        let _ = tracker.exit();

        let prefix = render_tokens(&head[..index]);
        let templated = |decl: Declaration| templatize(decl, &headers, &prefix);
        match inner {
            Statement::Declarations(decls) => Statement::Declarations(decls.into_iter().map(templated).collect()),
            Statement::OpenScope {
                kind,
                decl,
                typedef_alias,
            } => Statement::OpenScope {
                kind,
                decl: decl.map(templated),
                typedef_alias,
            },
            other => other,
        }
    }

    fn plain(
        &self,
        tracker: &ScopeTracker,
        run: &[Token<'_>],
        head: &[Token<'_>],
        terminator: Terminator,
    ) -> Statement {
        let ctx = DeclContext {
            access: tracker.access_in_force(),
            record_name: tracker.enclosing_record_name(),
            in_record: tracker.get(tracker.innermost_declarative()).is_record(),
        };
        let second = head.get(1).map(|t| t.kind);
        match head[0].kind {
            SyntaxKind::KwStaticAssert | SyntaxKind::KwFriend | SyntaxKind::KwAsm => Statement::Skip,
            SyntaxKind::KwUsing => using(&ctx, run, head),
            SyntaxKind::KwNamespace => namespace(run, head, 0, terminator),
            SyntaxKind::KwInline | SyntaxKind::KwExport if second == Some(SyntaxKind::KwNamespace) => {
                namespace(run, head, 1, terminator)
            },
            SyntaxKind::KwTypedef => typedef(&ctx, run, head, terminator),
            SyntaxKind::KwExtern if second == Some(SyntaxKind::String) => {
                if terminator == Terminator::Body(BodyKind::Linkage) {
                    Statement::OpenScope {
                        kind: ScopeKind::Linkage,
                        decl: None,
                        typedef_alias: false,
                    }
                } else if head.len() > 2 {
                    self.plain(tracker, run, &head[2..], terminator)
                } else {
                    Statement::Skip
                }
            },
            SyntaxKind::KwExtern if second == Some(SyntaxKind::KwTemplate) => Statement::Skip,
            SyntaxKind::KwEnum => enumeration(&ctx, run, head, false),
            SyntaxKind::KwClass | SyntaxKind::KwStruct | SyntaxKind::KwUnion => record(&ctx, run, head, terminator),
            _ => declarators(&ctx, run, head, terminator),
        }
    }
}

fn statement_label(statement: &Statement) -> String {
    match statement {
        Statement::Declarations(decls) => decls
            .iter()
            .map(|d| format!("{} {}", d.kind, d.name))
            .collect::<Vec<_>>()
            .join(", "),
        Statement::Access(level) => format!("{level}:"),
        Statement::OpenScope { kind, decl, .. } => match decl {
            Some(decl) => format!("{kind} {} {{", decl.name),
            None => format!("{kind} {{"),
        },
        Statement::Skip => "skip".to_string(),
    }
}

/// `namespace x`, `class X`, `template <` and `using x` written in C. The
/// words are plain identifiers there, so the whole run stays opaque.
fn opens_cpp_construct(head: &[Token<'_>]) -> bool {
    let (Some(first), Some(second)) = (head.first(), head.get(1)) else {
        return false;
    };
    match first.text {
        "namespace" => matches!(second.kind, SyntaxKind::Ident | SyntaxKind::LBrace),
        "class" => matches!(second.kind, SyntaxKind::Ident | SyntaxKind::LBrace | SyntaxKind::Colon),
        "template" => second.is(SyntaxKind::Less),
        "using" => second.kind == SyntaxKind::Ident,
        _ => false,
    }
}

/// Statement tokens without the `;` or opening `{` that ends them.
fn head_of<'t, 'a>(
    run: &'t [Token<'a>],
    terminator: Terminator,
) -> &'t [Token<'a>] {
    let trailing = match terminator {
        Terminator::Semicolon | Terminator::Body(_) => true,
        Terminator::Block | Terminator::Unclosed(_) => run.last().is_some_and(|t| t.is(SyntaxKind::Semicolon)),
        _ => false,
    };
    if trailing && !run.is_empty() {
        &run[..run.len() - 1]
    } else {
        run
    }
}

/// A body opener whose head no rule recognized still needs a scope so its
/// closing brace balances.
fn force_scope(
    statement: Statement,
    body: BodyKind,
) -> Statement {
    let decl = match statement {
        Statement::Declarations(decls) => decls.into_iter().next(),
        _ => None,
    };
    let kind = match body {
        BodyKind::Namespace => ScopeKind::Namespace,
        BodyKind::Record => ScopeKind::Record(RecordKind::Struct),
        BodyKind::Linkage => ScopeKind::Linkage,
        BodyKind::Function => ScopeKind::FunctionBody,
    };
    Statement::OpenScope {
        kind,
        decl,
        typedef_alias: false,
    }
}

fn access_label(token: &Token<'_>) -> Statement {
    match token.kind {
        SyntaxKind::KwPublic => Statement::Access(Access::Public),
        SyntaxKind::KwProtected => Statement::Access(Access::Protected),
        SyntaxKind::KwPrivate => Statement::Access(Access::Private),
        _ => Statement::Skip,
    }
}

/// `#define NAME(` is function-like only when the parenthesis touches the
/// name. Other directives are not declarations.
fn directive(token: &Token<'_>) -> Statement {
    let text = token.text;
    let after_hash = text[1..].trim_start();
    let Some(rest) = after_hash.strip_prefix("define") else {
        return Statement::Skip;
    };
    if !rest.starts_with([' ', '\t']) {
        return Statement::Skip;
    }
    let rest = rest.trim_start_matches([' ', '\t']);
    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return Statement::Skip;
    }
    let name = &rest[..name_len];
    let kind = if rest[name_len..].starts_with('(') {
        DeclKind::MacroFunction
    } else {
        DeclKind::MacroObject
    };

    let mut decl = Declaration::new(kind, name, text, token.span);
    let name_offset = text.len() - rest.len();
    let before = &text[..name_offset];
    if !before.contains('\n') {
        let column = token.span.start.column + utf16_len(before);
        let start = Position::new(token.span.start.line, column);
        decl.name_span = Some(Span::new(start, Position::new(start.line, column + utf16_len(name))));
    }
    Statement::Declarations(vec![decl])
}

fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Tag a declaration found after `template<...>` headers.
fn templatize(
    mut decl: Declaration,
    headers: &[Vec<String>],
    prefix: &str,
) -> Declaration {
    // Headers for `A<T>::` qualifiers belong to the enclosing class.
    let own = headers.len().saturating_sub(decl.templated_qualifiers);
    if own == 0 || decl.kind == DeclKind::Unknown {
        return decl;
    }
    let Some(params) = headers.last() else {
        return decl;
    };
    let specialization = params.is_empty() || decl.template_args.is_some();
    decl.kind = if specialization {
        DeclKind::TemplateSpecialization
    } else {
        match decl.family() {
            KindFamily::Function => DeclKind::TemplateFunction,
            KindFamily::Record => DeclKind::TemplateClass,
            KindFamily::Variable => DeclKind::TemplateVariable,
            _ => decl.kind,
        }
    };
    decl.template_parameters = params.clone();
    decl.signature = format!("{prefix} {}", decl.signature);
    decl
}

fn using(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
) -> Statement {
    match (head.get(1), head.get(2)) {
        (Some(name), Some(equal)) if name.kind == SyntaxKind::Ident && equal.kind == SyntaxKind::Equal => {
            alias(ctx, run, head, name)
        },
        // `using namespace x;` and `using a::b;` bring names in, they declare nothing.
        _ => Statement::Skip,
    }
}

fn alias(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
    name: &Token<'_>,
) -> Statement {
    let Some(span) = tokens_span(run) else {
        return Statement::Skip;
    };
    let mut decl = Declaration::new(DeclKind::TypeAlias, name.text, render_tokens(head), span);
    decl.name_span = Some(name.span);
    decl.access = ctx.access;
    Statement::Declarations(vec![decl])
}

/// `namespace a::b {`, `namespace {` and `namespace a = b;`. `skip` counts
/// leading `inline`/`export` tokens.
fn namespace(
    run: &[Token<'_>],
    head: &[Token<'_>],
    skip: usize,
    terminator: Terminator,
) -> Statement {
    let after = &head[skip + 1..];
    if top_level_equal(after).is_some() {
        return match after.first() {
            Some(name) if name.kind == SyntaxKind::Ident => {
                let ctx = DeclContext {
                    access: None,
                    record_name: None,
                    in_record: false,
                };
                alias(&ctx, run, head, name)
            },
            _ => unknown(run, head, None),
        };
    }
    if terminator != Terminator::Body(BodyKind::Namespace) {
        return unknown(run, head, None);
    }
    let name_tokens: Vec<Token<'_>> = after
        .iter()
        .take_while(|t| matches!(t.kind, SyntaxKind::Ident | SyntaxKind::DoubleColon | SyntaxKind::KwInline))
        .copied()
        .collect();
    let name = name_tokens
        .iter()
        .filter(|t| t.kind == SyntaxKind::Ident)
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join("::");
    let Some(span) = tokens_span(run) else {
        return Statement::Skip;
    };
    let mut decl = Declaration::new(DeclKind::Namespace, name, render_tokens(head), span);
    decl.name_span = tokens_span(&name_tokens);
    decl.flags.is_defined = true;
    Statement::OpenScope {
        kind: ScopeKind::Namespace,
        decl: Some(decl),
        typedef_alias: false,
    }
}

fn unknown(
    run: &[Token<'_>],
    head: &[Token<'_>],
    access: Option<Access>,
) -> Statement {
    match declarator::unknown(run, head, access) {
        Some(decl) => Statement::Declarations(vec![decl]),
        None => Statement::Skip,
    }
}

fn declarators(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
    terminator: Terminator,
) -> Statement {
    let decls = match declarator::classify(ctx, run, head, terminator) {
        Some(decls) => decls,
        None => declarator::unknown(run, head, ctx.access).into_iter().collect(),
    };
    if terminator == Terminator::Body(BodyKind::Function) {
        return Statement::OpenScope {
            kind: ScopeKind::FunctionBody,
            decl: decls.into_iter().next(),
            typedef_alias: false,
        };
    }
    Statement::Declarations(decls)
}

fn record_kind(token: &Token<'_>) -> Option<RecordKind> {
    match token.kind {
        SyntaxKind::KwClass => Some(RecordKind::Class),
        SyntaxKind::KwStruct => Some(RecordKind::Struct),
        SyntaxKind::KwUnion => Some(RecordKind::Union),
        _ => None,
    }
}

fn record(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
    terminator: Terminator,
) -> Statement {
    let Some(kind) = record_kind(&head[0]) else {
        return unknown(run, head, ctx.access);
    };
    if terminator == Terminator::Body(BodyKind::Record) {
        return match record_decl(ctx, run, head, kind, true) {
            Some(decl) => Statement::OpenScope {
                kind: ScopeKind::Record(kind),
                decl: Some(decl),
                typedef_alias: false,
            },
            None => Statement::Skip,
        };
    }
    if is_forward_declaration(&head[1..]) {
        return match record_decl(ctx, run, head, kind, false) {
            Some(decl) => Statement::Declarations(vec![decl]),
            None => Statement::Skip,
        };
    }
    // `struct S value;` or `struct S *make(void);`
    declarators(ctx, run, head, terminator)
}

/// `Name`, `A::B`, `X<int>` or attributes followed by one of those.
fn is_forward_declaration(tokens: &[Token<'_>]) -> bool {
    let mut index = 0;
    while index < tokens.len() {
        match tokens[index].kind {
            SyntaxKind::LDoubleBracket => {
                match tokens[index..].iter().position(|t| t.is(SyntaxKind::RDoubleBracket)) {
                    Some(offset) => index += offset + 1,
                    None => return false,
                }
            },
            SyntaxKind::KwAlignas => match statement::matching_paren(tokens, index + 1) {
                Some(end) => index = end,
                None => return false,
            },
            _ => break,
        }
    }
    let name = &tokens[index..];
    if name.is_empty() {
        return false;
    }
    let mut expect_ident = true;
    let mut position = 0;
    while position < name.len() {
        let token = &name[position];
        match token.kind {
            SyntaxKind::Ident if expect_ident => expect_ident = false,
            SyntaxKind::DoubleColon if !expect_ident => expect_ident = true,
            SyntaxKind::Less if !expect_ident => match matching_angle(name, position) {
                Some(end) => {
                    position = end;
                    continue;
                },
                None => return false,
            },
            _ => return false,
        }
        position += 1;
    }
    !expect_ident
}

/// Record head `struct [attrs] [A::]Name[<args>] [final] [: bases]`.
fn record_decl(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
    kind: RecordKind,
    defined: bool,
) -> Option<Declaration> {
    let base = statement::find_top_level(head, |t, _| t.kind == SyntaxKind::Colon).unwrap_or(head.len());
    let name_part = &head[..base];
    let span = tokens_span(run)?;
    let decl_kind = match kind {
        RecordKind::Struct => DeclKind::Struct,
        RecordKind::Class => DeclKind::Class,
        RecordKind::Union => DeclKind::Union,
    };

    let mut decl = Declaration::new(decl_kind, "", render_tokens(head), span);
    decl.access = ctx.access;
    decl.flags.is_defined = defined;
    if let Some(index) = record_name_index(name_part)
        && let Some(name) = declarator::qualified_name_before(name_part, index + 1)
    {
        decl.name = name.name;
        decl.name_span = Some(name_part[index].span);
        decl.qualifier = name.qualifier;
        decl.templated_qualifiers = name.templated_qualifiers;
        decl.template_args = template_args(name_part, index + 1);
    }
    Some(decl)
}

/// Last identifier of the record head that names the record, skipping
/// template arguments, attribute macros and `final`.
fn record_name_index(name_part: &[Token<'_>]) -> Option<usize> {
    let mut found = None;
    let mut depth = 0usize;
    let mut index = 1;
    while index < name_part.len() {
        let token = &name_part[index];
        match token.kind {
            SyntaxKind::LParen | SyntaxKind::LBracket => depth += 1,
            SyntaxKind::LDoubleBracket => depth += 2,
            SyntaxKind::RParen | SyntaxKind::RBracket => depth = depth.saturating_sub(1),
            SyntaxKind::RDoubleBracket => depth = depth.saturating_sub(2),
            SyntaxKind::Less if depth == 0 => {
                if let Some(end) = matching_angle(name_part, index) {
                    index = end;
                    continue;
                }
            },
            SyntaxKind::Ident
                if depth == 0
                    && token.text != "final"
                    && token.text != "sealed"
                    && !name_part.get(index + 1).is_some_and(|t| t.is(SyntaxKind::LParen)) =>
            {
                found = Some(index);
            },
            _ => {},
        }
        index += 1;
    }
    found
}

fn template_args(
    tokens: &[Token<'_>],
    name_end: usize,
) -> Option<usize> {
    if !tokens.get(name_end)?.is(SyntaxKind::Less) {
        return None;
    }
    let close = matching_angle(tokens, name_end)?;
    let args = &tokens[name_end + 1..close - 1];
    Some(if args.is_empty() {
        0
    } else {
        split_top_level(args, SyntaxKind::Comma).len()
    })
}

fn typedef(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
    terminator: Terminator,
) -> Statement {
    let body = &head[1..];
    if terminator == Terminator::Body(BodyKind::Record) {
        let Some(kind) = body.first().and_then(record_kind) else {
            return force_scope(Statement::Skip, BodyKind::Record);
        };
        return match record_decl(ctx, run, body, kind, true) {
            Some(decl) => Statement::OpenScope {
                kind: ScopeKind::Record(kind),
                decl: Some(decl),
                typedef_alias: true,
            },
            None => Statement::Skip,
        };
    }
    if body.first().is_some_and(|t| t.is(SyntaxKind::KwEnum)) && body.iter().any(|t| t.is(SyntaxKind::LBrace)) {
        return enumeration(ctx, run, body, true);
    }

    let segments = split_top_level(body, SyntaxKind::Comma);
    let Some(first) = segments.first() else {
        return Statement::Skip;
    };
    let Some(first_name) = declarator_name(first) else {
        return unknown(run, head, ctx.access);
    };
    let type_region = &first[..first_name.start];
    if !has_type_tokens(type_region) {
        return unknown(run, head, ctx.access);
    }

    let mut decls = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        let Some(name) = declarator_name(segment) else {
            continue;
        };
        let (signature, span) = if index == 0 {
            let end = tokens_span(segment).map(|s| s.end);
            let span = match (segments.len(), end) {
                (1, _) | (_, None) => tokens_span(run),
                (_, Some(end)) => Some(Span::new(run[0].span.start, end)),
            };
            (format!("typedef {}", render_tokens(segment)), span)
        } else {
            (
                format!("typedef {} {}", render_tokens(trim_declarator_marks(type_region)), render_tokens(segment)),
                tokens_span(segment),
            )
        };
        let Some(span) = span else {
            continue;
        };
        let mut decl = Declaration::new(DeclKind::PlainTypedef, name.name, signature, span);
        decl.name_span = Some(segment[name.end - 1].span);
        decl.access = ctx.access;
        decls.push(decl);
    }
    Statement::Declarations(decls)
}

fn trim_declarator_marks<'t, 'a>(tokens: &'t [Token<'a>]) -> &'t [Token<'a>] {
    let mut end = tokens.len();
    while end > 0
        && matches!(
            tokens[end - 1].kind,
            SyntaxKind::Star | SyntaxKind::Amp | SyntaxKind::AndAnd | SyntaxKind::LParen
        )
    {
        end -= 1;
    }
    &tokens[..end]
}

/// `enum [class] [Name] [: type] [{...}] [declarators]`, with `head`
/// starting at `enum`. Under `typedef` the trailing names are aliases, and
/// an anonymous enum takes the first alias as its own name.
fn enumeration(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
    typedef: bool,
) -> Statement {
    let Some(span) = tokens_span(run) else {
        return Statement::Skip;
    };
    let mut index = 1;
    if head
        .get(index)
        .is_some_and(|t| matches!(t.kind, SyntaxKind::KwClass | SyntaxKind::KwStruct))
    {
        index += 1;
    }
    while head.get(index).is_some_and(|t| t.is(SyntaxKind::LDoubleBracket)) {
        match head[index..].iter().position(|t| t.is(SyntaxKind::RDoubleBracket)) {
            Some(offset) => index += offset + 1,
            None => break,
        }
    }
    let name_start = index;
    while head
        .get(index)
        .is_some_and(|t| matches!(t.kind, SyntaxKind::Ident | SyntaxKind::DoubleColon))
    {
        index += 1;
    }
    let name_tokens = &head[name_start..index];
    let name_token = name_tokens.iter().rev().find(|t| t.kind == SyntaxKind::Ident);
    let qualifier: Vec<String> = name_tokens
        .iter()
        .filter(|t| t.kind == SyntaxKind::Ident)
        .map(|t| t.text.to_string())
        .collect::<Vec<_>>()
        .split_last()
        .map(|(_, rest)| rest.to_vec())
        .unwrap_or_default();

    let Some(brace) = head.iter().position(|t| t.is(SyntaxKind::LBrace)) else {
        // `enum E e;` declares a variable of an elaborated type.
        if head.get(index).is_some_and(|t| t.kind != SyntaxKind::Colon) {
            return declarators(ctx, run, head, Terminator::Semicolon);
        }
        let mut decl = Declaration::new(DeclKind::Enum, name_token.map_or("", |t| t.text), render_tokens(head), span);
        decl.name_span = name_token.map(|t| t.span);
        decl.access = ctx.access;
        decl.qualifier = qualifier;
        return Statement::Declarations(vec![decl]);
    };

    // An unclosed body runs to the end of the statement.
    let (body, close) = match skip_balanced(head, brace) {
        Some(close) => (&head[brace + 1..close - 1], close),
        None => (&head[brace + 1..], head.len()),
    };
    let enum_head = render_tokens(&head[..brace]);
    let mut decl = Declaration::new(DeclKind::Enum, name_token.map_or("", |t| t.text), enum_head.clone(), span);
    decl.name_span = name_token.map(|t| t.span);
    decl.access = ctx.access;
    decl.qualifier = qualifier;
    decl.flags.is_defined = true;
    decl.children = enumerators(body);

    let trailing: Vec<&[Token<'_>]> = if close < head.len() {
        split_top_level(&head[close..], SyntaxKind::Comma)
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        Vec::new()
    };
    if trailing.is_empty() {
        return Statement::Declarations(vec![decl]);
    }

    let mut decls = Vec::new();
    let mut aliases = trailing.into_iter();
    let body_end = head[close - 1].span.end;
    if typedef && decl.name.is_empty() {
        if let Some(segment) = aliases.next()
            && let Some(name) = declarator_name(segment)
        {
            decl.kind = DeclKind::EnumTypedefAlias;
            decl.underlying = DeclKind::EnumTypedefAlias;
            decl.name = name.name;
            decl.name_span = Some(segment[name.end - 1].span);
            decl.signature = format!("typedef {enum_head} {}", render_tokens(segment));
        }
    } else {
        decl.span = Span::new(span.start, body_end);
    }
    decls.push(decl);

    for segment in aliases {
        let Some(name) = declarator_name(segment) else {
            continue;
        };
        let Some(segment_span) = tokens_span(segment) else {
            continue;
        };
        let (kind, signature) = if typedef {
            (
                DeclKind::PlainTypedef,
                format!("typedef {enum_head} {}", render_tokens(segment)),
            )
        } else {
            (DeclKind::Variable, format!("{enum_head} {}", render_tokens(segment)))
        };
        let mut extra = Declaration::new(kind, name.name, signature, segment_span);
        extra.name_span = Some(segment[name.end - 1].span);
        extra.access = ctx.access;
        extra.flags.is_defined = kind == DeclKind::Variable;
        decls.push(extra);
    }
    Statement::Declarations(decls)
}

fn enumerators(body: &[Token<'_>]) -> Vec<Declaration> {
    split_top_level(body, SyntaxKind::Comma)
        .into_iter()
        .filter_map(|segment| {
            let name = segment.first().filter(|t| t.kind == SyntaxKind::Ident)?;
            let span = tokens_span(segment)?;
            let mut decl = Declaration::new(DeclKind::Enumerator, name.text, render_tokens(segment), span);
            decl.name_span = Some(name.span);
            decl.flags.is_defined = true;
            Some(decl)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src/outline/classifier_tests.rs"]
mod tests;
