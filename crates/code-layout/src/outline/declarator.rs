//! Function and variable declarators.
//!
//! Given the head of a statement (its tokens without the trailing `;` or
//! `{`), decide whether it declares a function or one or more variables
//! and pull out names, qualifiers, parameters and flags.

use crate::outline::statement::{
    BodyKind, Terminator, find_top_level, init_list_colon, matching_angle, matching_paren, split_top_level,
    top_level_equal,
};
use crate::outline::{DeclKind, Declaration};
use crate::scope::Access;
use crate::syntax::kind::SyntaxKind;
use crate::syntax::token::{Span, Token, render_tokens, tokens_span};

/// What the surrounding scopes tell the declarator rules.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeclContext<'s> {
    pub access: Option<Access>,
    /// Name of the innermost record, for constructor detection.
    pub record_name: Option<&'s str>,
    pub in_record: bool,
}

/// A declarator name with the qualifier written in front of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QualifiedName {
    pub name: String,
    pub qualifier: Vec<String>,
    pub templated_qualifiers: usize,
    /// Index of the first token of the qualified name.
    pub start: usize,
    /// Index just past the last token of the name.
    pub end: usize,
}

/// Classify `head` as functions or variables. `None` when it is neither.
pub(crate) fn classify(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
    terminator: Terminator,
) -> Option<Vec<Declaration>> {
    if let Some(function) = function(ctx, run, head, terminator) {
        return Some(vec![function]);
    }
    variables(ctx, run, head)
}

/// Placeholder for a statement no rule recognizes.
pub(crate) fn unknown(
    run: &[Token<'_>],
    head: &[Token<'_>],
    access: Option<Access>,
) -> Option<Declaration> {
    let span = tokens_span(run)?;
    let mut decl = Declaration::new(DeclKind::Unknown, "", render_tokens(head), span);
    decl.access = access;
    Some(decl)
}

fn function(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
    terminator: Terminator,
) -> Option<Declaration> {
    let span = tokens_span(run)?;
    let equal = top_level_equal(head);

    let open = param_open(head)?;
    if let Some(equal) = equal
        && equal < open
    {
        return None;
    }
    if is_pointer_declarator(head, open) {
        return function_pointer(ctx, head, open, equal, span);
    }

    let name = qualified_name_before(head, open)?;
    let close = matching_paren(head, open)?;
    let params = &head[open + 1..close - 1];
    if !params_are_types(params) {
        return None;
    }

    let trailing_end = equal.unwrap_or(head.len());
    let trailing = &head[close.min(trailing_end)..trailing_end];
    if trailing.first().is_some_and(|t| matches!(t.kind, SyntaxKind::LBracket | SyntaxKind::LParen)) {
        return None;
    }

    let type_region = &head[..name.start];
    let has_type = has_type_tokens(type_region);
    if !has_type && !is_special_member(ctx, &name) {
        return None;
    }

    let definition = terminator == Terminator::Body(BodyKind::Function);
    let mut decl = Declaration::new(
        if definition {
            DeclKind::FunctionDefinition
        } else {
            DeclKind::FunctionDeclaration
        },
        name.name.clone(),
        String::new(),
        span,
    );

    if let Some(equal) = equal {
        let tail = &head[equal + 1..];
        match tail {
            [t] if t.kind == SyntaxKind::Integer && t.text == "0" => decl.flags.is_pure = true,
            [t] if t.kind == SyntaxKind::KwDelete => decl.flags.is_deleted = true,
            [t] if t.kind == SyntaxKind::KwDefault => decl.flags.is_defaulted = true,
            _ => return None,
        }
    }

    let qualifiers_end = trailing
        .iter()
        .position(|t| matches!(t.kind, SyntaxKind::Colon | SyntaxKind::Arrow))
        .unwrap_or(trailing.len());
    for token in &trailing[..qualifiers_end] {
        match token.kind {
            SyntaxKind::KwConst => decl.flags.is_const = true,
            SyntaxKind::Ident if token.text == "override" => decl.flags.is_override = true,
            _ => {},
        }
    }
    apply_specifiers(&mut decl, type_region);
    decl.flags.is_defined = definition;

    let signature_end = init_list_colon(&head[close - 1..]).map(|colon| close - 1 + colon).unwrap_or(head.len());
    decl.signature = render_tokens(&head[..signature_end]);
    decl.access = ctx.access;
    decl.name_span = tokens_span(&head[name.end - name_len(&name, head)..name.end]);
    decl.qualifier = name.qualifier;
    decl.templated_qualifiers = name.templated_qualifiers;
    decl.template_args = template_args_after(head, name.end, open);
    set_params(&mut decl, params);
    Some(decl)
}

/// `(*name)(args)` without an initializer.
fn function_pointer(
    ctx: &DeclContext<'_>,
    head: &[Token<'_>],
    open: usize,
    equal: Option<usize>,
    span: Span,
) -> Option<Declaration> {
    if equal.is_some() {
        return None;
    }
    let inner_close = matching_paren(head, open)?;
    let params_open = inner_close;
    if head.get(params_open)?.kind != SyntaxKind::LParen {
        return None;
    }
    let params_close = matching_paren(head, params_open)?;
    let name_index = last_top_level_ident(&head[open + 1..inner_close - 1])? + open + 1;
    if !has_type_tokens(&head[..open]) {
        return None;
    }

    let mut decl = Declaration::new(
        DeclKind::FunctionDeclaration,
        head[name_index].text,
        render_tokens(head),
        span,
    );
    decl.flags.is_function_pointer = true;
    decl.access = ctx.access;
    decl.name_span = Some(head[name_index].span);
    apply_specifiers(&mut decl, &head[..open]);
    set_params(&mut decl, &head[params_open + 1..params_close - 1]);
    Some(decl)
}

fn variables(
    ctx: &DeclContext<'_>,
    run: &[Token<'_>],
    head: &[Token<'_>],
) -> Option<Vec<Declaration>> {
    let segments = split_top_level(head, SyntaxKind::Comma);
    let first = segments.first()?;
    let first_name = declarator_name(first)?;
    let type_region = &first[..first_name.start];
    if !has_type_tokens(type_region) {
        return None;
    }
    let base = base_type(type_region);
    let extern_decl = type_region.iter().any(|t| t.kind == SyntaxKind::KwExtern);

    let mut decls = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        let name = if index == 0 {
            first_name.clone()
        } else {
            match declarator_name(segment) {
                Some(name) => name,
                None => continue,
            }
        };
        let limit = initializer_start(segment).unwrap_or(segment.len());
        let signature = if index == 0 {
            render_tokens(&segment[..limit])
        } else {
            format!("{} {}", render_tokens(base), render_tokens(&segment[..limit]))
        };
        let span = if segments.len() == 1 {
            tokens_span(run)?
        } else if index == 0 {
            Span::new(run[0].span.start, tokens_span(segment)?.end)
        } else {
            tokens_span(segment)?
        };

        let mut decl = Declaration::new(DeclKind::Variable, name.name.clone(), signature, span);
        decl.access = ctx.access;
        decl.name_span = Some(segment[name.end - 1].span);
        apply_specifiers(&mut decl, type_region);
        let initialized = limit < segment.len()
            && matches!(
                segment[limit].kind,
                SyntaxKind::Equal | SyntaxKind::LBrace | SyntaxKind::LParen
            );
        decl.flags.is_defined = initialized || (!extern_decl && (!ctx.in_record || !name.qualifier.is_empty()));
        decl.flags.is_function_pointer = is_pointer_declarator_segment(segment);
        decl.template_args = template_args_after(segment, name.end, segment.len());
        decl.qualifier = name.qualifier;
        decl.templated_qualifiers = name.templated_qualifiers;
        decls.push(decl);
    }
    (!decls.is_empty()).then_some(decls)
}

/// Index of the `(` that opens the parameter list, skipping the name part
/// of `operator()` and anything inside template arguments.
fn param_open(head: &[Token<'_>]) -> Option<usize> {
    let first_paren = find_top_level(head, |t, _| t.kind == SyntaxKind::LParen)?;
    match find_top_level(head, |t, _| t.kind == SyntaxKind::KwOperator) {
        Some(op)
            if op < first_paren
                && head.get(op + 1).is_some_and(|t| t.is(SyntaxKind::LParen))
                && head.get(op + 2).is_some_and(|t| t.is(SyntaxKind::RParen)) =>
        {
            let open = op + 3;
            head.get(open).is_some_and(|t| t.is(SyntaxKind::LParen)).then_some(open)
        },
        _ => Some(first_paren),
    }
}

/// `(*name)(...)`, `(&name)[N]`, `(^name)(...)` or `(Class::*name)(...)`
/// with its group starting at `open`.
fn is_pointer_declarator(
    tokens: &[Token<'_>],
    open: usize,
) -> bool {
    let Some(next) = tokens.get(open + 1) else {
        return false;
    };
    let marked = match next.kind {
        SyntaxKind::Star | SyntaxKind::Caret | SyntaxKind::Amp | SyntaxKind::AndAnd => true,
        SyntaxKind::Ident => {
            tokens.get(open + 2).is_some_and(|t| t.is(SyntaxKind::DoubleColon))
                && tokens.get(open + 3).is_some_and(|t| t.is(SyntaxKind::Star))
        },
        _ => false,
    };
    marked
        && matching_paren(tokens, open).is_some_and(|close| {
            tokens
                .get(close)
                .is_some_and(|t| matches!(t.kind, SyntaxKind::LParen | SyntaxKind::LBracket))
        })
}

fn is_pointer_declarator_segment(segment: &[Token<'_>]) -> bool {
    let limit = initializer_start(segment).unwrap_or(segment.len());
    let region = &segment[..limit];
    find_top_level(region, |t, _| t.kind == SyntaxKind::LParen).is_some_and(|open| {
        is_pointer_declarator(region, open)
            && matching_paren(region, open).is_some_and(|close| region.get(close).is_some_and(|t| t.is(SyntaxKind::LParen)))
    })
}

/// The possibly qualified name that ends right before `end`.
pub(crate) fn qualified_name_before(
    head: &[Token<'_>],
    end: usize,
) -> Option<QualifiedName> {
    if end == 0 {
        return None;
    }
    if let Some(op) = head[..end].iter().rposition(|t| t.kind == SyntaxKind::KwOperator) {
        let name = render_tokens(&head[op..end]);
        let (qualifier, templated, start) = qualifier_before(head, op);
        return Some(QualifiedName {
            name,
            qualifier,
            templated_qualifiers: templated,
            start,
            end,
        });
    }

    let mut index = end - 1;
    if matches!(head[index].kind, SyntaxKind::Greater | SyntaxKind::RightShift) {
        index = matching_angle_back(head, index)?.checked_sub(1)?;
    }
    let token = head.get(index)?;
    if token.kind != SyntaxKind::Ident {
        return None;
    }
    let mut name = token.text.to_string();
    let mut name_start = index;
    if index > 0 && head[index - 1].kind == SyntaxKind::Tilde {
        name.insert(0, '~');
        name_start = index - 1;
    }
    let (qualifier, templated, start) = qualifier_before(head, name_start);
    Some(QualifiedName {
        name,
        qualifier,
        templated_qualifiers: templated,
        start,
        end: index + 1,
    })
}

/// `A::B<T>::` segments ending right before `name_start`.
fn qualifier_before(
    head: &[Token<'_>],
    name_start: usize,
) -> (Vec<String>, usize, usize) {
    let mut qualifier = Vec::new();
    let mut templated = 0;
    let mut start = name_start;
    while start >= 1 && head[start - 1].kind == SyntaxKind::DoubleColon {
        if start < 2 {
            start -= 1;
            break;
        }
        let mut segment = start - 2;
        let mut with_args = false;
        if matches!(head[segment].kind, SyntaxKind::Greater | SyntaxKind::RightShift) {
            match matching_angle_back(head, segment).and_then(|open| open.checked_sub(1)) {
                Some(before) => {
                    segment = before;
                    with_args = true;
                },
                None => break,
            }
        }
        if head[segment].kind != SyntaxKind::Ident {
            // `::name` at global scope
            start -= 1;
            break;
        }
        qualifier.push(head[segment].text.to_string());
        if with_args {
            templated += 1;
        }
        start = segment;
    }
    qualifier.reverse();
    (qualifier, templated, start)
}

/// Index of the `<` matching the `>` (or `>>`) at `close`.
fn matching_angle_back(
    tokens: &[Token<'_>],
    close: usize,
) -> Option<usize> {
    let mut depth = 0usize;
    for index in (0..=close).rev() {
        match tokens[index].kind {
            SyntaxKind::Greater => depth += 1,
            SyntaxKind::RightShift => depth += 2,
            SyntaxKind::Less => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            },
            SyntaxKind::Semicolon | SyntaxKind::LBrace | SyntaxKind::RBrace => return None,
            _ => {},
        }
    }
    None
}

/// Number of tokens making up the bare name in `name` (more than one for
/// operators and destructors).
fn name_len(
    name: &QualifiedName,
    head: &[Token<'_>],
) -> usize {
    let mut start = name.end - 1;
    while start > name.start && head[start - 1].kind != SyntaxKind::DoubleColon {
        start -= 1;
    }
    name.end - start
}

/// Explicit template arguments right after a name: `f<int>` or `v<0>`.
fn template_args_after(
    tokens: &[Token<'_>],
    name_end: usize,
    limit: usize,
) -> Option<usize> {
    if name_end >= limit || tokens.get(name_end)?.kind != SyntaxKind::Less {
        return None;
    }
    let close = matching_angle(tokens, name_end)?;
    let args = &tokens[name_end + 1..close - 1];
    if args.is_empty() {
        return Some(0);
    }
    Some(split_top_level(args, SyntaxKind::Comma).len())
}

/// A parameter list reads as types: every entry starts the way a
/// parameter declaration does, not the way an expression does.
pub(crate) fn params_are_types(params: &[Token<'_>]) -> bool {
    if params.is_empty() {
        return true;
    }
    split_top_level(params, SyntaxKind::Comma).iter().all(|param| {
        param.first().is_some_and(|first| {
            first.kind == SyntaxKind::Ident
                || first.kind.is_type_keyword()
                || first.kind.is_decl_specifier()
                || matches!(
                    first.kind,
                    SyntaxKind::KwStruct
                        | SyntaxKind::KwEnum
                        | SyntaxKind::KwUnion
                        | SyntaxKind::KwClass
                        | SyntaxKind::KwThis
                        | SyntaxKind::Ellipsis
                        | SyntaxKind::DoubleColon
                        | SyntaxKind::LDoubleBracket
                )
        })
    })
}

/// Record parameter count and the name-free parameter types.
fn set_params(
    decl: &mut Declaration,
    params: &[Token<'_>],
) {
    let types: Vec<String> = if params.is_empty() || (params.len() == 1 && params[0].kind == SyntaxKind::KwVoid) {
        Vec::new()
    } else {
        split_top_level(params, SyntaxKind::Comma).into_iter().map(param_type).collect()
    };
    decl.arity = Some(types.len());
    decl.param_types = Some(types);
}

/// `const Foo& value = Foo()` reads as `const Foo&`.
fn param_type(param: &[Token<'_>]) -> String {
    let limit = top_level_equal(param).unwrap_or(param.len());
    let param = &param[..limit];
    match declarator_name(param) {
        Some(name) if name.start > 0 && has_type_tokens(&param[..name.start]) && name.qualifier.is_empty() => {
            let mut rest: Vec<Token<'_>> = param[..name.start].to_vec();
            rest.extend_from_slice(&param[name.end..]);
            render_tokens(&rest)
        },
        _ => render_tokens(param),
    }
}

/// Where the initializer of a declarator segment begins: `=`, `{`, a
/// direct-initialization `(` after the name, or a bit-field `:`.
fn initializer_start(segment: &[Token<'_>]) -> Option<usize> {
    find_top_level(segment, |t, index| match t.kind {
        SyntaxKind::Equal | SyntaxKind::LBrace | SyntaxKind::Colon => true,
        SyntaxKind::LParen => {
            index > 0
                && segment[index - 1].kind == SyntaxKind::Ident
                && !is_attribute_call(segment, index - 1)
                && !is_pointer_declarator(segment, index)
        },
        _ => false,
    })
}

/// Name declared by one declarator segment, e.g. `*argv[]` or `(*cb)(int)`.
pub(crate) fn declarator_name(segment: &[Token<'_>]) -> Option<QualifiedName> {
    let limit = initializer_start(segment).unwrap_or(segment.len());
    let region = &segment[..limit];
    if let Some(open) = find_top_level(region, |t, _| t.kind == SyntaxKind::LParen)
        && is_pointer_declarator(region, open)
        && let Some(close) = matching_paren(region, open)
    {
        let inner = &region[open + 1..close - 1];
        let index = last_top_level_ident(inner)? + open + 1;
        return Some(QualifiedName {
            name: region[index].text.to_string(),
            qualifier: Vec::new(),
            templated_qualifiers: 0,
            start: index,
            end: index + 1,
        });
    }
    let index = last_top_level_ident(region)?;
    qualified_name_before(region, index + 1)
}

/// Last identifier outside any parentheses, brackets or template arguments.
pub(crate) fn last_top_level_ident(tokens: &[Token<'_>]) -> Option<usize> {
    let mut found = None;
    let mut depth = 0usize;
    let mut angle = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
            SyntaxKind::LDoubleBracket => depth += 2,
            SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace => depth = depth.saturating_sub(1),
            SyntaxKind::RDoubleBracket => depth = depth.saturating_sub(2),
            SyntaxKind::Less if depth == 0 && index > 0 && tokens[index - 1].kind == SyntaxKind::Ident => angle += 1,
            SyntaxKind::Greater if depth == 0 => angle = angle.saturating_sub(1),
            SyntaxKind::RightShift if depth == 0 => angle = angle.saturating_sub(2),
            SyntaxKind::Ident if depth == 0 && angle == 0 && !is_attribute_call(tokens, index) => found = Some(index),
            _ => {},
        }
    }
    found
}

/// `__attribute__((...))` or `ALIGN(8)` style annotations.
fn is_attribute_call(
    tokens: &[Token<'_>],
    index: usize,
) -> bool {
    tokens.get(index + 1).is_some_and(|t| t.is(SyntaxKind::LParen))
        && (tokens[index].text.starts_with("__") || tokens[index].text.chars().all(|c| !c.is_ascii_lowercase()))
}

/// At least one token that names a type, outside attribute groups.
pub(crate) fn has_type_tokens(tokens: &[Token<'_>]) -> bool {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            SyntaxKind::LParen | SyntaxKind::LBracket => depth += 1,
            SyntaxKind::LDoubleBracket => depth += 2,
            SyntaxKind::RParen | SyntaxKind::RBracket => depth = depth.saturating_sub(1),
            SyntaxKind::RDoubleBracket => depth = depth.saturating_sub(2),
            _ if depth > 0 => {},
            SyntaxKind::Ident if !is_attribute_call(tokens, index) => return true,
            SyntaxKind::Greater | SyntaxKind::RightShift => return true,
            SyntaxKind::KwStruct | SyntaxKind::KwEnum | SyntaxKind::KwUnion | SyntaxKind::KwClass => return true,
            kind if kind.is_type_keyword() && !matches!(kind, SyntaxKind::KwConst | SyntaxKind::KwVolatile) => {
                return true;
            },
            _ => {},
        }
    }
    false
}

/// Constructors, destructors and conversion operators carry no return type.
fn is_special_member(
    ctx: &DeclContext<'_>,
    name: &QualifiedName,
) -> bool {
    if name.name.starts_with('~') || name.name.starts_with("operator") {
        return true;
    }
    match name.qualifier.last() {
        Some(last) => *last == name.name,
        None => ctx.record_name == Some(name.name.as_str()),
    }
}

/// Type tokens shared by every declarator of a statement: the type region
/// without the first declarator's pointer and reference marks.
fn base_type<'t, 'a>(type_region: &'t [Token<'a>]) -> &'t [Token<'a>] {
    let mut end = type_region.len();
    while end > 0
        && matches!(
            type_region[end - 1].kind,
            SyntaxKind::Star | SyntaxKind::Amp | SyntaxKind::AndAnd | SyntaxKind::LParen | SyntaxKind::Caret
        )
    {
        end -= 1;
    }
    &type_region[..end]
}

fn apply_specifiers(
    decl: &mut Declaration,
    type_region: &[Token<'_>],
) {
    let mut depth = 0usize;
    for token in type_region {
        match token.kind {
            SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LDoubleBracket => depth += 1,
            SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RDoubleBracket => depth = depth.saturating_sub(1),
            _ if depth > 0 => {},
            SyntaxKind::KwStatic => decl.flags.is_static = true,
            SyntaxKind::KwVirtual => decl.flags.is_virtual = true,
            SyntaxKind::KwConst | SyntaxKind::KwConstexpr if decl.kind == DeclKind::Variable => {
                decl.flags.is_const = true;
            },
            _ => {},
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/outline/declarator_tests.rs"]
mod tests;
