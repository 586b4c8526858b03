//! Splits the token stream into top-level statements.
//!
//! A statement ends at `;`, at a `{` that opens a scope body, after an
//! inline brace group (enum bodies, brace initializers), after an access
//! label's `:`, or right before a `}` that closes the enclosing scope.
//! Preprocessor directives are statements of their own. An inline group
//! whose `}` never comes ends at the first recovery point after its `{`.

use crate::syntax::Language;
use crate::syntax::kind::SyntaxKind;
use crate::syntax::token::{Span, Token};

/// Scope body a statement opens with its trailing `{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyKind {
    Namespace,
    Record,
    Linkage,
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Terminator {
    Semicolon,
    /// `public:` and friends.
    Label,
    Directive,
    /// The run ends with the `{` that opens a body.
    Body(BodyKind),
    /// The run ends with a balanced `{...}` group, plus `;` when present.
    Block,
    /// Stopped before a `}` owned by an enclosing scope.
    CloseBrace,
    /// Stopped before a token that can only start a new statement.
    Truncated,
    /// The inline `{` at this span is never closed. The run ends at a
    /// recovery point and keeps the `;` found there.
    Unclosed(Span),
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Extent {
    pub len: usize,
    pub terminator: Terminator,
}

impl Extent {
    fn new(
        len: usize,
        terminator: Terminator,
    ) -> Self {
        Self { len, terminator }
    }
}

/// Measure the statement starting at `tokens[0]`.
pub(crate) fn split(
    tokens: &[Token<'_>],
    language: Language,
) -> Extent {
    let Some(first) = tokens.first() else {
        return Extent::new(0, Terminator::Eof);
    };
    match first.kind {
        SyntaxKind::Preprocessor => return Extent::new(1, Terminator::Directive),
        SyntaxKind::RBrace => return Extent::new(0, Terminator::CloseBrace),
        SyntaxKind::Semicolon => return Extent::new(1, Terminator::Semicolon),
        _ => {},
    }
    if let Some(colon) = label_end(tokens) {
        return Extent::new(colon + 1, Terminator::Label);
    }

    let mut depth = 0usize;
    let mut index = 0;
    while index < tokens.len() {
        let token = &tokens[index];
        match token.kind {
            SyntaxKind::Semicolon => return Extent::new(index + 1, Terminator::Semicolon),
            SyntaxKind::LParen | SyntaxKind::LBracket => depth += 1,
            SyntaxKind::LDoubleBracket => depth += 2,
            SyntaxKind::RParen | SyntaxKind::RBracket => depth = depth.saturating_sub(1),
            SyntaxKind::RDoubleBracket => depth = depth.saturating_sub(2),
            SyntaxKind::RBrace => return Extent::new(index, Terminator::CloseBrace),
            SyntaxKind::KwPublic | SyntaxKind::KwProtected | SyntaxKind::KwPrivate
                if index > 0 && depth == 0 && label_end(&tokens[index..]).is_some() =>
            {
                return Extent::new(index, Terminator::Truncated);
            },
            SyntaxKind::LBrace => {
                let head = &tokens[..index];
                if depth == 0
                    && let Some(body) = body_kind(head, language)
                {
                    return Extent::new(index + 1, Terminator::Body(body));
                }
                let Some(after) = skip_balanced(tokens, index) else {
                    let end = recovery_point(tokens, index);
                    return Extent::new(end, Terminator::Unclosed(token.span));
                };
                if depth > 0 || continues_after_block(head) {
                    index = after;
                    continue;
                }
                let len = match tokens.get(after) {
                    Some(next) if next.kind == SyntaxKind::Semicolon => after + 1,
                    _ => after,
                };
                return Extent::new(len, Terminator::Block);
            },
            _ => {},
        }
        index += 1;
    }
    Extent::new(tokens.len(), Terminator::Eof)
}

/// Index of the `:` ending an access label at the start of `tokens`.
/// Accepts `public:` and the `public slots:` form.
pub(crate) fn label_end(tokens: &[Token<'_>]) -> Option<usize> {
    let first = tokens.first()?;
    if !matches!(
        first.kind,
        SyntaxKind::KwPublic | SyntaxKind::KwProtected | SyntaxKind::KwPrivate
    ) {
        return None;
    }
    match (tokens.get(1).map(|t| t.kind), tokens.get(2).map(|t| t.kind)) {
        (Some(SyntaxKind::Colon), _) => Some(1),
        (Some(SyntaxKind::Ident), Some(SyntaxKind::Colon)) => Some(2),
        _ => None,
    }
}

/// Index just past the `}` matching the `{` at `open`.
pub(crate) fn skip_balanced(
    tokens: &[Token<'_>],
    open: usize,
) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, token) in tokens[open..].iter().enumerate() {
        match token.kind {
            SyntaxKind::LBrace => depth += 1,
            SyntaxKind::RBrace => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(open + offset + 1);
                }
            },
            _ => {},
        }
    }
    None
}

/// End of the run for the unclosed `{` at `open`: just past a `;` directly
/// inside the group that is followed by a declaration, or before the first
/// later token starting at column 0, or the end of input.
fn recovery_point(
    tokens: &[Token<'_>],
    open: usize,
) -> usize {
    let line = tokens[open].span.start.line;
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open) {
        if token.span.start.column == 0 && token.span.start.line > line {
            return index;
        }
        match token.kind {
            SyntaxKind::LBrace => depth += 1,
            SyntaxKind::RBrace => depth = depth.saturating_sub(1),
            SyntaxKind::Semicolon if depth == 1 && tokens.get(index + 1).is_some_and(starts_declaration) => {
                return index + 1;
            },
            _ => {},
        }
    }
    tokens.len()
}

fn starts_declaration(token: &Token<'_>) -> bool {
    token.kind.is_type_keyword()
        || token.kind.is_decl_specifier()
        || matches!(
            token.kind,
            SyntaxKind::Preprocessor
                | SyntaxKind::KwStruct
                | SyntaxKind::KwClass
                | SyntaxKind::KwUnion
                | SyntaxKind::KwEnum
                | SyntaxKind::KwTypedef
                | SyntaxKind::KwNamespace
                | SyntaxKind::KwTemplate
                | SyntaxKind::KwUsing
        )
}

/// Index just past the `)` matching the `(` at `open`.
pub(crate) fn matching_paren(
    tokens: &[Token<'_>],
    open: usize,
) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            SyntaxKind::LParen => depth += 1,
            SyntaxKind::RParen => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(offset + 1);
                }
            },
            _ => {},
        }
    }
    None
}

/// Index just past the `>` closing the `<` at `open`. Angle brackets only
/// nest outside parentheses, and `>>` closes two levels.
pub(crate) fn matching_angle(
    tokens: &[Token<'_>],
    open: usize,
) -> Option<usize> {
    let mut angle = 0usize;
    let mut paren = 0usize;
    for (offset, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            SyntaxKind::LParen | SyntaxKind::LBracket => paren += 1,
            SyntaxKind::RParen | SyntaxKind::RBracket => paren = paren.saturating_sub(1),
            SyntaxKind::Less if paren == 0 => angle += 1,
            SyntaxKind::Greater if paren == 0 => {
                angle = angle.checked_sub(1)?;
                if angle == 0 {
                    return Some(offset + 1);
                }
            },
            SyntaxKind::RightShift if paren == 0 => {
                if angle <= 2 {
                    return Some(offset + 1);
                }
                angle -= 2;
            },
            SyntaxKind::Semicolon | SyntaxKind::LBrace | SyntaxKind::RBrace => return None,
            _ => {},
        }
    }
    None
}

/// Skip `template<...>` headers at the start of `tokens`.
pub(crate) fn strip_template_headers<'t, 'a>(mut tokens: &'t [Token<'a>]) -> &'t [Token<'a>] {
    while tokens.len() > 1 && tokens[0].kind == SyntaxKind::KwTemplate && tokens[1].kind == SyntaxKind::Less {
        match matching_angle(tokens, 1) {
            Some(end) => tokens = &tokens[end..],
            None => break,
        }
    }
    tokens
}

/// Split at depth-0 occurrences of `separator`, where depth counts
/// parentheses, brackets, braces and template angle brackets.
pub(crate) fn split_top_level<'t, 'a>(
    tokens: &'t [Token<'a>],
    separator: SyntaxKind,
) -> Vec<&'t [Token<'a>]> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut angle = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
            SyntaxKind::LDoubleBracket => depth += 2,
            SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace => depth = depth.saturating_sub(1),
            SyntaxKind::RDoubleBracket => depth = depth.saturating_sub(2),
            SyntaxKind::Less if depth == 0 && opens_template_args(tokens, index) => angle += 1,
            SyntaxKind::Greater if depth == 0 => angle = angle.saturating_sub(1),
            SyntaxKind::RightShift if depth == 0 => angle = angle.saturating_sub(2),
            kind if kind == separator && depth == 0 && angle == 0 => {
                parts.push(&tokens[start..index]);
                start = index + 1;
            },
            _ => {},
        }
    }
    parts.push(&tokens[start..]);
    parts
}

/// `<` directly after a name or `template` starts an argument list.
pub(crate) fn opens_template_args(
    tokens: &[Token<'_>],
    index: usize,
) -> bool {
    if index == 0 {
        return false;
    }
    let previous = tokens[index - 1];
    if previous.kind == SyntaxKind::KwTemplate {
        return true;
    }
    if previous.kind != SyntaxKind::Ident {
        return false;
    }
    !(index >= 2 && tokens[index - 2].kind == SyntaxKind::KwOperator)
}

/// First depth-0 index whose kind satisfies `pred`.
pub(crate) fn find_top_level(
    tokens: &[Token<'_>],
    pred: impl Fn(&Token<'_>, usize) -> bool,
) -> Option<usize> {
    let mut depth = 0usize;
    let mut angle = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        if depth == 0 && angle == 0 && pred(token, index) {
            return Some(index);
        }
        match token.kind {
            SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
            SyntaxKind::LDoubleBracket => depth += 2,
            SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace => depth = depth.saturating_sub(1),
            SyntaxKind::RDoubleBracket => depth = depth.saturating_sub(2),
            SyntaxKind::Less if depth == 0 && opens_template_args(tokens, index) => angle += 1,
            SyntaxKind::Greater if depth == 0 => angle = angle.saturating_sub(1),
            SyntaxKind::RightShift if depth == 0 => angle = angle.saturating_sub(2),
            _ => {},
        }
    }
    None
}

/// First depth-0 `=` that is not part of an `operator=` name.
pub(crate) fn top_level_equal(tokens: &[Token<'_>]) -> Option<usize> {
    find_top_level(tokens, |token, index| {
        token.kind == SyntaxKind::Equal && !(index > 0 && tokens[index - 1].kind == SyntaxKind::KwOperator)
    })
}

/// Depth-0 `:` of a constructor initializer list, i.e. one that follows a
/// closing parenthesis.
pub(crate) fn init_list_colon(tokens: &[Token<'_>]) -> Option<usize> {
    let mut depth = 0usize;
    let mut seen_params = false;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            SyntaxKind::LParen | SyntaxKind::LBracket => depth += 1,
            SyntaxKind::RParen | SyntaxKind::RBracket => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    seen_params = true;
                }
            },
            SyntaxKind::Colon if depth == 0 && seen_params => return Some(index),
            _ => {},
        }
    }
    None
}

fn body_kind(
    head: &[Token<'_>],
    language: Language,
) -> Option<BodyKind> {
    let mut rest = strip_template_headers(head);
    while let Some(first) = rest.first()
        && matches!(
            first.kind,
            SyntaxKind::KwTypedef | SyntaxKind::KwInline | SyntaxKind::KwExport
        )
    {
        rest = &rest[1..];
    }
    let first = rest.first()?;
    match first.kind {
        SyntaxKind::KwNamespace if language.is_cpp() => {
            top_level_equal(rest).is_none().then_some(BodyKind::Namespace)
        },
        SyntaxKind::KwExtern if rest.len() == 2 && rest[1].kind == SyntaxKind::String => Some(BodyKind::Linkage),
        SyntaxKind::KwClass | SyntaxKind::KwStruct | SyntaxKind::KwUnion if is_record_head(&rest[1..]) => {
            Some(BodyKind::Record)
        },
        SyntaxKind::KwEnum => None,
        _ => is_function_head(rest).then_some(BodyKind::Function),
    }
}

/// Tokens after `struct`/`class`/`union` name a record being defined:
/// no initializer, and no parentheses outside attribute-like macros
/// before the base clause.
fn is_record_head(tokens: &[Token<'_>]) -> bool {
    if top_level_equal(tokens).is_some() {
        return false;
    }
    let base = find_top_level(tokens, |t, _| t.kind == SyntaxKind::Colon).unwrap_or(tokens.len());
    let name_part = &tokens[..base];
    let mut depth = 0usize;
    for (index, token) in name_part.iter().enumerate() {
        match token.kind {
            SyntaxKind::LParen => {
                if depth == 0 && !(index > 0 && is_attribute_like(&name_part[index - 1])) {
                    return false;
                }
                depth += 1;
            },
            SyntaxKind::RParen => depth = depth.saturating_sub(1),
            _ => {},
        }
    }
    true
}

/// `alignas(...)`, `__attribute__((...))`, `__declspec(...)` or an
/// all-caps macro such as `PACKED(4)`.
pub(crate) fn is_attribute_like(token: &Token<'_>) -> bool {
    match token.kind {
        SyntaxKind::KwAlignas => true,
        SyntaxKind::Ident => {
            token.text.starts_with("__")
                || token
                    .text
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        },
        _ => false,
    }
}

fn is_function_head(head: &[Token<'_>]) -> bool {
    let Some(paren) = find_top_level(head, |t, _| t.kind == SyntaxKind::LParen) else {
        return false;
    };
    if let Some(equal) = top_level_equal(head)
        && equal < paren
    {
        return false;
    }
    // `Ctor() : member{1}, other{2} {`: braces inside the initializer list
    // belong to members.
    if init_list_colon(head).is_some()
        && let Some(last) = head.last()
        && matches!(
            last.kind,
            SyntaxKind::Ident | SyntaxKind::Greater | SyntaxKind::RightShift
        )
    {
        return false;
    }
    true
}

/// After an inline brace group, keep going to the `;` instead of ending the
/// statement at the `}`.
fn continues_after_block(head: &[Token<'_>]) -> bool {
    if top_level_equal(head).is_some() || init_list_colon(head).is_some() {
        return true;
    }
    let rest = strip_template_headers(head);
    matches!(
        rest.first().map(|t| t.kind),
        Some(
            SyntaxKind::KwEnum
                | SyntaxKind::KwTypedef
                | SyntaxKind::KwStruct
                | SyntaxKind::KwClass
                | SyntaxKind::KwUnion
        )
    )
}

#[cfg(test)]
#[path = "../../tests/src/outline/statement_tests.rs"]
mod tests;
