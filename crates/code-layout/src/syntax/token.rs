use std::fmt;

use serde::Serialize;

use crate::syntax::kind::{SyntaxKind, TokenClass};

/// Zero-based line and UTF-16 column, the convention LSP clients expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Half-open source range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn contains_position(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }

    /// Smallest span covering both.
    pub fn cover(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn with_end(self, end: Position) -> Span {
        Span { start: self.start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// One lexical token borrowed from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub span: Span,
    /// Byte offset of `text` in the source.
    pub offset: usize,
    /// Whitespace or a comment separated this token from the previous one.
    pub spaced: bool,
}

impl<'a> Token<'a> {
    pub fn class(&self) -> TokenClass {
        self.kind.class()
    }

    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == SyntaxKind::Ident && self.text == text
    }

    pub fn end_offset(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Renders a token run the way it reads in source, collapsing any run of
/// whitespace or comments into a single space.
pub fn render_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.kind == SyntaxKind::Preprocessor || token.kind == SyntaxKind::Comment {
            continue;
        }
        if token.spaced && !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token.text);
    }
    out
}

/// Span from the first to the last token of a run.
pub fn tokens_span(tokens: &[Token<'_>]) -> Option<Span> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(Span::new(first.span.start, last.span.end))
}
