use logos::Logos;

use crate::diagnostics::{LexError, LexErrorKind};
use crate::syntax::kind::{SyntaxKind, TokenKind};
use crate::syntax::token::{Position, Span, Token};

/// A lexer that wraps `logos::Lexer` to produce positioned [`Token`]s.
///
/// Whitespace is consumed silently, comments are emitted, and a `#` that
/// starts a line swallows the whole directive (continuations included) as a
/// single [`SyntaxKind::Preprocessor`] token. Unterminated literals yield a
/// [`LexError`] and lexing resumes on the next line. Cloning a lexer gives
/// an independent cursor over the same text.
#[derive(Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, TokenKind>,
    cursor: Cursor,
    spaced: bool,
    line_start: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    offset: usize,
    position: Position,
}

impl Cursor {
    fn advance_to(
        &mut self,
        source: &str,
        target: usize,
    ) -> Position {
        if target > self.offset {
            for ch in source[self.offset..target].chars() {
                if ch == '\n' {
                    self.position.line += 1;
                    self.position.column = 0;
                } else {
                    self.position.column += ch.len_utf16() as u32;
                }
            }
            self.offset = target;
        }
        self.position
    }
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            source: input,
            inner: TokenKind::lexer(input),
            cursor: Cursor::default(),
            spaced: false,
            line_start: true,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Position just past the end of the input.
    pub fn end_position(&self) -> Position {
        let mut cursor = self.cursor;
        cursor.advance_to(self.source, self.source.len())
    }

    fn span_of(
        &mut self,
        start: usize,
        end: usize,
    ) -> Span {
        let start = self.cursor.advance_to(self.source, start);
        let end = self.cursor.advance_to(self.source, end);
        Span::new(start, end)
    }

    fn emit(
        &mut self,
        kind: SyntaxKind,
        start: usize,
        end: usize,
    ) -> Token<'a> {
        let span = self.span_of(start, end);
        let token = Token {
            kind,
            text: &self.source[start..end],
            span,
            offset: start,
            spaced: self.spaced,
        };
        if kind == SyntaxKind::Comment {
            self.spaced = true;
        } else {
            self.spaced = false;
            self.line_start = false;
        }
        token
    }

    fn unterminated(
        &mut self,
        kind: LexErrorKind,
        start: usize,
        consumed_to: usize,
    ) -> LexError {
        let end = line_end(self.source, consumed_to);
        if end > consumed_to {
            self.inner.bump(end - consumed_to);
        }
        let span = self.span_of(start, end.max(consumed_to));
        self.spaced = true;
        self.line_start = false;
        LexError { kind, span }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token_result = self.inner.next()?;
            let range = self.inner.span();

            match token_result {
                Ok(TokenKind::Whitespace) => {
                    if self.inner.slice().contains('\n') {
                        self.line_start = true;
                    }
                    self.spaced = true;
                },
                Ok(TokenKind::Hash) if self.line_start => {
                    let end = directive_end(self.source, range.end);
                    if end > range.end {
                        self.inner.bump(end - range.end);
                    }
                    return Some(Ok(self.emit(SyntaxKind::Preprocessor, range.start, end)));
                },
                Ok(token) => {
                    let Some(kind) = token.syntax_kind() else {
                        continue;
                    };
                    return Some(Ok(self.emit(kind, range.start, range.end)));
                },
                Err(()) => {
                    let text = self.inner.slice();
                    let error_kind = if text.starts_with("R\"") {
                        Some(LexErrorKind::UnterminatedRawString)
                    } else if text.starts_with('"') {
                        Some(LexErrorKind::UnterminatedString)
                    } else if text.starts_with('\'') {
                        Some(LexErrorKind::UnterminatedChar)
                    } else {
                        None
                    };

                    return Some(match error_kind {
                        Some(kind) => Err(self.unterminated(kind, range.start, range.end)),
                        None => Ok(self.emit(SyntaxKind::Error, range.start, range.end)),
                    });
                },
            }
        }
    }
}

/// End of a preprocessor directive starting at `from`, following
/// backslash-newline continuations. Excludes the terminating line break.
fn directive_end(
    source: &str,
    from: usize,
) -> usize {
    let bytes = source.as_bytes();
    let mut index = from;
    while index < bytes.len() {
        if bytes[index] == b'\n' {
            let content_end = if index > from && bytes[index - 1] == b'\r' {
                index - 1
            } else {
                index
            };
            if content_end > from && bytes[content_end - 1] == b'\\' {
                index += 1;
                continue;
            }
            return content_end;
        }
        index += 1;
    }
    bytes.len()
}

fn line_end(
    source: &str,
    from: usize,
) -> usize {
    let rest = &source[from..];
    let end = rest.find('\n').map(|idx| from + idx).unwrap_or(source.len());
    if end > from && source.as_bytes()[end - 1] == b'\r' {
        end - 1
    } else {
        end
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/lexer_tests.rs"]
mod tests;
