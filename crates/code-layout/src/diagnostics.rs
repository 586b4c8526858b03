//! Non-fatal conditions reported alongside a best-effort outline.
//!
//! Nothing here aborts a scan. Each recoverable failure is turned into a
//! [`Diagnostic`] and the scanner keeps going, so callers always receive a
//! tree plus the list of problems met while building it.

use serde::Serialize;
use thiserror::Error;

use crate::scope::ScopeKind;
use crate::syntax::token::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LexErrorKind {
    UnterminatedString,
    UnterminatedChar,
    UnterminatedRawString,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} at {span}", describe_lex(.kind))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

fn describe_lex(kind: &LexErrorKind) -> &'static str {
    match kind {
        LexErrorKind::UnterminatedString => "unterminated string literal",
        LexErrorKind::UnterminatedChar => "unterminated character literal",
        LexErrorKind::UnterminatedRawString => "unterminated raw string literal",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("closing brace without a matching open scope")]
    UnmatchedClose,
    #[error("{kind} `{name}` is never closed")]
    UnclosedScope { kind: ScopeKind, name: String },
    #[error("brace group is never closed")]
    UnclosedGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    LexError,
    StructureError,
    ClassificationAmbiguity,
    OrphanDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn lex(error: &LexError) -> Self {
        Self {
            kind: DiagnosticKind::LexError,
            span: error.span,
            message: error.to_string(),
        }
    }

    pub fn structure(error: &StructureError, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::StructureError,
            span,
            message: error.to_string(),
        }
    }

    pub fn ambiguity(text: &str, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::ClassificationAmbiguity,
            span,
            message: format!("unrecognized declaration `{text}`"),
        }
    }

    pub fn orphan(name: &str, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::OrphanDefinition,
            span,
            message: format!("no prior declaration matches `{name}`"),
        }
    }
}
