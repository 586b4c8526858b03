pub mod kind;
pub mod lexer;
pub mod token;

use std::path::Path;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::diagnostics::LexError;
use crate::syntax::kind::SyntaxKind;
use crate::syntax::lexer::Lexer;
use crate::syntax::token::Token;

/// Language hint for a scan. Under [`Language::C`] the C++-only forms
/// (namespaces, classes, templates, access specifiers) are not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    #[default]
    Cpp,
}

impl Language {
    pub fn is_cpp(self) -> bool {
        self == Language::Cpp
    }

    /// Guess from a file extension. `.h` is left to the caller (`None`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "c" => Some(Language::C),
            "cc" | "cpp" | "cxx" | "c++" | "hh" | "hpp" | "hxx" | "h++" | "ipp" | "tpp" | "inl" => {
                Some(Language::Cpp)
            },
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| ext.to_str()).and_then(Self::from_extension)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::C => f.write_str("c"),
            Language::Cpp => f.write_str("cpp"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(Language::C),
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            other => Err(format!("unknown language `{other}` (expected `c` or `cpp`)")),
        }
    }
}

/// Lex a whole buffer into the significant tokens a scan works on.
///
/// Comments are dropped and, for C, C++-only keywords are demoted to plain
/// identifiers. Lexing never stops early; malformed literals are returned
/// next to the tokens.
pub fn tokenize(
    source: &str,
    language: Language,
) -> (Vec<Token<'_>>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for item in Lexer::new(source) {
        match item {
            Ok(token) if token.kind == SyntaxKind::Comment => {},
            Ok(mut token) => {
                if !language.is_cpp() && token.kind.is_cpp_only() {
                    token.kind = SyntaxKind::Ident;
                }
                tokens.push(token);
            },
            Err(error) => errors.push(error),
        }
    }
    (tokens, errors)
}
