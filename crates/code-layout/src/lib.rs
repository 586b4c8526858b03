//! Structural outlines for C and C++ sources.
//!
//! [`extract`] turns one buffer into an [`Outline`]: a tree of namespaces,
//! records, functions, variables, typedefs, templates and macros with their
//! source spans, plus the non-fatal [`Diagnostic`]s met on the way. The scan
//! never fails; malformed input yields a best-effort tree.
//!
//! ```
//! use code_layout::{DeclKind, Language, extract};
//!
//! let outline = extract("namespace app { int run(int argc); }", Language::Cpp);
//! let run = outline.find("app::run(1)").unwrap();
//! assert_eq!(run.kind, DeclKind::FunctionDeclaration);
//! ```

pub mod config;
pub mod diagnostics;
pub mod outline;
pub mod scope;
pub mod store;
pub mod syntax;
pub mod workspace;

pub use config::{ConfigError, Settings};
pub use diagnostics::{Diagnostic, DiagnosticKind, LexError, StructureError};
pub use outline::{DeclFlags, DeclKind, ExtractOptions, NodeKey, Outline, OutlineNode, extract, extract_with};
pub use scope::Access;
pub use store::{OutlineStore, SymbolMatch};
pub use syntax::Language;
pub use syntax::token::{Position, Span};
pub use workspace::{ScanReport, WorkspaceError, scan_files, scan_workspace};
