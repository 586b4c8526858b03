use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use crate::outline::{DeclKind, ExtractOptions, NodeKey, Outline, extract_with};
use crate::syntax::token::Span;

/// One hit of [`OutlineStore::search`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolMatch {
    pub path: PathBuf,
    pub key: NodeKey,
    pub kind: DeclKind,
    pub name: String,
    pub span: Span,
}

/// Thread-safe store of the latest outline for each scanned file.
///
/// Entries are replaced wholesale on re-scan; readers holding an
/// `Arc<Outline>` keep the snapshot they were given.
pub struct OutlineStore {
    outlines: DashMap<PathBuf, Arc<Outline>>,
}

impl OutlineStore {
    pub fn new() -> Self {
        Self {
            outlines: DashMap::new(),
        }
    }

    /// Scan `source` and store the result under `path`, replacing any
    /// previous outline.
    pub fn scan_and_store(
        &self,
        path: &Path,
        source: &str,
        options: &ExtractOptions,
    ) -> Arc<Outline> {
        let outline = Arc::new(extract_with(source, options));
        self.outlines.insert(path.to_path_buf(), Arc::clone(&outline));
        outline
    }

    pub fn insert(
        &self,
        path: PathBuf,
        outline: Outline,
    ) -> Arc<Outline> {
        let outline = Arc::new(outline);
        self.outlines.insert(path, Arc::clone(&outline));
        outline
    }

    /// Get an Arc-cloned snapshot. No lock held after return.
    pub fn get(
        &self,
        path: &Path,
    ) -> Option<Arc<Outline>> {
        self.outlines.get(path).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(
        &self,
        path: &Path,
    ) -> Option<Arc<Outline>> {
        self.outlines.remove(path).map(|(_, outline)| outline)
    }

    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    /// Stored paths in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.outlines.iter().map(|entry| entry.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Search for symbols matching a query (case-insensitive substring match).
    /// Returns up to `limit` results, ordered by path then source position.
    pub fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Vec<SymbolMatch> {
        let query_lower = query.to_lowercase();
        let mut results = Vec::new();

        for path in self.paths() {
            let Some(outline) = self.get(&path) else {
                continue;
            };
            for node in outline.iter() {
                if node.name.is_empty() || !node.name.to_lowercase().contains(&query_lower) {
                    continue;
                }
                results.push(SymbolMatch {
                    path: path.clone(),
                    key: node.key.clone(),
                    kind: node.kind,
                    name: node.name.clone(),
                    span: node.selection_span,
                });
                if results.len() >= limit {
                    debug!("[store] search `{query}` hit the limit of {limit}");
                    return results;
                }
            }
        }

        results
    }
}

impl Default for OutlineStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/src/store_tests.rs"]
mod tests;
