//! Many-file scans: source discovery under a root and a parallel scan that
//! fills an [`OutlineStore`].
//!
//! Each file gets its own independent extraction; workers share nothing but
//! the store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{ConfigError, ScanSettings, Settings};
use crate::outline::{Outline, extract_with};
use crate::store::OutlineStore;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("scan root {} does not exist", .0.display())]
    RootNotFound(PathBuf),
    #[error("failed to build scan thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "reason")]
pub enum SkipReason {
    TooLarge { bytes: u64 },
    UnknownLanguage,
    Unreadable { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub nodes: usize,
    pub diagnostics: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub scanned: Vec<ScannedFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Source files under `root`, sorted. A file root is returned as-is.
pub fn collect_sources(
    root: &Path,
    settings: &ScanSettings,
) -> Result<Vec<PathBuf>, WorkspaceError> {
    if !root.exists() {
        return Err(WorkspaceError::RootNotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|entry| should_descend(entry, root, settings))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("[workspace] skipping unreadable entry: {err}");
                continue;
            },
        };
        if entry.file_type().is_file() && settings.accepts_extension(entry.path()) {
            sources.push(entry.into_path());
        }
    }
    sources.sort();
    debug!("[workspace] {} sources under {}", sources.len(), root.display());
    Ok(sources)
}

fn should_descend(
    entry: &DirEntry,
    root: &Path,
    settings: &ScanSettings,
) -> bool {
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    !settings.is_excluded(relative)
}

/// Read and scan one file with `settings`.
pub fn scan_file(
    path: &Path,
    settings: &Settings,
) -> Result<Outline, SkipReason> {
    let Some(language) = settings.outline.language_for(path) else {
        return Err(SkipReason::UnknownLanguage);
    };
    let metadata = std::fs::metadata(path).map_err(|err| SkipReason::Unreadable {
        message: err.to_string(),
    })?;
    if metadata.len() > settings.scan.max_file_size_bytes() {
        return Err(SkipReason::TooLarge {
            bytes: metadata.len(),
        });
    }
    let bytes = std::fs::read(path).map_err(|err| SkipReason::Unreadable {
        message: err.to_string(),
    })?;
    let source = String::from_utf8_lossy(&bytes);
    Ok(extract_with(&source, &settings.outline.extract_options(language)))
}

/// Scan `paths` in parallel and store every outline. Files that cannot be
/// scanned are listed in the report instead of failing the run.
pub fn scan_files(
    paths: &[PathBuf],
    settings: &Settings,
    store: &OutlineStore,
) -> Result<ScanReport, WorkspaceError> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(settings.scan.resolved_concurrency()).build()?;

    let results: Vec<(PathBuf, Result<Arc<Outline>, SkipReason>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let result = scan_file(path, settings).map(|outline| store.insert(path.clone(), outline));
                (path.clone(), result)
            })
            .collect()
    });

    let mut report = ScanReport::default();
    for (path, result) in results {
        match result {
            Ok(outline) => report.scanned.push(ScannedFile {
                nodes: outline.iter().count(),
                diagnostics: outline.diagnostics.len(),
                path,
            }),
            Err(reason) => {
                warn!("[workspace] skipped {}: {reason:?}", path.display());
                report.skipped.push(SkippedFile {
                    path,
                    reason,
                });
            },
        }
    }
    info!("[workspace] scanned {} files, skipped {}", report.scanned.len(), report.skipped.len());
    Ok(report)
}

/// Discover and scan everything under `root`.
pub fn scan_workspace(
    root: &Path,
    settings: &Settings,
    store: &OutlineStore,
) -> Result<ScanReport, WorkspaceError> {
    let sources = collect_sources(root, &settings.scan)?;
    scan_files(&sources, settings, store)
}
