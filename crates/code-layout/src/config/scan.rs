use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::syntax::Language;

pub const MIN_SCAN_CONCURRENCY: usize = 1;
pub const MAX_SCAN_CONCURRENCY: usize = 64;
pub const MIN_MAX_FILE_SIZE_KB: u64 = 16;
pub const MAX_MAX_FILE_SIZE_KB: u64 = 1024 * 64;

pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "h", "cc", "cpp", "cxx", "hh", "hpp", "hxx", "inl"];

#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    /// Worker threads for workspace scans; `0` means one per core.
    pub concurrency: usize,
    pub max_file_size_kb: u64,
    pub extensions: Vec<String>,
    pub exclude_paths: Vec<String>,
    pub follow_links: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            concurrency: 0,
            max_file_size_kb: 1024,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude_paths: Vec::new(),
            follow_links: false,
        }
    }
}

impl ScanSettings {
    pub fn resolved_concurrency(&self) -> usize {
        if self.concurrency == 0 {
            return std::thread::available_parallelism().map(|n| n.get()).unwrap_or(MIN_SCAN_CONCURRENCY);
        }
        self.concurrency
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }

    pub fn accepts_extension(
        &self,
        path: &Path,
    ) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// True when any path component equals one of `exclude_paths`, or the
    /// path ends with one of them.
    pub fn is_excluded(
        &self,
        path: &Path,
    ) -> bool {
        self.exclude_paths.iter().any(|excluded| {
            let excluded = Path::new(excluded);
            path.ends_with(excluded) || path.components().any(|c| Path::new(c.as_os_str()) == excluded)
        })
    }

    pub(crate) fn apply_patch(
        &mut self,
        patch: ScanSettingsPatch,
    ) {
        if let Some(v) = patch.concurrency {
            self.concurrency = v;
        }
        if let Some(v) = patch.max_file_size_kb {
            self.max_file_size_kb = v;
        }
        if let Some(v) = patch.extensions {
            self.extensions = v;
        }
        if let Some(v) = patch.exclude_paths {
            self.exclude_paths = v;
        }
        if let Some(v) = patch.follow_links {
            self.follow_links = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        if self.concurrency != 0 {
            self.concurrency = self.concurrency.clamp(MIN_SCAN_CONCURRENCY, MAX_SCAN_CONCURRENCY);
        }
        self.max_file_size_kb = self.max_file_size_kb.clamp(MIN_MAX_FILE_SIZE_KB, MAX_MAX_FILE_SIZE_KB);
        self.extensions = dedup_trimmed(&self.extensions, |e| e.trim().trim_start_matches('.').to_ascii_lowercase());
        if self.extensions.is_empty() {
            self.extensions = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        }
        self.exclude_paths = dedup_trimmed(&self.exclude_paths, |p| p.trim().to_string());
    }
}

/// Language for `path`, falling back to `header_language` for `.h` files.
pub fn language_for(
    path: &Path,
    header_language: Language,
) -> Option<Language> {
    Language::from_path(path).or_else(|| {
        let ext = path.extension()?.to_str()?;
        ext.eq_ignore_ascii_case("h").then_some(header_language)
    })
}

fn dedup_trimmed(
    values: &[String],
    clean: impl Fn(&str) -> String,
) -> Vec<String> {
    let mut seen = HashSet::new();
    values.iter().map(|v| clean(v)).filter(|v| !v.is_empty()).filter(|v| seen.insert(v.clone())).collect()
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ScanSettingsPatch {
    pub(crate) concurrency: Option<usize>,
    pub(crate) max_file_size_kb: Option<u64>,
    pub(crate) extensions: Option<Vec<String>>,
    pub(crate) exclude_paths: Option<Vec<String>>,
    pub(crate) follow_links: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
