use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::config::scan::language_for;
use crate::outline::ExtractOptions;
use crate::syntax::Language;

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineSettings {
    pub include_macros: bool,
    pub include_enumerators: bool,
    pub include_unknown: bool,
    /// Language assumed for `.h` files.
    pub header_language: Language,
    /// Overrides extension-based detection for every file.
    pub language: Option<Language>,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            include_macros: true,
            include_enumerators: true,
            include_unknown: true,
            header_language: Language::Cpp,
            language: None,
        }
    }
}

impl OutlineSettings {
    /// Language for `path`, or `None` when it is not a C or C++ source.
    pub fn language_for(
        &self,
        path: &Path,
    ) -> Option<Language> {
        self.language.or_else(|| language_for(path, self.header_language))
    }

    pub fn extract_options(
        &self,
        language: Language,
    ) -> ExtractOptions {
        ExtractOptions {
            language,
            include_macros: self.include_macros,
            include_enumerators: self.include_enumerators,
            include_unknown: self.include_unknown,
        }
    }

    pub(crate) fn apply_patch(
        &mut self,
        patch: OutlineSettingsPatch,
    ) {
        if let Some(v) = patch.include_macros {
            self.include_macros = v;
        }
        if let Some(v) = patch.include_enumerators {
            self.include_enumerators = v;
        }
        if let Some(v) = patch.include_unknown {
            self.include_unknown = v;
        }
        if let Some(v) = patch.header_language {
            self.header_language = v;
        }
        if let Some(v) = patch.language {
            self.language = Some(v);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct OutlineSettingsPatch {
    pub(crate) include_macros: Option<bool>,
    pub(crate) include_enumerators: Option<bool>,
    pub(crate) include_unknown: Option<bool>,
    pub(crate) header_language: Option<Language>,
    pub(crate) language: Option<Language>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
