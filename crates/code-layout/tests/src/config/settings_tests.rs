use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
};

use serde_json::json;

use super::*;
use crate::syntax::Language;

fn test_dir() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("code_layout_config_{}_{id}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn parses_namespaced_payload() {
    let payload = json!({
        "code-layout": {
            "outline": {
                "includeMacros": false,
                "headerLanguage": "c"
            },
            "scan": {
                "concurrency": 4,
                "maxFileSizeKb": 256,
                "excludePaths": ["third_party", " build "]
            },
            "logging": {
                "level": "debug"
            }
        }
    });

    let settings = Settings::from_json_payload(Some(&payload));
    assert!(!settings.outline.include_macros);
    assert!(settings.outline.include_enumerators);
    assert_eq!(settings.outline.header_language, Language::C);
    assert_eq!(settings.scan.concurrency, 4);
    assert_eq!(settings.scan.max_file_size_kb, 256);
    assert_eq!(settings.scan.exclude_paths, vec!["third_party".to_string(), "build".to_string()]);
    assert_eq!(settings.logging.level, LogLevel::Debug);
}

#[test]
fn parses_direct_payload() {
    let payload = json!({
        "outline": { "includeUnknown": false },
        "scan": { "followLinks": true }
    });

    let settings = Settings::from_json_payload(Some(&payload));
    assert!(!settings.outline.include_unknown);
    assert!(settings.scan.follow_links);
    assert_eq!(settings.logging, LoggingSettings::default());
}

#[test]
fn missing_payload_gives_defaults() {
    assert_eq!(Settings::from_json_payload(None), Settings::default());
}

#[test]
fn clamps_numeric_values() {
    let payload = json!({
        "scan": { "concurrency": 1000, "maxFileSizeKb": 1 }
    });

    let settings = Settings::from_json_payload(Some(&payload));
    assert_eq!(settings.scan.concurrency, MAX_SCAN_CONCURRENCY);
    assert_eq!(settings.scan.max_file_size_kb, MIN_MAX_FILE_SIZE_KB);
}

#[test]
fn zero_concurrency_means_automatic() {
    let settings = Settings::from_json_payload(Some(&json!({ "scan": { "concurrency": 0 } })));
    assert_eq!(settings.scan.concurrency, 0);
    assert!(settings.scan.resolved_concurrency() >= MIN_SCAN_CONCURRENCY);
}

#[test]
fn normalizes_extensions() {
    let payload = json!({ "scan": { "extensions": [".CPP", "cpp", " h ", ""] } });
    let settings = Settings::from_json_payload(Some(&payload));
    assert_eq!(settings.scan.extensions, vec!["cpp".to_string(), "h".to_string()]);

    let emptied = Settings::from_json_payload(Some(&json!({ "scan": { "extensions": [] } })));
    assert_eq!(emptied.scan.extensions.len(), DEFAULT_EXTENSIONS.len());
}

#[test]
fn invalid_sections_are_skipped_leniently() {
    let base = Settings::from_json_payload(Some(&json!({ "scan": { "concurrency": 3 } })));
    let merged = base.merged_with_payload(&json!({ "scan": { "concurrency": "many" } }));
    assert_eq!(merged.scan.concurrency, 3);
}

#[test]
fn strict_json_reports_type_errors() {
    let err = Settings::default().merged_with_json_str(r#"{ "scan": { "concurrency": "many" } }"#);
    assert!(matches!(err, Err(ConfigError::Json(_))));

    let ok = Settings::default().merged_with_json_str(r#"{ "logging": { "level": "trace" } }"#).unwrap();
    assert_eq!(ok.logging.level, LogLevel::Trace);
}

#[test]
fn parses_toml() {
    let text = r#"
[outline]
includeEnumerators = false

[scan]
excludePaths = ["vendor"]
concurrency = 2

[logging]
level = "info"
file = "/tmp/code-layout.log"
"#;
    let settings = Settings::from_toml_str(text, Path::new("code-layout.toml")).unwrap();
    assert!(!settings.outline.include_enumerators);
    assert_eq!(settings.scan.exclude_paths, vec!["vendor".to_string()]);
    assert_eq!(settings.scan.concurrency, 2);
    assert_eq!(settings.logging.level, LogLevel::Info);
    assert_eq!(settings.logging.file.as_deref(), Some("/tmp/code-layout.log"));
}

#[test]
fn invalid_toml_names_the_file() {
    let err = Settings::from_toml_str("[scan]\nconcurrency = \"x\"\n", Path::new("/work/code-layout.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Toml { .. }));
    assert!(err.to_string().contains("/work/code-layout.toml"));
}

#[test]
fn find_config_file_walks_parents() {
    let dir = test_dir();
    let config = dir.join(CONFIG_FILENAME);
    fs::write(&config, "[logging]\nlevel = \"error\"\n").unwrap();
    let nested = dir.join("src").join("core");
    fs::create_dir_all(&nested).unwrap();
    let source = nested.join("widget.cpp");
    fs::write(&source, "").unwrap();

    assert_eq!(find_config_file(&source), Some(config.clone()));
    assert_eq!(find_config_file(&nested), Some(config));

    let settings = Settings::discover(&source).unwrap();
    assert_eq!(settings.logging.level, LogLevel::Error);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn load_reports_missing_file() {
    let dir = test_dir();
    let err = Settings::load(&dir.join(CONFIG_FILENAME)).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn scan_settings_filters_paths() {
    let settings = ScanSettings {
        exclude_paths: vec!["vendor".to_string()],
        ..ScanSettings::default()
    };
    assert!(settings.accepts_extension(Path::new("a/b.HPP")));
    assert!(!settings.accepts_extension(Path::new("a/b.rs")));
    assert!(settings.is_excluded(Path::new("project/vendor/lib.c")));
    assert!(!settings.is_excluded(Path::new("project/vendored/lib.c")));
}

#[test]
fn header_language_applies_to_h_files() {
    assert_eq!(language_for(Path::new("x.h"), Language::C), Some(Language::C));
    assert_eq!(language_for(Path::new("x.hpp"), Language::C), Some(Language::Cpp));
    assert_eq!(language_for(Path::new("x.c"), Language::Cpp), Some(Language::C));
    assert_eq!(language_for(Path::new("x.txt"), Language::Cpp), None);
}

#[test]
fn log_level_filter_directive() {
    assert_eq!(LogLevel::Debug.filter_directive(), "code_layout=debug");
    assert_eq!(LogLevel::default(), LogLevel::Warn);
}

#[test]
fn forced_language_overrides_extensions() {
    let settings = Settings::from_json_payload(Some(&json!({ "outline": { "language": "c" } })));
    assert_eq!(settings.outline.language_for(Path::new("widget.cpp")), Some(Language::C));
    assert_eq!(settings.outline.language_for(Path::new("notes.txt")), Some(Language::C));
    assert_eq!(Settings::default().outline.language_for(Path::new("notes.txt")), None);
}
