use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use code_layout::config::{ConfigError, LoggingSettings, Settings};
use code_layout::workspace::{self, WorkspaceError};
use code_layout::{Language, Outline, OutlineStore};

#[derive(Parser, Debug)]
#[command(name = "code-layout", version, about = "Print the declaration outline of C and C++ sources")]
struct Args {
    /// Files or directories to scan.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Scan every file as this language instead of guessing from the extension.
    #[arg(long)]
    language: Option<Language>,

    /// Print symbols whose name contains QUERY instead of whole outlines.
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    #[arg(long, default_value_t = 50)]
    limit: usize,

    /// Explicit `code-layout.toml`; otherwise the nearest one above the first path.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON settings layered over the file configuration.
    #[arg(long)]
    config_json: Option<String>,

    #[arg(long)]
    no_macros: bool,

    #[arg(long)]
    no_enumerators: bool,

    #[arg(long)]
    no_unknown: bool,

    /// Worker threads for directory scans (0 = one per core).
    #[arg(long, short = 'j')]
    jobs: Option<usize>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented `kind name` listing.
    Tree,
    /// The outline tree as JSON.
    Json,
    /// LSP `DocumentSymbol` JSON.
    Symbols,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

fn load_settings(args: &Args) -> Result<Settings, ConfigError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => {
            let start = args.paths.first().map(PathBuf::as_path).unwrap_or(Path::new("."));
            Settings::discover(start)?
        },
    };
    if let Some(text) = &args.config_json {
        settings = settings.merged_with_json_str(text)?;
    }

    if args.language.is_some() {
        settings.outline.language = args.language;
    }
    if args.no_macros {
        settings.outline.include_macros = false;
    }
    if args.no_enumerators {
        settings.outline.include_enumerators = false;
    }
    if args.no_unknown {
        settings.outline.include_unknown = false;
    }
    if let Some(jobs) = args.jobs {
        settings.scan.concurrency = jobs;
    }
    Ok(settings)
}

fn init_logging(
    args: &Args,
    logging: &LoggingSettings,
) {
    let directive = if args.verbose {
        "code_layout=debug".to_string()
    } else {
        logging.level.filter_directive()
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(EnvFilter::new(&directive));

    let log_path = args.log_file.clone().or_else(|| logging.file.as_ref().map(PathBuf::from));
    let file_layer = log_path.as_ref().map(|log_path| {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(Path::new(".")),
            log_path.file_name().unwrap_or(std::ffi::OsStr::new("code-layout.log")),
        );
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new(&directive))
    });

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();

    if let Some(log_path) = log_path {
        info!("Log file: {}", log_path.display());
    }
}

fn print_outline(
    out: &mut impl Write,
    path: &Path,
    outline: &Outline,
    format: Format,
) -> Result<(), CliError> {
    match format {
        Format::Tree => {
            writeln!(out, "{} ({})", path.display(), outline.language)?;
            write!(out, "{}", outline.render_tree())?;
            for diagnostic in &outline.diagnostics {
                writeln!(out, "  ! {}: {}", diagnostic.span.start, diagnostic.message)?;
            }
        },
        Format::Json => {
            let value = serde_json::json!({ "path": path, "outline": outline });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        },
        Format::Symbols => {
            let value = serde_json::json!({ "path": path, "symbols": outline.to_document_symbols() });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        },
    }
    Ok(())
}

fn run(
    args: &Args,
    settings: &Settings,
) -> Result<bool, CliError> {
    let store = OutlineStore::new();
    let mut skipped = 0;
    for root in &args.paths {
        let report = workspace::scan_workspace(root, settings, &store)?;
        for file in &report.skipped {
            eprintln!("skipped {}: {:?}", file.path.display(), file.reason);
        }
        skipped += report.skipped.len();
    }
    debug!("[cli] {} outlines in store", store.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Some(query) = &args.search {
        let hits = store.search(query, args.limit);
        if args.format == Format::Tree {
            for hit in &hits {
                writeln!(out, "{}:{}\t{}\t{}", hit.path.display(), hit.span.start, hit.kind, hit.key)?;
            }
        } else {
            writeln!(out, "{}", serde_json::to_string_pretty(&hits)?)?;
        }
        return Ok(skipped == 0);
    }

    for path in store.paths() {
        if let Some(outline) = store.get(&path) {
            print_outline(&mut out, &path, &outline, args.format)?;
        }
    }
    Ok(skipped == 0)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        },
    };

    init_logging(&args, &settings.logging);
    info!("code-layout v{}", env!("CARGO_PKG_VERSION"));

    match run(&args, &settings) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        },
    }
}
