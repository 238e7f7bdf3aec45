use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.chat-analyzer/` exists (it holds `last_used.json`).
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(".chat-analyzer");
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a user-facing level name onto an [`EnvFilter`] directive.
///
/// Accepts the usual upper-case names (`WARNING`, `CRITICAL`, ...); anything
/// else is passed through as a raw filter directive.
pub fn level_directive(log_level: &str) -> &str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => log_level,
    }
}

/// Build the filter for `log_level`, falling back to `"info"` when the
/// directive does not parse.
pub fn level_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialise the global `tracing` subscriber.
///
/// Without `log_file` events go to stderr with colours; with it they are
/// appended to the file as plain text.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = level_filter(log_level);

    match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

    Ok(())
}

fn open_log_file(path: &Path) -> anyhow::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        let app_dir = result.expect("ensure_directories should succeed");
        assert_eq!(app_dir, tmp.path().join(".chat-analyzer"));
        assert!(app_dir.is_dir(), ".chat-analyzer dir must exist");
    }

    #[test]
    fn test_level_directive_maps_names() {
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("critical"), "error");
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("analyzer_data=trace"), "analyzer_data=trace");
    }

    #[test]
    fn test_level_filter_falls_back_to_info() {
        assert_eq!(level_filter("analyzer=verbose").to_string(), "info");
    }

    #[test]
    fn test_level_filter_keeps_valid_directives() {
        assert_eq!(level_filter("WARNING").to_string(), "warn");
        assert_eq!(
            level_filter("analyzer_data=trace").to_string(),
            "analyzer_data=trace"
        );
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("logs").join("run.log");

        open_log_file(&path).expect("log file should open");

        assert!(path.is_file());
    }
}
