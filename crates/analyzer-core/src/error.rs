use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Chat Analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The chat export could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured regular expression failed to compile.
    #[error("Invalid {name} pattern: {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    /// A configured pattern compiled but exposes too few capture groups.
    #[error("The {name} pattern needs {expected} capture groups, found {found}")]
    PatternGroups {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Why a single input line was dropped by the parser.
///
/// Skips are expected and never abort a run; they are counted and logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSkip {
    /// The line looked like a header but its date/time did not parse.
    #[error("line {line}: unparsable timestamp \"{timestamp}\"")]
    UnparsableTimestamp { line: usize, timestamp: String },

    /// A continuation line appeared before any message header.
    #[error("line {line}: continuation before first message")]
    OrphanContinuation { line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_access() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = AnalyzerError::FileAccess {
            path: PathBuf::from("/some/chat.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/chat.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_invalid_pattern() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = AnalyzerError::InvalidPattern {
            name: "header",
            source,
        };
        assert!(err.to_string().starts_with("Invalid header pattern:"));
    }

    #[test]
    fn test_error_display_pattern_groups() {
        let err = AnalyzerError::PatternGroups {
            name: "header",
            expected: 4,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "The header pattern needs 4 capture groups, found 2"
        );
    }

    #[test]
    fn test_error_display_terminal() {
        let err = AnalyzerError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = AnalyzerError::Config("bad format".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad format");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AnalyzerError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_parse_skip_display() {
        let skip = ParseSkip::UnparsableTimestamp {
            line: 3,
            timestamp: "32/13/2021, 99:99:99".to_string(),
        };
        assert_eq!(
            skip.to_string(),
            "line 3: unparsable timestamp \"32/13/2021, 99:99:99\""
        );
        let orphan = ParseSkip::OrphanContinuation { line: 1 };
        assert_eq!(orphan.to_string(), "line 1: continuation before first message");
    }
}
