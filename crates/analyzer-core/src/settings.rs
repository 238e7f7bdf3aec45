use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::patterns::{
    DEFAULT_DATETIME_FORMAT, DEFAULT_HEADER_PATTERN, DEFAULT_WEIGHT_FLOOR, DEFAULT_WORKOUT_MARKER,
};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Workout and weight trends from an exported group chat
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chat-analyzer",
    about = "Workout and weight trends from an exported group chat",
    version
)]
pub struct Settings {
    /// Path to the exported chat text file
    #[arg(long, default_value = "files/chat.txt")]
    pub chat_file: PathBuf,

    /// chrono format used to parse "<date>, <time>" from a message header
    #[arg(long, default_value = DEFAULT_DATETIME_FORMAT)]
    pub datetime_format: String,

    /// Header regex; groups 1-4 capture date, time, sender and text
    #[arg(long, default_value = DEFAULT_HEADER_PATTERN)]
    pub header_pattern: String,

    /// Weight detection preset
    #[arg(long, default_value = "keyword", value_parser = ["keyword", "bare"])]
    pub weight_mode: String,

    /// Custom weight regex (overrides the preset of --weight-mode)
    #[arg(long)]
    pub weight_pattern: Option<String>,

    /// Weights at or below this value are discarded
    #[arg(long, default_value_t = DEFAULT_WEIGHT_FLOOR)]
    pub weight_floor: f64,

    /// Keep every detected weight regardless of value
    #[arg(long)]
    pub no_weight_floor: bool,

    /// Substring marking a completed workout
    #[arg(long, default_value = DEFAULT_WORKOUT_MARKER)]
    pub workout_marker: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Print the tables only, do not open the chart viewer
    #[arg(long)]
    pub no_charts: bool,

    /// Do not print the workout and weight tables
    #[arg(long)]
    pub quiet: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.chat-analyzer/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_floor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.chat-analyzer/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".chat-analyzer").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return settings.apply_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins; clap keys args by field name, not flag spelling.
        if !is_arg_explicitly_set(&matches, "chat_file") {
            if let Some(v) = last.chat_file {
                settings.chat_file = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "datetime_format") {
            if let Some(v) = last.datetime_format {
                settings.datetime_format = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "header_pattern") {
            if let Some(v) = last.header_pattern {
                settings.header_pattern = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "weight_mode") {
            if let Some(v) = last.weight_mode {
                settings.weight_mode = v;
            }
        }
        // A saved pattern overrode the saved mode; an explicit mode replaces both.
        if !is_arg_explicitly_set(&matches, "weight_pattern")
            && !is_arg_explicitly_set(&matches, "weight_mode")
            && settings.weight_pattern.is_none()
        {
            settings.weight_pattern = last.weight_pattern;
        }
        if !is_arg_explicitly_set(&matches, "weight_floor") {
            if let Some(v) = last.weight_floor {
                settings.weight_floor = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "workout_marker") {
            if let Some(v) = last.workout_marker {
                settings.workout_marker = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }

        settings = settings.apply_debug();

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!("Could not save last used parameters: {}", e);
        }

        settings
    }

    /// The plausibility floor for weights, or `None` when disabled.
    pub fn effective_weight_floor(&self) -> Option<f64> {
        if self.no_weight_floor {
            None
        } else {
            Some(self.weight_floor)
        }
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            chat_file: Some(s.chat_file.clone()),
            datetime_format: Some(s.datetime_format.clone()),
            header_pattern: Some(s.header_pattern.clone()),
            weight_mode: Some(s.weight_mode.clone()),
            weight_pattern: s.weight_pattern.clone(),
            weight_floor: Some(s.weight_floor),
            workout_marker: Some(s.workout_marker.clone()),
            theme: Some(s.theme.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
