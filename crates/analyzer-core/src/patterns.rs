//! Compiled, validated chat grammar.
//!
//! Every pattern arrives as a configuration string. [`ChatPatterns`] compiles
//! them once at startup so that a bad pattern fails the run immediately
//! instead of silently matching nothing line after line.

use chrono::format::{Item, Numeric, StrftimeItems};
use chrono::NaiveDateTime;
use regex::{Regex, RegexBuilder};

use crate::error::{AnalyzerError, Result};
use crate::settings::Settings;

/// `[d/m/y, H:MM:SS] sender: text` — groups: date, time, sender, text.
pub const DEFAULT_HEADER_PATTERN: &str =
    r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}:\d{2})\]\s([^:]+):\s(.*)";

/// Day-first date, 24-hour time, joined by `", "`.
pub const DEFAULT_DATETIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

pub const DEFAULT_WORKOUT_MARKER: &str = "✅";

pub const DEFAULT_WEIGHT_FLOOR: f64 = 80.0;

/// Number following the phrase "average weight", e.g. `Average weight: 82.4`.
pub const KEYWORD_WEIGHT_PATTERN: &str = r"average weight[:\-]?\s*(\d+\.?\d*)";

/// Any bare `NN.N` token.
pub const BARE_WEIGHT_PATTERN: &str = r"\b\d{2}\.\d\b";

/// Capture groups a header pattern must expose (date, time, sender, text).
const HEADER_GROUPS: usize = 4;

/// Resolve a `--weight-mode` name to its preset pattern.
pub fn weight_preset(mode: &str) -> Option<&'static str> {
    match mode {
        "keyword" => Some(KEYWORD_WEIGHT_PATTERN),
        "bare" => Some(BARE_WEIGHT_PATTERN),
        _ => None,
    }
}

// ── Header grammar ────────────────────────────────────────────────────────────

/// The pieces of a matched header line, borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderParts<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub sender: &'a str,
    pub text: &'a str,
}

impl HeaderParts<'_> {
    /// The `"{date}, {time}"` string handed to the date/time format.
    pub fn timestamp_text(&self) -> String {
        format!("{}, {}", self.date, self.time)
    }
}

/// Header regex plus the date/time format applied to its captures.
#[derive(Debug, Clone)]
pub struct HeaderGrammar {
    pattern: Regex,
    datetime_format: String,
    /// One flag per numeric field of the format, `true` for `%Y`.
    year_fields: Vec<bool>,
}

impl HeaderGrammar {
    /// Compile `pattern` and check `datetime_format`.
    pub fn new(pattern: &str, datetime_format: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| AnalyzerError::InvalidPattern {
            name: "header",
            source,
        })?;

        // captures_len() counts the implicit whole-match group.
        let found = pattern.captures_len() - 1;
        if found < HEADER_GROUPS {
            return Err(AnalyzerError::PatternGroups {
                name: "header",
                expected: HEADER_GROUPS,
                found,
            });
        }

        let items: Vec<Item<'_>> = StrftimeItems::new(datetime_format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(AnalyzerError::Config(format!(
                "invalid date/time format \"{}\"",
                datetime_format
            )));
        }

        let year_fields = items
            .iter()
            .filter_map(|item| match item {
                Item::Numeric(field, _) => Some(matches!(field, Numeric::Year)),
                _ => None,
            })
            .collect();

        Ok(Self {
            pattern,
            datetime_format: datetime_format.to_string(),
            year_fields,
        })
    }

    /// Split `line` into header parts, or `None` when it is not a header.
    pub fn match_header<'a>(&self, line: &'a str) -> Option<HeaderParts<'a>> {
        let caps = self.pattern.captures(line)?;
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
        Some(HeaderParts {
            date: group(1),
            time: group(2),
            sender: group(3),
            text: group(4),
        })
    }

    /// Parse the header's timestamp with the configured format.
    ///
    /// `%Y` must be written with exactly four digits: `21` is not read as
    /// year 0021.
    pub fn parse_timestamp(&self, parts: &HeaderParts<'_>) -> Option<NaiveDateTime> {
        let text = parts.timestamp_text();
        if !self.full_width_years(&text) {
            return None;
        }
        NaiveDateTime::parse_from_str(&text, &self.datetime_format).ok()
    }

    /// Pair the digit runs of `text` with the format's numeric fields and
    /// check every `%Y` run is four digits long. Formats whose numeric
    /// fields are not separated cannot be paired and are left to chrono.
    fn full_width_years(&self, text: &str) -> bool {
        let runs: Vec<&str> = text
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .collect();
        if runs.len() != self.year_fields.len() {
            return true;
        }
        self.year_fields
            .iter()
            .zip(&runs)
            .all(|(is_year, run)| !is_year || run.len() == 4)
    }

    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }
}

// ── Weight policy ─────────────────────────────────────────────────────────────

/// How a weight value is found in a message and which values are plausible.
#[derive(Debug, Clone)]
pub struct WeightPolicy {
    pattern: Regex,
    floor: Option<f64>,
}

impl WeightPolicy {
    /// Compile `pattern` case-insensitively.
    ///
    /// Values must be strictly greater than `floor` when one is given.
    pub fn new(pattern: &str, floor: Option<f64>) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| AnalyzerError::InvalidPattern {
                name: "weight",
                source,
            })?;
        Ok(Self { pattern, floor })
    }

    /// The numeric value of the first match in `text`.
    ///
    /// Capture group 1 is used when the pattern has one and it took part in
    /// the match; otherwise the whole match is parsed.
    pub fn find_value(&self, text: &str) -> Option<f64> {
        let caps = self.pattern.captures(text)?;
        let found = caps.get(1).or_else(|| caps.get(0))?;
        found.as_str().parse::<f64>().ok()
    }

    /// Whether `value` clears the plausibility floor.
    pub fn accepts(&self, value: f64) -> bool {
        self.floor.map_or(true, |floor| value > floor)
    }

    /// First plausible value in `text`.
    pub fn extract(&self, text: &str) -> Option<f64> {
        self.find_value(text).filter(|v| self.accepts(*v))
    }

    pub fn floor(&self) -> Option<f64> {
        self.floor
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

// ── ChatPatterns ──────────────────────────────────────────────────────────────

/// Everything the parser and extractors need to recognise chat content.
#[derive(Debug, Clone)]
pub struct ChatPatterns {
    pub header: HeaderGrammar,
    pub weight: WeightPolicy,
    pub workout_marker: String,
}

impl ChatPatterns {
    /// The stock grammar: bracketed day-first headers, keyword weights
    /// above 80 and the ✅ workout marker.
    pub fn defaults() -> Result<Self> {
        Ok(Self {
            header: HeaderGrammar::new(DEFAULT_HEADER_PATTERN, DEFAULT_DATETIME_FORMAT)?,
            weight: WeightPolicy::new(KEYWORD_WEIGHT_PATTERN, Some(DEFAULT_WEIGHT_FLOOR))?,
            workout_marker: DEFAULT_WORKOUT_MARKER.to_string(),
        })
    }

    /// Build and validate the patterns named by `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let weight_pattern = match settings.weight_pattern.as_deref() {
            Some(custom) => custom,
            None => weight_preset(&settings.weight_mode).ok_or_else(|| {
                AnalyzerError::Config(format!("unknown weight mode \"{}\"", settings.weight_mode))
            })?,
        };

        if settings.workout_marker.is_empty() {
            return Err(AnalyzerError::Config(
                "workout marker must not be empty".to_string(),
            ));
        }

        Ok(Self {
            header: HeaderGrammar::new(&settings.header_pattern, &settings.datetime_format)?,
            weight: WeightPolicy::new(weight_pattern, settings.effective_weight_floor())?,
            workout_marker: settings.workout_marker.clone(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
