//! Main analysis pipeline for Chat Analyzer.
//!
//! Parses the export once, then runs the workout and weight extractors over
//! the same records and returns an [`AnalysisResult`] ready for printing and
//! charting.

use std::path::Path;

use analyzer_core::error::Result;
use analyzer_core::models::{MessageRecord, WeightEntry, WorkoutEntry};
use analyzer_core::patterns::ChatPatterns;
use tracing::info;

use crate::reader::parse_chat;
use crate::weights::analyze_weights;
use crate::workouts::analyze_workouts;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// Lines read from the export.
    pub lines_read: usize,
    /// Message records built.
    pub records_parsed: usize,
    /// Lines dropped by the parser.
    pub lines_skipped: usize,
    /// Distinct users with at least one workout day.
    pub workout_users: usize,
    /// Distinct users with at least one weekly weight.
    pub weight_users: usize,
    /// Wall-clock seconds spent parsing the export.
    pub parse_time_seconds: f64,
}

/// The complete output of [`analyze_chat`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub records: Vec<MessageRecord>,
    pub workouts: Vec<WorkoutEntry>,
    pub weights: Vec<WeightEntry>,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline over the export at `path`.
///
/// Only a file access failure is an error; malformed lines and messages
/// without workouts or weights simply contribute nothing.
pub fn analyze_chat(path: &Path, patterns: &ChatPatterns) -> Result<AnalysisResult> {
    let parse_start = std::time::Instant::now();
    let table = parse_chat(path, &patterns.header)?;
    let parse_time = parse_start.elapsed().as_secs_f64();

    let mut result = analyze_records(table.records, patterns);
    result.metadata.lines_read = table.report.lines_read;
    result.metadata.lines_skipped = table.report.skipped();
    result.metadata.parse_time_seconds = parse_time;
    Ok(result)
}

/// Run both extractors over already-parsed records.
pub fn analyze_records(records: Vec<MessageRecord>, patterns: &ChatPatterns) -> AnalysisResult {
    let workouts = analyze_workouts(&records, &patterns.workout_marker);
    let workout_users = count_users(workouts.iter().map(|w| w.user.as_str()));
    info!(
        rows = workouts.len(),
        users = workout_users,
        "Workout analysis complete"
    );

    let weights = analyze_weights(&records, &patterns.weight);
    let weight_users = count_users(weights.iter().map(|w| w.user.as_str()));
    info!(
        rows = weights.len(),
        users = weight_users,
        "Weight analysis complete"
    );

    let metadata = AnalysisMetadata {
        records_parsed: records.len(),
        workout_users,
        weight_users,
        ..Default::default()
    };

    AnalysisResult {
        records,
        workouts,
        weights,
        metadata,
    }
}

fn count_users<'a>(users: impl Iterator<Item = &'a str>) -> usize {
    users.collect::<std::collections::HashSet<_>>().len()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer_core::error::AnalyzerError;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_chat(dir: &Path, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.join("chat.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_analyze_chat_end_to_end() {
        let dir = TempDir::new().unwrap();
        let path = write_chat(
            dir.path(),
            &[
                "[30/12/2024, 07:00:00] Sam: run ✅",
                "Average weight: 80.5",
                "[30/12/2024, 19:00:00] Sam: lift ✅",
                "[01/01/2025, 08:00:00] Sam: average weight 81.5",
                "[01/01/2025, 09:00:00] Alex: ✅ swim",
                "[32/13/2021, 99:99:99] Bob: x",
            ],
        );
        let patterns = ChatPatterns::defaults().unwrap();

        let result = analyze_chat(&path, &patterns).unwrap();

        assert_eq!(result.records.len(), 4);
        assert_eq!(result.workouts.len(), 2);
        assert_eq!(result.weights.len(), 1);
        assert!((result.weights[0].weight - 81.0).abs() < 1e-9);
        assert_eq!(result.metadata.lines_read, 6);
        assert_eq!(result.metadata.records_parsed, 4);
        assert_eq!(result.metadata.lines_skipped, 1);
        assert_eq!(result.metadata.workout_users, 2);
        assert_eq!(result.metadata.weight_users, 1);
    }

    #[test]
    fn test_analyze_chat_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_chat(dir.path(), &[]);
        let patterns = ChatPatterns::defaults().unwrap();

        let result = analyze_chat(&path, &patterns).unwrap();

        assert!(result.records.is_empty());
        assert!(result.workouts.is_empty());
        assert!(result.weights.is_empty());
    }

    #[test]
    fn test_analyze_chat_missing_file() {
        let dir = TempDir::new().unwrap();
        let patterns = ChatPatterns::defaults().unwrap();

        let err = analyze_chat(&dir.path().join("nope.txt"), &patterns).unwrap_err();
        assert!(matches!(err, AnalyzerError::FileAccess { .. }));
    }

    #[test]
    fn test_analyze_records_without_io() {
        let patterns = ChatPatterns::defaults().unwrap();
        let result = analyze_records(Vec::new(), &patterns);
        assert_eq!(result.metadata.records_parsed, 0);
        assert_eq!(result.metadata.lines_read, 0);
    }
}
