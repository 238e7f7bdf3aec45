use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ParseSkip;

/// One chat message, possibly spanning several lines of the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Local timestamp from the header line (the export carries no zone).
    pub timestamp: NaiveDateTime,
    /// Sender name, trimmed.
    pub user: String,
    /// Message text; continuation lines are joined with `\n`.
    pub message: String,
}

/// Counters collected while parsing a chat export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Lines read from the input.
    pub lines_read: usize,
    /// Header lines that started a record.
    pub records: usize,
    /// Lines appended to the previous record.
    pub continuations: usize,
    /// Header lines dropped because their timestamp did not parse.
    pub unparsable_timestamps: usize,
    /// Continuation lines dropped because no record had started.
    pub orphan_lines: usize,
}

impl ParseReport {
    /// Count a skipped line under its reason.
    pub fn record_skip(&mut self, skip: &ParseSkip) {
        match skip {
            ParseSkip::UnparsableTimestamp { .. } => self.unparsable_timestamps += 1,
            ParseSkip::OrphanContinuation { .. } => self.orphan_lines += 1,
        }
    }

    /// Total lines dropped for any reason.
    pub fn skipped(&self) -> usize {
        self.unparsable_timestamps + self.orphan_lines
    }
}

/// Parsed chat records in file order, with parse statistics.
#[derive(Debug, Clone, Default)]
pub struct MessageTable {
    pub records: Vec<MessageRecord>,
    pub report: ParseReport,
}

impl MessageTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A day on which a user posted the workout marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub user: String,
    /// Calendar date of the first qualifying message that day.
    pub date: NaiveDate,
    pub timestamp: NaiveDateTime,
    pub message: String,
}

/// Mean self-reported weight for one user in one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub user: String,
    /// ISO-8601 week-numbering year (may differ from the calendar year).
    pub iso_year: i32,
    /// ISO-8601 week number, 1-53.
    pub iso_week: u32,
    /// Arithmetic mean of the values in this bucket.
    pub weight: f64,
    /// Number of values averaged.
    pub samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_record_skip() {
        let mut report = ParseReport::default();
        report.record_skip(&ParseSkip::OrphanContinuation { line: 1 });
        report.record_skip(&ParseSkip::UnparsableTimestamp {
            line: 2,
            timestamp: "x".to_string(),
        });
        report.record_skip(&ParseSkip::OrphanContinuation { line: 3 });

        assert_eq!(report.orphan_lines, 2);
        assert_eq!(report.unparsable_timestamps, 1);
        assert_eq!(report.skipped(), 3);
    }

    #[test]
    fn test_message_table_empty() {
        let table = MessageTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.report.skipped(), 0);
    }
}
