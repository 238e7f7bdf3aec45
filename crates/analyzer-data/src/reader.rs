//! Chat export parsing.
//!
//! Turns the line-oriented text export into [`MessageRecord`]s. A header line
//! starts a record; any other line is appended to the record before it.

use std::io::BufRead;
use std::path::Path;

use analyzer_core::error::{AnalyzerError, ParseSkip, Result};
use analyzer_core::models::{MessageRecord, MessageTable, ParseReport};
use analyzer_core::patterns::HeaderGrammar;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse the chat export at `path`.
///
/// A missing or unreadable file (including invalid UTF-8 part-way through)
/// is a [`AnalyzerError::FileAccess`]. Malformed lines are skipped, never
/// reported as errors.
pub fn parse_chat(path: &Path, grammar: &HeaderGrammar) -> Result<MessageTable> {
    let file_access = |source: std::io::Error| AnalyzerError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(file_access)?;
    let table = parse_lines(std::io::BufReader::new(file), grammar).map_err(file_access)?;

    debug!(
        "Parsed {}: {} lines, {} records, {} skipped",
        path.display(),
        table.report.lines_read,
        table.report.records,
        table.report.skipped(),
    );

    Ok(table)
}

/// Parse chat text from any buffered reader.
pub fn parse_lines<R: BufRead>(
    reader: R,
    grammar: &HeaderGrammar,
) -> std::io::Result<MessageTable> {
    let mut parser = ChatParser::new(grammar);
    for (index, line) in reader.lines().enumerate() {
        parser.push_line(index + 1, &line?);
    }
    Ok(parser.finish())
}

// ── ChatParser ────────────────────────────────────────────────────────────────

/// Incremental line consumer that accumulates records in file order.
pub struct ChatParser<'g> {
    grammar: &'g HeaderGrammar,
    records: Vec<MessageRecord>,
    report: ParseReport,
}

impl<'g> ChatParser<'g> {
    pub fn new(grammar: &'g HeaderGrammar) -> Self {
        Self {
            grammar,
            records: Vec::new(),
            report: ParseReport::default(),
        }
    }

    /// Feed one raw line (1-based `line_no`).
    ///
    /// Returns the reason when the line was dropped.
    pub fn push_line(&mut self, line_no: usize, raw: &str) -> Option<ParseSkip> {
        self.report.lines_read += 1;
        let line = raw.trim();

        let outcome = match self.grammar.match_header(line) {
            Some(parts) => match self.grammar.parse_timestamp(&parts) {
                Some(timestamp) => {
                    self.records.push(MessageRecord {
                        timestamp,
                        user: parts.sender.trim().to_string(),
                        message: parts.text.trim().to_string(),
                    });
                    self.report.records += 1;
                    None
                }
                None => Some(ParseSkip::UnparsableTimestamp {
                    line: line_no,
                    timestamp: parts.timestamp_text(),
                }),
            },
            None => match self.records.last_mut() {
                Some(last) => {
                    last.message.push('\n');
                    last.message.push_str(line);
                    self.report.continuations += 1;
                    None
                }
                None => Some(ParseSkip::OrphanContinuation { line: line_no }),
            },
        };

        if let Some(skip) = &outcome {
            debug!("Skipping {}", skip);
            self.report.record_skip(skip);
        }
        outcome
    }

    /// Records parsed so far.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn finish(self) -> MessageTable {
        MessageTable {
            records: self.records,
            report: self.report,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
