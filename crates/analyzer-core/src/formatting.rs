//! Plain-text rendering of the derived tables for stdout.

use crate::models::{WeightEntry, WorkoutEntry};

/// Format a weight with two decimal places.
///
/// # Examples
///
/// ```
/// use analyzer_core::formatting::format_weight;
///
/// assert_eq!(format_weight(81.0), "81.00");
/// assert_eq!(format_weight(82.345), "82.35");
/// ```
pub fn format_weight(value: f64) -> String {
    format!("{:.2}", value)
}

/// Render workout entries as an aligned `user  date` table.
///
/// An empty slice renders as `"(no workouts found)"`.
pub fn format_workout_table(entries: &[WorkoutEntry]) -> String {
    if entries.is_empty() {
        return "(no workouts found)".to_string();
    }
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| vec![e.user.clone(), e.date.format("%Y-%m-%d").to_string()])
        .collect();
    render_table(&["user", "date"], &rows)
}

/// Render weekly weights as an aligned `user  year  week  weight` table.
///
/// An empty slice renders as `"(no weights found)"`.
pub fn format_weight_table(entries: &[WeightEntry]) -> String {
    if entries.is_empty() {
        return "(no weights found)".to_string();
    }
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.user.clone(),
                e.iso_year.to_string(),
                e.iso_week.to_string(),
                format_weight(e.weight),
            ]
        })
        .collect();
    render_table(&["user", "year", "week", "weight"], &rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Left-align every column to its widest cell, two spaces apart.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(&header_cells, &widths));
    for row in rows {
        lines.push(render_row(row, &widths));
    }
    lines.join("\n")
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn workout(user: &str, y: i32, m: u32, d: u32) -> WorkoutEntry {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        WorkoutEntry {
            user: user.to_string(),
            date,
            timestamp: date.and_hms_opt(7, 0, 0).unwrap(),
            message: "✅".to_string(),
        }
    }

    #[test]
    fn test_format_workout_table_aligns_columns() {
        let table = format_workout_table(&[
            workout("Sam", 2024, 1, 2),
            workout("Alexandra", 2024, 1, 3),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "user       date");
        assert_eq!(lines[1], "Sam        2024-01-02");
        assert_eq!(lines[2], "Alexandra  2024-01-03");
    }

    #[test]
    fn test_format_weight_table() {
        let entries = vec![WeightEntry {
            user: "Sam".to_string(),
            iso_year: 2025,
            iso_week: 1,
            weight: 81.0,
            samples: 2,
        }];
        let table = format_weight_table(&entries);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "user  year  week  weight");
        assert_eq!(lines[1], "Sam   2025  1     81.00");
    }

    #[test]
    fn test_format_empty_tables() {
        assert_eq!(format_workout_table(&[]), "(no workouts found)");
        assert_eq!(format_weight_table(&[]), "(no weights found)");
    }

    #[test]
    fn test_render_row_counts_chars_not_bytes() {
        let table = format_workout_table(&[workout("Zoë", 2024, 5, 1)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[1], "Zoë   2024-05-01");
    }
}
