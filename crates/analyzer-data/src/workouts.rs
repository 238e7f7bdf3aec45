//! Workout-day extraction.

use std::collections::HashSet;

use analyzer_core::models::{MessageRecord, WorkoutEntry};
use chrono::NaiveDate;

/// One entry per (user, calendar date) with a message containing `marker`.
///
/// Matching is exact, case-sensitive substring containment. The first
/// qualifying message of a user's day wins; output keeps record order.
pub fn analyze_workouts(records: &[MessageRecord], marker: &str) -> Vec<WorkoutEntry> {
    let mut seen: HashSet<(&str, NaiveDate)> = HashSet::new();

    records
        .iter()
        .filter(|r| r.message.contains(marker))
        .filter(|r| seen.insert((r.user.as_str(), r.timestamp.date())))
        .map(|r| WorkoutEntry {
            user: r.user.clone(),
            date: r.timestamp.date(),
            timestamp: r.timestamp,
            message: r.message.clone(),
        })
        .collect()
}

/// Group workout dates per user, users in order of first appearance.
pub fn workout_days_by_user(entries: &[WorkoutEntry]) -> Vec<(String, Vec<NaiveDate>)> {
    let mut grouped: Vec<(String, Vec<NaiveDate>)> = Vec::new();
    for entry in entries {
        match grouped.iter_mut().find(|(user, _)| *user == entry.user) {
            Some((_, dates)) => dates.push(entry.date),
            None => grouped.push((entry.user.clone(), vec![entry.date])),
        }
    }
    grouped
}
