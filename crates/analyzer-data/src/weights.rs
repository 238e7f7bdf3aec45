//! Weekly average weight extraction.
//!
//! Each message contributes at most one value: the first match of the
//! configured weight pattern, if it clears the plausibility floor. Values are
//! bucketed by user and ISO-8601 week and averaged.

use std::collections::BTreeMap;

use analyzer_core::models::{MessageRecord, WeightEntry};
use analyzer_core::patterns::WeightPolicy;
use analyzer_core::time_utils::{iso_week_key, week_start};
use chrono::NaiveDate;

// ── WeeklyWeight ──────────────────────────────────────────────────────────────

/// Running sum of the values in one (user, ISO year, ISO week) bucket.
#[derive(Debug, Clone, Default)]
struct WeeklyWeight {
    sum: f64,
    count: usize,
}

impl WeeklyWeight {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Per-(user, ISO year, ISO week) mean of the weights found in `records`.
///
/// Rows are ordered by user, then ISO year, then ISO week. Messages without a
/// plausible value are left out entirely.
pub fn analyze_weights(records: &[MessageRecord], policy: &WeightPolicy) -> Vec<WeightEntry> {
    let mut buckets: BTreeMap<(String, i32, u32), WeeklyWeight> = BTreeMap::new();

    for record in records {
        let Some(value) = policy.extract(&record.message) else {
            continue;
        };
        let (iso_year, iso_week) = iso_week_key(record.timestamp);
        buckets
            .entry((record.user.clone(), iso_year, iso_week))
            .or_default()
            .add(value);
    }

    buckets
        .into_iter()
        .map(|((user, iso_year, iso_week), bucket)| WeightEntry {
            user,
            iso_year,
            iso_week,
            weight: bucket.mean(),
            samples: bucket.count,
        })
        .collect()
}

/// Per-user `(week start, mean weight)` points in ascending date order.
///
/// Users appear in the order of `entries`.
pub fn weight_series_by_user(entries: &[WeightEntry]) -> Vec<(String, Vec<(NaiveDate, f64)>)> {
    let mut grouped: Vec<(String, Vec<(NaiveDate, f64)>)> = Vec::new();
    for entry in entries {
        let Some(monday) = week_start(entry.iso_year, entry.iso_week) else {
            continue;
        };
        match grouped.iter_mut().find(|(user, _)| *user == entry.user) {
            Some((_, points)) => points.push((monday, entry.weight)),
            None => grouped.push((entry.user.clone(), vec![(monday, entry.weight)])),
        }
    }
    for (_, points) in grouped.iter_mut() {
        points.sort_by_key(|(date, _)| *date);
    }
    grouped
}

// ── Tests ─────────────────────────────────────────────────────────────────────
