use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

// ── ISO-8601 weeks ────────────────────────────────────────────────────────────

/// `(iso_year, iso_week)` of `ts`.
///
/// Weeks run Monday to Sunday and week 1 holds the year's first Thursday, so
/// the ISO year differs from the calendar year around 1 January.
pub fn iso_week_key(ts: NaiveDateTime) -> (i32, u32) {
    let week = ts.date().iso_week();
    (week.year(), week.week())
}

/// The Monday that starts ISO week `week` of `iso_year`.
///
/// Returns `None` for a week number the year does not have.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use analyzer_core::time_utils::week_start;
///
/// assert_eq!(week_start(2025, 1), NaiveDate::from_ymd_opt(2024, 12, 30));
/// assert_eq!(week_start(2021, 53), None);
/// ```
pub fn week_start(iso_year: i32, week: u32) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(iso_year, week, Weekday::Mon)
}

// ── Chart axis mapping ────────────────────────────────────────────────────────

/// Map a date onto a continuous chart axis (days since 0001-01-01).
pub fn date_to_axis(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Inverse of [`date_to_axis`], rounding to the nearest day.
pub fn axis_to_date(value: f64) -> Option<NaiveDate> {
    let days = value.round();
    if !days.is_finite() || days < f64::from(i32::MIN) || days > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(days as i32)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
