//! Detection of non-trading days inside a daily series.

use std::collections::HashSet;

use chrono::NaiveDate;

use super::base::DATE_FORMAT;

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Calendar days between the first and last observed date (inclusive) that
/// have no row, formatted as `YYYY-MM-DD`.
///
/// Walks every day of the span, so the cost grows with the span in days.
pub fn exclude_dates(dates: &[NaiveDate]) -> Vec<String> {
    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return Vec::new();
    };

    let observed: HashSet<String> = dates.iter().map(|d| format_date(*d)).collect();

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(format_date)
        .filter(|day| !observed.contains(day))
        .collect()
}
