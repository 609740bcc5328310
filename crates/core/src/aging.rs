//! Aging metrics for submitted drawings.

use chrono::NaiveDate;

use crate::types::Timestamp;

/// Number of whole weeks elapsed between `date` (an ISO `YYYY-MM-DD`
/// string) and `now`.
///
/// Returns 0 when the date is empty or unparseable, and clamps future
/// dates to 0 so the UI never shows a negative age.
pub fn weeks_since(date: &str, now: Timestamp) -> i64 {
    let Some(parsed) = parse_submitted_date(date) else {
        return 0;
    };
    let days = (now.date_naive() - parsed).num_days();
    if days <= 0 {
        0
    } else {
        days / 7
    }
}

/// Parse a `latest_submitted_date` value.
///
/// The source systems deliver either an ISO `YYYY-MM-DD` string or an
/// empty/garbage value; anything unparseable is treated as absent.
pub fn parse_submitted_date(date: &str) -> Option<NaiveDate> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
