//! Business-day calendar arithmetic
//!
//! Deterministic and clock-free: callers inject "today".

use chrono::{Datelike, NaiveDate, Weekday};

/// Date input formats accepted from the portal form and the intake sheet,
/// tried in order. Anything else is an explicit parse failure.
const ACCEPTED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y"];

/// Saturday and Sunday are never shipping days.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Earliest permissible shipping date: `lead_time_business_days` business
/// days strictly after `today`. Weekends are skipped and never returned.
pub fn minimum_order_date(today: NaiveDate, lead_time_business_days: u32) -> NaiveDate {
    let mut date = today;
    let mut counted = 0;
    while counted < lead_time_business_days {
        date = match date.succ_opt() {
            Some(next) => next,
            None => return date, // end of representable time
        };
        if is_weekday(date) {
            counted += 1;
        }
    }
    date
}

/// Parse a date in one of the accepted input formats.
///
/// Returns `None` for anything unrecognized, so one bad row never aborts a
/// bulk listing.
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Normalize any accepted date format to canonical `YYYY-MM-DD`.
pub fn normalize_date(value: &str) -> Option<String> {
    parse_flexible_date(value).map(|date| date.format("%Y-%m-%d").to_string())
}
