//! Tolerant date and money parsing for county exports
//!
//! Clerk exports are inconsistent: the same column can hold `2019-03-14`,
//! `03/14/2019`, `03/2019` or a bare year. Anything unrecognized becomes
//! `None` so one bad field never aborts a property.

use chrono::{Datelike, Local, NaiveDate};

/// Average days per year used for statutory age thresholds
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a recording date in any of the tolerated formats
///
/// Accepted: `YYYY-MM-DD`, ISO datetimes (date part only), `MM/DD/YYYY`,
/// `MM/YYYY` (first of month) and `YYYY` (January 1).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    // ISO datetime: keep the date part
    let date_part = match s.find('T') {
        Some(idx) if idx == 10 => &s[..10],
        _ => s,
    };

    if let Ok(d) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }

    // MM/YYYY
    if let Some((month, year)) = s.split_once('/') {
        if year.len() == 4 && !year.contains('/') {
            let month: u32 = month.trim().parse().ok()?;
            let year: i32 = year.trim().parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, 1);
        }
        return None;
    }

    // YYYY
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

/// Parse a monetary amount such as `$125,000.00` or `(1,200)`
///
/// Parenthesized values are negative. Returns `None` when nothing numeric
/// remains after stripping currency formatting.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let (negative, body) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Elapsed time between two dates in fractional years
pub fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}

/// Whole calendar years elapsed between two dates (0 if `to` precedes `from`)
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to < from {
        return 0;
    }
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
