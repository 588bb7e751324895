// Utility helpers for parsing and formatting.
//
// This module centralizes all the "dirty" CSV/number/date handling so the
// rest of the code can assume clean, typed values.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

/// Parse the calendar-date prefix of a call start timestamp.
///
/// The dialler exports timestamps like `2024/03/01 09:15:22`; only the
/// first 10 characters carry the date, in `YYYY/MM/DD` form. Returns
/// `None` when the string is shorter than 10 characters, the slice
/// would split a multi-byte character, or the prefix does not parse.
pub fn parse_call_date(s: &str) -> Option<NaiveDate> {
    let prefix = s.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y/%m/%d").ok()
}

/// Render a date the way the report names its columns: `DD/MM/YYYY`.
pub fn format_date_dmy(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

/// Average rounded to the nearest whole second, half away from zero
/// (2.5 rounds to 3). `None` when the denominator is zero.
pub fn round_avg(sum_secs: f64, count: usize) -> Option<i64> {
    if count == 0 {
        return None;
    }
    Some((sum_secs / count as f64).round() as i64)
}

/// Render one optional metric value for a table cell or chart label.
pub fn cell(v: Option<i64>) -> String {
    match v {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_call_date_accepts_timestamp_prefix() {
        let d = parse_call_date("2024/03/01 09:15:22").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn parse_call_date_accepts_bare_date() {
        assert!(parse_call_date("2024/12/31").is_some());
    }

    #[test]
    fn parse_call_date_rejects_bad_input() {
        // Out-of-range components.
        assert!(parse_call_date("2024/13/40 00:00:00").is_none());
        // Wrong separator.
        assert!(parse_call_date("2024-03-01 09:15:22").is_none());
        // Too short to hold a date.
        assert!(parse_call_date("2024/03").is_none());
        assert!(parse_call_date("").is_none());
    }

    #[test]
    fn round_avg_rounds_half_away_from_zero() {
        assert_eq!(round_avg(5.0, 2), Some(3)); // 2.5 -> 3
        assert_eq!(round_avg(100.0, 2), Some(50));
        assert_eq!(round_avg(10.0, 1), Some(10));
    }

    #[test]
    fn round_avg_is_none_for_empty_group() {
        assert_eq!(round_avg(0.0, 0), None);
    }

    #[test]
    fn cell_renders_sentinel_for_missing_value() {
        assert_eq!(cell(Some(42)), "42");
        assert_eq!(cell(None), "-");
    }

    #[test]
    fn parse_f64_safe_handles_common_export_noise() {
        assert_eq!(parse_f64_safe(Some(" 1,234 ")), Some(1234.0));
        assert_eq!(parse_f64_safe(Some("61")), Some(61.0));
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }
}
