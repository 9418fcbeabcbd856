use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Date formats found in calibration certificates: ISO, day-first with
/// four-digit year, and month-first with two-digit year.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum DateFormat {
    Iso,
    DdMmYyyy,
    MmDdYy,
}

static ISO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("hard-coded pattern compiles"));
static DD_MM_YYYY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("hard-coded pattern compiles"));
static MM_DD_YY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}$").expect("hard-coded pattern compiles"));

/// Detect the date format from digit-group widths without parsing.
pub fn detect_format(value: &str) -> Option<DateFormat> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if ISO_PATTERN.is_match(value) {
        return Some(DateFormat::Iso);
    }
    if DD_MM_YYYY_PATTERN.is_match(value) {
        return Some(DateFormat::DdMmYyyy);
    }
    if MM_DD_YY_PATTERN.is_match(value) {
        return Some(DateFormat::MmDdYy);
    }

    None
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_date_with_hint(value, None)
}

/// Parse a certificate date, trying the hint format first when supplied and
/// falling back to pattern detection. Returns None for blank, malformed, or
/// calendrically invalid input; never errors.
///
/// A slash date with a four-digit year is always read day-first: "01/02/2024"
/// is February 1st, even though a month-first reading would also be valid.
pub fn parse_date_with_hint(value: &str, hint: Option<DateFormat>) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(hint) = hint {
        if let Some(parsed) = try_format(value, hint) {
            return Some(parsed);
        }
    }

    detect_format(value).and_then(|detected| try_format(value, detected))
}

fn try_format(value: &str, format: DateFormat) -> Option<NaiveDate> {
    match format {
        DateFormat::Iso => parse_iso(value),
        DateFormat::DdMmYyyy => parse_dd_mm_yyyy(value),
        DateFormat::MmDdYy => parse_mm_dd_yy(value),
    }
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_dd_mm_yyyy(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('/');
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// Two-digit years map to 2000-2099.
fn parse_mm_dd_yy(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('/');
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    let year_2digit = parts.next()?.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(2000 + year_2digit, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("test date should be valid")
    }

    #[test]
    fn parses_iso_format() {
        assert_eq!(parse_date("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024-12-31"), Some(date(2024, 12, 31)));
        assert_eq!(parse_date("  2024-01-15  "), Some(date(2024, 1, 15)));
    }

    #[test]
    fn parses_day_first_format() {
        assert_eq!(parse_date("15/01/2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("5/1/2024"), Some(date(2024, 1, 5)));
        assert_eq!(parse_date("29/02/2024"), Some(date(2024, 2, 29)));
    }

    #[test]
    fn parses_month_first_two_digit_year_format() {
        assert_eq!(parse_date("01/15/24"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("01/01/00"), Some(date(2000, 1, 1)));
        assert_eq!(parse_date("12/31/99"), Some(date(2099, 12, 31)));
    }

    #[test]
    fn ambiguous_slash_date_is_read_day_first() {
        assert_eq!(parse_date("01/02/2024"), Some(date(2024, 2, 1)));
        assert_eq!(
            parse_date_with_hint("01/02/2024", Some(DateFormat::DdMmYyyy)),
            Some(date(2024, 2, 1))
        );
    }

    #[test]
    fn mismatched_hint_falls_back_to_detection() {
        assert_eq!(
            parse_date_with_hint("15/01/2024", Some(DateFormat::Iso)),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn invalid_input_returns_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024-01"), None);
        assert_eq!(parse_date("15-01-2024"), None);
        assert_eq!(parse_date("-01/02/2024"), None);
    }

    #[test]
    fn calendrically_invalid_dates_return_none() {
        assert_eq!(parse_date("31/02/2024"), None);
        assert_eq!(parse_date("30/02/2024"), None);
        assert_eq!(parse_date("32/01/2024"), None);
        // Day-first reading: day 01, month 13.
        assert_eq!(parse_date("01/13/2024"), None);
    }

    #[test]
    fn detects_formats_without_parsing() {
        assert_eq!(detect_format("2024-01-15"), Some(DateFormat::Iso));
        assert_eq!(detect_format("15/01/2024"), Some(DateFormat::DdMmYyyy));
        assert_eq!(detect_format("01/15/24"), Some(DateFormat::MmDdYy));
        assert_eq!(detect_format("  2024-01-15  "), Some(DateFormat::Iso));
        assert_eq!(detect_format("January 15, 2024"), None);
        assert_eq!(detect_format(""), None);
    }

    #[test]
    fn reformatted_dates_reparse_to_the_same_date() {
        let samples = [
            date(2024, 1, 15),
            date(2024, 2, 29),
            date(2000, 1, 1),
            date(2099, 12, 31),
        ];

        for sample in samples {
            let iso = sample.format("%Y-%m-%d").to_string();
            assert_eq!(parse_date(&iso), Some(sample), "iso round trip: {iso}");

            let day_first = sample.format("%d/%m/%Y").to_string();
            assert_eq!(
                parse_date(&day_first),
                Some(sample),
                "day-first round trip: {day_first}"
            );

            let month_first = sample.format("%m/%d/%y").to_string();
            assert_eq!(
                parse_date(&month_first),
                Some(sample),
                "month-first round trip: {month_first}"
            );
        }
    }
}
