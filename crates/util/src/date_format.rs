//! # Date Digit Grouping
//!
//! Helpers behind the `DD/MM/YYYY` date mask: progressive grouping of a
//! digit buffer while the user types, plus calendar validation once the
//! buffer is complete.

use chrono::{Datelike, NaiveDate};

/// Number of digits in a complete `DDMMYYYY` buffer.
pub const DATE_DIGITS: usize = 8;

/// Renders a partial digit buffer with slashes inserted as soon as each
/// group is complete: `"0"` stays `"0"`, `"0508"` becomes `"05/08"`,
/// `"05082026"` becomes `"05/08/2026"`.
pub fn group_date_digits(digits: &str) -> String {
    let digits: String = digits.chars().filter(char::is_ascii_digit).take(DATE_DIGITS).collect();
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// Interprets a complete 8-digit buffer as a calendar date. Returns `None`
/// for incomplete buffers and for impossible dates such as `31/02/2026`.
pub fn parse_day_month_year(digits: &str) -> Option<NaiveDate> {
    let digits: String = digits.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != DATE_DIGITS {
        return None;
    }
    let day: u32 = digits[..2].parse().ok()?;
    let month: u32 = digits[2..4].parse().ok()?;
    let year: i32 = digits[4..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Renders a date in the form the mask produces.
pub fn format_day_month_year(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_is_progressive() {
        assert_eq!(group_date_digits(""), "");
        assert_eq!(group_date_digits("0"), "0");
        assert_eq!(group_date_digits("05"), "05");
        assert_eq!(group_date_digits("050"), "05/0");
        assert_eq!(group_date_digits("0508"), "05/08");
        assert_eq!(group_date_digits("05082"), "05/08/2");
        assert_eq!(group_date_digits("05082026"), "05/08/2026");
    }

    #[test]
    fn grouping_ignores_excess_and_junk() {
        assert_eq!(group_date_digits("050820269999"), "05/08/2026");
        assert_eq!(group_date_digits("05/08/2026"), "05/08/2026");
    }

    #[test]
    fn parses_only_complete_valid_dates() {
        assert_eq!(parse_day_month_year("05082026"), NaiveDate::from_ymd_opt(2026, 8, 5));
        assert_eq!(parse_day_month_year("0508202"), None);
        assert_eq!(parse_day_month_year("31022026"), None);
        assert_eq!(parse_day_month_year("29022024"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_day_month_year("29022026"), None);
    }

    #[test]
    fn format_round_trips_through_the_mask() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let rendered = format_day_month_year(date);
        assert_eq!(rendered, "05/08/2026");
        assert_eq!(parse_day_month_year(&rendered.replace('/', "")), Some(date));
    }
}
