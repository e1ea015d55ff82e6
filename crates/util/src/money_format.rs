//! # Money Formatting And Tolerant Parsing
//!
//! Everything that turns digits into displayed BRL amounts and displayed
//! amounts back into centavos. The parser here is the single shared
//! contract between the masked money editor and any consumer of the form
//! payload: it accepts `"400"`, `"400,50"`, `"400.50"`, `"R$ 1.234,56"`,
//! degrades gracefully on garbage, and never fails.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ceiling on the number of integer digits an amount may carry. Typed
/// digits beyond this are ignored by the editor and pasted digits are
/// truncated here, so `i64` centavo arithmetic can never overflow.
pub const MAX_INTEGER_DIGITS: usize = 15;

/// Strips every non-digit character.
pub fn only_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Strips everything that is neither a digit nor a separator, leaving a
/// string the tolerant parser understands. Applied to pasted content
/// before parsing.
pub fn sanitize_money_text(input: &str) -> String {
    static MONEY_JUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.,]").unwrap());
    MONEY_JUNK.replace_all(input, "").into_owned()
}

/// Parses a free-form amount into centavos.
///
/// Rules, in order:
/// - a single comma splits integer and decimal parts; dots on the integer
///   side are grouping;
/// - more than one comma degrades to "all digits are the integer part";
/// - with no comma, a single dot followed by one or two digits is a
///   decimal point; any other dot pattern is grouping;
/// - a bare integer means whole currency units.
///
/// Minus signs and currency symbols are stripped; the result is always
/// `>= 0` and the integer part is truncated to [`MAX_INTEGER_DIGITS`].
pub fn parse_cents_flexible(input: &str) -> i64 {
    let cleaned = sanitize_money_text(input.trim());
    if cleaned.is_empty() {
        return 0;
    }

    let comma_count = cleaned.matches(',').count();
    let (integer_digits, decimal_digits) = if comma_count == 1 {
        let (integer_part, decimal_part) = match cleaned.split_once(',') {
            Some(parts) => parts,
            None => (cleaned.as_str(), ""),
        };
        (only_digits(integer_part), only_digits(decimal_part))
    } else if comma_count > 1 {
        (only_digits(&cleaned), String::new())
    } else {
        match cleaned.split_once('.') {
            Some((integer_part, decimal_part))
                if !decimal_part.contains('.') && (1..=2).contains(&decimal_part.len()) =>
            {
                (only_digits(integer_part), only_digits(decimal_part))
            }
            _ => (only_digits(&cleaned), String::new()),
        }
    };

    let integer_value = digits_to_i64(&integer_digits);
    let decimal_value = match decimal_digits.as_bytes() {
        [] => 0,
        [d] => i64::from(d - b'0') * 10,
        [d1, d2, ..] => i64::from(d1 - b'0') * 10 + i64::from(d2 - b'0'),
    };
    integer_value.saturating_mul(100).saturating_add(decimal_value)
}

/// Groups a run of digits in threes: `"1234567"` becomes `"1.234.567"`.
/// An empty run renders as `"0"`.
pub fn group_thousands(digits: &str, separator: char) -> String {
    if digits.is_empty() {
        return "0".to_string();
    }
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        let remaining = digits.len() - position;
        if position > 0 && remaining % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Renders centavos in the canonical form the money mask maintains:
/// dot-grouped integer part, comma, exactly two decimal digits.
pub fn format_cents(cents: i64) -> String {
    let cents = cents.max(0);
    let integer_part = (cents / 100).to_string();
    format!("{},{:02}", group_thousands(&integer_part, '.'), cents % 100)
}

/// Renders centavos for read-only display, with the currency prefix.
pub fn format_brl(cents: i64) -> String {
    format!("R$ {}", format_cents(cents))
}

/// Parses a count field (quantity, days, percent) tolerantly: junk is
/// stripped and oversized digit runs saturate instead of wrapping.
pub fn parse_count(text: &str) -> u32 {
    only_digits(text)
        .bytes()
        .fold(0u32, |acc, digit| acc.saturating_mul(10).saturating_add(u32::from(digit - b'0')))
}

fn digits_to_i64(digits: &str) -> i64 {
    digits
        .bytes()
        .take(MAX_INTEGER_DIGITS)
        .fold(0i64, |acc, digit| acc * 10 + i64::from(digit - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_non_digits() {
        assert_eq!(only_digits("R$ 1.234,56"), "123456");
        assert_eq!(only_digits(""), "");
    }

    #[test]
    fn parses_bare_integers_as_whole_units() {
        assert_eq!(parse_cents_flexible("400"), 40_000);
        assert_eq!(parse_cents_flexible("  7 "), 700);
    }

    #[test]
    fn parses_comma_decimals() {
        assert_eq!(parse_cents_flexible("400,50"), 40_050);
        assert_eq!(parse_cents_flexible("400,5"), 40_050);
        assert_eq!(parse_cents_flexible("400,"), 40_000);
        assert_eq!(parse_cents_flexible(",50"), 50);
        assert_eq!(parse_cents_flexible("0,05"), 5);
    }

    #[test]
    fn parses_dot_decimals_and_dot_grouping() {
        assert_eq!(parse_cents_flexible("400.50"), 40_050);
        assert_eq!(parse_cents_flexible("400.5"), 40_050);
        // Three digits after a lone dot read as pt-BR grouping.
        assert_eq!(parse_cents_flexible("1.234"), 123_400);
        assert_eq!(parse_cents_flexible("1.234.567"), 123_456_700);
    }

    #[test]
    fn parses_mixed_currency_strings() {
        assert_eq!(parse_cents_flexible("R$ 1.234,56"), 123_456);
        assert_eq!(parse_cents_flexible("R$ 1.234,5"), 123_450);
        assert_eq!(parse_cents_flexible("-10"), 1_000);
    }

    #[test]
    fn degrades_on_multiple_commas() {
        // Unparseable separator soup: all digits become the integer part.
        assert_eq!(parse_cents_flexible("1,2,3"), 12_300);
    }

    #[test]
    fn empty_and_garbage_parse_to_zero() {
        assert_eq!(parse_cents_flexible(""), 0);
        assert_eq!(parse_cents_flexible("   "), 0);
        assert_eq!(parse_cents_flexible("abc"), 0);
    }

    #[test]
    fn truncates_absurd_integer_runs() {
        let long = "9".repeat(40);
        assert_eq!(parse_cents_flexible(&long), digits_to_i64(&"9".repeat(15)) * 100);
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands("0", '.'), "0");
        assert_eq!(group_thousands("999", '.'), "999");
        assert_eq!(group_thousands("1000", '.'), "1.000");
        assert_eq!(group_thousands("1234567", '.'), "1.234.567");
        assert_eq!(group_thousands("", '.'), "0");
    }

    #[test]
    fn formats_canonical_cents() {
        assert_eq!(format_cents(0), "0,00");
        assert_eq!(format_cents(5), "0,05");
        assert_eq!(format_cents(40_050), "400,50");
        assert_eq!(format_cents(123_456), "1.234,56");
        assert_eq!(format_cents(100_000_000), "1.000.000,00");
        assert_eq!(format_cents(-7), "0,00");
        assert_eq!(format_brl(123_456), "R$ 1.234,56");
    }

    #[test]
    fn canonical_form_matches_the_documented_shape() {
        let shape = Regex::new(r"^\d{1,3}(\.\d{3})*,\d{2}$").unwrap();
        for cents in [0, 5, 99, 100, 40_050, 123_456, 100_000_000] {
            assert!(shape.is_match(&format_cents(cents)), "{}", format_cents(cents));
        }
    }

    #[test]
    fn parse_of_canonical_render_is_identity() {
        for cents in [0, 1, 99, 100, 40_050, 123_456, 999_999_999] {
            assert_eq!(parse_cents_flexible(&format_cents(cents)), cents);
        }
    }
}
