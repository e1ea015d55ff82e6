//! Formatting, parsing, and configuration helpers shared by the Centavo
//! CLI and TUI.

pub mod date_format;
pub mod form_payload;
pub mod money_format;
pub mod preferences;

pub use date_format::{format_day_month_year, group_date_digits, parse_day_month_year};
pub use form_payload::FormPayloadError;
pub use money_format::{
    MAX_INTEGER_DIGITS, format_brl, format_cents, group_thousands, only_digits, parse_cents_flexible,
    parse_count, sanitize_money_text,
};
pub use preferences::UserPreferences;
