//! `DD/MM/YYYY` date field with progressive slash insertion.
//!
//! The state is a plain digit buffer; the slashes exist only in the
//! rendered text. Blur checks the completed buffer against the calendar
//! and flags an impossible date without erasing it.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use centavo_util::date_format::{DATE_DIGITS, format_day_month_year, group_date_digits, parse_day_month_year};

use super::money_input::KeyDisposition;

/// Keystroke-driven state for one date field.
#[derive(Debug, Clone, Default)]
pub struct DateInputState {
    digits: String,
    invalid: bool,
}

impl DateInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The displayed text, slashes included.
    pub fn text(&self) -> String {
        group_date_digits(&self.digits)
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Whether the last blur left an incomplete or impossible date behind.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// The calendar date, once the buffer is complete and plausible.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_day_month_year(&self.digits)
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.digits = match date {
            Some(date) => format_day_month_year(date).replace('/', ""),
            None => String::new(),
        };
        self.invalid = false;
    }

    pub fn clear(&mut self) {
        self.digits.clear();
        self.invalid = false;
    }

    pub fn caret_col(&self) -> u16 {
        self.text().len() as u16
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyDisposition {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return KeyDisposition::Ignored;
        }
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if self.digits.len() < DATE_DIGITS {
                    self.digits.push(ch);
                    self.invalid = false;
                }
                KeyDisposition::Consumed
            }
            KeyCode::Backspace => {
                self.digits.pop();
                self.invalid = false;
                KeyDisposition::Consumed
            }
            // Typed slashes are swallowed; the rendering owns them.
            KeyCode::Char(_) => KeyDisposition::Consumed,
            _ => KeyDisposition::Ignored,
        }
    }

    pub fn on_blur(&mut self) {
        self.invalid = !self.digits.is_empty() && self.date().is_none();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_digits(state: &mut DateInputState, digits: &str) {
        for ch in digits.chars() {
            state.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn slashes_appear_as_groups_complete() {
        let mut state = DateInputState::new();
        type_digits(&mut state, "05");
        assert_eq!(state.text(), "05");
        type_digits(&mut state, "08");
        assert_eq!(state.text(), "05/08");
        type_digits(&mut state, "2026");
        assert_eq!(state.text(), "05/08/2026");
        assert_eq!(state.date(), NaiveDate::from_ymd_opt(2026, 8, 5));
    }

    #[test]
    fn excess_digits_and_typed_slashes_are_swallowed() {
        let mut state = DateInputState::new();
        type_digits(&mut state, "05/08/2026999");
        assert_eq!(state.text(), "05/08/2026");
    }

    #[test]
    fn backspace_peels_digits_not_slashes() {
        let mut state = DateInputState::new();
        type_digits(&mut state, "0508");
        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.text(), "05/0");
        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.text(), "05");
    }

    #[test]
    fn blur_flags_impossible_dates_without_erasing() {
        let mut state = DateInputState::new();
        type_digits(&mut state, "31022026");
        state.on_blur();
        assert!(state.is_invalid());
        assert_eq!(state.text(), "31/02/2026");
        assert_eq!(state.date(), None);

        // Editing clears the flag.
        state.handle_key(key(KeyCode::Backspace));
        assert!(!state.is_invalid());
    }

    #[test]
    fn blur_on_partial_input_flags_incomplete() {
        let mut state = DateInputState::new();
        type_digits(&mut state, "0508");
        state.on_blur();
        assert!(state.is_invalid());
    }

    #[test]
    fn empty_field_is_never_invalid() {
        let mut state = DateInputState::new();
        state.on_blur();
        assert!(!state.is_invalid());
    }

    #[test]
    fn set_date_round_trips() {
        let mut state = DateInputState::new();
        state.set_date(NaiveDate::from_ymd_opt(2026, 8, 5));
        assert_eq!(state.text(), "05/08/2026");
        assert_eq!(state.date(), NaiveDate::from_ymd_opt(2026, 8, 5));
    }
}
