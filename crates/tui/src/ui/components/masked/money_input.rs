//! Digit-by-digit editor for BRL amounts.
//!
//! The field never relies on free-form text editing. Every keystroke is
//! intercepted, the structured state below is updated, and the displayed
//! text is re-rendered from that state, so the value reads
//! `<dot-grouped integer>,<two decimals>` after every mutation and the
//! caret is always derivable from the state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use centavo_types::Money;
use centavo_util::money_format::{
    MAX_INTEGER_DIGITS, group_thousands, parse_cents_flexible, sanitize_money_text,
};

/// Which side of the decimal comma keystrokes currently edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditSide {
    #[default]
    Integer,
    Decimal,
}

/// What the editor did with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The key mutated the mask, or was swallowed by it.
    Consumed,
    /// Navigation or a modified chord; the surrounding form should act.
    Ignored,
}

/// Keystroke-driven state for one money field.
///
/// Invariants:
/// - `integer_digits` is never empty and is `"0"` exactly when the whole
///   part is zero;
/// - `decimal_digits` always holds exactly two ASCII digits;
/// - `decimal_cursor` stays in `0..=2` and only matters on the decimal side;
/// - unless a raw host value was just injected (`stale`), `text` equals the
///   canonical rendering of the digit fields.
///
/// An empty `text` means the field is untouched; it is materialized as
/// `0,00` by the first keystroke and is left empty by focus and blur.
#[derive(Debug, Clone)]
pub struct MoneyInputState {
    integer_digits: String,
    decimal_digits: [u8; 2],
    side: EditSide,
    decimal_cursor: usize,
    text: String,
    stale: bool,
}

impl Default for MoneyInputState {
    fn default() -> Self {
        Self {
            integer_digits: "0".to_string(),
            decimal_digits: [b'0', b'0'],
            side: EditSide::Integer,
            decimal_cursor: 0,
            text: String::new(),
            stale: false,
        }
    }
}

impl MoneyInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The displayed text. Empty for an untouched field, otherwise
    /// canonical after every keystroke and after blur.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn side(&self) -> EditSide {
        self.side
    }

    /// Current amount in centavos. Tolerantly parsed while a raw host
    /// value is pending normalization.
    pub fn amount(&self) -> Money {
        if self.stale {
            return Money::from_cents(parse_cents_flexible(&self.text));
        }
        if self.is_empty() {
            return Money::ZERO;
        }
        let whole = self
            .integer_digits
            .bytes()
            .fold(0i64, |acc, digit| acc * 10 + i64::from(digit - b'0'));
        let dec = i64::from(self.decimal_digits[0] - b'0') * 10 + i64::from(self.decimal_digits[1] - b'0');
        Money::from_cents(whole.saturating_mul(100).saturating_add(dec))
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.set_cents(amount.cents());
    }

    /// Injects a raw host value (an initial form value, say) without
    /// normalizing it. The next focus, keystroke, or blur re-canonicalizes
    /// it through the tolerant parser.
    pub fn set_text(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            *self = Self::default();
        } else {
            self.text = trimmed.to_string();
            self.stale = true;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Column of the caret within the displayed text: immediately left of
    /// the comma on the integer side, after the digit being targeted on
    /// the decimal side.
    pub fn caret_col(&self) -> u16 {
        let comma = self.text.find(',').unwrap_or(self.text.len());
        let col = match self.side {
            EditSide::Integer => comma,
            EditSide::Decimal => comma + 1 + self.decimal_cursor,
        };
        col as u16
    }

    /// Routes one key event through the mask's state table.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyDisposition {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return KeyDisposition::Ignored;
        }
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                self.type_digit(ch);
                KeyDisposition::Consumed
            }
            KeyCode::Char(',' | '.') => {
                self.enter_decimal_side();
                KeyDisposition::Consumed
            }
            KeyCode::Backspace => {
                self.backspace();
                KeyDisposition::Consumed
            }
            // Forward delete never edits the mask.
            KeyCode::Delete => KeyDisposition::Consumed,
            // Every other printable character is rejected outright.
            KeyCode::Char(_) => KeyDisposition::Consumed,
            // Tab, arrows, Enter: the form decides.
            _ => KeyDisposition::Ignored,
        }
    }

    /// A non-empty field is re-canonicalized on focus and editing restarts
    /// on the integer side. An empty field stays empty.
    pub fn on_focus(&mut self) {
        if self.is_empty() {
            return;
        }
        if self.stale {
            self.normalize_from_text();
        }
        self.side = EditSide::Integer;
        self.decimal_cursor = 0;
    }

    /// Tolerantly reparses whatever is displayed and re-renders it in
    /// canonical form. An empty field is left empty, not coerced to `0,00`.
    pub fn on_blur(&mut self) {
        if !self.is_empty() {
            self.normalize_from_text();
        }
        self.side = EditSide::Integer;
        self.decimal_cursor = 0;
    }

    /// Pasted content is stripped down to digits and separators and then
    /// treated like blur input. A paste with no digits at all is ignored.
    pub fn paste(&mut self, pasted: &str) {
        let sanitized = sanitize_money_text(pasted);
        if !sanitized.bytes().any(|byte| byte.is_ascii_digit()) {
            return;
        }
        self.set_cents(parse_cents_flexible(&sanitized));
        self.side = EditSide::Integer;
        self.decimal_cursor = 0;
    }

    fn type_digit(&mut self, ch: char) {
        self.ensure_editable();
        match self.side {
            EditSide::Integer => {
                if self.integer_digits == "0" {
                    self.integer_digits.clear();
                    self.integer_digits.push(ch);
                } else if self.integer_digits.len() < MAX_INTEGER_DIGITS {
                    self.integer_digits.push(ch);
                }
            }
            EditSide::Decimal => {
                if self.decimal_cursor < 2 {
                    self.decimal_digits[self.decimal_cursor] = ch as u8;
                    self.decimal_cursor += 1;
                }
            }
        }
        self.render();
    }

    fn enter_decimal_side(&mut self) {
        self.ensure_editable();
        self.side = EditSide::Decimal;
        self.decimal_cursor = 0;
        self.render();
    }

    fn backspace(&mut self) {
        if self.is_empty() {
            return;
        }
        self.ensure_editable();
        match self.side {
            EditSide::Decimal if self.decimal_cursor > 0 => {
                self.decimal_cursor -= 1;
                self.decimal_digits[self.decimal_cursor] = b'0';
            }
            EditSide::Decimal => {
                // At the left edge of the decimals: cross back over the
                // comma without removing anything.
                self.side = EditSide::Integer;
            }
            EditSide::Integer => {
                if self.integer_digits.len() <= 1 {
                    self.integer_digits.clear();
                    self.integer_digits.push('0');
                } else {
                    self.integer_digits.pop();
                }
            }
        }
        self.render();
    }

    /// Brings the structured state in line with the displayed text before
    /// an edit: normalizes a pending raw value and materializes an empty
    /// field as zero.
    fn ensure_editable(&mut self) {
        if self.stale {
            self.normalize_from_text();
        }
        if self.text.is_empty() {
            self.render();
        }
    }

    fn normalize_from_text(&mut self) {
        self.set_cents(parse_cents_flexible(&self.text));
    }

    fn set_cents(&mut self, cents: i64) {
        let cents = cents.max(0);
        self.integer_digits = (cents / 100).to_string();
        let dec = (cents % 100) as u8;
        self.decimal_digits = [b'0' + dec / 10, b'0' + dec % 10];
        self.render();
    }

    fn render(&mut self) {
        self.text = format!(
            "{},{}{}",
            group_thousands(&self.integer_digits, '.'),
            self.decimal_digits[0] as char,
            self.decimal_digits[1] as char,
        );
        self.stale = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_keys(state: &mut MoneyInputState, keys: &str) {
        for ch in keys.chars() {
            let code = match ch {
                '<' => KeyCode::Backspace,
                other => KeyCode::Char(other),
            };
            state.handle_key(key(code));
        }
    }

    #[test]
    fn typing_digits_builds_the_integer_part_in_order() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "1234");
        assert_eq!(state.text(), "1.234,00");
        assert_eq!(state.side(), EditSide::Integer);
    }

    #[test]
    fn first_digit_replaces_the_lone_zero() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "0");
        assert_eq!(state.text(), "0,00");
        type_keys(&mut state, "7");
        assert_eq!(state.text(), "7,00");
    }

    #[test]
    fn separator_then_two_digits_sets_the_decimals() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "12,34");
        assert_eq!(state.text(), "12,34");

        // Regardless of prior decimal content.
        type_keys(&mut state, ",98");
        assert_eq!(state.text(), "12,98");
    }

    #[test]
    fn dot_also_enters_the_decimal_side() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "5.25");
        assert_eq!(state.text(), "5,25");
    }

    #[test]
    fn third_decimal_digit_is_swallowed() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "1,234");
        assert_eq!(state.text(), "1,23");
        assert_eq!(state.caret_col(), 4);
    }

    #[test]
    fn decimal_backspace_zeroes_digits_then_crosses_the_comma() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "400,5");
        assert_eq!(state.text(), "400,50");

        // Zero the typed digit.
        type_keys(&mut state, "<");
        assert_eq!(state.text(), "400,00");
        assert_eq!(state.side(), EditSide::Decimal);

        // At the left edge: cross the comma, nothing removed.
        type_keys(&mut state, "<");
        assert_eq!(state.text(), "400,00");
        assert_eq!(state.side(), EditSide::Integer);

        type_keys(&mut state, "<");
        assert_eq!(state.text(), "40,00");
    }

    #[test]
    fn backspace_walks_back_through_fully_typed_decimals() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "400,51");
        assert_eq!(state.text(), "400,51");

        type_keys(&mut state, "<");
        assert_eq!(state.text(), "400,50");
        type_keys(&mut state, "<");
        assert_eq!(state.text(), "400,00");
        type_keys(&mut state, "<");
        assert_eq!(state.side(), EditSide::Integer);
    }

    #[test]
    fn integer_backspace_bottoms_out_at_zero() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "7<<");
        assert_eq!(state.text(), "0,00");
        assert_eq!(state.amount(), Money::ZERO);
    }

    #[test]
    fn backspace_on_an_untouched_field_is_a_no_op() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "<");
        assert!(state.is_empty());
    }

    #[test]
    fn typing_400_comma_5_shows_400_50() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "400,5");
        assert_eq!(state.text(), "400,50");
        assert_eq!(state.amount().cents(), 40_050);
    }

    #[test]
    fn other_printable_characters_are_rejected_without_state_change() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "4x0!0");
        assert_eq!(state.text(), "400,00");
        assert_eq!(
            state.handle_key(key(KeyCode::Char('x'))),
            KeyDisposition::Consumed
        );
        assert_eq!(state.text(), "400,00");
    }

    #[test]
    fn navigation_and_chords_pass_through() {
        let mut state = MoneyInputState::new();
        assert_eq!(state.handle_key(key(KeyCode::Tab)), KeyDisposition::Ignored);
        assert_eq!(state.handle_key(key(KeyCode::Left)), KeyDisposition::Ignored);
        assert_eq!(
            state.handle_key(KeyEvent::new(KeyCode::Char('5'), KeyModifiers::CONTROL)),
            KeyDisposition::Ignored
        );
        assert!(state.is_empty());
    }

    #[test]
    fn focus_renormalizes_a_raw_host_value() {
        let mut state = MoneyInputState::new();
        state.set_text("1234");
        state.on_focus();
        assert_eq!(state.text(), "1.234,00");
        assert_eq!(state.side(), EditSide::Integer);
        assert_eq!(state.caret_col(), 5);
    }

    #[test]
    fn blur_reparses_pasted_currency_text() {
        let mut state = MoneyInputState::new();
        state.set_text("R$ 1.234,5");
        state.on_blur();
        assert_eq!(state.text(), "1.234,50");
    }

    #[test]
    fn blur_leaves_an_empty_field_empty() {
        let mut state = MoneyInputState::new();
        state.on_blur();
        assert_eq!(state.text(), "");
    }

    #[test]
    fn blur_after_editing_is_idempotent() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "1234,5");
        let before = state.text().to_string();
        let amount = state.amount();
        state.on_blur();
        assert_eq!(state.text(), before);
        assert_eq!(state.amount(), amount);
        state.on_blur();
        assert_eq!(state.text(), before);
    }

    #[test]
    fn caret_tracks_the_edited_side() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "1234");
        // "1.234,00": caret sits just left of the comma.
        assert_eq!(state.caret_col(), 5);
        type_keys(&mut state, ",");
        assert_eq!(state.caret_col(), 6);
        type_keys(&mut state, "9");
        assert_eq!(state.caret_col(), 7);
    }

    #[test]
    fn integer_digits_cap_at_fifteen() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, &"9".repeat(40));
        let expected = group_thousands(&"9".repeat(15), '.');
        assert_eq!(state.text(), format!("{expected},00"));
    }

    #[test]
    fn paste_is_sanitized_and_normalized() {
        let mut state = MoneyInputState::new();
        state.paste("total: R$ 1.234,5 (approved)");
        assert_eq!(state.text(), "1.234,50");
    }

    #[test]
    fn digitless_paste_is_ignored() {
        let mut state = MoneyInputState::new();
        type_keys(&mut state, "42");
        state.paste("???");
        assert_eq!(state.text(), "42,00");
    }

    #[test]
    fn amount_round_trips_through_set_amount() {
        let mut state = MoneyInputState::new();
        state.set_amount(Money::from_cents(123_456));
        assert_eq!(state.text(), "1.234,56");
        assert_eq!(state.amount().cents(), 123_456);
    }
}
