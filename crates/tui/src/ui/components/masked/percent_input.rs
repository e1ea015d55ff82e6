//! Integer percent field: digits only, clamped to `0..=100` on blur.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::money_input::KeyDisposition;

/// At most three typed digits; blur clamps the value into range.
const MAX_PERCENT_DIGITS: usize = 3;

/// Keystroke-driven state for a whole-number percentage field.
#[derive(Debug, Clone, Default)]
pub struct PercentInputState {
    digits: String,
}

impl PercentInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The clamped value, or `None` while the field is empty.
    pub fn value(&self) -> Option<u8> {
        if self.digits.is_empty() {
            return None;
        }
        Some(clamp_percent(&self.digits))
    }

    pub fn set_value(&mut self, percent: Option<u8>) {
        self.digits = match percent {
            Some(percent) => percent.min(100).to_string(),
            None => String::new(),
        };
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn caret_col(&self) -> u16 {
        self.digits.len() as u16
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
                if self.digits.len() < MAX_PERCENT_DIGITS {
                    self.digits.push(ch);
                }
                KeyDisposition::Consumed
            }
            KeyCode::Backspace => {
                self.digits.pop();
                KeyDisposition::Consumed
            }
            KeyCode::Char(_) => KeyDisposition::Consumed,
            _ => KeyDisposition::Ignored,
        }
    }

    /// An empty field blurs to empty; anything else snaps into `0..=100`.
    pub fn on_blur(&mut self) {
        if self.digits.is_empty() {
            return;
        }
        self.digits = clamp_percent(&self.digits).to_string();
    }
}

fn clamp_percent(digits: &str) -> u8 {
    let value = digits
        .bytes()
        .fold(0u32, |acc, digit| acc.saturating_mul(10).saturating_add(u32::from(digit - b'0')));
    value.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn accepts_at_most_three_digits() {
        let mut state = PercentInputState::new();
        for ch in "12345".chars() {
            state.handle_key(key(KeyCode::Char(ch)));
        }
        assert_eq!(state.text(), "123");
    }

    #[test]
    fn rejects_non_digits() {
        let mut state = PercentInputState::new();
        assert_eq!(state.handle_key(key(KeyCode::Char('x'))), KeyDisposition::Consumed);
        assert_eq!(state.text(), "");
    }

    #[test]
    fn blur_clamps_into_range() {
        let mut state = PercentInputState::new();
        for ch in "950".chars() {
            state.handle_key(key(KeyCode::Char(ch)));
        }
        state.on_blur();
        assert_eq!(state.text(), "100");
        assert_eq!(state.value(), Some(100));
    }

    #[test]
    fn empty_field_blurs_to_empty() {
        let mut state = PercentInputState::new();
        state.on_blur();
        assert!(state.is_empty());
        assert_eq!(state.value(), None);
    }

    #[test]
    fn backspace_removes_the_last_digit() {
        let mut state = PercentInputState::new();
        state.handle_key(key(KeyCode::Char('5')));
        state.handle_key(key(KeyCode::Char('0')));
        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.text(), "5");
    }
}
