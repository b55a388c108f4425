//! Input event types and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'),
        }
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// The character of a plain (unmodified by Ctrl/Alt) key press.
    pub fn text_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if c != '\0' && !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
            _ => None,
        }
    }

    /// Check if this matches a key binding string (e.g., "Ctrl+q", "Enter", "?").
    ///
    /// Shift is folded into printable characters, so `"?"` and `"G"` match
    /// regardless of how the terminal reports the Shift modifier.
    pub fn matches(&self, binding: &str) -> bool {
        let mut expected_ctrl = false;
        let mut expected_alt = false;
        let mut expected_shift = false;
        let mut expected_key = "";

        for part in binding.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" => expected_ctrl = true,
                "alt" => expected_alt = true,
                "shift" => expected_shift = true,
                _ => expected_key = part,
            }
        }
        // A literal "+" binding splits into two empty parts.
        if binding == "+" {
            expected_key = "+";
        }

        if self.modifiers.ctrl != expected_ctrl || self.modifiers.alt != expected_alt {
            return false;
        }
        let is_char = matches!(self.key, Key::Char(_));
        if !is_char && self.modifiers.shift != expected_shift {
            return false;
        }

        let mut chars = expected_key.chars();
        if let (Some(c), None) = (chars.next(), chars.clone().next()) {
            return self.key == Key::Char(c);
        }

        match expected_key.to_lowercase().as_str() {
            "enter" => self.key == Key::Enter,
            "esc" | "escape" => self.key == Key::Escape,
            "backspace" => self.key == Key::Backspace,
            "delete" | "del" => self.key == Key::Delete,
            "tab" => self.key == Key::Tab,
            "backtab" => self.key == Key::BackTab,
            "up" => self.key == Key::Up,
            "down" => self.key == Key::Down,
            "left" => self.key == Key::Left,
            "right" => self.key == Key::Right,
            "home" => self.key == Key::Home,
            "end" => self.key == Key::End,
            "pageup" => self.key == Key::PageUp,
            "pagedown" => self.key == Key::PageDown,
            "space" => self.key == Key::Char(' '),
            s if s.starts_with('f') && s.len() <= 3 => s[1..]
                .parse::<u8>()
                .is_ok_and(|n| self.key == Key::F(n)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, mods: KeyModifiers) -> InputEvent {
        InputEvent::from(KeyEvent::new(code, mods))
    }

    #[test]
    fn test_plain_char_binding() {
        assert!(event(KeyCode::Char('q'), KeyModifiers::NONE).matches("q"));
        assert!(!event(KeyCode::Char('Q'), KeyModifiers::SHIFT).matches("q"));
        assert!(!event(KeyCode::Char('q'), KeyModifiers::CONTROL).matches("q"));
    }

    #[test]
    fn test_shifted_symbols_ignore_shift_flag() {
        assert!(event(KeyCode::Char('?'), KeyModifiers::SHIFT).matches("?"));
        assert!(event(KeyCode::Char('?'), KeyModifiers::NONE).matches("?"));
        assert!(event(KeyCode::Char('G'), KeyModifiers::SHIFT).matches("G"));
    }

    #[test]
    fn test_named_and_modified_bindings() {
        assert!(event(KeyCode::Tab, KeyModifiers::NONE).matches("Tab"));
        assert!(!event(KeyCode::Tab, KeyModifiers::SHIFT).matches("Tab"));
        assert!(event(KeyCode::Char('c'), KeyModifiers::CONTROL).matches("Ctrl+c"));
        assert!(event(KeyCode::F(5), KeyModifiers::NONE).matches("F5"));
        assert!(event(KeyCode::Esc, KeyModifiers::NONE).matches("Esc"));
    }

    #[test]
    fn test_text_char() {
        assert_eq!(event(KeyCode::Char('A'), KeyModifiers::SHIFT).text_char(), Some('A'));
        assert_eq!(event(KeyCode::Char('a'), KeyModifiers::CONTROL).text_char(), None);
        assert_eq!(event(KeyCode::Enter, KeyModifiers::NONE).text_char(), None);
    }
}
