//! Application-level state.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::KeyValueStore;

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    FastTrade,
}

impl View {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dashboard => Self::FastTrade,
            Self::FastTrade => Self::Dashboard,
        }
    }
}

/// Which control receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Search,
    Ticker,
    Horizon,
}

impl Focus {
    /// Whether a text field is being edited.
    pub fn is_editing(self) -> bool {
        !matches!(self, Self::Table)
    }
}

/// Colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Read the persisted theme, falling back to `default`.
    pub fn load(store: &dyn KeyValueStore, default: Theme) -> Self {
        match store.get(THEME_KEY).as_deref() {
            Some("light") => Self::Light,
            Some("dark") => Self::Dark,
            _ => default,
        }
    }

    pub fn save(self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(THEME_KEY, self.as_str().to_string())
    }
}

/// A single-line text input with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl InputField {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Add a character at the cursor.
    pub fn push_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Focused control.
    pub focus: Focus,
    /// Colour scheme.
    pub theme: Theme,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl AppState {
    pub fn is_editing(&self) -> bool {
        self.focus.is_editing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_input_field_editing() {
        let mut field = InputField::default();
        for c in "aapl".chars() {
            field.push_char(c);
        }
        field.cursor_left();
        field.cursor_left();
        field.push_char('X');
        assert_eq!(field.value(), "aaXpl");

        field.pop_char();
        field.pop_char();
        assert_eq!(field.value(), "apl");
        assert_eq!(field.cursor(), 1);

        field.cursor_right();
        field.cursor_right();
        field.cursor_right();
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn test_input_field_multibyte() {
        let mut field = InputField::new("é");
        field.push_char('a');
        assert_eq!(field.value(), "éa");
        field.cursor_left();
        field.pop_char();
        assert_eq!(field.value(), "a");
    }

    #[test]
    fn test_theme_defaults_to_dark_and_persists() {
        let mut store = MemoryStore::new();
        assert_eq!(Theme::load(&store, Theme::default()), Theme::Dark);

        Theme::Light.save(&mut store).unwrap();
        assert_eq!(Theme::load(&store, Theme::Dark), Theme::Light);

        store.set(THEME_KEY, "sepia".to_string()).unwrap();
        assert_eq!(Theme::load(&store, Theme::Dark), Theme::Dark);
    }

    #[test]
    fn test_focus_editing() {
        assert!(!Focus::Table.is_editing());
        assert!(Focus::Search.is_editing());
        assert!(Focus::Horizon.is_editing());
    }
}
