//! Client-local preferences: the dashboard view and the theme.

use super::app_state::Theme;
use super::view_state::ViewState;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Owns the preference storage and remembers what was last written.
pub struct Preferences {
    storage: Box<dyn KeyValueStore>,
    saved_view: ViewState,
}

impl Preferences {
    /// Wrap `storage`, reading the stored view once.
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let saved_view = ViewState::load(storage.as_ref());
        Self {
            storage,
            saved_view,
        }
    }

    /// View state as last loaded or written.
    pub fn view(&self) -> &ViewState {
        &self.saved_view
    }

    /// Stored theme, or `default` when none is stored.
    pub fn theme(&self, default: Theme) -> Theme {
        Theme::load(self.storage.as_ref(), default)
    }

    /// Write `view` if it differs from the last written copy.
    ///
    /// Returns `Ok(false)` when nothing changed. A failed write still counts
    /// as saved, so it is only retried once the view changes again.
    pub fn persist_view(&mut self, view: &ViewState) -> Result<bool> {
        if *view == self.saved_view {
            return Ok(false);
        }
        self.saved_view = view.clone();
        view.save(self.storage.as_mut())?;
        Ok(true)
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        theme.save(self.storage.as_mut())
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("saved_view", &self.saved_view)
            .finish_non_exhaustive()
    }
}
