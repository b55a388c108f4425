//! Event handler for processing input events.

use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, Focus, SortKey, Store, View};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::time::{Duration, Instant};

use super::input::{InputEvent, Key};

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// How long to wait for terminal input per poll.
    poll_timeout: Duration,
    /// Maximum gap between the two presses of `gg`.
    chord_window: Duration,
    /// Time of a pending first `g` press.
    pending_g: Option<Instant>,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy)]
struct StoreSnapshot {
    focus: Focus,
    current_view: View,
    modal_open: bool,
    show_help: bool,
}

impl EventHandler {
    pub fn new(keybindings: KeyBindings, poll_timeout: Duration, chord_window: Duration) -> Self {
        Self {
            keybindings,
            poll_timeout,
            chord_window,
            pending_g: None,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            focus: store.app.focus,
            current_view: store.app.current_view,
            modal_open: store.modal.is_open(),
            show_help: store.app.show_help,
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                CrosstermEvent::Key(key) => return Ok(self.handle_key(key, Instant::now())),
                CrosstermEvent::Mouse(mouse) => return Ok(self.handle_mouse(mouse)),
                // Resize and focus changes only need a redraw
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot?;
        let input = InputEvent::from(key);

        if input.matches("Ctrl+c") {
            return Some(Action::Quit);
        }
        if snapshot.modal_open {
            return self.handle_modal(input);
        }
        if snapshot.show_help {
            return self.handle_help(input);
        }
        if snapshot.focus.is_editing() {
            return self.handle_editing(input, snapshot.focus);
        }
        self.handle_normal_mode(input, snapshot, now)
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        let snapshot = self.store_snapshot?;
        if snapshot.modal_open || snapshot.current_view != View::Dashboard {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_modal(&self, input: InputEvent) -> Option<Action> {
        match input.key {
            Key::Escape => Some(Action::CloseModal),
            Key::Tab => Some(Action::ModalFocusNext),
            Key::BackTab => Some(Action::ModalFocusPrev),
            Key::Enter => Some(Action::ModalActivate),
            _ if input.matches(&self.keybindings.quit) => Some(Action::CloseModal),
            _ => None,
        }
    }

    fn handle_help(&self, input: InputEvent) -> Option<Action> {
        if input.key == Key::Escape || input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }
        None
    }

    fn handle_editing(&self, input: InputEvent, focus: Focus) -> Option<Action> {
        match input.key {
            Key::Escape => Some(Action::SetFocus(Focus::Table)),
            Key::Enter => match focus {
                Focus::Search => Some(Action::Refresh),
                Focus::Ticker | Focus::Horizon => Some(Action::SubmitPrediction),
                Focus::Table => None,
            },
            Key::Tab | Key::BackTab => Some(Action::CycleFocus),
            Key::Backspace => Some(Action::InputBackspace),
            Key::Left => Some(Action::CursorLeft),
            Key::Right => Some(Action::CursorRight),
            _ => input.text_char().map(Action::InputChar),
        }
    }

    fn handle_normal_mode(
        &mut self,
        input: InputEvent,
        snapshot: StoreSnapshot,
        now: Instant,
    ) -> Option<Action> {
        let pending_g = self.pending_g.take();

        // Global shortcuts
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&self.keybindings.switch_view) {
            return Some(Action::ToggleView);
        }
        if input.matches(&self.keybindings.theme) {
            return Some(Action::ToggleTheme);
        }

        match snapshot.current_view {
            View::Dashboard => self.handle_dashboard(input, pending_g, now),
            View::FastTrade => self.handle_fast_trade(input),
        }
    }

    fn handle_dashboard(
        &mut self,
        input: InputEvent,
        pending_g: Option<Instant>,
        now: Instant,
    ) -> Option<Action> {
        if input.matches("g") {
            if pending_g.is_some_and(|at| now.duration_since(at) <= self.chord_window) {
                return Some(Action::GoToTop);
            }
            self.pending_g = Some(now);
            return None;
        }
        if input.matches("G") || input.key == Key::End {
            return Some(Action::GoToBottom);
        }
        if input.key == Key::Home {
            return Some(Action::GoToTop);
        }

        if input.matches(&self.keybindings.refresh) {
            return Some(Action::Refresh);
        }
        if input.matches(&self.keybindings.search) {
            return Some(Action::SetFocus(Focus::Search));
        }
        if input.matches(&self.keybindings.new_prediction) {
            return Some(Action::SetFocus(Focus::Ticker));
        }
        if input.matches(&self.keybindings.details) || input.key == Key::Enter {
            return Some(Action::OpenDetails);
        }
        if input.matches(&self.keybindings.page_size) {
            return Some(Action::CyclePageSize);
        }

        // Navigation
        if input.matches(&self.keybindings.up) || input.key == Key::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&self.keybindings.down) || input.key == Key::Down {
            return Some(Action::ScrollDown);
        }
        if matches!(input.key, Key::Left | Key::PageUp) {
            return Some(Action::PrevPage);
        }
        if matches!(input.key, Key::Right | Key::PageDown) {
            return Some(Action::NextPage);
        }

        input
            .text_char()
            .and_then(SortKey::from_digit)
            .map(Action::SortBy)
    }

    fn handle_fast_trade(&self, input: InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.start_polling) {
            return Some(Action::StartFastTrade);
        }
        if input.matches(&self.keybindings.stop_polling) {
            return Some(Action::StopFastTrade);
        }
        if input.matches(&self.keybindings.refresh) {
            return Some(Action::LoadFastTrade);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::state::{ModalContent, ModalSize, Theme, ViewState};
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc;

    fn handler() -> (EventHandler, Store) {
        let (tx, _rx) = mpsc::unbounded_channel();
        let store = Store::new(tx, &UiConfig::default(), ViewState::default(), Theme::Dark);
        let mut handler = EventHandler::new(
            KeyBindings::default(),
            Duration::from_millis(100),
            Duration::from_millis(350),
        );
        handler.update_store_snapshot(&store);
        (handler, store)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shifted(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
    }

    #[test]
    fn test_gg_chord_within_window() {
        let (mut handler, _store) = handler();
        let t0 = Instant::now();
        assert!(handler.handle_key(press(KeyCode::Char('g')), t0).is_none());
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('g')), t0 + Duration::from_millis(200)),
            Some(Action::GoToTop)
        ));
    }

    #[test]
    fn test_gg_chord_expires() {
        let (mut handler, _store) = handler();
        let t0 = Instant::now();
        handler.handle_key(press(KeyCode::Char('g')), t0);
        assert!(handler
            .handle_key(press(KeyCode::Char('g')), t0 + Duration::from_millis(400))
            .is_none());
        // The late press starts a new chord.
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('g')), t0 + Duration::from_millis(500)),
            Some(Action::GoToTop)
        ));
    }

    #[test]
    fn test_other_key_breaks_chord() {
        let (mut handler, _store) = handler();
        let t0 = Instant::now();
        handler.handle_key(press(KeyCode::Char('g')), t0);
        handler.handle_key(press(KeyCode::Char('j')), t0);
        assert!(handler.handle_key(press(KeyCode::Char('g')), t0).is_none());
    }

    #[test]
    fn test_shift_g_goes_to_bottom() {
        let (mut handler, _store) = handler();
        assert!(matches!(
            handler.handle_key(shifted('G'), Instant::now()),
            Some(Action::GoToBottom)
        ));
    }

    #[test]
    fn test_arrows_page_when_not_editing() {
        let (mut handler, mut store) = handler();
        let now = Instant::now();
        assert!(matches!(handler.handle_key(press(KeyCode::Left), now), Some(Action::PrevPage)));
        assert!(matches!(handler.handle_key(press(KeyCode::Right), now), Some(Action::NextPage)));

        store.reduce(Action::SetFocus(Focus::Search));
        handler.update_store_snapshot(&store);
        assert!(matches!(handler.handle_key(press(KeyCode::Left), now), Some(Action::CursorLeft)));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('q')), now),
            Some(Action::InputChar('q'))
        ));
    }

    #[test]
    fn test_enter_depends_on_focus() {
        let (mut handler, mut store) = handler();
        let now = Instant::now();
        assert!(matches!(handler.handle_key(press(KeyCode::Enter), now), Some(Action::OpenDetails)));

        store.reduce(Action::SetFocus(Focus::Search));
        handler.update_store_snapshot(&store);
        assert!(matches!(handler.handle_key(press(KeyCode::Enter), now), Some(Action::Refresh)));

        store.reduce(Action::SetFocus(Focus::Horizon));
        handler.update_store_snapshot(&store);
        assert!(matches!(
            handler.handle_key(press(KeyCode::Enter), now),
            Some(Action::SubmitPrediction)
        ));
    }

    #[test]
    fn test_slash_focuses_search() {
        let (mut handler, _store) = handler();
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('/')), Instant::now()),
            Some(Action::SetFocus(Focus::Search))
        ));
    }

    #[test]
    fn test_digits_choose_sort_column() {
        let (mut handler, _store) = handler();
        match handler.handle_key(press(KeyCode::Char('5')), Instant::now()) {
            Some(Action::SortBy(key)) => assert_eq!(key, SortKey::Probability),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_modal_traps_keys() {
        let (mut handler, mut store) = handler();
        store.modal.open(
            "Info",
            ModalContent::Text("hello".into()),
            ModalSize::Sm,
            Instant::now(),
        );
        handler.update_store_snapshot(&store);
        let now = Instant::now();
        assert!(matches!(handler.handle_key(press(KeyCode::Esc), now), Some(Action::CloseModal)));
        assert!(matches!(handler.handle_key(press(KeyCode::Tab), now), Some(Action::ModalFocusNext)));
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), now),
            Some(Action::ModalFocusPrev)
        ));
        assert!(handler.handle_key(press(KeyCode::Right), now).is_none());
    }

    #[test]
    fn test_fast_trade_keys() {
        let (mut handler, mut store) = handler();
        store.reduce(Action::ToggleView);
        handler.update_store_snapshot(&store);
        let now = Instant::now();
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('s')), now),
            Some(Action::StartFastTrade)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('x')), now),
            Some(Action::StopFastTrade)
        ));
        assert!(handler.handle_key(press(KeyCode::Char('/')), now).is_none());
    }
}
