//! Modal dialog lifecycle.
//!
//! At most one modal exists. It moves through `Opening -> Open -> Closing`
//! and is dropped once the closing transition has elapsed. Transition
//! lengths come from configuration; callers drive time with [`ModalState::tick`].

use std::time::{Duration, Instant};

use super::prediction_state::PredictionDetails;

/// Width class of a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    Sm,
    Md,
    #[default]
    Lg,
}

impl ModalSize {
    /// Popup size as (width %, height %) of the terminal.
    pub fn percent(self) -> (u16, u16) {
        match self {
            Self::Sm => (40, 30),
            Self::Md => (60, 50),
            Self::Lg => (80, 80),
        }
    }
}

/// What the modal body shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalContent {
    /// Plain text body.
    Text(String),
    /// Ticker details with chart and prediction history.
    Details(Box<PredictionDetails>),
}

impl ModalContent {
    /// Focusable controls inside the body, in tab order. The close button
    /// is always first.
    fn focusables(&self) -> Vec<&'static str> {
        match self {
            Self::Text(_) => vec!["Close"],
            Self::Details(_) => vec!["Close", "History"],
        }
    }
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Opening { since: Instant },
    Open,
    Closing { since: Instant },
}

/// An active modal dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub title: String,
    pub content: ModalContent,
    pub size: ModalSize,
    pub phase: ModalPhase,
    focusables: Vec<&'static str>,
    focus: usize,
}

impl Modal {
    /// Label of the focused control.
    pub fn focused(&self) -> &'static str {
        self.focusables[self.focus]
    }

    pub fn focusables(&self) -> &[&'static str] {
        &self.focusables
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, ModalPhase::Closing { .. })
    }
}

/// Owner of the single active modal.
#[derive(Debug)]
pub struct ModalState {
    active: Option<Modal>,
    open_delay: Duration,
    close_delay: Duration,
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new(Duration::from_millis(10), Duration::from_millis(160))
    }
}

impl ModalState {
    pub fn new(open_delay: Duration, close_delay: Duration) -> Self {
        Self {
            active: None,
            open_delay,
            close_delay,
        }
    }

    /// Open a modal, removing any current one immediately.
    pub fn open(
        &mut self,
        title: impl Into<String>,
        content: ModalContent,
        size: ModalSize,
        now: Instant,
    ) {
        if self.active.take().is_some() {
            tracing::debug!("Replacing active modal");
        }
        let focusables = content.focusables();
        self.active = Some(Modal {
            title: title.into(),
            content,
            size,
            phase: ModalPhase::Opening { since: now },
            focusables,
            focus: 0,
        });
    }

    /// Start the closing transition. Closing twice is a no-op.
    pub fn close(&mut self, now: Instant) {
        if let Some(modal) = &mut self.active
            && !modal.is_closing()
        {
            modal.phase = ModalPhase::Closing { since: now };
        }
    }

    /// Advance transitions; removes the modal once closing has finished.
    pub fn tick(&mut self, now: Instant) {
        let Some(phase) = self.active.as_ref().map(|m| m.phase) else {
            return;
        };
        match phase {
            ModalPhase::Opening { since } if now.duration_since(since) >= self.open_delay => {
                if let Some(modal) = &mut self.active {
                    modal.phase = ModalPhase::Open;
                }
            }
            ModalPhase::Closing { since } if now.duration_since(since) >= self.close_delay => {
                self.active = None;
            }
            _ => {}
        }
    }

    /// Move focus forward, wrapping from the last control to the first.
    pub fn focus_next(&mut self) {
        if let Some(modal) = &mut self.active {
            modal.focus = (modal.focus + 1) % modal.focusables.len();
        }
    }

    /// Move focus backward, wrapping from the first control to the last.
    pub fn focus_prev(&mut self) {
        if let Some(modal) = &mut self.active {
            let len = modal.focusables.len();
            modal.focus = (modal.focus + len - 1) % len;
        }
    }

    pub fn active(&self) -> Option<&Modal> {
        self.active.as_ref()
    }

    /// Whether a modal is on screen and accepting input.
    pub fn is_open(&self) -> bool {
        self.active.as_ref().is_some_and(|m| !m.is_closing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ModalState {
        ModalState::new(Duration::from_millis(10), Duration::from_millis(160))
    }

    #[test]
    fn test_open_then_settle() {
        let mut modal = state();
        let t0 = Instant::now();
        modal.open("Hello", ModalContent::Text("body".into()), ModalSize::Sm, t0);
        assert!(matches!(modal.active().unwrap().phase, ModalPhase::Opening { .. }));

        modal.tick(t0 + Duration::from_millis(5));
        assert!(matches!(modal.active().unwrap().phase, ModalPhase::Opening { .. }));

        modal.tick(t0 + Duration::from_millis(10));
        assert_eq!(modal.active().unwrap().phase, ModalPhase::Open);
        assert!(modal.is_open());
    }

    #[test]
    fn test_close_is_delayed_and_idempotent() {
        let mut modal = state();
        let t0 = Instant::now();
        modal.open("Hello", ModalContent::Text("body".into()), ModalSize::Md, t0);
        modal.close(t0 + Duration::from_millis(20));
        assert!(!modal.is_open());
        assert!(modal.active().is_some());

        // A second close must not restart the transition.
        modal.close(t0 + Duration::from_millis(100));
        modal.tick(t0 + Duration::from_millis(179));
        assert!(modal.active().is_some());
        modal.tick(t0 + Duration::from_millis(180));
        assert!(modal.active().is_none());

        modal.close(t0 + Duration::from_millis(200));
        assert!(modal.active().is_none());
    }

    #[test]
    fn test_opening_second_replaces_first() {
        let mut modal = state();
        let t0 = Instant::now();
        modal.open("First", ModalContent::Text("a".into()), ModalSize::Lg, t0);
        modal.close(t0);
        modal.open("Second", ModalContent::Text("b".into()), ModalSize::Lg, t0);

        let active = modal.active().unwrap();
        assert_eq!(active.title, "Second");
        assert!(!active.is_closing());
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut modal = state();
        let details = PredictionDetails {
            ticker: "AAPL".into(),
            period: "6mo".into(),
            interval: "1d".into(),
            last_price: None,
            candles: vec![],
            prediction: None,
            previous: vec![],
        };
        modal.open("AAPL", ModalContent::Details(Box::new(details)), ModalSize::Lg, Instant::now());
        assert_eq!(modal.active().unwrap().focused(), "Close");

        modal.focus_prev();
        assert_eq!(modal.active().unwrap().focused(), "History");
        modal.focus_next();
        assert_eq!(modal.active().unwrap().focused(), "Close");
        modal.focus_next();
        modal.focus_next();
        assert_eq!(modal.active().unwrap().focused(), "Close");
    }
}
