//! State management for Predscope.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture.

mod app_state;
mod dashboard_state;
mod modal_state;
mod notification_state;
mod prediction_state;
mod preferences;
pub mod table;
mod view_state;

pub use app_state::{AppState, Focus, InputField, THEME_KEY, Theme, View};
pub use dashboard_state::{DEFAULT_HORIZON_DAYS, DashboardState, PredictionRequest};
pub use modal_state::{Modal, ModalContent, ModalPhase, ModalSize, ModalState};
pub use notification_state::{Notification, NotificationLevel, Toast, ToastPhase, ToastStack};
pub use preferences::Preferences;
pub use prediction_state::{
    Candle, DetailsQuery, FastViewState, Prediction, PredictionDetails, Quotes,
};
pub use table::{Kpis, Outcome, Pager, Signal, TableModel, decide_signal, outcome_badge};
pub use view_state::{PAGE_SIZES, PREFS_KEY, SortDir, SortKey, ViewState};

use crate::config::UiConfig;
use crate::error::Result;
use std::time::Instant;
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    ToggleView,
    SetFocus(Focus),
    CycleFocus,
    ToggleHelp,
    ToggleTheme,

    // Dashboard data
    Refresh,
    PredictionsLoaded {
        generation: u64,
        predictions: Vec<Prediction>,
    },
    QuotesLoaded {
        generation: u64,
        quotes: Quotes,
    },
    RefreshFailed {
        generation: u64,
        message: String,
    },

    // Table controls
    SortBy(SortKey),
    NextPage,
    PrevPage,
    CyclePageSize,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,

    // Text input
    InputChar(char),
    InputBackspace,
    CursorLeft,
    CursorRight,

    // Predictions
    SubmitPrediction,
    PredictionCreated(Prediction),

    // Details modal
    OpenDetails,
    DetailsLoaded(PredictionDetails),
    CloseModal,
    ModalFocusNext,
    ModalFocusPrev,
    ModalActivate,

    // Fast trade
    StartFastTrade,
    StopFastTrade,
    LoadFastTrade,
    FastTradeLoaded {
        predictions: Vec<Prediction>,
        quotes: Quotes,
    },
    SetFastTradeRunning(bool),

    // Notifications
    ShowNotification(Notification),

    // Quit
    Quit,
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Dashboard state.
    pub dashboard: DashboardState,
    /// Fast-trade view state.
    pub fast_trade: FastViewState,
    /// Active modal.
    pub modal: ModalState,
    /// Toasts.
    pub toasts: ToastStack,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        ui: &UiConfig,
        view: ViewState,
        theme: Theme,
    ) -> Self {
        Self {
            app: AppState {
                theme,
                ..Default::default()
            },
            dashboard: DashboardState::new(view),
            fast_trade: FastViewState::default(),
            modal: ModalState::new(ui.modal_open_delay(), ui.modal_close()),
            toasts: ToastStack::new(ui.toast_duration(), ui.toast_transition()),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Show a toast.
    pub fn notify(&mut self, notification: Notification) {
        self.toasts.push(notification, Instant::now());
    }

    /// Advance time-driven transitions.
    pub fn tick(&mut self, now: Instant) {
        self.toasts.tick(now);
        self.modal.tick(now);
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => {
                self.app.current_view = view;
                self.app.focus = Focus::Table;
            }
            Action::ToggleView => {
                self.app.current_view = self.app.current_view.toggled();
                self.app.focus = Focus::Table;
            }
            Action::SetFocus(focus) => self.app.focus = focus,
            Action::CycleFocus => {
                self.app.focus = match self.app.focus {
                    Focus::Ticker => Focus::Horizon,
                    Focus::Horizon => Focus::Ticker,
                    other => other,
                };
            }
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ToggleTheme => self.app.theme = self.app.theme.toggled(),

            // Dashboard data
            Action::Refresh => {
                self.dashboard.begin_refresh();
            }
            Action::PredictionsLoaded {
                generation,
                predictions,
            } => {
                self.dashboard.apply_predictions(generation, predictions);
            }
            Action::QuotesLoaded { generation, quotes } => {
                self.dashboard.apply_quotes(generation, quotes);
            }
            Action::RefreshFailed {
                generation,
                message,
            } => {
                self.dashboard.fail_refresh(generation);
                self.notify(Notification::error(message));
            }

            // Table controls
            Action::SortBy(key) => {
                self.dashboard.view.sort_by(key);
                self.dashboard.selected = 0;
            }
            Action::NextPage => {
                self.dashboard.view.next_page();
                self.dashboard.selected = 0;
                self.dashboard.clamp_page();
            }
            Action::PrevPage => {
                self.dashboard.view.prev_page();
                self.dashboard.selected = 0;
            }
            Action::CyclePageSize => {
                self.dashboard.view.cycle_page_size();
                self.dashboard.selected = 0;
            }
            Action::ScrollUp => self.dashboard.select_prev(),
            Action::ScrollDown => self.dashboard.select_next(),
            Action::GoToTop => self.dashboard.select_first(),
            Action::GoToBottom => self.dashboard.select_last(),

            // Text input
            Action::InputChar(c) => {
                if let Some(field) = self.focused_field() {
                    field.push_char(c);
                }
                self.after_search_edit();
            }
            Action::InputBackspace => {
                if let Some(field) = self.focused_field() {
                    field.pop_char();
                }
                self.after_search_edit();
            }
            Action::CursorLeft => {
                if let Some(field) = self.focused_field() {
                    field.cursor_left();
                }
            }
            Action::CursorRight => {
                if let Some(field) = self.focused_field() {
                    field.cursor_right();
                }
            }

            // Predictions
            Action::SubmitPrediction => {}
            Action::PredictionCreated(prediction) => {
                self.notify(Notification::success(format!(
                    "Prediction added: {}",
                    prediction.ticker
                )));
                self.dashboard.ticker.clear();
            }

            // Details modal
            Action::OpenDetails => {}
            Action::DetailsLoaded(details) => {
                let title = format!("{} • Details", details.ticker);
                self.modal.open(
                    title,
                    ModalContent::Details(Box::new(details)),
                    ModalSize::Lg,
                    Instant::now(),
                );
            }
            Action::CloseModal => self.modal.close(Instant::now()),
            Action::ModalFocusNext => self.modal.focus_next(),
            Action::ModalFocusPrev => self.modal.focus_prev(),
            Action::ModalActivate => {
                if self.modal.active().is_some_and(|m| m.focused() == "Close") {
                    self.modal.close(Instant::now());
                }
            }

            // Fast trade
            Action::StartFastTrade | Action::StopFastTrade | Action::LoadFastTrade => {}
            Action::FastTradeLoaded {
                predictions,
                quotes,
            } => {
                self.fast_trade.predictions = predictions;
                self.fast_trade.quotes = quotes;
                self.fast_trade.last_updated = Some(chrono::Utc::now());
            }
            Action::SetFastTradeRunning(running) => self.fast_trade.running = running,

            // Notifications
            Action::ShowNotification(notification) => self.notify(notification),

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    fn focused_field(&mut self) -> Option<&mut InputField> {
        match self.app.focus {
            Focus::Table => None,
            Focus::Search => Some(&mut self.dashboard.search),
            Focus::Ticker => Some(&mut self.dashboard.ticker),
            Focus::Horizon => Some(&mut self.dashboard.horizon),
        }
    }

    fn after_search_edit(&mut self) {
        if self.app.focus == Focus::Search {
            self.dashboard.sync_search();
        }
    }
}
